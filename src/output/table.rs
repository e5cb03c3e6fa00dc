//! Column-aligned text tables
//!
//! Widths are measured on the plain text of each cell and styling is applied
//! afterwards, so ANSI escapes never shift the columns.

use super::status::StatusStyle;

/// One table cell, optionally colored by build status
#[derive(Debug, Clone, Default)]
pub struct Cell {
    text: String,
    style: Option<StatusStyle>,
}

impl Cell {
    pub fn styled(text: impl Into<String>, style: StatusStyle) -> Self {
        Self {
            text: text.into(),
            style: Some(style),
        }
    }

    fn width(&self) -> usize {
        self.text.chars().count()
    }

    fn render(&self) -> String {
        match self.style {
            Some(style) => style.paint(&self.text).to_string(),
            None => self.text.clone(),
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self {
            text: text.to_string(),
            style: None,
        }
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self { text, style: None }
    }
}

/// Left-aligned table; the last cell of each row is never padded
#[derive(Debug, Clone)]
pub struct Table {
    padding: usize,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create a table with `padding` spaces between columns
    pub fn new(padding: usize) -> Self {
        Self {
            padding,
            rows: Vec::new(),
        }
    }

    pub fn row<I, C>(&mut self, cells: I)
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn blank(&mut self) {
        self.rows.push(Vec::new());
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = Vec::new();
        for row in &self.rows {
            let Some((_, aligned)) = row.split_last() else {
                continue;
            };
            for (i, cell) in aligned.iter().enumerate() {
                if widths.len() <= i {
                    widths.push(0);
                }
                widths[i] = widths[i].max(cell.width());
            }
        }
        widths
    }

    pub fn render(&self) -> String {
        let widths = self.column_widths();

        let lines: Vec<String> = self
            .rows
            .iter()
            .map(|row| {
                let mut line = String::new();
                let last = row.len().saturating_sub(1);
                for (i, cell) in row.iter().enumerate() {
                    line.push_str(&cell.render());
                    if i < last {
                        let fill = widths[i] - cell.width() + self.padding;
                        line.push_str(&" ".repeat(fill));
                    }
                }
                line.trim_end().to_string()
            })
            .collect();

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::strip_ansi;

    #[test]
    fn test_columns_are_aligned() {
        let mut table = Table::new(2);
        table.row(["a", "one", "x"]);
        table.row(["long", "t", "y"]);

        assert_eq!(table.render(), "a     one  x\nlong  t    y");
    }

    #[test]
    fn test_last_cell_is_not_padded() {
        let mut table = Table::new(4);
        table.row(["short", "a very long trailing cell"]);
        table.row(["much longer", "b"]);

        let expected = format!(
            "short{}a very long trailing cell\nmuch longer{}b",
            " ".repeat(10),
            " ".repeat(4)
        );
        assert_eq!(table.render(), expected);
    }

    #[test]
    fn test_styling_does_not_affect_alignment() {
        let mut table = Table::new(2);
        table.row(vec![Cell::from("id"), Cell::styled("failed", StatusStyle::Failure), Cell::from("x")]);
        table.row(vec![Cell::from("id"), Cell::styled("ok", StatusStyle::Success), Cell::from("y")]);

        let expected = format!("id  failed  x\nid  ok{}y", " ".repeat(6));
        assert_eq!(strip_ansi(&table.render()), expected);
    }

    #[test]
    fn test_blank_rows_and_leading_empty_cells() {
        let mut table = Table::new(2);
        table.row(["Build Parameters", ""]);
        table.row(["", "KEY", "value"]);
        table.blank();
        table.row(["Started", "now"]);

        let expected = format!(
            "Build Parameters\n{}KEY  value\n\nStarted{}now",
            " ".repeat(18),
            " ".repeat(11)
        );
        assert_eq!(table.render(), expected);
    }

    #[test]
    fn test_unicode_width_counts_chars() {
        let mut table = Table::new(1);
        table.row(["héllo", "x"]);
        table.row(["a", "y"]);

        assert_eq!(table.render(), "héllo x\na     y");
    }
}
