use colored::{ColoredString, Colorize};

/// Display category of a build, action or test status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusStyle {
    /// Nothing to report: no tests, canceled, or no builds at all
    NoTests,
    Success,
    Failure,
    Running,
    /// Anything unrecognised
    Neutral,
}

impl StatusStyle {
    pub fn for_status(status: &str) -> Self {
        match status {
            "no_tests" | "canceled" => Self::NoTests,
            "success" | "fixed" => Self::Success,
            "failed" | "timedout" | "failure" => Self::Failure,
            "running" => Self::Running,
            _ => Self::Neutral,
        }
    }

    pub fn paint(self, text: &str) -> ColoredString {
        match self {
            Self::NoTests => text.yellow(),
            Self::Success => text.green(),
            Self::Failure => text.red(),
            Self::Running => text.blue(),
            Self::Neutral => text.white(),
        }
    }
}

/// Color `text` according to `status`
pub fn paint_status(status: &str, text: &str) -> ColoredString {
    StatusStyle::for_status(status).paint(text)
}
