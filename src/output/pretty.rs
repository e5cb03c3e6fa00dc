use colored::Colorize;

use super::status::{paint_status, StatusStyle};
use super::table::{Cell, Table};
use crate::circleci::{Action, ActionOutput, Artifact, Build, EnvVar, ProjectInfo, TestMetadata};
use crate::duration::{format_duration, format_seconds};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Safely truncate a string to n characters, appending "..." if truncated.
/// Works correctly with multi-byte UTF-8 characters.
fn truncate_str(s: &str, max_chars: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() > max_chars {
        let truncated: String = chars.iter().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

fn or_empty(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// Format projects, one per line, colored by the default branch's latest build.
///
/// Verbose mode adds every branch with builds, marking the default branch
/// with `*`.
pub fn format_projects(projects: &[ProjectInfo], verbose: bool) -> String {
    let mut table = Table::new(2);

    for (i, project) in projects.iter().enumerate() {
        let name = format!("{}/{}", project.username, project.reponame);

        if !verbose {
            let style = project
                .default_branch_build()
                .map(|b| StatusStyle::for_status(&b.status))
                .unwrap_or(StatusStyle::NoTests);
            table.row([Cell::styled(name, style)]);
            continue;
        }

        if i > 0 {
            table.blank();
        }
        table.row([name]);

        for (branch_name, branch) in &project.branches {
            let Some(build) = branch.latest_build() else {
                continue;
            };

            let marker = if project.default_branch.as_deref() == Some(branch_name.as_str()) {
                "*"
            } else {
                ""
            };
            let style = StatusStyle::for_status(&build.status);
            table.row([
                Cell::styled(format!("{branch_name}{marker}"), style),
                Cell::styled(build.status.clone(), style),
            ]);
        }
    }

    table.render()
}

/// Format a list of builds as `account/repo/num  status  branch  subject`.
///
/// When `max_width` is known the subject is truncated to fit it.
pub fn format_recent_builds(builds: &[Build], max_width: Option<usize>) -> String {
    let rows: Vec<[String; 3]> = builds
        .iter()
        .map(|b| {
            [
                format!("{}/{}/{}", b.username, b.reponame, b.build_num),
                b.status.clone(),
                or_empty(&b.branch).to_string(),
            ]
        })
        .collect();

    // Width taken by the aligned columns before the subject
    let lead = (0..3)
        .map(|col| rows.iter().map(|r| r[col].chars().count()).max().unwrap_or(0) + 4)
        .sum::<usize>();

    let mut table = Table::new(4);
    for (build, [id, status, branch]) in builds.iter().zip(rows) {
        let subject = or_empty(&build.subject);
        let subject = match max_width {
            Some(width) if width > lead + 10 => truncate_str(subject, width - lead),
            _ => subject.to_string(),
        };
        let style = StatusStyle::for_status(&status);
        table.row([
            Cell::from(id),
            Cell::styled(status, style),
            Cell::from(branch),
            Cell::from(subject),
        ]);
    }

    table.render()
}

/// Format the summary of a single build
pub fn format_build(build: &Build) -> String {
    let mut table = Table::new(2);
    table.row(["Build".to_string(), build.build_num.to_string()]);
    table.row(["Subject", or_empty(&build.subject)]);
    table.row(["Trigger", or_empty(&build.why)]);
    table.row(["Author", or_empty(&build.author_name)]);
    table.row(["Committer", or_empty(&build.committer_name)]);
    table.row(vec![
        Cell::from("Status"),
        Cell::styled(build.status.clone(), StatusStyle::for_status(&build.status)),
    ]);

    table.row(["Build Parameters", ""]);
    match build.build_parameters.as_ref().filter(|p| !p.is_empty()) {
        None => table.row(["", "None"]),
        Some(params) => {
            for (key, value) in params {
                let value = match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                table.row([String::new(), key.clone(), value]);
            }
        }
    }

    let started = build
        .start_time
        .map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_default();
    table.row(["Started".to_string(), started]);

    if let Some(duration) = build.duration() {
        table.row(["Duration".to_string(), format_duration(duration)]);
    }

    table.render()
}

/// Format the steps a node ran.
///
/// `outputs` is asked for the console output of every action that has some;
/// returning `None` skips it.
pub fn format_node<F>(build: &Build, node: usize, mut outputs: F) -> String
where
    F: FnMut(&Action) -> Option<Vec<ActionOutput>>,
{
    let mut lines = Vec::new();

    for step in &build.steps {
        let Some(action) = step.action_for_node(node) else {
            continue;
        };

        let mut line = paint_status(&action.status, &format!("* {} ({})", step.name, action.status))
            .to_string();
        if let Some(duration) = action.duration() {
            let took = format!(" ({})", format_duration(duration));
            line.push_str(&paint_status(&action.status, &took).to_string());
        }
        lines.push(line);

        if action.name != step.name {
            lines.push(format!("\t{}", action.name));
        }

        if action.has_output {
            if let Some(messages) = outputs(action) {
                for output in messages {
                    lines.push(output.message.trim_matches('\n').to_string());
                }
                lines.push(String::new());
            }
        }
    }

    lines.join("\n")
}

/// Format build artifacts as `Node  Path  URL`
pub fn format_artifacts(artifacts: &[Artifact]) -> String {
    let mut table = Table::new(2);
    table.row(["Node", "Path", "URL"]);
    for artifact in artifacts {
        table.row([
            artifact.node_index.to_string(),
            artifact.path.clone(),
            artifact.url.clone(),
        ]);
    }
    table.render()
}

/// Format test results as `file: name result (duration)`
pub fn format_test_metadata(tests: &[TestMetadata]) -> String {
    let mut lines = Vec::new();
    for test in tests {
        lines.push(format!(
            "{}: {} {} ({})",
            or_empty(&test.file),
            or_empty(&test.name),
            paint_status(&test.result, &test.result),
            format_seconds(test.run_time)
        ));
        if let Some(ref message) = test.message {
            lines.push(message.clone());
        }
    }
    lines.join("\n")
}

/// Format environment variables as `NAME=VALUE`
pub fn format_env_vars(vars: &[EnvVar]) -> String {
    vars.iter()
        .map(|v| format!("{}={}", v.name, v.value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Heading printed before each node's steps
pub fn format_node_heading(node: usize) -> String {
    format!("Node {}", node.to_string().bold())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circleci::{Branch, BuildSummary, Step};
    use crate::output::strip_ansi;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    // ─────────────────────────────────────────────────────────────────────────
    // Test Helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn make_test_build(build_num: i64, status: &str) -> Build {
        Build {
            build_num,
            username: "myorg".to_string(),
            reponame: "myrepo".to_string(),
            branch: Some("main".to_string()),
            subject: Some("Fix the flux capacitor".to_string()),
            why: Some("github".to_string()),
            author_name: Some("Ada".to_string()),
            committer_name: Some("Grace".to_string()),
            status: status.to_string(),
            start_time: Some(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()),
            stop_time: Some(Utc.with_ymd_and_hms(2024, 1, 1, 12, 3, 12).unwrap()),
            parallel: 1,
            ..Default::default()
        }
    }

    fn make_action(name: &str, status: &str, parallel: bool, index: u32) -> Action {
        Action {
            name: name.to_string(),
            status: status.to_string(),
            parallel,
            index,
            ..Default::default()
        }
    }

    fn make_project(name: &str, builds: &[(&str, &str)]) -> ProjectInfo {
        let branches = builds
            .iter()
            .map(|(branch, status)| {
                (
                    branch.to_string(),
                    Branch {
                        recent_builds: Some(vec![BuildSummary {
                            status: status.to_string(),
                            ..Default::default()
                        }]),
                        running_builds: None,
                    },
                )
            })
            .collect();
        ProjectInfo {
            username: "myorg".to_string(),
            reponame: name.to_string(),
            default_branch: Some("main".to_string()),
            branches,
            ..Default::default()
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // truncate_str Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_truncate_str_short() {
        assert_eq!(truncate_str("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_str_long() {
        assert_eq!(truncate_str("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_str_unicode() {
        assert_eq!(truncate_str("héllo wörld", 8), "héllo...");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // format_projects Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_format_projects_plain() {
        let projects = vec![make_project("one", &[("main", "success")]), make_project("two", &[])];
        let result = strip_ansi(&format_projects(&projects, false));
        assert_eq!(result, "myorg/one\nmyorg/two");
    }

    #[test]
    fn test_format_projects_verbose_marks_default_branch() {
        let projects = vec![make_project("one", &[("main", "success"), ("dev", "failed")])];
        let result = strip_ansi(&format_projects(&projects, true));
        assert_eq!(result, "myorg/one\ndev    failed\nmain*  success");
    }

    #[test]
    fn test_format_projects_verbose_separates_projects() {
        let projects = vec![
            make_project("one", &[("main", "success")]),
            make_project("two", &[("main", "running")]),
        ];
        let result = strip_ansi(&format_projects(&projects, true));
        assert!(result.contains("main*  success\n\nmyorg/two"));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // format_recent_builds Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_format_recent_builds_columns() {
        let builds = vec![make_test_build(7, "success"), make_test_build(12, "failed")];
        let result = strip_ansi(&format_recent_builds(&builds, None));
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines[0], "myorg/myrepo/7     success    main    Fix the flux capacitor");
        assert_eq!(lines[1], "myorg/myrepo/12    failed     main    Fix the flux capacitor");
    }

    #[test]
    fn test_format_recent_builds_truncates_subject() {
        let builds = vec![make_test_build(7, "success")];
        let result = strip_ansi(&format_recent_builds(&builds, Some(50)));
        assert!(result.ends_with("..."));
        assert!(result.chars().count() <= 50);
    }

    #[test]
    fn test_format_recent_builds_missing_fields_render_empty() {
        let build = Build {
            build_num: 1,
            username: "a".to_string(),
            reponame: "b".to_string(),
            status: "queued".to_string(),
            ..Default::default()
        };
        let result = strip_ansi(&format_recent_builds(&[build], None));
        assert_eq!(result, "a/b/1    queued");
    }

    #[test]
    fn test_format_recent_builds_empty() {
        assert_eq!(format_recent_builds(&[], None), "");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // format_build Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_format_build_summary() {
        let build = make_test_build(42, "success");
        let result = strip_ansi(&format_build(&build));
        assert!(result.starts_with("Build             42\n"));
        assert!(result.contains("Subject           Fix the flux capacitor"));
        assert!(result.contains("Trigger           github"));
        assert!(result.contains("Committer         Grace"));
        assert!(result.contains("Status            success"));
        assert!(result.contains("None"));
        assert!(result.contains("Started           2024-01-01 12:00:00 UTC"));
        assert!(result.contains("Duration          3m 12s"));
    }

    #[test]
    fn test_format_build_parameters() {
        let mut build = make_test_build(1, "running");
        let mut params = BTreeMap::new();
        params.insert("DEPLOY".to_string(), serde_json::json!("yes"));
        params.insert("RETRIES".to_string(), serde_json::json!(3));
        build.build_parameters = Some(params);

        let result = strip_ansi(&format_build(&build));
        assert!(result.contains("DEPLOY   yes"));
        assert!(result.contains("RETRIES  3"));
        assert!(!result.contains("None"));
    }

    #[test]
    fn test_format_build_not_started() {
        let mut build = make_test_build(1, "queued");
        build.start_time = None;
        let result = strip_ansi(&format_build(&build));
        assert!(result.ends_with("Started"));
        assert!(!result.contains("Duration"));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // format_node Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_format_node_picks_parallel_action() {
        let mut build = make_test_build(1, "success");
        build.steps = vec![
            Step {
                name: "checkout".to_string(),
                actions: vec![make_action("checkout", "success", false, 0)],
            },
            Step {
                name: "test".to_string(),
                actions: vec![
                    make_action("test", "success", true, 0),
                    make_action("test shard 1", "failed", true, 1),
                ],
            },
        ];

        let result = strip_ansi(&format_node(&build, 1, |_| None));
        assert_eq!(result, "* checkout (success)\n* test (failed)\n\ttest shard 1");
    }

    #[test]
    fn test_format_node_includes_outputs_and_duration() {
        let mut action = make_action("npm test", "success", false, 0);
        action.has_output = true;
        action.start_time = Some(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
        action.end_time = Some(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 5).unwrap());

        let mut build = make_test_build(1, "success");
        build.steps = vec![Step {
            name: "npm test".to_string(),
            actions: vec![action],
        }];

        let result = strip_ansi(&format_node(&build, 0, |_| {
            Some(vec![ActionOutput {
                message: "\nall tests passed\n".to_string(),
                ..Default::default()
            }])
        }));
        assert_eq!(result, "* npm test (success) (5s)\nall tests passed\n");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Other formatters
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_format_artifacts_table() {
        let artifacts = vec![Artifact {
            node_index: 0,
            path: "tmp/report.xml".to_string(),
            url: "https://example.com/report.xml".to_string(),
            ..Default::default()
        }];
        let result = format_artifacts(&artifacts);
        assert_eq!(
            result,
            "Node  Path            URL\n0     tmp/report.xml  https://example.com/report.xml"
        );
    }

    #[test]
    fn test_format_test_metadata() {
        let tests = vec![
            TestMetadata {
                file: Some("spec/a_spec.rb".to_string()),
                name: Some("does a thing".to_string()),
                result: "failure".to_string(),
                run_time: 1.5,
                message: Some("expected 1, got 2".to_string()),
                ..Default::default()
            },
            TestMetadata {
                file: None,
                name: Some("other".to_string()),
                result: "success".to_string(),
                run_time: 0.02,
                ..Default::default()
            },
        ];
        let result = strip_ansi(&format_test_metadata(&tests));
        assert_eq!(
            result,
            "spec/a_spec.rb: does a thing failure (1.5s)\nexpected 1, got 2\n: other success (20ms)"
        );
    }

    #[test]
    fn test_format_env_vars() {
        let vars = vec![
            EnvVar {
                name: "A".to_string(),
                value: "xxxx1".to_string(),
            },
            EnvVar {
                name: "B".to_string(),
                value: "xxxx2".to_string(),
            },
        ];
        assert_eq!(format_env_vars(&vars), "A=xxxx1\nB=xxxx2");
    }
}
