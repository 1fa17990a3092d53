use super::Aggregate;

pub const NO_ISSUES: &str = "No issues found.";

/// Render an aggregate as a nested markdown list and return its issue count.
///
/// Single-item levels collapse onto their parent line:
/// - one epic with one issue: `- objective / epic / issue`
/// - several epics, one issue: `  - epic / issue` under the objective
/// - one epic, several issues: the epic title is dropped and issues hang
///   directly under the objective
/// - several epics, several issues: `  - epic` followed by its issues
pub fn generate_markdown_table(aggregate: &Aggregate) -> (usize, String) {
    if aggregate.is_empty() {
        return (0, NO_ISSUES.to_string());
    }

    let mut md = String::new();

    for objective in aggregate.objectives() {
        let m = objective.epics.len();
        md.push_str(&format!("- {}", objective.title));

        for epic in &objective.epics {
            let k = epic.issues.len();

            match (k, m) {
                (1, 1) => {
                    md.push_str(&format!(" / {} / {}\n", epic.title, epic.issues[0]));
                }
                (1, _) => {
                    close_line(&mut md);
                    md.push_str(&format!("  - {} / {}\n", epic.title, epic.issues[0]));
                }
                (_, 1) => {
                    close_line(&mut md);
                    for issue in &epic.issues {
                        md.push_str(&format!("    - {}\n", issue));
                    }
                }
                _ => {
                    close_line(&mut md);
                    md.push_str(&format!("  - {}\n", epic.title));
                    for issue in &epic.issues {
                        md.push_str(&format!("    - {}\n", issue));
                    }
                }
            }
        }
    }

    (aggregate.issue_count(), md)
}

/// Terminate the pending objective line, if it is still open
fn close_line(md: &mut String) {
    if !md.ends_with('\n') {
        md.push('\n');
    }
}
