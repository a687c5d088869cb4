use serde::Serialize;

/// One task in `--json` output
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct TaskJson<'a> {
    /// 1-based position, as accepted by `rm`, `mv` and `edit`
    pub number: usize,
    pub text: &'a str,
}

pub fn tasks_to_json(tasks: &[String]) -> Vec<TaskJson<'_>> {
    tasks
        .iter()
        .enumerate()
        .map(|(i, text)| TaskJson {
            number: i + 1,
            text,
        })
        .collect()
}

/// Numbered plain-text listing, numbers right-aligned to the widest one.
pub fn format_task_lines(tasks: &[String]) -> Vec<String> {
    let width = tasks.len().to_string().len();
    tasks
        .iter()
        .enumerate()
        .map(|(i, text)| format!("{:>width$}. {}", i + 1, text, width = width))
        .collect()
}
