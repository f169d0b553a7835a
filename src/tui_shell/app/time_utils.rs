use std::time::Duration;

/// Coarse "time since" label for the status bar.
pub(super) fn fmt_since(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let mins = secs / 60;
    let hours = mins / 60;
    if secs < 60 {
        "just now".to_string()
    } else if mins < 60 {
        format!("{}m ago", mins)
    } else {
        format!("{}h ago", hours)
    }
}

#[cfg(test)]
#[path = "../../tests/tui_shell/app/time_utils_tests.rs"]
mod tests;
