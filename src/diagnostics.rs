//! Warnings printed to stderr, held back while the TUI owns the terminal.

use std::sync::{Mutex, MutexGuard};

static HELD: Mutex<Option<Vec<String>>> = Mutex::new(None);

fn held() -> MutexGuard<'static, Option<Vec<String>>> {
    HELD.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Start holding warnings instead of printing them. Anything already held is kept.
pub fn hold() {
    held().get_or_insert_with(Vec::new);
}

/// Stop holding and return what was collected, oldest first.
pub fn release() -> Vec<String> {
    held().take().unwrap_or_default()
}

/// Print a warning, or keep it for later if warnings are being held.
pub fn warn(msg: String) {
    let mut guard = held();
    match guard.as_mut() {
        Some(buf) => buf.push(msg),
        None => {
            drop(guard);
            eprintln!("{}", msg);
        }
    }
}

/// Print a heading followed by one indented line per problem.
pub fn warn_all(heading: &str, problems: &[String]) {
    if problems.is_empty() {
        return;
    }
    warn(heading.to_string());
    for problem in problems {
        warn(format!("  - {}", problem));
    }
}

/// `eprintln!` that respects [`hold`].
#[macro_export]
macro_rules! diag {
    ($($arg:tt)*) => {
        $crate::diagnostics::warn(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests share the process-wide buffer
    static SERIAL: Mutex<()> = Mutex::new(());

    #[test]
    fn test_held_warnings_are_released_in_order() {
        let _guard = SERIAL.lock().unwrap_or_else(|p| p.into_inner());
        hold();
        warn("first".to_string());
        warn_all("Season file problems:", &["a".to_string(), "b".to_string()]);
        warn_all("Nothing:", &[]);
        let released = release();

        assert_eq!(
            released,
            vec!["first", "Season file problems:", "  - a", "  - b"]
        );
        assert!(release().is_empty());
    }

    #[test]
    fn test_hold_again_keeps_earlier_warnings() {
        let _guard = SERIAL.lock().unwrap_or_else(|p| p.into_inner());
        hold();
        warn("before the terminal is taken".to_string());
        hold();
        diag!("rules: cutoff {}", 10);

        assert_eq!(
            release(),
            vec!["before the terminal is taken", "rules: cutoff 10"]
        );
    }
}
