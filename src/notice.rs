use std::io::Write;

/// Channel through which failed submissions are announced to the user
pub trait Notifier: Send + Sync {
    fn notify_failure(&self, message: &str);
}

/// Prints a framed notice on stderr, standing in for a modal alert
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotice;

impl Notifier for TerminalNotice {
    fn notify_failure(&self, message: &str) {
        let rule = "!".repeat(message.chars().count() + 4);
        let mut stderr = std::io::stderr().lock();
        // Nothing left to report to if stderr itself is gone.
        let _ = writeln!(stderr, "\n{rule}\n! {message} !\n{rule}");
    }
}
