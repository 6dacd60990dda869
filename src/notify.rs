//! Operator-facing status messages, classified by severity. Success and info
//! go to stdout, warnings and errors to stderr so scripted callers can keep
//! payload output clean.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    fn prefix(&self) -> &'static str {
        match self {
            Severity::Success => "✓",
            Severity::Error => "Error:",
            Severity::Warning => "! Warning:",
            Severity::Info => "·",
        }
    }

    fn is_stderr(&self) -> bool {
        matches!(self, Severity::Error | Severity::Warning)
    }
}

pub fn notify(severity: Severity, message: &str) {
    let line = format!("{} {}", severity.prefix(), message);
    if severity.is_stderr() {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

pub fn success(message: &str) {
    notify(Severity::Success, message);
}

pub fn error(message: &str) {
    notify(Severity::Error, message);
}

pub fn warning(message: &str) {
    notify(Severity::Warning, message);
}

pub fn info(message: &str) {
    notify(Severity::Info, message);
}
