//! Explicit consent before an irreversible action fires. Two implementations
//! behind one trait, selected once at startup: an interactive prompt and an
//! assume-yes variant for scripted use. Declining means nothing is sent.

use std::io::{self, BufRead, Write};

use crate::error::Result;

pub trait Confirmer {
    fn confirm(&self, title: &str, message: &str) -> Result<bool>;
}

/// Prompts on the terminal and reads a y/N answer from stdin.
pub struct PromptConfirmer;

impl Confirmer for PromptConfirmer {
    fn confirm(&self, title: &str, message: &str) -> Result<bool> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        writeln!(out, "{title}")?;
        write!(out, "{message} [y/N] ")?;
        out.flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        let answer = answer.trim().to_ascii_lowercase();
        Ok(answer == "y" || answer == "yes")
    }
}

/// Answers yes without prompting (--yes).
pub struct AssumeYes;

impl Confirmer for AssumeYes {
    fn confirm(&self, _title: &str, _message: &str) -> Result<bool> {
        Ok(true)
    }
}

pub fn select_confirmer(assume_yes: bool) -> Box<dyn Confirmer> {
    if assume_yes {
        Box::new(AssumeYes)
    } else {
        Box::new(PromptConfirmer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assume_yes_always_confirms() {
        let confirmer = AssumeYes;
        assert!(confirmer.confirm("Void invoice", "Really?").unwrap());
    }
}
