//! ui::prompts
//!
//! Line and secret prompts for `config login`.
//!
//! # Design
//!
//! Prompts are only shown in interactive mode. In non-interactive mode,
//! values must come from flags, or the command fails with a clear error.

use std::io::{self, BufRead, IsTerminal, Write};

use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("not in interactive mode; pass the value as a flag")]
    NotInteractive,

    #[error("no input received")]
    Eof,

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// Whether stdin is a terminal.
pub fn is_interactive() -> bool {
    io::stdin().is_terminal()
}

/// Prompt for a line of text, offering `default` on empty input.
pub fn input(message: &str, default: Option<&str>, interactive: bool) -> Result<String, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }

    let mut stdout = io::stdout();
    match default {
        Some(d) if !d.is_empty() => write!(stdout, "{} [{}]: ", message, d)?,
        _ => write!(stdout, "{}: ", message)?,
    }
    stdout.flush()?;

    let stdin = io::stdin();
    read_answer(&mut stdin.lock(), default)
}

/// Prompt for a secret. Input is not echoed.
pub fn password(message: &str, interactive: bool) -> Result<String, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }
    let value = rpassword::prompt_password(format!("{}: ", message))?;
    Ok(value.trim().to_string())
}

fn read_answer(reader: &mut impl BufRead, default: Option<&str>) -> Result<String, PromptError> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(PromptError::Eof);
    }
    let answer = line.trim();
    if answer.is_empty() {
        Ok(default.unwrap_or_default().to_string())
    } else {
        Ok(answer.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_interactive_refuses() {
        assert!(matches!(
            input("Endpoint", None, false),
            Err(PromptError::NotInteractive)
        ));
        assert!(matches!(
            password("Secret", false),
            Err(PromptError::NotInteractive)
        ));
    }

    #[test]
    fn answer_trimmed() {
        let mut reader = io::Cursor::new("  value \n");
        assert_eq!(read_answer(&mut reader, None).unwrap(), "value");
    }

    #[test]
    fn empty_answer_uses_default() {
        let mut reader = io::Cursor::new("\n");
        assert_eq!(
            read_answer(&mut reader, Some("http://localhost:8000")).unwrap(),
            "http://localhost:8000"
        );
    }

    #[test]
    fn eof_is_error() {
        let mut reader = io::Cursor::new("");
        assert!(matches!(read_answer(&mut reader, None), Err(PromptError::Eof)));
    }
}
