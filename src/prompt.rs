//! Interactive prompt layer.
//!
//! Discovery only ever asks the user two things: which side of a WSL host
//! the browser lives on, and which of several discovered profiles to use.
//! Both go through the [`Prompter`] capability so non-interactive runs and
//! tests can script the answers.

use crate::error::DiscoveryError;
use async_trait::async_trait;
use std::io::Write;
use std::sync::Mutex;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Presents an enumerated choice and returns the selected index.
#[async_trait]
pub trait Prompter: Send + Sync {
    /// Asks the user to pick one of `options`, returning its index.
    /// `default_index` is used when the user just presses enter (or when the
    /// implementation never asks at all).
    async fn select(
        &self,
        message: &str,
        options: &[String],
        default_index: usize,
    ) -> Result<usize, DiscoveryError>;
}

/// Prompter reading numeric choices from stdin.
///
/// With `assume_defaults` set (the `--yes` flag, or no terminal attached)
/// every question is answered with its default without printing a menu.
pub struct TerminalPrompter {
    pub assume_defaults: bool,
}

impl TerminalPrompter {
    pub fn new(assume_defaults: bool) -> Self {
        Self { assume_defaults }
    }
}

#[async_trait]
impl Prompter for TerminalPrompter {
    async fn select(
        &self,
        message: &str,
        options: &[String],
        default_index: usize,
    ) -> Result<usize, DiscoveryError> {
        if self.assume_defaults || options.len() <= 1 {
            return Ok(default_index.min(options.len().saturating_sub(1)));
        }

        println!();
        println!("{}:", message);
        for (i, option) in options.iter().enumerate() {
            let marker = if i == default_index { "*" } else { " " };
            println!("  {}{}. {}", marker, i + 1, option);
        }
        print!("Choice [1-{}] (default {}): ", options.len(), default_index + 1);
        std::io::stdout().flush().map_err(DiscoveryError::Prompt)?;

        let mut line = String::new();
        let mut reader = BufReader::new(tokio::io::stdin());
        reader
            .read_line(&mut line)
            .await
            .map_err(DiscoveryError::Prompt)?;

        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(default_index);
        }
        match trimmed.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => Ok(n - 1),
            _ => {
                println!("Invalid selection, using default.");
                Ok(default_index)
            }
        }
    }
}

/// Prompter answering from a pre-recorded script. Intended for tests and
/// falls back to the default when the script runs dry.
pub struct ScriptedPrompter {
    answers: Mutex<std::vec::IntoIter<usize>>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<usize>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter()),
        }
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn select(
        &self,
        _message: &str,
        options: &[String],
        default_index: usize,
    ) -> Result<usize, DiscoveryError> {
        let next = self.answers.lock().expect("prompter lock").next();
        let index = next.unwrap_or(default_index);
        Ok(index.min(options.len().saturating_sub(1)))
    }
}
