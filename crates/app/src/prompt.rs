//! Terminal confirmation prompt.

use std::io::{self, BufRead, Write};

use async_trait::async_trait;
use salon_booking::prompt::ConfirmationPrompt;
use tokio::task;
use tracing::warn;

/// Asks on stderr and reads a `y/N` answer from stdin.
///
/// Anything other than `y` or `yes` (case-insensitive), including a read
/// failure or end of input, counts as "no".
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalPrompt;

#[async_trait]
impl ConfirmationPrompt for TerminalPrompt {
    async fn ask(&self, message: &str) -> bool {
        let message = message.to_string();

        match task::spawn_blocking(move || read_answer(&message)).await {
            Ok(Ok(answer)) => answer,
            Ok(Err(error)) => {
                warn!("failed to read confirmation: {error}");
                false
            }
            Err(error) => {
                warn!("confirmation prompt task failed: {error}");
                false
            }
        }
    }
}

fn read_answer(message: &str) -> io::Result<bool> {
    let mut stderr = io::stderr().lock();

    write!(stderr, "{message} [y/N] ")?;
    stderr.flush()?;

    let mut line = String::new();

    io::stdin().lock().read_line(&mut line)?;

    Ok(is_yes(&line))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
