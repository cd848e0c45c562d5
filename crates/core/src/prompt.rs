//! Yes/no confirmation capability used by the salon-switch path.

use async_trait::async_trait;
use mockall::automock;

/// Asks the user a yes/no question.
#[automock]
#[async_trait]
pub trait ConfirmationPrompt: Send + Sync {
    /// Present `message` and resolve to the user's answer.
    async fn ask(&self, message: &str) -> bool;
}

/// A prompt that always gives the same answer without asking anyone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedAnswer(pub bool);

#[async_trait]
impl ConfirmationPrompt for FixedAnswer {
    async fn ask(&self, _message: &str) -> bool {
        self.0
    }
}
