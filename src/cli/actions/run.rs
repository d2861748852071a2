use crate::cli::actions::{shell, Action};
use anyhow::Result;

/// Execute the provided action.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Shell(args) => shell::execute(args).await,
    }
}
