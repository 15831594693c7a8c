use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Admin password is required")]
    PasswordRequired,
    #[error("Admin password does not match")]
    AuthenticationFailed,
    #[error("Failed to talk to the terminal")]
    Terminal,
    #[error("Command execution failed: {details}")]
    ExecutionFailed { details: String },
}

#[derive(Debug, Clone)]
pub enum Command {
    /// Prompt for the password, then offer the export action.
    Interactive,
    Run {
        password: Option<String>,
        dry_run: bool,
    },
    Check {
        password: Option<String>,
    },
}

#[async_trait::async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, command: Command) -> error_stack::Result<String, CommandError>;
}
