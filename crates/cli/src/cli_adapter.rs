use condition_export_core::adapters::config::secret::Secret;
use condition_export_core::domain::gate::{AccessGate, AdminSession, GateOutcome, GateState};
use condition_export_core::domain::outcome::{
    ExportOutcome, ACTION_LABEL, LOGIN_OK, PASSWORD_MISMATCH, PASSWORD_PROMPT,
};
use condition_export_core::ports::application_service::ApplicationService;
use condition_export_core::ports::command_handler::{Command, CommandError, CommandHandler};
use console::{style, Term};
use error_stack::{report, ResultExt};
use std::sync::Arc;
use tracing::{error, info, instrument};

const TITLE: &str = "🛠 コンディション管理（Supabase → スプレッドシート）";

pub struct CliAdapter {
    application_service: Arc<dyn ApplicationService>,
    admin_password: Secret,
    term: Term,
}

impl std::fmt::Debug for CliAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliAdapter")
            .field("application_service", &"<ApplicationService>")
            .finish()
    }
}

impl CliAdapter {
    pub fn new(
        application_service: Arc<dyn ApplicationService>,
        admin_password: Secret,
        term: Term,
    ) -> Self {
        Self {
            application_service,
            admin_password,
            term,
        }
    }

    #[instrument(skip(command))]
    pub async fn run(&self, command: Command) -> error_stack::Result<(), CommandError> {
        match self.handle(command).await {
            Ok(output) => {
                self.say(&output)?;
                info!("CLI execution completed successfully");
                Ok(())
            }
            Err(report) => {
                error!("Command failed: {:?}", report);
                Err(report)
            }
        }
    }

    fn say(&self, line: &str) -> error_stack::Result<(), CommandError> {
        if line.is_empty() {
            return Ok(());
        }
        self.term
            .write_line(line)
            .change_context(CommandError::Terminal)
    }

    /// Single evaluation of the gate for the non-interactive commands.
    fn unlock(&self, password: Option<&str>) -> error_stack::Result<AdminSession, CommandError> {
        let mut gate = AccessGate::new(self.admin_password.expose());
        match gate.evaluate(password.unwrap_or_default()) {
            GateOutcome::Unlocked(session) => Ok(session),
            GateOutcome::AwaitingInput => Err(report!(CommandError::PasswordRequired))
                .attach_printable("Pass --password or set CONDITION_EXPORT_PASSWORD"),
            GateOutcome::Mismatch => {
                Err(report!(CommandError::AuthenticationFailed)).attach_printable(PASSWORD_MISMATCH)
            }
        }
    }

    async fn interactive(&self) -> error_stack::Result<String, CommandError> {
        self.say(&style(TITLE).bold().to_string())?;

        let mut gate = AccessGate::new(self.admin_password.expose());
        self.say(&style(status_line(gate.state())).cyan().to_string())?;
        let session = loop {
            self.term
                .write_str("🔑 管理者パスワードを入力: ")
                .change_context(CommandError::Terminal)?;
            let input = self
                .term
                .read_secure_line()
                .change_context(CommandError::Terminal)?;

            match gate.evaluate(&input) {
                GateOutcome::AwaitingInput => {
                    self.say(&style(PASSWORD_PROMPT).cyan().to_string())?;
                }
                GateOutcome::Mismatch => {
                    self.say(&style(PASSWORD_MISMATCH).red().to_string())?;
                    self.say(&style(PASSWORD_PROMPT).cyan().to_string())?;
                }
                GateOutcome::Unlocked(session) => {
                    self.say(&style(LOGIN_OK).green().to_string())?;
                    break session;
                }
            }
        };

        self.say(&format!(
            "[{}]  Enter で実行 / q で終了",
            style(ACTION_LABEL).bold()
        ))?;
        let choice = self
            .term
            .read_line()
            .change_context(CommandError::Terminal)?;
        if choice.trim().eq_ignore_ascii_case("q") {
            return Ok(String::new());
        }

        let outcome = self
            .application_service
            .export_unexported(&session)
            .await
            .change_context(CommandError::ExecutionFailed {
                details: "export run failed".to_string(),
            })?;

        Ok(render_outcome(outcome))
    }
}

/// Greeting shown above the password field.
fn status_line(state: GateState) -> &'static str {
    match state {
        GateState::Locked => PASSWORD_PROMPT,
        GateState::Unlocked => LOGIN_OK,
    }
}

fn render_outcome(outcome: ExportOutcome) -> String {
    match outcome {
        ExportOutcome::NothingToExport => style(outcome).yellow().to_string(),
        ExportOutcome::Exported { .. } => style(outcome).green().to_string(),
    }
}

#[async_trait::async_trait]
impl CommandHandler for CliAdapter {
    #[instrument(skip(command))]
    async fn handle(&self, command: Command) -> error_stack::Result<String, CommandError> {
        match command {
            Command::Interactive => self.interactive().await,
            Command::Run { password, dry_run } => {
                let session = self.unlock(password.as_deref())?;

                if dry_run {
                    let preview = self
                        .application_service
                        .preview(&session)
                        .await
                        .change_context(CommandError::ExecutionFailed {
                            details: "preview failed".to_string(),
                        })?;
                    return Ok(preview.to_string());
                }

                let outcome = self
                    .application_service
                    .export_unexported(&session)
                    .await
                    .change_context(CommandError::ExecutionFailed {
                        details: "export run failed".to_string(),
                    })?;

                Ok(render_outcome(outcome))
            }
            Command::Check { password } => {
                let session = self.unlock(password.as_deref())?;

                self.application_service
                    .health_check(&session)
                    .await
                    .change_context(CommandError::ExecutionFailed {
                        details: "health check failed".to_string(),
                    })
            }
        }
    }
}
