use std::fmt;

/// Proof that the administrator password was entered. Only [`AccessGate::evaluate`] can build
/// one, so every operation that takes `&AdminSession` is unreachable while the gate is locked.
#[derive(Debug)]
pub struct AdminSession {
    _private: (),
}

impl AdminSession {
    fn new() -> Self {
        AdminSession { _private: () }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Locked,
    Unlocked,
}

#[derive(Debug)]
pub enum GateOutcome {
    /// Nothing typed yet.
    AwaitingInput,
    Mismatch,
    Unlocked(AdminSession),
}

pub struct AccessGate {
    password: Box<str>,
    state: GateState,
}

impl fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessGate")
            .field("state", &self.state)
            .finish()
    }
}

impl AccessGate {
    pub fn new(password: impl Into<Box<str>>) -> Self {
        AccessGate {
            password: password.into(),
            state: GateState::Locked,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Plain equality against the configured password. `Unlocked` is terminal: once the gate
    /// opened, later evaluations keep handing out sessions.
    pub fn evaluate(&mut self, input: &str) -> GateOutcome {
        if self.state == GateState::Unlocked {
            return GateOutcome::Unlocked(AdminSession::new());
        }

        if input.is_empty() {
            return GateOutcome::AwaitingInput;
        }

        if input == &*self.password {
            tracing::info!("🔓 Admin gate unlocked");
            self.state = GateState::Unlocked;
            GateOutcome::Unlocked(AdminSession::new())
        } else {
            tracing::warn!("🔒 Admin password mismatch");
            GateOutcome::Mismatch
        }
    }
}
