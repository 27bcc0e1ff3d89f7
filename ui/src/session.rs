use dioxus::prelude::*;
use types::{Leader, Session, SessionState};

/// The signed-in leader, shared through context.
#[derive(Clone, Copy)]
pub struct SessionContext(Signal<SessionState>);

impl SessionContext {
    pub fn state(&self) -> SessionState {
        self.0.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.read().is_authenticated()
    }

    pub fn leader(&self) -> Option<Leader> {
        self.0.read().session().map(|s| s.leader.clone())
    }

    pub fn sign_in(&mut self, session: Session) {
        self.0.set(SessionState::Authenticated(session));
    }

    /// Forget the persisted session and go anonymous.
    pub fn sign_out(&mut self) {
        self.0.set(api::logout());
    }
}

/// Restore the persisted session once and share it with every descendant.
pub fn provide_session() -> SessionContext {
    use_context_provider(|| SessionContext(Signal::new(api::restore_session())))
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
}
