use crate::models::{Role, Session};

/// GuardState
///
/// Route authorization guard, re-evaluated on every navigation. There is no terminal
/// state: a signed-in user becomes `Unauthenticated` the moment they log out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Session restoration has not finished yet.
    Loading,
    Authenticated(Role),
    Unauthenticated,
}

impl GuardState {
    pub fn evaluate(is_loading: bool, session: Option<&Session>) -> Self {
        match (is_loading, session) {
            (true, _) => GuardState::Loading,
            (false, Some(session)) => GuardState::Authenticated(session.role),
            (false, None) => GuardState::Unauthenticated,
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            GuardState::Authenticated(role) => Some(*role),
            _ => None,
        }
    }
}
