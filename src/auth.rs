use std::time::Duration;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{Role, Session},
    session::SessionContext,
};

/// DemoAccount
///
/// One row of the fixed credential table. There is no account store: these are the
/// only identities `login` accepts.
#[derive(Debug, Clone, Copy)]
pub struct DemoAccount {
    pub id: Uuid,
    pub name: &'static str,
    pub email: &'static str,
    pub password: &'static str,
    pub role: Role,
    pub points: Option<u32>,
}

impl DemoAccount {
    fn to_session(self) -> Session {
        Session {
            id: self.id,
            name: self.name.to_string(),
            email: self.email.to_string(),
            role: self.role,
            points: self.points,
        }
    }
}

/// Password shared by both demo accounts.
pub const DEMO_PASSWORD: &str = "demo123";

pub const DEMO_ACCOUNTS: &[DemoAccount] = &[
    DemoAccount {
        id: Uuid::from_u128(0x0000_0001_0000_4000_8000_0000_0000_0001),
        name: "Demo Citizen",
        email: "citizen@demo.com",
        password: DEMO_PASSWORD,
        role: Role::Citizen,
        points: Some(250),
    },
    DemoAccount {
        id: Uuid::from_u128(0x0000_0002_0000_4000_8000_0000_0000_0002),
        name: "City Authority",
        email: "authority@demo.com",
        password: DEMO_PASSWORD,
        role: Role::Authority,
        points: None,
    },
];

/// AuthService
///
/// The only writer of the session. Each operation mirrors its result into local
/// storage through the `SessionContext`; a storage fault is logged and never turns a
/// successful operation into a failed one.
#[derive(Clone)]
pub struct AuthService {
    session: SessionContext,
    delay: Duration,
}

impl AuthService {
    pub fn new(session: SessionContext, delay: Duration) -> Self {
        Self { session, delay }
    }

    async fn simulate_network(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    /// login
    ///
    /// Email (case-insensitive), password and role must all match one demo account.
    /// A mismatch returns `false` and leaves the current session exactly as it was.
    pub async fn login(&self, email: &str, password: &str, role: Role) -> bool {
        self.login_session(email, password, role).await.is_some()
    }

    /// Same as `login`, but hands back the session it installed.
    pub async fn login_session(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Option<Session> {
        self.simulate_network().await;

        let email = email.trim();
        let Some(account) = DEMO_ACCOUNTS.iter().find(|account| {
            account.email.eq_ignore_ascii_case(email)
                && account.password == password
                && account.role == role
        }) else {
            tracing::info!(email = %email, role = %role, "login rejected");
            return None;
        };

        let session = account.to_session();
        self.install(&session).await;

        tracing::info!(user_id = %session.id, role = %role, "login succeeded");
        Some(session)
    }

    /// register
    ///
    /// Always succeeds with a fresh identity holding zero points. Emails are not
    /// checked against existing accounts.
    pub async fn register(&self, name: &str, email: &str, password: &str, role: Role) -> bool {
        self.register_session(name, email, password, role).await;
        true
    }

    /// Same as `register`, returning the new session.
    pub async fn register_session(
        &self,
        name: &str,
        email: &str,
        _password: &str,
        role: Role,
    ) -> Session {
        self.simulate_network().await;

        let session = Session {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            role,
            points: Some(0),
        };
        self.install(&session).await;

        tracing::info!(user_id = %session.id, role = %role, "registered new account");
        session
    }

    async fn install(&self, session: &Session) {
        if let Err(e) = self.session.establish(session).await {
            tracing::warn!(error = %e, "session established but not persisted");
        }
    }

    /// logout
    ///
    /// Clears the session in memory and in storage. Safe to call when signed out.
    pub async fn logout(&self) {
        if let Err(e) = self.session.clear().await {
            tracing::warn!(error = %e, "session cleared but persisted record not removed");
        }
        tracing::info!("logged out");
    }
}

/// AuthUser Extractor Result
///
/// The signed-in identity of the request, resolved from the `SessionContext`.
/// Action handlers take it as an argument; without a session the request is
/// rejected before the handler runs.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Session);

impl AuthUser {
    /// Narrows the extractor to one role. Role mismatches on actions are refused
    /// outright; only navigation redirects silently.
    pub fn require_role(self, role: Role) -> Result<Session, AppError> {
        if self.0.role != role {
            return Err(AppError::forbidden(&format!("{role} accounts only")));
        }
        Ok(self.0)
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    SessionContext: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = SessionContext::from_ref(state);
        session
            .current()
            .await
            .map(AuthUser)
            .ok_or(AppError::Unauthenticated)
    }
}
