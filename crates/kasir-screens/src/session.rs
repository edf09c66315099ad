//! # Session & Login
//!
//! An explicit auth context replaces the cookie-plus-middleware routing
//! of the original dashboard: the shell holds one [`AuthContext`],
//! the view guard reads `current_role` / `is_authenticated` from it,
//! and nothing else ever inspects credentials.

use tracing::{debug, info};

use kasir_client::types::Credentials;
use kasir_client::ApiClient;
use kasir_core::types::Role;

use crate::error::{ScreenError, ScreenResult};
use crate::view::View;

// =============================================================================
// Session
// =============================================================================

/// An authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub role: Role,
}

/// Authentication state injected into the UI shell.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    session: Option<Session>,
}

impl AuthContext {
    /// A context with nobody logged in.
    pub fn anonymous() -> Self {
        AuthContext { session: None }
    }

    /// A context restored from an existing session (shell restart).
    pub fn from_session(session: Session) -> Self {
        AuthContext {
            session: Some(session),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn current_role(&self) -> Option<Role> {
        self.session.as_ref().map(|s| s.role)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Verifies credentials against the backend and, on success, stores
    /// the session and returns the landing view for the role.
    pub async fn login(
        &mut self,
        client: &ApiClient,
        username: &str,
        password: &str,
    ) -> ScreenResult<View> {
        debug!(username = %username, "login attempt");

        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let verified = client.auth().verify_user(&credentials).await?;

        let session = Session {
            username: username.to_string(),
            role: verified.role,
        };
        info!(username = %username, role = ?verified.role, "login succeeded");
        let landing = View::landing_for(verified.role);
        self.session = Some(session);
        Ok(landing)
    }

    /// Drops the session; every subsequent view resolution redirects to
    /// the login screen.
    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            info!(username = %session.username, "logged out");
        }
    }
}

/// Maps a login failure to the message the login card shows. Status
/// codes carry the backend's reason; everything else gets the generic
/// text.
pub fn login_error_message(err: &ScreenError) -> &'static str {
    match err.status() {
        Some(400) => "Invalid input. Please check your details.",
        Some(401) => "Invalid username or password",
        Some(404) => "User not found",
        _ => "An error occurred. Please try again later.",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kasir_client::ClientError;

    fn status_error(status: u16) -> ScreenError {
        ScreenError::Api(ClientError::UnexpectedStatus {
            endpoint: "/api/verify-user".to_string(),
            status,
        })
    }

    #[test]
    fn test_anonymous_context() {
        let ctx = AuthContext::anonymous();
        assert!(!ctx.is_authenticated());
        assert!(ctx.current_role().is_none());
    }

    #[test]
    fn test_logout_clears_session() {
        let mut ctx = AuthContext {
            session: Some(Session {
                username: "budi".to_string(),
                role: Role::User,
            }),
        };
        assert!(ctx.is_authenticated());
        ctx.logout();
        assert!(!ctx.is_authenticated());
    }

    #[test]
    fn test_login_error_messages() {
        assert_eq!(
            login_error_message(&status_error(400)),
            "Invalid input. Please check your details."
        );
        assert_eq!(
            login_error_message(&status_error(401)),
            "Invalid username or password"
        );
        assert_eq!(login_error_message(&status_error(404)), "User not found");
        assert_eq!(
            login_error_message(&status_error(500)),
            "An error occurred. Please try again later."
        );
        assert_eq!(
            login_error_message(&ScreenError::SubmissionInFlight),
            "An error occurred. Please try again later."
        );
    }
}
