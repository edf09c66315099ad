//! Login verification endpoint.

use tracing::info;

use crate::error::ClientResult;
use crate::types::{Credentials, VerifiedUser};
use crate::ApiClient;

/// Authentication endpoint group.
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        AuthApi { client }
    }

    /// `POST /api/verify-user`: checks credentials and returns the
    /// account's role. Status codes carry the failure reason
    /// (400 bad input, 401 wrong password, 404 unknown user); the login
    /// screen maps them to messages.
    pub async fn verify_user(&self, credentials: &Credentials) -> ClientResult<VerifiedUser> {
        let user: VerifiedUser = self
            .client
            .post_enveloped("/api/verify-user", credentials)
            .await?;
        info!(username = %credentials.username, role = ?user.role, "User verified");
        Ok(user)
    }
}
