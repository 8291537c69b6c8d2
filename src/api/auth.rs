use edudesk_auth::{Identity, SessionStore};
use edudesk_core::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::{ApiRequest, Transport};

const LOGIN_PATH: &str = "auth/login/";

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Some deployments wrap the identity under `user`.
#[derive(Deserialize)]
#[serde(untagged)]
enum LoginResponse {
    Wrapped { user: Identity },
    Bare(Identity),
}

impl LoginResponse {
    fn into_identity(self) -> Identity {
        match self {
            LoginResponse::Wrapped { user } => user,
            LoginResponse::Bare(identity) => identity,
        }
    }
}

pub struct AuthService;

impl AuthService {
    /// Log in and persist the returned identity. No token is issued.
    #[instrument(skip(transport, session, password))]
    pub async fn login(
        transport: &dyn Transport,
        session: &SessionStore,
        email: &str,
        password: &str,
    ) -> ClientResult<Identity> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ClientError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let body = serde_json::to_value(LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        })?;
        let response = transport.send(ApiRequest::post(LOGIN_PATH, body)).await?;
        let identity = serde_json::from_value::<LoginResponse>(response)
            .map_err(|e| ClientError::Decode(format!("unexpected login response: {e}")))?
            .into_identity();

        session.set_identity(&identity)?;
        info!(user_id = identity.id, role = %identity.role, "Logged in");
        Ok(identity)
    }

    pub fn logout(session: &SessionStore) -> ClientResult<()> {
        session.clear_identity()?;
        info!("Logged out");
        Ok(())
    }
}
