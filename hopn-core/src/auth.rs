use async_trait::async_trait;
use hopn_shared::Masked;
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// The signed-in rider as returned by the login endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Masked<String>,
    /// Anything else the backend sends along is kept verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserProfile {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Token and user pair; the only state that survives an app restart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthSession {
    pub token: Masked<String>,
    pub user: UserProfile,
}

/// Device-local persistence of the auth session
#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn save_auth(&self, session: &AuthSession) -> CoreResult<()>;

    async fn load_auth(&self) -> CoreResult<Option<AuthSession>>;

    async fn clear_auth(&self) -> CoreResult<()>;
}

#[async_trait]
pub trait BiometricAuthenticator: Send + Sync {
    async fn is_available(&self) -> bool;

    /// Show the platform prompt; `Ok(false)` means the rider declined
    async fn authenticate(&self, prompt: &str) -> CoreResult<bool>;
}

/// Restore a saved session behind a biometric prompt.
///
/// Returns `None` when nothing is saved. When biometrics are unavailable the
/// saved session is returned as is; a declined prompt is an `AuthError`.
pub async fn unlock_saved_session(
    storage: &dyn SessionStorage,
    biometrics: &dyn BiometricAuthenticator,
) -> CoreResult<Option<AuthSession>> {
    let Some(session) = storage.load_auth().await? else {
        return Ok(None);
    };

    if !biometrics.is_available().await {
        tracing::info!("Biometrics unavailable, restoring session for user {}", session.user.id);
        return Ok(Some(session));
    }

    let prompt = format!("Sign in as {}", session.user.display_name());
    if biometrics.authenticate(&prompt).await? {
        tracing::info!("Biometric unlock succeeded for user {}", session.user.id);
        Ok(Some(session))
    } else {
        tracing::warn!("Biometric unlock declined for user {}", session.user.id);
        Err(CoreError::AuthError("biometric prompt declined".to_string()))
    }
}

/// Scripted biometric sensor
pub struct MockBiometrics {
    pub available: bool,
    pub accept: bool,
}

#[async_trait]
impl BiometricAuthenticator for MockBiometrics {
    async fn is_available(&self) -> bool {
        self.available
    }

    async fn authenticate(&self, _prompt: &str) -> CoreResult<bool> {
        Ok(self.accept)
    }
}
