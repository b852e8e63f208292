use async_trait::async_trait;
use hopn_core::auth::{AuthSession, SessionStorage, UserProfile};
use hopn_core::CoreResult;
use hopn_shared::Masked;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::StoreError;

const TOKEN_KEY: &str = "auth_token";
const USER_KEY: &str = "auth_user";

/// Key-value auth store: one file per key inside `dir`
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read_key(&self, key: &'static str) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(self.dir.join(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn remove_key(&self, key: &'static str) -> Result<(), StoreError> {
        match tokio::fs::remove_file(self.dir.join(key)).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    async fn save(&self, session: &AuthSession) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let user = serde_json::to_string(&session.user).map_err(|source| StoreError::Corrupt { key: USER_KEY, source })?;
        tokio::fs::write(self.dir.join(TOKEN_KEY), session.token.expose()).await?;
        tokio::fs::write(self.dir.join(USER_KEY), user).await?;
        Ok(())
    }

    async fn load(&self) -> Result<Option<AuthSession>, StoreError> {
        let (Some(token), Some(user)) = (self.read_key(TOKEN_KEY).await?, self.read_key(USER_KEY).await?) else {
            return Ok(None);
        };
        let user: UserProfile =
            serde_json::from_str(&user).map_err(|source| StoreError::Corrupt { key: USER_KEY, source })?;
        Ok(Some(AuthSession {
            token: Masked(token),
            user,
        }))
    }
}

#[async_trait]
impl SessionStorage for FileSessionStore {
    async fn save_auth(&self, session: &AuthSession) -> CoreResult<()> {
        self.save(session).await?;
        info!("Auth session saved for user {}", session.user.id);
        Ok(())
    }

    async fn load_auth(&self) -> CoreResult<Option<AuthSession>> {
        Ok(self.load().await?)
    }

    async fn clear_auth(&self) -> CoreResult<()> {
        self.remove_key(TOKEN_KEY).await?;
        self.remove_key(USER_KEY).await?;
        info!("Auth session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> FileSessionStore {
        FileSessionStore::new(std::env::temp_dir().join(format!("hopn-session-{}", uuid::Uuid::new_v4())))
    }

    fn session() -> AuthSession {
        serde_json::from_value(serde_json::json!({
            "token": "secret-token",
            "user": {
                "id": "u1",
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com",
                "phone": "+1 555 0100"
            }
        }))
        .expect("valid session")
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let store = temp_store();
        assert!(store.load_auth().await.unwrap().is_none());

        store.save_auth(&session()).await.unwrap();
        let loaded = store.load_auth().await.unwrap().unwrap();
        assert_eq!(loaded, session());
        assert_eq!(loaded.user.extra["phone"], "+1 555 0100");

        store.clear_auth().await.unwrap();
        assert!(store.load_auth().await.unwrap().is_none());
        // Clearing twice is fine
        store.clear_auth().await.unwrap();

        let _ = tokio::fs::remove_dir_all(store.dir()).await;
    }

    #[tokio::test]
    async fn test_missing_key_loads_nothing() {
        let store = temp_store();
        store.save_auth(&session()).await.unwrap();
        tokio::fs::remove_file(store.dir().join(USER_KEY)).await.unwrap();
        assert!(store.load_auth().await.unwrap().is_none());

        let _ = tokio::fs::remove_dir_all(store.dir()).await;
    }

    #[tokio::test]
    async fn test_corrupt_user_is_an_error() {
        let store = temp_store();
        store.save_auth(&session()).await.unwrap();
        tokio::fs::write(store.dir().join(USER_KEY), "not json").await.unwrap();
        assert!(store.load_auth().await.is_err());

        let _ = tokio::fs::remove_dir_all(store.dir()).await;
    }
}
