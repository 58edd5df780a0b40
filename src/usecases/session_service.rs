//! Authentication state holder. Explicitly constructed in main and injected
//! into the UI; no ambient global.
//!
//! Lifecycle: restored from the persisted token on start, replaced wholesale
//! on login/logout. A token judged invalid simply fails validation; there is
//! no automatic refresh.

use crate::domain::{DomainError, User};
use crate::ports::{AuthPort, TokenStorePort};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Session lifecycle. `Failed` routes as unauthenticated.
#[derive(Debug, Clone)]
pub enum SessionState {
    Unauthenticated,
    Loading,
    Authenticated(User),
    Failed(String),
}

pub struct SessionService {
    auth: Arc<dyn AuthPort>,
    tokens: Arc<dyn TokenStorePort>,
    state: RwLock<SessionState>,
}

impl SessionService {
    pub fn new(auth: Arc<dyn AuthPort>, tokens: Arc<dyn TokenStorePort>) -> Self {
        Self {
            auth,
            tokens,
            state: RwLock::new(SessionState::Unauthenticated),
        }
    }

    /// Restore the session from the persisted token, validating it against
    /// the identity endpoint. Does not invoke the sign-in flow. Returns the
    /// resulting state; validation failure is recorded, not propagated.
    pub async fn restore(&self) -> SessionState {
        let token = match self.tokens.load().await {
            Ok(Some(token)) => token,
            Ok(None) => {
                *self.state.write().await = SessionState::Unauthenticated;
                return self.current().await;
            }
            Err(e) => {
                warn!(error = %e, "token store unreadable, starting unauthenticated");
                *self.state.write().await = SessionState::Unauthenticated;
                return self.current().await;
            }
        };

        *self.state.write().await = SessionState::Loading;
        match self.auth.validate(&token).await {
            Ok(user) => {
                info!(email = %user.email, "session restored from persisted token");
                *self.state.write().await = SessionState::Authenticated(user);
            }
            Err(e) => {
                warn!(error = %e, "persisted token rejected");
                *self.state.write().await = SessionState::Failed(e.to_string());
            }
        }
        self.current().await
    }

    /// Run the OAuth sign-in flow. On success the token is persisted and the
    /// session becomes authenticated.
    pub async fn login(&self) -> Result<User, DomainError> {
        *self.state.write().await = SessionState::Loading;
        match self.auth.sign_in().await {
            Ok(user) => {
                if let Err(e) = self.tokens.save(&user.access_token).await {
                    *self.state.write().await = SessionState::Failed(e.to_string());
                    return Err(e);
                }
                info!(email = %user.email, "signed in");
                *self.state.write().await = SessionState::Authenticated(user.clone());
                Ok(user)
            }
            Err(e) => {
                *self.state.write().await = SessionState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Revoke the token remotely (best-effort), clear persisted storage, and
    /// return to unauthenticated. A revoke failure never leaves the user
    /// stuck in a signed-in session.
    pub async fn logout(&self) -> Result<(), DomainError> {
        let token = match &*self.state.read().await {
            SessionState::Authenticated(user) => Some(user.access_token.clone()),
            _ => None,
        };
        *self.state.write().await = SessionState::Loading;

        if let Some(token) = token {
            if let Err(e) = self.auth.revoke(&token).await {
                warn!(error = %e, "remote revoke failed, clearing local session anyway");
            }
        }
        self.tokens.clear().await?;
        *self.state.write().await = SessionState::Unauthenticated;
        info!("signed out");
        Ok(())
    }

    pub async fn current(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        matches!(&*self.state.read().await, SessionState::Authenticated(_))
    }

    pub async fn user(&self) -> Option<User> {
        match &*self.state.read().await {
            SessionState::Authenticated(user) => Some(user.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    fn user(token: &str) -> User {
        User {
            id: "1045".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            picture: None,
            access_token: token.into(),
        }
    }

    struct StubAuth {
        valid_token: Option<String>,
        sign_in_calls: AtomicUsize,
        revoke_calls: AtomicUsize,
        revoke_fails: bool,
    }

    impl StubAuth {
        fn accepting(token: &str) -> Self {
            Self {
                valid_token: Some(token.into()),
                sign_in_calls: AtomicUsize::new(0),
                revoke_calls: AtomicUsize::new(0),
                revoke_fails: false,
            }
        }
    }

    #[async_trait::async_trait]
    impl AuthPort for StubAuth {
        async fn sign_in(&self) -> Result<User, DomainError> {
            self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
            match &self.valid_token {
                Some(token) => Ok(user(token)),
                None => Err(DomainError::Auth("access denied".into())),
            }
        }

        async fn validate(&self, token: &str) -> Result<User, DomainError> {
            match &self.valid_token {
                Some(valid) if valid == token => Ok(user(token)),
                _ => Err(DomainError::Auth("token validation failed".into())),
            }
        }

        async fn revoke(&self, _token: &str) -> Result<(), DomainError> {
            self.revoke_calls.fetch_add(1, Ordering::SeqCst);
            if self.revoke_fails {
                Err(DomainError::Auth("revoke endpoint unreachable".into()))
            } else {
                Ok(())
            }
        }
    }

    #[derive(Default)]
    struct MemTokenStore {
        token: Mutex<Option<String>>,
    }

    #[async_trait::async_trait]
    impl TokenStorePort for MemTokenStore {
        async fn load(&self) -> Result<Option<String>, DomainError> {
            Ok(self.token.lock().await.clone())
        }

        async fn save(&self, token: &str) -> Result<(), DomainError> {
            *self.token.lock().await = Some(token.to_string());
            Ok(())
        }

        async fn clear(&self) -> Result<(), DomainError> {
            *self.token.lock().await = None;
            Ok(())
        }
    }

    #[tokio::test]
    async fn login_authenticates_and_persists_token() {
        let auth = Arc::new(StubAuth::accepting("tok-1"));
        let tokens = Arc::new(MemTokenStore::default());
        let session = SessionService::new(auth.clone(), tokens.clone());

        let user = session.login().await.unwrap();
        assert_eq!(user.access_token, "tok-1");
        assert!(session.is_authenticated().await);
        assert_eq!(tokens.load().await.unwrap().as_deref(), Some("tok-1"));
    }

    #[tokio::test]
    async fn restore_reuses_persisted_token_without_sign_in() {
        let auth = Arc::new(StubAuth::accepting("tok-1"));
        let tokens = Arc::new(MemTokenStore::default());
        tokens.save("tok-1").await.unwrap();

        let session = SessionService::new(auth.clone(), tokens);
        let state = session.restore().await;
        assert!(matches!(state, SessionState::Authenticated(_)));
        assert_eq!(auth.sign_in_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn restore_without_token_stays_unauthenticated() {
        let session = SessionService::new(
            Arc::new(StubAuth::accepting("tok-1")),
            Arc::new(MemTokenStore::default()),
        );
        let state = session.restore().await;
        assert!(matches!(state, SessionState::Unauthenticated));
        assert!(!session.is_authenticated().await);
    }

    #[tokio::test]
    async fn restore_with_rejected_token_routes_as_unauthenticated() {
        let tokens = Arc::new(MemTokenStore::default());
        tokens.save("stale").await.unwrap();
        let session = SessionService::new(Arc::new(StubAuth::accepting("tok-1")), tokens);

        let state = session.restore().await;
        assert!(matches!(state, SessionState::Failed(_)));
        assert!(!session.is_authenticated().await);
    }

    #[tokio::test]
    async fn logout_revokes_clears_and_returns_unauthenticated() {
        let auth = Arc::new(StubAuth::accepting("tok-1"));
        let tokens = Arc::new(MemTokenStore::default());
        let session = SessionService::new(auth.clone(), tokens.clone());

        session.login().await.unwrap();
        session.logout().await.unwrap();

        assert!(!session.is_authenticated().await);
        assert_eq!(auth.revoke_calls.load(Ordering::SeqCst), 1);
        assert_eq!(tokens.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn logout_clears_locally_even_when_revoke_fails() {
        let auth = Arc::new(StubAuth {
            valid_token: Some("tok-1".into()),
            sign_in_calls: AtomicUsize::new(0),
            revoke_calls: AtomicUsize::new(0),
            revoke_fails: true,
        });
        let tokens = Arc::new(MemTokenStore::default());
        let session = SessionService::new(auth, tokens.clone());

        session.login().await.unwrap();
        session.logout().await.unwrap();
        assert!(!session.is_authenticated().await);
        assert_eq!(tokens.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn failed_sign_in_records_error_state() {
        let auth = Arc::new(StubAuth {
            valid_token: None,
            sign_in_calls: AtomicUsize::new(0),
            revoke_calls: AtomicUsize::new(0),
            revoke_fails: false,
        });
        let session = SessionService::new(auth, Arc::new(MemTokenStore::default()));

        assert!(session.login().await.is_err());
        assert!(matches!(session.current().await, SessionState::Failed(_)));
        assert!(!session.is_authenticated().await);
    }
}
