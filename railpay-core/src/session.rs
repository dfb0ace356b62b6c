//! Wallet session management.
//!
//! Tracks the single wallet authorization for the page session:
//! `Disconnected → Requesting → Connected`, falling back to `Disconnected`
//! on rejection or error. Connecting a provider that is already connected is
//! idempotent and never opens a second prompt. The session lives only in
//! memory; nothing here persists.

use crate::provider::{ProviderError, ProviderRegistry};
use railpay_sdk::objects::rails::{ChainFamily, ProviderKind};
use std::sync::Arc;
use thiserror::Error;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Errors raised while establishing a wallet session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The corresponding provider object is absent from the environment.
    /// Recoverable by installing the wallet; directing the user there is the
    /// shell's concern.
    #[error("{0} provider is not installed")]
    ProviderNotInstalled(ProviderKind),

    /// The user declined the authorization prompt.
    #[error("wallet authorization rejected")]
    AuthorizationRejected,

    /// The provider approved the request but returned no accounts.
    #[error("provider returned no accounts")]
    NoAccounts,

    /// The provider failed for another reason.
    #[error("wallet provider error: {0}")]
    Provider(String),
}

/// An authorized wallet session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletSession {
    pub provider_kind: ProviderKind,
    pub address: String,
    pub connected_at: OffsetDateTime,
}

impl WalletSession {
    /// The chain family this session can sign for.
    pub fn chain_family(&self) -> ChainFamily {
        self.provider_kind.family()
    }
}

/// Connection state for the page session.
#[derive(Debug, Clone)]
enum SessionState {
    Disconnected,
    Requesting,
    Connected(WalletSession),
}

/// Owns the wallet session for the lifetime of the page session.
pub struct WalletSessionManager {
    registry: Arc<dyn ProviderRegistry>,
    state: Mutex<SessionState>,
}

impl WalletSessionManager {
    pub fn new(registry: Arc<dyn ProviderRegistry>) -> Self {
        Self {
            registry,
            state: Mutex::new(SessionState::Disconnected),
        }
    }

    /// Connect the given provider, or return the existing session if that
    /// provider is already connected.
    ///
    /// The state lock is held across the authorization await, so concurrent
    /// connects serialize: the second caller observes `Connected` and gets
    /// the same session without a second prompt.
    pub async fn connect(&self, kind: ProviderKind) -> Result<WalletSession, SessionError> {
        let mut state = self.state.lock().await;

        if let SessionState::Connected(session) = &*state {
            if session.provider_kind == kind {
                debug!(provider = %kind, address = %session.address, "wallet already connected");
                return Ok(session.clone());
            }
            info!(
                previous = %session.provider_kind,
                requested = %kind,
                "switching wallet provider"
            );
        }

        let Some(provider) = self.registry.lookup(kind) else {
            warn!(provider = %kind, "wallet provider not installed");
            return Err(SessionError::ProviderNotInstalled(kind));
        };

        *state = SessionState::Requesting;

        match provider.request_accounts().await {
            Ok(accounts) => {
                let Some(address) = accounts.into_iter().next() else {
                    *state = SessionState::Disconnected;
                    return Err(SessionError::NoAccounts);
                };
                let session = WalletSession {
                    provider_kind: kind,
                    address,
                    connected_at: OffsetDateTime::now_utc(),
                };
                info!(provider = %kind, address = %session.address, "wallet connected");
                *state = SessionState::Connected(session.clone());
                Ok(session)
            }
            Err(ProviderError::Rejected) => {
                *state = SessionState::Disconnected;
                info!(provider = %kind, "wallet authorization rejected");
                Err(SessionError::AuthorizationRejected)
            }
            Err(e) => {
                *state = SessionState::Disconnected;
                warn!(provider = %kind, error = %e, "wallet authorization failed");
                Err(SessionError::Provider(e.to_string()))
            }
        }
    }

    /// The current session, if one is connected on the given chain family.
    pub async fn current_session(&self, family: ChainFamily) -> Option<WalletSession> {
        match &*self.state.lock().await {
            SessionState::Connected(session) if session.chain_family() == family => {
                Some(session.clone())
            }
            _ => None,
        }
    }

    /// Drop the current session, returning to `Disconnected`.
    pub async fn disconnect(&self) {
        let mut state = self.state.lock().await;
        if let SessionState::Connected(session) = &*state {
            info!(provider = %session.provider_kind, "wallet disconnected");
        }
        *state = SessionState::Disconnected;
    }
}
