//! Browser-injected wallet provider interface.
//!
//! The core consumes providers, it never implements them: a provider is a
//! capability object a wallet extension injects into the execution
//! environment. Discovery goes through [`ProviderRegistry`] (the well-known
//! globals); absence must be detected before use, never assumed.

use async_trait::async_trait;
use railpay_sdk::objects::rails::ProviderKind;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by a wallet provider call.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The user declined the request in the provider's own UI.
    #[error("user rejected the request")]
    Rejected,

    /// The provider went away mid-call (extension disabled, page detached).
    #[error("provider disconnected")]
    Disconnected,

    /// Any other provider-side failure (RPC error, revert, balance, …).
    #[error("provider request failed: {0}")]
    Request(String),
}

/// A browser-injected wallet provider.
///
/// `request_accounts` models the provider's authorization entry point
/// (`eth_requestAccounts` for EVM-style providers, `connect` for
/// Phantom-style providers, both reduced to "the authorized addresses").
/// It suspends until the user approves or rejects in the provider's UI.
#[async_trait]
pub trait InjectedProvider: Send + Sync {
    /// Which provider this is.
    fn kind(&self) -> ProviderKind;

    /// Request account authorization. Suspends pending user approval.
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError>;

    /// Generic request entry point for submitting transfers.
    async fn request(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, ProviderError>;
}

/// Discovery of injected providers.
///
/// The shell owns the implementation that checks the environment's
/// well-known globals; tests register mock providers directly.
pub trait ProviderRegistry: Send + Sync {
    /// Look up the injected provider of the given kind, if present.
    fn lookup(&self, kind: ProviderKind) -> Option<Arc<dyn InjectedProvider>>;
}

/// Registry over a fixed set of providers.
#[derive(Default)]
pub struct StaticProviderRegistry {
    providers: HashMap<ProviderKind, Arc<dyn InjectedProvider>>,
}

impl StaticProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider, replacing any previous one of the same kind.
    pub fn register(&mut self, provider: Arc<dyn InjectedProvider>) {
        self.providers.insert(provider.kind(), provider);
    }
}

impl ProviderRegistry for StaticProviderRegistry {
    fn lookup(&self, kind: ProviderKind) -> Option<Arc<dyn InjectedProvider>> {
        self.providers.get(&kind).cloned()
    }
}
