//! Chain transfer execution.
//!
//! Submits a token or native transfer through the authorized wallet session.
//! A transfer either is submitted or it is not: failures are surfaced
//! uniformly, nothing here tracks on-chain confirmation, and nothing
//! retries — each failure is reported once and the attempt ends.

use crate::config::TokenContracts;
use crate::convert::RailAmount;
use crate::provider::{ProviderError, ProviderRegistry};
use crate::session::WalletSession;
use railpay_sdk::objects::rails::{NativeChain, PaymentRail};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, info};

/// Four-byte selector of `transfer(address,uint256)`.
const ERC20_TRANSFER_SELECTOR: &str = "a9059cbb";

/// Errors raised while submitting a transfer.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The session's provider is no longer available.
    #[error("wallet provider is no longer available")]
    ProviderUnavailable,

    /// The user declined the signing prompt.
    #[error("signing rejected")]
    Rejected,

    /// The amount is not representable as integer smallest units.
    #[error("amount is not representable on chain")]
    InvalidAmount,

    /// The recipient address is malformed for the target chain.
    #[error("invalid recipient address: {0}")]
    InvalidRecipient(String),

    /// The provider's transfer call failed (revert, balance, disconnect, …).
    #[error("transfer submission failed: {0}")]
    Submission(String),

    /// The rail has no on-chain execution path.
    #[error("rail has no on-chain transfer")]
    NotAChainRail,
}

/// Proof that a transfer was handed to the provider.
#[derive(Debug, Clone)]
pub struct TransferReceipt {
    pub rail: PaymentRail,
    pub recipient: String,
    pub amount: RailAmount,
    /// Transaction hash or signature, when the provider reports one.
    pub txn_hash: Option<String>,
    /// Unix timestamp of the submission.
    pub submitted_at: i64,
}

/// Submits transfers through injected wallet providers.
pub struct ChainTransferExecutor {
    registry: Arc<dyn ProviderRegistry>,
    tokens: TokenContracts,
}

impl ChainTransferExecutor {
    pub fn new(registry: Arc<dyn ProviderRegistry>, tokens: TokenContracts) -> Self {
        Self { registry, tokens }
    }

    /// Submit the transfer for `rail` through the session's provider.
    ///
    /// Token rails call the token contract's transfer entry point; native
    /// rails use the provider's transfer request with a `{to, value}`
    /// payload in the chain's smallest unit.
    pub async fn transfer(
        &self,
        session: &WalletSession,
        rail: &PaymentRail,
        recipient: &str,
        amount: &RailAmount,
    ) -> Result<TransferReceipt, TransferError> {
        let provider = self
            .registry
            .lookup(session.provider_kind)
            .ok_or(TransferError::ProviderUnavailable)?;

        let units = amount
            .smallest_units()
            .map_err(|_| TransferError::InvalidAmount)?;

        let (method, params) = match rail {
            PaymentRail::TokenTransfer { token } => {
                let data = encode_erc20_transfer(recipient, units)?;
                (
                    "eth_sendTransaction",
                    json!([{
                        "from": session.address,
                        "to": self.tokens.address(*token),
                        "data": data,
                    }]),
                )
            }
            PaymentRail::NativeTransfer {
                chain: NativeChain::Sol,
            } => {
                // Lamports are a u64 quantity on the wire.
                let lamports = u64::try_from(units).map_err(|_| TransferError::InvalidAmount)?;
                (
                    "transfer",
                    json!([{
                        "to": recipient,
                        "value": lamports,
                    }]),
                )
            }
            PaymentRail::GatewayRedirect => return Err(TransferError::NotAChainRail),
        };

        debug!(rail = %rail, method, recipient, amount = %amount, "submitting transfer");

        let response = provider.request(method, params).await.map_err(|e| match e {
            ProviderError::Rejected => TransferError::Rejected,
            ProviderError::Disconnected => TransferError::ProviderUnavailable,
            ProviderError::Request(message) => TransferError::Submission(message),
        })?;

        let txn_hash = extract_reference(&response);
        info!(rail = %rail, txn_hash = ?txn_hash, "transfer submitted");

        Ok(TransferReceipt {
            rail: *rail,
            recipient: recipient.to_string(),
            amount: amount.clone(),
            txn_hash,
            submitted_at: OffsetDateTime::now_utc().unix_timestamp(),
        })
    }
}

/// ABI-encode a `transfer(address,uint256)` call.
fn encode_erc20_transfer(recipient: &str, units: u128) -> Result<String, TransferError> {
    let hex_addr = recipient.strip_prefix("0x").unwrap_or(recipient);
    if hex_addr.len() != 40 || !hex_addr.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(TransferError::InvalidRecipient(recipient.to_string()));
    }
    Ok(format!(
        "0x{}{:0>64}{:064x}",
        ERC20_TRANSFER_SELECTOR,
        hex_addr.to_lowercase(),
        units
    ))
}

/// Pull a transaction hash or signature out of the provider response.
fn extract_reference(value: &serde_json::Value) -> Option<String> {
    if let Some(hash) = value.as_str() {
        return Some(hash.to_string());
    }
    value
        .get("signature")
        .and_then(|v| v.as_str())
        .map(str::to_string)
}
