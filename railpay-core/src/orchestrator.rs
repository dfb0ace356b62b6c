//! Payment orchestration.
//!
//! Top-level controller for a checkout submission: owns the single
//! in-flight submission guard, branches on the selected rail, sequences the
//! delegate calls and maps every terminal outcome to at most one
//! user-visible notice.
//!
//! Everything is cooperative. The guard is set synchronously before the
//! first suspension point and cleared on every resumption path, so a double
//! submit while a wallet prompt or gateway call is pending is a no-op. There
//! is no cancellation: an in-flight attempt runs to completion or external
//! rejection.

use crate::config::CheckoutConfig;
use crate::convert;
use crate::notify::{NoticeKind, Notifier};
use crate::session::{SessionError, WalletSessionManager};
use crate::transfer::{ChainTransferExecutor, TransferError, TransferReceipt};
use async_trait::async_trait;
use railpay_sdk::client::{ClientError, GatewayClient};
use railpay_sdk::objects::cart::CartSnapshot;
use railpay_sdk::objects::gateway::{GatewayOrderResponse, OrderRequest, RedirectForm, UserContact};
use railpay_sdk::objects::rails::{PaymentRail, ProviderKind};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Notice shown when a payment attempt succeeds.
pub const SUCCESS_NOTICE: &str = "Payment successful!";
/// Notice shown when a crypto payment attempt fails, whatever the cause.
pub const FAILURE_NOTICE: &str = "Payment failed. Please try again.";

/// Terminal failure of a payment attempt.
///
/// Every variant ends the attempt with the guard reset; none is retried
/// automatically and none poisons the orchestrator.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The wallet provider required by the rail is not installed.
    #[error("{0} provider is not installed")]
    ProviderNotInstalled(ProviderKind),

    /// The user declined wallet authorization or transaction signing.
    #[error("wallet authorization rejected")]
    AuthorizationRejected,

    /// The gateway backend call failed or returned a non-success status.
    #[error("gateway error: {0}")]
    NetworkOrGateway(String),

    /// The wallet's transfer call failed. Provider-internal detail is logged
    /// but never surfaced to the buyer.
    #[error("transfer submission failed")]
    TransferSubmissionFailed,
}

/// Result of a submit call.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Another attempt is already in flight; nothing was done.
    AlreadyInFlight,
    /// The buyer was handed off to the hosted gateway.
    Redirected(RedirectForm),
    /// An on-chain transfer was submitted.
    TransferSubmitted(TransferReceipt),
    /// The attempt failed; the guard is reset and a manual retry is allowed.
    Failed(PaymentError),
}

/// The gateway flow as consumed by the orchestrator.
#[async_trait]
pub trait GatewayApi: Send + Sync {
    /// Obtain redirect parameters for a new gateway order.
    async fn create_order(
        &self,
        request: &OrderRequest,
    ) -> Result<GatewayOrderResponse, ClientError>;

    /// Build the redirect form from the backend's parameters.
    fn redirect_form(&self, response: &GatewayOrderResponse) -> Result<RedirectForm, ClientError>;
}

#[async_trait]
impl GatewayApi for GatewayClient {
    async fn create_order(
        &self,
        request: &OrderRequest,
    ) -> Result<GatewayOrderResponse, ClientError> {
        GatewayClient::create_order(self, request).await
    }

    fn redirect_form(&self, response: &GatewayOrderResponse) -> Result<RedirectForm, ClientError> {
        GatewayClient::redirect_form(self, response)
    }
}

/// Browser navigation sink for the gateway hand-off.
///
/// Navigating is terminal for the page; the shell owns the implementation.
pub trait RedirectSink: Send + Sync {
    fn navigate(&self, form: &RedirectForm);
}

/// Top-level payment controller.
pub struct PaymentOrchestrator {
    config: Arc<CheckoutConfig>,
    gateway: Arc<dyn GatewayApi>,
    redirect: Arc<dyn RedirectSink>,
    sessions: Arc<WalletSessionManager>,
    executor: ChainTransferExecutor,
    notifier: Arc<dyn Notifier>,
    in_flight: AtomicBool,
}

impl PaymentOrchestrator {
    pub fn new(
        config: Arc<CheckoutConfig>,
        gateway: Arc<dyn GatewayApi>,
        redirect: Arc<dyn RedirectSink>,
        sessions: Arc<WalletSessionManager>,
        executor: ChainTransferExecutor,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            gateway,
            redirect,
            sessions,
            executor,
            notifier,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a payment attempt is currently in flight.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Run one payment attempt for the selected rail.
    ///
    /// No-op while another attempt is in flight. Exactly one delegate is
    /// called; the attempt ends with the guard reset and at most one notice
    /// (the gateway hand-off navigates away instead of notifying).
    pub async fn submit(
        &self,
        rail: PaymentRail,
        cart: &CartSnapshot,
        contact: &UserContact,
    ) -> SubmitOutcome {
        // Guard set must precede the first suspension point.
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!(rail = %rail, "submission already in flight, ignoring");
            return SubmitOutcome::AlreadyInFlight;
        }

        let attempt_id = Uuid::new_v4();
        let total_price = cart.total_price();
        info!(
            attempt_id = %attempt_id,
            rail = %rail,
            total = %total_price,
            "payment attempt started"
        );

        let result = match rail {
            PaymentRail::GatewayRedirect => {
                self.run_gateway(attempt_id, total_price, contact).await
            }
            PaymentRail::TokenTransfer { .. } => {
                self.run_chain(attempt_id, rail, ProviderKind::MetaMask, total_price)
                    .await
            }
            PaymentRail::NativeTransfer { .. } => {
                self.run_chain(attempt_id, rail, ProviderKind::Phantom, total_price)
                    .await
            }
        };

        // Terminal for this attempt, success or failure: the guard resets
        // before anything else observes the outcome.
        self.in_flight.store(false, Ordering::SeqCst);

        match result {
            Ok(outcome) => {
                if matches!(outcome, SubmitOutcome::TransferSubmitted(_)) {
                    info!(attempt_id = %attempt_id, "payment attempt succeeded");
                    self.notifier.notify(SUCCESS_NOTICE, NoticeKind::Success);
                }
                outcome
            }
            Err(e) => {
                error!(attempt_id = %attempt_id, error = %e, "payment attempt failed");
                match &e {
                    PaymentError::NetworkOrGateway(message) => {
                        self.notifier.notify(message, NoticeKind::Error);
                    }
                    _ => self.notifier.notify(FAILURE_NOTICE, NoticeKind::Error),
                }
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// Gateway rail: ask the backend for redirect parameters, then hand the
    /// buyer to the hosted gateway.
    async fn run_gateway(
        &self,
        attempt_id: Uuid,
        total_price: Decimal,
        contact: &UserContact,
    ) -> Result<SubmitOutcome, PaymentError> {
        let amount = convert::rail_amount(
            total_price,
            &PaymentRail::GatewayRedirect,
            &self.config.rates,
        )
        .map_err(|e| PaymentError::NetworkOrGateway(e.to_string()))?;
        let amount = amount
            .value
            .to_i64()
            .ok_or_else(|| PaymentError::NetworkOrGateway("amount out of range".to_string()))?;

        let request = OrderRequest {
            amount,
            email: contact.email.clone(),
            phone_no: contact.phone_no.clone(),
        };
        debug!(attempt_id = %attempt_id, amount, "requesting gateway redirect parameters");

        let response = self
            .gateway
            .create_order(&request)
            .await
            .map_err(|e| PaymentError::NetworkOrGateway(e.to_string()))?;
        let form = self
            .gateway
            .redirect_form(&response)
            .map_err(|e| PaymentError::NetworkOrGateway(e.to_string()))?;

        info!(attempt_id = %attempt_id, action = %form.action, "handing off to hosted gateway");
        self.redirect.navigate(&form);
        Ok(SubmitOutcome::Redirected(form))
    }

    /// Crypto rails: convert the amount, require a matching wallet session,
    /// then submit the transfer.
    async fn run_chain(
        &self,
        attempt_id: Uuid,
        rail: PaymentRail,
        kind: ProviderKind,
        total_price: Decimal,
    ) -> Result<SubmitOutcome, PaymentError> {
        let amount = convert::rail_amount(total_price, &rail, &self.config.rates).map_err(|e| {
            error!(attempt_id = %attempt_id, error = %e, "amount conversion failed");
            PaymentError::TransferSubmissionFailed
        })?;
        debug!(attempt_id = %attempt_id, amount = %amount, "converted transfer amount");

        let session = match self.sessions.current_session(kind.family()).await {
            Some(session) => session,
            None => self.sessions.connect(kind).await.map_err(|e| match e {
                SessionError::ProviderNotInstalled(kind) => {
                    PaymentError::ProviderNotInstalled(kind)
                }
                SessionError::AuthorizationRejected
                | SessionError::NoAccounts
                | SessionError::Provider(_) => PaymentError::AuthorizationRejected,
            })?,
        };

        let recipient = self.config.recipients.for_family(kind.family());
        let receipt = self
            .executor
            .transfer(&session, &rail, recipient, &amount)
            .await
            .map_err(|e| {
                warn!(attempt_id = %attempt_id, error = %e, "transfer failed");
                match e {
                    TransferError::Rejected => PaymentError::AuthorizationRejected,
                    _ => PaymentError::TransferSubmissionFailed,
                }
            })?;

        Ok(SubmitOutcome::TransferSubmitted(receipt))
    }
}
