//! TOML file configuration structures.
//!
//! These structs directly map to the `railpay.toml` file format.

use serde::{Deserialize, Serialize};

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub gateway: GatewaySection,
    pub recipients: RecipientsSection,
    pub tokens: TokensSection,
    pub rates: RatesSection,
}

/// Hosted-gateway section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewaySection {
    /// Root URL of the application backend that prepares gateway orders.
    pub api_base: String,
    /// Root URL of the hosted gateway that receives the redirect form.
    #[serde(default = "default_hosted_base")]
    pub hosted_base: String,
}

fn default_hosted_base() -> String {
    "https://securegw-stage.paytm.in".to_string()
}

/// Destination addresses for on-chain payments.
///
/// These are deployment data, never embedded in business logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipientsSection {
    /// Receiving address on the EVM chain.
    pub evm: String,
    /// Receiving address on Solana.
    pub sol: String,
}

/// ERC-20 contract addresses on the EVM chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokensSection {
    pub usdc: String,
    pub dai: String,
}

/// Conversion rates supplied by the deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatesSection {
    /// Units of the site's base fiat currency per one whole SOL, as a
    /// decimal string. Expected to be wired to a price feed; there is no
    /// meaningful built-in default.
    pub fiat_per_sol: String,
}
