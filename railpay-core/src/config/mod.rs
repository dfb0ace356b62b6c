//! Runtime configuration for the checkout core.
//!
//! The TOML-mapped structures live in [`file`]; this module validates them
//! into the typed configuration the orchestrator consumes. Recipient and
//! contract addresses, gateway URLs and conversion rates are deployment
//! data, so they all enter through here.

pub mod file;

pub use file::FileConfig;

use railpay_sdk::objects::rails::{ChainFamily, TokenKind};
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

/// Errors raised while validating a [`FileConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A URL field could not be parsed.
    #[error("invalid url for {field}: {source}")]
    InvalidUrl {
        field: &'static str,
        #[source]
        source: url::ParseError,
    },

    /// An address field is malformed.
    #[error("invalid {field} address: {value}")]
    InvalidAddress { field: &'static str, value: String },

    /// The fiat→SOL rate could not be parsed as a decimal.
    #[error("invalid fiat_per_sol rate: {0}")]
    InvalidRate(String),

    /// The fiat→SOL rate is zero or negative.
    #[error("fiat_per_sol rate must be positive")]
    NonPositiveRate,
}

/// Hosted-gateway endpoints.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Root URL of the application backend.
    pub api_base: Url,
    /// Root URL of the hosted gateway.
    pub hosted_base: Url,
}

/// Destination addresses for on-chain payments.
#[derive(Debug, Clone)]
pub struct RecipientConfig {
    pub evm: String,
    pub sol: String,
}

impl RecipientConfig {
    /// The receiving address on the given chain family.
    pub fn for_family(&self, family: ChainFamily) -> &str {
        match family {
            ChainFamily::Evm => &self.evm,
            ChainFamily::Solana => &self.sol,
        }
    }
}

/// ERC-20 contract addresses by token.
#[derive(Debug, Clone)]
pub struct TokenContracts {
    pub usdc: String,
    pub dai: String,
}

impl TokenContracts {
    /// The contract address for the given token.
    pub fn address(&self, token: TokenKind) -> &str {
        match token {
            TokenKind::Usdc => &self.usdc,
            TokenKind::Dai => &self.dai,
        }
    }
}

/// Externally supplied conversion rates.
#[derive(Debug, Clone)]
pub struct RateConfig {
    /// Units of the site's base fiat currency per one whole SOL.
    pub fiat_per_sol: Decimal,
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    pub gateway: GatewayConfig,
    pub recipients: RecipientConfig,
    pub tokens: TokenContracts,
    pub rates: RateConfig,
}

impl CheckoutConfig {
    /// Validate a parsed [`FileConfig`] into runtime configuration.
    pub fn from_file(file: FileConfig) -> Result<Self, ConfigError> {
        let api_base = Url::parse(&file.gateway.api_base).map_err(|source| {
            ConfigError::InvalidUrl {
                field: "gateway.api_base",
                source,
            }
        })?;
        let hosted_base = Url::parse(&file.gateway.hosted_base).map_err(|source| {
            ConfigError::InvalidUrl {
                field: "gateway.hosted_base",
                source,
            }
        })?;

        let evm = checked_evm_address("recipients.evm", file.recipients.evm)?;
        let usdc = checked_evm_address("tokens.usdc", file.tokens.usdc)?;
        let dai = checked_evm_address("tokens.dai", file.tokens.dai)?;

        let sol = file.recipients.sol;
        if sol.trim().is_empty() {
            return Err(ConfigError::InvalidAddress {
                field: "recipients.sol",
                value: sol,
            });
        }

        let fiat_per_sol = Decimal::from_str(&file.rates.fiat_per_sol)
            .map_err(|_| ConfigError::InvalidRate(file.rates.fiat_per_sol.clone()))?;
        if fiat_per_sol <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveRate);
        }

        Ok(Self {
            gateway: GatewayConfig {
                api_base,
                hosted_base,
            },
            recipients: RecipientConfig { evm, sol },
            tokens: TokenContracts { usdc, dai },
            rates: RateConfig { fiat_per_sol },
        })
    }
}

fn checked_evm_address(field: &'static str, value: String) -> Result<String, ConfigError> {
    let hex = value.strip_prefix("0x").unwrap_or("");
    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::InvalidAddress { field, value });
    }
    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::file::{GatewaySection, RatesSection, RecipientsSection, TokensSection};

    fn sample_file() -> FileConfig {
        FileConfig {
            gateway: GatewaySection {
                api_base: "https://shop.example.com".to_string(),
                hosted_base: "https://securegw-stage.paytm.in".to_string(),
            },
            recipients: RecipientsSection {
                evm: "0xf60e7Aa3573db940A7522ad95CDD7AE068Fdf11F".to_string(),
                sol: "4Nd1mYvK9DqsPiBSkiRj1cj5cTZxkjpgYwrRnVBeJqeK".to_string(),
            },
            tokens: TokensSection {
                usdc: "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48".to_string(),
                dai: "0x6b175474e89094c44da98b954eedeac495271d0f".to_string(),
            },
            rates: RatesSection {
                fiat_per_sol: "150.25".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config_converts() {
        let config = CheckoutConfig::from_file(sample_file()).unwrap();
        assert_eq!(config.gateway.api_base.as_str(), "https://shop.example.com/");
        assert_eq!(
            config.tokens.address(TokenKind::Dai),
            "0x6b175474e89094c44da98b954eedeac495271d0f"
        );
        assert_eq!(
            config.recipients.for_family(ChainFamily::Evm),
            "0xf60e7Aa3573db940A7522ad95CDD7AE068Fdf11F"
        );
        assert_eq!(
            config.rates.fiat_per_sol,
            "150.25".parse::<Decimal>().unwrap()
        );
    }

    #[test]
    fn test_malformed_evm_address_rejected() {
        let mut file = sample_file();
        file.recipients.evm = "0x1234".to_string();
        let err = CheckoutConfig::from_file(file).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidAddress {
                field: "recipients.evm",
                ..
            }
        ));
    }

    #[test]
    fn test_empty_sol_recipient_rejected() {
        let mut file = sample_file();
        file.recipients.sol = "  ".to_string();
        let err = CheckoutConfig::from_file(file).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAddress { .. }));
    }

    #[test]
    fn test_non_positive_rate_rejected() {
        let mut file = sample_file();
        file.rates.fiat_per_sol = "0".to_string();
        assert!(matches!(
            CheckoutConfig::from_file(file),
            Err(ConfigError::NonPositiveRate)
        ));

        let mut file = sample_file();
        file.rates.fiat_per_sol = "sol".to_string();
        assert!(matches!(
            CheckoutConfig::from_file(file),
            Err(ConfigError::InvalidRate(_))
        ));
    }
}
