//! Rail-specific amount conversion.
//!
//! Pure and deterministic: a cart total in the site's base fiat unit goes
//! in, the amount presented to the target system comes out. All scaling is
//! done on `rust_decimal::Decimal`; floating point never touches a monetary
//! value, since it silently loses precision at token magnitudes.

use crate::config::RateConfig;
use railpay_sdk::objects::rails::{NativeChain, PaymentRail};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Smallest native units per one whole SOL.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Decimal scale of the Solana native unit.
pub const LAMPORTS_SCALE: u32 = 9;

/// Unit label for EVM token smallest units.
pub const UNIT_WEI: &str = "wei";
/// Unit label for the Solana native smallest unit.
pub const UNIT_LAMPORTS: &str = "lamports";
/// Unit label for the hosted gateway's integer fiat amount.
pub const UNIT_GATEWAY_FIAT: &str = "inr";

/// Errors raised by amount conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The cart total is negative, which no rail can express.
    #[error("cart total cannot be negative")]
    NegativeTotal,

    /// The fiat→chain rate is zero or negative.
    #[error("fiat to chain rate must be positive")]
    NonPositiveRate,

    /// The scaled amount exceeds the representable range.
    #[error("amount exceeds the representable range")]
    OutOfRange,
}

/// The amount actually presented to the target system for one rail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RailAmount {
    /// Integral amount in `unit` smallest units.
    pub value: Decimal,
    /// Decimal scale applied to the fiat total to reach `value`.
    pub scale: u32,
    /// Unit label for display and logging.
    pub unit: &'static str,
}

impl RailAmount {
    /// The amount as a plain integer of smallest units.
    pub fn smallest_units(&self) -> Result<u128, ConvertError> {
        self.value.to_u128().ok_or(ConvertError::OutOfRange)
    }
}

impl std::fmt::Display for RailAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value.normalize(), self.unit)
    }
}

/// Compute the transfer amount for `rail` from the cart total.
///
/// * Gateway: the total rounded half-up to an integer in the gateway's
///   smallest currency unit.
/// * Token: the total scaled by the token's declared decimal precision.
/// * Native: the total divided by the externally supplied fiat→SOL rate,
///   scaled to lamports. Sub-lamport remainders round half-up.
pub fn rail_amount(
    total_price: Decimal,
    rail: &PaymentRail,
    rates: &RateConfig,
) -> Result<RailAmount, ConvertError> {
    if total_price < Decimal::ZERO {
        return Err(ConvertError::NegativeTotal);
    }

    match rail {
        PaymentRail::GatewayRedirect => {
            let value =
                total_price.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
            Ok(RailAmount {
                value,
                scale: 0,
                unit: UNIT_GATEWAY_FIAT,
            })
        }
        PaymentRail::TokenTransfer { token } => {
            let scale = token.decimals();
            let factor = Decimal::from(10u64.pow(scale));
            let value = total_price
                .checked_mul(factor)
                .ok_or(ConvertError::OutOfRange)?
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
            Ok(RailAmount {
                value,
                scale,
                unit: UNIT_WEI,
            })
        }
        PaymentRail::NativeTransfer {
            chain: NativeChain::Sol,
        } => {
            if rates.fiat_per_sol <= Decimal::ZERO {
                return Err(ConvertError::NonPositiveRate);
            }
            let value = total_price
                .checked_div(rates.fiat_per_sol)
                .ok_or(ConvertError::OutOfRange)?
                .checked_mul(Decimal::from(LAMPORTS_PER_SOL))
                .ok_or(ConvertError::OutOfRange)?
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
            Ok(RailAmount {
                value,
                scale: LAMPORTS_SCALE,
                unit: UNIT_LAMPORTS,
            })
        }
    }
}
