use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// ERC-20 tokens accepted for direct on-chain payment.
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Usdc,
    Dai,
}

impl TokenKind {
    /// Decimal precision declared by the token contract.
    pub fn decimals(&self) -> u32 {
        match self {
            TokenKind::Usdc | TokenKind::Dai => 18,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Usdc => write!(f, "usdc"),
            TokenKind::Dai => write!(f, "dai"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Non-EVM chains accepted for native-unit payment.
#[serde(rename_all = "lowercase")]
pub enum NativeChain {
    Sol,
}

impl std::fmt::Display for NativeChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NativeChain::Sol => write!(f, "sol"),
        }
    }
}

/// Chain family a wallet provider can authorize transfers on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainFamily {
    Evm,
    Solana,
}

impl std::fmt::Display for ChainFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainFamily::Evm => write!(f, "evm"),
            ChainFamily::Solana => write!(f, "solana"),
        }
    }
}

/// Kind of browser-injected wallet provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    MetaMask,
    Phantom,
}

impl ProviderKind {
    /// The chain family this provider signs for.
    pub fn family(&self) -> ChainFamily {
        match self {
            ProviderKind::MetaMask => ChainFamily::Evm,
            ProviderKind::Phantom => ChainFamily::Solana,
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::MetaMask => write!(f, "MetaMask"),
            ProviderKind::Phantom => write!(f, "Phantom"),
        }
    }
}

/// The mutually exclusive payment execution paths.
///
/// Selected exactly once per submission and immutable for its duration.
/// Routing matches exhaustively on this enum, so an unhandled rail is a
/// compile error rather than a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "rail", rename_all = "snake_case")]
pub enum PaymentRail {
    /// Hand the buyer to the hosted gateway, paid in fiat.
    GatewayRedirect,
    /// Direct ERC-20 token transfer on the EVM chain.
    TokenTransfer { token: TokenKind },
    /// Native-unit transfer on a non-EVM chain.
    NativeTransfer { chain: NativeChain },
}

impl PaymentRail {
    /// The chain family the rail settles on, if it settles on-chain at all.
    pub fn chain_family(&self) -> Option<ChainFamily> {
        match self {
            PaymentRail::GatewayRedirect => None,
            PaymentRail::TokenTransfer { .. } => Some(ChainFamily::Evm),
            PaymentRail::NativeTransfer { chain: NativeChain::Sol } => Some(ChainFamily::Solana),
        }
    }

    /// The wallet provider kind required by the rail, if any.
    pub fn provider_kind(&self) -> Option<ProviderKind> {
        match self {
            PaymentRail::GatewayRedirect => None,
            PaymentRail::TokenTransfer { .. } => Some(ProviderKind::MetaMask),
            PaymentRail::NativeTransfer { chain: NativeChain::Sol } => Some(ProviderKind::Phantom),
        }
    }

    /// Whether this rail settles through a wallet provider.
    pub fn is_crypto(&self) -> bool {
        !matches!(self, PaymentRail::GatewayRedirect)
    }
}

impl std::fmt::Display for PaymentRail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentRail::GatewayRedirect => write!(f, "gateway"),
            PaymentRail::TokenTransfer { token } => write!(f, "{token}"),
            PaymentRail::NativeTransfer { chain } => write!(f, "{chain}"),
        }
    }
}
