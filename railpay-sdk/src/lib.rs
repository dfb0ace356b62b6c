//! Shared objects for the railpay checkout core.
//!
//! The `objects` module holds the data model exchanged between the checkout
//! shell, the orchestration core and the application backend. The `client`
//! module (behind the `client` cargo feature) holds the typed HTTP client
//! for the hosted-gateway flow, so downstream crates that only need the
//! shared types do not pull in `reqwest`.

pub mod objects;

#[cfg(feature = "client")]
pub mod client;
