//! Wire types for the hosted-gateway payment flow.
//!
//! The application backend is asked to prepare an order; its response carries
//! the gateway-specific parameters that become the hidden fields of an
//! auto-submitted POST form handing the buyer to the hosted gateway.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

/// Buyer contact details captured by the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContact {
    pub email: String,
    pub phone_no: String,
}

/// Request body for the order-processing backend call.
///
/// Wire shape: `{"amount": 999, "email": "...", "phoneNo": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Integer amount in the gateway's smallest currency unit.
    pub amount: i64,
    pub email: String,
    pub phone_no: String,
}

/// Response from the order-processing backend.
///
/// `paytmParams` is gateway-specific nomenclature kept verbatim; the mapping
/// is opaque here and is used as-is to build the redirect form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayOrderResponse {
    #[serde(rename = "paytmParams")]
    pub paytm_params: BTreeMap<String, String>,
}

/// An auto-submitted POST form that hands the buyer off to the hosted
/// gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectForm {
    pub action: Url,
    pub fields: BTreeMap<String, String>,
}

impl RedirectForm {
    pub fn new(action: Url, fields: BTreeMap<String, String>) -> Self {
        Self { action, fields }
    }

    /// Render the self-submitting HTML document for the hand-off.
    ///
    /// The document POSTs `fields` to `action` as soon as it loads; the shell
    /// only has to replace the current page with it.
    pub fn to_html(&self) -> String {
        let mut inputs = String::new();
        for (name, value) in &self.fields {
            inputs.push_str(&format!(
                "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
                escape_html(name),
                escape_html(value)
            ));
        }
        format!(
            "<!doctype html><html><body onload=\"document.forms[0].submit()\">\
             <form method=\"post\" action=\"{}\">{}</form></body></html>",
            escape_html(self.action.as_str()),
            inputs
        )
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
