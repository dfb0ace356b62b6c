//! Gateway API client (checkout core → application backend).

use reqwest::Client;
use url::Url;

use super::ClientError;
use crate::objects::gateway::{GatewayOrderResponse, OrderRequest, RedirectForm};

/// Order-creation endpoint on the application backend.
const PROCESS_PATH: &str = "/api/v1/payment/process";
/// Endpoint on the hosted gateway that receives the redirect form.
const ORDER_PATH: &str = "/order/process";

/// Typed HTTP client for the hosted-gateway payment flow.
///
/// The application backend is called to obtain gateway-specific redirect
/// parameters; the hosted gateway itself is only ever reached through the
/// [`RedirectForm`] built from those parameters.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: Client,
    api_base: Url,
    hosted_base: Url,
}

impl GatewayClient {
    /// Create a new `GatewayClient`.
    ///
    /// * `api_base` – root URL of the application backend.
    /// * `hosted_base` – root URL of the hosted gateway.
    pub fn new(api_base: Url, hosted_base: Url) -> Self {
        Self {
            http: Client::new(),
            api_base,
            hosted_base,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `POST /api/v1/payment/process` – obtain redirect parameters for a new
    /// gateway order.
    pub async fn create_order(
        &self,
        payload: &OrderRequest,
    ) -> Result<GatewayOrderResponse, ClientError> {
        let url = self.api_base.join(PROCESS_PATH)?;

        let resp = self
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await?;

        parse_response(resp).await
    }

    /// Build the auto-submitted form that hands the buyer to the hosted
    /// gateway, with the backend's parameters as hidden fields.
    pub fn redirect_form(
        &self,
        response: &GatewayOrderResponse,
    ) -> Result<RedirectForm, ClientError> {
        let action = self.hosted_base.join(ORDER_PATH)?;
        Ok(RedirectForm::new(action, response.paytm_params.clone()))
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api { status, body });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn redirect_form_targets_hosted_gateway() {
        let client = GatewayClient::new(
            Url::parse("https://shop.example.com").unwrap(),
            Url::parse("https://securegw-stage.paytm.in").unwrap(),
        );

        let mut params = BTreeMap::new();
        params.insert("ORDER_ID".to_string(), "o-42".to_string());
        let response = GatewayOrderResponse {
            paytm_params: params,
        };

        let form = client.redirect_form(&response).unwrap();
        assert_eq!(
            form.action.as_str(),
            "https://securegw-stage.paytm.in/order/process"
        );
        assert_eq!(form.fields["ORDER_ID"], "o-42");
    }
}
