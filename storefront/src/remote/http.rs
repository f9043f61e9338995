//! reqwest-backed implementation of [`OrdersRemote`]

use super::{OrdersRemote, RemoteError};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{Address, FeeLine, Order, OrderDraft, OrderNote, OrderStatus, ShippingLine};

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP remote for the site orders API
#[derive(Debug, Clone)]
pub struct RestOrdersRemote {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl RestOrdersRemote {
    /// Create a remote against the given API base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: None,
        })
    }

    /// Set the bearer token used for authenticated calls
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteError> {
        let mut request = self.client.get(self.url(path));
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        Self::handle_response(request.send().await?).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, RemoteError> {
        let mut request = self.client.post(self.url(path)).json(body);
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        Self::handle_response(request.send().await?).await
    }

    async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, RemoteError> {
        let mut request = self.client.put(self.url(path)).json(body);
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        Self::handle_response(request.send().await?).await
    }

    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, RemoteError> {
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::UnacceptableStatus(status.as_u16()));
        }
        response
            .json()
            .await
            .map_err(|e| RemoteError::MalformedPayload(e.to_string()))
    }
}

/// Editable order fields as the API accepts them.
///
/// Both create and update send the full current draft, not a diff.
#[derive(Debug, Serialize)]
struct OrderPayload {
    status: OrderStatus,
    line_items: Vec<LineItemPayload>,
    shipping_lines: Vec<ShippingLine>,
    fee_lines: Vec<FeeLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    billing: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shipping: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_note: Option<String>,
}

#[derive(Debug, Serialize)]
struct LineItemPayload {
    product_id: i64,
    quantity: u32,
}

impl OrderPayload {
    fn from_draft(draft: &OrderDraft) -> Self {
        Self {
            status: draft.status,
            line_items: draft
                .items
                .iter()
                .map(|item| LineItemPayload {
                    product_id: item.product_id,
                    quantity: item.quantity,
                })
                .collect(),
            shipping_lines: draft.shipping_line.clone().into_iter().collect(),
            fee_lines: draft.fee_line.clone().into_iter().collect(),
            billing: draft.billing.clone(),
            shipping: draft.shipping.clone(),
            customer_note: draft.customer_note.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct StatusPayload {
    status: OrderStatus,
}

#[derive(Debug, Serialize)]
struct NotePayload<'a> {
    note: &'a str,
    customer_note: bool,
}

#[async_trait]
impl OrdersRemote for RestOrdersRemote {
    async fn create_order(&self, site_id: i64, draft: &OrderDraft) -> Result<Order, RemoteError> {
        let path = format!("sites/{site_id}/orders");
        self.post(&path, &OrderPayload::from_draft(draft)).await
    }

    async fn update_order(
        &self,
        site_id: i64,
        order_id: i64,
        draft: &OrderDraft,
    ) -> Result<Order, RemoteError> {
        let path = format!("sites/{site_id}/orders/{order_id}");
        self.put(&path, &OrderPayload::from_draft(draft)).await
    }

    async fn update_order_status(
        &self,
        site_id: i64,
        order_id: i64,
        status: OrderStatus,
    ) -> Result<Order, RemoteError> {
        let path = format!("sites/{site_id}/orders/{order_id}");
        self.put(&path, &StatusPayload { status }).await
    }

    async fn load_order_notes(
        &self,
        site_id: i64,
        order_id: i64,
    ) -> Result<Vec<OrderNote>, RemoteError> {
        let path = format!("sites/{site_id}/orders/{order_id}/notes");
        self.get(&path).await
    }

    async fn add_order_note(
        &self,
        site_id: i64,
        order_id: i64,
        note: &str,
        is_customer_note: bool,
    ) -> Result<OrderNote, RemoteError> {
        let path = format!("sites/{site_id}/orders/{order_id}/notes");
        self.post(
            &path,
            &NotePayload {
                note,
                customer_note: is_customer_note,
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_payload_carries_the_full_draft() {
        let mut draft = OrderDraft::new(123);
        draft.add_item(5, "Sticker pack", "8.50", 2);
        draft.shipping_line = Some(ShippingLine::new("Flat Rate", "flat_rate", "10"));
        draft.customer_note = Some("Leave at the door".to_string());

        let payload = serde_json::to_value(OrderPayload::from_draft(&draft)).unwrap();
        assert_eq!(payload["status"], "pending");
        assert_eq!(payload["line_items"][0]["product_id"], 5);
        assert_eq!(payload["line_items"][0]["quantity"], 2);
        assert_eq!(payload["shipping_lines"][0]["total"], "10");
        assert_eq!(payload["fee_lines"].as_array().unwrap().len(), 0);
        assert_eq!(payload["customer_note"], "Leave at the door");
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let remote = RestOrdersRemote::new("https://example.com/wp-json/wc/v3/").unwrap();
        assert_eq!(
            remote.url("sites/1/orders"),
            "https://example.com/wp-json/wc/v3/sites/1/orders"
        );
    }
}
