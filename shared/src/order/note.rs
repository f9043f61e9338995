//! Order notes - annotations attached to a canonical order

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A note on an order, either internal or visible to the customer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderNote {
    /// Note identifier assigned by the server
    pub note_id: i64,
    /// Note author, as reported by the server
    #[serde(default)]
    pub author: String,
    /// Note body
    pub note: String,
    /// Whether the customer can see this note
    #[serde(default)]
    pub is_customer_note: bool,
    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
}
