//! Shop Models
//!
//! Shop identity/metadata as served by the backend, plus the credential
//! check result used by the connection step.

use serde::{Deserialize, Serialize};

/// Shop identity and metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShopInfo {
    pub id: i64,
    pub name: String,
    /// Caller's role in this shop, when the backend reports one
    #[serde(default)]
    pub my_role: Option<String>,
}

/// Payload for creating a shop from a validated integration token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewShop {
    pub name: Option<String>,
    pub token: String,
}

/// Result of an integration credential check
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenCheck {
    pub ok: bool,
    #[serde(default)]
    pub shop_name: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
