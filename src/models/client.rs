use serde::{Deserialize, Serialize};

/// A client as stored by the service
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClientRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of a client create or update request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}
