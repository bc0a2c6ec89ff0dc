use serde::{Deserialize, Serialize};

/// An authenticated customer. Identified on requests by API token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub token_hash: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Data required to create a new user
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
}
