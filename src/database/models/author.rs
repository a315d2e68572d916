use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub admin: bool,
    pub first_name: String,
    pub last_name: String,
    pub nationality: Option<String>,
    pub image: Option<String>,
    pub biography: Option<String>,
    pub pseudonym: Option<String>,
    pub email_contact: Option<String>,
}
