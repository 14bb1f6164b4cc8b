use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An (id, name) pair as returned by the universal name search.
/// Covers candidates, clients and projects alike.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NamedRow {
    pub id: i64,
    pub name: String,
}
