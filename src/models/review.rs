use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reviewer {
    pub id: i32,
    pub username: String,
}

/// A published review. The local collection for a book only grows, and
/// only with entries the server has confirmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i32,
    pub content: String,
    pub user: Reviewer,
}
