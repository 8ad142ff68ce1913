use serde::{Deserialize, Serialize};

/// Registration input (plaintext password; hashed before storage).
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Business view of a seller; never carries password material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seller {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Stored account row including the one-way password hash. Internal to the
/// service and repository layers; callers get `Seller` views.
#[derive(Debug, Clone)]
pub struct SellerAccount {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

impl SellerAccount {
    pub fn into_seller(self) -> Seller {
        Seller {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
        }
    }
}

/// Row to persist at registration time (password already hashed).
#[derive(Debug, Clone)]
pub struct NewSellerRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

/// Catalogued book owned by a seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub year: i32,
}

/// Profile-details view: the seller plus their catalogue.
#[derive(Debug, Clone, Serialize)]
pub struct SellerWithBooks {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub books: Vec<Book>,
}

/// Partial update; `None` fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SellerUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Column-level changes handed to the repository (password already hashed).
#[derive(Debug, Clone, Default)]
pub struct SellerChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}
