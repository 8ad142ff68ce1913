use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::book;
use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "seller")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Book,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Book => Entity::has_many(book::Entity).into(),
        }
    }
}

impl Related<book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Name fields are 2..=50 chars, letters only.
pub fn validate_name(field: &str, value: &str) -> Result<(), ModelError> {
    let len = value.chars().count();
    if !(2..=50).contains(&len) {
        return Err(ModelError::Validation(format!("{field} must be 2..=50 characters")));
    }
    if !value.chars().all(char::is_alphabetic) {
        return Err(ModelError::Validation(format!("{field} must contain only letters")));
    }
    Ok(())
}

pub fn validate_email(value: &str) -> Result<(), ModelError> {
    let valid = match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.'),
        None => false,
    };
    if !valid {
        return Err(ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub fn validate_password(value: &str) -> Result<(), ModelError> {
    if value.chars().count() < 8 {
        return Err(ModelError::Validation("password must be at least 8 characters long".into()));
    }
    Ok(())
}
