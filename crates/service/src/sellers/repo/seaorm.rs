use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr, TransactionTrait,
};

use models::{book, seller};

use crate::sellers::domain::{
    Book, NewSellerRecord, Seller, SellerAccount, SellerChanges, SellerWithBooks,
};
use crate::sellers::errors::SellerError;
use crate::sellers::repository::SellerRepository;

pub struct SeaOrmSellerRepository {
    pub db: DatabaseConnection,
}

fn to_seller(m: seller::Model) -> Seller {
    Seller {
        id: m.id,
        first_name: m.first_name,
        last_name: m.last_name,
        email: m.email,
    }
}

fn to_account(m: seller::Model) -> SellerAccount {
    SellerAccount {
        id: m.id,
        first_name: m.first_name,
        last_name: m.last_name,
        email: m.email,
        password_hash: m.password_hash,
    }
}

fn to_book(m: book::Model) -> Book {
    Book { id: m.id, title: m.title, author: m.author, year: m.year }
}

fn is_unique_violation(e: &sea_orm::DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[async_trait::async_trait]
impl SellerRepository for SeaOrmSellerRepository {
    async fn insert_if_email_absent(&self, record: NewSellerRecord) -> Result<Seller, SellerError> {
        let now = Utc::now().into();
        let am = seller::ActiveModel {
            first_name: Set(record.first_name),
            last_name: Set(record.last_name),
            email: Set(record.email),
            password_hash: Set(record.password_hash),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        // the unique constraint on email is the atomic arbiter between
        // concurrent inserts; no check-then-insert race
        match am.insert(&self.db).await {
            Ok(m) => Ok(to_seller(m)),
            Err(e) if is_unique_violation(&e) => Err(SellerError::Conflict),
            Err(e) => Err(SellerError::Repository(e.to_string())),
        }
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Seller>, SellerError> {
        let res = seller::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SellerError::Repository(e.to_string()))?;
        Ok(res.map(to_seller))
    }

    async fn find_by_id_with_books(&self, id: i32) -> Result<Option<SellerWithBooks>, SellerError> {
        // one transaction so the seller row and book list are consistent
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SellerError::Repository(e.to_string()))?;
        let Some(found) = seller::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| SellerError::Repository(e.to_string()))?
        else {
            return Ok(None);
        };
        let books = book::Entity::find()
            .filter(book::Column::SellerId.eq(id))
            .order_by_asc(book::Column::Id)
            .all(&txn)
            .await
            .map_err(|e| SellerError::Repository(e.to_string()))?;
        txn.commit()
            .await
            .map_err(|e| SellerError::Repository(e.to_string()))?;
        Ok(Some(SellerWithBooks {
            id: found.id,
            first_name: found.first_name,
            last_name: found.last_name,
            email: found.email,
            books: books.into_iter().map(to_book).collect(),
        }))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<SellerAccount>, SellerError> {
        let res = seller::Entity::find()
            .filter(seller::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| SellerError::Repository(e.to_string()))?;
        Ok(res.map(to_account))
    }

    async fn list_all(&self) -> Result<Vec<Seller>, SellerError> {
        let rows = seller::Entity::find()
            .order_by_asc(seller::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SellerError::Repository(e.to_string()))?;
        Ok(rows.into_iter().map(to_seller).collect())
    }

    async fn apply_partial_update(
        &self,
        id: i32,
        changes: SellerChanges,
    ) -> Result<Option<Seller>, SellerError> {
        // read-modify-write in one transaction; dropped uncommitted on error
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SellerError::Repository(e.to_string()))?;
        let Some(found) = seller::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| SellerError::Repository(e.to_string()))?
        else {
            return Ok(None);
        };
        let mut am: seller::ActiveModel = found.into();
        if let Some(v) = changes.first_name {
            am.first_name = Set(v);
        }
        if let Some(v) = changes.last_name {
            am.last_name = Set(v);
        }
        if let Some(v) = changes.email {
            am.email = Set(v);
        }
        if let Some(v) = changes.password_hash {
            am.password_hash = Set(v);
        }
        am.updated_at = Set(Utc::now().into());
        let updated = match am.update(&txn).await {
            Ok(m) => m,
            Err(e) if is_unique_violation(&e) => return Err(SellerError::Conflict),
            Err(e) => return Err(SellerError::Repository(e.to_string())),
        };
        txn.commit()
            .await
            .map_err(|e| SellerError::Repository(e.to_string()))?;
        Ok(Some(to_seller(updated)))
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, SellerError> {
        let res = seller::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SellerError::Repository(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }
}
