use async_trait::async_trait;

use super::domain::{NewSellerRecord, Seller, SellerAccount, SellerChanges, SellerWithBooks};
use super::errors::SellerError;

/// Repository abstraction for seller persistence.
///
/// Every call runs in a single logical transaction: a failed operation leaves
/// no partial writes behind.
#[async_trait]
pub trait SellerRepository: Send + Sync {
    /// Insert the record unless the email is already taken. The uniqueness
    /// check and the insert are atomic; concurrent attempts with the same
    /// email produce exactly one success and `Conflict` for the rest.
    async fn insert_if_email_absent(&self, record: NewSellerRecord) -> Result<Seller, SellerError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Seller>, SellerError>;
    async fn find_by_id_with_books(&self, id: i32) -> Result<Option<SellerWithBooks>, SellerError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<SellerAccount>, SellerError>;
    async fn list_all(&self) -> Result<Vec<Seller>, SellerError>;

    /// Overwrite only the fields present in `changes`; absent fields keep
    /// their stored values. The read-modify-write is atomic.
    async fn apply_partial_update(
        &self,
        id: i32,
        changes: SellerChanges,
    ) -> Result<Option<Seller>, SellerError>;

    /// Physically delete the row; returns false when no such id exists.
    async fn delete_by_id(&self, id: i32) -> Result<bool, SellerError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use crate::sellers::domain::Book;

    #[derive(Default)]
    struct Inner {
        next_id: i32,
        rows: BTreeMap<i32, SellerAccount>,
        books: BTreeMap<i32, Vec<Book>>, // key: seller id
    }

    #[derive(Default)]
    pub struct MockSellerRepository {
        inner: Mutex<Inner>,
    }

    impl MockSellerRepository {
        /// Attach books to a seller so detail views have something to show.
        pub fn seed_books(&self, seller_id: i32, books: Vec<Book>) {
            let mut inner = self.inner.lock().unwrap();
            inner.books.insert(seller_id, books);
        }
    }

    fn view(account: &SellerAccount) -> Seller {
        account.clone().into_seller()
    }

    #[async_trait]
    impl SellerRepository for MockSellerRepository {
        async fn insert_if_email_absent(
            &self,
            record: NewSellerRecord,
        ) -> Result<Seller, SellerError> {
            let mut inner = self.inner.lock().unwrap();
            if inner.rows.values().any(|a| a.email == record.email) {
                return Err(SellerError::Conflict);
            }
            inner.next_id += 1;
            let account = SellerAccount {
                id: inner.next_id,
                first_name: record.first_name,
                last_name: record.last_name,
                email: record.email,
                password_hash: record.password_hash,
            };
            let seller = view(&account);
            inner.rows.insert(account.id, account);
            Ok(seller)
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<Seller>, SellerError> {
            let inner = self.inner.lock().unwrap();
            Ok(inner.rows.get(&id).map(view))
        }

        async fn find_by_id_with_books(
            &self,
            id: i32,
        ) -> Result<Option<SellerWithBooks>, SellerError> {
            let inner = self.inner.lock().unwrap();
            Ok(inner.rows.get(&id).map(|a| SellerWithBooks {
                id: a.id,
                first_name: a.first_name.clone(),
                last_name: a.last_name.clone(),
                email: a.email.clone(),
                books: inner.books.get(&id).cloned().unwrap_or_default(),
            }))
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<SellerAccount>, SellerError> {
            let inner = self.inner.lock().unwrap();
            Ok(inner.rows.values().find(|a| a.email == email).cloned())
        }

        async fn list_all(&self) -> Result<Vec<Seller>, SellerError> {
            let inner = self.inner.lock().unwrap();
            Ok(inner.rows.values().map(view).collect())
        }

        async fn apply_partial_update(
            &self,
            id: i32,
            changes: SellerChanges,
        ) -> Result<Option<Seller>, SellerError> {
            let mut inner = self.inner.lock().unwrap();
            if let Some(email) = &changes.email {
                if inner.rows.values().any(|a| a.id != id && &a.email == email) {
                    return Err(SellerError::Conflict);
                }
            }
            let Some(account) = inner.rows.get_mut(&id) else {
                return Ok(None);
            };
            if let Some(v) = changes.first_name {
                account.first_name = v;
            }
            if let Some(v) = changes.last_name {
                account.last_name = v;
            }
            if let Some(v) = changes.email {
                account.email = v;
            }
            if let Some(v) = changes.password_hash {
                account.password_hash = v;
            }
            Ok(Some(view(account)))
        }

        async fn delete_by_id(&self, id: i32) -> Result<bool, SellerError> {
            let mut inner = self.inner.lock().unwrap();
            Ok(inner.rows.remove(&id).is_some())
        }
    }
}
