use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::auth::password::PasswordHasher;

use super::domain::{
    NewSellerRecord, RegisterInput, Seller, SellerChanges, SellerUpdate, SellerWithBooks,
};
use super::errors::SellerError;
use super::repository::SellerRepository;

/// Seller identity business service independent of web framework.
///
/// All storage access goes through the repository and all crypto through
/// `PasswordHasher`; handlers stay thin.
pub struct SellerIdentityService<R: SellerRepository> {
    repo: Arc<R>,
    hasher: PasswordHasher,
}

impl<R: SellerRepository> SellerIdentityService<R> {
    pub fn new(repo: Arc<R>, hasher: PasswordHasher) -> Self {
        Self { repo, hasher }
    }

    /// Register a new seller with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::PasswordHasher;
    /// use service::sellers::domain::RegisterInput;
    /// use service::sellers::repository::mock::MockSellerRepository;
    /// use service::sellers::SellerIdentityService;
    /// let repo = Arc::new(MockSellerRepository::default());
    /// let svc = SellerIdentityService::new(repo, PasswordHasher::default());
    /// let input = RegisterInput { first_name: "Seller".into(), last_name: "Sellerow".into(), email: "a@mail.ru".into(), password: "password1".into() };
    /// let seller = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(seller.email, "a@mail.ru");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<Seller, SellerError> {
        if input.password.chars().count() < 8 {
            return Err(SellerError::Validation("password too short (>=8)".into()));
        }
        let password_hash = self.hasher.hash(&input.password)?;
        let record = NewSellerRecord {
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password_hash,
        };
        let seller = self.repo.insert_if_email_absent(record).await?;
        info!(seller_id = seller.id, "seller_registered");
        Ok(seller)
    }

    /// Check credentials against the stored hash.
    ///
    /// An unknown email and a wrong password both come back as
    /// `InvalidCredentials`; the caller learns nothing about which.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::PasswordHasher;
    /// use service::sellers::domain::RegisterInput;
    /// use service::sellers::repository::mock::MockSellerRepository;
    /// use service::sellers::SellerIdentityService;
    /// let repo = Arc::new(MockSellerRepository::default());
    /// let svc = SellerIdentityService::new(repo, PasswordHasher::default());
    /// let input = RegisterInput { first_name: "Seller".into(), last_name: "Sellerow".into(), email: "a@mail.ru".into(), password: "password1".into() };
    /// let _ = tokio_test::block_on(svc.register(input)).unwrap();
    /// let seller = tokio_test::block_on(svc.authenticate("a@mail.ru", "password1")).unwrap();
    /// assert_eq!(seller.email, "a@mail.ru");
    /// ```
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Seller, SellerError> {
        let Some(account) = self.repo.find_by_email(email).await? else {
            debug!("authentication failed");
            return Err(SellerError::InvalidCredentials);
        };
        if !self.hasher.verify(password, &account.password_hash) {
            debug!("authentication failed");
            return Err(SellerError::InvalidCredentials);
        }
        Ok(account.into_seller())
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Seller, SellerError> {
        self.repo.find_by_id(id).await?.ok_or(SellerError::NotFound)
    }

    /// Profile-details view including the seller's catalogue.
    pub async fn get_by_id_with_books(&self, id: i32) -> Result<SellerWithBooks, SellerError> {
        self.repo
            .find_by_id_with_books(id)
            .await?
            .ok_or(SellerError::NotFound)
    }

    /// Resolve a seller by email. Used by the request gate to re-resolve a
    /// token subject on every request.
    pub async fn get_by_email(&self, email: &str) -> Result<Seller, SellerError> {
        let account = self.repo.find_by_email(email).await?.ok_or(SellerError::NotFound)?;
        Ok(account.into_seller())
    }

    pub async fn list_all(&self) -> Result<Vec<Seller>, SellerError> {
        self.repo.list_all().await
    }

    /// Apply a partial update; omitted fields are left untouched. A new
    /// password is re-hashed before it reaches storage.
    #[instrument(skip(self, update))]
    pub async fn update(&self, id: i32, update: SellerUpdate) -> Result<Seller, SellerError> {
        let mut changes = SellerChanges {
            first_name: update.first_name,
            last_name: update.last_name,
            email: update.email,
            password_hash: None,
        };
        if let Some(password) = update.password {
            if password.chars().count() < 8 {
                return Err(SellerError::Validation("password too short (>=8)".into()));
            }
            changes.password_hash = Some(self.hasher.hash(&password)?);
        }
        let seller = self
            .repo
            .apply_partial_update(id, changes)
            .await?
            .ok_or(SellerError::NotFound)?;
        info!(seller_id = seller.id, "seller_updated");
        Ok(seller)
    }

    /// Physically delete the account. Removing an unknown id is `NotFound`,
    /// not a silent success.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: i32) -> Result<(), SellerError> {
        if !self.repo.delete_by_id(id).await? {
            return Err(SellerError::NotFound);
        }
        info!(seller_id = id, "seller_removed");
        Ok(())
    }
}
