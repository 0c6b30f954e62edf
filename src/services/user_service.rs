//! User service - Handles user-related business logic.
//!
//! Enforces email uniqueness, hashes credentials before they reach storage
//! and deletes a user's cultivations together with the user.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::ConnectionTrait;

use crate::domain::{CredentialHasher, NewUser, User, UserChanges, UserWithCultivations};
use crate::errors::{AppError, AppResult};
use crate::infra::{CultivationRepository, UnitOfWork, UserPatch};
use crate::types::ListParams;

/// User service trait for dependency injection.
///
/// Lookups report absence as `Ok(None)` / `Ok(false)`; errors are reserved
/// for rejected writes and storage failures.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List users ascending by ID with their cultivations attached
    async fn list_users(
        &self,
        params: ListParams,
        search: Option<String>,
    ) -> AppResult<Vec<UserWithCultivations>>;

    /// Get user by ID with cultivations attached
    async fn get_user(&self, id: i32) -> AppResult<Option<UserWithCultivations>>;

    /// Get user by exact email
    async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a user. Fails with `DuplicateEmail` if the email is in use.
    async fn create_user(&self, input: NewUser) -> AppResult<UserWithCultivations>;

    /// Apply a partial update. `Ok(None)` if the user does not exist.
    async fn update_user(
        &self,
        id: i32,
        changes: UserChanges,
    ) -> AppResult<Option<UserWithCultivations>>;

    /// Delete a user and all its cultivations. `Ok(false)` if it did not exist.
    async fn delete_user(&self, id: i32) -> AppResult<bool>;

    /// Count all users
    async fn count_users(&self) -> AppResult<u64>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
    hasher: Arc<dyn CredentialHasher>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work and credential hasher
    pub fn new(uow: Arc<U>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { uow, hasher }
    }
}

/// Attach cultivations to users with one batched query keyed by user ID.
async fn attach_cultivations<C: ConnectionTrait>(
    cultivations: &CultivationRepository<'_, C>,
    users: Vec<User>,
) -> AppResult<Vec<UserWithCultivations>> {
    let ids: Vec<i32> = users.iter().map(|u| u.id).collect();
    let mut by_owner: HashMap<i32, _> = cultivations.list_for_owners(&ids).await?;

    Ok(users
        .into_iter()
        .map(|user| {
            let owned = by_owner.remove(&user.id).unwrap_or_default();
            UserWithCultivations::new(user, owned)
        })
        .collect())
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn list_users(
        &self,
        params: ListParams,
        search: Option<String>,
    ) -> AppResult<Vec<UserWithCultivations>> {
        let users = self.uow.users().list(params, search.as_deref()).await?;
        attach_cultivations(&self.uow.cultivations(), users).await
    }

    async fn get_user(&self, id: i32) -> AppResult<Option<UserWithCultivations>> {
        let Some(user) = self.uow.users().find_by_id(id).await? else {
            return Ok(None);
        };
        let mut loaded = attach_cultivations(&self.uow.cultivations(), vec![user]).await?;
        Ok(loaded.pop())
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.uow.users().find_by_email(email).await
    }

    async fn create_user(&self, input: NewUser) -> AppResult<UserWithCultivations> {
        // Cheap pre-check so a rejected create never pays the hash cost
        if self.uow.users().email_taken(&input.email, None).await? {
            tracing::warn!("Rejected user creation: email already registered");
            return Err(AppError::DuplicateEmail);
        }

        // Hash outside the transaction to keep it short
        let password_hash = self.hasher.hash(&input.password)?;

        let user = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let users = ctx.users();
                    if users.email_taken(&input.email, None).await? {
                        tracing::warn!("Rejected user creation: email already registered");
                        return Err(AppError::DuplicateEmail);
                    }

                    users
                        .create(input.name, input.email, password_hash, input.role)
                        .await
                })
            })
            .await?;

        tracing::info!(user_id = user.id, role = %user.role, "User created");
        Ok(UserWithCultivations::new(user, Vec::new()))
    }

    async fn update_user(
        &self,
        id: i32,
        changes: UserChanges,
    ) -> AppResult<Option<UserWithCultivations>> {
        if changes.is_empty() {
            return self.get_user(id).await;
        }

        // Absence wins over any payload validation
        let users = self.uow.users();
        if !users.exists(id).await? {
            return Ok(None);
        }
        if let Some(email) = &changes.email {
            if users.email_taken(email, Some(id)).await? {
                tracing::warn!(user_id = id, "Rejected user update: email already registered");
                return Err(AppError::DuplicateEmail);
            }
        }

        // Hash outside the transaction to keep it short
        let password_hash = match &changes.password {
            Some(plaintext) => Some(self.hasher.hash(plaintext)?),
            None => None,
        };

        let updated = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let users = ctx.users();
                    // Re-checked under the transaction; the pre-checks may be stale
                    if !users.exists(id).await? {
                        return Ok(None);
                    }

                    if let Some(email) = &changes.email {
                        if users.email_taken(email, Some(id)).await? {
                            tracing::warn!(
                                user_id = id,
                                "Rejected user update: email already registered"
                            );
                            return Err(AppError::DuplicateEmail);
                        }
                    }

                    let patch = UserPatch {
                        name: changes.name,
                        email: changes.email,
                        password_hash,
                        role: changes.role,
                    };
                    let Some(user) = users.update(id, patch).await? else {
                        return Ok(None);
                    };

                    let mut loaded = attach_cultivations(&ctx.cultivations(), vec![user]).await?;
                    Ok(loaded.pop())
                })
            })
            .await?;

        if updated.is_some() {
            tracing::info!(user_id = id, "User updated");
        }
        Ok(updated)
    }

    async fn delete_user(&self, id: i32) -> AppResult<bool> {
        let removed = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    if !ctx.users().exists(id).await? {
                        return Ok(None);
                    }

                    // Dependents first, then the owner, in the same transaction
                    let cultivations = ctx.cultivations().delete_by_owner(id).await?;
                    ctx.users().delete(id).await?;
                    Ok(Some(cultivations))
                })
            })
            .await?;

        match removed {
            Some(cultivations) => {
                tracing::info!(user_id = id, cultivations, "User deleted with its cultivations");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count_users(&self) -> AppResult<u64> {
        self.uow.users().count().await
    }
}
