//! Cultivation service - Handles cultivation-related business logic.
//!
//! Every write that names an owner checks that the owner exists inside the
//! same transaction as the write.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::ConnectionTrait;

use crate::domain::{Cultivation, CultivationChanges, CultivationWithOwner, NewCultivation};
use crate::errors::{AppError, AppResult};
use crate::infra::{UnitOfWork, UserRepository};
use crate::types::{CultivationFilter, ListParams};

/// Cultivation service trait for dependency injection.
#[async_trait]
pub trait CultivationService: Send + Sync {
    /// List cultivations ascending by ID with their owner attached
    async fn list_cultivations(
        &self,
        params: ListParams,
        filter: CultivationFilter,
    ) -> AppResult<Vec<CultivationWithOwner>>;

    /// Get cultivation by ID with its owner attached
    async fn get_cultivation(&self, id: i32) -> AppResult<Option<CultivationWithOwner>>;

    /// Create a cultivation. Fails with `OwnerNotFound` if the owner does not exist.
    async fn create_cultivation(&self, input: NewCultivation) -> AppResult<CultivationWithOwner>;

    /// Apply a partial update. `Ok(None)` if the cultivation does not exist.
    async fn update_cultivation(
        &self,
        id: i32,
        changes: CultivationChanges,
    ) -> AppResult<Option<CultivationWithOwner>>;

    /// Delete a cultivation. `Ok(false)` if it did not exist.
    async fn delete_cultivation(&self, id: i32) -> AppResult<bool>;

    /// Count all cultivations
    async fn count_cultivations(&self) -> AppResult<u64>;
}

/// Concrete implementation of CultivationService using Unit of Work.
pub struct CultivationManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CultivationManager<U> {
    /// Create new cultivation service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

/// Attach owners to cultivations with one batched query keyed by owner ID.
///
/// Outside a transaction the owner can be deleted between the two queries;
/// such cultivations were cascaded away with it and are left out.
async fn attach_owners<C: ConnectionTrait>(
    users: &UserRepository<'_, C>,
    cultivations: Vec<Cultivation>,
) -> AppResult<Vec<CultivationWithOwner>> {
    let mut owner_ids: Vec<i32> = cultivations.iter().map(|c| c.owner_id).collect();
    owner_ids.sort_unstable();
    owner_ids.dedup();

    let owners = users.summaries_by_ids(&owner_ids).await?;

    Ok(cultivations
        .into_iter()
        .filter_map(|cultivation| match owners.get(&cultivation.owner_id) {
            Some(owner) => Some(CultivationWithOwner {
                owner: owner.clone(),
                cultivation,
            }),
            None => {
                tracing::debug!(
                    cultivation_id = cultivation.id,
                    owner_id = cultivation.owner_id,
                    "Skipping cultivation whose owner was deleted concurrently"
                );
                None
            }
        })
        .collect())
}

#[async_trait]
impl<U: UnitOfWork> CultivationService for CultivationManager<U> {
    async fn list_cultivations(
        &self,
        params: ListParams,
        filter: CultivationFilter,
    ) -> AppResult<Vec<CultivationWithOwner>> {
        let cultivations = self.uow.cultivations().list(params, &filter).await?;
        attach_owners(&self.uow.users(), cultivations).await
    }

    async fn get_cultivation(&self, id: i32) -> AppResult<Option<CultivationWithOwner>> {
        let Some(cultivation) = self.uow.cultivations().find_by_id(id).await? else {
            return Ok(None);
        };
        let mut loaded = attach_owners(&self.uow.users(), vec![cultivation]).await?;
        Ok(loaded.pop())
    }

    async fn create_cultivation(&self, input: NewCultivation) -> AppResult<CultivationWithOwner> {
        let created = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    if !ctx.users().exists(input.owner_id).await? {
                        tracing::warn!(
                            owner_id = input.owner_id,
                            "Rejected cultivation: owner does not exist"
                        );
                        return Err(AppError::OwnerNotFound);
                    }

                    let cultivation = ctx.cultivations().create(input).await?;
                    let mut loaded = attach_owners(&ctx.users(), vec![cultivation]).await?;
                    loaded
                        .pop()
                        .ok_or_else(|| AppError::internal("created cultivation lost its owner"))
                })
            })
            .await?;

        tracing::info!(
            cultivation_id = created.cultivation.id,
            owner_id = created.owner.id,
            "Cultivation created"
        );
        Ok(created)
    }

    async fn update_cultivation(
        &self,
        id: i32,
        changes: CultivationChanges,
    ) -> AppResult<Option<CultivationWithOwner>> {
        if changes.is_empty() {
            return self.get_cultivation(id).await;
        }

        let updated = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    // Absence wins over any payload validation
                    if ctx.cultivations().find_by_id(id).await?.is_none() {
                        return Ok(None);
                    }

                    if let Some(owner_id) = changes.owner_id {
                        if !ctx.users().exists(owner_id).await? {
                            tracing::warn!(
                                cultivation_id = id,
                                owner_id,
                                "Rejected re-parenting: owner does not exist"
                            );
                            return Err(AppError::OwnerNotFound);
                        }
                    }

                    let Some(cultivation) = ctx.cultivations().update(id, changes).await? else {
                        return Ok(None);
                    };
                    let mut loaded = attach_owners(&ctx.users(), vec![cultivation]).await?;
                    Ok(loaded.pop())
                })
            })
            .await?;

        if updated.is_some() {
            tracing::info!(cultivation_id = id, "Cultivation updated");
        }
        Ok(updated)
    }

    async fn delete_cultivation(&self, id: i32) -> AppResult<bool> {
        let removed = self
            .uow
            .transaction(move |ctx| Box::pin(async move { ctx.cultivations().delete(id).await }))
            .await?;

        if removed {
            tracing::info!(cultivation_id = id, "Cultivation deleted");
        }
        Ok(removed)
    }

    async fn count_cultivations(&self) -> AppResult<u64> {
        self.uow.cultivations().count().await
    }
}
