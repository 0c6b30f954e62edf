//! Service Container - Centralized service access.
//!
//! Both services share one `Persistence` so they see the same pool and
//! transaction semantics.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{CultivationManager, CultivationService, UserManager, UserService};
use crate::config::Config;
use crate::domain::{Argon2Hasher, CredentialHasher};
use crate::errors::AppResult;
use crate::infra::{Database, Persistence};

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
pub trait ServiceContainer: Send + Sync {
    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get cultivation service
    fn cultivations(&self) -> Arc<dyn CultivationService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    user_service: Arc<dyn UserService>,
    cultivation_service: Arc<dyn CultivationService>,
}

impl Services {
    /// Create a new service container from already built services
    pub fn new(
        user_service: Arc<dyn UserService>,
        cultivation_service: Arc<dyn CultivationService>,
    ) -> Self {
        Self {
            user_service,
            cultivation_service,
        }
    }

    /// Create service container from a database connection and a hasher
    pub fn from_connection(db: DatabaseConnection, hasher: Arc<dyn CredentialHasher>) -> Self {
        let uow = Arc::new(Persistence::new(db));
        Self::new(
            Arc::new(UserManager::new(uow.clone(), hasher)),
            Arc::new(CultivationManager::new(uow)),
        )
    }

    /// Connect, apply pending migrations and wire every service from config
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let db = Database::connect(config).await?;
        let hasher = Arc::new(Argon2Hasher::from_config(config)?);
        Ok(Self::from_connection(db.get_connection(), hasher))
    }
}

impl ServiceContainer for Services {
    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn cultivations(&self) -> Arc<dyn CultivationService> {
        self.cultivation_service.clone()
    }
}
