//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use cultivos::domain::{Argon2Hasher, CultivationWithOwner, NewCultivation, NewUser, UserRole};
use cultivos::infra::{Database, Persistence};
use cultivos::services::{CultivationManager, CultivationService, UserManager, UserService};

/// Services over a fresh, migrated in-memory SQLite database
pub struct TestApp {
    pub uow: Arc<Persistence>,
    pub users: UserManager<Persistence>,
    pub cultivations: CultivationManager<Persistence>,
}

pub async fn setup() -> TestApp {
    let db = Database::connect_url("sqlite::memory:", 1)
        .await
        .expect("in-memory database");
    let uow = Arc::new(Persistence::new(db.get_connection()));
    // Minimal cost parameters keep the suite fast
    let hasher = Arc::new(Argon2Hasher::new(8, 1, 1).expect("hasher params"));

    TestApp {
        users: UserManager::new(uow.clone(), hasher),
        cultivations: CultivationManager::new(uow.clone()),
        uow,
    }
}

pub fn new_user(name: &str, email: &str) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: email.to_string(),
        password: "correct horse battery staple".to_string(),
        role: UserRole::User,
    }
}

pub fn new_cultivation(name: &str, kind: &str, owner_id: i32) -> NewCultivation {
    NewCultivation {
        name: name.to_string(),
        kind: kind.to_string(),
        description: None,
        owner_id,
    }
}

impl TestApp {
    pub async fn create_user(&self, name: &str, email: &str) -> i32 {
        self.users
            .create_user(new_user(name, email))
            .await
            .expect("create user")
            .user
            .id
    }

    pub async fn create_cultivation(
        &self,
        name: &str,
        kind: &str,
        owner_id: i32,
    ) -> CultivationWithOwner {
        self.cultivations
            .create_cultivation(new_cultivation(name, kind, owner_id))
            .await
            .expect("create cultivation")
    }
}
