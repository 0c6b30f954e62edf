//! User repository.
//!
//! Generic over the connection so the same queries run against the pool
//! for reads and inside a `DatabaseTransaction` for writes.

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::entities::usuario::{self, ActiveModel, Entity as UsuarioEntity};
use crate::domain::{OwnerSummary, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::types::ListParams;

/// Field values for a user update, with the password already hashed
#[derive(Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<UserRole>,
}

/// Data access for the `usuarios` table
pub struct UserRepository<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> UserRepository<'c, C> {
    /// Create a repository bound to a connection or transaction
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UsuarioEntity::find_by_id(id).one(self.conn).await?;
        Ok(result.map(User::from))
    }

    /// Find user by exact email
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UsuarioEntity::find()
            .filter(usuario::Column::Email.eq(email))
            .one(self.conn)
            .await?;
        Ok(result.map(User::from))
    }

    /// Check whether a user with this ID exists
    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let count = UsuarioEntity::find_by_id(id).count(self.conn).await?;
        Ok(count > 0)
    }

    /// Check whether the email is held by a user other than `excluding`
    pub async fn email_taken(&self, email: &str, excluding: Option<i32>) -> AppResult<bool> {
        let mut query = UsuarioEntity::find().filter(usuario::Column::Email.eq(email));
        if let Some(id) = excluding {
            query = query.filter(usuario::Column::Id.ne(id));
        }
        Ok(query.count(self.conn).await? > 0)
    }

    /// List users ascending by ID, optionally filtered by a substring of
    /// name or email
    pub async fn list(&self, params: ListParams, search: Option<&str>) -> AppResult<Vec<User>> {
        let mut query = UsuarioEntity::find();
        if let Some(term) = search.filter(|s| !s.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(usuario::Column::Nombre.contains(term))
                    .add(usuario::Column::Email.contains(term)),
            );
        }

        let params = params.bounded();
        let models = query
            .order_by_asc(usuario::Column::Id)
            .offset(params.offset)
            .limit(params.limit)
            .all(self.conn)
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    /// Fetch owner summaries for a set of IDs in one query, keyed by ID
    pub async fn summaries_by_ids(&self, ids: &[i32]) -> AppResult<HashMap<i32, OwnerSummary>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let models = UsuarioEntity::find()
            .filter(usuario::Column::Id.is_in(ids.iter().copied()))
            .all(self.conn)
            .await?;

        Ok(models
            .into_iter()
            .map(|m| (m.id, OwnerSummary::from(m)))
            .collect())
    }

    /// Count all users
    pub async fn count(&self) -> AppResult<u64> {
        Ok(UsuarioEntity::find().count(self.conn).await?)
    }

    /// Insert a new user
    pub async fn create(
        &self,
        name: String,
        email: String,
        password_hash: String,
        role: UserRole,
    ) -> AppResult<User> {
        let active_model = ActiveModel {
            nombre: Set(name),
            email: Set(email),
            hashed_password: Set(password_hash),
            role: Set(role.as_str().to_string()),
            ..Default::default()
        };

        let model = active_model
            .insert(self.conn)
            .await
            .map_err(AppError::from_write)?;

        Ok(User::from(model))
    }

    /// Apply the supplied fields. Returns `None` if the user does not exist.
    pub async fn update(&self, id: i32, patch: UserPatch) -> AppResult<Option<User>> {
        let Some(model) = UsuarioEntity::find_by_id(id).one(self.conn).await? else {
            return Ok(None);
        };

        let mut active = model.clone().into_active_model();
        if let Some(name) = patch.name {
            active.nombre = Set(name);
        }
        if let Some(email) = patch.email {
            active.email = Set(email);
        }
        if let Some(hash) = patch.password_hash {
            active.hashed_password = Set(hash);
        }
        if let Some(role) = patch.role {
            active.role = Set(role.as_str().to_string());
        }

        if !active.is_changed() {
            return Ok(Some(User::from(model)));
        }

        let model = active.update(self.conn).await.map_err(AppError::from_write)?;
        Ok(Some(User::from(model)))
    }

    /// Delete a user row. Returns whether a row was removed.
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = UsuarioEntity::delete_by_id(id).exec(self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    /// Read the stored credential hash. Never surfaced through the services'
    /// read operations.
    pub async fn credential_hash(&self, id: i32) -> AppResult<Option<String>> {
        let result = UsuarioEntity::find_by_id(id).one(self.conn).await?;
        Ok(result.map(|m| m.hashed_password))
    }
}
