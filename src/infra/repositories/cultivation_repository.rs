//! Cultivation repository.

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::entities::cultivo::{self, ActiveModel, Entity as CultivoEntity};
use crate::domain::{Cultivation, CultivationChanges, NewCultivation};
use crate::errors::{AppError, AppResult};
use crate::types::{CultivationFilter, ListParams};

/// Data access for the `cultivos` table
pub struct CultivationRepository<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> CultivationRepository<'c, C> {
    /// Create a repository bound to a connection or transaction
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    /// Find cultivation by ID
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Cultivation>> {
        let result = CultivoEntity::find_by_id(id).one(self.conn).await?;
        Ok(result.map(Cultivation::from))
    }

    /// List cultivations ascending by ID.
    ///
    /// The owner filter and the text query combine with AND; the query
    /// matches a substring of name, type or description.
    pub async fn list(
        &self,
        params: ListParams,
        filter: &CultivationFilter,
    ) -> AppResult<Vec<Cultivation>> {
        let mut query = CultivoEntity::find();
        if let Some(owner_id) = filter.owner_id {
            query = query.filter(cultivo::Column::UsuarioId.eq(owner_id));
        }
        if let Some(term) = filter.query.as_deref().filter(|s| !s.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(cultivo::Column::Nombre.contains(term))
                    .add(cultivo::Column::Tipo.contains(term))
                    .add(cultivo::Column::Descripcion.contains(term)),
            );
        }

        let params = params.bounded();
        let models = query
            .order_by_asc(cultivo::Column::Id)
            .offset(params.offset)
            .limit(params.limit)
            .all(self.conn)
            .await?;

        Ok(models.into_iter().map(Cultivation::from).collect())
    }

    /// Fetch the cultivations of every given owner in one query, grouped by
    /// owner ID. Owners without cultivations are absent from the map.
    pub async fn list_for_owners(
        &self,
        owner_ids: &[i32],
    ) -> AppResult<HashMap<i32, Vec<Cultivation>>> {
        if owner_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let models = CultivoEntity::find()
            .filter(cultivo::Column::UsuarioId.is_in(owner_ids.iter().copied()))
            .order_by_asc(cultivo::Column::Id)
            .all(self.conn)
            .await?;

        let mut by_owner: HashMap<i32, Vec<Cultivation>> = HashMap::with_capacity(owner_ids.len());
        for model in models {
            by_owner
                .entry(model.usuario_id)
                .or_default()
                .push(Cultivation::from(model));
        }
        Ok(by_owner)
    }

    /// Count all cultivations
    pub async fn count(&self) -> AppResult<u64> {
        Ok(CultivoEntity::find().count(self.conn).await?)
    }

    /// Count cultivations referencing an owner
    pub async fn count_for_owner(&self, owner_id: i32) -> AppResult<u64> {
        let count = CultivoEntity::find()
            .filter(cultivo::Column::UsuarioId.eq(owner_id))
            .count(self.conn)
            .await?;
        Ok(count)
    }

    /// Insert a new cultivation
    pub async fn create(&self, input: NewCultivation) -> AppResult<Cultivation> {
        let active_model = ActiveModel {
            nombre: Set(input.name),
            tipo: Set(input.kind),
            descripcion: Set(input.description),
            usuario_id: Set(input.owner_id),
            ..Default::default()
        };

        let model = active_model
            .insert(self.conn)
            .await
            .map_err(AppError::from_write)?;

        Ok(Cultivation::from(model))
    }

    /// Apply the supplied fields. Returns `None` if the cultivation does not exist.
    pub async fn update(
        &self,
        id: i32,
        changes: CultivationChanges,
    ) -> AppResult<Option<Cultivation>> {
        let Some(model) = CultivoEntity::find_by_id(id).one(self.conn).await? else {
            return Ok(None);
        };

        let mut active = model.clone().into_active_model();
        if let Some(name) = changes.name {
            active.nombre = Set(name);
        }
        if let Some(kind) = changes.kind {
            active.tipo = Set(kind);
        }
        if let Some(description) = changes.description {
            active.descripcion = Set(description);
        }
        if let Some(owner_id) = changes.owner_id {
            active.usuario_id = Set(owner_id);
        }

        if !active.is_changed() {
            return Ok(Some(Cultivation::from(model)));
        }

        let model = active.update(self.conn).await.map_err(AppError::from_write)?;
        Ok(Some(Cultivation::from(model)))
    }

    /// Delete one cultivation. Returns whether a row was removed.
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = CultivoEntity::delete_by_id(id).exec(self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    /// Delete every cultivation owned by `owner_id`. Returns the number removed.
    pub async fn delete_by_owner(&self, owner_id: i32) -> AppResult<u64> {
        let result = CultivoEntity::delete_many()
            .filter(cultivo::Column::UsuarioId.eq(owner_id))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected)
    }
}
