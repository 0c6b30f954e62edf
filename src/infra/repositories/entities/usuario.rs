//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{OwnerSummary, User, UserRole};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "usuarios")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nombre: String,
    #[sea_orm(unique)]
    pub email: String,
    pub hashed_password: String,
    pub role: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cultivo::Entity")]
    Cultivos,
}

impl Related<super::cultivo::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cultivos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity, dropping the credential hash
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            name: model.nombre,
            email: model.email,
            role: stored_role(model.id, &model.role),
        }
    }
}

/// Rows written outside this crate may carry an unknown role
fn stored_role(user_id: i32, role: &str) -> UserRole {
    role.parse().unwrap_or_else(|_| {
        tracing::warn!(user_id, role, "Unknown stored role, reading it as the default");
        UserRole::default()
    })
}

impl From<Model> for OwnerSummary {
    fn from(model: Model) -> Self {
        OwnerSummary {
            id: model.id,
            name: model.nombre,
            email: model.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(role: &str) -> Model {
        Model {
            id: 7,
            nombre: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            hashed_password: "h".to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn test_known_role_is_kept() {
        assert_eq!(User::from(model("admin")).role, UserRole::Admin);
        assert_eq!(User::from(model("guest")).role, UserRole::Guest);
    }

    #[test]
    fn test_unknown_role_reads_as_default() {
        let user = User::from(model("Admin"));
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.id, 7);
    }
}
