//! Cultivations command - Cultivation administration.

use serde_json::{json, Value};

use super::{list_params, print_json, validate};
use crate::cli::args::{CultivationAction, CultivationsArgs};
use crate::config::Config;
use crate::domain::{CultivationChanges, NewCultivation};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::services::{ServiceContainer, Services};
use crate::types::CultivationFilter;

/// Execute the cultivations command
pub async fn execute(args: CultivationsArgs, config: Config) -> AppResult<()> {
    let services = Services::connect(&config).await?;
    let output = run(args.action, &services, &config).await?;
    print_json(&output)
}

/// Run one cultivation action and return its JSON rendering
pub async fn run(
    action: CultivationAction,
    services: &dyn ServiceContainer,
    config: &Config,
) -> AppResult<Value> {
    let cultivations = services.cultivations();

    match action {
        CultivationAction::List { page, owner, query } => {
            let filter = CultivationFilter {
                owner_id: owner,
                query,
            };
            let listed = cultivations
                .list_cultivations(list_params(page, config), filter)
                .await?;
            to_json(&listed)
        }
        CultivationAction::Get { id } => {
            let found = cultivations.get_cultivation(id).await?.ok_or_not_found()?;
            to_json(&found)
        }
        CultivationAction::Create {
            name,
            kind,
            description,
            owner,
        } => {
            let input = NewCultivation {
                name,
                kind,
                description,
                owner_id: owner,
            };
            validate(&input)?;

            let created = cultivations.create_cultivation(input).await?;
            to_json(&created)
        }
        CultivationAction::Update {
            id,
            name,
            kind,
            description,
            clear_description,
            owner,
        } => {
            let description = if clear_description {
                Some(None)
            } else {
                description.map(Some)
            };
            let changes = CultivationChanges {
                name,
                kind,
                description,
                owner_id: owner,
            };
            validate(&changes)?;

            let updated = cultivations
                .update_cultivation(id, changes)
                .await?
                .ok_or_not_found()?;
            to_json(&updated)
        }
        CultivationAction::Delete { id } => {
            if !cultivations.delete_cultivation(id).await? {
                return Err(AppError::NotFound);
            }
            Ok(json!({ "deleted": id }))
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> AppResult<Value> {
    serde_json::to_value(value).map_err(|e| AppError::internal(e.to_string()))
}
