//! Users command - User administration.

use serde_json::{json, Value};

use super::{list_params, print_json, validate};
use crate::cli::args::{UserAction, UsersArgs};
use crate::config::Config;
use crate::domain::{NewUser, UserChanges, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::services::{ServiceContainer, Services};

/// Execute the users command
pub async fn execute(args: UsersArgs, config: Config) -> AppResult<()> {
    let services = Services::connect(&config).await?;
    let output = run(args.action, &services, &config).await?;
    print_json(&output)
}

/// Run one user action and return its JSON rendering
pub async fn run(
    action: UserAction,
    services: &dyn ServiceContainer,
    config: &Config,
) -> AppResult<Value> {
    let users = services.users();

    match action {
        UserAction::List { page, search } => {
            let listed = users.list_users(list_params(page, config), search).await?;
            to_json(&listed)
        }
        UserAction::Get { id, email } => match (id, email) {
            (_, Some(email)) => {
                let user = users.get_user_by_email(&email).await?.ok_or_not_found()?;
                to_json(&user)
            }
            (Some(id), None) => {
                let user = users.get_user(id).await?.ok_or_not_found()?;
                to_json(&user)
            }
            (None, None) => Err(AppError::validation("Either an ID or --email is required")),
        },
        UserAction::Create {
            name,
            email,
            password,
            role,
        } => {
            let input = NewUser {
                name,
                email,
                password,
                role: parse_role(role)?.unwrap_or_default(),
            };
            validate(&input)?;

            let created = users.create_user(input).await?;
            to_json(&created)
        }
        UserAction::Update {
            id,
            name,
            email,
            password,
            role,
        } => {
            let changes = UserChanges {
                name,
                email,
                password,
                role: parse_role(role)?,
            };
            validate(&changes)?;

            let updated = users.update_user(id, changes).await?.ok_or_not_found()?;
            to_json(&updated)
        }
        UserAction::Delete { id } => {
            if !users.delete_user(id).await? {
                return Err(AppError::NotFound);
            }
            Ok(json!({ "deleted": id }))
        }
    }
}

fn parse_role(role: Option<String>) -> AppResult<Option<UserRole>> {
    role.map(|r| r.parse()).transpose()
}

fn to_json<T: serde::Serialize>(value: &T) -> AppResult<Value> {
    serde_json::to_value(value).map_err(|e| AppError::internal(e.to_string()))
}
