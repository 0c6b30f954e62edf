//! User service integration tests.

mod common;

use cultivos::domain::{UserChanges, UserRole};
use cultivos::errors::AppError;
use cultivos::services::UserService;
use cultivos::types::ListParams;

use common::{new_user, setup};

#[tokio::test]
async fn test_list_orders_by_id_and_pages() {
    let app = setup().await;
    let a = app.create_user("Ana", "ana@x.com").await;
    let b = app.create_user("Bruno", "bruno@x.com").await;
    let c = app.create_user("Carla", "carla@x.com").await;

    let all = app.users.list_users(ListParams::default(), None).await.unwrap();
    let ids: Vec<i32> = all.iter().map(|u| u.user.id).collect();
    assert_eq!(ids, vec![a, b, c]);

    let page = app.users.list_users(ListParams::new(1, 1), None).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].user.id, b);

    let past_end = app.users.list_users(ListParams::new(10, 5), None).await.unwrap();
    assert!(past_end.is_empty());
}

#[tokio::test]
async fn test_search_matches_name_or_email() {
    let app = setup().await;
    app.create_user("Ana", "ana@campo.com").await;
    app.create_user("Bruno", "bruno@x.com").await;
    app.create_user("Carla", "carla@campo.com").await;

    let by_email = app
        .users
        .list_users(ListParams::default(), Some("campo".to_string()))
        .await
        .unwrap();
    assert_eq!(by_email.len(), 2);

    let by_name = app
        .users
        .list_users(ListParams::default(), Some("Brun".to_string()))
        .await
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].user.email, "bruno@x.com");

    let empty = app
        .users
        .list_users(ListParams::default(), Some(String::new()))
        .await
        .unwrap();
    assert_eq!(empty.len(), 3);
}

#[tokio::test]
async fn test_list_attaches_each_users_cultivations() {
    let app = setup().await;
    let ana = app.create_user("Ana", "ana@x.com").await;
    let bruno = app.create_user("Bruno", "bruno@x.com").await;
    app.create_cultivation("Huerta", "hortaliza", ana).await;
    app.create_cultivation("Viñedo", "frutal", ana).await;

    let listed = app.users.list_users(ListParams::default(), None).await.unwrap();

    assert_eq!(listed[0].user.id, ana);
    assert_eq!(listed[0].cultivations.len(), 2);
    assert!(listed[0].cultivations.iter().all(|c| c.owner_id == ana));
    assert_eq!(listed[1].user.id, bruno);
    assert!(listed[1].cultivations.is_empty());
}

#[tokio::test]
async fn test_get_user_and_get_by_email() {
    let app = setup().await;
    let id = app.create_user("Ana", "ana@x.com").await;

    let found = app.users.get_user(id).await.unwrap().unwrap();
    assert_eq!(found.user.name, "Ana");
    assert!(found.cultivations.is_empty());

    let by_email = app.users.get_user_by_email("ana@x.com").await.unwrap().unwrap();
    assert_eq!(by_email.id, id);

    assert!(app.users.get_user(id + 100).await.unwrap().is_none());
    assert!(app.users.get_user_by_email("nobody@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_defaults_role_to_user() {
    let app = setup().await;
    let created = app.users.create_user(new_user("Ana", "ana@x.com")).await.unwrap();
    assert_eq!(created.user.role, UserRole::User);

    let mut admin = new_user("Root", "root@x.com");
    admin.role = UserRole::Admin;
    let created = app.users.create_user(admin).await.unwrap();
    assert_eq!(created.user.role, UserRole::Admin);
}

#[tokio::test]
async fn test_duplicate_email_leaves_count_unchanged() {
    let app = setup().await;
    app.create_user("Ana", "ana@x.com").await;

    let result = app.users.create_user(new_user("Otra", "ana@x.com")).await;

    assert!(matches!(result, Err(AppError::DuplicateEmail)));
    assert_eq!(app.users.count_users().await.unwrap(), 1);
}

#[tokio::test]
async fn test_update_email_to_own_value_is_allowed() {
    let app = setup().await;
    let id = app.create_user("Ana", "ana@x.com").await;

    let changes = UserChanges {
        email: Some("ana@x.com".to_string()),
        name: Some("Ana María".to_string()),
        ..Default::default()
    };
    let updated = app.users.update_user(id, changes).await.unwrap().unwrap();

    assert_eq!(updated.user.email, "ana@x.com");
    assert_eq!(updated.user.name, "Ana María");
}

#[tokio::test]
async fn test_update_email_to_taken_value_is_rejected() {
    let app = setup().await;
    let ana = app.create_user("Ana", "ana@x.com").await;
    app.create_user("Bruno", "bruno@x.com").await;

    let changes = UserChanges {
        email: Some("bruno@x.com".to_string()),
        ..Default::default()
    };
    let result = app.users.update_user(ana, changes).await;

    assert!(matches!(result, Err(AppError::DuplicateEmail)));
    let unchanged = app.users.get_user(ana).await.unwrap().unwrap();
    assert_eq!(unchanged.user.email, "ana@x.com");
}

#[tokio::test]
async fn test_update_without_fields_returns_current_state() {
    let app = setup().await;
    let id = app.create_user("Ana", "ana@x.com").await;
    let before = app.users.get_user(id).await.unwrap().unwrap();

    let after = app
        .users
        .update_user(id, UserChanges::default())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(before, after);
}

#[tokio::test]
async fn test_update_role_only_touches_role() {
    let app = setup().await;
    let id = app.create_user("Ana", "ana@x.com").await;

    let changes = UserChanges {
        role: Some(UserRole::Guest),
        ..Default::default()
    };
    let updated = app.users.update_user(id, changes).await.unwrap().unwrap();

    assert_eq!(updated.user.role, UserRole::Guest);
    assert_eq!(updated.user.name, "Ana");
    assert_eq!(updated.user.email, "ana@x.com");
}

#[tokio::test]
async fn test_missing_user_update_and_delete() {
    let app = setup().await;

    let changes = UserChanges {
        email: Some("x@x.com".to_string()),
        ..Default::default()
    };
    assert!(app.users.update_user(404, changes).await.unwrap().is_none());
    assert!(!app.users.delete_user(404).await.unwrap());
}
