//! Referential-integrity tests: uniqueness, owner existence and cascade.

mod common;

use cultivos::domain::{CredentialHasher, UserRole};
use cultivos::errors::AppError;
use cultivos::infra::{UnitOfWork, UserPatch};
use cultivos::services::{CultivationService, UserService};
use cultivos::types::{CultivationFilter, ListParams};

use common::{new_cultivation, new_user, setup};

#[tokio::test]
async fn test_users_and_cultivations_lifecycle() {
    let app = setup().await;
    let a = app.create_user("A", "a@x.com").await;
    app.create_user("B", "b@x.com").await;
    app.create_cultivation("Tomato", "vegetable", a).await;

    let owned = app
        .cultivations
        .list_cultivations(ListParams::default(), CultivationFilter::owned_by(a))
        .await
        .unwrap();
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].cultivation.name, "Tomato");

    let orphan = app
        .cultivations
        .create_cultivation(new_cultivation("Corn", "cereal", 9999))
        .await;
    assert!(matches!(orphan, Err(AppError::OwnerNotFound)));

    let duplicate = app.users.create_user(new_user("A again", "a@x.com")).await;
    assert!(matches!(duplicate, Err(AppError::DuplicateEmail)));

    assert!(app.users.delete_user(a).await.unwrap());

    let remaining = app
        .cultivations
        .list_cultivations(ListParams::default(), CultivationFilter::default())
        .await
        .unwrap();
    assert!(remaining.iter().all(|c| c.cultivation.name != "Tomato"));
}

#[tokio::test]
async fn test_delete_user_removes_every_cultivation_it_owns() {
    let app = setup().await;
    let ana = app.create_user("Ana", "ana@x.com").await;
    let bruno = app.create_user("Bruno", "bruno@x.com").await;
    let first = app.create_cultivation("Huerta", "hortaliza", ana).await;
    let second = app.create_cultivation("Viñedo", "frutal", ana).await;
    let kept = app.create_cultivation("Olivar", "frutal", bruno).await;

    assert!(app.users.delete_user(ana).await.unwrap());

    for removed in [first, second] {
        let found = app
            .cultivations
            .get_cultivation(removed.cultivation.id)
            .await
            .unwrap();
        assert!(found.is_none());
    }
    assert_eq!(app.uow.cultivations().count_for_owner(ana).await.unwrap(), 0);
    assert!(app
        .cultivations
        .get_cultivation(kept.cultivation.id)
        .await
        .unwrap()
        .is_some());
    assert!(app.users.get_user(ana).await.unwrap().is_none());
    assert_eq!(app.users.count_users().await.unwrap(), 1);
}

#[tokio::test]
async fn test_freed_email_can_be_reused_after_delete() {
    let app = setup().await;
    let ana = app.create_user("Ana", "ana@x.com").await;
    app.users.delete_user(ana).await.unwrap();

    let again = app.users.create_user(new_user("Ana", "ana@x.com")).await;
    assert!(again.is_ok());
}

#[tokio::test]
async fn test_unique_constraint_backstops_duplicate_email() {
    let app = setup().await;
    app.create_user("Ana", "ana@x.com").await;

    // Bypass the service pre-check and let the unique index reject the row
    let result = app
        .uow
        .transaction(|ctx| {
            Box::pin(async move {
                ctx.users()
                    .create(
                        "Otra".to_string(),
                        "ana@x.com".to_string(),
                        "hash".to_string(),
                        UserRole::User,
                    )
                    .await
            })
        })
        .await;

    assert!(matches!(result, Err(AppError::DuplicateEmail)));
    assert_eq!(app.users.count_users().await.unwrap(), 1);
}

#[tokio::test]
async fn test_unique_constraint_backstops_email_update() {
    let app = setup().await;
    app.create_user("Ana", "ana@x.com").await;
    let bruno = app.create_user("Bruno", "bruno@x.com").await;

    // Bypass the service pre-check on the update path
    let result = app
        .uow
        .transaction(move |ctx| {
            Box::pin(async move {
                let patch = UserPatch {
                    email: Some("ana@x.com".to_string()),
                    ..Default::default()
                };
                ctx.users().update(bruno, patch).await
            })
        })
        .await;

    assert!(matches!(result, Err(AppError::DuplicateEmail)));
    let unchanged = app.users.get_user(bruno).await.unwrap().unwrap();
    assert_eq!(unchanged.user.email, "bruno@x.com");
}

#[tokio::test]
async fn test_large_page_bounds_do_not_overflow() {
    let app = setup().await;
    let ana = app.create_user("Ana", "ana@x.com").await;
    app.create_cultivation("Huerta", "hortaliza", ana).await;

    let huge = ListParams {
        offset: 0,
        limit: u64::MAX,
    };
    let users = app.users.list_users(huge, None).await.unwrap();
    assert_eq!(users.len(), 1);

    let cultivations = app
        .cultivations
        .list_cultivations(huge, CultivationFilter::default())
        .await
        .unwrap();
    assert_eq!(cultivations.len(), 1);

    let skipped = app
        .users
        .list_users(ListParams::new(u64::MAX, 10), None)
        .await
        .unwrap();
    assert!(skipped.is_empty());
}

#[tokio::test]
async fn test_foreign_key_backstops_missing_owner() {
    let app = setup().await;

    // Bypass the service existence check and let the foreign key reject the row
    let result = app
        .uow
        .transaction(|ctx| {
            Box::pin(async move {
                ctx.cultivations()
                    .create(new_cultivation("Huerta", "hortaliza", 9999))
                    .await
            })
        })
        .await;

    assert!(matches!(result, Err(AppError::OwnerNotFound)));
    assert_eq!(app.cultivations.count_cultivations().await.unwrap(), 0);
}

#[tokio::test]
async fn test_stored_credential_is_a_salted_hash() {
    let app = setup().await;
    let ana = app.create_user("Ana", "ana@x.com").await;
    let bruno = app.create_user("Bruno", "bruno@x.com").await;

    let ana_hash = app.uow.users().credential_hash(ana).await.unwrap().unwrap();
    let bruno_hash = app.uow.users().credential_hash(bruno).await.unwrap().unwrap();

    // Same plaintext, different salts
    assert_ne!(ana_hash, "correct horse battery staple");
    assert!(ana_hash.starts_with("$argon2id$"));
    assert_ne!(ana_hash, bruno_hash);

    let hasher = cultivos::domain::Argon2Hasher::new(8, 1, 1).unwrap();
    assert!(hasher
        .verify("correct horse battery staple", &ana_hash)
        .unwrap());
    assert!(!hasher.verify("wrong", &ana_hash).unwrap());
}
