mod common;

use campus_attendance::{
    error::AppError,
    services::{admin_service, auth_service},
};
use common::pool;

const COST: u32 = common::TEST_COST;

#[tokio::test]
async fn email_is_unique_on_create() {
    let pool = pool().await;
    admin_service::create_admin(&pool, "a@campus.edu", "secret1", None, COST).await.unwrap();
    let err = admin_service::create_admin(&pool, "a@campus.edu", "secret2", None, COST)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn update_email_conflicts_only_with_other_admins() {
    let pool = pool().await;
    let a = admin_service::create_admin(&pool, "a@campus.edu", "secret1", None, COST).await.unwrap();
    admin_service::create_admin(&pool, "b@campus.edu", "secret1", None, COST).await.unwrap();

    let err = admin_service::update_admin(&pool, a, "b@campus.edu", None, None, COST)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    admin_service::update_admin(&pool, a, "a@campus.edu", None, Some("Registrar"), COST)
        .await
        .unwrap();
    let stored = admin_service::find_admin_by_id(&pool, a).await.unwrap().unwrap();
    assert_eq!(stored.email, "a@campus.edu");
    assert_eq!(stored.name, "Registrar");
}

#[tokio::test]
async fn update_missing_admin_is_not_found() {
    let pool = pool().await;
    let err = admin_service::update_admin(&pool, 42, "x@campus.edu", None, None, COST)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn password_is_hashed_and_kept_unless_replaced() {
    let pool = pool().await;
    let id = admin_service::create_admin(&pool, "a@campus.edu", "secret1", None, COST).await.unwrap();

    let stored = admin_service::find_admin_by_id(&pool, id).await.unwrap().unwrap();
    assert_ne!(stored.password_hash, "secret1");
    assert_eq!(stored.name, "a");

    admin_service::update_admin(&pool, id, "a@campus.edu", None, None, COST).await.unwrap();
    assert!(auth_service::authenticate(&pool, "a@campus.edu", "secret1").await.is_ok());

    admin_service::update_admin(&pool, id, "a@campus.edu", Some("changed9"), None, COST)
        .await
        .unwrap();
    let old = auth_service::authenticate(&pool, "a@campus.edu", "secret1").await;
    assert!(matches!(old, Err(AppError::InvalidCredentials)));
    assert!(auth_service::authenticate(&pool, "a@campus.edu", "changed9").await.is_ok());
}

#[tokio::test]
async fn delete_reports_removal() {
    let pool = pool().await;
    let id = admin_service::create_admin(&pool, "a@campus.edu", "secret1", None, COST).await.unwrap();
    assert!(admin_service::delete_admin(&pool, id).await.unwrap());
    assert!(!admin_service::delete_admin(&pool, id).await.unwrap());
    assert!(admin_service::find_all_admins(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn bootstrap_admin_is_created_once() {
    let pool = pool().await;
    admin_service::ensure_bootstrap_admin(&pool, "root@campus.edu", "rootpass", COST).await.unwrap();
    admin_service::ensure_bootstrap_admin(&pool, "root@campus.edu", "rootpass", COST).await.unwrap();
    assert_eq!(admin_service::find_all_admins(&pool).await.unwrap().len(), 1);
}
