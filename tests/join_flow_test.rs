//! Join request workflow integration tests
//!
//! Covers the guest application flow, the single-pending rule, and admin
//! review with its promotion side effect.

mod helpers;

use serial_test::serial;

use helpers::{auth_context_for, create_test_user, TestDatabase};
use StageCrew::models::join_request::{JoinRequestStatus, ReviewAction, SubmitJoinRequest};
use StageCrew::models::user::Role;
use StageCrew::services::ServiceFactory;
use StageCrew::StageCrewError;

async fn setup() -> (TestDatabase, ServiceFactory) {
    let db = TestDatabase::new().await.expect("test database");
    let services = ServiceFactory::new(db.pool.clone(), &db.settings()).expect("service factory");
    (db, services)
}

#[tokio::test]
#[serial]
async fn test_guest_submission_creates_pending_request() {
    let (db, services) = setup().await;

    let guest = create_test_user(&db.pool, "Hopeful Guest", Role::Guest).await;

    let outcome = services
        .join_service
        .submit(
            &auth_context_for(&guest),
            SubmitJoinRequest {
                message: Some("I dance lindy hop".to_string()),
            },
        )
        .await
        .expect("submission");

    assert!(outcome.created);
    assert_eq!(outcome.request.user_id, guest.id);
    assert_eq!(outcome.request.status, JoinRequestStatus::Pending);

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_resubmission_returns_existing_pending_request() {
    let (db, services) = setup().await;

    let guest = create_test_user(&db.pool, "Eager Guest", Role::Guest).await;
    let ctx = auth_context_for(&guest);

    let first = services
        .join_service
        .submit(&ctx, SubmitJoinRequest { message: None })
        .await
        .expect("first submission");

    let second = services
        .join_service
        .submit(
            &ctx,
            SubmitJoinRequest {
                message: Some("asking again".to_string()),
            },
        )
        .await
        .expect("second submission");

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.request.id, second.request.id);

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_member_cannot_apply() {
    let (db, services) = setup().await;

    let member = create_test_user(&db.pool, "Existing Member", Role::Member).await;

    let err = services
        .join_service
        .submit(
            &auth_context_for(&member),
            SubmitJoinRequest { message: None },
        )
        .await
        .expect_err("member submission must fail");
    assert!(matches!(err, StageCrewError::InvalidInput(_)));

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_approval_promotes_guest_to_member() {
    let (db, services) = setup().await;

    let admin = create_test_user(&db.pool, "Team Admin", Role::Admin).await;
    let guest = create_test_user(&db.pool, "Promoted Guest", Role::Guest).await;

    let outcome = services
        .join_service
        .submit(&auth_context_for(&guest), SubmitJoinRequest { message: None })
        .await
        .expect("submission");

    let reviewed = services
        .join_service
        .review(admin.id, outcome.request.id, ReviewAction::Approved)
        .await
        .expect("approval");

    assert_eq!(reviewed.request.status, JoinRequestStatus::Approved);
    assert_eq!(reviewed.applicant.id, guest.id);
    assert_eq!(reviewed.applicant.role, Role::Member);

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_rejection_keeps_guest_role() {
    let (db, services) = setup().await;

    let admin = create_test_user(&db.pool, "Team Admin", Role::Admin).await;
    let guest = create_test_user(&db.pool, "Declined Guest", Role::Guest).await;

    let outcome = services
        .join_service
        .submit(&auth_context_for(&guest), SubmitJoinRequest { message: None })
        .await
        .expect("submission");

    let reviewed = services
        .join_service
        .review(admin.id, outcome.request.id, ReviewAction::Rejected)
        .await
        .expect("rejection");

    assert_eq!(reviewed.request.status, JoinRequestStatus::Rejected);
    assert_eq!(reviewed.applicant.role, Role::Guest);

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_repeat_review_rules() {
    let (db, services) = setup().await;

    let admin = create_test_user(&db.pool, "Team Admin", Role::Admin).await;
    let guest = create_test_user(&db.pool, "Reviewed Guest", Role::Guest).await;

    let outcome = services
        .join_service
        .submit(&auth_context_for(&guest), SubmitJoinRequest { message: None })
        .await
        .expect("submission");
    let request_id = outcome.request.id;

    services
        .join_service
        .review(admin.id, request_id, ReviewAction::Approved)
        .await
        .expect("approval");

    // Repeating the same decision is a no-op
    let repeated = services
        .join_service
        .review(admin.id, request_id, ReviewAction::Approved)
        .await
        .expect("repeat approval");
    assert_eq!(repeated.request.status, JoinRequestStatus::Approved);

    // Flipping the decision is rejected
    let err = services
        .join_service
        .review(admin.id, request_id, ReviewAction::Rejected)
        .await
        .expect_err("conflicting review must fail");
    assert!(matches!(err, StageCrewError::InvalidInput(_)));

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_rejected_guest_can_apply_again() {
    let (db, services) = setup().await;

    let admin = create_test_user(&db.pool, "Team Admin", Role::Admin).await;
    let guest = create_test_user(&db.pool, "Persistent Guest", Role::Guest).await;
    let ctx = auth_context_for(&guest);

    let first = services
        .join_service
        .submit(&ctx, SubmitJoinRequest { message: None })
        .await
        .expect("first submission");

    services
        .join_service
        .review(admin.id, first.request.id, ReviewAction::Rejected)
        .await
        .expect("rejection");

    // The pending-uniqueness rule only blocks while a request is open
    let second = services
        .join_service
        .submit(&ctx, SubmitJoinRequest { message: None })
        .await
        .expect("second submission");
    assert!(second.created);
    assert_ne!(first.request.id, second.request.id);

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_list_filters_by_status() {
    let (db, services) = setup().await;

    let admin = create_test_user(&db.pool, "Team Admin", Role::Admin).await;
    let first = create_test_user(&db.pool, "First Guest", Role::Guest).await;
    let second = create_test_user(&db.pool, "Second Guest", Role::Guest).await;

    let first_outcome = services
        .join_service
        .submit(
            &auth_context_for(&first),
            SubmitJoinRequest { message: None },
        )
        .await
        .expect("first submission");
    services
        .join_service
        .submit(
            &auth_context_for(&second),
            SubmitJoinRequest { message: None },
        )
        .await
        .expect("second submission");

    services
        .join_service
        .review(admin.id, first_outcome.request.id, ReviewAction::Approved)
        .await
        .expect("approval");

    let pending = services
        .join_service
        .list(Some(JoinRequestStatus::Pending))
        .await
        .expect("pending list");
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].applicant.id, second.id);

    let all = services.join_service.list(None).await.expect("full list");
    assert_eq!(all.len(), 2);

    db.cleanup().await.expect("cleanup");
}
