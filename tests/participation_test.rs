//! Participation flow integration tests
//!
//! Exercises interest toggling, availability collection and the admin
//! performer roster against a real database, including the lifecycle gate
//! that locks both member-facing writes once an event's date has passed.

mod helpers;

use serial_test::serial;

use helpers::{auth_context_for, create_test_event, create_test_user, TestDatabase};
use StageCrew::models::availability::{SetAvailabilityRequest, Weekday};
use StageCrew::models::user::Role;
use StageCrew::services::{AuthContext, ServiceFactory};
use StageCrew::StageCrewError;

async fn setup() -> (TestDatabase, ServiceFactory) {
    let db = TestDatabase::new().await.expect("test database");
    let services = ServiceFactory::new(db.pool.clone(), &db.settings()).expect("service factory");
    (db, services)
}

#[tokio::test]
#[serial]
async fn test_two_user_availability_scenario() {
    let (db, services) = setup().await;

    let event = create_test_event(&db.pool, "Spring Recital", 1).await;
    let user_a = create_test_user(&db.pool, "Ana", Role::Member).await;
    let user_b = create_test_user(&db.pool, "Boris", Role::Member).await;

    services
        .participation_service
        .set_availability(
            &auth_context_for(&user_a),
            event.id,
            SetAvailabilityRequest {
                days: vec![Weekday::Mon, Weekday::Wed],
            },
        )
        .await
        .expect("user A submission");

    let submission = services
        .participation_service
        .set_availability(
            &auth_context_for(&user_b),
            event.id,
            SetAvailabilityRequest {
                days: vec![Weekday::Mon],
            },
        )
        .await
        .expect("user B submission");

    assert_eq!(submission.tallies.mon, 2);
    assert_eq!(submission.tallies.wed, 1);
    assert_eq!(submission.tallies.tue, 0);
    assert_eq!(submission.tallies.total(), 3);

    // count descending, exactly two entries
    assert_eq!(submission.top_days.len(), 2);
    assert_eq!(submission.top_days[0].weekday, Weekday::Mon);
    assert_eq!(submission.top_days[0].count, 2);
    assert_eq!(submission.top_days[1].weekday, Weekday::Wed);
    assert_eq!(submission.top_days[1].count, 1);

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_availability_resubmission_replaces_days() {
    let (db, services) = setup().await;

    let event = create_test_event(&db.pool, "Summer Gala", 3).await;
    let member = create_test_user(&db.pool, "Cleo", Role::Member).await;
    let ctx = auth_context_for(&member);

    services
        .participation_service
        .set_availability(
            &ctx,
            event.id,
            SetAvailabilityRequest {
                days: vec![Weekday::Fri, Weekday::Sat],
            },
        )
        .await
        .expect("first submission");

    // Second submission replaces the first instead of accumulating
    let submission = services
        .participation_service
        .set_availability(
            &ctx,
            event.id,
            SetAvailabilityRequest {
                days: vec![Weekday::Sun],
            },
        )
        .await
        .expect("second submission");

    assert_eq!(submission.my_days, vec![Weekday::Sun]);
    assert_eq!(submission.tallies.fri, 0);
    assert_eq!(submission.tallies.sat, 0);
    assert_eq!(submission.tallies.sun, 1);

    // Round-trip through the read side
    let view = services
        .participation_service
        .get_availability(&ctx, event.id)
        .await
        .expect("availability read");
    assert_eq!(view.my_days, vec![Weekday::Sun]);
    assert_eq!(view.tallies.sun, 1);

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_duplicate_days_count_once() {
    let (db, services) = setup().await;

    let event = create_test_event(&db.pool, "Open Practice", 2).await;
    let member = create_test_user(&db.pool, "Dana", Role::Member).await;

    let submission = services
        .participation_service
        .set_availability(
            &auth_context_for(&member),
            event.id,
            SetAvailabilityRequest {
                days: vec![Weekday::Tue, Weekday::Tue, Weekday::Mon],
            },
        )
        .await
        .expect("submission with duplicates");

    assert_eq!(submission.my_days, vec![Weekday::Mon, Weekday::Tue]);
    assert_eq!(submission.tallies.tue, 1);
    assert_eq!(submission.tallies.total(), 2);

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_anonymous_reader_sees_tallies_without_my_days() {
    let (db, services) = setup().await;

    let event = create_test_event(&db.pool, "Winter Jam", 5).await;
    let member = create_test_user(&db.pool, "Edda", Role::Member).await;

    services
        .participation_service
        .set_availability(
            &auth_context_for(&member),
            event.id,
            SetAvailabilityRequest {
                days: vec![Weekday::Thu],
            },
        )
        .await
        .expect("member submission");

    let view = services
        .participation_service
        .get_availability(&AuthContext::anonymous(), event.id)
        .await
        .expect("anonymous read");

    assert_eq!(view.tallies.thu, 1);
    assert!(view.my_days.is_empty());

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_interest_toggle_updates_performer_count() {
    let (db, services) = setup().await;

    let event = create_test_event(&db.pool, "Showcase Night", 7).await;
    let first = create_test_user(&db.pool, "Featured Lead", Role::Member).await;
    let second = create_test_user(&db.pool, "Backup Lead", Role::Member).await;

    let status = services
        .participation_service
        .toggle_interest(&auth_context_for(&first), event.id, true)
        .await
        .expect("first toggle");
    assert!(status.interested);
    assert_eq!(status.performer_count, 1);

    let status = services
        .participation_service
        .toggle_interest(&auth_context_for(&second), event.id, true)
        .await
        .expect("second toggle");
    assert_eq!(status.performer_count, 2);

    // Withdrawing drops the count without touching the other row
    let status = services
        .participation_service
        .toggle_interest(&auth_context_for(&first), event.id, false)
        .await
        .expect("withdraw");
    assert!(!status.interested);
    assert_eq!(status.performer_count, 1);

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_past_event_locks_member_writes() {
    let (db, services) = setup().await;

    let past_event = create_test_event(&db.pool, "Last Year's Gala", -1).await;
    let member = create_test_user(&db.pool, "Late Member", Role::Member).await;
    let ctx = auth_context_for(&member);

    let err = services
        .participation_service
        .toggle_interest(&ctx, past_event.id, true)
        .await
        .expect_err("toggle on past event must fail");
    assert!(matches!(err, StageCrewError::EventLocked { .. }));

    let err = services
        .participation_service
        .set_availability(
            &ctx,
            past_event.id,
            SetAvailabilityRequest {
                days: vec![Weekday::Mon],
            },
        )
        .await
        .expect_err("availability on past event must fail");
    assert!(matches!(err, StageCrewError::EventLocked { .. }));

    // No row was written by the rejected toggle
    let view = services
        .participation_service
        .get_availability(&ctx, past_event.id)
        .await
        .expect("read stays possible");
    assert_eq!(view.tallies.total(), 0);
    assert!(view.my_days.is_empty());

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_guest_cannot_participate_regardless_of_date() {
    let (db, services) = setup().await;

    let future_event = create_test_event(&db.pool, "Next Month's Recital", 30).await;
    let guest = create_test_user(&db.pool, "Curious Guest", Role::Guest).await;
    let ctx = auth_context_for(&guest);

    let err = services
        .participation_service
        .toggle_interest(&ctx, future_event.id, true)
        .await
        .expect_err("guest toggle must fail");
    assert!(matches!(err, StageCrewError::PermissionDenied(_)));

    let err = services
        .participation_service
        .set_availability(
            &ctx,
            future_event.id,
            SetAvailabilityRequest {
                days: vec![Weekday::Sat],
            },
        )
        .await
        .expect_err("guest availability must fail");
    assert!(matches!(err, StageCrewError::PermissionDenied(_)));

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_performer_replacement_is_authoritative() {
    let (db, services) = setup().await;

    let event = create_test_event(&db.pool, "Casting Session", 10).await;
    let admin = create_test_user(&db.pool, "Director", Role::Admin).await;
    let u1 = create_test_user(&db.pool, "Alice Performer", Role::Member).await;
    let u2 = create_test_user(&db.pool, "Bob Performer", Role::Member).await;

    let roster = services
        .participation_service
        .set_performers(admin.id, event.id, &[u1.id, u2.id])
        .await
        .expect("first replacement");
    assert_eq!(roster.count, 2);

    // Shrinking the list removes u1 entirely
    let roster = services
        .participation_service
        .set_performers(admin.id, event.id, &[u2.id])
        .await
        .expect("second replacement");
    assert_eq!(roster.count, 1);
    assert_eq!(roster.performers[0].id, u2.id);

    // Same list again is idempotent
    let roster = services
        .participation_service
        .set_performers(admin.id, event.id, &[u2.id])
        .await
        .expect("repeat replacement");
    assert_eq!(roster.count, 1);
    assert_eq!(roster.performers[0].id, u2.id);

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_empty_performer_replacement_clears_roster() {
    let (db, services) = setup().await;

    let event = create_test_event(&db.pool, "Cancelled Number", 4).await;
    let admin = create_test_user(&db.pool, "Director", Role::Admin).await;
    let member = create_test_user(&db.pool, "Keen Member", Role::Member).await;

    // The member opted in on their own first
    services
        .participation_service
        .toggle_interest(&auth_context_for(&member), event.id, true)
        .await
        .expect("self opt-in");

    let roster = services
        .participation_service
        .set_performers(admin.id, event.id, &[])
        .await
        .expect("clearing replacement");

    assert_eq!(roster.count, 0);
    assert!(roster.performers.is_empty());

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_performer_replacement_rejects_unknown_ids() {
    let (db, services) = setup().await;

    let event = create_test_event(&db.pool, "Audition Day", 6).await;
    let admin = create_test_user(&db.pool, "Director", Role::Admin).await;
    let known = create_test_user(&db.pool, "Known Member", Role::Member).await;
    let unknown = uuid::Uuid::new_v4();

    let err = services
        .participation_service
        .set_performers(admin.id, event.id, &[known.id, unknown])
        .await
        .expect_err("unknown id must be rejected");
    assert!(matches!(err, StageCrewError::InvalidInput(_)));

    // The known member was not added either; checks precede writes
    let detail = services
        .event_service
        .get_event_detail(event.id, &auth_context_for(&admin))
        .await
        .expect("event detail");
    assert!(detail.performers.is_empty());

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_event_detail_composite_for_member() {
    let (db, services) = setup().await;

    let event = create_test_event(&db.pool, "Composite Check", 2).await;
    let member = create_test_user(&db.pool, "Viewer", Role::Member).await;
    let ctx = auth_context_for(&member);

    services
        .participation_service
        .toggle_interest(&ctx, event.id, true)
        .await
        .expect("opt in");
    services
        .participation_service
        .set_availability(
            &ctx,
            event.id,
            SetAvailabilityRequest {
                days: vec![Weekday::Mon, Weekday::Fri],
            },
        )
        .await
        .expect("availability");

    let detail = services
        .event_service
        .get_event_detail(event.id, &ctx)
        .await
        .expect("detail");

    assert!(detail.interested);
    assert_eq!(detail.my_days, vec![Weekday::Mon, Weekday::Fri]);
    assert_eq!(detail.performers.len(), 1);
    assert_eq!(detail.tallies.mon, 1);
    assert!(detail.capabilities.can_set_interest);
    assert!(detail.capabilities.can_set_availability);

    // The same detail for an anonymous viewer hides the personal flags
    let anonymous = services
        .event_service
        .get_event_detail(event.id, &AuthContext::anonymous())
        .await
        .expect("anonymous detail");
    assert!(!anonymous.interested);
    assert!(anonymous.my_days.is_empty());
    assert!(!anonymous.capabilities.can_set_interest);

    db.cleanup().await.expect("cleanup");
}
