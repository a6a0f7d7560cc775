mod common;

use std::sync::Arc;

use backend::errors::domain::DomainError;
use backend::{AppError, ManualClock, RegistrationService};
use rust_decimal::Decimal;
use serial_test::serial;

use common::{flow_service, test_db, two_level_structure, T0};

fn domain_err(err: &AppError) -> &DomainError {
    err.as_domain().expect("domain error")
}

#[tokio::test]
#[serial]
async fn register_links_player_match_and_amount() {
    let db = test_db().await;
    let clock = Arc::new(ManualClock::new(T0));
    let flow = flow_service(&db, clock.clone(), two_level_structure(60));
    let registrations = RegistrationService::new(db.clone(), clock);

    let record = flow.create_match("open-table").await.expect("create");
    let player = registrations.create_player("Carol").await.expect("player");

    let buy_in = registrations
        .register(record.id, player.id, Decimal::new(2500, 2))
        .await
        .expect("register");

    assert_eq!(buy_in.match_id, record.id);
    assert_eq!(buy_in.player_id, player.id);
    assert_eq!(buy_in.amount, Decimal::new(2500, 2));

    let all = registrations
        .buy_ins_of_match(record.id)
        .await
        .expect("list");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, buy_in.id);
}

#[tokio::test]
#[serial]
async fn duplicate_registration_is_rejected() {
    let db = test_db().await;
    let clock = Arc::new(ManualClock::new(T0));
    let flow = flow_service(&db, clock.clone(), two_level_structure(60));
    let registrations = RegistrationService::new(db.clone(), clock);

    let record = flow.create_match("no-doubles").await.expect("create");
    let player = registrations.create_player("Dave").await.expect("player");

    registrations
        .register(record.id, player.id, Decimal::new(1000, 2))
        .await
        .expect("first buy-in");

    let err = registrations
        .register(record.id, player.id, Decimal::new(1000, 2))
        .await
        .expect_err("second buy-in");
    assert!(matches!(domain_err(&err), DomainError::AlreadyRegistered(_)));
}

#[tokio::test]
#[serial]
async fn registration_closes_once_the_match_starts() {
    let db = test_db().await;
    let clock = Arc::new(ManualClock::new(T0));
    let flow = flow_service(&db, clock.clone(), two_level_structure(60));
    let registrations = RegistrationService::new(db.clone(), clock);

    let match_id = common::match_with_two_players(&flow, &registrations, "closing").await;
    flow.start(match_id).await.expect("start");

    let late = registrations.create_player("Late Larry").await.expect("player");
    let err = registrations
        .register(match_id, late.id, Decimal::new(1000, 2))
        .await
        .expect_err("registration closed");
    assert!(matches!(domain_err(&err), DomainError::RegistrationClosed(_)));
}

#[tokio::test]
#[serial]
async fn registering_an_unknown_player_or_match_fails() {
    let db = test_db().await;
    let clock = Arc::new(ManualClock::new(T0));
    let flow = flow_service(&db, clock.clone(), two_level_structure(60));
    let registrations = RegistrationService::new(db.clone(), clock);

    let record = flow.create_match("lonely").await.expect("create");

    let err = registrations
        .register(record.id, 4242, Decimal::new(1000, 2))
        .await
        .expect_err("unknown player");
    assert!(matches!(domain_err(&err), DomainError::NotFound(_, _)));

    let player = registrations.create_player("Eve").await.expect("player");
    let err = registrations
        .register(4242, player.id, Decimal::new(1000, 2))
        .await
        .expect_err("unknown match");
    assert!(matches!(domain_err(&err), DomainError::NotFound(_, _)));
}
