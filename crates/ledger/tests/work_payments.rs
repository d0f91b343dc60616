use chrono::{TimeZone, Utc};
use ledger::{
    Ledger, LedgerError, Money, PaymentFilter, Principal, Role, WorkPaymentDraft,
    WorkProjectDraft,
};
use migration::MigratorTrait;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

async fn ledger_with_db() -> (Ledger, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    (Ledger::new(db.clone()), db)
}

fn foreman() -> Principal {
    Principal {
        email: "karim@cantiere.test".to_string(),
        full_name: "Karim Nasser".to_string(),
        role: Role::User,
    }
}

async fn seed_project(ledger: &Ledger, name: &str, duplex: i32, total_minor: i64) -> i64 {
    ledger
        .create_work_project(
            WorkProjectDraft {
                name: name.to_string(),
                total_price: Money::from_minor(total_minor),
                duration_days: Some(30),
                start_date: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
                notes: None,
                duplex_number: duplex,
            },
            &foreman(),
        )
        .await
        .unwrap()
        .id
}

fn payment(project_id: i64, duplex: i32, day: u32, amount_minor: i64) -> WorkPaymentDraft {
    WorkPaymentDraft {
        project_id,
        amount: Money::from_minor(amount_minor),
        paid_on: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
        notes: None,
        duplex_number: duplex,
    }
}

fn paths(items: &[&str]) -> Vec<String> {
    items.iter().map(|p| p.to_string()).collect()
}

async fn attachment_count(db: &DatabaseConnection, payment_id: i64) -> i64 {
    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_sql_and_values(
            backend,
            "SELECT COUNT(*) AS n FROM payment_attachments WHERE payment_id = ?",
            [payment_id.into()],
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get::<i64>("", "n").unwrap()
}

#[tokio::test]
async fn create_requires_an_existing_project() {
    let (ledger, _db) = ledger_with_db().await;

    let err = ledger
        .create_work_payment(payment(42, 3, 1, 100_00), &[], &foreman())
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(_)));
}

#[tokio::test]
async fn create_stamps_principal_email() {
    let (ledger, _db) = ledger_with_db().await;
    let project_id = seed_project(&ledger, "Tiling", 3, 5000_00).await;

    let created = ledger
        .create_work_payment(
            payment(project_id, 3, 1, 750_00),
            &paths(&["receipt.pdf"]),
            &foreman(),
        )
        .await
        .unwrap();

    assert_eq!(created.created_by, "karim@cantiere.test");
    assert_eq!(created.project_name.as_deref(), Some("Tiling - duplex(3)"));
    assert_eq!(created.attachment_paths, paths(&["receipt.pdf"]));
    assert_eq!(created.updated_at, created.created_at);
}

#[tokio::test]
async fn duplicate_project_amount_day_is_rejected() {
    let (ledger, _db) = ledger_with_db().await;
    let project_id = seed_project(&ledger, "Plumbing", 2, 9000_00).await;
    let other_project = seed_project(&ledger, "Wiring", 2, 4000_00).await;

    ledger
        .create_work_payment(payment(project_id, 2, 10, 500_00), &[], &foreman())
        .await
        .unwrap();

    // Same project, amount and day at another hour collides.
    let mut later = payment(project_id, 2, 10, 500_00);
    later.paid_on = Utc.with_ymd_and_hms(2024, 3, 10, 18, 45, 0).unwrap();
    let err = ledger
        .create_work_payment(later, &[], &foreman())
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Duplicate(_)));

    // A different amount, day or project passes.
    ledger
        .create_work_payment(payment(project_id, 2, 10, 600_00), &[], &foreman())
        .await
        .unwrap();
    ledger
        .create_work_payment(payment(project_id, 2, 11, 500_00), &[], &foreman())
        .await
        .unwrap();
    ledger
        .create_work_payment(payment(other_project, 2, 10, 500_00), &[], &foreman())
        .await
        .unwrap();
}

#[tokio::test]
async fn update_overwrites_creator_and_reconciles() {
    let (ledger, db) = ledger_with_db().await;
    let project_id = seed_project(&ledger, "Painting", 6, 3000_00).await;

    let created = ledger
        .create_work_payment(
            payment(project_id, 6, 5, 400_00),
            &paths(&["r1.pdf", "r2.pdf"]),
            &foreman(),
        )
        .await
        .unwrap();

    let updated = ledger
        .update_work_payment(
            created.id,
            payment(project_id, 6, 6, 450_00),
            &paths(&["r2.pdf", "r3.pdf"]),
            "site-office@cantiere.test",
        )
        .await
        .unwrap();

    assert_eq!(updated.amount, Money::from_minor(450_00));
    // The payment path overwrites created_by with the caller-supplied
    // value; purchases never do.
    assert_eq!(updated.created_by, "site-office@cantiere.test");
    assert!(updated.updated_at > updated.created_at);
    assert_eq!(updated.attachment_paths, paths(&["r2.pdf", "r3.pdf"]));
    assert_eq!(attachment_count(&db, created.id).await, 2);
}

#[tokio::test]
async fn missing_targets_return_not_found() {
    let (ledger, _db) = ledger_with_db().await;
    let project_id = seed_project(&ledger, "Roofing", 4, 2000_00).await;

    let err = ledger
        .update_work_payment(999, payment(project_id, 4, 1, 10_00), &[], "x@y.test")
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(_)));

    let err = ledger.delete_work_payment(999).await.unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(_)));
}

#[tokio::test]
async fn delete_cascades_to_attachments() {
    let (ledger, db) = ledger_with_db().await;
    let project_id = seed_project(&ledger, "Masonry", 8, 7000_00).await;

    let created = ledger
        .create_work_payment(
            payment(project_id, 8, 3, 900_00),
            &paths(&["m1.pdf", "m2.pdf", "m3.pdf"]),
            &foreman(),
        )
        .await
        .unwrap();
    assert_eq!(attachment_count(&db, created.id).await, 3);

    ledger.delete_work_payment(created.id).await.unwrap();

    assert_eq!(attachment_count(&db, created.id).await, 0);
    assert!(matches!(
        ledger.work_payment(created.id).await.unwrap_err(),
        LedgerError::NotFound(_)
    ));
}

#[tokio::test]
async fn project_rollup_may_go_negative() {
    let (ledger, _db) = ledger_with_db().await;
    let project_id = seed_project(&ledger, "Excavation", 1, 5000_00).await;

    ledger
        .create_work_payment(payment(project_id, 1, 2, 2000_00), &[], &foreman())
        .await
        .unwrap();
    ledger
        .create_work_payment(payment(project_id, 1, 9, 4000_00), &[], &foreman())
        .await
        .unwrap();

    let summary = ledger.work_project(project_id).await.unwrap();
    assert_eq!(summary.total_paid, Money::from_minor(6000_00));
    // Overpayment is surfaced, not blocked.
    assert_eq!(summary.remaining, Money::from_minor(-1000_00));
    assert!(summary.remaining.is_negative());
}

#[tokio::test]
async fn list_filters_by_project_and_duplex() {
    let (ledger, _db) = ledger_with_db().await;
    let first = seed_project(&ledger, "Tiling", 3, 5000_00).await;
    let second = seed_project(&ledger, "Tiling", 4, 5000_00).await;

    ledger
        .create_work_payment(payment(first, 3, 1, 100_00), &[], &foreman())
        .await
        .unwrap();
    ledger
        .create_work_payment(payment(second, 4, 2, 200_00), &[], &foreman())
        .await
        .unwrap();

    let by_project = ledger
        .list_work_payments(&PaymentFilter {
            project_id: Some(first),
            duplex_number: None,
        })
        .await
        .unwrap();
    assert_eq!(by_project.len(), 1);
    assert_eq!(by_project[0].duplex_number, 3);

    let by_duplex = ledger
        .list_work_payments(&PaymentFilter {
            project_id: None,
            duplex_number: Some(4),
        })
        .await
        .unwrap();
    assert_eq!(by_duplex.len(), 1);
    assert_eq!(by_duplex[0].amount, Money::from_minor(200_00));

    let payments = ledger.project_payments(first).await.unwrap();
    assert_eq!(payments.len(), 1);

    let err = ledger.project_payments(999).await.unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(_)));
}
