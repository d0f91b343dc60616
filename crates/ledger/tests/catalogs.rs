use ledger::{Ledger, LedgerError, Principal, Role};
use migration::MigratorTrait;
use sea_orm::Database;

async fn ledger_with_db() -> Ledger {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Ledger::new(db)
}

fn admin() -> Principal {
    Principal {
        email: "admin@cantiere.test".to_string(),
        full_name: "Site Admin".to_string(),
        role: Role::Admin,
    }
}

fn clerk() -> Principal {
    Principal {
        email: "amal@cantiere.test".to_string(),
        full_name: "Amal Haddad".to_string(),
        role: Role::User,
    }
}

#[tokio::test]
async fn purchase_kinds_are_admin_curated() {
    let ledger = ledger_with_db().await;

    let err = ledger
        .create_purchase_kind("Cement", "أسمنت", &clerk())
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Forbidden(_)));

    let kind = ledger
        .create_purchase_kind("Cement", "أسمنت", &admin())
        .await
        .unwrap();
    assert_eq!(kind.name, "Cement");
    assert_eq!(kind.created_by.as_deref(), Some("admin@cantiere.test"));

    let listed = ledger.list_purchase_kinds().await.unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn purchase_kind_names_must_be_unique() {
    let ledger = ledger_with_db().await;

    ledger
        .create_purchase_kind("Cement", "أسمنت", &admin())
        .await
        .unwrap();

    // Either column colliding is enough.
    let err = ledger
        .create_purchase_kind("Cement", "different", &admin())
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Duplicate(_)));
    let err = ledger
        .create_purchase_kind("Different", "أسمنت", &admin())
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Duplicate(_)));

    let err = ledger
        .create_purchase_kind(" ", "x", &admin())
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
}

#[tokio::test]
async fn purchase_kind_delete() {
    let ledger = ledger_with_db().await;

    let kind = ledger
        .create_purchase_kind("Steel", "حديد", &admin())
        .await
        .unwrap();

    let err = ledger.delete_purchase_kind(kind.id, &clerk()).await.unwrap_err();
    assert!(matches!(err, LedgerError::Forbidden(_)));

    ledger.delete_purchase_kind(kind.id, &admin()).await.unwrap();
    assert!(ledger.list_purchase_kinds().await.unwrap().is_empty());

    let err = ledger.delete_purchase_kind(kind.id, &admin()).await.unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(_)));
}

#[tokio::test]
async fn work_types_list_alphabetically() {
    let ledger = ledger_with_db().await;

    ledger.create_work_type("Tiling", &admin()).await.unwrap();
    ledger.create_work_type("Electrical", &admin()).await.unwrap();
    ledger.create_work_type("Plumbing", &admin()).await.unwrap();

    let names: Vec<String> = ledger
        .list_work_types()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, ["Electrical", "Plumbing", "Tiling"]);

    let err = ledger.create_work_type("Painting", &clerk()).await.unwrap_err();
    assert!(matches!(err, LedgerError::Forbidden(_)));
}
