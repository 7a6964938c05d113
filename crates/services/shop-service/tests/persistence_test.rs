//! SeaORM unit of work tests using the mock database backend.

use std::io;

use sea_orm::{
    DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, MockExecResult, RuntimeErr,
    SqlxError,
};

use common::{AppError, AppResult, Context};
use shop_service_lib::infra::{Persistence, UnitOfWork};
use shop_service_lib::repository::{CustomerRepository, CustomerStore};
use shop_service_lib::with_transaction;

fn statements(db: DatabaseConnection) -> Vec<String> {
    db.into_transaction_log()
        .into_iter()
        .flat_map(|tx| tx.statements().to_vec())
        .map(|stmt| stmt.sql)
        .collect()
}

#[tokio::test]
async fn test_ok_commits() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let uow = Persistence::new(db.clone());

    with_transaction!(uow, &Context::background(), |tx| {
        CustomerStore.delete_customer(tx, "a@x.com", 1_700_000_900).await
    })
    .unwrap();

    let sql = statements(db);
    assert_eq!(sql.first().map(String::as_str), Some("BEGIN"));
    assert!(sql.iter().any(|s| s.starts_with("UPDATE")));
    assert_eq!(sql.last().map(String::as_str), Some("COMMIT"));
    assert!(!sql.iter().any(|s| s == "ROLLBACK"));
}

#[tokio::test]
async fn test_err_rolls_back() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let uow = Persistence::new(db.clone());

    let result: AppResult<()> = with_transaction!(uow, &Context::background(), |_tx| {
        Err(AppError::validation("Name is required"))
    });

    assert!(matches!(result, Err(AppError::Validation(_))));
    let sql = statements(db);
    assert_eq!(sql, vec!["BEGIN".to_string(), "ROLLBACK".to_string()]);
}

#[tokio::test]
async fn test_connection_loss_rolls_back_as_store_unavailable() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Query(RuntimeErr::SqlxError(SqlxError::Io(
            io::Error::from(io::ErrorKind::ConnectionReset),
        )))])
        .into_connection();
    let uow = Persistence::new(db.clone());

    let result = with_transaction!(uow, &Context::background(), |tx| {
        CustomerStore.login_customer(tx, "a@x.com").await
    });

    assert!(matches!(result, Err(AppError::StoreUnavailable(_))));
    let sql = statements(db);
    assert_eq!(sql.first().map(String::as_str), Some("BEGIN"));
    assert_eq!(sql.last().map(String::as_str), Some("ROLLBACK"));
    assert!(!sql.iter().any(|s| s == "COMMIT"));
}

#[tokio::test]
async fn test_begin_failure_is_store_unavailable() {
    let uow = Persistence::new(DatabaseConnection::Disconnected);

    let result: AppResult<()> =
        with_transaction!(uow, &Context::background(), |_tx| { Ok(()) });

    assert!(matches!(result, Err(AppError::StoreUnavailable(_))));
}
