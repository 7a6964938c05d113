//! Transaction lifecycle tests.

mod support;

use std::time::Duration;

use rust_decimal::Decimal;
use uuid::Uuid;

use common::{AppError, AppResult, Context};
use domain::NewProduct;
use shop_service_lib::infra::UnitOfWork;
use shop_service_lib::repository::ProductRepository;
use shop_service_lib::with_transaction;

use support::{MemoryProducts, MemoryStore};

fn new_product(name: &str) -> NewProduct {
    NewProduct {
        seller_id: Uuid::new_v4(),
        name: name.to_string(),
        price: Decimal::new(500, 2),
        quantity: 1,
        created_at: 1_700_000_000,
    }
}

#[tokio::test]
async fn test_ok_commits_once() {
    let store = MemoryStore::new();

    let id = with_transaction!(store, &Context::background(), |tx| {
        let product = MemoryProducts.add_product(tx, new_product("Desk")).await?;
        Ok(product.id)
    })
    .unwrap();

    assert_eq!(id, 1);
    assert_eq!(store.begins(), 1);
    assert_eq!(store.commits(), 1);
    assert_eq!(store.rollbacks(), 0);
}

#[tokio::test]
async fn test_error_discards_staged_writes() {
    let store = MemoryStore::new();

    let result: AppResult<()> = with_transaction!(store, &Context::background(), |tx| {
        MemoryProducts.add_product(tx, new_product("Desk")).await?;
        MemoryProducts.add_product(tx, new_product("Lamp")).await?;
        Err(AppError::constraint_violation("products_pkey"))
    });

    match result {
        Err(AppError::ConstraintViolation(detail)) => assert_eq!(detail, "products_pkey"),
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(store.commits(), 0);
    assert_eq!(store.rollbacks(), 1);
    assert!(store.committed().products.is_empty());
}

#[tokio::test]
async fn test_each_call_gets_its_own_transaction() {
    let store = MemoryStore::new();
    let ctx = Context::background();

    for name in ["Desk", "Lamp", "Chair"] {
        let product = new_product(name);
        with_transaction!(store, &ctx, |tx| {
            MemoryProducts.add_product(tx, product).await?;
            Ok(())
        })
        .unwrap();
    }

    assert_eq!(store.begins(), 3);
    assert_eq!(store.commits(), 3);
    assert_eq!(store.committed().products.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_call_publishes_nothing() {
    let store = MemoryStore::new();
    store.stall(Duration::from_secs(60));

    let call = async {
        with_transaction!(store, &Context::background(), |tx| {
            MemoryProducts.add_product(tx, new_product("Desk")).await?;
            Ok(())
        })
    };
    let outcome = tokio::time::timeout(Duration::from_millis(10), call).await;

    assert!(outcome.is_err());
    assert_eq!(store.begins(), 1);
    assert_eq!(store.commits(), 0);
    assert!(store.committed().products.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_deadline_bounds_slow_begin() {
    let store = MemoryStore::new();
    store.stall_begin(Duration::from_secs(30));
    let ctx = Context::with_timeout(Duration::from_millis(50));
    let started = tokio::time::Instant::now();

    let result: AppResult<()> = with_transaction!(store, &ctx, |tx| {
        MemoryProducts.add_product(tx, new_product("Desk")).await?;
        Ok(())
    });

    match result {
        Err(AppError::StoreUnavailable(msg)) => assert_eq!(msg, "deadline exceeded"),
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(store.begins(), 0);
    assert_eq!(store.commits(), 0);
    assert_eq!(store.rollbacks(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_expired_context_never_commits() {
    let store = MemoryStore::new();
    let ctx = Context::with_timeout(Duration::from_millis(50));
    tokio::time::advance(Duration::from_millis(100)).await;

    let result: AppResult<()> = with_transaction!(store, &ctx, |tx| {
        MemoryProducts.add_product(tx, new_product("Desk")).await?;
        Ok(())
    });

    assert!(matches!(result, Err(AppError::StoreUnavailable(_))));
    assert_eq!(store.commits(), 0);
    assert_eq!(store.rollbacks(), 1);
    assert!(store.committed().products.is_empty());
}
