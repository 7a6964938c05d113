//! Shop Service Library
//!
//! Transactional customer, seller and product use-cases over a PostgreSQL
//! store, plus the database lifecycle and the commands used by the binary.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use tracing::info;

use domain::DeleteCustomerRequest;

use crate::config::ShopServiceConfig;
use crate::infra::Database;
use crate::service::{CustomerService, ProductService, Services};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Connect the pool, apply pending migrations and wire the use-cases.
///
/// The returned `Database` must be closed by the caller once the services
/// are no longer used.
pub async fn bootstrap(config: &ShopServiceConfig) -> CliResult<(Database, Services)> {
    let db = Database::connect(&config.database).await?;

    match Services::from_connection(
        db.get_connection(),
        &config.password_hash,
        config.request_timeout,
    ) {
        Ok(services) => Ok((db, services)),
        Err(e) => {
            db.close().await?;
            Err(e.into())
        }
    }
}

/// Print the active catalogue (for CLI commands).
pub async fn list_products(config: &ShopServiceConfig) -> CliResult<()> {
    let (db, services) = bootstrap(config).await?;
    let result = services.products().get_products(&services.context()).await;
    db.close().await?;

    for product in result? {
        println!("{}\t{}\t{}", product.id, product.name, product.price);
    }
    Ok(())
}

/// Print one product (for CLI commands).
pub async fn show_product(config: &ShopServiceConfig, id: i32) -> CliResult<()> {
    let (db, services) = bootstrap(config).await?;
    let result = services.products().find_product(&services.context(), id).await;
    db.close().await?;

    let product = result?;
    println!("id:         {}", product.id);
    println!("seller:     {}", product.seller_id);
    println!("name:       {}", product.name);
    println!("price:      {}", product.price);
    println!("quantity:   {}", product.quantity);
    println!("created_at: {}", product.created_at);
    if let Some(updated_at) = product.updated_at {
        println!("updated_at: {}", updated_at);
    }
    Ok(())
}

/// Soft delete a customer account (for CLI commands).
pub async fn delete_customer(config: &ShopServiceConfig, email: String) -> CliResult<()> {
    let (db, services) = bootstrap(config).await?;
    let result = services
        .customers()
        .delete_customer(&services.context(), DeleteCustomerRequest { email })
        .await;
    db.close().await?;

    result?;
    info!("Customer deleted");
    Ok(())
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(config: &ShopServiceConfig, action: MigrateAction) -> CliResult<()> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    db.close().await?;
    Ok(())
}

/// Check that the store is reachable (for CLI commands).
pub async fn ping(config: &ShopServiceConfig) -> CliResult<()> {
    let db = Database::connect_without_migrations(&config.database).await?;
    db.ping().await?;
    info!("Database is reachable");

    db.close().await?;
    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
