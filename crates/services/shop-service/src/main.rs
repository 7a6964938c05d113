//! Shop Service - database maintenance and catalogue CLI.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use shop_service_lib::config::ShopServiceConfig;
use shop_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "shop-service")]
#[command(about = "Customer and product store service")]
struct Cli {
    /// Force debug logging regardless of RUST_LOG
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// Check database connectivity
    Ping,
    /// Inspect the product catalogue
    Products {
        #[command(subcommand)]
        action: ProductCommands,
    },
    /// Manage customer accounts
    Customers {
        #[command(subcommand)]
        action: CustomerCommands,
    },
}

#[derive(Subcommand)]
enum ProductCommands {
    /// List active products
    List,
    /// Show one product
    Show {
        /// Product id
        id: i32,
    },
}

#[derive(Subcommand)]
enum CustomerCommands {
    /// Soft delete a customer
    Delete {
        /// Email of the customer
        #[arg(long)]
        email: String,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Loads .env before anything reads the environment
    let config = ShopServiceConfig::from_env();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            shop_service_lib::run_migrations(&config, migrate_action).await?;
        }
        Commands::Ping => {
            shop_service_lib::ping(&config).await?;
        }
        Commands::Products { action } => match action {
            ProductCommands::List => shop_service_lib::list_products(&config).await?,
            ProductCommands::Show { id } => shop_service_lib::show_product(&config, id).await?,
        },
        Commands::Customers { action } => match action {
            CustomerCommands::Delete { email } => {
                shop_service_lib::delete_customer(&config, email).await?
            }
        },
    }

    Ok(())
}
