mod config;
mod employees;
mod http;

use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use platform_db::{DatabaseSettings, DbPool, EmployeeRepository, connect};
use platform_obs::{ObsConfig, init_tracing, shutdown_tracing};
use products_hr::{EmployeeDto, EmployeeService, HrError};
use tracing::{info, warn};

use crate::{
    config::AppConfig,
    http::{AppState, ServeConfig},
};

#[derive(Parser, Debug)]
#[command(name = "employee-service", version, about = "Employee records service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server.
    Serve(ServeCommand),
    /// Run database migrations.
    #[command(subcommand)]
    Migrate(MigrateCommand),
    /// Insert demo employees, skipping emails that already exist.
    Seed,
}

#[derive(Subcommand, Debug)]
enum MigrateCommand {
    /// Apply pending migrations.
    Up,
    /// Rollback the most recent migration.
    Down,
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, default_value_t = 8080)]
    port: u16,
    #[arg(long, help = "Allow starting even when migrations are pending")]
    allow_dirty: bool,
}

impl From<ServeCommand> for ServeConfig {
    fn from(value: ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(ObsConfig::default())?;
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Serve(cmd) => run_server(cmd).await,
        Command::Migrate(action) => match action {
            MigrateCommand::Up => migrate_up().await,
            MigrateCommand::Down => migrate_down().await,
        },
        Command::Seed => run_seed().await,
    };
    shutdown_tracing();
    result
}

async fn setup_pool() -> Result<DbPool> {
    let settings = DatabaseSettings::from_env();
    connect(&settings).await.map_err(Into::into)
}

async fn run_server(cmd: ServeCommand) -> Result<()> {
    let config = Arc::new(AppConfig::load()?);
    let pool = setup_pool().await?;
    ensure_migrations(&pool, cmd.allow_dirty).await?;
    let employees = EmployeeService::new(EmployeeRepository::new(pool.clone()));
    let state = AppState {
        pool,
        employees,
        config,
    };
    http::serve(cmd.into(), state).await
}

async fn ensure_migrations(pool: &DbPool, allow_dirty: bool) -> Result<()> {
    let pending = Migrator::get_pending_migrations(pool).await?;
    if !pending.is_empty() {
        if !allow_dirty {
            anyhow::bail!(
                "pending migrations detected; run `cargo run -p server -- migrate up` or pass --allow-dirty"
            );
        }
        warn!(pending = pending.len(), "starting with pending migrations");
    }
    Ok(())
}

async fn migrate_up() -> Result<()> {
    let pool = setup_pool().await?;
    Migrator::up(&pool, None).await?;
    info!("database migrations applied");
    Ok(())
}

async fn migrate_down() -> Result<()> {
    let pool = setup_pool().await?;
    Migrator::down(&pool, Some(1)).await?;
    info!("most recent migration rolled back");
    Ok(())
}

const SEED_EMPLOYEES: &[(&str, &str, &str)] = &[
    ("Ana", "Petrova", "ana.petrova@example.com"),
    ("Ivan", "Horvat", "ivan.horvat@example.com"),
    ("Eva", "Novak", "eva.novak@example.com"),
    ("Marek", "Kral", "marek.kral@example.com"),
];

async fn run_seed() -> Result<()> {
    let pool = setup_pool().await?;
    let service = EmployeeService::new(EmployeeRepository::new(pool));
    let mut created = 0;
    for (first, last, email) in SEED_EMPLOYEES {
        match service.create(EmployeeDto::new(*first, *last, *email)).await {
            Ok(_) => created += 1,
            Err(HrError::Conflict(_)) => info!(email, "seed employee already present"),
            Err(err) => return Err(err.into()),
        }
    }
    info!(created, "seed complete");
    Ok(())
}
