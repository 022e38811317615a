//! Schema CLI: `cargo run -p migration -- up|down|fresh|status`.
//! Reads `DATABASE_URL` from the environment or `.env`.
use migration::Migrator;
use sea_orm_migration::cli;

#[async_std::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
