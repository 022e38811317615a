pub mod demo_seeder;

use sea_orm::DatabaseConnection;

pub async fn run_seeders(db: &DatabaseConnection) -> Result<(), String> {
    demo_seeder::seed_demo_data(db).await.map_err(|e| e.to_string())?;
    Ok(())
}
