use std::env;
use sea_orm::DatabaseConnection;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub seed_demo_data: bool,
}

/// Process-wide state handed to every handler. Owns the connection pool.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl Config {
    pub fn init() -> Config {
        let server_host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .expect("PORT must be a number");

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "postgres:///blogly".to_string());
        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()
            .expect("DB_MAX_CONNECTIONS must be a number");

        let seed_demo_data = env::var("SEED_DEMO_DATA")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Config {
            server_host,
            server_port,
            database_url,
            db_max_connections,
            seed_demo_data,
        }
    }
}
