use std::env;

/// Datastore connection parameters.
///
/// Nothing here is validated. Missing values end up as empty URL parts and
/// only surface as a connection failure on the first query.
#[derive(Debug, Clone, Default)]
pub struct DatabaseConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: String,
    pub name: String,
    /// Full connection string; takes precedence over the individual parts
    pub url_override: Option<String>,
    /// Apply the schema migration when the server starts
    pub auto_migrate: bool,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            user: env::var("DATABASE_USER").unwrap_or_default(),
            password: env::var("DATABASE_PASSWORD").unwrap_or_default(),
            host: env::var("DATABASE_HOST").unwrap_or_default(),
            port: env::var("DATABASE_PORT").unwrap_or_default(),
            name: env::var("DATABASE_NAME").unwrap_or_default(),
            url_override: env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
            auto_migrate: env::var("DATABASE_AUTO_MIGRATE")
                .map(|v| v.to_lowercase() == "true")
                .unwrap_or(false),
        }
    }

    pub fn database_url(&self) -> String {
        if let Some(url) = &self.url_override {
            return url.clone();
        }

        format!(
            "postgres://{}:{}@{}:{}/{}",
            urlencoding::encode(&self.user),
            urlencoding::encode(&self.password),
            self.host,
            self.port,
            self.name
        )
    }
}
