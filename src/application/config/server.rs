use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("ONBOARDING_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("ONBOARDING_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            static_dir: PathBuf::from(
                env::var("ONBOARDING_STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
            ),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
