use std::sync::OnceLock;

use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Session cookie signing key, at least 64 bytes. The default is fine for
    /// local development only.
    #[serde(default = "default_secret_key")]
    pub secret_key: String,
    #[serde(default = "default_session_lifetime_secs")]
    pub session_lifetime_secs: i64,
    #[serde(default)]
    pub secure_cookies: bool,
}

fn default_port() -> u16 {
    4000
}

fn default_database_url() -> String {
    "sqlite.db".into()
}

fn default_secret_key() -> String {
    "insecure-dev-secret-change-me-0123456789abcdef0123456789abcdef01".into()
}

fn default_session_lifetime_secs() -> i64 {
    3600
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Self>().unwrap();

        config
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

pub fn config() -> &'static Config {
    CONFIG.get_or_init(|| Config::from_env())
}
