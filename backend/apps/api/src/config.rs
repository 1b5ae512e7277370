//! Server Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use account::AccountConfig;
use anyhow::{Context, bail, ensure};
use base64::Engine;
use base64::engine::general_purpose;
use pon::PonConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";
const DEFAULT_MOTD: &str = "Welcome to Coinpon!";

pub struct AppConfig {
    /// Unset runs on the in-memory store
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub motd: String,
    pub account: AccountConfig,
    pub pon: PonConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok(), cfg!(debug_assertions))
    }

    /// `development` allows a random token secret when none is configured
    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        development: bool,
    ) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be a socket address")?;

        let frontend_origins: Vec<String> = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let registrations_enabled = match var("REGISTRATIONS_ENABLED") {
            Some(value) => parse_flag(&value).context("REGISTRATIONS_ENABLED")?,
            None => true,
        };

        let token_secret = match var("TOKEN_SECRET") {
            Some(encoded) => decode_secret(&encoded)?,
            None if development => {
                tracing::warn!("TOKEN_SECRET not set, using a random secret for this run");
                AccountConfig::with_random_secret().token_secret
            }
            None => bail!("TOKEN_SECRET must be set in production"),
        };

        let pons_dir = var("PONS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PonConfig::default().pons_dir);

        Ok(Self {
            database_url: var("DATABASE_URL"),
            bind_addr,
            frontend_origins,
            motd: var("MOTD").unwrap_or_else(|| DEFAULT_MOTD.to_string()),
            account: AccountConfig {
                registrations_enabled,
                token_secret,
                password_pepper: var("PASSWORD_PEPPER").map(String::into_bytes),
            },
            pon: PonConfig::with_pons_dir(pons_dir),
        })
    }
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got {other:?}"),
    }
}

fn decode_secret(encoded: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = general_purpose::STANDARD
        .decode(encoded.trim())
        .context("TOKEN_SECRET must be base64")?;
    ensure!(
        bytes.len() == 32,
        "TOKEN_SECRET must decode to 32 bytes, got {}",
        bytes.len()
    );

    let mut secret = [0u8; 32];
    secret.copy_from_slice(&bytes);
    Ok(secret)
}
