use std::{env, path::PathBuf, str::FromStr};

const DEFAULT_DATABASE_URL: &str = "sqlite://lampy.db?mode=rwc";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_RATE_LIMIT_PER_SECOND: u32 = 20;
const DEFAULT_RATE_LIMIT_BURST: u32 = 50;

/// Environment configuration
/// Loads and validates environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    /// When unset the `/admin` routes accept every caller.
    pub admin_api_key: Option<String>,
    pub max_upload_bytes: usize,
    pub rate_limit_per_second: u32,
    pub rate_limit_burst: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| "JWT_SECRET must be set".to_string())?;

        let upload_dir = env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_UPLOAD_DIR));

        let admin_api_key = env::var("ADMIN_API_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty());

        Ok(Self {
            database_url,
            jwt_secret,
            port: parse_var("PORT", DEFAULT_PORT)?,
            upload_dir,
            admin_api_key,
            max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            rate_limit_per_second: parse_var(
                "RATE_LIMIT_PER_SECOND",
                DEFAULT_RATE_LIMIT_PER_SECOND,
            )?,
            rate_limit_burst: parse_var("RATE_LIMIT_BURST", DEFAULT_RATE_LIMIT_BURST)?,
        })
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, String> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| format!("{} must be a valid number, got {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}
