use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: IpAddr,
    pub port: u16,
    pub base_url: String,
    pub site_name: String,
    pub max_body_size: usize,
    pub log_level: String,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub from: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;
        let jwt_secret = env_required("JWT_SECRET")?;

        let host: IpAddr = env_or("YOURTABLE_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid YOURTABLE_HOST: {e}"))?;

        let port: u16 = env_or("YOURTABLE_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid YOURTABLE_PORT: {e}"))?;

        let base_url = env_or("YOURTABLE_BASE_URL", &format!("http://{host}:{port}"));

        let site_name = env_or("YOURTABLE_SITE_NAME", "YourTable");

        let max_body_size: usize = env_or("YOURTABLE_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid YOURTABLE_MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("YOURTABLE_LOG_LEVEL", "info");

        let smtp = match (
            std::env::var("YOURTABLE_SMTP_HOST").ok(),
            std::env::var("YOURTABLE_SMTP_PORT").ok(),
            std::env::var("YOURTABLE_SMTP_USER").ok(),
            std::env::var("YOURTABLE_SMTP_PASS").ok(),
            std::env::var("YOURTABLE_SMTP_FROM").ok(),
        ) {
            (Some(host), Some(port), Some(user), Some(pass), Some(from)) => Some(SmtpConfig {
                host,
                port: port
                    .parse()
                    .map_err(|e| format!("Invalid YOURTABLE_SMTP_PORT: {e}"))?,
                user,
                pass,
                from,
            }),
            _ => None,
        };

        Ok(Config {
            database_url,
            jwt_secret,
            host,
            port,
            base_url,
            site_name,
            max_body_size,
            log_level,
            smtp,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
