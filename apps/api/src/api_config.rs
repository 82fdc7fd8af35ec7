use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use barberdesk_core::AppError;
use barberdesk_domain::MenuPath;
use barberdesk_infrastructure::JwtVerificationKey;
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
pub struct IdentityConfig {
    pub key: JwtVerificationKey,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

#[derive(Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub cookie_secure: bool,
    pub sign_in_path: MenuPath,
    pub dashboard_dist_dir: PathBuf,
    pub identity: IdentityConfig,
    pub bootstrap_token: Option<String>,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let database_url = required_non_empty_env("DATABASE_URL")?;
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .unwrap_or_else(|_| "false".to_owned())
            .eq_ignore_ascii_case("true");

        let sign_in_path = MenuPath::new(
            env::var("SIGN_IN_PATH").unwrap_or_else(|_| "/sign-in".to_owned()),
        )
        .map_err(|error| AppError::Validation(format!("invalid SIGN_IN_PATH: {error}")))?;

        let dashboard_dist_dir = PathBuf::from(
            env::var("DASHBOARD_DIST_DIR").unwrap_or_else(|_| "./dashboard/dist".to_owned()),
        );

        let bootstrap_token = optional_non_empty_env("AUTH_BOOTSTRAP_TOKEN");

        Ok(Self {
            migrate_only,
            database_url,
            frontend_url,
            api_host,
            api_port,
            cookie_secure,
            sign_in_path,
            dashboard_dist_dir,
            identity: IdentityConfig::load()?,
            bootstrap_token,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

impl IdentityConfig {
    fn load() -> Result<Self, AppError> {
        let algorithm = env::var("IDENTITY_JWT_ALGORITHM").unwrap_or_else(|_| "HS256".to_owned());

        let key = match algorithm.to_ascii_uppercase().as_str() {
            "HS256" => JwtVerificationKey::Hs256Secret(required_non_empty_env(
                "IDENTITY_JWT_SECRET",
            )?),
            // PEM values in .env files usually carry escaped newlines.
            "RS256" => JwtVerificationKey::Rs256PublicKeyPem(
                required_non_empty_env("IDENTITY_JWT_PUBLIC_KEY_PEM")?.replace("\\n", "\n"),
            ),
            other => {
                return Err(AppError::Validation(format!(
                    "IDENTITY_JWT_ALGORITHM must be either 'HS256' or 'RS256', got '{other}'"
                )));
            }
        };

        Ok(Self {
            key,
            issuer: optional_non_empty_env("IDENTITY_JWT_ISSUER"),
            audience: optional_non_empty_env("IDENTITY_JWT_AUDIENCE"),
        })
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

fn optional_non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
