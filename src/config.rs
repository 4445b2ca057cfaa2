// Sync configuration, loaded once from the environment at startup
//
// Required: EBAY_CLIENT_ID, EBAY_CLIENT_SECRET, EBAY_REFRESH_TOKEN, EBAY_ITEM_IDS
// Optional: EBAY_ENVIRONMENT, TARGET_QUANTITY, POLL_INTERVAL_MS, EBAY_SITE_ID,
//           EBAY_API_BASE_URL, EBAY_HTTP_TIMEOUT_MS

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_TARGET_QUANTITY: u32 = 3;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 300_000;
// US marketplace
pub const DEFAULT_SITE_ID: u32 = 0;

const REQUIRED_KEYS: [&str; 4] = [
    "EBAY_CLIENT_ID",
    "EBAY_CLIENT_SECRET",
    "EBAY_REFRESH_TOKEN",
    "EBAY_ITEM_IDS",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Sandbox,
    #[default]
    Production,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => "https://api.sandbox.ebay.com",
            Environment::Production => "https://api.ebay.com",
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Environment::Sandbox),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("expected sandbox or production, got {other}")),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Sandbox => write!(f, "sandbox"),
            Environment::Production => write!(f, "production"),
        }
    }
}

// OAuth application credentials. Debug output redacts the secrets.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyncConfig {
    pub credentials: Credentials,
    pub environment: Environment,
    pub item_ids: Vec<String>,
    pub target_quantity: u32,
    pub poll_interval: Duration,
    pub site_id: u32,
    pub base_url_override: Option<String>,
    // None leaves reqwest without a request timeout
    pub http_timeout: Option<Duration>,
}

impl SyncConfig {
    // Read from the process environment, after loading .env if one exists
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // blank counts as unset
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let item_ids: Vec<String> = get("EBAY_ITEM_IDS")
            .map(|raw| parse_item_ids(&raw))
            .unwrap_or_default();

        let missing: Vec<String> = REQUIRED_KEYS
            .iter()
            .filter(|key| match **key {
                "EBAY_ITEM_IDS" => item_ids.is_empty(),
                other => get(other).is_none(),
            })
            .map(|key| key.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let credentials = Credentials {
            client_id: get("EBAY_CLIENT_ID").unwrap_or_default(),
            client_secret: get("EBAY_CLIENT_SECRET").unwrap_or_default(),
            refresh_token: get("EBAY_REFRESH_TOKEN").unwrap_or_default(),
        };

        let environment: Environment =
            parse_optional(&get, "EBAY_ENVIRONMENT")?.unwrap_or_default();
        let target_quantity: u32 =
            parse_optional(&get, "TARGET_QUANTITY")?.unwrap_or(DEFAULT_TARGET_QUANTITY);
        let poll_interval_ms: u64 =
            parse_optional(&get, "POLL_INTERVAL_MS")?.unwrap_or(DEFAULT_POLL_INTERVAL_MS);
        if poll_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "POLL_INTERVAL_MS".to_string(),
                value: "0".to_string(),
                reason: "interval must be greater than zero".to_string(),
            });
        }
        let site_id: u32 = parse_optional(&get, "EBAY_SITE_ID")?.unwrap_or(DEFAULT_SITE_ID);
        let http_timeout =
            parse_optional::<u64, _>(&get, "EBAY_HTTP_TIMEOUT_MS")?.map(Duration::from_millis);

        Ok(Self {
            credentials,
            environment,
            item_ids,
            target_quantity,
            poll_interval: Duration::from_millis(poll_interval_ms),
            site_id,
            base_url_override: get("EBAY_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string()),
            http_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url_override
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
    }

    pub fn token_url(&self) -> String {
        format!("{}/identity/v1/oauth2/token", self.base_url())
    }

    pub fn trading_url(&self) -> String {
        format!("{}/ws/api.dll", self.base_url())
    }
}

pub fn parse_item_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_optional<T, G>(get: &G, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(None),
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::Invalid {
                key: key.to_string(),
                value,
                reason: e.to_string(),
            }),
    }
}
