use std::env;

use crate::shared::api::OutputFormat;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// Request-handling settings for the public facilities API
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Keys accepted by the API-key gate
    pub api_keys: Vec<String>,
    /// Number of records per page on paginated endpoints
    pub page_limit: i64,
    /// Output formats a client may request through `output`
    pub output_formats: Vec<OutputFormat>,
    /// Format used when `output` is absent
    pub default_output: OutputFormat,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            api: ApiConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        let cors_allowed_origins = split_list(
            &env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
        );

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl ApiConfig {
    const DEFAULT_PAGE_LIMIT: i64 = 100;
    const DEFAULT_OUTPUT_FORMATS: &'static str = "json,xml,geojson";

    pub fn from_env() -> Result<Self, String> {
        let api_keys = split_list(&env::var("API_KEYS").unwrap_or_default());
        if api_keys.is_empty() {
            return Err("API_KEYS must contain at least one key".to_string());
        }

        let page_limit = env::var("API_PAGE_LIMIT")
            .unwrap_or_else(|_| Self::DEFAULT_PAGE_LIMIT.to_string())
            .parse::<i64>()
            .map_err(|_| "API_PAGE_LIMIT must be a valid number".to_string())?;

        let output_formats = split_list(
            &env::var("API_OUTPUT_FORMATS")
                .unwrap_or_else(|_| Self::DEFAULT_OUTPUT_FORMATS.to_string()),
        )
        .iter()
        .map(|s| {
            s.parse::<OutputFormat>()
                .map_err(|_| format!("API_OUTPUT_FORMATS contains unknown format '{}'", s))
        })
        .collect::<Result<Vec<_>, _>>()?;

        let default_output = env::var("API_DEFAULT_OUTPUT")
            .unwrap_or_else(|_| OutputFormat::default().to_string())
            .parse::<OutputFormat>()
            .map_err(|_| "API_DEFAULT_OUTPUT must be json, xml or geojson".to_string())?;

        let config = Self {
            api_keys,
            page_limit,
            output_formats,
            default_output,
        };
        config.check()?;
        Ok(config)
    }

    /// Reject combinations the negotiator and paginator cannot work with
    pub fn check(&self) -> Result<(), String> {
        if self.page_limit < 1 {
            return Err("API_PAGE_LIMIT must be at least 1".to_string());
        }
        if !self.output_formats.contains(&self.default_output) {
            return Err(format!(
                "API_DEFAULT_OUTPUT '{}' is not listed in API_OUTPUT_FORMATS",
                self.default_output
            ));
        }
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_keys: Vec::new(),
            page_limit: Self::DEFAULT_PAGE_LIMIT,
            output_formats: OutputFormat::ALL.to_vec(),
            default_output: OutputFormat::default(),
        }
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Healthsites API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "2.0.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Facilities API with JSON, GeoJSON and XML output".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_trims_and_skips_empty() {
        assert_eq!(split_list(" a, b ,,c "), vec!["a", "b", "c"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_api_config_default_is_valid() {
        let config = ApiConfig::default();
        assert_eq!(config.page_limit, 100);
        assert_eq!(config.default_output, OutputFormat::Json);
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_api_config_rejects_default_outside_allowed() {
        let config = ApiConfig {
            output_formats: vec![OutputFormat::Xml],
            ..ApiConfig::default()
        };
        assert!(config.check().is_err());
    }

    #[test]
    fn test_api_config_rejects_zero_limit() {
        let config = ApiConfig {
            page_limit: 0,
            ..ApiConfig::default()
        };
        assert!(config.check().is_err());
    }
}
