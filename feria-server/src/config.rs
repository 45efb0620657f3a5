//! Booking server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Booking server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file path
    pub database_path: String,
    /// Port the HTTP listener binds
    pub http_port: u16,
    /// Deployment environment (development, staging, production)
    pub environment: String,
    /// Sender address for booking notification mail
    pub ses_from_email: String,
    /// QR issuance service endpoint
    pub qr_service_url: String,
    /// JWT signing secret
    pub jwt_secret: String,
}

impl Config {
    /// Secrets must be set and non-empty outside development; development
    /// gets a placeholder so the server starts without a `.env` file.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let dev = environment == "development";
        match std::env::var(name) {
            Ok(v) if !v.is_empty() => Ok(v),
            _ if dev => Ok(format!("dev-{name}-not-for-production")),
            Ok(_) => Err(format!("{name} is empty, required in {environment}").into()),
            Err(_) => Err(format!("{name} is not set, required in {environment}").into()),
        }
    }

    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = env_or("ENVIRONMENT", "development");

        Ok(Self {
            database_path: env_or("DATABASE_PATH", "feria.db"),
            http_port: env_or("HTTP_PORT", "8080")
                .parse()
                .map_err(|_| "HTTP_PORT must be a port number")?,
            ses_from_email: env_or("SES_FROM_EMAIL", "reservas@feriadellibro.app"),
            qr_service_url: env_or("QR_SERVICE_URL", "https://qr.feriadellibro.app/generate"),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_secret_development_fallback() {
        let val = Config::require_secret("FERIA_TEST_MISSING_SECRET", "development").unwrap();
        assert!(val.contains("not-for-production"));
    }

    #[test]
    fn test_require_secret_production_missing() {
        let err = Config::require_secret("FERIA_TEST_MISSING_SECRET", "production");
        assert!(err.is_err());
    }

    #[test]
    fn test_require_secret_passes_through_set_values() {
        // Env var writes are process-global; use a name no other test reads.
        unsafe { std::env::set_var("FERIA_TEST_SET_SECRET", "s3cret") };
        let val = Config::require_secret("FERIA_TEST_SET_SECRET", "production").unwrap();
        assert_eq!(val, "s3cret");
        unsafe { std::env::remove_var("FERIA_TEST_SET_SECRET") };
    }
}
