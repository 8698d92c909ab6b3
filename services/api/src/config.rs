//! Service configuration

use std::env;
use std::path::PathBuf;

/// HTTP boundary configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the listener binds to
    pub bind_addr: String,
    /// Allowed cross-origin hosts; `*` allows any origin
    pub cors_origins: Vec<String>,
    /// Directory served at /uploads
    pub upload_dir: PathBuf,
}

impl AppConfig {
    /// Create a new AppConfig from environment variables
    ///
    /// # Environment Variables
    /// - `BIND_ADDR`: listener address (default: 0.0.0.0:8000)
    /// - `CORS_ORIGINS`: comma-separated origins (default: `*`)
    /// - `UPLOAD_DIR`: static uploads directory (default: `uploads`)
    pub fn from_env() -> Self {
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let upload_dir = env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads"));

        AppConfig {
            bind_addr,
            cors_origins,
            upload_dir,
        }
    }

    /// Whether any origin is allowed
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|origin| origin == "*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults() {
        unsafe {
            env::remove_var("BIND_ADDR");
            env::remove_var("CORS_ORIGINS");
            env::remove_var("UPLOAD_DIR");
        }

        let config = AppConfig::from_env();
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert!(config.allows_any_origin());
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
    }

    #[test]
    #[serial]
    fn test_explicit_origins() {
        unsafe { env::set_var("CORS_ORIGINS", "https://a.example, https://b.example") };
        let config = AppConfig::from_env();
        assert!(!config.allows_any_origin());
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example", "https://b.example"]
        );
        unsafe { env::remove_var("CORS_ORIGINS") };
    }
}
