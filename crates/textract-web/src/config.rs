//! Runtime settings, resolved from defaults, TOML config files, the
//! environment and command-line flags (in increasing precedence).

use std::path::PathBuf;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use textract_core::ConfigFile;

pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
/// Allow large file uploads (500MB)
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 500;
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &["http://localhost:5173"];

pub const ENV_PORT: &str = "PORT";
pub const ENV_UPLOAD_DIR: &str = "TEXTRACT_UPLOAD_DIR";
pub const ENV_ALLOWED_ORIGINS: &str = "TEXTRACT_ALLOWED_ORIGINS";
pub const ENV_MAX_UPLOAD_MB: &str = "TEXTRACT_MAX_UPLOAD_MB";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub port: u16,
    pub upload_dir: PathBuf,
    pub max_upload_mb: u64,
    pub allowed_origins: Vec<String>,
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub port: Option<u16>,
    pub upload_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            max_upload_mb: DEFAULT_MAX_UPLOAD_MB,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|o| o.to_string())
                .collect(),
        }
    }
}

impl Settings {
    /// Resolve settings using the process environment.
    pub fn from_environment(file: &ConfigFile, overrides: &Overrides) -> Self {
        Self::resolve(file, |key| std::env::var(key).ok(), overrides)
    }

    /// Resolve settings from a config file, an environment lookup and
    /// command-line overrides.
    pub fn resolve(
        file: &ConfigFile,
        env: impl Fn(&str) -> Option<String>,
        overrides: &Overrides,
    ) -> Self {
        let mut settings = Self::default();

        if let Some(server) = &file.server {
            if let Some(port) = server.port {
                settings.port = port;
            }
            if let Some(dir) = &server.upload_dir {
                settings.upload_dir = PathBuf::from(dir);
            }
            if let Some(mb) = server.max_upload_mb {
                settings.max_upload_mb = mb;
            }
        }
        if let Some(origins) = file.cors.as_ref().and_then(|c| c.allowed_origins.clone()) {
            settings.allowed_origins = origins;
        }

        if let Some(port) = parse_env(&env, ENV_PORT) {
            settings.port = port;
        }
        if let Some(dir) = env(ENV_UPLOAD_DIR).filter(|d| !d.trim().is_empty()) {
            settings.upload_dir = PathBuf::from(dir);
        }
        if let Some(mb) = parse_env(&env, ENV_MAX_UPLOAD_MB) {
            settings.max_upload_mb = mb;
        }
        if let Some(origins) = env(ENV_ALLOWED_ORIGINS) {
            settings.allowed_origins = split_origins(&origins);
        }

        if let Some(port) = overrides.port {
            settings.port = port;
        }
        if let Some(dir) = &overrides.upload_dir {
            settings.upload_dir = dir.clone();
        }

        settings
    }

    pub fn body_limit_bytes(&self) -> usize {
        usize::try_from(self.max_upload_mb.saturating_mul(1024 * 1024)).unwrap_or(usize::MAX)
    }

    /// CORS layer admitting only the configured origins.
    pub fn cors_layer(&self) -> CorsLayer {
        let origins: Vec<HeaderValue> = self
            .allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    }
}

fn parse_env<T: std::str::FromStr>(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = env(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparseable environment value");
            None
        }
    }
}

/// Comma-separated origin list; blanks are dropped.
fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use textract_core::config_file::{CorsConfig, ServerConfig};

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_configured() {
        let settings = Settings::resolve(&ConfigFile::default(), env_from(&[]), &Overrides::default());
        assert_eq!(settings.port, 5001);
        assert_eq!(settings.upload_dir, PathBuf::from("uploads"));
        assert_eq!(settings.allowed_origins, vec!["http://localhost:5173".to_string()]);
        assert_eq!(settings.body_limit_bytes(), 500 * 1024 * 1024);
    }

    #[test]
    fn env_overrides_file_and_cli_overrides_env() {
        let file = ConfigFile {
            server: Some(ServerConfig {
                port: Some(6000),
                upload_dir: Some("from-file".into()),
                max_upload_mb: Some(10),
            }),
            cors: Some(CorsConfig {
                allowed_origins: Some(vec!["https://file.example".into()]),
            }),
        };
        let env = env_from(&[
            ("PORT", "7000"),
            ("TEXTRACT_ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
        ]);
        let overrides = Overrides {
            port: None,
            upload_dir: Some(PathBuf::from("from-cli")),
        };

        let settings = Settings::resolve(&file, env, &overrides);
        assert_eq!(settings.port, 7000);
        assert_eq!(settings.upload_dir, PathBuf::from("from-cli"));
        assert_eq!(settings.max_upload_mb, 10);
        assert_eq!(
            settings.allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );

        let settings = Settings::resolve(
            &file,
            env_from(&[("PORT", "7000")]),
            &Overrides {
                port: Some(8000),
                upload_dir: None,
            },
        );
        assert_eq!(settings.port, 8000);
        assert_eq!(settings.upload_dir, PathBuf::from("from-file"));
    }

    #[test]
    fn unparseable_env_values_are_ignored() {
        let settings = Settings::resolve(
            &ConfigFile::default(),
            env_from(&[("PORT", "not-a-port"), ("TEXTRACT_MAX_UPLOAD_MB", "-4")]),
            &Overrides::default(),
        );
        assert_eq!(settings.port, DEFAULT_PORT);
        assert_eq!(settings.max_upload_mb, DEFAULT_MAX_UPLOAD_MB);
    }

    #[test]
    fn empty_origin_env_disables_cross_origin() {
        let settings = Settings::resolve(
            &ConfigFile::default(),
            env_from(&[("TEXTRACT_ALLOWED_ORIGINS", "")]),
            &Overrides::default(),
        );
        assert!(settings.allowed_origins.is_empty());
    }
}
