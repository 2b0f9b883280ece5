// Runtime configuration for the command-line front end
//
// REGISRESQ_DB_PATH     database file (default: regisresq.db)
// REGISRESQ_LOG_FORMAT  "pretty" (default) or "json"
// RUST_LOG              log filter (default: regisresq=info)

use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "regisresq.db";
pub const DEFAULT_LOG_FILTER: &str = "regisresq=info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the process environment in practice)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let db_path = lookup("REGISRESQ_DB_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let log_format = match lookup("REGISRESQ_LOG_FORMAT").as_deref() {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        AppConfig {
            db_path,
            log_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.db_path, PathBuf::from("regisresq.db"));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("REGISRESQ_DB_PATH", "/tmp/shelter.db"),
            ("REGISRESQ_LOG_FORMAT", "JSON"),
        ]
        .into_iter()
        .collect();

        let config = AppConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.db_path, PathBuf::from("/tmp/shelter.db"));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_blank_path_falls_back() {
        let config = AppConfig::from_lookup(|key| {
            (key == "REGISRESQ_DB_PATH").then(|| "  ".to_string())
        });
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_PATH));
    }
}
