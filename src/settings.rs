//! Layered configuration.
//!
//! Defaults, then an optional `hubwatch.toml`, then `HUBWATCH_*`
//! environment variables. CLI flags are merged on top by the binary.

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::source::DEFAULT_APPLICATIONS;

/// Runtime settings for the panel.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// HTTP endpoint serving the statistics document. When unset, the
    /// local statistics file is polled instead.
    pub endpoint: Option<String>,

    /// Path of the local statistics file.
    pub stats_file: String,

    /// Seconds between update cycles.
    pub refresh_secs: u64,

    /// Request timeout for the HTTP source, in seconds.
    pub timeout_secs: u64,

    /// Application names to track on the panel.
    pub applications: Vec<String>,

    /// Theme selection: "dark", "light" or "auto".
    pub theme: String,
}

impl Settings {
    /// Load settings, layering an optional config file and environment
    /// variables over the defaults.
    ///
    /// With an explicit `path` the file must exist; otherwise a
    /// `hubwatch.toml` in the working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults: Vec<String> = DEFAULT_APPLICATIONS.iter().map(|s| s.to_string()).collect();

        let mut builder = Config::builder()
            .set_default("stats_file", "data/server-stats.json")?
            .set_default("refresh_secs", 30)?
            .set_default("timeout_secs", 10)?
            .set_default("applications", defaults)?
            .set_default("theme", "auto")?;

        builder = match path {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name("hubwatch").required(false)),
        };

        builder
            .add_source(Environment::with_prefix("HUBWATCH"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::load(None).unwrap();
        assert!(settings.endpoint.is_none());
        assert_eq!(settings.stats_file, "data/server-stats.json");
        assert_eq!(settings.refresh_secs, 30);
        assert_eq!(settings.timeout_secs, 10);
        assert_eq!(settings.applications.len(), 5);
        assert_eq!(settings.theme, "auto");
    }

    #[test]
    fn test_file_overrides() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
            endpoint = "http://hub-prod-01/stats.json"
            refresh_secs = 5
            applications = ["CFAi", "Condor"]
            "#
        )
        .unwrap();
        file.flush().unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(
            settings.endpoint.as_deref(),
            Some("http://hub-prod-01/stats.json")
        );
        assert_eq!(settings.refresh_secs, 5);
        assert_eq!(settings.applications, vec!["CFAi", "Condor"]);
        // Untouched keys keep their defaults
        assert_eq!(settings.timeout_secs, 10);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = Settings::load(Some(Path::new("/nonexistent/hubwatch.toml")));
        assert!(result.is_err());
    }
}
