use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::controller::{ControllerOptions, ProgressTimeline};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub submission: SubmissionConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionConfig {
    #[serde(default = "default_true")]
    pub allow_overlapping: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub endpoint: Option<String>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config/ideagenie/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        let parsed: Self = toml::from_str(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        Ok(parsed)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(endpoint) = overrides.endpoint {
            self.scoring.endpoint = endpoint;
        }
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            timeline: ProgressTimeline::default()
                .with_interval(Duration::from_millis(self.progress.interval_ms)),
            allow_overlapping: self.submission.allow_overlapping,
        }
    }

    pub fn default_template() -> String {
        let template = r#"[scoring]
endpoint = "http://127.0.0.1:4600/get_top_ideas"
timeout_secs = 120
connect_timeout_secs = 6

[progress]
interval_ms = 1000

[submission]
allow_overlapping = true

[server]
host = "127.0.0.1"
port = 4600
"#;
        template.to_string()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            progress: ProgressConfig::default(),
            submission: SubmissionConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            allow_overlapping: true,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:4600/get_top_ideas".to_string()
}

// Ranking runs a model over every idea, so responses are slow.
fn default_timeout_secs() -> u64 {
    120
}

fn default_connect_timeout_secs() -> u64 {
    6
}

fn default_interval_ms() -> u64 {
    1000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4600
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::config::{Config, ConfigOverrides};

    #[test]
    fn template_matches_defaults() {
        let parsed: Config =
            toml::from_str(&Config::default_template()).expect("template should parse");
        let defaults = Config::default();
        assert_eq!(parsed.scoring.endpoint, defaults.scoring.endpoint);
        assert_eq!(parsed.scoring.timeout_secs, defaults.scoring.timeout_secs);
        assert_eq!(parsed.progress.interval_ms, defaults.progress.interval_ms);
        assert_eq!(
            parsed.submission.allow_overlapping,
            defaults.submission.allow_overlapping
        );
        assert_eq!(parsed.server.port, defaults.server.port);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let parsed: Config = toml::from_str(
            r#"[submission]
allow_overlapping = false
"#,
        )
        .expect("partial config should parse");
        assert!(!parsed.submission.allow_overlapping);
        assert_eq!(parsed.progress.interval_ms, 1000);
        assert_eq!(parsed.server.host, "127.0.0.1");
    }

    #[test]
    fn endpoint_override_wins() {
        let mut config = Config::default();
        config.apply_overrides(ConfigOverrides {
            endpoint: Some("http://10.0.0.252:4600/get_top_ideas".to_string()),
        });
        assert_eq!(
            config.scoring.endpoint,
            "http://10.0.0.252:4600/get_top_ideas"
        );
        config.apply_overrides(ConfigOverrides::default());
        assert_eq!(
            config.scoring.endpoint,
            "http://10.0.0.252:4600/get_top_ideas"
        );
    }

    #[test]
    fn controller_options_follow_progress_interval() {
        let mut config = Config::default();
        config.progress.interval_ms = 250;
        config.submission.allow_overlapping = false;
        let options = config.controller_options();
        assert_eq!(options.timeline.interval(), Duration::from_millis(250));
        assert_eq!(options.timeline.messages().len(), 8);
        assert!(!options.allow_overlapping);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let path = std::env::temp_dir().join("ideagenie-missing-config-test.toml");
        let _ = std::fs::remove_file(&path);
        let config = Config::load(Some(&path)).expect("missing config should load");
        assert_eq!(config.server.port, 4600);
    }
}
