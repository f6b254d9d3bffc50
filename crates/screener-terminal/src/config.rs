use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use screener_client::client::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

pub const BASE_URL_VAR: &str = "SCREENER_BASE_URL";
pub const TIMEOUT_VAR: &str = "SCREENER_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenerConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ScreenerConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    fn validate(self) -> eyre::Result<Self> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(eyre::eyre!(
                "base_url must start with http:// or https:// (got {:?})",
                self.base_url
            ));
        }
        if self.timeout_secs == 0 {
            return Err(eyre::eyre!("timeout_secs must be at least 1"));
        }
        Ok(self)
    }
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("screener"))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Load the config at `path`, falling back to defaults when the file does
/// not exist.
pub fn load_config_from(path: &Path) -> eyre::Result<ScreenerConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(ScreenerConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .map_or(0, |v| u32::try_from(v).unwrap_or(u32::MAX));

    let migrated = migrate(json, on_disk_version)?;
    let config: ScreenerConfig = serde_json::from_value(migrated)?;
    config.validate()
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update screener."
        ));
    }

    // v0 → v1: `api_url` renamed to `base_url`
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        let base_url = obj
            .remove("api_url")
            .unwrap_or_else(|| serde_json::Value::String(DEFAULT_BASE_URL.to_string()));
        obj.entry("base_url").or_insert(base_url);
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (api_url → base_url)");
    }

    Ok(json)
}

pub fn save_config_to(path: &Path, config: &ScreenerConfig) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path has no parent: {}", path.display()))?;
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

/// Apply `SCREENER_*` overrides on top of a loaded config. `lookup` is
/// `std::env::var` in the binary.
pub fn apply_overrides<F>(mut config: ScreenerConfig, lookup: F) -> eyre::Result<ScreenerConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(BASE_URL_VAR).filter(|v| !v.trim().is_empty()) {
        config.base_url = url.trim().to_string();
    }
    if let Some(raw) = lookup(TIMEOUT_VAR) {
        config.timeout_secs = raw
            .trim()
            .parse()
            .map_err(|e| eyre::eyre!("{TIMEOUT_VAR} must be a whole number of seconds: {e}"))?;
    }
    config.validate()
}

/// Load the config for the binary: file (written with defaults on first
/// run), then environment overrides.
pub fn resolve() -> eyre::Result<ScreenerConfig> {
    let path = config_path()?;
    let config = load_config_from(&path)?;

    if !path.exists()
        && let Err(e) = save_config_to(&path, &config)
    {
        tracing::warn!(path = %path.display(), error = %e, "could not write default config");
    }

    apply_overrides(config, |key| std::env::var(key).ok())
}
