use std::path::Path;

use hypermob_scoring::derivation::{Derivation, DEFAULT_BMI_DECIMALS};
use hypermob_scoring::DEFAULT_SCHEME_ID;
use serde::{Deserialize, Serialize};

use crate::error::IntakeError;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

/// Scheme used by deployments that predate versioned configs.
const PRE_VERSIONED_SCHEME_ID: &str = "unweighted_v1";

/// Per-deployment derivation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Decimal places kept on stored BMI values.
    pub bmi_decimals: u32,
    /// Id of the scoring scheme of record (e.g., "weighted_v2").
    pub scoring_scheme: String,
    pub created_at: jiff::Timestamp,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            bmi_decimals: DEFAULT_BMI_DECIMALS,
            scoring_scheme: DEFAULT_SCHEME_ID.to_string(),
            created_at: jiff::Timestamp::now(),
        }
    }
}

impl IntakeConfig {
    /// Build the derivation engine this config describes.
    pub fn derivation(&self) -> Result<Derivation, IntakeError> {
        Derivation::from_scheme_id(&self.scoring_scheme, self.bmi_decimals)
            .map_err(|e| IntakeError::Config(e.to_string()))
    }
}

pub fn load_config(path: &Path) -> Result<IntakeConfig, IntakeError> {
    let contents = std::fs::read_to_string(path)?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = match json.get("config_version").and_then(|v| v.as_u64()) {
        Some(version) => u32::try_from(version).map_err(|_| {
            IntakeError::Config(format!("config_version {version} is out of range"))
        })?,
        None => 0,
    };

    let migrated = migrate(json, on_disk_version)?;
    let config: IntakeConfig = serde_json::from_value(migrated)?;
    tracing::info!(
        path = %path.display(),
        scheme = %config.scoring_scheme,
        bmi_decimals = config.bmi_decimals,
        "config loaded"
    );
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> Result<serde_json::Value, IntakeError> {
    if from_version > CURRENT_VERSION {
        return Err(IntakeError::Config(format!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION})"
        )));
    }

    // v0 → v1: pre-versioned deployments classified by unweighted count and
    // kept two BMI decimals. Record both explicitly.
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| IntakeError::Config("config is not a JSON object".to_string()))?;
        obj.entry("scoring_scheme")
            .or_insert(serde_json::Value::String(PRE_VERSIONED_SCHEME_ID.to_string()));
        obj.entry("bmi_decimals")
            .or_insert(serde_json::Value::Number(DEFAULT_BMI_DECIMALS.into()));
        obj.entry("created_at")
            .or_insert(serde_json::Value::String(jiff::Timestamp::now().to_string()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (explicit scoring scheme)");
    }

    Ok(json)
}

pub fn save_config(path: &Path, config: &IntakeConfig) -> Result<(), IntakeError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

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
