//! Persisted estimate form.
//!
//! The form survives between runs as a single TOML record. Each section
//! (`condition`, `scope`, `include_ceiling`, `dimensions`, `coats`,
//! `openings`) is read independently: a missing or malformed section falls
//! back to its own default without discarding the others.
//!
//! Records carry a `schema_version`. A record without one is version 0 and
//! is migrated on load; a record from a newer version is ignored.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use paint_core::calculations::EstimateInput;
use paint_core::{BuildingCondition, CoatPlan, Dimensions, Openings, Scope};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const SCHEMA_VERSION: u32 = 1;

const APP_DIR: &str = "school-paint-estimator";
const FILE_NAME: &str = "settings.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("no configuration directory available on this platform")]
    NoConfigDir,

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl SettingsError {
    fn io(
        path: &Path,
        source: io::Error,
    ) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// The durable part of the estimate form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSettings {
    pub schema_version: u32,
    pub condition: BuildingCondition,
    pub scope: Scope,
    pub include_ceiling: bool,
    pub dimensions: Dimensions,
    pub coats: CoatPlan,
    pub openings: Openings,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self::from_input(&EstimateInput::default())
    }
}

impl FormSettings {
    pub fn from_input(input: &EstimateInput) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            condition: input.condition,
            scope: input.scope,
            include_ceiling: input.include_ceiling,
            dimensions: input.dimensions.clone(),
            coats: input.coats,
            openings: input.openings.clone(),
        }
    }

    pub fn to_input(&self) -> EstimateInput {
        EstimateInput {
            condition: self.condition,
            scope: self.scope,
            dimensions: self.dimensions.clone(),
            openings: self.openings.clone(),
            coats: self.coats,
            include_ceiling: self.include_ceiling,
        }
    }

    /// Parses a stored record. Never fails: anything unusable is replaced
    /// by its default and logged.
    pub fn from_toml_str(text: &str) -> Self {
        let mut table: toml::Table = match text.parse() {
            Ok(table) => table,
            Err(error) => {
                warn!(%error, "settings file is not valid TOML, using defaults");
                return Self::default();
            }
        };

        let version = match table.get("schema_version") {
            None => 0,
            Some(value) => match value.as_integer().and_then(|v| u32::try_from(v).ok()) {
                Some(version) => version,
                None => {
                    warn!(%value, "unreadable schema_version, using defaults");
                    return Self::default();
                }
            },
        };

        if version > SCHEMA_VERSION {
            warn!(
                version,
                supported = SCHEMA_VERSION,
                "settings written by a newer version, using defaults"
            );
            return Self::default();
        }
        if version == 0 {
            migrate_v0(&mut table);
        }

        let defaults = Self::default();
        Self {
            schema_version: SCHEMA_VERSION,
            condition: section(&table, "condition", defaults.condition),
            scope: section(&table, "scope", defaults.scope),
            include_ceiling: section(&table, "include_ceiling", defaults.include_ceiling),
            dimensions: section(&table, "dimensions", defaults.dimensions),
            coats: section(&table, "coats", defaults.coats),
            openings: section(&table, "openings", defaults.openings),
        }
    }

    pub fn to_toml_string(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Version 0 records named the vent toggle `vents`.
fn migrate_v0(table: &mut toml::Table) {
    let Some(toml::Value::Table(openings)) = table.get_mut("openings") else {
        return;
    };
    if openings.contains_key("has_vents") {
        openings.remove("vents");
        return;
    }
    if let Some(vents) = openings.remove("vents") {
        debug!("migrating openings.vents to openings.has_vents");
        openings.insert("has_vents".to_string(), vents);
    }
}

fn section<T: DeserializeOwned>(
    table: &toml::Table,
    key: &str,
    default: T,
) -> T {
    match table.get(key) {
        None => default,
        Some(value) => value.clone().try_into().unwrap_or_else(|error| {
            warn!(key, %error, "malformed settings section, using default");
            default
        }),
    }
}

/// Reads and writes [`FormSettings`] at a fixed path.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/school-paint-estimator/settings.toml`.
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        let config_dir = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        Ok(config_dir.join(APP_DIR).join(FILE_NAME))
    }

    pub fn at_default_location() -> Result<Self, SettingsError> {
        Ok(Self::new(Self::default_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored form, or defaults if there is none or it cannot be
    /// read.
    pub fn load(&self) -> FormSettings {
        match fs::read_to_string(&self.path) {
            Ok(text) => FormSettings::from_toml_str(&text),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no settings file, using defaults");
                FormSettings::default()
            }
            Err(error) => {
                warn!(path = %self.path.display(), %error, "cannot read settings, using defaults");
                FormSettings::default()
            }
        }
    }

    /// Replaces the stored form. The file is written to a sibling temporary
    /// path first and renamed over the old one.
    pub fn save(
        &self,
        settings: &FormSettings,
    ) -> Result<(), SettingsError> {
        let text = settings.to_toml_string()?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| SettingsError::io(parent, e))?;
        }

        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, text).map_err(|e| SettingsError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| SettingsError::io(&self.path, e))?;

        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    /// Deletes the stored form and returns the defaults.
    pub fn reset(&self) -> Result<FormSettings, SettingsError> {
        match fs::remove_file(&self.path) {
            Ok(()) => info!(path = %self.path.display(), "settings reset"),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {}
            Err(error) => return Err(SettingsError::io(&self.path, error)),
        }
        Ok(FormSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> SettingsStore {
        SettingsStore::new(dir.path().join("nested").join(FILE_NAME))
    }

    fn customized() -> FormSettings {
        let mut settings = FormSettings::default();
        settings.condition = BuildingCondition::New;
        settings.scope = Scope::Both;
        settings.include_ceiling = true;
        settings.dimensions.width = dec!(7.25);
        settings.dimensions.floors = 3;
        settings.coats.topcoat = 3;
        settings.openings.has_vents = false;
        settings
    }

    // =========================================================================
    // load / save tests
    // =========================================================================

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();

        assert_eq!(store_in(&dir).load(), FormSettings::default());
    }

    #[test]
    fn saved_settings_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&customized()).unwrap();

        assert_eq!(store.load(), customized());
        assert!(!store.path().with_extension("toml.tmp").exists());
    }

    #[test]
    fn save_replaces_previous_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&customized()).unwrap();
        store.save(&FormSettings::default()).unwrap();

        assert_eq!(store.load(), FormSettings::default());
    }

    #[test]
    fn reset_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&customized()).unwrap();

        let settings = store.reset().unwrap();

        assert_eq!(settings, FormSettings::default());
        assert!(!store.path().exists());
        assert!(store.reset().is_ok());
    }

    #[test]
    fn garbage_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "this is = = not toml").unwrap();

        assert_eq!(store.load(), FormSettings::default());
    }

    // =========================================================================
    // per-section fallback tests
    // =========================================================================

    #[test]
    fn malformed_section_falls_back_alone() {
        let text = r#"
schema_version = 1
condition = "NEW"
scope = "SIDEWAYS"
include_ceiling = true

[dimensions]
width = "seven"
"#;

        let settings = FormSettings::from_toml_str(text);

        assert_eq!(settings.condition, BuildingCondition::New);
        assert_eq!(settings.scope, Scope::Interior);
        assert!(settings.include_ceiling);
        assert_eq!(settings.dimensions, Dimensions::default());
        assert_eq!(settings.coats, CoatPlan::default());
    }

    #[test]
    fn numbers_may_be_written_as_floats_or_integers() {
        let text = r#"
schema_version = 1

[dimensions]
width = 8
length = 10.5
height = "3.2"
room_count = 4
floors = 2
"#;

        let settings = FormSettings::from_toml_str(text);

        assert_eq!(
            settings.dimensions,
            Dimensions {
                width: dec!(8),
                length: dec!(10.5),
                height: dec!(3.2),
                room_count: 4,
                floors: 2,
            }
        );
    }

    // =========================================================================
    // schema version tests
    // =========================================================================

    #[test]
    fn version_zero_vents_flag_is_migrated() {
        let text = r#"
scope = "EXTERIOR"

[openings]
door_count = 1
door_width = "1.0"
door_height = "2.1"
window_count = 4
window_width = "1.2"
window_height = "1.5"
vents = false
vent_count = 10
vent_width = "0.6"
vent_height = "1.0"
"#;

        let settings = FormSettings::from_toml_str(text);

        assert_eq!(settings.schema_version, SCHEMA_VERSION);
        assert_eq!(settings.scope, Scope::Exterior);
        assert!(!settings.openings.has_vents);
        assert_eq!(settings.openings.window_count, 4);
    }

    #[test]
    fn newer_schema_is_ignored() {
        let text = r#"
schema_version = 2
condition = "NEW"
"#;

        assert_eq!(FormSettings::from_toml_str(text), FormSettings::default());
    }

    #[test]
    fn written_record_carries_current_version() {
        let text = FormSettings::default().to_toml_string().unwrap();

        assert!(text.starts_with("schema_version = 1\n"));
    }

    #[test]
    fn input_conversion_round_trips() {
        let settings = customized();

        assert_eq!(FormSettings::from_input(&settings.to_input()), settings);
    }
}
