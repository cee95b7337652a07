//=========================================================================
// Settings & Binding Persistence
//=========================================================================
//
// Flat, wholesale persistence: a settings-flags struct and an
// action-name → binding list, both loaded once at startup and rewritten
// in full on every change. No incremental format, no versioning: load
// what exists, apply it, otherwise defaults.
//
// A missing file is the normal first-run case, not an error. A corrupt
// file is logged and replaced by defaults; persistence failures never
// reach the tick loop.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::state_tracker::{
    DEFAULT_REPEAT_DELAY, DEFAULT_REPEAT_INTERVAL, DEFAULT_STICK_DEADZONE,
};
use crate::core::input::{BindSlot, InputBinding};

//=== Settings ============================================================

/// Flat feature toggles and tuning numbers.
///
/// `#[serde(default)]` keeps old files loadable when fields are added:
/// anything absent takes its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master speech toggle.
    pub speech_enabled: bool,

    /// Skip narrating dialogue lines that have voice acting.
    pub skip_voiced_lines: bool,

    /// Include quantities and values in composed announcements.
    pub verbose_values: bool,

    /// Ticks a held direction waits before its first repeat re-fire.
    pub repeat_delay_ticks: u32,

    /// Ticks between repeat re-fires once the delay has elapsed.
    pub repeat_interval_ticks: u32,

    /// Stick magnitude below which no direction registers.
    pub stick_deadzone: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speech_enabled: true,
            skip_voiced_lines: false,
            verbose_values: true,
            repeat_delay_ticks: DEFAULT_REPEAT_DELAY,
            repeat_interval_ticks: DEFAULT_REPEAT_INTERVAL,
            stick_deadzone: DEFAULT_STICK_DEADZONE,
        }
    }
}

//=== Binding File ========================================================

/// One persisted binding row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingEntry {
    /// Action name as the embedder labels it.
    pub action: String,

    /// Slot the binding lives in.
    pub slot: BindSlot,

    /// The physical binding.
    pub binding: InputBinding,
}

/// The whole persisted binding table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BindingFile {
    pub bindings: Vec<BindingEntry>,
}

//=== SettingsError =======================================================

/// Why a save failed. Loads never fail; they default.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings io: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings encode: {0}")]
    Encode(#[from] serde_json::Error),
}

//=== SettingsStore =======================================================

/// Disk persistence for settings and bindings.
pub struct SettingsStore {
    settings_path: PathBuf,
    bindings_path: PathBuf,
}

impl SettingsStore {
    /// Creates a store rooted at a directory; files are
    /// `settings.json` and `bindings.json` inside it.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            settings_path: dir.join("settings.json"),
            bindings_path: dir.join("bindings.json"),
        }
    }

    //--- Load -------------------------------------------------------------

    /// Loads settings, or defaults when the file is missing or corrupt.
    pub fn load_settings(&self) -> Settings {
        Self::load_or_default(&self.settings_path)
    }

    /// Loads the binding table, or an empty one.
    pub fn load_bindings(&self) -> BindingFile {
        Self::load_or_default(&self.bindings_path)
    }

    fn load_or_default<T: Default + for<'de> Deserialize<'de>>(path: &Path) -> T {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("{} not found; using defaults", path.display());
                return T::default();
            }
            Err(err) => {
                warn!("failed to read {}: {}; using defaults", path.display(), err);
                return T::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!("failed to parse {}: {}; using defaults", path.display(), err);
                T::default()
            }
        }
    }

    //--- Save -------------------------------------------------------------

    /// Rewrites the settings file in full.
    pub fn save_settings(&self, settings: &Settings) -> Result<(), SettingsError> {
        Self::write_whole(&self.settings_path, settings)
    }

    /// Rewrites the binding file in full.
    pub fn save_bindings(&self, bindings: &BindingFile) -> Result<(), SettingsError> {
        Self::write_whole(&self.bindings_path, bindings)
    }

    fn write_whole<T: Serialize>(path: &Path, value: &T) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let encoded = serde_json::to_string_pretty(value)?;
        fs::write(path, encoded)?;
        debug!("rewrote {}", path.display());
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{Control, KeyCode, Modifier};

    fn store() -> (tempfile::TempDir, SettingsStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path());
        (dir, store)
    }

    //=====================================================================
    // Settings Round-Trip Tests
    //=====================================================================

    /// Tests a missing file loads defaults silently.
    #[test]
    fn missing_file_loads_defaults() {
        let (_dir, store) = store();

        assert_eq!(store.load_settings(), Settings::default());
        assert_eq!(store.load_bindings(), BindingFile::default());
    }

    /// Tests save-then-load round-trips settings.
    #[test]
    fn settings_round_trip() {
        let (_dir, store) = store();

        let mut settings = Settings::default();
        settings.skip_voiced_lines = true;
        settings.repeat_delay_ticks = 20;

        store.save_settings(&settings).unwrap();
        assert_eq!(store.load_settings(), settings);
    }

    /// Tests a corrupt file falls back to defaults instead of failing.
    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let (dir, store) = store();
        fs::write(dir.path().join("settings.json"), "{ not json").unwrap();

        assert_eq!(store.load_settings(), Settings::default());
    }

    /// Tests a partial file takes defaults for absent fields.
    #[test]
    fn partial_file_takes_field_defaults() {
        let (dir, store) = store();
        fs::write(
            dir.path().join("settings.json"),
            r#"{ "skip_voiced_lines": true }"#,
        )
        .unwrap();

        let loaded = store.load_settings();
        assert!(loaded.skip_voiced_lines);
        assert_eq!(loaded.repeat_delay_ticks, DEFAULT_REPEAT_DELAY);
    }

    //=====================================================================
    // Binding Round-Trip Tests
    //=====================================================================

    /// Tests the binding table survives a full rewrite cycle.
    #[test]
    fn bindings_round_trip() {
        let (_dir, store) = store();

        let file = BindingFile {
            bindings: vec![
                BindingEntry {
                    action: "Confirm".to_string(),
                    slot: BindSlot::Menu,
                    binding: InputBinding::new(Control::Key(KeyCode::Enter)),
                },
                BindingEntry {
                    action: "ReadStatus".to_string(),
                    slot: BindSlot::Field,
                    binding: InputBinding::with_modifier(
                        Control::Key(KeyCode::KeyR),
                        Modifier::Ctrl,
                    ),
                },
            ],
        };

        store.save_bindings(&file).unwrap();
        assert_eq!(store.load_bindings(), file);
    }

    /// Tests saves rewrite wholesale: the previous contents vanish.
    #[test]
    fn save_rewrites_wholesale() {
        let (_dir, store) = store();

        let first = BindingFile {
            bindings: vec![BindingEntry {
                action: "Confirm".to_string(),
                slot: BindSlot::Menu,
                binding: InputBinding::new(Control::Key(KeyCode::Enter)),
            }],
        };
        store.save_bindings(&first).unwrap();

        let second = BindingFile { bindings: Vec::new() };
        store.save_bindings(&second).unwrap();

        assert_eq!(store.load_bindings(), second);
    }
}
