//! Configuration surface
//!
//! The key/value store itself belongs to the host (its INI loader); this
//! module only defines the interface boundary (`ConfigStore`), parses the
//! override's section out of it once, and hands the result around as an
//! immutable `Config` snapshot. Hot-path handlers never re-read the store.
//!
//! Missing or malformed keys are rewritten to the store with the built-in
//! defaults, so a fresh install ends up with a fully populated section.

use crate::device::FilterMode;
use crate::engine_warn;
use rustc_hash::FxHashMap;

const LOG_SOURCE: &str = "override::config";

/// Section every override key lives under
pub const CONFIG_SECTION: &str = "SWAPCHAIN_OVERRIDE";

const KEY_FORCE_RESOLUTION: &str = "ForceResolution";
const KEY_SCALING_FILTER: &str = "ScalingFilter";
const KEY_FULLSCREEN_MODE: &str = "FullscreenMode";
const KEY_BLOCK_FULLSCREEN_CHANGES: &str = "BlockFullscreenChanges";
const KEY_TARGET_MONITOR: &str = "TargetMonitor";

const DEFAULT_FORCE_WIDTH: u32 = 3840;
const DEFAULT_FORCE_HEIGHT: u32 = 2160;

/// Fullscreen behavior applied at creation and transition time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenMode {
    /// Don't modify fullscreen behavior (default)
    Unchanged,
    /// Force borderless fullscreen (windowed)
    Borderless,
    /// Force exclusive fullscreen
    Exclusive,
}

// ===== CONFIG STORE BOUNDARY =====

/// Interface to the host's key/value configuration store
pub trait ConfigStore {
    /// Read a value, if the key exists
    fn get(&self, section: &str, key: &str) -> Option<String>;

    /// Write a value (used to persist defaults)
    fn set(&mut self, section: &str, key: &str, value: &str);
}

/// In-memory store for tests and standalone use
#[derive(Default)]
pub struct MemoryConfigStore {
    values: FxHashMap<(String, String), String>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get(&self, section: &str, key: &str) -> Option<String> {
        self.values
            .get(&(section.to_string(), key.to_string()))
            .cloned()
    }

    fn set(&mut self, section: &str, key: &str, value: &str) {
        self.values
            .insert((section.to_string(), key.to_string()), value.to_string());
    }
}

// ===== CONFIG SNAPSHOT =====

/// Immutable configuration snapshot
///
/// Loaded once and passed by value into the engine; reloading means loading
/// a new snapshot and building a new engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Forced back-buffer width (0 together with height 0 disables override)
    pub force_width: u32,
    /// Forced back-buffer height
    pub force_height: u32,
    /// Sampler filter for the composition draw
    pub scaling_filter: FilterMode,
    /// Fullscreen policy
    pub fullscreen_mode: FullscreenMode,
    /// Block transitions entirely (only honored when mode is Unchanged)
    pub block_fullscreen_changes: bool,
    /// 0 = primary monitor, N = Nth enumerated secondary
    pub target_monitor: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            force_width: DEFAULT_FORCE_WIDTH,
            force_height: DEFAULT_FORCE_HEIGHT,
            scaling_filter: FilterMode::Linear,
            fullscreen_mode: FullscreenMode::Unchanged,
            block_fullscreen_changes: false,
            target_monitor: 0,
        }
    }
}

impl Config {
    /// Load a snapshot from the store, persisting defaults for missing or
    /// malformed keys
    pub fn load(store: &mut dyn ConfigStore) -> Self {
        let (force_width, force_height) =
            match store.get(CONFIG_SECTION, KEY_FORCE_RESOLUTION) {
                Some(value) => match parse_resolution(&value) {
                    Some(dims) => dims,
                    None => {
                        engine_warn!(
                            LOG_SOURCE,
                            "Malformed {} value '{}', using default {}x{}",
                            KEY_FORCE_RESOLUTION,
                            value,
                            DEFAULT_FORCE_WIDTH,
                            DEFAULT_FORCE_HEIGHT
                        );
                        store.set(
                            CONFIG_SECTION,
                            KEY_FORCE_RESOLUTION,
                            &format!("{}x{}", DEFAULT_FORCE_WIDTH, DEFAULT_FORCE_HEIGHT),
                        );
                        (DEFAULT_FORCE_WIDTH, DEFAULT_FORCE_HEIGHT)
                    }
                },
                None => {
                    store.set(
                        CONFIG_SECTION,
                        KEY_FORCE_RESOLUTION,
                        &format!("{}x{}", DEFAULT_FORCE_WIDTH, DEFAULT_FORCE_HEIGHT),
                    );
                    (DEFAULT_FORCE_WIDTH, DEFAULT_FORCE_HEIGHT)
                }
            };

        let scaling_filter = match read_u32(store, KEY_SCALING_FILTER, 1) {
            0 => FilterMode::Point,
            1 => FilterMode::Linear,
            2 => FilterMode::Anisotropic,
            _ => FilterMode::Linear,
        };

        let fullscreen_mode = match read_u32(store, KEY_FULLSCREEN_MODE, 0) {
            1 => FullscreenMode::Borderless,
            2 => FullscreenMode::Exclusive,
            _ => FullscreenMode::Unchanged,
        };

        let block_fullscreen_changes =
            match store.get(CONFIG_SECTION, KEY_BLOCK_FULLSCREEN_CHANGES) {
                Some(value) => matches!(value.as_str(), "1" | "true" | "True"),
                None => {
                    store.set(CONFIG_SECTION, KEY_BLOCK_FULLSCREEN_CHANGES, "false");
                    false
                }
            };

        let target_monitor = read_u32(store, KEY_TARGET_MONITOR, 0);

        Self {
            force_width,
            force_height,
            scaling_filter,
            fullscreen_mode,
            block_fullscreen_changes,
            target_monitor,
        }
    }

    /// Returns true if the resolution override is enabled at all
    pub fn is_override_enabled(&self) -> bool {
        self.force_width != 0 && self.force_height != 0
    }

    pub fn is_exclusive_fullscreen_enabled(&self) -> bool {
        self.fullscreen_mode == FullscreenMode::Exclusive
    }

    pub fn is_borderless_fullscreen_enabled(&self) -> bool {
        self.fullscreen_mode == FullscreenMode::Borderless
    }
}

/// Parse a `WxH` resolution string; `0x0` is valid (disables the override)
fn parse_resolution(value: &str) -> Option<(u32, u32)> {
    let (width_str, height_str) = value.trim().split_once('x')?;
    let width = width_str.trim().parse().ok()?;
    let height = height_str.trim().parse().ok()?;
    Some((width, height))
}

/// Read an integer key, persisting the default when missing or unparseable
fn read_u32(store: &mut dyn ConfigStore, key: &str, default: u32) -> u32 {
    match store.get(CONFIG_SECTION, key) {
        Some(value) => match value.trim().parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                engine_warn!(
                    LOG_SOURCE,
                    "Malformed {} value '{}', using default {}",
                    key,
                    value,
                    default
                );
                store.set(CONFIG_SECTION, key, &default.to_string());
                default
            }
        },
        None => {
            store.set(CONFIG_SECTION, key, &default.to_string());
            default
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
