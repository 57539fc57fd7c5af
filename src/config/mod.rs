use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::annotation::DEFAULT_DRAW_COLOR;
use crate::constants::{
    CAPTURE_BORDER_INSET, DRAG_START_DISTANCE, ERASER_RADIUS, HANDLE_RADIUS,
    HIGHLIGHT_MERGE_TOLERANCE, HIT_THRESHOLD, MAX_HISTORY_SIZE, MAX_PASTE_CASCADE,
    MIN_RESIZE_EXTENT, MOVE_COMMIT_DISTANCE, PASTE_CASCADE_OFFSET, SELECTION_PADDING,
};
use crate::error::AnnotationError;

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Interaction thresholds, in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub eraser_radius: f32,
    pub hit_threshold: f32,
    pub handle_radius: f32,
    pub selection_padding: f32,
    pub drag_start_distance: f32,
    pub move_commit_distance: f32,
    pub min_resize_extent: f32,
    pub paste_offset: f32,
    pub max_paste_cascade: u32,
    pub highlight_merge_tolerance: f32,
    pub capture_border_inset: u32,
    pub max_history: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            eraser_radius: ERASER_RADIUS,
            hit_threshold: HIT_THRESHOLD,
            handle_radius: HANDLE_RADIUS,
            selection_padding: SELECTION_PADDING,
            drag_start_distance: DRAG_START_DISTANCE,
            move_commit_distance: MOVE_COMMIT_DISTANCE,
            min_resize_extent: MIN_RESIZE_EXTENT,
            paste_offset: PASTE_CASCADE_OFFSET,
            max_paste_cascade: MAX_PASTE_CASCADE,
            highlight_merge_tolerance: HIGHLIGHT_MERGE_TOLERANCE,
            capture_border_inset: CAPTURE_BORDER_INSET,
            max_history: MAX_HISTORY_SIZE,
        }
    }
}

impl EditorConfig {
    /// Replace negative or non-finite thresholds with their defaults
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let fix = |name: &str, value: f32, default: f32| {
            if value.is_finite() && value >= 0.0 {
                value
            } else {
                warn!("Invalid {} {} in config, using {}", name, value, default);
                default
            }
        };
        let max_history = if self.max_history == 0 {
            warn!("History size 0 in config would disable undo, using {}", defaults.max_history);
            defaults.max_history
        } else {
            self.max_history
        };

        Self {
            eraser_radius: fix("eraser_radius", self.eraser_radius, defaults.eraser_radius),
            hit_threshold: fix("hit_threshold", self.hit_threshold, defaults.hit_threshold),
            handle_radius: fix("handle_radius", self.handle_radius, defaults.handle_radius),
            selection_padding: fix(
                "selection_padding",
                self.selection_padding,
                defaults.selection_padding,
            ),
            drag_start_distance: fix(
                "drag_start_distance",
                self.drag_start_distance,
                defaults.drag_start_distance,
            ),
            move_commit_distance: fix(
                "move_commit_distance",
                self.move_commit_distance,
                defaults.move_commit_distance,
            ),
            min_resize_extent: fix(
                "min_resize_extent",
                self.min_resize_extent,
                defaults.min_resize_extent,
            ),
            paste_offset: fix("paste_offset", self.paste_offset, defaults.paste_offset),
            highlight_merge_tolerance: fix(
                "highlight_merge_tolerance",
                self.highlight_merge_tolerance,
                defaults.highlight_merge_tolerance,
            ),
            max_history,
            ..self
        }
    }
}

/// Application configuration persisted to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfigData {
    pub editor: EditorConfig,
    /// Palette color name the pen starts with
    pub default_color: String,
    pub default_thickness: f32,
    /// Font size in CSS pixels
    pub default_font_size: f32,
    /// Whether touch input draws (otherwise touch only scrolls)
    pub enable_touch_drawing: bool,
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            editor: EditorConfig::default(),
            default_color: DEFAULT_DRAW_COLOR.to_string(),
            default_thickness: 2.0,
            default_font_size: 16.0,
            enable_touch_drawing: false,
        }
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: crate::paths::config_file(),
            dirty: false,
        }
    }
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Parse config JSON
pub fn parse_config(json: &str) -> Result<AppConfigData, AnnotationError> {
    let mut data: AppConfigData = serde_json::from_str(json)?;
    data.editor = data.editor.sanitized();
    if !(data.default_thickness.is_finite() && data.default_thickness > 0.0) {
        warn!("Invalid default thickness {}, using 2", data.default_thickness);
        data.default_thickness = AppConfigData::default().default_thickness;
    }
    Ok(data)
}

/// Load configuration from disk.
///
/// Returns the data plus the reason it was reset to defaults, if it was.
pub fn load_config(config_path: &std::path::Path) -> (AppConfigData, Option<String>) {
    if !config_path.exists() {
        info!("No config file found, using defaults");
        return (AppConfigData::default(), None);
    }

    match std::fs::read_to_string(config_path) {
        Ok(json) => match parse_config(&json) {
            Ok(data) => {
                info!("Loaded config from {:?}", config_path);
                (data, None)
            }
            Err(e) => {
                warn!("Failed to parse config file: {}", e);
                (
                    AppConfigData::default(),
                    Some(format!("Configuration file was corrupted: {}", e)),
                )
            }
        },
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            (
                AppConfigData::default(),
                Some(format!("Could not read configuration file: {}", e)),
            )
        }
    }
}

/// Save configuration to disk
fn save_config(config: &AppConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<AppConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    let (data, reset_reason) = load_config(&config.config_path);
    config.data = data;
    config.dirty = false;

    // Set notification if config was reset due to an error
    if let Some(reason) = reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                save_config_system.run_if(on_message::<SaveConfigRequest>),
            );
    }
}
