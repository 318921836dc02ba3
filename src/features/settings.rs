//! Application settings persistence
//!
//! Handles loading the tunable constants of the slider, the worm and the
//! choreography from `settings.json`. A missing or broken file falls back to
//! the built-in defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How overshooting the top of the slider is counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CounterMode {
    /// Count once each time the offset moves into the overshoot zone
    #[default]
    Edge,
    /// Count on every progress recomputation while overshooting
    Polling,
}

impl std::fmt::Display for CounterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CounterMode::Edge => write!(f, "edge"),
            CounterMode::Polling => write!(f, "polling"),
        }
    }
}

/// What a threshold crossing does while a sequence is already running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RetriggerPolicy {
    /// Crossings are not counted until the sequence is back to idle
    #[default]
    Ignore,
    /// Keep counting; reaching the threshold again starts over
    Restart,
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Slider shape and drag behaviour
    pub slider: SliderSettings,
    /// Timings of the reveal sequence
    pub choreography: ChoreographySettings,
    /// Worm decoration
    pub worm: WormSettings,
    /// Window and text
    pub display: DisplaySettings,
}

/// Slider geometry and gesture mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderSettings {
    pub max_height: f32,
    pub max_width: f32,
    pub corner_radius: f32,
    /// Damping applied to drag distance past either end
    pub overshoot_strength: f32,
    pub counter_mode: CounterMode,
    /// Duration of the fill transition following the finger, in seconds
    pub fill_transition_secs: f32,
}

impl SliderSettings {
    pub fn fill_transition(&self) -> Duration {
        secs(self.fill_transition_secs)
    }
}

impl Default for SliderSettings {
    fn default() -> Self {
        Self {
            max_height: 180.0,
            max_width: 90.0,
            corner_radius: 25.0,
            overshoot_strength: 0.05,
            counter_mode: CounterMode::Edge,
            fill_transition_secs: 0.3,
        }
    }
}

/// Reveal sequence timings, all in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChoreographySettings {
    /// Number of threshold crossings that reveal the worm
    pub crossings_to_reveal: u32,
    pub retrigger: RetriggerPolicy,
    pub reveal_delay_secs: f32,
    pub worm_grow_secs: f32,
    pub grow_delay_secs: f32,
    pub eat_secs: f32,
    pub title_delay_secs: f32,
    pub title_secs: f32,
    pub reset_secs: f32,
}

impl Default for ChoreographySettings {
    fn default() -> Self {
        Self {
            crossings_to_reveal: 3,
            retrigger: RetriggerPolicy::Ignore,
            reveal_delay_secs: 3.0,
            worm_grow_secs: 0.5,
            grow_delay_secs: 3.0,
            eat_secs: 4.0,
            title_delay_secs: 5.0,
            title_secs: 10.0,
            reset_secs: 10.0,
        }
    }
}

impl ChoreographySettings {
    pub fn reveal_delay(&self) -> Duration {
        secs(self.reveal_delay_secs)
    }

    pub fn worm_grow(&self) -> Duration {
        secs(self.worm_grow_secs)
    }

    pub fn grow_delay(&self) -> Duration {
        secs(self.grow_delay_secs)
    }

    pub fn eat(&self) -> Duration {
        secs(self.eat_secs)
    }

    pub fn title_delay(&self) -> Duration {
        secs(self.title_delay_secs)
    }

    pub fn title(&self) -> Duration {
        secs(self.title_secs)
    }

    pub fn reset(&self) -> Duration {
        secs(self.reset_secs)
    }
}

/// Worm ring decoration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WormSettings {
    pub line_count: u32,
    pub border_width: f32,
    pub min_line: f32,
    pub max_line: f32,
    /// Elapsed seconds are divided by this before taking the sine
    pub period_divisor: f32,
    pub opacity: f32,
}

impl Default for WormSettings {
    fn default() -> Self {
        Self {
            line_count: 60,
            border_width: 20.0,
            min_line: 20.0,
            max_line: 120.0,
            period_divisor: 3.0,
            opacity: 0.4,
        }
    }
}

/// Display and window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Text revealed at the end of the sequence
    pub title: String,
    /// Freeze the worm lines instead of redrawing them every frame
    pub power_saving_mode: bool,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            title: "А М Б Р О З И Я".to_string(),
            power_saving_mode: false,
            window_width: 420.0,
            window_height: 860.0,
        }
    }
}

/// Seconds to a duration; negative, NaN and overflowing values become zero
fn secs(value: f32) -> Duration {
    Duration::try_from_secs_f32(value.max(0.0)).unwrap_or(Duration::ZERO)
}

impl Settings {
    /// Get the settings file path
    pub fn file_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "ambrosia", "Ambrosia")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::file_path() else {
            tracing::warn!("Could not determine config directory, using default settings");
            return Self::default();
        };

        if !path.exists() {
            let defaults = Self::default();
            match defaults.save_to_file(&path) {
                Ok(()) => tracing::info!("Wrote default settings to {:?}", path),
                Err(e) => tracing::warn!("Could not write default settings: {}", e),
            }
            return defaults;
        }

        match Self::load_from_file(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Failed to load settings from {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SettingsError::Io(e.to_string()))?;
        let mut settings: Settings =
            serde_json::from_str(&content).map_err(|e| SettingsError::Parse(e.to_string()))?;

        for problem in settings.validate() {
            tracing::warn!("Settings repaired: {}", problem);
        }

        Ok(settings)
    }

    /// Save settings to a specific file
    pub fn save_to_file(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SettingsError::Io(e.to_string()))?;
        }

        let content =
            serde_json::to_string_pretty(self).map_err(|e| SettingsError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| SettingsError::Io(e.to_string()))?;
        Ok(())
    }

    /// Replace out-of-range values with defaults
    ///
    /// Returns one [`SettingsError::Invalid`] per repaired field.
    pub fn validate(&mut self) -> Vec<SettingsError> {
        let mut problems = Vec::new();
        let slider_defaults = SliderSettings::default();
        let choreography_defaults = ChoreographySettings::default();
        let worm_defaults = WormSettings::default();
        let display_defaults = DisplaySettings::default();

        let slider = &mut self.slider;
        repair(
            &mut problems,
            "slider.max_height",
            &mut slider.max_height,
            slider_defaults.max_height,
            |v| v > 0.0,
        );
        repair(
            &mut problems,
            "slider.max_width",
            &mut slider.max_width,
            slider_defaults.max_width,
            |v| v > 0.0,
        );
        repair(
            &mut problems,
            "slider.corner_radius",
            &mut slider.corner_radius,
            slider_defaults.corner_radius,
            |v| v >= 0.0,
        );
        repair(
            &mut problems,
            "slider.overshoot_strength",
            &mut slider.overshoot_strength,
            slider_defaults.overshoot_strength,
            |v| v >= 0.0,
        );
        repair_secs(
            &mut problems,
            "slider.fill_transition_secs",
            &mut slider.fill_transition_secs,
            slider_defaults.fill_transition_secs,
        );

        let choreography = &mut self.choreography;
        if choreography.crossings_to_reveal == 0 {
            problems.push(SettingsError::Invalid(
                "choreography.crossings_to_reveal".to_string(),
            ));
            choreography.crossings_to_reveal = choreography_defaults.crossings_to_reveal;
        }
        for (field, value, default) in [
            (
                "choreography.reveal_delay_secs",
                &mut choreography.reveal_delay_secs,
                choreography_defaults.reveal_delay_secs,
            ),
            (
                "choreography.worm_grow_secs",
                &mut choreography.worm_grow_secs,
                choreography_defaults.worm_grow_secs,
            ),
            (
                "choreography.grow_delay_secs",
                &mut choreography.grow_delay_secs,
                choreography_defaults.grow_delay_secs,
            ),
            (
                "choreography.eat_secs",
                &mut choreography.eat_secs,
                choreography_defaults.eat_secs,
            ),
            (
                "choreography.title_delay_secs",
                &mut choreography.title_delay_secs,
                choreography_defaults.title_delay_secs,
            ),
            (
                "choreography.title_secs",
                &mut choreography.title_secs,
                choreography_defaults.title_secs,
            ),
            (
                "choreography.reset_secs",
                &mut choreography.reset_secs,
                choreography_defaults.reset_secs,
            ),
        ] {
            repair_secs(&mut problems, field, value, default);
        }

        let worm = &mut self.worm;
        if worm.line_count > MAX_LINE_COUNT {
            problems.push(SettingsError::Invalid("worm.line_count".to_string()));
            worm.line_count = worm_defaults.line_count;
        }
        repair(
            &mut problems,
            "worm.period_divisor",
            &mut worm.period_divisor,
            worm_defaults.period_divisor,
            |v| v != 0.0,
        );
        repair(
            &mut problems,
            "worm.border_width",
            &mut worm.border_width,
            worm_defaults.border_width,
            |v| v >= 0.0,
        );
        repair(
            &mut problems,
            "worm.opacity",
            &mut worm.opacity,
            worm_defaults.opacity,
            |v| (0.0..=1.0).contains(&v),
        );
        if !(worm.min_line.is_finite()
            && worm.max_line.is_finite()
            && worm.min_line <= worm.max_line)
        {
            problems.push(SettingsError::Invalid("worm.min_line".to_string()));
            worm.min_line = worm_defaults.min_line;
            worm.max_line = worm_defaults.max_line;
        }

        let display = &mut self.display;
        repair(
            &mut problems,
            "display.window_width",
            &mut display.window_width,
            display_defaults.window_width,
            |v| v > 0.0,
        );
        repair(
            &mut problems,
            "display.window_height",
            &mut display.window_height,
            display_defaults.window_height,
            |v| v > 0.0,
        );

        problems
    }
}

/// Longest duration accepted from the settings file, in seconds
const MAX_DURATION_SECS: f32 = 600.0;

/// Upper bound on worm teeth; each one is drawn every frame
const MAX_LINE_COUNT: u32 = 360;

/// Reset `value` to `default` unless it is finite and passes `valid`
fn repair(
    problems: &mut Vec<SettingsError>,
    field: &str,
    value: &mut f32,
    default: f32,
    valid: impl Fn(f32) -> bool,
) {
    if !(value.is_finite() && valid(*value)) {
        problems.push(SettingsError::Invalid(field.to_string()));
        *value = default;
    }
}

fn repair_secs(problems: &mut Vec<SettingsError>, field: &str, value: &mut f32, default: f32) {
    repair(problems, field, value, default, |v| {
        (0.0..=MAX_DURATION_SECS).contains(&v)
    });
}

/// Errors that can occur with settings
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    Io(String),
    Parse(String),
    Invalid(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "IO error: {}", e),
            SettingsError::Parse(e) => write!(f, "Parse error: {}", e),
            SettingsError::Invalid(field) => write!(f, "Invalid value for {}", field),
        }
    }
}

impl std::error::Error for SettingsError {}
