use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::GridSize;

const APP_DIR_NAME: &str = "chroma-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default logical grid width.
pub const DEFAULT_GRID_WIDTH: u16 = 40;

/// Default logical grid height.
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Default cap on simultaneously present food items.
pub const DEFAULT_MAX_FOODS: usize = 30;

/// Default bound on rejection-sampling attempts per food spawn.
pub const DEFAULT_SPAWN_RETRY_LIMIT: u32 = 512;

/// 24-bit color written as `#RRGGBB` in config files.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Scales every channel by `factor` (clamped to `[0, 1]`).
    #[must_use]
    pub fn dimmed(self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let scale = |channel: u8| (f32::from(channel) * factor).round() as u8;
        Self(scale(self.0), scale(self.1), scale(self.2))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_hex_color(&value).ok_or(ConfigError::InvalidColor(value))
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

fn parse_hex_color(value: &str) -> Option<Rgb> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let red = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let green = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let blue = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Rgb(red, green, blue))
}

/// One palette entry: the snake's body color and the matching food color.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct ColorPair {
    pub snake: Rgb,
    pub food: Rgb,
}

const fn pair(snake: Rgb, food: Rgb) -> ColorPair {
    ColorPair { snake, food }
}

/// Built-in palette. The index advances by one on every consumption.
pub const DEFAULT_PALETTE: [ColorPair; 9] = [
    pair(Rgb(255, 0, 0), Rgb(0, 255, 0)),
    pair(Rgb(0, 255, 255), Rgb(255, 0, 255)),
    pair(Rgb(255, 255, 0), Rgb(0, 0, 255)),
    pair(Rgb(255, 127, 0), Rgb(127, 0, 255)),
    pair(Rgb(255, 0, 255), Rgb(0, 255, 255)),
    pair(Rgb(0, 255, 0), Rgb(255, 255, 0)),
    pair(Rgb(0, 0, 255), Rgb(255, 255, 255)),
    pair(Rgb(127, 0, 255), Rgb(255, 127, 0)),
    pair(Rgb(255, 0, 0), Rgb(255, 0, 0)),
];

/// How many points a consumption is worth.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ScoringRule {
    /// Every food is worth the same.
    Flat { points: u32 },
    /// `base + multiplier * streak_bonus`, where the multiplier grows while the
    /// snake's color matches the eaten food's color and resets otherwise.
    ColorStreak { base: u32, streak_bonus: u32 },
}

impl Default for ScoringRule {
    fn default() -> Self {
        Self::ColorStreak {
            base: 5,
            streak_bonus: 10,
        }
    }
}

/// What happens to the food set after a consumption.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum FoodPolicy {
    /// Exactly one replacement, colored after the snake's new palette entry.
    Single,
    /// A random count in `min..=max`, each with an independently random palette color.
    Burst { min: u8, max: u8 },
}

impl Default for FoodPolicy {
    fn default() -> Self {
        Self::Burst { min: 1, max: 3 }
    }
}

/// Immutable simulation configuration, shared read-only by every component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub grid_width: u16,
    pub grid_height: u16,
    pub max_foods: usize,
    pub palette: Vec<ColorPair>,
    pub scoring: ScoringRule,
    pub food_policy: FoodPolicy,
    pub spawn_retry_limit: u32,
    pub base_speed: u32,
    pub segments_per_speed_level: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            max_foods: DEFAULT_MAX_FOODS,
            palette: DEFAULT_PALETTE.to_vec(),
            scoring: ScoringRule::default(),
            food_policy: FoodPolicy::default(),
            spawn_retry_limit: DEFAULT_SPAWN_RETRY_LIMIT,
            base_speed: 5,
            segments_per_speed_level: 3,
        }
    }
}

impl SimConfig {
    /// Default configuration on a grid of the given size.
    #[must_use]
    pub fn with_grid(width: u16, height: u16) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        GridSize::new(self.grid_width, self.grid_height)
    }

    /// Returns the palette entry for `index`, wrapping around the palette length.
    ///
    /// An empty palette falls back to the first built-in pair.
    #[must_use]
    pub fn color_pair(&self, index: usize) -> ColorPair {
        self.palette
            .get(index % self.palette.len().max(1))
            .copied()
            .unwrap_or(DEFAULT_PALETTE[0])
    }

    /// Ticks per second for a snake of `length` segments.
    #[must_use]
    pub fn speed_for_length(&self, length: usize) -> u32 {
        let step = self.segments_per_speed_level.max(1) as usize;
        let bonus = u32::try_from(length / step).unwrap_or(u32::MAX);
        self.base_speed.saturating_add(bonus)
    }

    /// Checks every field that the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width < 3 || self.grid_height < 3 {
            return Err(ConfigError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if self.max_foods == 0 {
            return Err(ConfigError::NoFoodCapacity);
        }
        if let FoodPolicy::Burst { min, max } = self.food_policy {
            if min == 0 || min > max {
                return Err(ConfigError::InvalidBurstRange { min, max });
            }
        }
        if self.spawn_retry_limit == 0 {
            return Err(ConfigError::NoSpawnRetries);
        }
        if self.base_speed == 0 {
            return Err(ConfigError::ZeroBaseSpeed);
        }
        if self.segments_per_speed_level == 0 {
            return Err(ConfigError::ZeroSpeedStep);
        }

        Ok(())
    }

    /// Parses a JSON config file. Missing fields take their defaults.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Returns the per-user config file location, if the platform has one.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::{ColorPair, FoodPolicy, Rgb, ScoringRule, SimConfig, parse_hex_color};
    use crate::error::ConfigError;

    #[test]
    fn parses_hex_color() {
        assert_eq!(parse_hex_color("#AABBCC"), Some(Rgb(170, 187, 204)));
        assert_eq!(parse_hex_color("#ff7f00"), Some(Rgb(255, 127, 0)));
        assert_eq!(parse_hex_color("AABBCC"), None);
        assert_eq!(parse_hex_color("#ABC"), None);
        assert_eq!(parse_hex_color("#GG0000"), None);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = SimConfig::from_json(
            r##"{ "grid_width": 12, "scoring": { "rule": "flat", "points": 10 } }"##,
        )
        .expect("config should parse");

        assert_eq!(config.grid_width, 12);
        assert_eq!(config.grid_height, SimConfig::default().grid_height);
        assert_eq!(config.scoring, ScoringRule::Flat { points: 10 });
        assert_eq!(config.food_policy, FoodPolicy::Burst { min: 1, max: 3 });
        assert_eq!(config.palette.len(), 9);
    }

    #[test]
    fn palette_and_policy_parse_from_json() {
        let config = SimConfig::from_json(
            r##"{
              "palette": [ { "snake": "#112233", "food": "#445566" } ],
              "food_policy": { "policy": "single" }
            }"##,
        )
        .expect("config should parse");

        assert_eq!(
            config.palette,
            vec![ColorPair {
                snake: Rgb(0x11, 0x22, 0x33),
                food: Rgb(0x44, 0x55, 0x66),
            }]
        );
        assert_eq!(config.food_policy, FoodPolicy::Single);
    }

    #[test]
    fn malformed_color_is_rejected() {
        let result = SimConfig::from_json(
            r##"{ "palette": [ { "snake": "red", "food": "#445566" } ] }"##,
        );

        assert!(result.is_err());
    }

    #[test]
    fn validation_rejects_tiny_grid() {
        let config = SimConfig::with_grid(2, 10);

        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridTooSmall {
                width: 2,
                height: 10
            })
        ));
    }

    #[test]
    fn validation_rejects_inverted_burst_range() {
        let config = SimConfig {
            food_policy: FoodPolicy::Burst { min: 3, max: 1 },
            ..SimConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBurstRange { min: 3, max: 1 })
        ));
    }

    #[test]
    fn validation_rejects_empty_palette() {
        let config = SimConfig {
            palette: Vec::new(),
            ..SimConfig::default()
        };

        assert!(matches!(config.validate(), Err(ConfigError::EmptyPalette)));
    }

    #[test]
    fn default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn speed_grows_every_three_segments() {
        let config = SimConfig::default();

        assert_eq!(config.speed_for_length(1), 5);
        assert_eq!(config.speed_for_length(2), 5);
        assert_eq!(config.speed_for_length(3), 6);
        assert_eq!(config.speed_for_length(10), 8);
    }

    #[test]
    fn color_pair_wraps_around_palette() {
        let config = SimConfig::default();

        assert_eq!(config.color_pair(9), config.color_pair(0));
        assert_eq!(config.color_pair(10), config.color_pair(1));
    }

    #[test]
    fn rgb_serializes_as_hex_string() {
        let json = serde_json::to_string(&Rgb(255, 127, 0)).expect("color should serialize");

        assert_eq!(json, "\"#FF7F00\"");
    }
}
