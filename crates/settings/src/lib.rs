use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "shaderbook.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Contents of `shaderbook.toml`. Every section and key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ShaderbookConfig {
    #[serde(default)]
    pub window: WindowSettings,
    #[serde(default)]
    pub uniforms: UniformSettings,
    #[serde(default)]
    pub tour: TourSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WindowSettings {
    #[serde(default, deserialize_with = "deserialize_size_opt")]
    pub size: Option<(u32, u32)>,
    /// Frame cap; `0` renders as fast as the swapchain allows.
    pub fps: Option<f32>,
    #[serde(default, deserialize_with = "deserialize_antialias_opt")]
    pub antialias: Option<AntialiasSetting>,
    pub color_space: Option<ColorSpaceSetting>,
    /// Freeze `u_time` at this value instead of animating.
    #[serde(default, deserialize_with = "deserialize_duration_opt")]
    pub still_time: Option<Duration>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UniformSettings {
    /// `u_color` as `#rrggbb`; parsed by the caller.
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TourSettings {
    #[serde(default)]
    pub mode: TourModeSetting,
    /// Time spent on each lesson before advancing; `None` means manual only.
    #[serde(default, deserialize_with = "deserialize_duration_opt")]
    pub dwell: Option<Duration>,
    pub seed: Option<u64>,
    /// Lesson handles in tour order; empty means every built-in.
    #[serde(default)]
    pub lessons: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TourModeSetting {
    #[default]
    Sequence,
    Shuffle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpaceSetting {
    Auto,
    Gamma,
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AntialiasSetting {
    Auto,
    Off,
    Samples2,
    Samples4,
    Samples8,
    Samples16,
}

impl AntialiasSetting {
    pub fn from_samples(samples: u32) -> Option<Self> {
        match samples {
            0 | 1 => Some(Self::Off),
            2 => Some(Self::Samples2),
            4 => Some(Self::Samples4),
            8 => Some(Self::Samples8),
            16 => Some(Self::Samples16),
            _ => None,
        }
    }

    /// MSAA sample count, or `None` for `Auto`.
    pub fn samples(self) -> Option<u32> {
        match self {
            Self::Auto => None,
            Self::Off => Some(1),
            Self::Samples2 => Some(2),
            Self::Samples4 => Some(4),
            Self::Samples8 => Some(8),
            Self::Samples16 => Some(16),
        }
    }
}

impl std::str::FromStr for AntialiasSetting {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_antialias(raw)
    }
}

impl std::str::FromStr for ColorSpaceSetting {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "gamma" | "srgb-off" => Ok(Self::Gamma),
            "linear" | "srgb" => Ok(Self::Linear),
            other => Err(format!(
                "invalid color space '{other}'; expected auto, gamma, or linear"
            )),
        }
    }
}

impl std::str::FromStr for TourModeSetting {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "sequence" | "ordered" => Ok(Self::Sequence),
            "shuffle" | "random" => Ok(Self::Shuffle),
            other => Err(format!(
                "invalid tour mode '{other}'; expected sequence or shuffle"
            )),
        }
    }
}

/// Parses `WIDTHxHEIGHT` (also accepts `X` and `×`).
pub fn parse_size(raw: &str) -> Result<(u32, u32), String> {
    let normalized = raw.trim().to_ascii_lowercase().replace('×', "x");
    let (width, height) = normalized
        .split_once('x')
        .ok_or_else(|| format!("invalid size '{raw}'; expected WIDTHxHEIGHT"))?;
    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| format!("invalid width in size '{raw}'"))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| format!("invalid height in size '{raw}'"))?;
    if width == 0 || height == 0 {
        return Err(format!("size '{raw}' must be non-zero in both dimensions"));
    }
    Ok((width, height))
}

pub fn parse_antialias(raw: &str) -> Result<AntialiasSetting, String> {
    let normalized = raw.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "auto" | "max" | "default" => Ok(AntialiasSetting::Auto),
        "off" | "none" | "disable" | "disabled" | "0" | "1" => Ok(AntialiasSetting::Off),
        "2" => Ok(AntialiasSetting::Samples2),
        "4" => Ok(AntialiasSetting::Samples4),
        "8" => Ok(AntialiasSetting::Samples8),
        "16" => Ok(AntialiasSetting::Samples16),
        other => Err(format!("invalid antialias setting '{other}'")),
    }
}

/// Parses `30s`, `1m 30s`, or a bare number of seconds.
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let trimmed = raw.trim();
    if let Ok(seconds) = trimmed.parse::<f64>() {
        return seconds_to_duration(seconds).map_err(|err| format!("duration '{raw}' {err}"));
    }
    humantime::parse_duration(trimmed).map_err(|err| format!("invalid duration '{raw}': {err}"))
}

fn seconds_to_duration(seconds: f64) -> Result<Duration, String> {
    if seconds.is_nan() || seconds.is_sign_negative() {
        return Err("must be a non-negative number".into());
    }
    Duration::try_from_secs_f64(seconds).map_err(|_| "is too large".into())
}

fn deserialize_size_opt<'de, D>(deserializer: D) -> Result<Option<(u32, u32)>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|raw| parse_size(&raw).map_err(de::Error::custom))
        .transpose()
}

fn deserialize_duration_opt<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor;
    impl<'de> de::Visitor<'de> for Visitor {
        type Value = Option<Duration>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a duration as number of seconds or human-readable string")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            parse_duration(v).map(Some).map_err(E::custom)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(Duration::from_secs(v)))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v < 0 {
                return Err(E::custom("duration must be non-negative"));
            }
            Ok(Some(Duration::from_secs(v as u64)))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            seconds_to_duration(v)
                .map(Some)
                .map_err(|err| E::custom(format!("duration {err}")))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(Visitor)
}

fn deserialize_antialias_opt<'de, D>(deserializer: D) -> Result<Option<AntialiasSetting>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Helper {
        Str(String),
        Num(i64),
    }

    let helper: Option<Helper> = Option::deserialize(deserializer)?;
    let result = match helper {
        None => None,
        Some(Helper::Str(raw)) => Some(parse_antialias(&raw).map_err(de::Error::custom)?),
        Some(Helper::Num(value)) => {
            if value < 0 {
                return Err(de::Error::custom("antialias value must be non-negative"));
            }
            Some(parse_antialias(&value.to_string()).map_err(de::Error::custom)?)
        }
    };
    Ok(result)
}

impl ShaderbookConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let raw: ShaderbookConfig = toml::from_str(input)?;
        raw.validate()?;
        Ok(raw)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Like [`load`](Self::load) but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(fps) = self.window.fps {
            if !fps.is_finite() || fps < 0.0 {
                return Err(ConfigError::Invalid("window.fps must be >= 0".into()));
            }
        }

        if let Some(color) = &self.uniforms.color {
            if color.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "uniforms.color must not be empty".into(),
                ));
            }
        }

        if let Some(dwell) = self.tour.dwell {
            if dwell.is_zero() {
                return Err(ConfigError::Invalid(
                    "tour.dwell must be greater than zero".into(),
                ));
            }
        }

        for (index, handle) in self.tour.lessons.iter().enumerate() {
            if handle.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "tour.lessons[{index}] must not be empty"
                )));
            }
        }

        Ok(())
    }
}
