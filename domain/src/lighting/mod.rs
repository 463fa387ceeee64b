//! Philips Hue lighting: light selection and CLIP v2 light commands.

pub mod color;

use serde::Serialize;
use thiserror::Error;

pub use color::{Chromaticity, D65_WHITE, Rgb};

/// Caller errors of the lighting tools. The messages are the tool output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LightingError {
    #[error("Color \"{0}\" is not a valid color")]
    InvalidColor(String),

    #[error("Light number {0} not found")]
    UnknownLight(i64),
}

/// Resolve a 1-based light number against the configured light ids
pub fn resolve_light(light_ids: &[String], number: i64) -> Result<&str, LightingError> {
    usize::try_from(number)
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| light_ids.get(index))
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .ok_or(LightingError::UnknownLight(number))
}

/// Parse a colour name into the chromaticity the bridge expects
pub fn parse_color(name: &str) -> Result<Chromaticity, LightingError> {
    Rgb::parse(name)
        .map(|rgb| rgb.chromaticity())
        .ok_or_else(|| LightingError::InvalidColor(name.to_string()))
}

/// Body of `PUT /clip/v2/resource/light/{id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightCommand {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorCommand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimming: Option<Dimming>,
    pub on: OnState,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorCommand {
    pub xy: Chromaticity,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dimming {
    /// 1 to 100
    pub brightness: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OnState {
    pub on: bool,
}

impl LightCommand {
    /// Colour and brightness; brightness 0 switches the light off
    pub fn set(xy: Chromaticity, brightness: f64) -> Self {
        Self {
            color: Some(ColorCommand { xy }),
            dimming: Some(Dimming {
                brightness: brightness.clamp(1.0, 100.0),
            }),
            on: OnState {
                on: brightness != 0.0,
            },
        }
    }

    pub fn off() -> Self {
        Self {
            color: None,
            dimming: None,
            on: OnState { on: false },
        }
    }
}
