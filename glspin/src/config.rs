use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::light::{DirectionalLight, LightError};

/// Degrees per second, a thousand turns
pub const MAX_ANGULAR_VELOCITY: f32 = 360_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    pub width: u32,
    pub height: u32,
    pub title: Option<String>,
    pub vsync: bool,
    /// Degrees per second, overrides the demo's own speed
    pub angular_velocity: Option<f32>,
    pub clear_color: Option<[f32; 3]>,
    pub light: Option<LightConfig>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            title: None,
            vsync: true,
            angular_velocity: None,
            clear_color: None,
            light: None,
        }
    }
}

impl DemoConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size {}x{} has a zero dimension",
                self.width, self.height
            )));
        }

        if let Some(velocity) = self.angular_velocity {
            if !velocity.is_finite() || velocity.abs() > MAX_ANGULAR_VELOCITY {
                return Err(ConfigError::Invalid(format!(
                    "angular_velocity must lie within ±{MAX_ANGULAR_VELOCITY} deg/s, got {velocity}"
                )));
            }
        }

        if let Some(color) = &self.clear_color {
            check_color("clear_color", color)?;
        }

        if let Some(light) = &self.light {
            check_color("light.color", &light.color)?;
            check_color("light.ambient", &light.ambient)?;
            light.to_light()?;
        }

        Ok(())
    }
}

fn check_color(name: &str, color: &[f32; 3]) -> Result<(), ConfigError> {
    if color.iter().all(|c| (0.0..=1.0).contains(c)) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{name} components must lie in [0, 1], got {color:?}"
        )))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightConfig {
    pub color: [f32; 3],
    pub direction: [f32; 3],
    pub ambient: [f32; 3],
}

impl Default for LightConfig {
    fn default() -> Self {
        let light = DirectionalLight::default();

        Self {
            color: light.color,
            direction: light.direction(),
            ambient: light.ambient,
        }
    }
}

impl LightConfig {
    pub fn to_light(&self) -> Result<DirectionalLight, LightError> {
        DirectionalLight::new(self.color, self.direction, self.ambient)
    }
}

pub struct ConfigLoader {}

impl ConfigLoader {
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<DemoConfig, ConfigError> {
        let config_str = std::fs::read_to_string(path).map_err(ConfigError::InputError)?;

        Self::load_from_str(&config_str)
    }

    pub fn load_from_str(config_str: &str) -> Result<DemoConfig, ConfigError> {
        let config: DemoConfig = json5::from_str(config_str).map_err(ConfigError::FormatError)?;
        config.validate()?;

        Ok(config)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InputError(std::io::Error),
    FormatError(json5::Error),
    Light(LightError),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputError(e) => f.write_fmt(format_args!("{e}")),
            Self::FormatError(e) => f.write_fmt(format_args!("{e}")),
            Self::Light(e) => f.write_fmt(format_args!("{e}")),
            Self::Invalid(e) => f.write_fmt(format_args!("{e}")),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InputError(e) => Some(e),
            Self::FormatError(e) => Some(e),
            Self::Light(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<LightError> for ConfigError {
    fn from(e: LightError) -> Self {
        Self::Light(e)
    }
}
