use orbis_base::{Error, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FIT_MARGIN: f64 = 0.01;
pub const DEFAULT_Z_FIT_MARGIN: f64 = 1.0;
pub const DEFAULT_PAN_SCALE: f64 = 1.0;
pub const DEFAULT_CONTEXT_MENU_OFFSET: i32 = 30;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Relative margin around the scene bounds for fit-all.
    pub fit_margin: f64,
    pub z_fit_margin: f64,
    pub animate_fit: bool,
    pub pan_scale: f64,
    /// Vertical distance between the click and the context menu anchor.
    pub context_menu_offset: i32,
    pub initial_scale: f64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            fit_margin: DEFAULT_FIT_MARGIN,
            z_fit_margin: DEFAULT_Z_FIT_MARGIN,
            animate_fit: false,
            pan_scale: DEFAULT_PAN_SCALE,
            context_menu_offset: DEFAULT_CONTEXT_MENU_OFFSET,
            initial_scale: 1.0,
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("fit_margin", self.fit_margin)?;
        ensure_non_negative("z_fit_margin", self.z_fit_margin)?;
        ensure_positive("pan_scale", self.pan_scale)?;
        ensure_positive("initial_scale", self.initial_scale)?;
        Ok(())
    }
}

fn ensure_positive(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidParameter(format!("{name} must be > 0")));
    }
    Ok(())
}

fn ensure_non_negative(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidParameter(format!("{name} must be >= 0")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() -> Result<()> {
        ControllerConfig::default().validate()
    }

    #[test]
    fn negative_margin_is_rejected() {
        let config = ControllerConfig {
            fit_margin: -0.5,
            ..ControllerConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn zero_pan_scale_is_rejected() {
        let config = ControllerConfig {
            pan_scale: 0.0,
            ..ControllerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
