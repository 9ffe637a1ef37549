use cgmath::{InnerSpace, Vector3};
use thiserror::Error;

/// Parallel light plus a flat ambient term.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DirectionalLight {
    pub color: [f32; 3],
    direction: Vector3<f32>,
    pub ambient: [f32; 3],
}

impl DirectionalLight {
    pub fn new(
        color: [f32; 3],
        direction: [f32; 3],
        ambient: [f32; 3],
    ) -> Result<Self, LightError> {
        let direction = Vector3::from(direction);

        if !direction.x.is_finite() || !direction.y.is_finite() || !direction.z.is_finite() {
            return Err(LightError::NonFiniteDirection);
        }

        // scaled to unit max component first so the magnitude cannot overflow
        let largest = direction.x.abs().max(direction.y.abs()).max(direction.z.abs());
        if largest == 0.0 {
            return Err(LightError::ZeroDirection);
        }

        Ok(Self {
            color,
            direction: (direction / largest).normalize(),
            ambient,
        })
    }

    /// Unit vector towards the light
    pub fn direction(&self) -> [f32; 3] {
        self.direction.into()
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            direction: Vector3::new(0.5, 3.0, 4.0).normalize(),
            ambient: [0.2, 0.2, 0.2],
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LightError {
    #[error("light direction must be a non-zero vector")]
    ZeroDirection,
    #[error("light direction components must be finite")]
    NonFiniteDirection,
}
