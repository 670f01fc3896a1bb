/// Affine state (uniform scale + translation) and the commands that change it
use nalgebra::{Point3, Vector3};

use crate::error::InputError;
use crate::geometry::BaseMesh;

/// Factor applied by one "scale up" activation
pub const SCALE_UP: f32 = 1.1;
/// Factor applied by one "scale down" activation
pub const SCALE_DOWN: f32 = 0.9;

/// Uniform scale and translation applied to every base vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineState {
    pub scale: f32,
    pub translation: Vector3<f32>,
}

impl AffineState {
    pub fn new(scale: f32, translation: Vector3<f32>) -> Self {
        Self { scale, translation }
    }

    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            translation: Vector3::zeros(),
        }
    }

    /// Translation moved by `offset`
    pub fn shifted(self, offset: Vector3<f32>) -> Self {
        Self {
            translation: self.translation + offset,
            ..self
        }
    }

    /// Scale multiplied by `factor`. Factors compound; zero and negative
    /// values are accepted.
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            scale: self.scale * factor,
            ..self
        }
    }

    pub fn reset(self) -> Self {
        Self::identity()
    }

    pub fn apply(self, command: &Command) -> Self {
        match *command {
            Command::Shift(offset) => self.shifted(offset),
            Command::Scale(factor) => self.scaled(factor),
            Command::Reset => self.reset(),
        }
    }

    /// `point * scale + translation`
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        point * self.scale + self.translation
    }
}

impl Default for AffineState {
    fn default() -> Self {
        Self::identity()
    }
}

/// A state transition requested by the host UI
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Shift(Vector3<f32>),
    Scale(f32),
    Reset,
}

impl Command {
    pub fn shift(dx: f32, dy: f32, dz: f32) -> Self {
        Command::Shift(Vector3::new(dx, dy, dz))
    }

    /// Reject NaN and infinite components before they reach the model
    pub fn validate(self) -> Result<Self, InputError> {
        match self {
            Command::Shift(offset) => {
                let fields = ["shift x", "shift y", "shift z"];
                for (field, value) in fields.into_iter().zip(offset.iter()) {
                    if !value.is_finite() {
                        return Err(InputError::NonFinite {
                            field,
                            value: *value,
                        });
                    }
                }
            }
            Command::Scale(factor) if !factor.is_finite() => {
                return Err(InputError::NonFinite {
                    field: "scale",
                    value: factor,
                });
            }
            Command::Scale(_) | Command::Reset => {}
        }
        Ok(self)
    }
}

/// Every base vertex run through `state`, in base order
pub fn transform_vertices(mesh: &BaseMesh, state: &AffineState) -> Vec<Point3<f32>> {
    mesh.vertices()
        .iter()
        .map(|v| state.transform_point(v))
        .collect()
}
