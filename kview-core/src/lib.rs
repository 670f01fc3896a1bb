/// KView Core Library - Mesh model, affine transforms and scene rebuilding
///
/// This library holds everything that does not depend on a particular
/// display surface: the base geometry, the affine state and the commands
/// that change it, the fixed camera, and the render procedure that turns
/// the current state into a retained scene.

pub mod error;
pub mod geometry;
pub mod input;
pub mod projection;
pub mod render;
pub mod scene;
pub mod transform;
pub mod viewer;

// Re-export commonly used types
pub use error::{GeometryError, InputError};
pub use geometry::{BaseMesh, Face, Vertex};
pub use input::{parse_number, parse_script};
pub use projection::Camera;
pub use render::{rebuild, Display, RenderStyle};
pub use scene::{AxisLimits, Marker, PolyCollection, Rgb, Scene};
pub use transform::{AffineState, Command, SCALE_DOWN, SCALE_UP};
pub use viewer::{MeshModel, Viewer};
