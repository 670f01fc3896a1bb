/// Full clear-and-rebuild render procedure
use log::trace;

use crate::geometry::BaseMesh;
use crate::scene::{AxisLimits, PolyCollection, Rgb, Scene};
use crate::transform::{transform_vertices, AffineState};

/// Fixed presentation settings, constant across redraws
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub axis_labels: [String; 3],
    pub axis_limits: [AxisLimits; 3],
    pub face_color: Rgb,
    pub edge_color: Rgb,
    pub alpha: f32,
    pub marker_color: Rgb,
    pub marker_size: f32,
}

impl RenderStyle {
    /// Same limits on every axis
    pub fn with_uniform_limits(min: f32, max: f32) -> Self {
        Self {
            axis_limits: [AxisLimits::new(min, max); 3],
            ..Self::default()
        }
    }
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            axis_labels: ["X".to_string(), "Y".to_string(), "Z".to_string()],
            axis_limits: [AxisLimits::new(-5.0, 10.0); 3],
            face_color: Rgb::BLUE,
            edge_color: Rgb::BLACK,
            alpha: 0.5,
            marker_color: Rgb::RED,
            marker_size: 50.0,
        }
    }
}

/// A surface that can show a finished scene
pub trait Display {
    type Error;

    /// Commit `scene` to the surface
    fn present(&mut self, scene: &Scene) -> Result<(), Self::Error>;
}

/// Rebuild `scene` from scratch for the mesh under `state`.
///
/// Nothing from the previous contents survives: axes are re-applied, one
/// polygon collection holds every face, and every vertex gets a marker.
pub fn rebuild(scene: &mut Scene, mesh: &BaseMesh, state: &AffineState, style: &RenderStyle) {
    scene.clear();

    let [x, y, z] = &style.axis_labels;
    scene.set_axis_labels(x, y, z);
    scene.set_axis_limits(style.axis_limits);

    let transformed = transform_vertices(mesh, state);

    let polygons = (0..mesh.face_count())
        .map(|face| mesh.face_vertices(face, &transformed).collect::<Vec<_>>())
        .collect();
    scene.add_collection(PolyCollection {
        polygons,
        face_color: style.face_color,
        edge_color: style.edge_color,
        alpha: style.alpha,
    });

    for vertex in transformed {
        scene.scatter(vertex, style.marker_color, style.marker_size);
    }

    trace!(
        "rebuilt scene: {} polygons, {} markers",
        scene.polygon_count(),
        scene.marker_count()
    );
}
