/// Mesh model and the viewer that redraws it after every change
use log::debug;
use nalgebra::{Point3, Vector3};

use crate::geometry::BaseMesh;
use crate::render::{rebuild, Display, RenderStyle};
use crate::scene::Scene;
use crate::transform::{transform_vertices, AffineState, Command};

/// Base geometry plus its current affine state
#[derive(Debug, Clone)]
pub struct MeshModel {
    base: BaseMesh,
    state: AffineState,
}

impl MeshModel {
    pub fn new(base: BaseMesh) -> Self {
        Self {
            base,
            state: AffineState::identity(),
        }
    }

    pub fn shift(&mut self, dx: f32, dy: f32, dz: f32) {
        self.shift_by(Vector3::new(dx, dy, dz));
    }

    pub fn shift_by(&mut self, offset: Vector3<f32>) {
        self.apply(Command::Shift(offset));
    }

    pub fn scale(&mut self, factor: f32) {
        self.apply(Command::Scale(factor));
    }

    pub fn reset(&mut self) {
        self.apply(Command::Reset);
    }

    pub fn apply(&mut self, command: Command) {
        self.state = self.state.apply(&command);
        debug!("{command:?} -> {:?}", self.state);
    }

    pub fn base(&self) -> &BaseMesh {
        &self.base
    }

    pub fn state(&self) -> &AffineState {
        &self.state
    }

    pub fn transformed_vertices(&self) -> Vec<Point3<f32>> {
        transform_vertices(&self.base, &self.state)
    }
}

/// Owns the model, the retained scene and the display surface.
///
/// Every mutating operation redraws before returning, so the display always
/// shows the current state.
pub struct Viewer<D: Display> {
    model: MeshModel,
    style: RenderStyle,
    scene: Scene,
    display: D,
    redraws: u64,
}

impl<D: Display> Viewer<D> {
    /// Create the viewer and draw the initial frame
    pub fn new(model: MeshModel, style: RenderStyle, display: D) -> Result<Self, D::Error> {
        let mut viewer = Self {
            model,
            style,
            scene: Scene::new(),
            display,
            redraws: 0,
        };
        viewer.redraw()?;
        Ok(viewer)
    }

    pub fn shift(&mut self, dx: f32, dy: f32, dz: f32) -> Result<(), D::Error> {
        self.apply(Command::shift(dx, dy, dz))
    }

    pub fn scale(&mut self, factor: f32) -> Result<(), D::Error> {
        self.apply(Command::Scale(factor))
    }

    pub fn reset(&mut self) -> Result<(), D::Error> {
        self.apply(Command::Reset)
    }

    pub fn apply(&mut self, command: Command) -> Result<(), D::Error> {
        self.model.apply(command);
        self.redraw()
    }

    /// Rebuild the scene from the current state and present it
    pub fn redraw(&mut self) -> Result<(), D::Error> {
        rebuild(
            &mut self.scene,
            self.model.base(),
            self.model.state(),
            &self.style,
        );
        self.redraws += 1;
        debug!("redraw #{}", self.redraws);
        self.display.present(&self.scene)
    }

    pub fn model(&self) -> &MeshModel {
        &self.model
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Mutable access to the surface, e.g. to resize it. Call
    /// [`Viewer::redraw`] afterwards to refresh its contents.
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Number of completed rebuilds, including the initial one
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{SCALE_DOWN, SCALE_UP};
    use approx::assert_relative_eq;
    use std::convert::Infallible;

    /// Remembers the vertex markers of every presented frame
    #[derive(Default)]
    struct Recorder {
        frames: Vec<(usize, Vec<Point3<f32>>)>,
    }

    impl Display for Recorder {
        type Error = Infallible;

        fn present(&mut self, scene: &Scene) -> Result<(), Infallible> {
            let markers = scene.markers().iter().map(|m| m.position).collect();
            self.frames.push((scene.polygon_count(), markers));
            Ok(())
        }
    }

    fn viewer() -> Viewer<Recorder> {
        let model = MeshModel::new(BaseMesh::letter_k().unwrap());
        Viewer::new(model, RenderStyle::default(), Recorder::default()).unwrap()
    }

    #[test]
    fn test_initial_draw() {
        let viewer = viewer();
        assert_eq!(viewer.redraw_count(), 1);
        assert_eq!(viewer.display().frames.len(), 1);
        assert_eq!(viewer.display().frames[0].0, 17);
        assert_eq!(viewer.display().frames[0].1.len(), 20);
    }

    #[test]
    fn test_every_operation_redraws() {
        let mut viewer = viewer();
        viewer.shift(1.0, 0.0, 0.0).unwrap();
        viewer.scale(SCALE_UP).unwrap();
        viewer.reset().unwrap();
        assert_eq!(viewer.redraw_count(), 4);
        assert_eq!(viewer.display().frames.len(), 4);
    }

    #[test]
    fn test_redraw_order_follows_commands() {
        let mut viewer = viewer();
        viewer.shift(2.0, 0.0, 0.0).unwrap();
        viewer.scale(2.0).unwrap();

        let frames = &viewer.display().frames;
        assert_eq!(frames[0].1[0], Point3::new(1.0, 1.0, 0.0));
        assert_eq!(frames[1].1[0], Point3::new(3.0, 1.0, 0.0));
        assert_eq!(frames[2].1[0], Point3::new(4.0, 2.0, 0.0));
    }

    #[test]
    fn test_scale_buttons_compound() {
        let mut viewer = viewer();
        viewer.scale(SCALE_UP).unwrap();
        viewer.scale(SCALE_DOWN).unwrap();
        assert_relative_eq!(viewer.model().state().scale, 0.99, epsilon = 1e-6);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut viewer = viewer();
        viewer.shift(1.0, -2.0, 3.0).unwrap();
        viewer.scale(-4.0).unwrap();
        viewer.reset().unwrap();
        assert_eq!(*viewer.model().state(), AffineState::identity());
        viewer.reset().unwrap();
        assert_eq!(*viewer.model().state(), AffineState::identity());
        assert_eq!(viewer.model().transformed_vertices(), viewer.model().base().vertices());
    }

    #[test]
    fn test_model_without_viewer() {
        let mut model = MeshModel::new(BaseMesh::letter_k().unwrap());
        model.shift(1.0, 2.0, 3.0);
        model.shift_by(Vector3::new(-1.0, 0.0, 0.0));
        assert_eq!(model.state().translation, Vector3::new(0.0, 2.0, 3.0));
    }
}
