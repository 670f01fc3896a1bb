/// Terminal surface for the viewer: rasterize, queue, flush
use std::io::{self, Write};

use kview_core::{AxisLimits, Camera, Display, Scene};

use crate::renderer::AsciiRenderer;

/// Terminal cells are roughly twice as tall as they are wide
pub const CELL_ASPECT: f32 = 0.5;

/// Screen region the 3D view occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
}

pub struct TerminalDisplay<W: Write> {
    writer: W,
    renderer: AsciiRenderer,
    camera: Camera,
    limits: [AxisLimits; 3],
    viewport: Viewport,
    color: bool,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(writer: W, limits: [AxisLimits; 3], viewport: Viewport, color: bool) -> Self {
        Self {
            writer,
            renderer: AsciiRenderer::new(viewport.width as usize, viewport.height as usize),
            camera: camera_for(&limits, viewport),
            limits,
            viewport,
            color,
        }
    }

    /// Move or resize the view. The next present uses the new region.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.renderer
            .resize(viewport.width as usize, viewport.height as usize);
        self.camera = camera_for(&self.limits, viewport);
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn renderer(&self) -> &AsciiRenderer {
        &self.renderer
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }
}

fn camera_for(limits: &[AxisLimits; 3], viewport: Viewport) -> Camera {
    Camera::for_frame(
        limits,
        viewport.width as u32,
        viewport.height as u32,
        CELL_ASPECT,
    )
}

impl<W: Write> Display for TerminalDisplay<W> {
    type Error = io::Error;

    fn present(&mut self, scene: &Scene) -> io::Result<()> {
        self.renderer.render_scene(scene, &self.camera);
        self.renderer.draw(
            &mut self.writer,
            self.viewport.left,
            self.viewport.top,
            self.color,
        )?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kview_core::{BaseMesh, MeshModel, RenderStyle, Viewer};

    fn viewport() -> Viewport {
        Viewport {
            left: 0,
            top: 1,
            width: 60,
            height: 30,
        }
    }

    #[test]
    fn test_present_writes_frame() {
        let style = RenderStyle::default();
        let display = TerminalDisplay::new(Vec::new(), style.axis_limits, viewport(), false);
        let model = MeshModel::new(BaseMesh::letter_k().unwrap());
        let mut viewer = Viewer::new(model, style, display).unwrap();

        let written = viewer.display().written_len();
        assert!(written > 60 * 30);

        viewer.scale(2.0).unwrap();
        assert!(viewer.display().written_len() > written);
    }

    #[test]
    fn test_all_markers_visible_by_default() {
        let style = RenderStyle::default();
        let display = TerminalDisplay::new(io::sink(), style.axis_limits, viewport(), false);
        let model = MeshModel::new(BaseMesh::letter_k().unwrap());
        let viewer = Viewer::new(model, style, display).unwrap();

        let text = viewer.display().renderer().lines().concat();
        assert!(text.contains('o'));
        assert!(text.contains('X'));
        assert!(text.contains('Y'));
        assert!(text.contains('Z'));
    }

    #[test]
    fn test_far_shift_does_not_break_present() {
        let style = RenderStyle::default();
        let display = TerminalDisplay::new(io::sink(), style.axis_limits, viewport(), false);
        let model = MeshModel::new(BaseMesh::letter_k().unwrap());
        let mut viewer = Viewer::new(model, style, display).unwrap();

        viewer.shift(0.0, 0.0, 1e20).unwrap();
        viewer.shift(-1e20, 1e20, 0.0).unwrap();
        viewer.scale(1e10).unwrap();

        assert_eq!(viewer.scene().polygon_count(), 17);
        assert_eq!(viewer.scene().marker_count(), 20);
        assert_eq!(viewer.display().renderer().lines().len(), 30);
    }

    #[test]
    fn test_resize_changes_raster() {
        let mut display = TerminalDisplay::new(
            io::sink(),
            RenderStyle::default().axis_limits,
            viewport(),
            false,
        );
        display.set_viewport(Viewport {
            left: 0,
            top: 0,
            width: 20,
            height: 8,
        });
        display.present(&Scene::new()).unwrap();
        assert_eq!(display.renderer().lines().len(), 8);
        assert_eq!(display.renderer().lines()[0].chars().count(), 20);
    }

    impl TerminalDisplay<Vec<u8>> {
        fn written_len(&self) -> usize {
            self.writer.len()
        }
    }
}
