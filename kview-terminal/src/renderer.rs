/// ASCII rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use kview_core::{Camera, Rgb, Scene};
use nalgebra::Point3;
use std::io::Write;

/// Character luminosity ramp for face coverage (emptiest to densest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

const FRAME_GLYPH: char = '.';
const FRAME_COLOR: Rgb = Rgb::GREY;

/// One character cell of the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    color: Option<Rgb>,
    /// Accumulated face opacity
    coverage: f32,
}

impl Cell {
    const EMPTY: Cell = Cell {
        glyph: ' ',
        color: None,
        coverage: 0.0,
    };
}

/// ASCII renderer that converts a retained scene to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; width * height],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::EMPTY; width * height];
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Rasterize the whole scene: axes frame, faces, outlines, then markers
    pub fn render_scene(&mut self, scene: &Scene, camera: &Camera) {
        self.clear();
        self.render_axes(scene, camera);

        for collection in scene.collections() {
            for polygon in &collection.polygons {
                if let Some(points) = self.project_all(polygon, camera) {
                    self.fill_polygon(&points, collection.alpha, collection.face_color);
                }
            }
            for polygon in &collection.polygons {
                if let Some(points) = self.project_all(polygon, camera) {
                    self.outline_polygon(&points, collection.edge_color);
                }
            }
        }

        for marker in scene.markers() {
            if let Some((x, y)) = self.project(&marker.position, camera) {
                let glyph = if marker.size >= 100.0 { 'O' } else { 'o' };
                self.plot(x.floor() as i32, y.floor() as i32, glyph, marker.color);
            }
        }
    }

    fn project(&self, point: &Point3<f32>, camera: &Camera) -> Option<(f32, f32)> {
        camera
            .project_to_screen(point, self.width as u32, self.height as u32)
            .map(|(x, y, _)| (x, y))
    }

    fn project_all(&self, points: &[Point3<f32>], camera: &Camera) -> Option<Vec<(f32, f32)>> {
        points.iter().map(|p| self.project(p, camera)).collect()
    }

    fn render_axes(&mut self, scene: &Scene, camera: &Camera) {
        let Some(limits) = scene.axes().limits else {
            return;
        };
        let [x, y, z] = limits;

        // The 12 edges of the limits box
        let corner = |i: usize| {
            Point3::new(
                if i & 1 == 0 { x.min } else { x.max },
                if i & 2 == 0 { y.min } else { y.max },
                if i & 4 == 0 { z.min } else { z.max },
            )
        };
        for i in 0..8 {
            for bit in [1, 2, 4] {
                if i & bit == 0 {
                    let from = self.project(&corner(i), camera);
                    let to = self.project(&corner(i | bit), camera);
                    if let (Some(from), Some(to)) = (from, to) {
                        self.line(from, to, Some(FRAME_GLYPH), FRAME_COLOR);
                    }
                }
            }
        }

        if let Some(labels) = &scene.axes().labels {
            // Each label sits just outside the midpoint of its axis edge
            let anchors = [
                Point3::new(x.center(), y.min - y.span() * 0.12, z.min),
                Point3::new(x.max + x.span() * 0.12, y.center(), z.min),
                Point3::new(x.min, y.max + y.span() * 0.05, z.center()),
            ];
            for (label, anchor) in labels.iter().zip(anchors) {
                if let Some((sx, sy)) = self.project(&anchor, camera) {
                    self.text(sx.floor() as i32, sy.floor() as i32, label, FRAME_COLOR);
                }
            }
        }
    }

    /// Fill a flat polygon with even-odd coverage, blending `alpha` into
    /// whatever faces were already drawn in each cell
    fn fill_polygon(&mut self, points: &[(f32, f32)], alpha: f32, color: Rgb) {
        if points.len() < 3 {
            return;
        }

        let min_x = points.iter().map(|p| p.0).fold(f32::INFINITY, f32::min).floor() as i32;
        let max_x = points.iter().map(|p| p.0).fold(f32::NEG_INFINITY, f32::max).ceil() as i32;
        let min_y = points.iter().map(|p| p.1).fold(f32::INFINITY, f32::min).floor() as i32;
        let max_y = points.iter().map(|p| p.1).fold(f32::NEG_INFINITY, f32::max).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        let alpha = alpha.clamp(0.0, 1.0);
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                if !contains(points, (x as f32 + 0.5, y as f32 + 0.5)) {
                    continue;
                }
                let idx = y as usize * self.width + x as usize;
                let cell = &mut self.cells[idx];
                cell.coverage = 1.0 - (1.0 - cell.coverage) * (1.0 - alpha);
                let ramp_idx = (cell.coverage * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
                cell.glyph = LUMINOSITY_RAMP[ramp_idx.min(LUMINOSITY_RAMP.len() - 1)];
                cell.color = Some(color);
            }
        }
    }

    fn outline_polygon(&mut self, points: &[(f32, f32)], color: Rgb) {
        for (i, &from) in points.iter().enumerate() {
            let to = points[(i + 1) % points.len()];
            self.line(from, to, None, color);
        }
    }

    /// Bresenham line, clipped to the viewport first. Without a fixed
    /// glyph, the glyph follows the slope.
    fn line(&mut self, from: (f32, f32), to: (f32, f32), glyph: Option<char>, color: Rgb) {
        let glyph = glyph.unwrap_or_else(|| slope_glyph(to.0 - from.0, to.1 - from.1));

        let Some((from, to)) = clip_segment(from, to, self.width as f64, self.height as f64)
        else {
            return;
        };

        let (mut x0, mut y0) = (from.0.floor() as i64, from.1.floor() as i64);
        let (x1, y1) = (to.0.floor() as i64, to.1.floor() as i64);

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0 as i32, y0 as i32, glyph, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn text(&mut self, x: i32, y: i32, text: &str, color: Rgb) {
        for (i, c) in text.chars().enumerate() {
            self.plot(x.saturating_add(i as i32), y, c, color);
        }
    }

    fn plot(&mut self, x: i32, y: i32, glyph: char, color: Rgb) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let cell = &mut self.cells[y as usize * self.width + x as usize];
        cell.glyph = glyph;
        cell.color = Some(color);
    }

    /// The viewport as plain text, one string per row
    pub fn lines(&self) -> Vec<String> {
        if self.width == 0 {
            return vec![String::new(); self.height];
        }
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|c| c.glyph).collect())
            .collect()
    }

    /// Queue the viewport at terminal position (`left`, `top`)
    pub fn draw<W: Write>(
        &self,
        writer: &mut W,
        left: u16,
        top: u16,
        color: bool,
    ) -> std::io::Result<()> {
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(left, top + y as u16))?;
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                if color {
                    let fg = cell.color.map(terminal_color).unwrap_or(Color::Reset);
                    writer.queue(SetForegroundColor(fg))?;
                }
                writer.queue(Print(cell.glyph))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Map a scene color to the terminal. Pure black would vanish on dark
/// terminals, so it becomes dark grey.
fn terminal_color(rgb: Rgb) -> Color {
    match rgb {
        Rgb::BLACK => Color::DarkGrey,
        Rgb(r, g, b) => Color::Rgb { r, g, b },
    }
}

/// Liang-Barsky clip of a segment to `[0, width) x [0, height)`.
///
/// Runs in `f64` so that far-off endpoints cannot overflow the deltas. The
/// coordinate on the clipping boundary is snapped to the boundary itself,
/// since `t` alone cannot resolve a few cells out of a very long segment.
fn clip_segment(
    from: (f32, f32),
    to: (f32, f32),
    width: f64,
    height: f64,
) -> Option<((f64, f64), (f64, f64))> {
    // Keep the far edges inside the last cell once floored
    let max_x = width - 1e-6;
    let max_y = height - 1e-6;
    if max_x < 0.0 || max_y < 0.0 {
        return None;
    }

    let (x0, y0) = (from.0 as f64, from.1 as f64);
    let (dx, dy) = (to.0 as f64 - x0, to.1 as f64 - y0);
    if !(x0.is_finite() && y0.is_finite() && dx.is_finite() && dy.is_finite()) {
        return None;
    }

    // (p, q, axis, boundary)
    let edges = [
        (-dx, x0, 0, 0.0),
        (dx, max_x - x0, 0, max_x),
        (-dy, y0, 1, 0.0),
        (dy, max_y - y0, 1, max_y),
    ];

    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    let (mut enter, mut exit) = (None, None);
    for (p, q, axis, boundary) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            if r >= t0 {
                t0 = r;
                enter = Some((axis, boundary));
            }
        } else {
            if r < t0 {
                return None;
            }
            if r <= t1 {
                t1 = r;
                exit = Some((axis, boundary));
            }
        }
    }

    let at = |t: f64, snap: Option<(usize, f64)>| {
        let mut point = (x0 + t * dx, y0 + t * dy);
        match snap {
            Some((0, boundary)) => point.0 = boundary,
            Some((_, boundary)) => point.1 = boundary,
            None => {}
        }
        point
    };
    Some((at(t0, enter), at(t1, exit)))
}

fn slope_glyph(dx: f32, dy: f32) -> char {
    let (adx, ady) = (dx.abs(), dy.abs());
    if ady * 2.0 < adx {
        '-'
    } else if adx * 2.0 < ady {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

/// Even-odd point-in-polygon test
fn contains(points: &[(f32, f32)], p: (f32, f32)) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = points[i];
        let (xj, yj) = points[j];
        if (yi > p.1) != (yj > p.1) && p.0 < (xj - xi) * (p.1 - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use kview_core::{AxisLimits, PolyCollection};

    fn camera(width: usize, height: usize) -> Camera {
        Camera::for_frame(&[AxisLimits::new(-5.0, 10.0); 3], width as u32, height as u32, 0.5)
    }

    #[test]
    fn test_contains() {
        let square = [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)];
        assert!(contains(&square, (2.0, 2.0)));
        assert!(!contains(&square, (5.0, 2.0)));
        assert!(!contains(&square, (2.0, -0.5)));
    }

    #[test]
    fn test_slope_glyph() {
        assert_eq!(slope_glyph(5.0, 0.0), '-');
        assert_eq!(slope_glyph(0.0, 5.0), '|');
        assert_eq!(slope_glyph(3.0, 3.0), '\\');
        assert_eq!(slope_glyph(3.0, -3.0), '/');
    }

    #[test]
    fn test_overlapping_faces_get_denser() {
        let mut renderer = AsciiRenderer::new(10, 10);
        let square = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
        renderer.fill_polygon(&square, 0.5, Rgb::BLUE);
        let once = renderer.cells[55].glyph;
        renderer.fill_polygon(&square, 0.5, Rgb::BLUE);
        let twice = renderer.cells[55].glyph;
        assert_eq!(once, LUMINOSITY_RAMP[5]);
        assert_eq!(twice, LUMINOSITY_RAMP[7]);
    }

    #[test]
    fn test_empty_scene_is_blank() {
        let mut renderer = AsciiRenderer::new(20, 10);
        renderer.render_scene(&Scene::new(), &camera(20, 10));
        assert!(renderer.lines().iter().all(|l| l.trim().is_empty()));
        assert_eq!(renderer.lines().len(), 10);
    }

    #[test]
    fn test_markers_drawn_over_faces() {
        let mut scene = Scene::new();
        scene.add_collection(PolyCollection {
            polygons: vec![vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(10.0, 0.0, 0.0),
                Point3::new(10.0, 10.0, 0.0),
                Point3::new(0.0, 10.0, 0.0),
            ]],
            face_color: Rgb::BLUE,
            edge_color: Rgb::BLACK,
            alpha: 0.5,
        });
        scene.scatter(Point3::new(5.0, 5.0, 0.0), Rgb::RED, 50.0);

        let mut renderer = AsciiRenderer::new(60, 30);
        renderer.render_scene(&scene, &camera(60, 30));
        let text = renderer.lines().concat();
        assert_eq!(text.matches('o').count(), 1);
        assert!(text.contains('+'));
    }

    #[test]
    fn test_line_running_off_screen_is_clipped() {
        let mut renderer = AsciiRenderer::new(60, 30);
        renderer.line((30.0, 15.0), (1000.0, 15.0), None, Rgb::BLACK);
        let row = &renderer.lines()[15];
        assert_eq!(row, &format!("{}{}", " ".repeat(30), "-".repeat(30)));
    }

    #[test]
    fn test_line_through_viewport_from_far_away() {
        let mut renderer = AsciiRenderer::new(60, 30);
        renderer.line((-1e20, 10.0), (1e20, 10.0), Some('='), Rgb::BLACK);
        renderer.line((-1000.0, -1000.0), (1000.0, 1000.0), Some('x'), Rgb::BLACK);
        let lines = renderer.lines();
        assert_eq!(lines[10].matches('=').count() + lines[10].matches('x').count(), 60);
        assert!(lines[0].starts_with('x'));
    }

    #[test]
    fn test_line_missing_viewport_draws_nothing() {
        let mut renderer = AsciiRenderer::new(20, 10);
        renderer.line((-50.0, -5.0), (100.0, -1.0), Some('#'), Rgb::BLACK);
        renderer.line((25.0, 0.0), (25.0, 9.0), Some('#'), Rgb::BLACK);
        assert!(!renderer.lines().concat().contains('#'));
    }

    #[test]
    fn test_clip_segment_keeps_inner_segment() {
        let clipped = clip_segment((1.0, 2.0), (5.0, 6.0), 20.0, 10.0).unwrap();
        assert_eq!(clipped, ((1.0, 2.0), (5.0, 6.0)));
    }

    #[test]
    fn test_offscreen_geometry_is_clipped() {
        let mut scene = Scene::new();
        scene.scatter(Point3::new(1000.0, 1000.0, 1000.0), Rgb::RED, 50.0);
        let mut renderer = AsciiRenderer::new(20, 10);
        renderer.render_scene(&scene, &camera(20, 10));
        assert!(!renderer.lines().concat().contains('o'));
    }
}
