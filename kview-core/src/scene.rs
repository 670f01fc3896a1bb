/// Retained scene: what the display surface is asked to draw
use nalgebra::Point3;

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const RED: Rgb = Rgb(214, 39, 40);
    pub const BLUE: Rgb = Rgb(31, 119, 180);
    pub const GREY: Rgb = Rgb(128, 128, 128);
}

/// Visible range of one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLimits {
    pub min: f32,
    pub max: f32,
}

impl AxisLimits {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn center(&self) -> f32 {
        (self.min + self.max) / 2.0
    }

    pub fn span(&self) -> f32 {
        self.max - self.min
    }
}

/// Axis labels and limits, in X, Y, Z order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AxesFrame {
    pub labels: Option<[String; 3]>,
    pub limits: Option<[AxisLimits; 3]>,
}

/// Flat polygon given by its corners in drawing order
pub type Polygon = Vec<Point3<f32>>;

/// A batch of polygons sharing one style
#[derive(Debug, Clone, PartialEq)]
pub struct PolyCollection {
    pub polygons: Vec<Polygon>,
    pub face_color: Rgb,
    pub edge_color: Rgb,
    /// Face opacity in `[0, 1]`
    pub alpha: f32,
}

/// A single point marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub position: Point3<f32>,
    pub color: Rgb,
    pub size: f32,
}

/// Everything currently drawn in the 3D view
#[derive(Debug, Clone, Default)]
pub struct Scene {
    axes: AxesFrame,
    collections: Vec<PolyCollection>,
    markers: Vec<Marker>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all geometry and axis decorations
    pub fn clear(&mut self) {
        self.axes = AxesFrame::default();
        self.collections.clear();
        self.markers.clear();
    }

    pub fn set_axis_labels(&mut self, x: &str, y: &str, z: &str) {
        self.axes.labels = Some([x.to_string(), y.to_string(), z.to_string()]);
    }

    pub fn set_axis_limits(&mut self, limits: [AxisLimits; 3]) {
        self.axes.limits = Some(limits);
    }

    pub fn add_collection(&mut self, collection: PolyCollection) {
        self.collections.push(collection);
    }

    pub fn scatter(&mut self, position: Point3<f32>, color: Rgb, size: f32) {
        self.markers.push(Marker {
            position,
            color,
            size,
        });
    }

    pub fn axes(&self) -> &AxesFrame {
        &self.axes
    }

    pub fn collections(&self) -> &[PolyCollection] {
        &self.collections
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn polygon_count(&self) -> usize {
        self.collections.iter().map(|c| c.polygons.len()).sum()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }
}
