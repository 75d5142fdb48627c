use derive_more::{Add, AddAssign, Display, Sub, SubAssign};
use serde::{Deserialize, Serialize};

/// A point in 3D world space. `x` and `z` span the map plane, `y` is up. Tile
/// positions live on the plane `y = 0` (see
/// [PlanarPosition](crate::PlanarPosition)); decorations and scenery float
/// above it.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    Add,
    Sub,
    AddAssign,
    SubAssign,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {}, {})", x, y, z)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Rotate this point around the vertical (y) axis passing through the
    /// world origin. Positive angles follow the right-hand rule.
    pub fn rotate_y(self, angle: f64) -> Self {
        let rotation = nalgebra::Rotation3::from_axis_angle(
            &nalgebra::Vector3::y_axis(),
            angle,
        );
        (rotation * nalgebra::Point3::from(self)).into()
    }
}

impl From<nalgebra::Point3<f64>> for Point3 {
    fn from(other: nalgebra::Point3<f64>) -> Self {
        Self::new(other.x, other.y, other.z)
    }
}

impl From<Point3> for nalgebra::Point3<f64> {
    fn from(point: Point3) -> Self {
        Self::new(point.x, point.y, point.z)
    }
}

// Meshes store single-precision vertices
impl From<Point3> for nalgebra::Point3<f32> {
    fn from(point: Point3) -> Self {
        Self::new(point.x as f32, point.y as f32, point.z as f32)
    }
}
