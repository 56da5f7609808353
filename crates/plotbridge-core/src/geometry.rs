// File: crates/plotbridge-core/src/geometry.rs
// Summary: Flat boundary value types (Vec2/Vec4/Point) and plot-space Range/Rect helpers.
// Notes:
// - Vec2, Vec4 and Point are passed by value across the C surface, so their
//   layout must match the engine's structs exactly: field order x,y[,z,w], no padding.

/// Two-component single precision vector, used for style sizes and paddings.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// Four-component single precision vector, used for RGBA colors.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

/// Double precision point in plot coordinates.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

const _: () = {
    assert!(std::mem::size_of::<Vec2>() == 8);
    assert!(std::mem::align_of::<Vec2>() == 4);
    assert!(std::mem::size_of::<Vec4>() == 16);
    assert!(std::mem::align_of::<Vec4>() == 4);
    assert!(std::mem::size_of::<Point>() == 16);
    assert!(std::mem::align_of::<Point>() == 8);
};

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Bitwise equality; distinguishes -0.0 from 0.0 and compares NaN payloads.
    pub fn bits_eq(&self, other: &Self) -> bool {
        self.x.to_bits() == other.x.to_bits() && self.y.to_bits() == other.y.to_bits()
    }
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Build an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    pub fn bits_eq(&self, other: &Self) -> bool {
        self.to_array().iter().zip(other.to_array()).all(|(a, b)| a.to_bits() == b.to_bits())
    }

    pub const fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f32; 2]> for Vec2 {
    fn from(v: [f32; 2]) -> Self { Self::new(v[0], v[1]) }
}

impl From<Vec2> for [f32; 2] {
    fn from(v: Vec2) -> Self { [v.x, v.y] }
}

impl From<[f32; 4]> for Vec4 {
    fn from(v: [f32; 4]) -> Self { Self::new(v[0], v[1], v[2], v[3]) }
}

impl From<Vec4> for [f32; 4] {
    fn from(v: Vec4) -> Self { v.to_array() }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self { Self::new(x, y) }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self { (p.x, p.y) }
}

/// Closed interval `[min, max]` on one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
    pub fn contains(&self, value: f64) -> bool { value >= self.min && value <= self.max }
    pub fn size(&self) -> f64 { self.max - self.min }
    pub fn clamp(&self, value: f64) -> f64 { clamp(value, self.min, self.max) }
}

/// Pair of X/Y ranges.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: Range,
    pub y: Range,
}

impl Rect {
    /// Construct from axis-aligned min/max values.
    pub const fn from_aabb(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self { x: Range::new(x_min, x_max), y: Range::new(y_min, y_max) }
    }
    pub fn contains(&self, p: Point) -> bool { self.x.contains(p.x) && self.y.contains(p.y) }
    pub fn size(&self) -> Point { Point::new(self.x.size(), self.y.size()) }
    pub fn clamp(&self, p: Point) -> Point { Point::new(self.x.clamp(p.x), self.y.clamp(p.y)) }
    pub fn min(&self) -> Point { Point::new(self.x.min, self.y.min) }
    pub fn max(&self) -> Point { Point::new(self.x.max, self.y.max) }
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}
