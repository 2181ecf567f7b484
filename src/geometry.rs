//! Scalar-generic geometry primitives shared by the triangulation engine.

use std::fmt;

use num_traits::Float;

/// Floating-point coordinate type accepted by the triangulation.
///
/// Implemented for every `Float` that widens losslessly to `f64`, which in
/// practice means `f32` and `f64`.
pub trait Scalar: Float + Into<f64> + fmt::Debug {}

impl<T> Scalar for T where T: Float + Into<f64> + fmt::Debug {}

#[inline]
pub(crate) fn constant<T: Scalar>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

/// Tolerance below which two coordinates are considered equal for the purpose
/// of skipping near-duplicate points.
#[inline]
pub fn epsilon<T: Scalar>() -> T {
    T::epsilon() + T::epsilon()
}

/// Represents a 2D point in the input vector.
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point<T = f64> {
    pub x: T,
    pub y: T,
}

impl<T: fmt::Display> fmt::Debug for Point<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

impl<T: Scalar> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Reads point `i` out of a flat `[x0, y0, x1, y1, ..]` buffer.
    #[inline]
    pub(crate) fn at(coords: &[T], i: usize) -> Self {
        Self {
            x: coords[2 * i],
            y: coords[2 * i + 1],
        }
    }

    pub(crate) fn dist2(&self, p: &Self) -> T {
        let dx = self.x - p.x;
        let dy = self.y - p.y;
        dx * dx + dy * dy
    }

    fn circumdelta(&self, b: &Self, c: &Self) -> (T, T) {
        let dx = b.x - self.x;
        let dy = b.y - self.y;
        let ex = c.x - self.x;
        let ey = c.y - self.y;

        let bl = dx * dx + dy * dy;
        let cl = ex * ex + ey * ey;
        let d = constant::<T>(0.5) / (dx * ey - dy * ex);

        let x = (ey * bl - dy * cl) * d;
        let y = (dx * cl - ex * bl) * d;
        (x, y)
    }

    /// Squared circumradius; infinite or NaN when the three points are collinear.
    pub(crate) fn circumradius2(&self, b: &Self, c: &Self) -> T {
        let (x, y) = self.circumdelta(b, c);
        x * x + y * y
    }

    pub(crate) fn circumcenter(&self, b: &Self, c: &Self) -> Self {
        let (x, y) = self.circumdelta(b, c);
        Self {
            x: self.x + x,
            y: self.y + y,
        }
    }

    pub(crate) fn nearly_equals(&self, p: &Self) -> bool {
        let eps = epsilon::<T>();
        (self.x - p.x).abs() <= eps && (self.y - p.y).abs() <= eps
    }
}

/// Center of the circle through `(ax, ay)`, `(bx, by)` and `(cx, cy)`.
///
/// Used by Voronoi construction to place the vertex dual to a triangle. The
/// result is non-finite when the three points are collinear.
pub fn circumcenter<T: Scalar>(ax: T, ay: T, bx: T, by: T, cx: T, cy: T) -> (T, T) {
    let c = Point::new(ax, ay).circumcenter(&Point::new(bx, by), &Point::new(cx, cy));
    (c.x, c.y)
}

/// Monotonically increases with the real angle of `(dx, dy)` over `[0, 1]`,
/// without trigonometry.
#[inline]
pub(crate) fn pseudo_angle<T: Scalar>(dx: T, dy: T) -> T {
    let p = dx / (dx.abs() + dy.abs());
    let a = if dy > T::zero() {
        constant::<T>(3.0) - p
    } else {
        T::one() + p
    };
    a / constant::<T>(4.0)
}

/// Axis-aligned rectangle, used both for the bounding box of the input and
/// for the caller-adjustable clipping bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BBox<T = f64> {
    pub min_x: T,
    pub min_y: T,
    pub max_x: T,
    pub max_y: T,
}

impl<T: Scalar> BBox<T> {
    /// Bounding box of a flat coordinate buffer. An empty buffer yields an
    /// inverted (infinite) box.
    pub fn from_coords(coords: &[T]) -> Self {
        let mut bbox = Self {
            min_x: T::infinity(),
            min_y: T::infinity(),
            max_x: T::neg_infinity(),
            max_y: T::neg_infinity(),
        };
        for p in coords.chunks_exact(2) {
            bbox.min_x = bbox.min_x.min(p[0]);
            bbox.min_y = bbox.min_y.min(p[1]);
            bbox.max_x = bbox.max_x.max(p[0]);
            bbox.max_y = bbox.max_y.max(p[1]);
        }
        bbox
    }

    pub fn center(&self) -> Point<T> {
        let half = constant::<T>(0.5);
        Point {
            x: (self.min_x + self.max_x) * half,
            y: (self.min_y + self.max_y) * half,
        }
    }

    pub fn width(&self) -> T {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> T {
        self.max_y - self.min_y
    }
}
