//! Sign predicates backed by the adaptive-precision `robust` crate.
//!
//! Both predicates follow the winding used throughout the triangulation:
//! counter-clockwise in a y-down frame (clockwise in the usual y-up frame).

use robust::{incircle, orient2d, Coord};

use crate::geometry::{Point, Scalar};

#[inline]
fn coord<T: Scalar>(p: &Point<T>) -> Coord<f64> {
    Coord {
        x: p.x.into(),
        y: p.y.into(),
    }
}

/// Twice the signed area of `abc`: positive when the points wind the same way
/// as the triangles we emit, negative the other way, zero when collinear.
#[inline]
pub(crate) fn orient<T: Scalar>(a: &Point<T>, b: &Point<T>, c: &Point<T>) -> f64 {
    orient2d(coord(a), coord(c), coord(b))
}

/// Whether `p` lies strictly inside the circumcircle of `abc`, where `abc` is
/// wound like an emitted triangle.
#[inline]
pub(crate) fn in_circle<T: Scalar>(a: &Point<T>, b: &Point<T>, c: &Point<T>, p: &Point<T>) -> bool {
    incircle(coord(a), coord(c), coord(b), coord(p)) > 0.0
}
