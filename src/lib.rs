/*!
A fast 2D [Delaunay Triangulation](https://en.wikipedia.org/wiki/Delaunay_triangulation) library for Rust,
with the hull rays and per-point halfedge index needed to derive a Voronoi diagram.

Built on the incremental hull-sweep algorithm of [Delaunator](https://github.com/mapbox/delaunator).

# Example

```rust
use delaunay2d::{Delaunay, Point};

let points = vec![
    Point { x: 0., y: 0. },
    Point { x: 1., y: 0. },
    Point { x: 1., y: 1. },
    Point { x: 0., y: 1. },
];

let result = Delaunay::from_points(&points);
println!("{:?}", result.triangles); // [0, 2, 1, 0, 3, 2]
```

Triangles are counter-clockwise in a y-down (screen) coordinate frame. Every
type is generic over the coordinate precision; `f32` works the same way:

```rust
use delaunay2d::Delaunay;

let d = Delaunay::new(vec![0f32, 0., 4., 0., 0., 3., 4., 3.]);
assert_eq!(d.len(), 2);
assert_eq!(d.hull.len(), 4);
```
*/

mod delaunay;
mod error;
mod geometry;
mod hull;
mod predicates;
mod seed;
mod sort;
mod triangulator;

pub use crate::delaunay::{Delaunay, PointLike};
pub use crate::error::{Error, Result};
pub use crate::geometry::{circumcenter, epsilon, BBox, Point, Scalar};
pub use crate::triangulator::EDGE_STACK_CAPACITY;

/// Near-duplicate `f64` points (where both `x` and `y` only differ within this value)
/// will not be included in the triangulation for robustness. See [`epsilon`]
/// for other precisions.
pub const EPSILON: f64 = f64::EPSILON * 2.0;

/// Represents the area outside of the triangulation.
/// Halfedges on the convex hull (which don't have an adjacent halfedge)
/// will have this value.
pub const EMPTY: usize = usize::MAX;

/// Next halfedge in a triangle.
#[inline]
pub fn next_halfedge(i: usize) -> usize {
    if i % 3 == 2 {
        i - 2
    } else {
        i + 1
    }
}

/// Previous halfedge in a triangle.
#[inline]
pub fn prev_halfedge(i: usize) -> usize {
    if i % 3 == 0 {
        i + 2
    } else {
        i - 1
    }
}

/// Triangulate a set of 2D points.
///
/// Shorthand for [`Delaunay::from_points`]. Collinear input yields no
/// triangles and a hull listing the distinct points along their line.
pub fn triangulate<T: Scalar>(points: &[Point<T>]) -> Delaunay<T> {
    Delaunay::from_points(points)
}
