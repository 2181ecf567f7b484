use tracing::debug;

use crate::error::{Error, Result};
use crate::geometry::{BBox, Point, Scalar};
use crate::triangulator::{triangulate, Mesh};
use crate::{next_halfedge, EMPTY};

/// Anything that can hand out its coordinates by position: `component(0)` is
/// read as `x` and `component(1)` as `y`.
///
/// Out-of-range components read as NaN.
pub trait PointLike<T> {
    fn component(&self, index: usize) -> T;
}

impl<T: Scalar> PointLike<T> for Point<T> {
    fn component(&self, index: usize) -> T {
        match index {
            0 => self.x,
            1 => self.y,
            _ => T::nan(),
        }
    }
}

impl<T: Scalar> PointLike<T> for (T, T) {
    fn component(&self, index: usize) -> T {
        match index {
            0 => self.0,
            1 => self.1,
            _ => T::nan(),
        }
    }
}

impl<T: Scalar, const N: usize> PointLike<T> for [T; N] {
    fn component(&self, index: usize) -> T {
        self.get(index).copied().unwrap_or_else(T::nan)
    }
}

impl<T: Scalar> PointLike<T> for Vec<T> {
    fn component(&self, index: usize) -> T {
        self.get(index).copied().unwrap_or_else(T::nan)
    }
}

/// Delaunay triangulation of a point set, together with the hull rays and
/// per-point halfedge index needed to build its Voronoi diagram.
///
/// All output vectors are rebuilt together by [`Delaunay::update`]; none is
/// ever patched in place.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delaunay<T = f64> {
    coords: Vec<T>,

    /// Bounding box of the input points.
    pub bbox: BBox<T>,

    /// Clipping rectangle for unbounded Voronoi cells. Starts out equal to
    /// `bbox`; callers may widen or shrink it freely.
    pub bounds: BBox<T>,

    /// A vector of point indices where each triple represents a Delaunay triangle.
    /// All triangles are directed counter-clockwise.
    pub triangles: Vec<usize>,

    /// A vector of adjacent halfedge indices that allows traversing the triangulation graph.
    ///
    /// `i`-th half-edge in the array corresponds to vertex `triangles[i]`
    /// the half-edge is coming from. `halfedges[i]` is the index of a twin half-edge
    /// in an adjacent triangle (or `EMPTY` for outer half-edges on the convex hull).
    pub halfedges: Vec<usize>,

    /// A vector of indices that reference points on the convex hull of the triangulation,
    /// counter-clockwise. For collinear input this is every distinct point in
    /// order along the line.
    pub hull: Vec<usize>,

    /// Outward rays for hull points, four slots per point: `4i..4i + 2` is
    /// derived from the hull edge arriving at `i`, `4i + 2..4i + 4` from the
    /// edge leaving it. Zero for interior points.
    pub vectors: Vec<T>,

    hull_next: Vec<usize>,
    hull_prev: Vec<usize>,
    inedges: Vec<usize>,
}

impl<T: Scalar> Delaunay<T> {
    /// Triangulates a flat `[x0, y0, x1, y1, ..]` coordinate buffer.
    ///
    /// No validation is done: a trailing odd coordinate is ignored and
    /// non-finite values propagate into the output.
    pub fn new(coords: Vec<T>) -> Self {
        let bbox = BBox::from_coords(&coords);
        let mut delaunay = Self {
            coords,
            bbox,
            bounds: bbox,
            triangles: Vec::new(),
            halfedges: Vec::new(),
            hull: Vec::new(),
            vectors: Vec::new(),
            hull_next: Vec::new(),
            hull_prev: Vec::new(),
            inedges: Vec::new(),
        };
        delaunay.update();
        delaunay
    }

    /// Triangulates points read through [`PointLike`].
    pub fn from_points<P: PointLike<T>>(points: &[P]) -> Self {
        Self::from_points_with(points, |p| p.component(0), |p| p.component(1))
    }

    /// Triangulates arbitrary values using caller-supplied coordinate accessors.
    pub fn from_points_with<P, FX, FY>(points: &[P], fx: FX, fy: FY) -> Self
    where
        FX: Fn(&P) -> T,
        FY: Fn(&P) -> T,
    {
        let coords = points.iter().flat_map(|p| [fx(p), fy(p)]).collect();
        Self::new(coords)
    }

    /// Discards every derived array and triangulates the current coordinates
    /// again. `bbox` is recomputed and `bounds` reset to it.
    pub fn update(&mut self) -> &mut Self {
        self.bbox = BBox::from_coords(&self.coords);
        self.bounds = self.bbox;

        let Mesh {
            triangles,
            halfedges,
            hull,
            ..
        } = triangulate(&self.coords, &self.bbox);
        self.triangles = triangles;
        self.halfedges = halfedges;
        self.hull = hull;

        self.link_hull();
        self.compute_rays();
        self.index_inedges();

        debug!(
            points = self.point_count(),
            triangles = self.len(),
            hull = self.hull.len(),
            "delaunay updated"
        );
        self
    }

    /// Rebuilds the hull linkage from the final hull sequence.
    fn link_hull(&mut self) {
        let n = self.point_count();
        self.hull_next = vec![EMPTY; n];
        self.hull_prev = vec![EMPTY; n];
        for (k, &h) in self.hull.iter().enumerate() {
            let next = self.hull[(k + 1) % self.hull.len()];
            self.hull_next[h] = next;
            self.hull_prev[next] = h;
        }
    }

    /// Each hull edge `(x0, y0) -> (x1, y1)` contributes the outward normal
    /// `(y0 - y1, x1 - x0)` to both of its endpoints.
    fn compute_rays(&mut self) {
        self.vectors = vec![T::zero(); 2 * self.coords.len()];
        let Some(&last) = self.hull.last() else {
            return;
        };

        let mut p1 = 4 * last;
        let mut v1 = Point::at(&self.coords, last);
        for &h in &self.hull {
            let (p0, v0) = (p1, v1);
            p1 = 4 * h;
            v1 = Point::at(&self.coords, h);

            let dx = v0.y - v1.y;
            let dy = v1.x - v0.x;
            self.vectors[p0 + 2] = dx;
            self.vectors[p0 + 3] = dy;
            self.vectors[p1] = dx;
            self.vectors[p1 + 1] = dy;
        }
    }

    /// Maps every point to a halfedge ending at it, preferring hull halfedges.
    fn index_inedges(&mut self) {
        self.inedges = vec![EMPTY; self.point_count()];
        for (e, &twin) in self.halfedges.iter().enumerate() {
            let endpoint = self.triangles[next_halfedge(e)];
            if twin == EMPTY || self.inedges[endpoint] == EMPTY {
                self.inedges[endpoint] = e;
            }
        }
    }

    fn check(&self, id: usize) -> Result<()> {
        let len = self.point_count();
        if id < len {
            Ok(())
        } else {
            Err(Error::PointOutOfRange { id, len })
        }
    }

    /// The input coordinates.
    pub fn coords(&self) -> &[T] {
        &self.coords
    }

    /// Mutable access to the input coordinates. The derived arrays go stale
    /// until [`Delaunay::update`] is called.
    pub fn coords_mut(&mut self) -> &mut [T] {
        &mut self.coords
    }

    /// Number of input points, including any that were skipped.
    pub fn point_count(&self) -> usize {
        self.coords.len() / 2
    }

    /// The number of triangles in the triangulation.
    pub fn len(&self) -> usize {
        self.triangles.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// The hull point following `id`, counter-clockwise.
    pub fn hull_next(&self, id: usize) -> Result<usize> {
        self.check(id)?;
        match self.hull_next[id] {
            EMPTY => Err(Error::NotOnHull(id)),
            next => Ok(next),
        }
    }

    /// The hull point preceding `id`, counter-clockwise.
    pub fn hull_prev(&self, id: usize) -> Result<usize> {
        self.check(id)?;
        match self.hull_prev[id] {
            EMPTY => Err(Error::NotOnHull(id)),
            prev => Ok(prev),
        }
    }

    /// A halfedge ending at point `id`. For hull points this is always the
    /// boundary halfedge, so walking around the point from it visits every
    /// incident triangle.
    pub fn leftmost_halfedge(&self, id: usize) -> Result<usize> {
        self.check(id)?;
        match self.inedges[id] {
            EMPTY => Err(Error::NoIncidentHalfedge(id)),
            e => Ok(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_points_agree() {
        let pairs = [(0.0, 0.0), (3.0, 1.0), (1.0, 4.0), (5.0, 5.0), (2.0, 2.0)];
        let flat: Vec<f64> = pairs.iter().flat_map(|&(x, y)| [x, y]).collect();
        let arrays: Vec<[f64; 2]> = pairs.iter().map(|&(x, y)| [x, y]).collect();

        let a = Delaunay::new(flat);
        let b = Delaunay::from_points(&pairs);
        let c = Delaunay::from_points(&arrays);
        let d = Delaunay::from_points_with(&arrays, |p| p[0], |p| p[1]);

        for other in [&b, &c, &d] {
            assert_eq!(a.coords(), other.coords());
            assert_eq!(a.triangles, other.triangles);
            assert_eq!(a.halfedges, other.halfedges);
            assert_eq!(a.hull, other.hull);
        }
    }

    #[test]
    fn custom_accessors_can_swap_axes() {
        struct Site {
            lat: f32,
            lon: f32,
        }
        let sites = [
            Site { lat: 0.0, lon: 0.0 },
            Site { lat: 0.0, lon: 2.0 },
            Site { lat: 2.0, lon: 1.0 },
        ];
        let d = Delaunay::from_points_with(&sites, |s| s.lon, |s| s.lat);
        assert_eq!(d.coords(), &[0.0, 0.0, 2.0, 0.0, 1.0, 2.0]);
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn bounds_default_to_bbox_and_reset_on_update() {
        let mut d = Delaunay::new(vec![0.0, 0.0, 4.0, 0.0, 0.0, 3.0]);
        assert_eq!(d.bounds, d.bbox);
        d.bounds.max_x = 100.0;
        d.coords_mut()[2] = 8.0;
        d.update();
        assert_eq!(d.bbox.max_x, 8.0);
        assert_eq!(d.bounds, d.bbox);
    }

    #[test]
    fn rays_point_away_from_the_hull() {
        let d = Delaunay::new(vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.5, 0.5]);
        assert_eq!(d.vectors.len(), 20);
        // the interior point has no rays
        assert_eq!(&d.vectors[16..20], &[0.0; 4]);

        let center = Point::new(0.5, 0.5);
        for &h in &d.hull {
            let p = Point::at(d.coords(), h);
            for ray in d.vectors[4 * h..4 * h + 4].chunks(2) {
                let outward = ray[0] * (p.x - center.x) + ray[1] * (p.y - center.y);
                assert!(outward > 0.0, "ray {:?} at {} points inward", ray, h);
            }
        }
    }

    #[test]
    fn hull_queries_follow_the_hull_sequence() {
        let d = Delaunay::new(vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.5, 0.5]);
        for (k, &h) in d.hull.iter().enumerate() {
            let next = d.hull[(k + 1) % d.hull.len()];
            assert_eq!(d.hull_next(h), Ok(next));
            assert_eq!(d.hull_prev(next), Ok(h));
        }
        assert_eq!(d.hull_next(4), Err(Error::NotOnHull(4)));
        assert_eq!(d.hull_prev(9), Err(Error::PointOutOfRange { id: 9, len: 5 }));
    }

    #[test]
    fn leftmost_halfedge_prefers_the_boundary() {
        let d = Delaunay::new(vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.5, 0.5]);
        for id in 0..d.point_count() {
            let e = d.leftmost_halfedge(id).expect("every point is a vertex");
            assert_eq!(d.triangles[next_halfedge(e)], id);
            let on_hull = d.hull.contains(&id);
            assert_eq!(d.halfedges[e] == EMPTY, on_hull);
        }
    }

    #[test]
    fn collinear_input_has_no_incident_halfedges() {
        let d = Delaunay::new(vec![0.0, 0.0, 1.0, 0.0, 2.0, 0.0, 3.0, 0.0]);
        assert!(d.is_empty());
        assert_eq!(d.hull, vec![0, 1, 2, 3]);
        assert_eq!(d.leftmost_halfedge(1), Err(Error::NoIncidentHalfedge(1)));
        assert_eq!(d.hull_next(3), Ok(0));
    }

    #[test]
    fn empty_input() {
        let d = Delaunay::<f64>::new(Vec::new());
        assert!(d.is_empty());
        assert!(d.hull.is_empty());
        assert!(d.vectors.is_empty());
        assert_eq!(d.hull_next(0), Err(Error::PointOutOfRange { id: 0, len: 0 }));
    }

    #[test]
    fn point_like_reads_components() {
        assert_eq!(Point::new(1.0f64, 2.0).component(1), 2.0);
        assert_eq!((1.0f32, 2.0f32).component(0), 1.0);
        assert_eq!(vec![3.0f64, 4.0, 5.0].component(1), 4.0);
        assert!([1.0f64].component(1).is_nan());
    }
}
