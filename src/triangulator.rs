//! The incremental hull-sweep triangulation engine.

use tracing::{debug, trace, warn};

use crate::geometry::{BBox, Point, Scalar};
use crate::hull::Hull;
use crate::predicates::{in_circle, orient};
use crate::seed::{collinear_hull, find_seed_triangle};
use crate::sort::sort_by_key;
use crate::{next_halfedge, prev_halfedge, EMPTY};

/// Maximum number of edges waiting to be legalized at once. Pushes beyond this
/// are dropped, which can only happen on extremely degenerate input and may
/// leave a locally non-Delaunay edge behind.
pub const EDGE_STACK_CAPACITY: usize = 512;

/// Raw output of one construction pass.
#[derive(Debug, Default)]
pub(crate) struct Mesh {
    pub triangles: Vec<usize>,
    pub halfedges: Vec<usize>,
    /// hull point ids, counter-clockwise
    pub hull: Vec<usize>,
    /// flip stack pushes dropped at capacity
    pub dropped_flips: usize,
}

/// Triangulates the flat coordinate buffer `coords`.
///
/// Points are inserted by increasing distance from the seed circumcenter. A
/// point within [`epsilon`](crate::epsilon) on both axes of the last point
/// that was not itself skipped this way is left out. Along a chain of
/// near-duplicates, every point that has drifted past epsilon from the last
/// kept one is inserted again.
pub(crate) fn triangulate<T: Scalar>(coords: &[T], bbox: &BBox<T>) -> Mesh {
    triangulate_with_capacity(coords, bbox, EDGE_STACK_CAPACITY)
}

fn triangulate_with_capacity<T: Scalar>(coords: &[T], bbox: &BBox<T>, edge_stack_capacity: usize) -> Mesh {
    let n = coords.len() / 2;

    let Some([i0, i1, i2]) = find_seed_triangle(coords, bbox) else {
        let hull = collinear_hull(coords);
        debug!(points = n, hull = hull.len(), "no seed triangle; input is collinear");
        return Mesh {
            hull,
            ..Mesh::default()
        };
    };

    let center = Point::at(coords, i0).circumcenter(&Point::at(coords, i1), &Point::at(coords, i2));

    // sort the points by distance from the seed triangle circumcenter
    let dists: Vec<T> = (0..n).map(|i| center.dist2(&Point::at(coords, i))).collect();
    let mut ids: Vec<usize> = (0..n).collect();
    sort_by_key(&mut ids, &dists);

    let mut triangulator = Triangulator::new(coords, center, [i0, i1, i2], edge_stack_capacity);
    let mut skipped = 0;
    let mut last_kept: Option<Point<T>> = None;

    for &i in &ids {
        let p = Point::at(coords, i);

        // skip near-duplicates
        if last_kept.is_some_and(|q| p.nearly_equals(&q)) {
            trace!(point = i, "skipping near-duplicate point");
            skipped += 1;
            continue;
        }
        last_kept = Some(p);

        // skip seed triangle points
        if i == i0 || i == i1 || i == i2 {
            continue;
        }
        if !triangulator.insert(i) {
            trace!(point = i, "no visible hull edge; skipping point");
            skipped += 1;
        }
    }

    let mesh = triangulator.finish();
    debug!(
        points = n,
        triangles = mesh.triangles.len() / 3,
        hull = mesh.hull.len(),
        skipped,
        dropped_flips = mesh.dropped_flips,
        "triangulation complete"
    );
    mesh
}

/// Working state of one construction pass. Nothing here outlives the call.
struct Triangulator<'a, T> {
    coords: &'a [T],
    triangles: Vec<usize>,
    halfedges: Vec<usize>,
    hull: Hull<T>,
    edge_stack: Vec<usize>,
    edge_stack_capacity: usize,
    dropped_flips: usize,
}

impl<'a, T: Scalar> Triangulator<'a, T> {
    fn new(coords: &'a [T], center: Point<T>, seed: [usize; 3], edge_stack_capacity: usize) -> Self {
        let n = coords.len() / 2;
        let max_triangles = if n > 2 { 2 * n - 5 } else { 0 };

        // the first push of a legalization must land, the returned halfedge is read from it
        let edge_stack_capacity = edge_stack_capacity.max(1);
        let mut triangulator = Self {
            coords,
            triangles: Vec::with_capacity(max_triangles * 3),
            halfedges: Vec::with_capacity(max_triangles * 3),
            hull: Hull::new(n, center, seed, coords),
            edge_stack: Vec::with_capacity(edge_stack_capacity),
            edge_stack_capacity,
            dropped_flips: 0,
        };
        let [i0, i1, i2] = seed;
        triangulator.add_triangle(i0, i1, i2, EMPTY, EMPTY, EMPTY);
        triangulator
    }

    #[inline]
    fn point(&self, i: usize) -> Point<T> {
        Point::at(self.coords, i)
    }

    /// Adds point `i` outside the current hull. Returns `false` if no hull
    /// edge is visible from it.
    fn insert(&mut self, i: usize) -> bool {
        let p = self.point(i);

        // find a visible edge on the convex hull using edge hash
        let Some((mut e, walk_back)) = self.hull.find_visible_edge(&p, self.coords) else {
            return false;
        };

        // add the first triangle from the point
        let t = self.add_triangle(e, i, self.hull.next[e], EMPTY, EMPTY, self.hull.tri[e]);

        // flip triangles from the point until they satisfy the Delaunay condition
        self.hull.tri[i] = self.legalize(t + 2);
        self.hull.tri[e] = t; // keep track of boundary triangles on the hull
        self.hull.size += 1;

        // walk forward through the hull, adding more triangles and flipping
        let mut n = self.hull.next[e];
        loop {
            let q = self.hull.next[n];
            if orient(&p, &self.point(n), &self.point(q)) >= 0.0 {
                break;
            }
            let t = self.add_triangle(n, i, q, self.hull.tri[i], EMPTY, self.hull.tri[n]);
            self.hull.tri[i] = self.legalize(t + 2);
            self.hull.remove(n);
            self.hull.size -= 1;
            n = q;
        }

        // walk backward from the other side, adding more triangles and flipping
        if walk_back {
            loop {
                let q = self.hull.prev[e];
                if orient(&p, &self.point(q), &self.point(e)) >= 0.0 {
                    break;
                }
                let t = self.add_triangle(q, i, e, EMPTY, self.hull.tri[e], self.hull.tri[q]);
                self.legalize(t + 2);
                self.hull.tri[q] = t;
                self.hull.remove(e);
                self.hull.size -= 1;
                e = q;
            }
        }

        // update the hull indices
        self.hull.prev[i] = e;
        self.hull.next[i] = n;
        self.hull.prev[n] = i;
        self.hull.next[e] = i;
        self.hull.start = e;

        // save the two new edges in the hash table
        self.hull.hash_point(i, self.coords);
        self.hull.hash_point(e, self.coords);
        true
    }

    fn link(&mut self, a: usize, b: usize) {
        self.halfedges[a] = b;
        if b != EMPTY {
            self.halfedges[b] = a;
        }
    }

    fn add_triangle(&mut self, i0: usize, i1: usize, i2: usize, a: usize, b: usize, c: usize) -> usize {
        let t = self.triangles.len();

        self.triangles.extend_from_slice(&[i0, i1, i2]);
        self.halfedges.extend_from_slice(&[EMPTY; 3]);

        self.link(t, a);
        self.link(t + 1, b);
        self.link(t + 2, c);
        t
    }

    /// Restores the Delaunay condition around the new halfedge `a`, returning
    /// the halfedge left facing the hull at the inserted point.
    fn legalize(&mut self, mut a: usize) -> usize {
        // if the pair of triangles doesn't satisfy the Delaunay condition
        // (p1 is inside the circumcircle of [p0, pl, pr]), flip them,
        // then do the same check/flip for the new pair of triangles
        //
        //           pl                    pl
        //          /||\                  /  \
        //       al/ || \bl            al/    \a
        //        /  ||  \              /      \
        //       /  a||b  \    flip    /___ar___\
        //     p0\   ||   /p1   =>   p0\---bl---/p1
        //        \  ||  /              \      /
        //       ar\ || /br             b\    /br
        //          \||/                  \  /
        //           pr                    pr
        //
        let mut ar;
        let mut dropped = 0usize;

        loop {
            let b = self.halfedges[a];
            ar = prev_halfedge(a);

            let illegal = b != EMPTY && {
                let p0 = self.triangles[ar];
                let pr = self.triangles[a];
                let pl = self.triangles[next_halfedge(a)];
                let p1 = self.triangles[prev_halfedge(b)];
                in_circle(&self.point(p0), &self.point(pr), &self.point(pl), &self.point(p1))
            };

            if !illegal {
                match self.edge_stack.pop() {
                    Some(next) => {
                        a = next;
                        continue;
                    }
                    None => break,
                }
            }

            let bl = prev_halfedge(b);
            self.triangles[a] = self.triangles[bl];
            self.triangles[b] = self.triangles[ar];

            // edge swapped on the other side of the hull (rare); fix the halfedge reference
            let hbl = self.halfedges[bl];
            if hbl == EMPTY {
                self.hull.fix_halfedge(bl, a);
            }

            let har = self.halfedges[ar];
            self.link(a, hbl);
            self.link(b, har);
            self.link(ar, bl);

            let br = next_halfedge(b);
            if self.edge_stack.len() < self.edge_stack_capacity {
                self.edge_stack.push(br);
            } else {
                dropped += 1;
            }
        }

        if dropped > 0 {
            warn!(dropped, capacity = self.edge_stack_capacity, "flip stack saturated; edges left unchecked");
            self.dropped_flips += dropped;
        }
        ar
    }

    fn finish(mut self) -> Mesh {
        self.triangles.shrink_to_fit();
        self.halfedges.shrink_to_fit();
        Mesh {
            hull: self.hull.to_vec(),
            triangles: self.triangles,
            halfedges: self.halfedges,
            dropped_flips: self.dropped_flips,
        }
    }
}
