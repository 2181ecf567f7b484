use crate::geometry::{constant, pseudo_angle, Point, Scalar};
use crate::predicates::orient;
use crate::EMPTY;

/// data structure for tracking the edges of the advancing convex hull
///
/// All arrays are indexed by point id. A point that has been removed from the
/// hull points `next` back at itself.
pub(crate) struct Hull<T> {
    /// maps point id to the previous point on the hull
    pub prev: Vec<usize>,

    /// maps point id to the next point on the hull
    pub next: Vec<usize>,

    /// maps point id to the triangle halfedge leaving it along the hull
    pub tri: Vec<usize>,

    /// angular hash of hull points, an approximate index only
    hash: Vec<usize>,

    /// a point known to be on the hull
    pub start: usize,

    /// number of points currently on the hull
    pub size: usize,

    /// center of the angular hash
    center: Point<T>,
}

impl<T: Scalar> Hull<T> {
    /// Three-point hull around the seed triangle `i0 -> i1 -> i2`, whose
    /// halfedges are `0`, `1` and `2`.
    pub fn new(n: usize, center: Point<T>, seed: [usize; 3], coords: &[T]) -> Self {
        let hash_len = ((n as f64).sqrt().ceil() as usize).max(1);
        let [i0, i1, i2] = seed;

        let mut hull = Self {
            prev: vec![0; n],
            next: vec![0; n],
            tri: vec![0; n],
            hash: vec![EMPTY; hash_len],
            start: i0,
            size: 3,
            center,
        };

        hull.next[i0] = i1;
        hull.prev[i2] = i1;
        hull.next[i1] = i2;
        hull.prev[i0] = i2;
        hull.next[i2] = i0;
        hull.prev[i1] = i0;

        hull.tri[i0] = 0;
        hull.tri[i1] = 1;
        hull.tri[i2] = 2;

        for i in seed {
            hull.hash_point(i, coords);
        }

        hull
    }

    fn hash_key(&self, p: &Point<T>) -> usize {
        let a = pseudo_angle(p.x - self.center.x, p.y - self.center.y);
        let len = self.hash.len();
        let bucket = (constant::<T>(len as f64) * a).floor();
        bucket.to_usize().unwrap_or(0) % len
    }

    /// Records point `i` in the bucket for its angle; last write wins.
    pub fn hash_point(&mut self, i: usize, coords: &[T]) {
        let key = self.hash_key(&Point::at(coords, i));
        self.hash[key] = i;
    }

    pub fn remove(&mut self, i: usize) {
        self.next[i] = i;
    }

    pub fn contains(&self, i: usize) -> bool {
        self.next[i] != i
    }

    /// Finds a hull edge `(e, next[e])` that `p` sees from outside.
    ///
    /// Returns `None` when no edge is visible, which means `p` (nearly)
    /// coincides with a point already in the triangulation. The flag is set
    /// when the search did not advance past its starting point, so edges
    /// before `e` may be visible too.
    pub fn find_visible_edge(&self, p: &Point<T>, coords: &[T]) -> Option<(usize, bool)> {
        let key = self.hash_key(p);
        let len = self.hash.len();
        let start = (0..len)
            .map(|j| self.hash[(key + j) % len])
            .find(|&i| i != EMPTY && self.contains(i))
            .unwrap_or(self.start);

        let start = self.prev[start];
        let mut e = start;
        while orient(p, &Point::at(coords, e), &Point::at(coords, self.next[e])) >= 0.0 {
            e = self.next[e];
            if e == start {
                return None;
            }
        }
        Some((e, e == start))
    }

    /// Replaces a stale reference to halfedge `old` in `tri`, walking the hull
    /// backwards from `start`.
    pub fn fix_halfedge(&mut self, old: usize, new: usize) {
        let mut e = self.start;
        loop {
            if self.tri[e] == old {
                self.tri[e] = new;
                break;
            }
            e = self.prev[e];
            if e == self.start {
                break;
            }
        }
    }

    /// Walks `size` points along `next` from `start`.
    pub fn to_vec(&self) -> Vec<usize> {
        let mut hull = Vec::with_capacity(self.size);
        let mut e = self.start;
        for _ in 0..self.size {
            hull.push(e);
            e = self.next[e];
        }
        hull
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // y-down counter-clockwise seed triangle around the origin
    fn seed_hull() -> (Vec<f64>, Hull<f64>) {
        let coords = vec![
            -1.0, -1.0, //
            0.0, 2.0, //
            2.0, -1.0, //
            10.0, 10.0, //
            0.0, 0.0,
        ];
        let a = Point::at(&coords, 0);
        let center = a.circumcenter(&Point::at(&coords, 1), &Point::at(&coords, 2));
        let hull = Hull::new(5, center, [0, 1, 2], &coords);
        (coords, hull)
    }

    #[test]
    fn seed_hull_is_a_closed_loop() {
        let (_, hull) = seed_hull();
        assert_eq!(hull.to_vec(), vec![0, 1, 2]);
        assert_eq!(hull.hash.len(), 3);
        assert_eq!(hull.next[2], 0);
        assert_eq!(hull.prev[0], 2);
        assert_eq!((hull.tri[0], hull.tri[1], hull.tri[2]), (0, 1, 2));
        assert!(hull.hash.iter().any(|&h| h != EMPTY));
    }

    #[test]
    fn finds_the_edge_facing_an_outside_point() {
        let (coords, hull) = seed_hull();
        let (e, _) = hull
            .find_visible_edge(&Point::at(&coords, 3), &coords)
            .expect("point 3 is outside the seed triangle");
        let q = hull.next[e];
        assert!(orient(&Point::at(&coords, 3), &Point::at(&coords, e), &Point::at(&coords, q)) < 0.0);
    }

    #[test]
    fn inside_points_see_no_edge() {
        let (coords, hull) = seed_hull();
        assert_eq!(hull.find_visible_edge(&Point::at(&coords, 4), &coords), None);
        assert_eq!(hull.find_visible_edge(&Point::at(&coords, 1), &coords), None);
    }

    #[test]
    fn removed_points_are_self_loops() {
        let (_, mut hull) = seed_hull();
        assert!(hull.contains(1));
        hull.remove(1);
        assert!(!hull.contains(1));
        assert_eq!(hull.next[1], 1);
    }

    #[test]
    fn fix_halfedge_patches_matching_entry() {
        let (_, mut hull) = seed_hull();
        hull.fix_halfedge(1, 7);
        assert_eq!(hull.tri[1], 7);
        hull.fix_halfedge(42, 8);
        assert_eq!(hull.tri, vec![0, 7, 2, 0, 0]);
    }
}
