//! Seed triangle selection and the ordering used when no triangle exists.

use crate::geometry::{BBox, Point, Scalar};
use crate::predicates::orient;
use crate::sort::sort_by_key;

fn find_closest_point<T: Scalar>(coords: &[T], p0: &Point<T>, skip: Option<usize>) -> Option<usize> {
    let mut min_dist = T::infinity();
    let mut k = None;
    for i in 0..coords.len() / 2 {
        if Some(i) == skip {
            continue;
        }
        let d = p0.dist2(&Point::at(coords, i));
        // the seed itself may sit on p0; its neighbor must not
        if d < min_dist && (skip.is_none() || d > T::zero()) {
            k = Some(i);
            min_dist = d;
        }
    }
    k
}

/// Picks three points forming a small triangle near the middle of the input,
/// wound counter-clockwise. Returns `None` if every point lies on one line.
pub(crate) fn find_seed_triangle<T: Scalar>(coords: &[T], bbox: &BBox<T>) -> Option<[usize; 3]> {
    // pick a seed point close to the center
    let i0 = find_closest_point(coords, &bbox.center(), None)?;
    let p0 = Point::at(coords, i0);

    // find the point closest to the seed
    let i1 = find_closest_point(coords, &p0, Some(i0))?;
    let p1 = Point::at(coords, i1);

    // find the third point which forms the smallest circumcircle with the first two
    let mut min_radius = T::infinity();
    let mut i2 = None;
    for i in 0..coords.len() / 2 {
        if i == i0 || i == i1 {
            continue;
        }
        let r = p0.circumradius2(&p1, &Point::at(coords, i));
        if r < min_radius {
            i2 = Some(i);
            min_radius = r;
        }
    }
    let i2 = i2?;

    // swap the order of the seed points for counter-clockwise orientation
    Some(if orient(&p0, &p1, &Point::at(coords, i2)) < 0.0 {
        [i0, i2, i1]
    } else {
        [i0, i1, i2]
    })
}

/// Orders collinear points along their line, by x offset from the first point
/// (or y offset when the x offsets are equal), dropping repeats.
pub(crate) fn collinear_hull<T: Scalar>(coords: &[T]) -> Vec<usize> {
    let n = coords.len() / 2;
    if n == 0 {
        return Vec::new();
    }
    let first = Point::at(coords, 0);
    let dists: Vec<T> = (0..n)
        .map(|i| {
            let p = Point::at(coords, i);
            let d = p.x - first.x;
            if d == T::zero() {
                p.y - first.y
            } else {
                d
            }
        })
        .collect();

    let mut ids: Vec<usize> = (0..n).collect();
    sort_by_key(&mut ids, &dists);

    let mut hull = Vec::new();
    let mut d0 = T::neg_infinity();
    for id in ids {
        if dists[id] > d0 {
            hull.push(id);
            d0 = dists[id];
        }
    }
    hull
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(coords: &[f64]) -> Option<[usize; 3]> {
        find_seed_triangle(coords, &BBox::from_coords(coords))
    }

    #[test]
    fn seed_starts_nearest_the_center() {
        let coords = [0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0, 5.0, 5.0, 6.0, 5.0];
        let [i0, i1, i2] = seed(&coords).expect("not collinear");
        assert_eq!(i0, 4);
        assert_eq!(i1, 5);
        let (a, b, c) = (Point::at(&coords, i0), Point::at(&coords, i1), Point::at(&coords, i2));
        assert!(orient(&a, &b, &c) > 0.0);
    }

    #[test]
    fn seed_is_reoriented_counter_clockwise() {
        for coords in [[0.0, 0.0, 1.0, 0.0, 0.0, 1.0], [0.0, 0.0, 0.0, 1.0, 1.0, 0.0]] {
            let [i0, i1, i2] = seed(&coords).expect("not collinear");
            let (a, b, c) = (Point::at(&coords, i0), Point::at(&coords, i1), Point::at(&coords, i2));
            assert!(orient(&a, &b, &c) > 0.0);
        }
    }

    #[test]
    fn collinear_and_coincident_inputs_have_no_seed() {
        assert_eq!(seed(&[0.0, 0.0, 1.0, 1.0, 2.0, 2.0, 3.0, 3.0]), None);
        assert_eq!(seed(&[1.0, 1.0, 1.0, 1.0, 1.0, 1.0]), None);
        assert_eq!(seed(&[1.0, 1.0]), None);
        assert_eq!(seed(&[]), None);
    }

    #[test]
    fn collinear_hull_orders_along_x_then_y() {
        let coords = [2.0, 0.0, 0.0, 0.0, 3.0, 0.0, 1.0, 0.0];
        assert_eq!(collinear_hull(&coords), vec![1, 3, 0, 2]);

        let vertical = [0.0, 5.0, 0.0, 1.0, 0.0, 3.0];
        assert_eq!(collinear_hull(&vertical), vec![1, 2, 0]);
    }

    #[test]
    fn collinear_hull_drops_repeats() {
        let coords = [0.0f32, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 2.0, 0.0];
        assert_eq!(collinear_hull(&coords), vec![0, 1, 4]);
    }
}
