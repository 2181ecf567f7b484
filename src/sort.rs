//! Indirect sort of point ids by a parallel key array.

/// Spans at most this wide (`right - left`) are finished with insertion sort.
const INSERTION_SORT_SPAN: usize = 20;

/// Sorts `ids` ascending by `keys[id]`. The key array is only read.
///
/// Ties keep their relative order on small inputs, where the whole range is
/// handled by insertion sort; on larger ones tie order is unspecified but
/// deterministic.
pub(crate) fn sort_by_key<K: PartialOrd + Copy>(ids: &mut [usize], keys: &[K]) {
    if ids.len() > 1 {
        quicksort(ids, keys, 0, ids.len() - 1);
    }
}

fn quicksort<K: PartialOrd + Copy>(ids: &mut [usize], keys: &[K], mut left: usize, mut right: usize) {
    loop {
        if left >= right {
            return;
        }
        if right - left <= INSERTION_SORT_SPAN {
            insertion_sort(ids, keys, left, right);
            return;
        }

        // median of three, parked at left + 1
        let median = (left + right) / 2;
        let mut i = left + 1;
        let mut j = right;
        ids.swap(median, i);
        if keys[ids[left]] > keys[ids[right]] {
            ids.swap(left, right);
        }
        if keys[ids[i]] > keys[ids[right]] {
            ids.swap(i, right);
        }
        if keys[ids[left]] > keys[ids[i]] {
            ids.swap(left, i);
        }

        let pivot_id = ids[i];
        let pivot = keys[pivot_id];
        loop {
            i += 1;
            while i < right && keys[ids[i]] < pivot {
                i += 1;
            }
            j -= 1;
            while j > left + 1 && keys[ids[j]] > pivot {
                j -= 1;
            }
            if j < i {
                break;
            }
            ids.swap(i, j);
        }
        ids[left + 1] = ids[j];
        ids[j] = pivot_id;

        // recurse into the smaller side, iterate on the larger one
        if right + 1 - i >= j - left {
            quicksort(ids, keys, left, j - 1);
            left = i;
        } else {
            quicksort(ids, keys, i, right);
            right = j - 1;
        }
    }
}

fn insertion_sort<K: PartialOrd + Copy>(ids: &mut [usize], keys: &[K], left: usize, right: usize) {
    for i in left + 1..=right {
        let id = ids[i];
        let key = keys[id];
        let mut j = i;
        while j > left && keys[ids[j - 1]] > key {
            ids[j] = ids[j - 1];
            j -= 1;
        }
        ids[j] = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn is_sorted_by<K: PartialOrd + Copy>(ids: &[usize], keys: &[K]) -> bool {
        ids.windows(2).all(|w| keys[w[0]] <= keys[w[1]])
    }

    #[test]
    fn small_input_is_stable() {
        let keys = [2.0, 1.0, 2.0, 0.0, 1.0];
        let mut ids: Vec<usize> = (0..keys.len()).collect();
        sort_by_key(&mut ids, &keys);
        assert_eq!(ids, vec![3, 1, 4, 0, 2]);
    }

    #[test]
    fn keys_are_left_untouched() {
        let keys: Vec<f64> = (0..100).map(|i| ((i * 37) % 101) as f64).collect();
        let before = keys.clone();
        let mut ids: Vec<usize> = (0..keys.len()).collect();
        sort_by_key(&mut ids, &keys);
        assert_eq!(keys, before);
        assert!(is_sorted_by(&ids, &keys));
    }

    #[test]
    fn sorts_large_random_permutations() {
        let mut rng = StdRng::seed_from_u64(7);
        for &n in &[21, 22, 64, 1000, 10_000] {
            let keys: Vec<f32> = (0..n).map(|_| rng.gen_range(0.0..10.0)).collect();
            let mut ids: Vec<usize> = (0..n).collect();
            sort_by_key(&mut ids, &keys);
            assert!(is_sorted_by(&ids, &keys), "n = {}", n);

            let mut seen = ids.clone();
            seen.sort_unstable();
            assert_eq!(seen, (0..n).collect::<Vec<_>>());
        }
    }

    #[test]
    fn handles_heavy_ties_and_presorted_runs() {
        let keys: Vec<f64> = (0..5000).map(|i| (i % 3) as f64).collect();
        let mut ids: Vec<usize> = (0..keys.len()).collect();
        sort_by_key(&mut ids, &keys);
        assert!(is_sorted_by(&ids, &keys));

        let keys: Vec<f64> = (0..5000).rev().map(|i| i as f64).collect();
        let mut ids: Vec<usize> = (0..keys.len()).collect();
        sort_by_key(&mut ids, &keys);
        assert_eq!(ids, (0..5000).rev().collect::<Vec<_>>());
    }

    #[test]
    fn nan_keys_do_not_escape_the_slice() {
        let mut keys: Vec<f64> = (0..200).map(|i| i as f64).collect();
        for k in keys.iter_mut().step_by(7) {
            *k = f64::NAN;
        }
        let mut ids: Vec<usize> = (0..keys.len()).collect();
        sort_by_key(&mut ids, &keys);
        let mut seen = ids.clone();
        seen.sort_unstable();
        assert_eq!(seen, (0..200).collect::<Vec<_>>());
    }
}
