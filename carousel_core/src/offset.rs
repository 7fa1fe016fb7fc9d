// Circular distance from the focused card.
// 0 is the focus, -1/+1 its neighbors, wrapping around both ends of the list.

/// Signed circular distance of `index` from `focus` in a list of `len` items,
/// wrapped into `(-len/2, len/2]`.
///
/// Returns 0 for an empty list; callers treat that case as idle.
pub fn circular_offset(index: usize, focus: usize, len: usize) -> isize {
    if len == 0 {
        return 0;
    }

    let n = len as isize;
    let mut offset = index as isize - focus as isize;
    // Compare doubled values to keep the half-length boundary exact for odd `len`.
    if 2 * offset > n {
        offset -= n;
    }
    if 2 * offset <= -n {
        offset += n;
    }
    offset
}

/// Index one step after `focus`, wrapping at the end.
pub fn wrap_next(focus: usize, len: usize) -> usize {
    (focus + 1) % len
}

/// Index one step before `focus`, wrapping at the start.
pub fn wrap_previous(focus: usize, len: usize) -> usize {
    (focus + len - 1) % len
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn neighbors_wrap_around_the_ends() {
        // focus on the first of five: the last item is the left neighbor
        assert_eq!(circular_offset(4, 0, 5), -1);
        assert_eq!(circular_offset(1, 0, 5), 1);
        assert_eq!(circular_offset(0, 4, 5), 1);
        assert_eq!(circular_offset(3, 0, 5), -2);
    }

    #[test]
    fn even_length_tie_lands_on_the_positive_side() {
        assert_eq!(circular_offset(2, 0, 4), 2);
        assert_eq!(circular_offset(0, 2, 4), 2);
        assert_eq!(circular_offset(1, 0, 2), 1);
        assert_eq!(circular_offset(0, 1, 2), 1);
    }

    #[test]
    fn single_item_and_empty() {
        assert_eq!(circular_offset(0, 0, 1), 0);
        assert_eq!(circular_offset(0, 0, 0), 0);
    }

    #[test]
    fn wrapping_steps() {
        assert_eq!(wrap_next(4, 5), 0);
        assert_eq!(wrap_previous(0, 5), 4);
        assert_eq!(wrap_next(0, 1), 0);
        assert_eq!(wrap_previous(0, 1), 0);
    }

    fn index_pair() -> impl Strategy<Value = (usize, usize, usize)> {
        (1usize..200).prop_flat_map(|len| (0..len, 0..len, Just(len)))
    }

    proptest! {
        /// Offsets lie in (-N/2, N/2] and the focus itself is at 0.
        #[test]
        fn offset_is_within_half_open_range((index, focus, len) in index_pair()) {
            let offset = circular_offset(index, focus, len);
            let n = len as isize;
            prop_assert!(2 * offset > -n, "offset {} below range for len {}", offset, len);
            prop_assert!(2 * offset <= n, "offset {} above range for len {}", offset, len);
            prop_assert_eq!(circular_offset(focus, focus, len), 0);
        }

        /// Stepping from the focus by the offset lands back on the index.
        #[test]
        fn offset_is_congruent_to_raw_distance((index, focus, len) in index_pair()) {
            let offset = circular_offset(index, focus, len);
            let n = len as isize;
            let landed = (focus as isize + offset).rem_euclid(n);
            prop_assert_eq!(landed as usize, index);
        }

        /// next then previous is the identity.
        #[test]
        fn next_previous_inverse((_, focus, len) in index_pair()) {
            prop_assert_eq!(wrap_previous(wrap_next(focus, len), len), focus);
            prop_assert_eq!(wrap_next(wrap_previous(focus, len), len), focus);
        }
    }
}
