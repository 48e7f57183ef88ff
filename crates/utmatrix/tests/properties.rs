//! Property tests for construction bounds, copy semantics and arithmetic.

use proptest::prelude::*;
use utmatrix::{Error, Limits, TMatrix, TVector};

fn matrix_with(size: usize, seed: i32) -> TMatrix<i32> {
    let rows = (0..size)
        .map(|i| {
            (i..size)
                .map(|j| seed.wrapping_mul(31).wrapping_add((i * 7 + j) as i32) % 1000)
                .collect()
        })
        .collect::<Vec<Vec<i32>>>();
    TMatrix::try_from(rows).unwrap()
}

proptest! {
    #[test]
    fn construction_within_limit_succeeds(max in 0usize..64, n in 0isize..64) {
        let limits = Limits::new(max);
        let result = TVector::<i32>::with_limits(n, 0, &limits);
        if n as usize <= max {
            prop_assert_eq!(result.unwrap().len(), n as usize);
        } else {
            let is_length_error = matches!(result, Err(Error::Length { .. }));
            prop_assert!(is_length_error);
        }
    }

    #[test]
    fn negative_sizes_always_fail(n in isize::MIN..0) {
        let is_vector_error = matches!(TVector::<i32>::new(n), Err(Error::Length { .. }));
        let is_matrix_error = matches!(TMatrix::<i32>::new(n), Err(Error::Length { .. }));
        prop_assert!(is_vector_error);
        prop_assert!(is_matrix_error);
    }

    #[test]
    fn clone_is_equal_and_independent(size in 1usize..12, seed in any::<i32>()) {
        let a = matrix_with(size, seed);
        let b = a.clone();
        prop_assert!(a == a);
        prop_assert_eq!(&a, &b);
        prop_assert!(!std::ptr::eq(&a[0], &b[0]));
    }

    #[test]
    fn assign_resizes_and_copies(src in 0usize..12, dst in 0usize..12, seed in any::<i32>()) {
        let a = matrix_with(src, seed);
        let mut b = TMatrix::<i32>::new(dst as isize).unwrap();
        b.assign(&a);
        prop_assert_eq!(b.size(), src);
        prop_assert_eq!(b, a);
    }

    #[test]
    fn out_of_range_access_fails(size in 1isize..12, row in -20isize..20, col in -20isize..20) {
        let m = TMatrix::<i32>::new(size).unwrap();
        let valid = row >= 0 && row < size && col >= row && col < size;
        prop_assert_eq!(m.get(row, col).is_ok(), valid);
    }

    #[test]
    fn add_then_sub_restores(size in 0usize..10, s1 in any::<i32>(), s2 in any::<i32>()) {
        let a = matrix_with(size, s1);
        let b = matrix_with(size, s2);
        let sum = (&a + &b).unwrap();
        prop_assert_eq!((&sum - &b).unwrap(), a);
    }

    #[test]
    fn differing_sizes_never_combine(n in 0usize..10, m in 0usize..10) {
        prop_assume!(n != m);
        let a = TMatrix::<i32>::new(n as isize).unwrap();
        let b = TMatrix::<i32>::new(m as isize).unwrap();
        prop_assert!(a != b);
        prop_assert_eq!(a.checked_add(&b).unwrap_err(), Error::SizeMismatch { left: n, right: m });
        prop_assert!(a.checked_sub(&b).is_err());
    }
}
