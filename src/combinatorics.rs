//! Binomial coefficients for missing-tooth pattern counts
//!
//! Works in exact `u128` arithmetic. The running product
//! `result * (n - i + 1) / i` is always divisible at step `i` (it equals
//! `C(n, i) * i`), so no rounding step is needed.

/// Number of teeth in the permanent dentition the pattern count is taken over
pub const DENTITION_SIZE: i64 = 28;

/// C(n, k), or None if the true value does not fit in a u128
///
/// Out-of-range `k` (negative or greater than `n`) yields `Some(0)`.
pub fn checked_combination(n: i64, k: i64) -> Option<u128> {
    if k < 0 || k > n {
        return Some(0);
    }
    if k == 0 || k == n {
        return Some(1);
    }

    // C(n, k) == C(n, n - k); iterate over the shorter side
    let k = if k > n / 2 { n - k } else { k };

    let n = n as u128;
    let mut result: u128 = 1;
    for i in 1..=k as u128 {
        let factor = n - i + 1;
        result = match result.checked_mul(factor) {
            Some(product) => product / i,
            None => {
                // Divide out the common part first; i / g then divides factor exactly
                let g = gcd(result, i);
                (result / g).checked_mul(factor / (i / g))?
            }
        };
    }

    Some(result)
}

/// C(n, k), saturating at `u128::MAX` on overflow
pub fn combination(n: i64, k: i64) -> u128 {
    checked_combination(n, k).unwrap_or_else(|| {
        tracing::warn!("C({}, {}) overflows u128, saturating", n, k);
        u128::MAX
    })
}

/// Number of ways `missing` teeth can be chosen from the 28-tooth dentition
pub fn missing_tooth_patterns(missing: usize) -> u128 {
    combination(DENTITION_SIZE, missing as i64)
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_values_for_dentition() {
        assert_eq!(combination(28, 0), 1);
        assert_eq!(combination(28, 28), 1);
        assert_eq!(combination(28, 1), 28);
        assert_eq!(combination(28, 2), 378);
        assert_eq!(combination(28, 3), 3276);
        assert_eq!(combination(28, 14), 40_116_600);
    }

    #[test]
    fn test_out_of_range_k_is_zero() {
        assert_eq!(combination(28, -1), 0);
        assert_eq!(combination(28, 29), 0);
        assert_eq!(combination(28, 32), 0);
        assert_eq!(combination(0, 1), 0);
        assert_eq!(combination(5, i64::MIN), 0);
    }

    #[test]
    fn test_missing_tooth_patterns() {
        assert_eq!(missing_tooth_patterns(0), 1);
        assert_eq!(missing_tooth_patterns(3), 3276);
        assert_eq!(missing_tooth_patterns(30), 0);
    }

    #[test]
    fn test_large_values_stay_exact() {
        assert_eq!(
            combination(100, 50),
            100_891_344_545_564_193_334_812_497_256
        );
        // The last step of C(130, 65) overflows the plain product and goes through gcd reduction
        let central = checked_combination(130, 65).unwrap();
        assert_eq!(central, 2 * combination(129, 64));
    }

    #[test]
    fn test_overflow_saturates() {
        assert_eq!(checked_combination(1000, 500), None);
        assert_eq!(combination(1000, 500), u128::MAX);
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(7, 1), 1);
        assert_eq!(gcd(5, 0), 5);
    }

    proptest! {
        #[test]
        fn prop_edges_are_one(n in 0i64..200) {
            prop_assert_eq!(combination(n, 0), 1);
            prop_assert_eq!(combination(n, n), 1);
        }

        #[test]
        fn prop_outside_range_is_zero(n in 0i64..200, offset in 1i64..1000) {
            prop_assert_eq!(combination(n, -offset), 0);
            prop_assert_eq!(combination(n, n + offset), 0);
        }

        #[test]
        fn prop_symmetry(n in 0i64..=120, k_seed in 0i64..=120) {
            let k = k_seed % (n + 1);
            prop_assert_eq!(combination(n, k), combination(n, n - k));
        }

        #[test]
        fn prop_pascal_rule(n in 2i64..=120, k_seed in 1i64..=120) {
            let k = 1 + k_seed % (n - 1);
            prop_assert_eq!(
                combination(n, k),
                combination(n - 1, k - 1) + combination(n - 1, k)
            );
        }
    }
}
