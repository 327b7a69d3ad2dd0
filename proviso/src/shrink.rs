//! Shrinking functionality for minimizing failing test cases.

/// Trait for types that can be shrunk to smaller values
///
/// Shrinking is optional per type: the provided method returns no
/// candidates, so `impl Shrink for MyType {}` marks a type as already
/// minimal. Candidates must be finite in number and each a valid value of
/// the type; they are tried in the order returned.
pub trait Shrink: Sized {
    /// Candidates strictly simpler than `self`; empty when nothing is left
    fn shrink(&self) -> Vec<Self> {
        Vec::new()
    }
}

/// Candidate rules shared by the numeric implementations.
pub mod numeric {
    use num_traits::{Float, Num};

    /// Candidates for a number: `0`, `v - 1` when `v > 1`, `v + 1` when
    /// signed and `v < -1`, then `v / 2` unless it repeats the last candidate.
    ///
    /// Zero is a fixpoint and yields nothing.
    pub fn toward_zero<N>(value: N, signed: bool) -> Vec<N>
    where
        N: Num + PartialOrd + Copy,
    {
        let zero = N::zero();
        let one = N::one();
        if value == zero {
            return Vec::new();
        }

        let mut out = vec![zero];
        if value > one {
            out.push(value - one);
        }
        if signed && value < zero - one {
            out.push(value + one);
        }
        let half = value / (one + one);
        if out.last() != Some(&half) {
            out.push(half);
        }
        out
    }

    /// Float variant of [`toward_zero`].
    ///
    /// Non-finite values shrink straight to zero, and candidates equal to the
    /// input (`1e20 - 1.0 == 1e20`) are dropped.
    pub fn float_toward_zero<F: Float>(value: F) -> Vec<F> {
        if value.is_nan() || value.is_infinite() {
            return vec![F::zero()];
        }
        let mut out = toward_zero(value, true);
        out.retain(|candidate| *candidate != value);
        out
    }
}

impl Shrink for bool {
    fn shrink(&self) -> Vec<Self> {
        if *self { vec![false] } else { Vec::new() }
    }
}

macro_rules! impl_shrink_signed_int {
    ($($t:ty),*) => {
        $(
            impl Shrink for $t {
                fn shrink(&self) -> Vec<Self> {
                    numeric::toward_zero(*self, true)
                }
            }
        )*
    };
}

macro_rules! impl_shrink_unsigned_int {
    ($($t:ty),*) => {
        $(
            impl Shrink for $t {
                fn shrink(&self) -> Vec<Self> {
                    numeric::toward_zero(*self, false)
                }
            }
        )*
    };
}

macro_rules! impl_shrink_float {
    ($($t:ty),*) => {
        $(
            impl Shrink for $t {
                fn shrink(&self) -> Vec<Self> {
                    numeric::float_toward_zero(*self)
                }
            }
        )*
    };
}

impl_shrink_signed_int!(i8, i16, i32, i64, i128, isize);
impl_shrink_unsigned_int!(u8, u16, u32, u64, u128, usize);
impl_shrink_float!(f32, f64);

/// Drop the last element, drop the first (when longer than one), then
/// replace each element in turn by each of its own candidates.
impl<T: Shrink + Clone> Shrink for Vec<T> {
    fn shrink(&self) -> Vec<Self> {
        let mut candidates = Vec::new();
        if self.is_empty() {
            return candidates;
        }

        candidates.push(self[..self.len() - 1].to_vec());
        if self.len() > 1 {
            candidates.push(self[1..].to_vec());
        }
        for (i, item) in self.iter().enumerate() {
            for shrunk in item.shrink() {
                let mut vec = self.clone();
                vec[i] = shrunk;
                candidates.push(vec);
            }
        }
        candidates
    }
}

// One position at a time, left to right: every candidate differs from the
// input in exactly one component.
macro_rules! impl_shrink_tuple {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: Shrink + Clone),+> Shrink for ($($name,)+) {
            fn shrink(&self) -> Vec<Self> {
                let mut candidates = Vec::new();
                $(
                    for shrunk in self.$idx.shrink() {
                        let mut tuple = self.clone();
                        tuple.$idx = shrunk;
                        candidates.push(tuple);
                    }
                )+
                candidates
            }
        }
    };
}

impl_shrink_tuple!(A: 0);
impl_shrink_tuple!(A: 0, B: 1);
impl_shrink_tuple!(A: 0, B: 1, C: 2);
impl_shrink_tuple!(A: 0, B: 1, C: 2, D: 3);
impl_shrink_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4);
impl_shrink_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
impl_shrink_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
impl_shrink_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Opaque(u8);

    impl Shrink for Opaque {}

    #[test]
    fn test_zero_is_a_fixpoint() {
        assert!(0i32.shrink().is_empty());
        assert!(0u64.shrink().is_empty());
        assert!(0.0f64.shrink().is_empty());
        assert!(i8::MIN.shrink().iter().all(|c| *c != i8::MIN));
    }

    #[test]
    fn test_integer_candidates() {
        assert_eq!(1i32.shrink(), vec![0]);
        assert_eq!(2i32.shrink(), vec![0, 1]);
        assert_eq!(3i32.shrink(), vec![0, 2, 1]);
        assert_eq!(10u32.shrink(), vec![0, 9, 5]);
        assert_eq!((-1i32).shrink(), vec![0]);
        assert_eq!((-2i32).shrink(), vec![0, -1]);
        assert_eq!((-7i64).shrink(), vec![0, -6, -3]);
    }

    #[test]
    fn test_integer_candidates_exclude_original() {
        for v in -300i32..300 {
            let candidates = v.shrink();
            assert!(!candidates.contains(&v));
            if v != 0 {
                assert_eq!(candidates[0], 0);
            }
        }
        assert!(!i64::MIN.shrink().contains(&i64::MIN));
        assert!(!u64::MAX.shrink().contains(&u64::MAX));
    }

    #[test]
    fn test_float_candidates() {
        assert_eq!(2.5f64.shrink(), vec![0.0, 1.5, 1.25]);
        assert_eq!((-0.5f32).shrink(), vec![0.0, -0.25]);
        assert_eq!(f64::NAN.shrink(), vec![0.0]);
        assert_eq!(f64::INFINITY.shrink(), vec![0.0]);
        assert!(!1e20f64.shrink().contains(&1e20));
    }

    #[test]
    fn test_bool_candidates() {
        assert_eq!(true.shrink(), vec![false]);
        assert!(false.shrink().is_empty());
    }

    #[test]
    fn test_default_fallback_is_empty() {
        assert!(Opaque(9).shrink().is_empty());
        assert_eq!(vec![Opaque(1)].shrink(), vec![Vec::<Opaque>::new()]);
    }

    #[test]
    fn test_vec_candidates() {
        assert!(Vec::<i32>::new().shrink().is_empty());
        assert_eq!(vec![0].shrink(), vec![Vec::<i32>::new()]);

        let candidates = vec![1, 2].shrink();
        assert_eq!(
            candidates,
            vec![vec![1], vec![2], vec![0, 2], vec![1, 0], vec![1, 1]]
        );
    }

    #[test]
    fn test_vec_always_offers_drop_last() {
        for len in 1..6 {
            let v: Vec<u8> = (0..len).collect();
            let candidates = v.shrink();
            assert_eq!(candidates[0], v[..v.len() - 1].to_vec());
        }
    }

    #[test]
    fn test_tuple_shrinks_one_position_at_a_time() {
        let candidates = (2i32, true, 0u8).shrink();
        assert_eq!(
            candidates,
            vec![(0, true, 0), (1, true, 0), (2, false, 0)]
        );
        assert!((0i32, false).shrink().is_empty());
    }
}
