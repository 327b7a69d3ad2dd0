//! Value hashing used to key synthesized function tables.
//!
//! `std::hash::Hash` is seeded per process and not implemented for floats,
//! so function values use their own stable hash instead.

/// Mix `b` into the running hash `a`.
pub fn combine(a: u64, b: u64) -> u64 {
    a ^ b
        .wrapping_add(0x9e37_79b9)
        .wrapping_add(a << 6)
        .wrapping_add(a >> 2)
}

/// Stable, process-independent hash of a value.
///
/// Equal values must hash equally. Required for the argument types of a
/// [`Fun`](crate::fun::Fun).
pub trait ValueHash {
    fn value_hash(&self) -> u64;
}

impl ValueHash for bool {
    fn value_hash(&self) -> u64 {
        u64::from(*self)
    }
}

macro_rules! impl_value_hash_int {
    ($($t:ty),*) => {
        $(
            impl ValueHash for $t {
                fn value_hash(&self) -> u64 {
                    *self as u64
                }
            }
        )*
    };
}

macro_rules! impl_value_hash_wide_int {
    ($($t:ty),*) => {
        $(
            impl ValueHash for $t {
                fn value_hash(&self) -> u64 {
                    let bits = *self as u128;
                    combine(bits as u64, (bits >> 64) as u64)
                }
            }
        )*
    };
}

// -0.0 == 0.0, so both must land on the same hash.
macro_rules! impl_value_hash_float {
    ($($t:ty),*) => {
        $(
            impl ValueHash for $t {
                fn value_hash(&self) -> u64 {
                    if *self == 0.0 {
                        0
                    } else {
                        u64::from(self.to_bits())
                    }
                }
            }
        )*
    };
}

impl_value_hash_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
impl_value_hash_wide_int!(i128, u128);
impl_value_hash_float!(f32, f64);

impl<T: ValueHash> ValueHash for Vec<T> {
    fn value_hash(&self) -> u64 {
        self.iter()
            .fold(self.len() as u64, |acc, item| combine(acc, item.value_hash()))
    }
}

impl<T: ValueHash + ?Sized> ValueHash for &T {
    fn value_hash(&self) -> u64 {
        (**self).value_hash()
    }
}

macro_rules! impl_value_hash_tuple {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: ValueHash),+> ValueHash for ($($name,)+) {
            fn value_hash(&self) -> u64 {
                let mut acc = 0;
                $(acc = combine(acc, self.$idx.value_hash());)+
                acc
            }
        }
    };
}

impl_value_hash_tuple!(A: 0);
impl_value_hash_tuple!(A: 0, B: 1);
impl_value_hash_tuple!(A: 0, B: 1, C: 2);
impl_value_hash_tuple!(A: 0, B: 1, C: 2, D: 3);
impl_value_hash_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4);
impl_value_hash_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
impl_value_hash_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
impl_value_hash_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);
