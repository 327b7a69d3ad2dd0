//! Arbitrary trait and the built-in generation strategies.

use rand::Rng;

use crate::context::GenContext;

/// Trait for types that can generate arbitrary instances of themselves
///
/// One implementation per type. Composite types delegate to the
/// implementations of their components, so any type that implements this
/// trait (by hand or with `#[derive(Arbitrary)]`) can be nested inside
/// vectors, tuples and function values. Asking for a type with no
/// implementation is a compile error, never a runtime fallback.
pub trait Arbitrary: Sized {
    /// Draw a value bounded by the context's current size
    fn arbitrary(ctx: &mut GenContext) -> Self;
}

impl Arbitrary for bool {
    fn arbitrary(ctx: &mut GenContext) -> Self {
        ctx.rng().r#gen()
    }
}

// Signed integers are uniform over [-size, size], clamped to the type.
macro_rules! impl_arbitrary_signed_int {
    ($($t:ty),*) => {
        $(
            impl Arbitrary for $t {
                fn arbitrary(ctx: &mut GenContext) -> Self {
                    let size = ctx.size();
                    if size == 0 {
                        return 0;
                    }
                    let bound = i128::try_from(size).unwrap_or(i128::MAX);
                    let hi = <$t>::try_from(bound).unwrap_or(<$t>::MAX);
                    let lo = <$t>::try_from(-bound).unwrap_or(<$t>::MIN);
                    ctx.rng().gen_range(lo..=hi)
                }
            }
        )*
    };
}

// Unsigned integers are uniform over [0, size], clamped to the type.
macro_rules! impl_arbitrary_unsigned_int {
    ($($t:ty),*) => {
        $(
            impl Arbitrary for $t {
                fn arbitrary(ctx: &mut GenContext) -> Self {
                    let size = ctx.size();
                    if size == 0 {
                        return 0;
                    }
                    let hi = <$t>::try_from(size).unwrap_or(<$t>::MAX);
                    ctx.rng().gen_range(0..=hi)
                }
            }
        )*
    };
}

// Floats are uniform over the half-open range [-size, size).
macro_rules! impl_arbitrary_float {
    ($($t:ty),*) => {
        $(
            impl Arbitrary for $t {
                fn arbitrary(ctx: &mut GenContext) -> Self {
                    let size = ctx.size();
                    if size == 0 {
                        return 0.0;
                    }
                    let bound = size as $t;
                    ctx.rng().gen_range(-bound..bound)
                }
            }
        )*
    };
}

impl_arbitrary_signed_int!(i8, i16, i32, i64, i128, isize);
impl_arbitrary_unsigned_int!(u8, u16, u32, u64, u128, usize);
impl_arbitrary_float!(f32, f64);

/// Vectors always hold exactly `size` independently drawn elements.
impl<T: Arbitrary> Arbitrary for Vec<T> {
    fn arbitrary(ctx: &mut GenContext) -> Self {
        let len = ctx.size();
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(T::arbitrary(ctx));
        }
        items
    }
}

// Tuple expressions evaluate left to right, which fixes the order in which
// components consume the stream.
macro_rules! impl_arbitrary_tuple {
    ($($name:ident),+) => {
        impl<$($name: Arbitrary),+> Arbitrary for ($($name,)+) {
            fn arbitrary(ctx: &mut GenContext) -> Self {
                ($($name::arbitrary(ctx),)+)
            }
        }
    };
}

impl_arbitrary_tuple!(A);
impl_arbitrary_tuple!(A, B);
impl_arbitrary_tuple!(A, B, C);
impl_arbitrary_tuple!(A, B, C, D);
impl_arbitrary_tuple!(A, B, C, D, E);
impl_arbitrary_tuple!(A, B, C, D, E, F);
impl_arbitrary_tuple!(A, B, C, D, E, F, G);
impl_arbitrary_tuple!(A, B, C, D, E, F, G, H);
