//! Random element generation.
//!
//! The thread-local generator backs the zero-argument helpers. The fillers
//! take a caller-supplied [`Rng`] so tests and benchmarks can seed it.

use rand::distributions::uniform::SampleUniform;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::StandardNormal;

/// Types with a "uniform over the whole type" sample.
///
/// Integers and `bool` cover every value. Floats cover `[-MAX, MAX)`; the
/// infinities and NaN are never produced.
pub trait RandomUniform: Sized {
    fn random_uniform_with<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

macro_rules! impl_random_uniform_full_range {
    ($($t:ty),*) => {$(
        impl RandomUniform for $t {
            #[inline]
            fn random_uniform_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
                rng.gen()
            }
        }
    )*};
}

impl_random_uniform_full_range!(
    bool, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize
);

macro_rules! impl_random_uniform_float {
    ($($t:ty),*) => {$(
        impl RandomUniform for $t {
            #[inline]
            fn random_uniform_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
                // u in [0, 1) maps to [-MAX, MAX) without computing MAX - MIN.
                let u: $t = rng.gen();
                <$t>::MAX * (2.0 * u - 1.0)
            }
        }
    )*};
}

impl_random_uniform_float!(f32, f64);

/// A uniform sample of `T` from the thread-local generator.
pub fn random_uniform<T: RandomUniform>() -> T {
    T::random_uniform_with(&mut rand::thread_rng())
}

/// A standard normal sample (mean 0, variance 1) from the thread-local generator.
pub fn random_standard_normal<T>() -> T
where
    StandardNormal: Distribution<T>,
{
    rand::thread_rng().sample(StandardNormal)
}

/// Fill `dest` with samples uniform over `[low, high)`.
///
/// # Panics
/// Panics if `low >= high`.
pub fn fill_uniform<T, R>(dest: &mut [T], low: T, high: T, rng: &mut R)
where
    T: SampleUniform,
    R: Rng + ?Sized,
{
    let dist = Uniform::new(low, high);
    for x in dest.iter_mut() {
        *x = dist.sample(rng);
    }
}

/// Fill `dest` with standard normal samples.
pub fn fill_standard_normal<T, R>(dest: &mut [T], rng: &mut R)
where
    StandardNormal: Distribution<T>,
    R: Rng + ?Sized,
{
    for x in dest.iter_mut() {
        *x = rng.sample(StandardNormal);
    }
}
