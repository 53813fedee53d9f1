//! Scalar activation helpers, usable directly as kernel callbacks.

use num_traits::Float;

/// Logistic sigmoid, `e^x / (e^x + 1)`.
#[inline]
pub fn sigmoid<T: Float>(x: T) -> T {
    let ex = x.exp();
    ex / (ex + T::one())
}

/// Derivative of [`sigmoid`], `e^x / (e^x + 1)^2`.
#[inline]
pub fn sigmoid_deriv<T: Float>(x: T) -> T {
    let ex = x.exp();
    let ex_p1 = ex + T::one();
    ex / (ex_p1 * ex_p1)
}
