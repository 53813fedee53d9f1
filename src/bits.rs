//! Bit-twiddling helpers over primitive integers.

use num_traits::PrimInt;

/// Width of `T` in bits.
#[inline]
pub const fn bits<T>() -> usize {
    std::mem::size_of::<T>() * 8
}

/// Value of bit `n` (bit 0 is the least significant).
#[inline]
pub fn get_bit<T: PrimInt>(value: T, n: usize) -> bool {
    (value >> n) & T::one() == T::one()
}

/// Number of set bits.
#[inline]
pub fn popcount<T: PrimInt>(value: T) -> usize {
    value.count_ones() as usize
}

/// Set bit `n` when `condition` holds; never clears it.
#[inline]
pub fn set_bit_cond<T: PrimInt>(value: &mut T, n: usize, condition: bool) {
    if condition {
        *value = *value | (T::one() << n);
    }
}
