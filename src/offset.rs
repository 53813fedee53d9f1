//! Row-major offset arithmetic.
//!
//! Every function here maps a dimension sequence and an index sequence of the
//! same length (outermost dimension first) to a linear offset into a row-major
//! buffer, so that the innermost index has stride 1.
//!
//! [`offset_generic`] is the reference algorithm for any rank. Ranks 1 to 4
//! have hand-unrolled fast paths ([`offset_1`] .. [`offset_4`]) which must agree
//! with it on every valid input; [`offset`] picks between them at compile time.

use crate::{Result, ViewError};

/// Number of elements described by `dims` (1 for rank 0).
#[inline]
pub fn element_count(dims: &[usize]) -> usize {
    dims.iter().product()
}

/// Row-major strides (in elements) for `dims`.
///
/// The last dimension has stride 1; dimension `i` has the product of all
/// dimensions after it.
pub fn row_major_strides(dims: &[usize]) -> Vec<usize> {
    let rank = dims.len();
    if rank == 0 {
        return vec![];
    }
    let mut strides = vec![1usize; rank];
    for i in (0..rank - 1).rev() {
        strides[i] = strides[i + 1] * dims[i + 1];
    }
    strides
}

/// General offset algorithm for any rank.
///
/// Starts from the innermost index and walks outwards, accumulating the
/// running stride. Rank 0 yields offset 0.
#[inline]
pub fn offset_generic(dims: &[usize], indices: &[usize]) -> usize {
    debug_assert_eq!(dims.len(), indices.len(), "rank mismatch");
    let n = indices.len();
    if n == 0 {
        return 0;
    }
    let mut offset = indices[n - 1];
    let mut stride = 1usize;
    for i in (1..n).rev() {
        stride *= dims[i];
        offset += indices[i - 1] * stride;
    }
    offset
}

#[inline]
pub fn offset_1(_dims: &[usize; 1], indices: &[usize; 1]) -> usize {
    indices[0]
}

#[inline]
pub fn offset_2(dims: &[usize; 2], indices: &[usize; 2]) -> usize {
    indices[0] * dims[1] + indices[1]
}

#[inline]
pub fn offset_3(dims: &[usize; 3], indices: &[usize; 3]) -> usize {
    (indices[0] * dims[1] + indices[1]) * dims[2] + indices[2]
}

#[inline]
pub fn offset_4(dims: &[usize; 4], indices: &[usize; 4]) -> usize {
    ((indices[0] * dims[1] + indices[1]) * dims[2] + indices[2]) * dims[3] + indices[3]
}

/// Linear offset for a compile-time rank.
///
/// Ranks 1 to 4 use the unrolled fast paths, everything else falls back to
/// [`offset_generic`]. The `match` is resolved per monomorphization.
///
/// Indices are only validated in debug builds (or with the `bounds-assert`
/// feature). Out-of-range indices produce a meaningless offset otherwise; use
/// [`checked_offset`] when the indices are untrusted.
#[inline]
pub fn offset<const N: usize>(dims: &[usize; N], indices: &[usize; N]) -> usize {
    for d in 0..N {
        bounds_assert!(
            indices[d] < dims[d],
            "index {} out of range for dimension {} of size {}",
            indices[d],
            d,
            dims[d]
        );
    }
    match N {
        0 => 0,
        1 => offset_1(&head(dims), &head(indices)),
        2 => offset_2(&head(dims), &head(indices)),
        3 => offset_3(&head(dims), &head(indices)),
        4 => offset_4(&head(dims), &head(indices)),
        _ => offset_generic(dims, indices),
    }
}

#[inline(always)]
fn head<const K: usize>(s: &[usize]) -> [usize; K] {
    std::array::from_fn(|i| s[i])
}

/// Validate `indices` against `dims` without computing anything.
pub fn check_indices(dims: &[usize], indices: &[usize]) -> Result<()> {
    if dims.len() != indices.len() {
        return Err(ViewError::RankMismatch(dims.len(), indices.len()));
    }
    for (dim, (&index, &size)) in indices.iter().zip(dims.iter()).enumerate() {
        if index >= size {
            return Err(ViewError::IndexOutOfRange { dim, index, size });
        }
    }
    Ok(())
}

/// Validated offset: fails with [`ViewError::IndexOutOfRange`] naming the
/// first offending dimension, or [`ViewError::RankMismatch`] when the two
/// sequences differ in length.
pub fn checked_offset(dims: &[usize], indices: &[usize]) -> Result<usize> {
    check_indices(dims, indices)?;
    Ok(offset_generic(dims, indices))
}
