//! N-dimensional row-major views over borrowed memory.
//!
//! [`NdView`] and [`NdViewMut`] pair a borrowed slice with `N` dimension sizes
//! (outermost first). They never allocate or copy: constructing, copying or
//! slicing a view only moves a slice reference and a small array of sizes.
//!
//! Rank `0` is the dynamic-rank instantiation ([`DynView`] / [`DynViewMut`]):
//! it stores no dimensions, and callers pass the dimension sequence on every
//! access. Fixed-rank views implement their element access on top of it by
//! supplying their stored dimensions.
//!
//! Two access tiers exist:
//! - unchecked: `Index`/`IndexMut`, [`NdView::get`], [`Subscript::subscript`].
//!   Index validity against the dimensions is the caller's contract and is only
//!   asserted in debug builds (or with the `bounds-assert` feature).
//! - checked: [`NdView::at`], [`NdView::checked_dim_size`],
//!   [`Subscript::try_subscript`]. These validate first and return
//!   [`ViewError`] naming the violated constraint.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::slice::{Iter, IterMut};

use crate::offset::{check_indices, checked_offset, element_count, offset, offset_generic};
use crate::{Result, ViewError};

/// Dynamic-rank shared view: the dimension sequence is supplied per access.
pub type DynView<'a, T> = NdView<'a, T, 0>;

/// Dynamic-rank mutable view: the dimension sequence is supplied per access.
pub type DynViewMut<'a, T> = NdViewMut<'a, T, 0>;

#[inline(always)]
fn assert_fixed_rank<const N: usize>() {
    const {
        assert!(
            N > 0,
            "rank-0 views are dynamic-rank; use the *_with / *_dyn accessors"
        )
    }
}

/// Checked element count of `dims`.
fn checked_count(dims: &[usize]) -> Result<usize> {
    dims.iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or(ViewError::OffsetOverflow)
}

fn validate_len(len: usize, dims: &[usize]) -> Result<usize> {
    let needed = checked_count(dims)?;
    if len < needed {
        return Err(ViewError::BufferTooSmall { needed, len });
    }
    Ok(needed)
}

fn dims_from_slice<const N: usize>(dims: &[usize]) -> Result<[usize; N]> {
    dims.try_into()
        .map_err(|_| ViewError::RankMismatch(N, dims.len()))
}

#[inline]
fn debug_check_dyn(dims: &[usize], indices: &[usize]) {
    bounds_assert!(dims.len() == indices.len(), "rank mismatch");
    for (d, (&i, &n)) in indices.iter().zip(dims).enumerate() {
        bounds_assert!(
            i < n,
            "index {} out of range for dimension {} of size {}",
            i,
            d,
            n
        );
    }
}

/// Dimensions of the sub-view obtained by fixing the outermost index.
#[inline]
fn inner_dims<const N: usize, const M: usize>(dims: &[usize; N]) -> [usize; M] {
    std::array::from_fn(|i| dims[i + 1])
}

// ============================================================================
// NdView
// ============================================================================

/// Shared N-dimensional view over a row-major slice.
///
/// # Type Parameters
/// - `'a`: Lifetime of the borrowed data; the view cannot outlive it
/// - `T`: Element type
/// - `N`: Rank. `0` means dynamic rank (see [`DynView`])
///
/// # Example
/// ```rust
/// use ndview::{NdView, Subscript};
///
/// let data: Vec<i32> = (0..24).collect();
/// let view = NdView::new(&data, [2, 3, 4]).unwrap();
///
/// assert_eq!(view[[1, 2, 3]], 23);
/// let plane = view.subscript(1);
/// assert_eq!(plane.dim_size(0), 3);
/// assert_eq!(plane[[2, 3]], 23);
/// ```
pub struct NdView<'a, T, const N: usize> {
    data: &'a [T],
    dims: [usize; N],
}

impl<T, const N: usize> Clone for NdView<'_, T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const N: usize> Copy for NdView<'_, T, N> {}

impl<T, const N: usize> fmt::Debug for NdView<'_, T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NdView")
            .field("dims", &self.dims)
            .field("len", &self.data.len())
            .finish()
    }
}

impl<T, const N: usize> Default for NdView<'_, T, N> {
    fn default() -> Self {
        Self {
            data: &[],
            dims: [0; N],
        }
    }
}

impl<'a, T, const N: usize> NdView<'a, T, N> {
    /// Create a view of `data` with the given dimensions.
    ///
    /// # Errors
    /// [`ViewError::BufferTooSmall`] if `data` holds fewer than
    /// `product(dims)` elements, [`ViewError::OffsetOverflow`] if that product
    /// does not fit in `usize`.
    pub fn new(data: &'a [T], dims: [usize; N]) -> Result<Self> {
        assert_fixed_rank::<N>();
        let len = validate_len(data.len(), &dims)?;
        Ok(Self {
            data: &data[..len],
            dims,
        })
    }

    /// Create a view from a dimension sequence whose length is only known at
    /// runtime.
    pub fn from_dims(data: &'a [T], dims: &[usize]) -> Result<Self> {
        Self::new(data, dims_from_slice(dims)?)
    }

    /// Create a view without validating the buffer length.
    ///
    /// # Safety
    /// `data` must hold at least `product(dims)` elements.
    pub unsafe fn new_unchecked(data: &'a [T], dims: [usize; N]) -> Self {
        assert_fixed_rank::<N>();
        let len = element_count(&dims);
        Self {
            data: data.get_unchecked(..len),
            dims,
        }
    }

    /// Create a view from a raw pointer.
    ///
    /// A null `ptr` or a shape with a zero dimension yields a view with no
    /// backing elements; it can be queried but not indexed.
    ///
    /// # Safety
    /// Unless null, `ptr` must point to `product(dims)` initialized, properly
    /// aligned elements that stay valid and unmutated for `'a`.
    pub unsafe fn from_raw_parts(ptr: *const T, dims: [usize; N]) -> Self {
        assert_fixed_rank::<N>();
        let len = element_count(&dims);
        let data: &'a [T] = if ptr.is_null() || len == 0 {
            &[]
        } else {
            std::slice::from_raw_parts(ptr, len)
        };
        Self { data, dims }
    }

    /// The same memory, viewed with dynamic rank.
    #[inline]
    pub fn as_dynamic(&self) -> DynView<'a, T> {
        NdView {
            data: self.data,
            dims: [],
        }
    }

    /// Dimension sizes, outermost first.
    #[inline]
    pub fn dims(&self) -> &[usize; N] {
        &self.dims
    }

    #[inline]
    pub fn rank(&self) -> usize {
        N
    }

    /// Size of dimension `dim`.
    ///
    /// # Panics
    /// Panics if `dim >= N`.
    #[inline]
    pub fn dim_size(&self, dim: usize) -> usize {
        self.dims[dim]
    }

    /// Size of dimension `dim`, or [`ViewError::InvalidDim`] if `dim >= N`.
    #[inline]
    pub fn checked_dim_size(&self, dim: usize) -> Result<usize> {
        self.dims
            .get(dim)
            .copied()
            .ok_or(ViewError::InvalidDim { dim, rank: N })
    }

    /// Total number of elements; `0` iff some dimension is `0`.
    #[inline]
    pub fn size(&self) -> usize {
        assert_fixed_rank::<N>();
        element_count(&self.dims)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dims.contains(&0)
    }

    /// The viewed elements in row-major order.
    #[inline]
    pub fn data(&self) -> &'a [T] {
        self.data
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    /// Element at `indices` (unchecked tier).
    ///
    /// # Panics
    /// In debug builds, panics if any index is out of range for its dimension.
    /// In all builds, panics if the offset falls outside the backing slice.
    #[inline]
    pub fn get(&self, indices: [usize; N]) -> &'a T {
        assert_fixed_rank::<N>();
        self.as_dynamic().get_with(&self.dims, &indices)
    }

    /// Element at `indices` with no validation at all.
    ///
    /// # Safety
    /// Every index must be below its dimension size.
    #[inline]
    pub unsafe fn get_unchecked(&self, indices: [usize; N]) -> &'a T {
        self.as_dynamic().get_unchecked_with(&self.dims, &indices)
    }

    /// Element at `indices` (checked tier).
    ///
    /// # Errors
    /// [`ViewError::IndexOutOfRange`] naming the first offending dimension.
    #[inline]
    pub fn at(&self, indices: [usize; N]) -> Result<&'a T> {
        assert_fixed_rank::<N>();
        self.as_dynamic().at_with(&self.dims, &indices)
    }

    /// Iterate over all elements in row-major order.
    #[inline]
    pub fn iter(&self) -> Iter<'a, T> {
        self.data.iter()
    }

    /// Iterate over the outermost dimension, yielding what
    /// [`Subscript::subscript`] yields for each index.
    pub fn outer_iter(self) -> impl Iterator<Item = <Self as Subscript>::Output> + 'a
    where
        Self: Subscript + 'a,
    {
        let outer = self.dims[0];
        (0..outer).map(move |i| self.subscript(i))
    }
}

impl<'a, T> NdView<'a, T, 2> {
    #[inline]
    pub fn rows(&self) -> usize {
        self.dims[0]
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.dims[1]
    }
}

// Dynamic rank: the dimension sequence travels with each call.
impl<'a, T> NdView<'a, T, 0> {
    /// Wrap `data` with no stored dimensions.
    #[inline]
    pub fn new_dynamic(data: &'a [T]) -> Self {
        Self { data, dims: [] }
    }

    /// Backing slice length (the dynamic view has no shape of its own).
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Element at `indices` interpreted through `dims`, using the fixed-rank
    /// offset fast paths for `M <= 4`.
    #[inline]
    pub fn get_with<const M: usize>(&self, dims: &[usize; M], indices: &[usize; M]) -> &'a T {
        let data = self.data;
        &data[offset(dims, indices)]
    }

    /// # Safety
    /// Every index must be below its dimension size and `dims` must describe
    /// no more elements than the backing slice holds.
    #[inline]
    pub unsafe fn get_unchecked_with<const M: usize>(
        &self,
        dims: &[usize; M],
        indices: &[usize; M],
    ) -> &'a T {
        self.data.get_unchecked(offset(dims, indices))
    }

    /// Checked access through a compile-time-rank dimension sequence.
    #[inline]
    pub fn at_with<const M: usize>(&self, dims: &[usize; M], indices: &[usize; M]) -> Result<&'a T> {
        self.at_dyn(dims, indices)
    }

    /// Element at `indices` interpreted through `dims`, both of runtime
    /// length (generic offset algorithm).
    #[inline]
    pub fn get_dyn(&self, dims: &[usize], indices: &[usize]) -> &'a T {
        debug_check_dyn(dims, indices);
        let data = self.data;
        &data[offset_generic(dims, indices)]
    }

    /// Checked access with runtime-length sequences.
    ///
    /// # Errors
    /// [`ViewError::RankMismatch`] if the sequences differ in length,
    /// [`ViewError::IndexOutOfRange`] for the first out-of-range index,
    /// [`ViewError::BufferTooSmall`] if `dims` describes more elements than
    /// the backing slice holds.
    pub fn at_dyn(&self, dims: &[usize], indices: &[usize]) -> Result<&'a T> {
        let off = checked_offset(dims, indices)?;
        let data = self.data;
        data.get(off).ok_or(ViewError::BufferTooSmall {
            needed: element_count(dims),
            len: data.len(),
        })
    }
}

impl<T, const N: usize> Index<[usize; N]> for NdView<'_, T, N> {
    type Output = T;

    #[inline]
    fn index(&self, indices: [usize; N]) -> &T {
        self.get(indices)
    }
}

impl<'a, T> From<&'a [T]> for NdView<'a, T, 1> {
    fn from(data: &'a [T]) -> Self {
        Self {
            data,
            dims: [data.len()],
        }
    }
}

impl<'a, T> From<&'a Vec<T>> for NdView<'a, T, 1> {
    fn from(data: &'a Vec<T>) -> Self {
        Self::from(data.as_slice())
    }
}

impl<'a, T, const K: usize> From<&'a [T; K]> for NdView<'a, T, 1> {
    fn from(data: &'a [T; K]) -> Self {
        Self::from(data.as_slice())
    }
}

impl<'a, T, const N: usize> From<NdViewMut<'a, T, N>> for NdView<'a, T, N> {
    fn from(view: NdViewMut<'a, T, N>) -> Self {
        Self {
            data: view.data,
            dims: view.dims,
        }
    }
}

impl<'a, T, const N: usize> IntoIterator for NdView<'a, T, N> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

// ============================================================================
// NdViewMut
// ============================================================================

/// Exclusive N-dimensional view over a row-major slice.
///
/// Same layout rules as [`NdView`]. It is not `Copy`; use
/// [`reborrow`](NdViewMut::reborrow) to hand out a shorter-lived copy and
/// [`as_view`](NdViewMut::as_view) for a shared view.
pub struct NdViewMut<'a, T, const N: usize> {
    data: &'a mut [T],
    dims: [usize; N],
}

impl<T, const N: usize> fmt::Debug for NdViewMut<'_, T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NdViewMut")
            .field("dims", &self.dims)
            .field("len", &self.data.len())
            .finish()
    }
}

impl<T, const N: usize> Default for NdViewMut<'_, T, N> {
    fn default() -> Self {
        Self {
            data: &mut [],
            dims: [0; N],
        }
    }
}

impl<'a, T, const N: usize> NdViewMut<'a, T, N> {
    /// Create a mutable view of `data` with the given dimensions.
    ///
    /// # Errors
    /// Same as [`NdView::new`].
    pub fn new(data: &'a mut [T], dims: [usize; N]) -> Result<Self> {
        assert_fixed_rank::<N>();
        let len = validate_len(data.len(), &dims)?;
        Ok(Self {
            data: &mut data[..len],
            dims,
        })
    }

    pub fn from_dims(data: &'a mut [T], dims: &[usize]) -> Result<Self> {
        Self::new(data, dims_from_slice(dims)?)
    }

    /// # Safety
    /// `data` must hold at least `product(dims)` elements.
    pub unsafe fn new_unchecked(data: &'a mut [T], dims: [usize; N]) -> Self {
        assert_fixed_rank::<N>();
        let len = element_count(&dims);
        Self {
            data: data.get_unchecked_mut(..len),
            dims,
        }
    }

    /// # Safety
    /// Unless null, `ptr` must point to `product(dims)` initialized, properly
    /// aligned elements, valid for `'a` and not accessed through any other
    /// path while the view lives.
    pub unsafe fn from_raw_parts(ptr: *mut T, dims: [usize; N]) -> Self {
        assert_fixed_rank::<N>();
        let len = element_count(&dims);
        let data: &'a mut [T] = if ptr.is_null() || len == 0 {
            &mut []
        } else {
            std::slice::from_raw_parts_mut(ptr, len)
        };
        Self { data, dims }
    }

    /// A shorter-lived mutable view of the same memory.
    #[inline]
    pub fn reborrow(&mut self) -> NdViewMut<'_, T, N> {
        NdViewMut {
            data: &mut *self.data,
            dims: self.dims,
        }
    }

    /// A shared view of the same memory.
    #[inline]
    pub fn as_view(&self) -> NdView<'_, T, N> {
        NdView {
            data: &*self.data,
            dims: self.dims,
        }
    }

    #[inline]
    pub fn as_dynamic_mut(&mut self) -> DynViewMut<'_, T> {
        NdViewMut {
            data: &mut *self.data,
            dims: [],
        }
    }

    #[inline]
    pub fn into_dynamic(self) -> DynViewMut<'a, T> {
        NdViewMut {
            data: self.data,
            dims: [],
        }
    }

    #[inline]
    pub fn dims(&self) -> &[usize; N] {
        &self.dims
    }

    #[inline]
    pub fn rank(&self) -> usize {
        N
    }

    /// # Panics
    /// Panics if `dim >= N`.
    #[inline]
    pub fn dim_size(&self, dim: usize) -> usize {
        self.dims[dim]
    }

    #[inline]
    pub fn checked_dim_size(&self, dim: usize) -> Result<usize> {
        self.dims
            .get(dim)
            .copied()
            .ok_or(ViewError::InvalidDim { dim, rank: N })
    }

    #[inline]
    pub fn size(&self) -> usize {
        assert_fixed_rank::<N>();
        element_count(&self.dims)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dims.contains(&0)
    }

    #[inline]
    pub fn data(&self) -> &[T] {
        &*self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut *self.data
    }

    #[inline]
    pub fn into_data(self) -> &'a mut [T] {
        self.data
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr()
    }

    /// Shared element access (unchecked tier).
    #[inline]
    pub fn get(&self, indices: [usize; N]) -> &T {
        self.as_view().get(indices)
    }

    /// Mutable element access (unchecked tier).
    #[inline]
    pub fn get_mut(&mut self, indices: [usize; N]) -> &mut T {
        self.reborrow().into_mut(indices)
    }

    /// Consume the view, returning the element reference with the full
    /// lifetime `'a`.
    #[inline]
    pub fn into_mut(self, indices: [usize; N]) -> &'a mut T {
        assert_fixed_rank::<N>();
        let dims = self.dims;
        self.into_dynamic().into_mut_with(&dims, &indices)
    }

    /// # Safety
    /// Every index must be below its dimension size.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, indices: [usize; N]) -> &mut T {
        let dims = self.dims;
        self.as_dynamic_mut().into_mut_unchecked_with(&dims, &indices)
    }

    /// Checked shared access.
    #[inline]
    pub fn at(&self, indices: [usize; N]) -> Result<&T> {
        self.as_view().at(indices)
    }

    /// Checked mutable access.
    #[inline]
    pub fn at_mut(&mut self, indices: [usize; N]) -> Result<&mut T> {
        self.reborrow().try_into_mut(indices)
    }

    #[inline]
    pub fn try_into_mut(self, indices: [usize; N]) -> Result<&'a mut T> {
        assert_fixed_rank::<N>();
        let dims = self.dims;
        self.into_dynamic().try_into_mut_with(&dims, &indices)
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        self.data.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.data.iter_mut()
    }
}

impl<'a, T> NdViewMut<'a, T, 2> {
    #[inline]
    pub fn rows(&self) -> usize {
        self.dims[0]
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.dims[1]
    }
}

impl<'a, T> NdViewMut<'a, T, 0> {
    #[inline]
    pub fn new_dynamic(data: &'a mut [T]) -> Self {
        Self { data, dims: [] }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn get_with<const M: usize>(&self, dims: &[usize; M], indices: &[usize; M]) -> &T {
        self.as_view().get_with(dims, indices)
    }

    #[inline]
    pub fn get_with_mut<const M: usize>(
        &mut self,
        dims: &[usize; M],
        indices: &[usize; M],
    ) -> &mut T {
        self.reborrow().into_mut_with(dims, indices)
    }

    #[inline]
    pub fn into_mut_with<const M: usize>(self, dims: &[usize; M], indices: &[usize; M]) -> &'a mut T {
        let data = self.data;
        &mut data[offset(dims, indices)]
    }

    /// # Safety
    /// Every index must be below its dimension size and `dims` must describe
    /// no more elements than the backing slice holds.
    #[inline]
    pub unsafe fn into_mut_unchecked_with<const M: usize>(
        self,
        dims: &[usize; M],
        indices: &[usize; M],
    ) -> &'a mut T {
        let data = self.data;
        data.get_unchecked_mut(offset(dims, indices))
    }

    #[inline]
    pub fn at_with_mut<const M: usize>(
        &mut self,
        dims: &[usize; M],
        indices: &[usize; M],
    ) -> Result<&mut T> {
        self.reborrow().try_into_mut_with(dims, indices)
    }

    #[inline]
    pub fn try_into_mut_with<const M: usize>(
        self,
        dims: &[usize; M],
        indices: &[usize; M],
    ) -> Result<&'a mut T> {
        self.try_into_mut_dyn(dims, indices)
    }

    #[inline]
    pub fn get_dyn_mut(&mut self, dims: &[usize], indices: &[usize]) -> &mut T {
        debug_check_dyn(dims, indices);
        &mut self.data[offset_generic(dims, indices)]
    }

    pub fn try_into_mut_dyn(self, dims: &[usize], indices: &[usize]) -> Result<&'a mut T> {
        let off = checked_offset(dims, indices)?;
        let data = self.data;
        let len = data.len();
        data.get_mut(off).ok_or(ViewError::BufferTooSmall {
            needed: element_count(dims),
            len,
        })
    }
}

impl<T, const N: usize> Index<[usize; N]> for NdViewMut<'_, T, N> {
    type Output = T;

    #[inline]
    fn index(&self, indices: [usize; N]) -> &T {
        self.get(indices)
    }
}

impl<T, const N: usize> IndexMut<[usize; N]> for NdViewMut<'_, T, N> {
    #[inline]
    fn index_mut(&mut self, indices: [usize; N]) -> &mut T {
        self.get_mut(indices)
    }
}

impl<'a, T> From<&'a mut [T]> for NdViewMut<'a, T, 1> {
    fn from(data: &'a mut [T]) -> Self {
        let len = data.len();
        Self { data, dims: [len] }
    }
}

impl<'a, T> From<&'a mut Vec<T>> for NdViewMut<'a, T, 1> {
    fn from(data: &'a mut Vec<T>) -> Self {
        Self::from(data.as_mut_slice())
    }
}

// ============================================================================
// Subscript by the outermost index
// ============================================================================

/// Fix the outermost index of a view.
///
/// For rank `N >= 2` the result is a rank `N - 1` view of the same memory,
/// starting `index * product(dims[1..])` elements in. For rank 1 the result is
/// a reference to the element itself rather than a rank-0 view; generic code
/// walking down through ranks has to stop at rank 1.
pub trait Subscript: Sized {
    type Output;

    /// Unchecked tier: `index < dim_size(0)` is only asserted in debug builds.
    fn subscript(self, index: usize) -> Self::Output;

    /// Checked tier: [`ViewError::IndexOutOfRange`] on dimension 0.
    fn try_subscript(self, index: usize) -> Result<Self::Output>;
}

impl<'a, T> Subscript for NdView<'a, T, 1> {
    type Output = &'a T;

    #[inline]
    fn subscript(self, index: usize) -> &'a T {
        self.get([index])
    }

    #[inline]
    fn try_subscript(self, index: usize) -> Result<&'a T> {
        self.at([index])
    }
}

impl<'a, T> Subscript for NdViewMut<'a, T, 1> {
    type Output = &'a mut T;

    #[inline]
    fn subscript(self, index: usize) -> &'a mut T {
        self.into_mut([index])
    }

    #[inline]
    fn try_subscript(self, index: usize) -> Result<&'a mut T> {
        self.try_into_mut([index])
    }
}

macro_rules! impl_subscript {
    ($($n:literal => $m:literal),* $(,)?) => {$(
        impl<'a, T> Subscript for NdView<'a, T, $n> {
            type Output = NdView<'a, T, $m>;

            #[inline]
            fn subscript(self, index: usize) -> Self::Output {
                bounds_assert!(
                    index < self.dims[0],
                    "index {} out of range for dimension 0 of size {}",
                    index,
                    self.dims[0]
                );
                let dims: [usize; $m] = inner_dims(&self.dims);
                let stride = element_count(&dims);
                let start = index * stride;
                let data = self.data;
                NdView {
                    data: &data[start..start + stride],
                    dims,
                }
            }

            fn try_subscript(self, index: usize) -> Result<Self::Output> {
                check_indices(&self.dims[..1], &[index])?;
                Ok(self.subscript(index))
            }
        }

        impl<'a, T> Subscript for NdViewMut<'a, T, $n> {
            type Output = NdViewMut<'a, T, $m>;

            #[inline]
            fn subscript(self, index: usize) -> Self::Output {
                bounds_assert!(
                    index < self.dims[0],
                    "index {} out of range for dimension 0 of size {}",
                    index,
                    self.dims[0]
                );
                let dims: [usize; $m] = inner_dims(&self.dims);
                let stride = element_count(&dims);
                let start = index * stride;
                let data = self.data;
                NdViewMut {
                    data: &mut data[start..start + stride],
                    dims,
                }
            }

            fn try_subscript(self, index: usize) -> Result<Self::Output> {
                check_indices(&self.dims[..1], &[index])?;
                Ok(self.subscript(index))
            }
        }
    )*};
}

impl_subscript!(2 => 1, 3 => 2, 4 => 3, 5 => 4, 6 => 5, 7 => 6, 8 => 7);

#[cfg(test)]
mod tests {
    use super::*;

    fn iota(n: usize) -> Vec<i64> {
        (0..n as i64).collect()
    }

    #[test]
    fn test_new_view() {
        let data = iota(24);
        let view = NdView::new(&data, [2, 3, 4]).unwrap();
        assert_eq!(view.dims(), &[2, 3, 4]);
        assert_eq!(view.rank(), 3);
        assert_eq!(view.size(), 24);
        assert_eq!(view.data().len(), 24);
        assert!(!view.is_empty());
    }

    #[test]
    fn test_new_trims_to_shape() {
        let data = iota(30);
        let view = NdView::new(&data, [2, 3]).unwrap();
        assert_eq!(view.data(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_new_buffer_too_small() {
        let data = iota(5);
        let err = NdView::new(&data, [2, 3]).unwrap_err();
        assert!(matches!(err, ViewError::BufferTooSmall { needed: 6, len: 5 }));
    }

    #[test]
    fn test_new_overflowing_shape() {
        let data = iota(1);
        let err = NdView::new(&data, [usize::MAX, 2]).unwrap_err();
        assert!(matches!(err, ViewError::OffsetOverflow));
    }

    #[test]
    fn test_from_dims() {
        let data = iota(6);
        let view: NdView<'_, i64, 2> = NdView::from_dims(&data, &[3, 2]).unwrap();
        assert_eq!(view[[2, 1]], 5);
        let err = NdView::<i64, 3>::from_dims(&data, &[3, 2]).unwrap_err();
        assert!(matches!(err, ViewError::RankMismatch(3, 2)));
    }

    #[test]
    fn test_example_scenario() {
        let data = iota(24);
        let view = NdView::new(&data, [2, 3, 4]).unwrap();
        assert_eq!(view[[1, 2, 3]], 23);
        let sub = view.subscript(1);
        assert_eq!(sub.dims(), &[3, 4]);
        assert_eq!(sub.dim_size(0), 3);
        assert_eq!(sub[[2, 3]], 23);
    }

    #[test]
    fn test_row_major_layout() {
        let data = iota(6);
        let view = NdView::new(&data, [2, 3]).unwrap();
        assert_eq!(view[[0, 0]], 0);
        assert_eq!(view[[0, 2]], 2);
        assert_eq!(view[[1, 0]], 3);
        assert_eq!(view[[1, 2]], 5);
        assert_eq!(view.rows(), 2);
        assert_eq!(view.columns(), 3);
    }

    #[test]
    fn test_subscript_rank1_returns_element() {
        let data = iota(5);
        let view = NdView::new(&data, [5]).unwrap();
        let by_subscript: &i64 = view.subscript(3);
        let by_call: &i64 = view.get([3]);
        assert!(std::ptr::eq(by_subscript, by_call));
        assert_eq!(*by_subscript, 3);
    }

    #[test]
    fn test_subscript_chain_reaches_element() {
        let data = iota(2 * 3 * 4 * 5);
        let view = NdView::new(&data, [2, 3, 4, 5]).unwrap();
        let elem = view.subscript(1).subscript(2).subscript(3).subscript(4);
        assert!(std::ptr::eq(elem, view.get([1, 2, 3, 4])));
    }

    #[test]
    fn test_subscript_aliases_memory() {
        let data = iota(12);
        let view = NdView::new(&data, [3, 4]).unwrap();
        let row = view.subscript(2);
        assert_eq!(row.as_ptr(), unsafe { data.as_ptr().add(8) });
        assert_eq!(row.data(), &[8, 9, 10, 11]);
    }

    #[test]
    fn test_try_subscript() {
        let data = iota(12);
        let view = NdView::new(&data, [3, 4]).unwrap();
        assert!(view.try_subscript(2).is_ok());
        let err = view.try_subscript(3).unwrap_err();
        assert!(matches!(
            err,
            ViewError::IndexOutOfRange {
                dim: 0,
                index: 3,
                size: 3
            }
        ));
        let row = view.subscript(0);
        assert_eq!(*row.try_subscript(3).unwrap(), 3);
        assert!(row.try_subscript(4).is_err());
    }

    #[test]
    fn test_at_rejects_each_dimension() {
        let data = iota(24);
        let view = NdView::new(&data, [2, 3, 4]).unwrap();
        for d in 0..3 {
            let mut idx = [0, 0, 0];
            idx[d] = view.dim_size(d);
            match view.at(idx) {
                Err(ViewError::IndexOutOfRange { dim, index, size }) => {
                    assert_eq!(dim, d);
                    assert_eq!(index, size);
                }
                other => panic!("expected out-of-range error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_at_matches_unchecked() {
        let data = iota(24);
        let view = NdView::new(&data, [2, 3, 4]).unwrap();
        for i in 0..2 {
            for j in 0..3 {
                for k in 0..4 {
                    assert!(std::ptr::eq(view.at([i, j, k]).unwrap(), &view[[i, j, k]]));
                }
            }
        }
    }

    #[test]
    fn test_checked_dim_size() {
        let data = iota(6);
        let view = NdView::new(&data, [2, 3]).unwrap();
        assert_eq!(view.checked_dim_size(1).unwrap(), 3);
        assert!(matches!(
            view.checked_dim_size(2),
            Err(ViewError::InvalidDim { dim: 2, rank: 2 })
        ));
    }

    #[test]
    fn test_empty_view_queries() {
        let data: Vec<f64> = vec![];
        let view = NdView::new(&data, [3, 0, 2]).unwrap();
        assert_eq!(view.size(), 0);
        assert!(view.is_empty());
        assert_eq!(view.dim_size(0), 3);
        assert_eq!(view.dim_size(2), 2);
        assert!(view.data().is_empty());
        assert!(view.at([0, 0, 0]).is_err());
    }

    #[test]
    fn test_default_is_empty() {
        let view: NdView<'_, f32, 2> = NdView::default();
        assert_eq!(view.size(), 0);
        assert!(view.is_empty());
    }

    #[test]
    fn test_from_raw_parts_null() {
        let view: NdView<'_, f64, 2> = unsafe { NdView::from_raw_parts(std::ptr::null(), [0, 4]) };
        assert_eq!(view.size(), 0);
        assert_eq!(view.dim_size(1), 4);
    }

    #[test]
    fn test_from_raw_parts_reads_buffer() {
        let data = iota(8);
        let view = unsafe { NdView::from_raw_parts(data.as_ptr(), [2, 2, 2]) };
        assert_eq!(view[[1, 1, 0]], 6);
    }

    #[test]
    fn test_copy_shares_memory() {
        let data = iota(4);
        let a = NdView::new(&data, [2, 2]).unwrap();
        let b = a;
        assert_eq!(a.as_ptr(), b.as_ptr());
        assert_eq!(a.dims(), b.dims());
    }

    #[test]
    fn test_rank1_from_containers() {
        let v = vec![1.0, 2.0, 3.0];
        let from_vec: NdView<'_, f64, 1> = (&v).into();
        assert_eq!(from_vec.dim_size(0), 3);
        let arr = [4, 5];
        let from_arr: NdView<'_, i32, 1> = (&arr).into();
        assert_eq!(from_arr[[1]], 5);
        let from_slice: NdView<'_, f64, 1> = (&v[1..]).into();
        assert_eq!(from_slice[[0]], 2.0);
    }

    #[test]
    fn test_outer_iter() {
        let data = iota(6);
        let view = NdView::new(&data, [3, 2]).unwrap();
        let firsts: Vec<i64> = view.outer_iter().map(|row| row[[0]]).collect();
        assert_eq!(firsts, vec![0, 2, 4]);
        let flat = NdView::new(&data, [6]).unwrap();
        let all: Vec<i64> = flat.outer_iter().copied().collect();
        assert_eq!(all, data);
    }

    #[test]
    fn test_iter_row_major() {
        let data = iota(6);
        let view = NdView::new(&data, [2, 3]).unwrap();
        let collected: Vec<i64> = view.iter().copied().collect();
        assert_eq!(collected, data);
    }

    #[test]
    fn test_high_rank_generic_offset() {
        let dims = [2, 1, 3, 1, 2, 2];
        let data = iota(24);
        let view = NdView::new(&data, dims).unwrap();
        assert_eq!(view[[1, 0, 2, 0, 1, 1]], 23);
        assert_eq!(view[[1, 0, 0, 0, 0, 0]], 12);
        let sub = view.subscript(1);
        assert_eq!(sub[[0, 2, 0, 1, 1]], 23);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range for dimension 1")]
    fn test_unchecked_debug_assert() {
        let data = iota(12);
        let view = NdView::new(&data, [3, 4]).unwrap();
        let _elem = view[[0, 4]];
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range for dimension 0")]
    fn test_subscript_debug_assert() {
        let data = iota(12);
        let view = NdView::new(&data, [3, 4]).unwrap();
        let _ = view.subscript(3);
    }

    // ------------------------------------------------------------------
    // Dynamic rank
    // ------------------------------------------------------------------

    #[test]
    fn test_dynamic_view_access() {
        let data = iota(24);
        let dyn_view = DynView::new_dynamic(&data);
        assert_eq!(dyn_view.len(), 24);
        assert_eq!(*dyn_view.get_with(&[2, 3, 4], &[1, 2, 3]), 23);
        assert_eq!(*dyn_view.get_dyn(&[4, 6], &[3, 5]), 23);
        assert_eq!(*dyn_view.get_dyn(&[2, 2, 2, 3], &[1, 0, 1, 2]), 12 + 3 + 2);
    }

    #[test]
    fn test_dynamic_view_checked() {
        let data = iota(6);
        let dyn_view = DynView::new_dynamic(&data);
        assert_eq!(*dyn_view.at_with(&[2, 3], &[1, 1]).unwrap(), 4);
        assert!(matches!(
            dyn_view.at_with(&[2, 3], &[2, 0]),
            Err(ViewError::IndexOutOfRange { dim: 0, .. })
        ));
        assert!(matches!(
            dyn_view.at_dyn(&[2, 3], &[1]),
            Err(ViewError::RankMismatch(2, 1))
        ));
        assert!(matches!(
            dyn_view.at_dyn(&[4, 4], &[3, 3]),
            Err(ViewError::BufferTooSmall { needed: 16, len: 6 })
        ));
    }

    #[test]
    fn test_fixed_rank_agrees_with_dynamic() {
        let data = iota(60);
        let view = NdView::new(&data, [3, 4, 5]).unwrap();
        let dyn_view = view.as_dynamic();
        for i in 0..3 {
            for j in 0..4 {
                for k in 0..5 {
                    assert!(std::ptr::eq(
                        view.get([i, j, k]),
                        dyn_view.get_dyn(view.dims(), &[i, j, k])
                    ));
                }
            }
        }
    }

    #[test]
    fn test_dynamic_view_mut() {
        let mut data = vec![0i64; 6];
        let mut dyn_view = DynViewMut::new_dynamic(&mut data);
        *dyn_view.get_with_mut(&[2, 3], &[1, 2]) = 7;
        *dyn_view.get_dyn_mut(&[3, 2], &[0, 1]) = 9;
        *dyn_view.at_with_mut(&[6], &[4]).unwrap() = 5;
        assert!(dyn_view.at_with_mut(&[6], &[6]).is_err());
        assert_eq!(*dyn_view.get_with(&[6], &[5]), 7);
        assert_eq!(data, vec![0, 9, 0, 0, 5, 7]);
    }

    // ------------------------------------------------------------------
    // Mutable views
    // ------------------------------------------------------------------

    #[test]
    fn test_mutable_view_round_trip() {
        let mut data = vec![0.0f64; 24];
        {
            let mut view = NdViewMut::new(&mut data, [2, 3, 4]).unwrap();
            view[[1, 2, 3]] = 42.0;
            *view.get_mut([0, 1, 2]) = -1.5;
            *view.at_mut([1, 0, 0]).unwrap() = 8.0;
        }
        let view = NdView::new(&data, [2, 3, 4]).unwrap();
        assert_eq!(view[[1, 2, 3]], 42.0);
        assert_eq!(view[[0, 1, 2]], -1.5);
        assert_eq!(view[[1, 0, 0]], 8.0);
    }

    #[test]
    fn test_mutable_subscript() {
        let mut data = vec![0i32; 12];
        let mut view = NdViewMut::new(&mut data, [3, 4]).unwrap();
        {
            let mut row = view.reborrow().subscript(1);
            row[[2]] = 5;
            *row.reborrow().subscript(3) = 6;
        }
        assert!(view.reborrow().try_subscript(3).is_err());
        assert_eq!(view.get([1, 2]), &5);
        assert_eq!(view.as_view()[[1, 3]], 6);
        assert_eq!(data[6], 5);
        assert_eq!(data[7], 6);
    }

    #[test]
    fn test_mutable_at_errors() {
        let mut data = vec![0u8; 6];
        let mut view = NdViewMut::new(&mut data, [2, 3]).unwrap();
        assert!(matches!(
            view.at_mut([0, 3]),
            Err(ViewError::IndexOutOfRange { dim: 1, index: 3, size: 3 })
        ));
        assert!(view.at([1, 2]).is_ok());
    }

    #[test]
    fn test_freeze_mutable_view() {
        let mut data = vec![1, 2, 3, 4];
        let mut view = NdViewMut::new(&mut data, [2, 2]).unwrap();
        view.iter_mut().for_each(|x| *x *= 10);
        let frozen: NdView<'_, i32, 2> = view.into();
        assert_eq!(frozen[[1, 1]], 40);
    }

    mod properties {
        use super::super::*;
        use test_strategy::{proptest, Arbitrary};

        #[derive(Arbitrary, Debug)]
        struct SliceProblem {
            #[strategy(1..=8usize)]
            d0: usize,
            #[strategy(1..=8usize)]
            d1: usize,
            #[strategy(1..=8usize)]
            d2: usize,
            #[strategy(0..#d0)]
            i0: usize,
            #[strategy(0..#d1)]
            i1: usize,
            #[strategy(0..#d2)]
            i2: usize,
        }

        #[proptest(cases = 128)]
        fn subscript_then_index_equals_direct(p: SliceProblem) {
            let dims = [p.d0, p.d1, p.d2];
            let data: Vec<usize> = (0..element_count(&dims)).collect();
            let view = NdView::new(&data, dims).unwrap();
            let direct = view.get([p.i0, p.i1, p.i2]);
            assert!(std::ptr::eq(view.subscript(p.i0).get([p.i1, p.i2]), direct));
            assert!(std::ptr::eq(
                view.subscript(p.i0).subscript(p.i1).get([p.i2]),
                direct
            ));
            assert_eq!(view.subscript(p.i0).dim_size(0), p.d1);
        }

        #[proptest(cases = 64)]
        fn size_is_product_of_dims(
            #[strategy(0..=6usize)] d0: usize,
            #[strategy(0..=6usize)] d1: usize,
            #[strategy(0..=6usize)] d2: usize,
        ) {
            let data = vec![0u8; d0 * d1 * d2];
            let view = NdView::new(&data, [d0, d1, d2]).unwrap();
            let product: usize = (0..3).map(|d| view.dim_size(d)).product();
            assert_eq!(view.size(), product);
            assert_eq!(view.size() == 0, view.dims().contains(&0));
        }
    }
}
