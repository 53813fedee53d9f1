//! One-indexed vector views for the linear-algebra layer.
//!
//! [`VectorView`] and [`VectorViewMut`] wrap the flat [`ArrayView`] /
//! [`ArrayViewMut`] and shift every index by one: valid indices are
//! `1..=size()`. The [`Vector`] and [`VectorMut`] traits are the contract the
//! kernels in [`vector_ops`](crate::vector_ops) and [`mv_ops`](crate::mv_ops)
//! are written against.

use std::ops::{Index, IndexMut};
use std::slice::{Iter, IterMut};

use crate::array_view::{ArrayView, ArrayViewMut};
use crate::{Result, ViewError};

/// Read side of the kernel contract for vectors.
pub trait Vector {
    type Elem;

    /// Number of elements.
    fn size(&self) -> usize;

    /// Element `i` in `1..=size()`. Out-of-range indices panic.
    fn elem(&self, i: usize) -> &Self::Elem;

    /// All elements in order.
    fn data(&self) -> &[Self::Elem];
}

/// Write side of the kernel contract for vectors.
pub trait VectorMut: Vector {
    fn elem_mut(&mut self, i: usize) -> &mut Self::Elem;

    fn data_mut(&mut self) -> &mut [Self::Elem];
}

fn check_one_based(index: usize, size: usize) -> Result<usize> {
    if index == 0 || index > size {
        return Err(ViewError::IndexOutOfRange {
            dim: 0,
            index,
            size,
        });
    }
    Ok(index - 1)
}

#[inline]
fn zero_based(index: usize, size: usize) -> usize {
    bounds_assert!(
        index >= 1 && index <= size,
        "vector index {} out of range 1..={}",
        index,
        size
    );
    index.wrapping_sub(1)
}

/// Shared one-indexed vector view.
#[derive(Debug)]
pub struct VectorView<'a, T> {
    inner: ArrayView<'a, T>,
}

impl<T> Default for VectorView<'_, T> {
    fn default() -> Self {
        Self {
            inner: ArrayView::default(),
        }
    }
}

impl<T> Clone for VectorView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for VectorView<'_, T> {}

impl<'a, T> VectorView<'a, T> {
    #[inline]
    pub fn new(data: &'a [T]) -> Self {
        Self {
            inner: ArrayView::new(data),
        }
    }

    /// # Safety
    /// Same contract as [`ArrayView::from_raw_parts`].
    pub unsafe fn from_raw_parts(ptr: *const T, len: usize) -> Self {
        Self {
            inner: ArrayView::from_raw_parts(ptr, len),
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn data(&self) -> &'a [T] {
        self.inner.as_slice()
    }

    /// Element `i` with `1 <= i <= size()`, or [`ViewError::IndexOutOfRange`]
    /// carrying the one-based index.
    pub fn at(&self, i: usize) -> Result<&'a T> {
        let idx = check_one_based(i, self.size())?;
        Ok(&self.data()[idx])
    }

    #[inline]
    pub fn front(&self) -> &'a T {
        self.inner.front()
    }

    #[inline]
    pub fn back(&self) -> &'a T {
        self.inner.back()
    }

    #[inline]
    pub fn iter(&self) -> Iter<'a, T> {
        self.inner.iter()
    }

    pub fn shrink_front(&mut self, count: usize) {
        self.inner.shrink_front(count);
    }

    pub fn shrink_back(&mut self, count: usize) {
        self.inner.shrink_back(count);
    }

    #[inline]
    pub fn as_array_view(&self) -> ArrayView<'a, T> {
        self.inner
    }
}

impl<T> Index<usize> for VectorView<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.inner[zero_based(i, self.size())]
    }
}

impl<T> Vector for VectorView<'_, T> {
    type Elem = T;

    #[inline]
    fn size(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    fn elem(&self, i: usize) -> &T {
        &self[i]
    }

    #[inline]
    fn data(&self) -> &[T] {
        self.inner.as_slice()
    }
}

impl<'a, T> From<&'a [T]> for VectorView<'a, T> {
    fn from(data: &'a [T]) -> Self {
        Self::new(data)
    }
}

impl<'a, T> From<&'a Vec<T>> for VectorView<'a, T> {
    fn from(data: &'a Vec<T>) -> Self {
        Self::new(data)
    }
}

impl<'a, T> From<ArrayView<'a, T>> for VectorView<'a, T> {
    fn from(inner: ArrayView<'a, T>) -> Self {
        Self { inner }
    }
}

impl<'a, T> IntoIterator for VectorView<'a, T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

/// Exclusive one-indexed vector view.
#[derive(Debug)]
pub struct VectorViewMut<'a, T> {
    inner: ArrayViewMut<'a, T>,
}

impl<T> Default for VectorViewMut<'_, T> {
    fn default() -> Self {
        Self {
            inner: ArrayViewMut::default(),
        }
    }
}

impl<'a, T> VectorViewMut<'a, T> {
    #[inline]
    pub fn new(data: &'a mut [T]) -> Self {
        Self {
            inner: ArrayViewMut::new(data),
        }
    }

    /// # Safety
    /// Same contract as [`ArrayViewMut::from_raw_parts`].
    pub unsafe fn from_raw_parts(ptr: *mut T, len: usize) -> Self {
        Self {
            inner: ArrayViewMut::from_raw_parts(ptr, len),
        }
    }

    #[inline]
    pub fn reborrow(&mut self) -> VectorViewMut<'_, T> {
        VectorViewMut {
            inner: self.inner.reborrow(),
        }
    }

    #[inline]
    pub fn as_view(&self) -> VectorView<'_, T> {
        VectorView {
            inner: self.inner.as_view(),
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn data(&self) -> &[T] {
        self.inner.as_slice()
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        self.inner.as_mut_slice()
    }

    pub fn at(&self, i: usize) -> Result<&T> {
        let idx = check_one_based(i, self.size())?;
        Ok(&self.inner[idx])
    }

    pub fn at_mut(&mut self, i: usize) -> Result<&mut T> {
        let idx = check_one_based(i, self.size())?;
        Ok(&mut self.inner[idx])
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        self.inner.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.inner.iter_mut()
    }

    pub fn shrink_front(&mut self, count: usize) {
        self.inner.shrink_front(count);
    }

    pub fn shrink_back(&mut self, count: usize) {
        self.inner.shrink_back(count);
    }
}

impl<T> Index<usize> for VectorViewMut<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.inner[zero_based(i, self.size())]
    }
}

impl<T> IndexMut<usize> for VectorViewMut<'_, T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        let idx = zero_based(i, self.size());
        &mut self.inner[idx]
    }
}

impl<T> Vector for VectorViewMut<'_, T> {
    type Elem = T;

    #[inline]
    fn size(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    fn elem(&self, i: usize) -> &T {
        &self[i]
    }

    #[inline]
    fn data(&self) -> &[T] {
        self.inner.as_slice()
    }
}

impl<T> VectorMut for VectorViewMut<'_, T> {
    #[inline]
    fn elem_mut(&mut self, i: usize) -> &mut T {
        &mut self[i]
    }

    #[inline]
    fn data_mut(&mut self) -> &mut [T] {
        self.inner.as_mut_slice()
    }
}

impl<'a, T> From<&'a mut [T]> for VectorViewMut<'a, T> {
    fn from(data: &'a mut [T]) -> Self {
        Self::new(data)
    }
}

impl<'a, T> From<&'a mut Vec<T>> for VectorViewMut<'a, T> {
    fn from(data: &'a mut Vec<T>) -> Self {
        Self::new(data)
    }
}

impl<'a, T> From<ArrayViewMut<'a, T>> for VectorViewMut<'a, T> {
    fn from(inner: ArrayViewMut<'a, T>) -> Self {
        Self { inner }
    }
}
