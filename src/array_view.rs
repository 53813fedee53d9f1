//! Zero-indexed flat views.
//!
//! [`ArrayView`] and [`ArrayViewMut`] are the simplest leaves: a window onto a
//! contiguous run of elements. The window can be narrowed in place from either
//! end with [`shrink_front`](ArrayView::shrink_front) and
//! [`shrink_back`](ArrayView::shrink_back); the backing memory is never touched.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::slice::{Iter, IterMut};

use crate::{Result, ViewError};

fn check_index(index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(ViewError::IndexOutOfRange {
            dim: 0,
            index,
            size: len,
        });
    }
    Ok(())
}

fn assert_shrink(count: usize, len: usize) {
    assert!(
        count <= len,
        "cannot shrink a view of length {} by {}",
        len,
        count
    );
}

/// Shared zero-indexed flat view.
pub struct ArrayView<'a, T> {
    data: &'a [T],
}

impl<T> Clone for ArrayView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ArrayView<'_, T> {}

impl<T> Default for ArrayView<'_, T> {
    fn default() -> Self {
        Self { data: &[] }
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data).finish()
    }
}

impl<'a, T> ArrayView<'a, T> {
    #[inline]
    pub fn new(data: &'a [T]) -> Self {
        Self { data }
    }

    /// # Safety
    /// Unless null, `ptr` must point to `len` initialized elements valid and
    /// unmutated for `'a`. A null pointer yields an empty view.
    pub unsafe fn from_raw_parts(ptr: *const T, len: usize) -> Self {
        if ptr.is_null() || len == 0 {
            return Self::default();
        }
        Self {
            data: std::slice::from_raw_parts(ptr, len),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// First element; panics on an empty view.
    #[inline]
    pub fn front(&self) -> &'a T {
        let data = self.data;
        &data[0]
    }

    /// Last element; panics on an empty view.
    #[inline]
    pub fn back(&self) -> &'a T {
        let data = self.data;
        &data[data.len() - 1]
    }

    pub fn at(&self, index: usize) -> Result<&'a T> {
        check_index(index, self.data.len())?;
        let data = self.data;
        Ok(&data[index])
    }

    #[inline]
    pub fn iter(&self) -> Iter<'a, T> {
        self.data.iter()
    }

    /// Drop `count` elements from the start of the window.
    ///
    /// # Panics
    /// Panics if `count > len()`.
    pub fn shrink_front(&mut self, count: usize) {
        assert_shrink(count, self.data.len());
        let data = self.data;
        self.data = &data[count..];
    }

    /// Drop `count` elements from the end of the window.
    ///
    /// # Panics
    /// Panics if `count > len()`.
    pub fn shrink_back(&mut self, count: usize) {
        assert_shrink(count, self.data.len());
        let data = self.data;
        self.data = &data[..data.len() - count];
    }

    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }
}

impl<T> Index<usize> for ArrayView<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<'a, T> IntoIterator for ArrayView<'a, T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<'a, T> From<&'a [T]> for ArrayView<'a, T> {
    fn from(data: &'a [T]) -> Self {
        Self::new(data)
    }
}

impl<'a, T> From<&'a Vec<T>> for ArrayView<'a, T> {
    fn from(data: &'a Vec<T>) -> Self {
        Self::new(data)
    }
}

impl<'a, T> From<ArrayViewMut<'a, T>> for ArrayView<'a, T> {
    fn from(view: ArrayViewMut<'a, T>) -> Self {
        Self { data: view.data }
    }
}

/// Exclusive zero-indexed flat view.
pub struct ArrayViewMut<'a, T> {
    data: &'a mut [T],
}

impl<T> Default for ArrayViewMut<'_, T> {
    fn default() -> Self {
        Self { data: &mut [] }
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayViewMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

impl<'a, T> ArrayViewMut<'a, T> {
    #[inline]
    pub fn new(data: &'a mut [T]) -> Self {
        Self { data }
    }

    /// # Safety
    /// Unless null, `ptr` must point to `len` initialized elements valid for
    /// `'a` and not accessed through any other path while the view lives.
    pub unsafe fn from_raw_parts(ptr: *mut T, len: usize) -> Self {
        if ptr.is_null() || len == 0 {
            return Self::default();
        }
        Self {
            data: std::slice::from_raw_parts_mut(ptr, len),
        }
    }

    #[inline]
    pub fn reborrow(&mut self) -> ArrayViewMut<'_, T> {
        ArrayViewMut {
            data: &mut *self.data,
        }
    }

    #[inline]
    pub fn as_view(&self) -> ArrayView<'_, T> {
        ArrayView { data: &*self.data }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn front(&self) -> &T {
        &self.data[0]
    }

    #[inline]
    pub fn front_mut(&mut self) -> &mut T {
        &mut self.data[0]
    }

    #[inline]
    pub fn back(&self) -> &T {
        &self.data[self.data.len() - 1]
    }

    #[inline]
    pub fn back_mut(&mut self) -> &mut T {
        let last = self.data.len() - 1;
        &mut self.data[last]
    }

    pub fn at(&self, index: usize) -> Result<&T> {
        check_index(index, self.data.len())?;
        Ok(&self.data[index])
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        check_index(index, self.data.len())?;
        Ok(&mut self.data[index])
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        self.data.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Drop `count` elements from the start of the window.
    ///
    /// # Panics
    /// Panics if `count > len()`.
    pub fn shrink_front(&mut self, count: usize) {
        assert_shrink(count, self.data.len());
        let data = std::mem::take(&mut self.data);
        self.data = &mut data[count..];
    }

    /// Drop `count` elements from the end of the window.
    ///
    /// # Panics
    /// Panics if `count > len()`.
    pub fn shrink_back(&mut self, count: usize) {
        assert_shrink(count, self.data.len());
        let data = std::mem::take(&mut self.data);
        let keep = data.len() - count;
        self.data = &mut data[..keep];
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &*self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut *self.data
    }

    #[inline]
    pub fn into_slice(self) -> &'a mut [T] {
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
}

impl<T> Index<usize> for ArrayViewMut<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for ArrayViewMut<'_, T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

impl<'a, T> IntoIterator for ArrayViewMut<'a, T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter_mut()
    }
}

impl<'a, T> From<&'a mut [T]> for ArrayViewMut<'a, T> {
    fn from(data: &'a mut [T]) -> Self {
        Self::new(data)
    }
}

impl<'a, T> From<&'a mut Vec<T>> for ArrayViewMut<'a, T> {
    fn from(data: &'a mut Vec<T>) -> Self {
        Self::new(data)
    }
}
