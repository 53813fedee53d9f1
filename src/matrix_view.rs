//! One-indexed matrix views for the linear-algebra layer.
//!
//! [`MatrixView`] and [`MatrixViewMut`] wrap a rank-2 [`NdView`] /
//! [`NdViewMut`] and address elements as `(row, column)` with both indices
//! starting at 1. The [`Matrix`] and [`MatrixMut`] traits are the contract the
//! kernels are written against: a shape, one-based element access and the flat
//! row-major `data()`.

use std::ops::{Index, IndexMut};

use crate::vector_view::{VectorView, VectorViewMut};
use crate::view::{NdView, NdViewMut, Subscript};
use crate::{Result, ViewError};

/// Read side of the kernel contract for matrices.
pub trait Matrix {
    type Elem;

    fn rows(&self) -> usize;

    fn columns(&self) -> usize;

    fn size(&self) -> usize {
        self.rows() * self.columns()
    }

    /// `[rows, columns]`, the form reported in `ShapeMismatch`.
    fn shape(&self) -> [usize; 2] {
        [self.rows(), self.columns()]
    }

    /// Element at one-based `(row, column)`. Out-of-range indices panic.
    fn elem(&self, row: usize, column: usize) -> &Self::Elem;

    /// All elements in row-major order.
    fn data(&self) -> &[Self::Elem];
}

/// Write side of the kernel contract for matrices.
pub trait MatrixMut: Matrix {
    fn elem_mut(&mut self, row: usize, column: usize) -> &mut Self::Elem;

    fn data_mut(&mut self) -> &mut [Self::Elem];
}

fn check_one_based(row: usize, column: usize, dims: &[usize; 2]) -> Result<[usize; 2]> {
    for (dim, (&index, &size)) in [row, column].iter().zip(dims).enumerate() {
        if index == 0 || index > size {
            return Err(ViewError::IndexOutOfRange { dim, index, size });
        }
    }
    Ok([row - 1, column - 1])
}

fn check_row(row: usize, rows: usize) -> Result<usize> {
    if row == 0 || row > rows {
        return Err(ViewError::IndexOutOfRange {
            dim: 0,
            index: row,
            size: rows,
        });
    }
    Ok(row - 1)
}

#[inline]
fn zero_based(row: usize, column: usize, dims: &[usize; 2]) -> [usize; 2] {
    bounds_assert!(
        row >= 1 && row <= dims[0] && column >= 1 && column <= dims[1],
        "matrix index ({}, {}) out of range for {}x{}",
        row,
        column,
        dims[0],
        dims[1]
    );
    [row.wrapping_sub(1), column.wrapping_sub(1)]
}

/// Shared one-indexed matrix view.
#[derive(Debug)]
pub struct MatrixView<'a, T> {
    view: NdView<'a, T, 2>,
}

impl<T> Default for MatrixView<'_, T> {
    fn default() -> Self {
        Self {
            view: NdView::default(),
        }
    }
}

impl<T> Clone for MatrixView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MatrixView<'_, T> {}

impl<'a, T> MatrixView<'a, T> {
    /// View `data` as a `rows x columns` row-major matrix.
    pub fn new(data: &'a [T], rows: usize, columns: usize) -> Result<Self> {
        Ok(Self {
            view: NdView::new(data, [rows, columns])?,
        })
    }

    /// # Safety
    /// Same contract as [`NdView::from_raw_parts`].
    pub unsafe fn from_raw_parts(ptr: *const T, rows: usize, columns: usize) -> Self {
        Self {
            view: NdView::from_raw_parts(ptr, [rows, columns]),
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.view.rows()
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.view.columns()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.view.size()
    }

    #[inline]
    pub fn data(&self) -> &'a [T] {
        self.view.data()
    }

    /// Checked access; indices run from 1 to `rows()` / `columns()`.
    pub fn at(&self, row: usize, column: usize) -> Result<&'a T> {
        let idx = check_one_based(row, column, self.view.dims())?;
        Ok(self.view.get(idx))
    }

    /// Row `row` (one-based) as a vector view of the same memory.
    ///
    /// # Panics
    /// Panics if `row` is `0` or greater than `rows()`.
    pub fn row(&self, row: usize) -> VectorView<'a, T> {
        VectorView::new(self.view.subscript(row.wrapping_sub(1)).data())
    }

    /// Checked form of [`row`](Self::row).
    pub fn try_row(&self, row: usize) -> Result<VectorView<'a, T>> {
        let index = check_row(row, self.view.rows())?;
        Ok(VectorView::new(self.view.try_subscript(index)?.data()))
    }

    /// The underlying zero-indexed rank-2 view.
    #[inline]
    pub fn as_nd(&self) -> NdView<'a, T, 2> {
        self.view
    }
}

impl<T> Index<(usize, usize)> for MatrixView<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, column): (usize, usize)) -> &T {
        self.view.get(zero_based(row, column, self.view.dims()))
    }
}

impl<T> Matrix for MatrixView<'_, T> {
    type Elem = T;

    #[inline]
    fn rows(&self) -> usize {
        self.view.rows()
    }

    #[inline]
    fn columns(&self) -> usize {
        self.view.columns()
    }

    #[inline]
    fn elem(&self, row: usize, column: usize) -> &T {
        &self[(row, column)]
    }

    #[inline]
    fn data(&self) -> &[T] {
        self.view.data()
    }
}

impl<'a, T> From<NdView<'a, T, 2>> for MatrixView<'a, T> {
    fn from(view: NdView<'a, T, 2>) -> Self {
        Self { view }
    }
}

/// Exclusive one-indexed matrix view.
#[derive(Debug)]
pub struct MatrixViewMut<'a, T> {
    view: NdViewMut<'a, T, 2>,
}

impl<T> Default for MatrixViewMut<'_, T> {
    fn default() -> Self {
        Self {
            view: NdViewMut::default(),
        }
    }
}

impl<'a, T> MatrixViewMut<'a, T> {
    pub fn new(data: &'a mut [T], rows: usize, columns: usize) -> Result<Self> {
        Ok(Self {
            view: NdViewMut::new(data, [rows, columns])?,
        })
    }

    /// # Safety
    /// Same contract as [`NdViewMut::from_raw_parts`].
    pub unsafe fn from_raw_parts(ptr: *mut T, rows: usize, columns: usize) -> Self {
        Self {
            view: NdViewMut::from_raw_parts(ptr, [rows, columns]),
        }
    }

    #[inline]
    pub fn reborrow(&mut self) -> MatrixViewMut<'_, T> {
        MatrixViewMut {
            view: self.view.reborrow(),
        }
    }

    #[inline]
    pub fn as_view(&self) -> MatrixView<'_, T> {
        MatrixView {
            view: self.view.as_view(),
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.view.rows()
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.view.columns()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.view.size()
    }

    #[inline]
    pub fn data(&self) -> &[T] {
        self.view.data()
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        self.view.data_mut()
    }

    pub fn at(&self, row: usize, column: usize) -> Result<&T> {
        let idx = check_one_based(row, column, self.view.dims())?;
        Ok(self.view.get(idx))
    }

    pub fn at_mut(&mut self, row: usize, column: usize) -> Result<&mut T> {
        let idx = check_one_based(row, column, self.view.dims())?;
        Ok(self.view.get_mut(idx))
    }

    /// Row `row` (one-based) as a mutable vector view of the same memory.
    ///
    /// # Panics
    /// Panics if `row` is `0` or greater than `rows()`.
    pub fn row_mut(&mut self, row: usize) -> VectorViewMut<'_, T> {
        let view = self.view.reborrow().subscript(row.wrapping_sub(1));
        VectorViewMut::new(view.into_data())
    }

    pub fn try_row_mut(&mut self, row: usize) -> Result<VectorViewMut<'_, T>> {
        let index = check_row(row, self.view.rows())?;
        let view = self.view.reborrow().try_subscript(index)?;
        Ok(VectorViewMut::new(view.into_data()))
    }

    #[inline]
    pub fn as_nd_mut(&mut self) -> NdViewMut<'_, T, 2> {
        self.view.reborrow()
    }
}

impl<T> Index<(usize, usize)> for MatrixViewMut<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, column): (usize, usize)) -> &T {
        self.view.get(zero_based(row, column, self.view.dims()))
    }
}

impl<T> IndexMut<(usize, usize)> for MatrixViewMut<'_, T> {
    #[inline]
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut T {
        let idx = zero_based(row, column, self.view.dims());
        self.view.get_mut(idx)
    }
}

impl<T> Matrix for MatrixViewMut<'_, T> {
    type Elem = T;

    #[inline]
    fn rows(&self) -> usize {
        self.view.rows()
    }

    #[inline]
    fn columns(&self) -> usize {
        self.view.columns()
    }

    #[inline]
    fn elem(&self, row: usize, column: usize) -> &T {
        &self[(row, column)]
    }

    #[inline]
    fn data(&self) -> &[T] {
        self.view.data()
    }
}

impl<T> MatrixMut for MatrixViewMut<'_, T> {
    #[inline]
    fn elem_mut(&mut self, row: usize, column: usize) -> &mut T {
        &mut self[(row, column)]
    }

    #[inline]
    fn data_mut(&mut self) -> &mut [T] {
        self.view.data_mut()
    }
}

impl<'a, T> From<NdViewMut<'a, T, 2>> for MatrixViewMut<'a, T> {
    fn from(view: NdViewMut<'a, T, 2>) -> Self {
        Self { view }
    }
}
