//! Sequential matrix kernels.
//!
//! Kernels walk the one-based `(row, column)` grid through the
//! [`Matrix`] / [`MatrixMut`] contract. Shapes are validated up front and a
//! mismatch is reported as [`ViewError::ShapeMismatch`] before anything is
//! written; a view whose backing slice is shorter than its shape is reported
//! as [`ViewError::BufferTooSmall`].

use std::ops::{Add, Mul, Sub};

use num_traits::Zero;

use crate::matrix_view::{Matrix, MatrixMut};
use crate::{Result, ViewError};

pub(crate) fn ensure_same_shape(a: [usize; 2], b: [usize; 2]) -> Result<()> {
    if a != b {
        log::debug!("matrix shape mismatch: {:?} vs {:?}", a, b);
        return Err(ViewError::ShapeMismatch(a.to_vec(), b.to_vec()));
    }
    Ok(())
}

/// Reject a matrix whose `data()` holds fewer than `rows * columns`
/// elements (a view built from a null pointer) before anything is written.
pub(crate) fn ensure_backed<M: Matrix + ?Sized>(m: &M) -> Result<()> {
    let (needed, len) = (m.size(), m.data().len());
    if len < needed {
        log::debug!(
            "matrix {:?} backed by {} of {} elements",
            m.shape(),
            len,
            needed
        );
        return Err(ViewError::BufferTooSmall { needed, len });
    }
    Ok(())
}

/// `dest(i, j) = f(src(i, j))`.
pub fn map_into<D, S, F>(dest: &mut D, src: &S, f: F) -> Result<()>
where
    D: MatrixMut,
    S: Matrix,
    F: Fn(&S::Elem) -> D::Elem,
{
    ensure_same_shape(dest.shape(), src.shape())?;
    ensure_backed(&*dest)?;
    ensure_backed(src)?;
    for i in 1..=src.rows() {
        for j in 1..=src.columns() {
            *dest.elem_mut(i, j) = f(src.elem(i, j));
        }
    }
    Ok(())
}

/// `dest(i, j) = f(a(i, j), b(i, j))`.
pub fn zip_map2_into<D, A, B, F>(dest: &mut D, a: &A, b: &B, f: F) -> Result<()>
where
    D: MatrixMut,
    A: Matrix,
    B: Matrix,
    F: Fn(&A::Elem, &B::Elem) -> D::Elem,
{
    ensure_same_shape(a.shape(), b.shape())?;
    ensure_same_shape(dest.shape(), a.shape())?;
    ensure_backed(&*dest)?;
    ensure_backed(a)?;
    ensure_backed(b)?;
    for i in 1..=a.rows() {
        for j in 1..=a.columns() {
            *dest.elem_mut(i, j) = f(a.elem(i, j), b.elem(i, j));
        }
    }
    Ok(())
}

pub fn copy_into<T, D, S>(dest: &mut D, src: &S) -> Result<()>
where
    T: Clone,
    D: MatrixMut<Elem = T>,
    S: Matrix<Elem = T>,
{
    map_into(dest, src, |x| x.clone())
}

/// Set every element of `dest` to `value`.
///
/// Writes through `data_mut()`, so a view with no backing elements is left
/// untouched.
pub fn fill<T, D>(dest: &mut D, value: T)
where
    T: Clone,
    D: MatrixMut<Elem = T>,
{
    dest.data_mut().fill(value);
}

/// `dest(j, i) = src(i, j)`; `dest` must be `columns x rows` of `src`.
///
/// `dest` and `src` cannot alias, so this is never an in-place transpose.
pub fn transpose_into<T, D, S>(dest: &mut D, src: &S) -> Result<()>
where
    T: Clone,
    D: MatrixMut<Elem = T>,
    S: Matrix<Elem = T>,
{
    ensure_same_shape(dest.shape(), [src.columns(), src.rows()])?;
    ensure_backed(&*dest)?;
    ensure_backed(src)?;
    for i in 1..=src.rows() {
        for j in 1..=src.columns() {
            *dest.elem_mut(j, i) = src.elem(i, j).clone();
        }
    }
    Ok(())
}

pub fn add_into<T, D, A, B>(dest: &mut D, a: &A, b: &B) -> Result<()>
where
    T: Clone + Add<Output = T>,
    D: MatrixMut<Elem = T>,
    A: Matrix<Elem = T>,
    B: Matrix<Elem = T>,
{
    zip_map2_into(dest, a, b, |x, y| x.clone() + y.clone())
}

pub fn sub_into<T, D, A, B>(dest: &mut D, a: &A, b: &B) -> Result<()>
where
    T: Clone + Sub<Output = T>,
    D: MatrixMut<Elem = T>,
    A: Matrix<Elem = T>,
    B: Matrix<Elem = T>,
{
    zip_map2_into(dest, a, b, |x, y| x.clone() - y.clone())
}

/// Elementwise (Hadamard) product.
pub fn hadamard_into<T, D, A, B>(dest: &mut D, a: &A, b: &B) -> Result<()>
where
    T: Clone + Mul<Output = T>,
    D: MatrixMut<Elem = T>,
    A: Matrix<Elem = T>,
    B: Matrix<Elem = T>,
{
    zip_map2_into(dest, a, b, |x, y| x.clone() * y.clone())
}

/// Matrix product `dest = a * b`.
///
/// Requires `a.columns() == b.rows()` and `dest` shaped `a.rows() x b.columns()`.
pub fn matmul_into<T, D, A, B>(dest: &mut D, a: &A, b: &B) -> Result<()>
where
    T: Clone + Zero + Add<Output = T> + Mul<Output = T>,
    D: MatrixMut<Elem = T>,
    A: Matrix<Elem = T>,
    B: Matrix<Elem = T>,
{
    if a.columns() != b.rows() {
        log::debug!(
            "matmul inner dimension mismatch: {:?} x {:?}",
            a.shape(),
            b.shape()
        );
        return Err(ViewError::ShapeMismatch(a.shape().to_vec(), b.shape().to_vec()));
    }
    ensure_same_shape(dest.shape(), [a.rows(), b.columns()])?;
    ensure_backed(&*dest)?;
    ensure_backed(a)?;
    ensure_backed(b)?;
    for i in 1..=a.rows() {
        for j in 1..=b.columns() {
            let mut acc = T::zero();
            for k in 1..=a.columns() {
                acc = acc + a.elem(i, k).clone() * b.elem(k, j).clone();
            }
            *dest.elem_mut(i, j) = acc;
        }
    }
    Ok(())
}

/// `dest = src * scalar`.
pub fn mul_scalar_into<T, D, S>(dest: &mut D, src: &S, scalar: T) -> Result<()>
where
    T: Clone + Mul<Output = T>,
    D: MatrixMut<Elem = T>,
    S: Matrix<Elem = T>,
{
    map_into(dest, src, |x| x.clone() * scalar.clone())
}

/// `dest = scalar * src`.
pub fn scalar_mul_into<T, D, S>(dest: &mut D, scalar: T, src: &S) -> Result<()>
where
    T: Clone + Mul<Output = T>,
    D: MatrixMut<Elem = T>,
    S: Matrix<Elem = T>,
{
    map_into(dest, src, |x| scalar.clone() * x.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::sigmoid;
    use crate::matrix_view::{MatrixView, MatrixViewMut};
    use approx::assert_relative_eq;
    use num_complex::Complex64;

    #[test]
    fn test_copy_and_fill() {
        let src_data = vec![1.0, 2.0, 3.0, 4.0];
        let mut dst_data = vec![0.0; 4];
        let src = MatrixView::new(&src_data, 2, 2).unwrap();
        let mut dst = MatrixViewMut::new(&mut dst_data, 2, 2).unwrap();
        copy_into(&mut dst, &src).unwrap();
        assert_eq!(dst.data(), src.data());
        fill(&mut dst, 7.5);
        assert!(dst.data().iter().all(|&x| x == 7.5));
    }

    #[test]
    fn test_map_sigmoid() {
        let src_data = vec![0.0, 1.0, -1.0, 2.0];
        let mut dst_data = vec![0.0; 4];
        let src = MatrixView::new(&src_data, 2, 2).unwrap();
        let mut dst = MatrixViewMut::new(&mut dst_data, 2, 2).unwrap();
        map_into(&mut dst, &src, |&x| sigmoid(x)).unwrap();
        assert_relative_eq!(dst[(1, 1)], 0.5);
        assert_relative_eq!(dst[(2, 2)], 2.0f64.exp() / (2.0f64.exp() + 1.0));
    }

    #[test]
    fn test_transpose() {
        let src_data: Vec<i32> = (1..=6).collect();
        let mut dst_data = vec![0; 6];
        let src = MatrixView::new(&src_data, 2, 3).unwrap();
        let mut dst = MatrixViewMut::new(&mut dst_data, 3, 2).unwrap();
        transpose_into(&mut dst, &src).unwrap();
        assert_eq!(dst_data, vec![1, 4, 2, 5, 3, 6]);
    }

    #[test]
    fn test_transpose_shape_mismatch() {
        let src_data = vec![0; 6];
        let mut dst_data = vec![0; 6];
        let src = MatrixView::new(&src_data, 2, 3).unwrap();
        let mut dst = MatrixViewMut::new(&mut dst_data, 2, 3).unwrap();
        let err = transpose_into(&mut dst, &src).unwrap_err();
        assert_eq!(err, ViewError::ShapeMismatch(vec![2, 3], vec![3, 2]));
    }

    #[test]
    fn test_add_sub_hadamard() {
        let a_data = vec![1, 2, 3, 4];
        let b_data = vec![5, 6, 7, 8];
        let mut out = vec![0; 4];
        let a = MatrixView::new(&a_data, 2, 2).unwrap();
        let b = MatrixView::new(&b_data, 2, 2).unwrap();
        {
            let mut d = MatrixViewMut::new(&mut out, 2, 2).unwrap();
            add_into(&mut d, &a, &b).unwrap();
        }
        assert_eq!(out, vec![6, 8, 10, 12]);
        {
            let mut d = MatrixViewMut::new(&mut out, 2, 2).unwrap();
            sub_into(&mut d, &a, &b).unwrap();
        }
        assert_eq!(out, vec![-4, -4, -4, -4]);
        {
            let mut d = MatrixViewMut::new(&mut out, 2, 2).unwrap();
            hadamard_into(&mut d, &a, &b).unwrap();
        }
        assert_eq!(out, vec![5, 12, 21, 32]);
    }

    #[test]
    fn test_binary_shape_mismatch_writes_nothing() {
        let a_data = vec![1.0; 6];
        let b_data = vec![1.0; 6];
        let mut out = vec![-1.0; 6];
        let a = MatrixView::new(&a_data, 2, 3).unwrap();
        let b = MatrixView::new(&b_data, 3, 2).unwrap();
        let mut d = MatrixViewMut::new(&mut out, 2, 3).unwrap();
        assert!(matches!(
            add_into(&mut d, &a, &b),
            Err(ViewError::ShapeMismatch(_, _))
        ));
        assert!(d.data().iter().all(|&x| x == -1.0));
    }

    #[test]
    fn test_unbacked_view_is_rejected() {
        let src_data = vec![1.0; 6];
        let src = MatrixView::new(&src_data, 2, 3).unwrap();
        let mut null = unsafe { MatrixViewMut::from_raw_parts(std::ptr::null_mut(), 2, 3) };
        assert_eq!(
            copy_into(&mut null, &src).unwrap_err(),
            ViewError::BufferTooSmall { needed: 6, len: 0 }
        );
        let null_src: MatrixView<'_, f64> =
            unsafe { MatrixView::from_raw_parts(std::ptr::null(), 3, 2) };
        let mut out = vec![0.0; 6];
        assert!(matches!(
            transpose_into(&mut MatrixViewMut::new(&mut out, 2, 3).unwrap(), &null_src),
            Err(ViewError::BufferTooSmall { .. })
        ));
        fill(&mut null, 1.0);
        assert!(null.data().is_empty());
    }

    #[test]
    fn test_matmul() {
        // [1 2 3]   [7  8 ]   [ 58  64]
        // [4 5 6] x [9  10] = [139 154]
        //           [11 12]
        let a_data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b_data = vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0];
        let mut out = vec![0.0; 4];
        let a = MatrixView::new(&a_data, 2, 3).unwrap();
        let b = MatrixView::new(&b_data, 3, 2).unwrap();
        let mut d = MatrixViewMut::new(&mut out, 2, 2).unwrap();
        matmul_into(&mut d, &a, &b).unwrap();
        assert_eq!(out, vec![58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    fn test_matmul_inner_mismatch() {
        let a_data = vec![0.0; 6];
        let mut out = vec![0.0; 4];
        let a = MatrixView::new(&a_data, 2, 3).unwrap();
        let mut d = MatrixViewMut::new(&mut out, 2, 2).unwrap();
        assert_eq!(
            matmul_into(&mut d, &a, &a).unwrap_err(),
            ViewError::ShapeMismatch(vec![2, 3], vec![2, 3])
        );
    }

    #[test]
    fn test_matmul_complex() {
        let i = Complex64::new(0.0, 1.0);
        let one = Complex64::new(1.0, 0.0);
        let a_data = vec![one, i, i, one];
        let mut out = vec![Complex64::new(0.0, 0.0); 4];
        let a = MatrixView::new(&a_data, 2, 2).unwrap();
        let mut d = MatrixViewMut::new(&mut out, 2, 2).unwrap();
        matmul_into(&mut d, &a, &a).unwrap();
        // [1 i; i 1]^2 = [0 2i; 2i 0]
        assert_eq!(out[0], Complex64::new(0.0, 0.0));
        assert_eq!(out[1], Complex64::new(0.0, 2.0));
        assert_eq!(out[2], Complex64::new(0.0, 2.0));
        assert_eq!(out[3], Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_scalar_multiply_both_sides() {
        let src_data = vec![1.0, -2.0, 3.0, 0.5];
        let mut left = vec![0.0; 4];
        let mut right = vec![0.0; 4];
        let src = MatrixView::new(&src_data, 2, 2).unwrap();
        mul_scalar_into(&mut MatrixViewMut::new(&mut left, 2, 2).unwrap(), &src, 3.0).unwrap();
        scalar_mul_into(&mut MatrixViewMut::new(&mut right, 2, 2).unwrap(), 3.0, &src).unwrap();
        assert_eq!(left, vec![3.0, -6.0, 9.0, 1.5]);
        assert_eq!(left, right);
    }
}
