//! Matrix-vector products.

use std::ops::{Add, Mul};

use num_traits::Zero;

use crate::matrix_ops::ensure_backed;
use crate::matrix_view::Matrix;
use crate::vector_ops::ensure_same_size;
use crate::vector_view::{Vector, VectorMut};
use crate::Result;

/// `dest = m * v` with `v` a column vector of `m.columns()` elements.
pub fn matvec_into<T, D, M, V>(dest: &mut D, m: &M, v: &V) -> Result<()>
where
    T: Clone + Zero + Add<Output = T> + Mul<Output = T>,
    D: VectorMut<Elem = T>,
    M: Matrix<Elem = T>,
    V: Vector<Elem = T>,
{
    ensure_same_size(v.size(), m.columns())?;
    ensure_same_size(dest.size(), m.rows())?;
    ensure_backed(m)?;
    for i in 1..=m.rows() {
        let mut acc = T::zero();
        for j in 1..=m.columns() {
            acc = acc + m.elem(i, j).clone() * v.elem(j).clone();
        }
        *dest.elem_mut(i) = acc;
    }
    Ok(())
}

/// `dest = m^T * v` with `v` a column vector of `m.rows()` elements.
pub fn matvec_transposed_into<T, D, M, V>(dest: &mut D, m: &M, v: &V) -> Result<()>
where
    T: Clone + Zero + Add<Output = T> + Mul<Output = T>,
    D: VectorMut<Elem = T>,
    M: Matrix<Elem = T>,
    V: Vector<Elem = T>,
{
    ensure_same_size(v.size(), m.rows())?;
    ensure_same_size(dest.size(), m.columns())?;
    ensure_backed(m)?;
    for j in 1..=m.columns() {
        let mut acc = T::zero();
        for i in 1..=m.rows() {
            acc = acc + m.elem(i, j).clone() * v.elem(i).clone();
        }
        *dest.elem_mut(j) = acc;
    }
    Ok(())
}

/// `dest = v * m` with `v` a row vector of `m.rows()` elements.
pub fn vecmat_into<T, D, V, M>(dest: &mut D, v: &V, m: &M) -> Result<()>
where
    T: Clone + Zero + Add<Output = T> + Mul<Output = T>,
    D: VectorMut<Elem = T>,
    V: Vector<Elem = T>,
    M: Matrix<Elem = T>,
{
    ensure_same_size(v.size(), m.rows())?;
    ensure_same_size(dest.size(), m.columns())?;
    ensure_backed(m)?;
    for j in 1..=m.columns() {
        let mut acc = T::zero();
        for i in 1..=m.rows() {
            acc = acc + v.elem(i).clone() * m.elem(i, j).clone();
        }
        *dest.elem_mut(j) = acc;
    }
    Ok(())
}
