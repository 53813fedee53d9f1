//! Sequential vector kernels.

use std::ops::{Add, Mul, Sub};

use num_traits::{Float, Zero};

use crate::matrix_view::MatrixMut;
use crate::vector_view::{Vector, VectorMut};
use crate::{Result, ViewError};

pub(crate) fn ensure_same_size(a: usize, b: usize) -> Result<()> {
    if a != b {
        log::debug!("vector size mismatch: {} vs {}", a, b);
        return Err(ViewError::ShapeMismatch(vec![a], vec![b]));
    }
    Ok(())
}

/// `dest(i) = f(src(i))`.
pub fn map_into<D, S, F>(dest: &mut D, src: &S, f: F) -> Result<()>
where
    D: VectorMut,
    S: Vector,
    F: Fn(&S::Elem) -> D::Elem,
{
    ensure_same_size(dest.size(), src.size())?;
    for i in 1..=src.size() {
        *dest.elem_mut(i) = f(src.elem(i));
    }
    Ok(())
}

/// `dest(i) = f(a(i), b(i))`.
pub fn zip_map2_into<D, A, B, F>(dest: &mut D, a: &A, b: &B, f: F) -> Result<()>
where
    D: VectorMut,
    A: Vector,
    B: Vector,
    F: Fn(&A::Elem, &B::Elem) -> D::Elem,
{
    ensure_same_size(a.size(), b.size())?;
    ensure_same_size(dest.size(), a.size())?;
    for i in 1..=a.size() {
        *dest.elem_mut(i) = f(a.elem(i), b.elem(i));
    }
    Ok(())
}

pub fn copy_into<T, D, S>(dest: &mut D, src: &S) -> Result<()>
where
    T: Clone,
    D: VectorMut<Elem = T>,
    S: Vector<Elem = T>,
{
    map_into(dest, src, |x| x.clone())
}

pub fn fill<T, D>(dest: &mut D, value: T)
where
    T: Clone,
    D: VectorMut<Elem = T>,
{
    for i in 1..=dest.size() {
        *dest.elem_mut(i) = value.clone();
    }
}

pub fn add_into<T, D, A, B>(dest: &mut D, a: &A, b: &B) -> Result<()>
where
    T: Clone + Add<Output = T>,
    D: VectorMut<Elem = T>,
    A: Vector<Elem = T>,
    B: Vector<Elem = T>,
{
    zip_map2_into(dest, a, b, |x, y| x.clone() + y.clone())
}

pub fn sub_into<T, D, A, B>(dest: &mut D, a: &A, b: &B) -> Result<()>
where
    T: Clone + Sub<Output = T>,
    D: VectorMut<Elem = T>,
    A: Vector<Elem = T>,
    B: Vector<Elem = T>,
{
    zip_map2_into(dest, a, b, |x, y| x.clone() - y.clone())
}

pub fn hadamard_into<T, D, A, B>(dest: &mut D, a: &A, b: &B) -> Result<()>
where
    T: Clone + Mul<Output = T>,
    D: VectorMut<Elem = T>,
    A: Vector<Elem = T>,
    B: Vector<Elem = T>,
{
    zip_map2_into(dest, a, b, |x, y| x.clone() * y.clone())
}

pub fn mul_scalar_into<T, D, S>(dest: &mut D, src: &S, scalar: T) -> Result<()>
where
    T: Clone + Mul<Output = T>,
    D: VectorMut<Elem = T>,
    S: Vector<Elem = T>,
{
    map_into(dest, src, |x| x.clone() * scalar.clone())
}

pub fn scalar_mul_into<T, D, S>(dest: &mut D, scalar: T, src: &S) -> Result<()>
where
    T: Clone + Mul<Output = T>,
    D: VectorMut<Elem = T>,
    S: Vector<Elem = T>,
{
    map_into(dest, src, |x| scalar.clone() * x.clone())
}

/// Sum of all elements; zero for an empty vector.
pub fn sum<T, V>(v: &V) -> T
where
    T: Clone + Zero + Add<Output = T>,
    V: Vector<Elem = T>,
{
    (1..=v.size()).fold(T::zero(), |acc, i| acc + v.elem(i).clone())
}

/// Inner product `sum(a(i) * b(i))`.
pub fn dot<T, A, B>(a: &A, b: &B) -> Result<T>
where
    T: Clone + Zero + Add<Output = T> + Mul<Output = T>,
    A: Vector<Elem = T>,
    B: Vector<Elem = T>,
{
    ensure_same_size(a.size(), b.size())?;
    Ok((1..=a.size()).fold(T::zero(), |acc, i| {
        acc + a.elem(i).clone() * b.elem(i).clone()
    }))
}

/// Euclidean norm.
pub fn l2_norm<T, V>(v: &V) -> T
where
    T: Float,
    V: Vector<Elem = T>,
{
    (1..=v.size())
        .fold(T::zero(), |acc, i| acc + *v.elem(i) * *v.elem(i))
        .sqrt()
}

/// `(sum |v(i)|^p)^(1/p)`.
pub fn p_norm<T, V>(v: &V, p: T) -> T
where
    T: Float,
    V: Vector<Elem = T>,
{
    (1..=v.size())
        .fold(T::zero(), |acc, i| acc + v.elem(i).abs().powf(p))
        .powf(p.recip())
}

/// Cross product of two 3-element vectors.
pub fn cross_into<T, D, A, B>(dest: &mut D, a: &A, b: &B) -> Result<()>
where
    T: Clone + Sub<Output = T> + Mul<Output = T>,
    D: VectorMut<Elem = T>,
    A: Vector<Elem = T>,
    B: Vector<Elem = T>,
{
    for size in [a.size(), b.size(), dest.size()] {
        ensure_same_size(size, 3)?;
    }
    let x = |v: &A, i: usize| v.elem(i).clone();
    let y = |v: &B, i: usize| v.elem(i).clone();
    *dest.elem_mut(1) = x(a, 2) * y(b, 3) - x(a, 3) * y(b, 2);
    *dest.elem_mut(2) = x(a, 3) * y(b, 1) - x(a, 1) * y(b, 3);
    *dest.elem_mut(3) = x(a, 1) * y(b, 2) - x(a, 2) * y(b, 1);
    Ok(())
}

/// Outer product: `dest(i, j) = col(i) * row(j)`, `dest` shaped
/// `col.size() x row.size()`.
pub fn outer_into<T, D, C, R>(dest: &mut D, col: &C, row: &R) -> Result<()>
where
    T: Clone + Mul<Output = T>,
    D: MatrixMut<Elem = T>,
    C: Vector<Elem = T>,
    R: Vector<Elem = T>,
{
    crate::matrix_ops::ensure_same_shape(dest.shape(), [col.size(), row.size()])?;
    crate::matrix_ops::ensure_backed(&*dest)?;
    for i in 1..=col.size() {
        for j in 1..=row.size() {
            *dest.elem_mut(i, j) = col.elem(i).clone() * row.elem(j).clone();
        }
    }
    Ok(())
}
