//! Data-parallel kernels over the flat `data()` slices.
//!
//! Same operations as [`matrix_ops`](crate::matrix_ops) and
//! [`vector_ops`](crate::vector_ops), but instead of walking the one-based
//! grid they split the row-major backing slices across the rayon pool.
//! Elementwise results are identical to the sequential kernels because every
//! element goes through the same closure exactly once. The `sum` and `dot`
//! reductions combine per-chunk partial results, so floating-point results
//! can differ from a sequential fold in the last bits.
//!
//! Inputs with at most [`MIN_PARALLEL_LENGTH`] elements run sequentially.
//! Worker count is rayon's global pool (`RAYON_NUM_THREADS`).

use std::ops::{Add, Mul, Sub};

use num_traits::Zero;
use rayon::prelude::*;

use crate::matrix_ops::{ensure_backed, ensure_same_shape};
use crate::matrix_view::{Matrix, MatrixMut};
use crate::vector_ops::ensure_same_size;
use crate::vector_view::{Vector, VectorMut};
use crate::{Result, MIN_PARALLEL_LENGTH};

fn use_parallel(op: &'static str, len: usize) -> bool {
    if len <= MIN_PARALLEL_LENGTH {
        log::trace!("{}: {} elements, running sequentially", op, len);
        return false;
    }
    log::debug!(
        "{}: {} elements across {} threads",
        op,
        len,
        rayon::current_num_threads()
    );
    true
}

fn chunk_size(len: usize) -> usize {
    let nthreads = rayon::current_num_threads().max(1);
    ((len + nthreads - 1) / nthreads).max(1)
}

fn map_slice<T, U, F>(op: &'static str, dest: &mut [U], src: &[T], f: F)
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    if use_parallel(op, dest.len()) {
        dest.par_iter_mut()
            .zip(src.par_iter())
            .for_each(|(d, s)| *d = f(s));
    } else {
        for (d, s) in dest.iter_mut().zip(src) {
            *d = f(s);
        }
    }
}

fn zip_map2_slice<A, B, U, F>(op: &'static str, dest: &mut [U], a: &[A], b: &[B], f: F)
where
    A: Sync,
    B: Sync,
    U: Send,
    F: Fn(&A, &B) -> U + Sync + Send,
{
    if use_parallel(op, dest.len()) {
        dest.par_iter_mut()
            .zip(a.par_iter().zip(b.par_iter()))
            .for_each(|(d, (x, y))| *d = f(x, y));
    } else {
        for (d, (x, y)) in dest.iter_mut().zip(a.iter().zip(b)) {
            *d = f(x, y);
        }
    }
}

fn fill_slice<T>(op: &'static str, dest: &mut [T], value: T)
where
    T: Clone + Send + Sync,
{
    if use_parallel(op, dest.len()) {
        dest.par_iter_mut().for_each(|d| *d = value.clone());
    } else {
        dest.fill(value);
    }
}

// ============================================================================
// Matrix kernels
// ============================================================================

pub fn map_into<D, S, F>(dest: &mut D, src: &S, f: F) -> Result<()>
where
    D: MatrixMut,
    S: Matrix,
    D::Elem: Send,
    S::Elem: Sync,
    F: Fn(&S::Elem) -> D::Elem + Sync + Send,
{
    ensure_same_shape(dest.shape(), src.shape())?;
    ensure_backed(&*dest)?;
    ensure_backed(src)?;
    map_slice("map_into", dest.data_mut(), src.data(), f);
    Ok(())
}

pub fn zip_map2_into<D, A, B, F>(dest: &mut D, a: &A, b: &B, f: F) -> Result<()>
where
    D: MatrixMut,
    A: Matrix,
    B: Matrix,
    D::Elem: Send,
    A::Elem: Sync,
    B::Elem: Sync,
    F: Fn(&A::Elem, &B::Elem) -> D::Elem + Sync + Send,
{
    ensure_same_shape(a.shape(), b.shape())?;
    ensure_same_shape(dest.shape(), a.shape())?;
    ensure_backed(&*dest)?;
    ensure_backed(a)?;
    ensure_backed(b)?;
    zip_map2_slice("zip_map2_into", dest.data_mut(), a.data(), b.data(), f);
    Ok(())
}

pub fn copy_into<T, D, S>(dest: &mut D, src: &S) -> Result<()>
where
    T: Clone + Send + Sync,
    D: MatrixMut<Elem = T>,
    S: Matrix<Elem = T>,
{
    map_into(dest, src, |x| x.clone())
}

pub fn fill<T, D>(dest: &mut D, value: T)
where
    T: Clone + Send + Sync,
    D: MatrixMut<Elem = T>,
{
    fill_slice("fill", dest.data_mut(), value);
}

pub fn add_into<T, D, A, B>(dest: &mut D, a: &A, b: &B) -> Result<()>
where
    T: Clone + Add<Output = T> + Send + Sync,
    D: MatrixMut<Elem = T>,
    A: Matrix<Elem = T>,
    B: Matrix<Elem = T>,
{
    zip_map2_into(dest, a, b, |x, y| x.clone() + y.clone())
}

pub fn sub_into<T, D, A, B>(dest: &mut D, a: &A, b: &B) -> Result<()>
where
    T: Clone + Sub<Output = T> + Send + Sync,
    D: MatrixMut<Elem = T>,
    A: Matrix<Elem = T>,
    B: Matrix<Elem = T>,
{
    zip_map2_into(dest, a, b, |x, y| x.clone() - y.clone())
}

pub fn hadamard_into<T, D, A, B>(dest: &mut D, a: &A, b: &B) -> Result<()>
where
    T: Clone + Mul<Output = T> + Send + Sync,
    D: MatrixMut<Elem = T>,
    A: Matrix<Elem = T>,
    B: Matrix<Elem = T>,
{
    zip_map2_into(dest, a, b, |x, y| x.clone() * y.clone())
}

pub fn mul_scalar_into<T, D, S>(dest: &mut D, src: &S, scalar: T) -> Result<()>
where
    T: Clone + Mul<Output = T> + Send + Sync,
    D: MatrixMut<Elem = T>,
    S: Matrix<Elem = T>,
{
    map_into(dest, src, |x| x.clone() * scalar.clone())
}

pub fn scalar_mul_into<T, D, S>(dest: &mut D, scalar: T, src: &S) -> Result<()>
where
    T: Clone + Mul<Output = T> + Send + Sync,
    D: MatrixMut<Elem = T>,
    S: Matrix<Elem = T>,
{
    map_into(dest, src, |x| scalar.clone() * x.clone())
}

// ============================================================================
// Vector kernels
// ============================================================================

pub fn vector_map_into<D, S, F>(dest: &mut D, src: &S, f: F) -> Result<()>
where
    D: VectorMut,
    S: Vector,
    D::Elem: Send,
    S::Elem: Sync,
    F: Fn(&S::Elem) -> D::Elem + Sync + Send,
{
    ensure_same_size(dest.size(), src.size())?;
    map_slice("vector_map_into", dest.data_mut(), src.data(), f);
    Ok(())
}

pub fn vector_zip_map2_into<D, A, B, F>(dest: &mut D, a: &A, b: &B, f: F) -> Result<()>
where
    D: VectorMut,
    A: Vector,
    B: Vector,
    D::Elem: Send,
    A::Elem: Sync,
    B::Elem: Sync,
    F: Fn(&A::Elem, &B::Elem) -> D::Elem + Sync + Send,
{
    ensure_same_size(a.size(), b.size())?;
    ensure_same_size(dest.size(), a.size())?;
    zip_map2_slice("vector_zip_map2_into", dest.data_mut(), a.data(), b.data(), f);
    Ok(())
}

pub fn vector_copy_into<T, D, S>(dest: &mut D, src: &S) -> Result<()>
where
    T: Clone + Send + Sync,
    D: VectorMut<Elem = T>,
    S: Vector<Elem = T>,
{
    vector_map_into(dest, src, |x| x.clone())
}

pub fn vector_fill<T, D>(dest: &mut D, value: T)
where
    T: Clone + Send + Sync,
    D: VectorMut<Elem = T>,
{
    fill_slice("vector_fill", dest.data_mut(), value);
}

pub fn vector_add_into<T, D, A, B>(dest: &mut D, a: &A, b: &B) -> Result<()>
where
    T: Clone + Add<Output = T> + Send + Sync,
    D: VectorMut<Elem = T>,
    A: Vector<Elem = T>,
    B: Vector<Elem = T>,
{
    vector_zip_map2_into(dest, a, b, |x, y| x.clone() + y.clone())
}

pub fn vector_sub_into<T, D, A, B>(dest: &mut D, a: &A, b: &B) -> Result<()>
where
    T: Clone + Sub<Output = T> + Send + Sync,
    D: VectorMut<Elem = T>,
    A: Vector<Elem = T>,
    B: Vector<Elem = T>,
{
    vector_zip_map2_into(dest, a, b, |x, y| x.clone() - y.clone())
}

pub fn vector_hadamard_into<T, D, A, B>(dest: &mut D, a: &A, b: &B) -> Result<()>
where
    T: Clone + Mul<Output = T> + Send + Sync,
    D: VectorMut<Elem = T>,
    A: Vector<Elem = T>,
    B: Vector<Elem = T>,
{
    vector_zip_map2_into(dest, a, b, |x, y| x.clone() * y.clone())
}

pub fn vector_mul_scalar_into<T, D, S>(dest: &mut D, src: &S, scalar: T) -> Result<()>
where
    T: Clone + Mul<Output = T> + Send + Sync,
    D: VectorMut<Elem = T>,
    S: Vector<Elem = T>,
{
    vector_map_into(dest, src, |x| x.clone() * scalar.clone())
}

pub fn vector_scalar_mul_into<T, D, S>(dest: &mut D, scalar: T, src: &S) -> Result<()>
where
    T: Clone + Mul<Output = T> + Send + Sync,
    D: VectorMut<Elem = T>,
    S: Vector<Elem = T>,
{
    vector_map_into(dest, src, |x| scalar.clone() * x.clone())
}

// ============================================================================
// Reductions
// ============================================================================

pub fn sum<T, V>(v: &V) -> T
where
    T: Clone + Zero + Add<Output = T> + Send + Sync,
    V: Vector<Elem = T>,
{
    let data = v.data();
    let fold = |chunk: &[T]| chunk.iter().fold(T::zero(), |acc, x| acc + x.clone());
    if !use_parallel("sum", data.len()) {
        return fold(data);
    }
    data.par_chunks(chunk_size(data.len()))
        .map(fold)
        .reduce(T::zero, |a, b| a + b)
}

pub fn dot<T, A, B>(a: &A, b: &B) -> Result<T>
where
    T: Clone + Zero + Add<Output = T> + Mul<Output = T> + Send + Sync,
    A: Vector<Elem = T>,
    B: Vector<Elem = T>,
{
    ensure_same_size(a.size(), b.size())?;
    let (a, b) = (a.data(), b.data());
    let fold = |(x, y): (&[T], &[T])| {
        x.iter()
            .zip(y)
            .fold(T::zero(), |acc, (p, q)| acc + p.clone() * q.clone())
    };
    if !use_parallel("dot", a.len()) {
        return Ok(fold((a, b)));
    }
    let size = chunk_size(a.len());
    Ok(a.par_chunks(size)
        .zip(b.par_chunks(size))
        .map(fold)
        .reduce(T::zero, |x, y| x + y))
}
