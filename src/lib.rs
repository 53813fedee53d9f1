//! Non-owning N-dimensional, matrix and vector views over contiguous memory.
//!
//! A view is a borrowed slice plus a shape. Views never allocate, copy or free
//! their backing storage; the borrow checker keeps them from outliving it.
//!
//! # Core Types
//!
//! - [`NdView`] / [`NdViewMut`]: Row-major N-dimensional views with a compile-time rank
//! - [`DynView`] / [`DynViewMut`]: The rank-0 instantiation, where dimensions travel with
//!   each access
//! - [`Subscript`]: Fix the outermost index, yielding a rank `N - 1` view (or, at rank 1,
//!   the element itself)
//! - [`ArrayView`] / [`ArrayViewMut`]: Zero-indexed flat windows that can shrink in place
//! - [`VectorView`] / [`MatrixView`] (and `*Mut`): One-indexed linear-algebra wrappers
//!
//! # Offsets
//!
//! [`offset()`] maps a dimension sequence and an index sequence to a linear offset.
//! Ranks 1 to 4 use unrolled fast paths; every other rank goes through
//! [`offset_generic`]. Unchecked paths only assert bounds in debug builds (or with
//! the `bounds-assert` feature); [`checked_offset`] and the `at` accessors always
//! validate and return [`ViewError`].
//!
//! # Kernels
//!
//! - [`matrix_ops`]: copy, fill, map, transpose, add, sub, Hadamard, matmul, scalar multiply
//! - [`vector_ops`]: the elementwise set plus sum, dot, norms, cross and outer products
//! - [`mv_ops`]: matrix-vector products
//! - `par_ops` (feature `parallel`): rayon-backed variants over the flat `data()` slices
//! - [`math`], [`random`], [`bits`]: scalar helpers used as kernel callbacks and fillers
//!
//! # Example
//!
//! ```rust
//! use ndview::{NdView, Subscript};
//!
//! let data: Vec<u32> = (0..24).collect();
//! let view = NdView::new(&data, [2, 3, 4]).unwrap();
//!
//! assert_eq!(view[[1, 2, 3]], 23);
//! assert_eq!(view.size(), 24);
//!
//! // Zero-copy sub-view of the outermost index
//! let plane = view.subscript(1);
//! assert_eq!(plane.dims(), &[3, 4]);
//! assert_eq!(plane[[2, 3]], 23);
//!
//! // Checked access reports the offending dimension
//! assert!(view.at([0, 3, 0]).is_err());
//! ```
//!
//! # Matrix Example
//!
//! ```rust
//! use ndview::{matrix_ops, MatrixView, MatrixViewMut};
//!
//! let a_data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let b_data = vec![6.0, 5.0, 4.0, 3.0, 2.0, 1.0];
//! let mut out_data = vec![0.0; 6];
//!
//! let a = MatrixView::new(&a_data, 2, 3).unwrap();
//! let b = MatrixView::new(&b_data, 2, 3).unwrap();
//! let mut out = MatrixViewMut::new(&mut out_data, 2, 3).unwrap();
//!
//! matrix_ops::add_into(&mut out, &a, &b).unwrap();
//! assert_eq!(out_data, vec![7.0; 6]);
//! ```

#[macro_use]
mod macros;

pub mod array_view;
pub mod bits;
pub mod math;
pub mod matrix_ops;
pub mod matrix_view;
pub mod mv_ops;
pub mod offset;
#[cfg(feature = "parallel")]
pub mod par_ops;
pub mod random;
pub mod vector_ops;
pub mod vector_view;
pub mod view;

// ============================================================================
// Offset arithmetic
// ============================================================================
pub use offset::{
    checked_offset, element_count, offset, offset_1, offset_2, offset_3, offset_4,
    offset_generic, row_major_strides,
};

// ============================================================================
// View types
// ============================================================================
pub use array_view::{ArrayView, ArrayViewMut};
pub use matrix_view::{Matrix, MatrixMut, MatrixView, MatrixViewMut};
pub use vector_view::{Vector, VectorMut, VectorView, VectorViewMut};
pub use view::{DynView, DynViewMut, NdView, NdViewMut, Subscript};

// ============================================================================
// Scalar helpers
// ============================================================================
pub use math::{sigmoid, sigmoid_deriv};

// ============================================================================
// Constants
// ============================================================================

/// Element count below which the parallel kernels run sequentially.
///
/// Splitting smaller inputs across the rayon pool costs more than it saves.
pub const MIN_PARALLEL_LENGTH: usize = 1 << 15;

/// Highest rank with a [`Subscript`] implementation yielding a sub-view.
pub const MAX_SUBSCRIPT_RANK: usize = 8;

// ============================================================================
// Error types
// ============================================================================

/// Errors reported by the checked accessors, constructors and kernels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// An index is not below the size of its dimension.
    #[error("index {index} out of range for dimension {dim} of size {size}")]
    IndexOutOfRange {
        dim: usize,
        index: usize,
        size: usize,
    },

    /// A dimension number is not below the view's rank.
    #[error("invalid dimension {dim} for rank {rank}")]
    InvalidDim { dim: usize, rank: usize },

    /// Dimension and index sequences (or a sequence and a type rank) differ in length.
    #[error("rank mismatch: {0} vs {1}")]
    RankMismatch(usize, usize),

    /// Operand shapes are incompatible for the operation.
    #[error("shape mismatch: {0:?} vs {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// The backing slice is shorter than the shape requires.
    #[error("buffer too small: shape needs {needed} elements, slice has {len}")]
    BufferTooSmall { needed: usize, len: usize },

    /// The element count of a shape does not fit in `usize`.
    #[error("offset overflow while computing element count")]
    OffsetOverflow,
}

/// Result type for view operations.
pub type Result<T> = std::result::Result<T, ViewError>;
