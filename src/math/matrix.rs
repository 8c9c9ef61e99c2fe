use rand::Rng;
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::activation::sigmoid::sigmoid;
use crate::error::{NetworkError, Result};

/// A row-major 2D buffer of `f64` addressed through an explicit row stride.
///
/// Cell `(r, c)` lives at `data[r * stride + c]`. The storage parameter `S`
/// decides ownership: `Matrix` (the default, `Vec<f64>`) owns its buffer,
/// while `MatrixView` and `MatrixViewMut` borrow a window of another matrix,
/// so the parent always outlives the view and writes through a mutable view
/// land in the parent's storage.
#[derive(Debug, Clone)]
pub struct Matrix<S = Vec<f64>> {
    pub rows: usize,
    pub cols: usize,
    pub stride: usize,
    data: S,
}

/// Borrowed, read-only window into a matrix buffer.
pub type MatrixView<'a> = Matrix<&'a [f64]>;

/// Borrowed, writable window into a matrix buffer.
pub type MatrixViewMut<'a> = Matrix<&'a mut [f64]>;

/// Number of buffer elements a `rows x cols` window with `stride` touches.
fn span(rows: usize, cols: usize, stride: usize) -> usize {
    if rows == 0 || cols == 0 {
        0
    } else {
        (rows - 1) * stride + cols
    }
}

impl Matrix {
    /// Allocates a zero-filled `rows x cols` matrix with `stride == cols`.
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            stride: cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Like `zeros`, but reports an unobtainable buffer instead of aborting.
    pub fn try_zeros(rows: usize, cols: usize) -> Result<Matrix> {
        let len = rows
            .checked_mul(cols)
            .ok_or(NetworkError::Allocation { rows, cols })?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| NetworkError::Allocation { rows, cols })?;
        data.resize(len, 0.0);

        Ok(Matrix { rows, cols, stride: cols, data })
    }

    /// Wraps a densely packed row-major buffer.
    ///
    /// # Panics
    /// Panics if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Matrix {
        assert_eq!(
            data.len(),
            rows * cols,
            "buffer of {} values cannot hold a {}x{} matrix",
            data.len(),
            rows,
            cols
        );
        Matrix { rows, cols, stride: cols, data }
    }
}

impl<'a> Matrix<&'a [f64]> {
    /// Borrows `data` as a `rows x cols` matrix whose rows start `stride`
    /// values apart, e.g. one interleaved table holding inputs and targets.
    ///
    /// # Panics
    /// Panics if `stride < cols` or the buffer ends before the last row does.
    pub fn from_strided(rows: usize, cols: usize, stride: usize, data: &'a [f64]) -> MatrixView<'a> {
        assert!(stride >= cols, "stride {} is narrower than {} columns", stride, cols);
        let needed = span(rows, cols, stride);
        assert!(
            data.len() >= needed,
            "buffer of {} values is too short for a {}x{} matrix with stride {}",
            data.len(),
            rows,
            cols,
            stride
        );
        Matrix { rows, cols, stride, data: &data[..needed] }
    }
}

impl<S: AsRef<[f64]>> Matrix<S> {
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Linear index of `(row, col)` in the underlying buffer.
    ///
    /// Bounds are a caller contract: debug and test builds assert them, release
    /// builds skip the check. An out-of-range column in release can therefore
    /// silently address a neighbouring row; the buffer access itself is still
    /// bounds-checked so it never reads outside the allocation.
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> usize {
        debug_assert!(
            row < self.rows && col < self.cols,
            "cell ({}, {}) out of bounds for a {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        row * self.stride + col
    }

    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.data.as_ref()[self.cell(row, col)]
    }

    /// The `cols` values of one row as a contiguous slice.
    pub fn row_slice(&self, row: usize) -> &[f64] {
        debug_assert!(row < self.rows, "row {} out of bounds for {} rows", row, self.rows);
        if self.cols == 0 {
            return &[];
        }
        let start = row * self.stride;
        &self.data.as_ref()[start..start + self.cols]
    }

    /// Non-owning `1 x cols` view of row `row`.
    pub fn row(&self, row: usize) -> MatrixView<'_> {
        assert!(row < self.rows, "row {} out of bounds for {} rows", row, self.rows);
        Matrix {
            rows: 1,
            cols: self.cols,
            stride: self.stride,
            data: self.row_slice(row),
        }
    }

    /// Non-owning view of `count` adjacent columns starting at `start`,
    /// sharing this matrix's stride.
    pub fn columns(&self, start: usize, count: usize) -> MatrixView<'_> {
        assert!(
            start + count <= self.cols,
            "columns {}..{} out of bounds for {} columns",
            start,
            start + count,
            self.cols
        );
        let len = span(self.rows, count, self.stride);
        let data = if len == 0 { &[][..] } else { &self.data.as_ref()[start..start + len] };
        Matrix {
            rows: self.rows,
            cols: count,
            stride: self.stride,
            data,
        }
    }

    /// Copies the visible cells into a densely packed owned matrix.
    pub fn to_matrix(&self) -> Matrix {
        let mut res = Matrix::zeros(self.rows, self.cols);
        res.copy_from(self);
        res
    }

    /// Iterates over every visible cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.rows).flat_map(move |i| self.row_slice(i).iter().copied())
    }
}

impl<S: AsRef<[f64]> + AsMut<[f64]>> Matrix<S> {
    #[inline]
    pub fn at_mut(&mut self, row: usize, col: usize) -> &mut f64 {
        let idx = self.cell(row, col);
        &mut self.data.as_mut()[idx]
    }

    pub fn row_slice_mut(&mut self, row: usize) -> &mut [f64] {
        debug_assert!(row < self.rows, "row {} out of bounds for {} rows", row, self.rows);
        let cols = self.cols;
        if cols == 0 {
            return &mut [];
        }
        let start = row * self.stride;
        &mut self.data.as_mut()[start..start + cols]
    }

    /// Writable `1 x cols` view of row `row`; writes land in this matrix.
    pub fn row_mut(&mut self, row: usize) -> MatrixViewMut<'_> {
        assert!(row < self.rows, "row {} out of bounds for {} rows", row, self.rows);
        let (cols, stride) = (self.cols, self.stride);
        Matrix {
            rows: 1,
            cols,
            stride,
            data: self.row_slice_mut(row),
        }
    }

    pub fn fill(&mut self, value: f64) {
        for i in 0..self.rows {
            self.row_slice_mut(i).fill(value);
        }
    }

    /// Element-wise copy of `src` into `self`.
    pub fn copy_from<T: AsRef<[f64]>>(&mut self, src: &Matrix<T>) {
        assert_same_shape("copy", self.shape(), src.shape());

        for i in 0..self.rows {
            self.row_slice_mut(i).copy_from_slice(src.row_slice(i));
        }
    }

    /// `self[i][j] += other[i][j]` for every cell.
    pub fn add_assign_from<T: AsRef<[f64]>>(&mut self, other: &Matrix<T>) {
        assert_same_shape("sum", self.shape(), other.shape());

        for i in 0..self.rows {
            for j in 0..self.cols {
                *self.at_mut(i, j) += other.at(i, j);
            }
        }
    }

    /// Overwrites `self` with the matrix product `a * b`.
    pub fn dot_into<A, B>(&mut self, a: &Matrix<A>, b: &Matrix<B>)
    where
        A: AsRef<[f64]>,
        B: AsRef<[f64]>,
    {
        if a.cols != b.rows || self.rows != a.rows || self.cols != b.cols {
            panic!(
                "Matrices are of incorrect sizes: {}x{} = {}x{} * {}x{}",
                self.rows, self.cols, a.rows, a.cols, b.rows, b.cols
            )
        }

        for i in 0..self.rows {
            for j in 0..self.cols {
                let mut sum = 0.0;

                for k in 0..a.cols {
                    sum += a.at(i, k) * b.at(k, j);
                }

                *self.at_mut(i, j) = sum;
            }
        }
    }

    /// Fills every cell with an independent uniform sample from `[lo, hi)`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, lo: f64, hi: f64) {
        for i in 0..self.rows {
            for j in 0..self.cols {
                *self.at_mut(i, j) = rng.gen::<f64>() * (hi - lo) + lo;
            }
        }
    }

    pub fn apply_sigmoid(&mut self) {
        self.map_in_place(sigmoid);
    }

    pub fn map_in_place<F>(&mut self, functor: F)
    where
        F: Fn(f64) -> f64,
    {
        for i in 0..self.rows {
            for x in self.row_slice_mut(i) {
                *x = functor(*x);
            }
        }
    }
}

fn assert_same_shape(op: &str, dst: (usize, usize), src: (usize, usize)) {
    if dst != src {
        panic!(
            "Matrices are of incorrect sizes for {}: {}x{} vs {}x{}",
            op, dst.0, dst.1, src.0, src.1
        )
    }
}

impl<S: AsRef<[f64]>> Index<(usize, usize)> for Matrix<S> {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.data.as_ref()[self.cell(row, col)]
    }
}

impl<S: AsRef<[f64]> + AsMut<[f64]>> IndexMut<(usize, usize)> for Matrix<S> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        self.at_mut(row, col)
    }
}

/// Two matrices are equal when their shapes and visible cells match,
/// regardless of stride or ownership.
impl<S: AsRef<[f64]>, T: AsRef<[f64]>> PartialEq<Matrix<T>> for Matrix<S> {
    fn eq(&self, other: &Matrix<T>) -> bool {
        self.shape() == other.shape()
            && (0..self.rows).all(|i| self.row_slice(i) == other.row_slice(i))
    }
}

impl<S: AsRef<[f64]>> fmt::Display for Matrix<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            let row: Vec<String> = self.row_slice(i).iter().map(|x| format!("{:.6}", x)).collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}
