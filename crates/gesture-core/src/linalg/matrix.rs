//! Dense row-major matrices.

use super::FeatureMask;
use crate::error::{Error, Result};
use std::ops::{Index, IndexMut};

/// Dense `rows × cols` matrix of `f64`, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

/// Result of [`Matrix::invert`].
#[derive(Debug, Clone, PartialEq)]
pub struct Inversion {
    /// The inverse, or all zeros when the matrix is singular
    pub inverse: Matrix,
    /// Determinant of the original matrix
    pub determinant: f64,
}

impl Matrix {
    /// Create a zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Create an `n × n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        m
    }

    /// Create a matrix from equal-length rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if the rows differ in length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return Err(Error::LengthMismatch {
                    left: cols,
                    right: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Element at `(r, c)`, or `None` if out of bounds.
    pub fn get(&self, r: usize, c: usize) -> Option<f64> {
        (r < self.rows && c < self.cols).then(|| self.data[r * self.cols + c])
    }

    /// Set the element at `(r, c)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `(r, c)` is outside the matrix.
    pub fn set(&mut self, r: usize, c: usize, value: f64) -> Result<()> {
        if r >= self.rows {
            return Err(Error::IndexOutOfBounds {
                index: r,
                len: self.rows,
            });
        }
        if c >= self.cols {
            return Err(Error::IndexOutOfBounds {
                index: c,
                len: self.cols,
            });
        }
        self.data[r * self.cols + c] = value;
        Ok(())
    }

    /// Row `r` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `r >= rows`.
    pub fn row(&self, r: usize) -> &[f64] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// Element-wise `self += other`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if the shapes differ.
    pub fn add_assign(&mut self, other: &Matrix) -> Result<()> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(Error::LengthMismatch {
                left: self.data.len(),
                right: other.data.len(),
            });
        }
        for (a, b) in self.data.iter_mut().zip(&other.data) {
            *a += b;
        }
        Ok(())
    }

    /// Multiply every element by `s`.
    pub fn scale(&mut self, s: f64) {
        self.data.iter_mut().for_each(|v| *v *= s);
    }

    /// Accumulate `coef · v vᵀ` into the upper triangle (`j >= i`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] unless the matrix is `len × len`.
    pub fn add_upper_outer(&mut self, coef: f64, v: &[f64]) -> Result<()> {
        if !self.is_square() || v.len() != self.rows {
            return Err(Error::LengthMismatch {
                left: self.rows,
                right: v.len(),
            });
        }
        let n = self.cols;
        for (i, &vi) in v.iter().enumerate() {
            let scaled = coef * vi;
            for (j, &vj) in v.iter().enumerate().skip(i) {
                self.data[i * n + j] += scaled * vj;
            }
        }
        Ok(())
    }

    /// Copy the upper triangle onto the lower one.
    pub fn mirror_upper(&mut self) {
        let n = self.rows.min(self.cols);
        for i in 0..n {
            for j in (i + 1)..n {
                self.data[j * self.cols + i] = self.data[i * self.cols + j];
            }
        }
    }

    /// Upper triangle (`j >= i`) in row-major order.
    pub fn upper_triangle(&self) -> Vec<f64> {
        let n = self.rows.min(self.cols);
        let mut out = Vec::with_capacity(n * (n + 1) / 2);
        for i in 0..n {
            out.extend_from_slice(&self.row(i)[i..n]);
        }
        out
    }

    /// Build an `n × n` matrix whose upper triangle is `values`; the lower
    /// triangle is zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if `values.len() != n(n+1)/2`.
    pub fn from_upper_triangle(n: usize, values: &[f64]) -> Result<Self> {
        let expected = n * (n + 1) / 2;
        if values.len() != expected {
            return Err(Error::LengthMismatch {
                left: expected,
                right: values.len(),
            });
        }
        let mut m = Self::zeros(n, n);
        let mut it = values.iter();
        for i in 0..n {
            for j in i..n {
                if let Some(&v) = it.next() {
                    m.data[i * n + j] = v;
                }
            }
        }
        Ok(m)
    }

    /// Invert by Gauss-Jordan elimination with partial pivoting.
    ///
    /// A singular matrix yields determinant 0 and an all-zero inverse.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the matrix is not square.
    pub fn invert(&self) -> Result<Inversion> {
        if !self.is_square() {
            return Err(Error::InvalidParameter(format!(
                "cannot invert a {}x{} matrix",
                self.rows, self.cols
            )));
        }
        let n = self.rows;
        // Build augmented matrix [A | I]
        let mut m: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                let mut row = self.row(i).to_vec();
                row.extend((0..n).map(|j| if i == j { 1.0 } else { 0.0 }));
                row
            })
            .collect();

        let singular = || Inversion {
            inverse: Matrix::zeros(n, n),
            determinant: 0.0,
        };
        let mut det = 1.0;
        for col in 0..n {
            // Find pivot (partial pivoting)
            let Some(pivot) = (col..n).max_by(|&i, &j| {
                m[i][col]
                    .abs()
                    .partial_cmp(&m[j][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            }) else {
                return Ok(singular());
            };
            if pivot != col {
                m.swap(col, pivot);
                det = -det;
            }

            let diag = m[col][col];
            if diag == 0.0 || !diag.is_finite() {
                return Ok(singular());
            }
            det *= diag;
            for v in &mut m[col] {
                *v /= diag;
            }
            let col_vals = m[col].clone();
            for (row, m_row) in m.iter_mut().enumerate() {
                if row == col {
                    continue;
                }
                let factor = m_row[col];
                if factor == 0.0 {
                    continue;
                }
                for (rv, &cv) in m_row.iter_mut().zip(col_vals.iter()) {
                    *rv -= cv * factor;
                }
            }
        }

        let data = m.into_iter().flat_map(|row| row.into_iter().skip(n)).collect();
        Ok(Inversion {
            inverse: Matrix {
                rows: n,
                cols: n,
                data,
            },
            determinant: det,
        })
    }

    /// Restrict a square matrix to the rows and columns selected by `mask`.
    ///
    /// Indices beyond the matrix size are ignored.
    pub fn slice(&self, mask: &FeatureMask) -> Matrix {
        let keep: Vec<usize> = mask
            .indices()
            .filter(|&i| i < self.rows && i < self.cols)
            .collect();
        let k = keep.len();
        let mut out = Matrix::zeros(k, k);
        for (oi, &i) in keep.iter().enumerate() {
            for (oj, &j) in keep.iter().enumerate() {
                out.data[oi * k + oj] = self.data[i * self.cols + j];
            }
        }
        out
    }

    /// Embed this `k × k` matrix into an `n × n` matrix at the rows and
    /// columns selected by `mask`; every other element is `fill`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] unless `mask` has `n` indices of
    /// which exactly `k` are selected.
    pub fn deslice(&self, fill: f64, n: usize, mask: &FeatureMask) -> Result<Matrix> {
        if mask.len() != n {
            return Err(Error::LengthMismatch {
                left: n,
                right: mask.len(),
            });
        }
        let keep: Vec<usize> = mask.indices().collect();
        if !self.is_square() || keep.len() != self.rows {
            return Err(Error::LengthMismatch {
                left: keep.len(),
                right: self.rows,
            });
        }
        let mut out = Matrix {
            rows: n,
            cols: n,
            data: vec![fill; n * n],
        };
        for (si, &i) in keep.iter().enumerate() {
            for (sj, &j) in keep.iter().enumerate() {
                out.data[i * n + j] = self.data[si * self.cols + sj];
            }
        }
        Ok(out)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (r, c): (usize, usize)) -> &f64 {
        assert!(r < self.rows && c < self.cols, "matrix index ({r}, {c}) out of bounds");
        &self.data[r * self.cols + c]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut f64 {
        assert!(r < self.rows && c < self.cols, "matrix index ({r}, {c}) out of bounds");
        &mut self.data[r * self.cols + c]
    }
}
