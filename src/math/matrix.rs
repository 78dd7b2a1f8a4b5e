//! Dynamically sized matrices with shape-checked arithmetic.
//!
//! The fixed-size [`Mat4`] covers the render path. `Matrix` exists for the
//! dimension-generic operations (`identity(n)`, products of arbitrary shapes,
//! column vectors for homogeneous points) where a shape error is a runtime
//! condition rather than a type error.

use std::fmt;

use super::mat4::Mat4;
use super::vec3::Vec3;
use crate::error::{Error, Result};

/// Dot product of two equally long slices.
pub fn dot(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::ShapeMismatch {
            operation: "dot",
            left: (1, a.len()),
            right: (1, b.len()),
        });
    }
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

#[derive(Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        m
    }

    /// Build from nested rows. All rows must have the same length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(Error::ShapeMismatch {
                    operation: "from_rows",
                    left: (rows.len(), cols),
                    right: (1, row.len()),
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

    /// Lift a point into a 4x1 homogeneous column `[x, y, z, w]ᵀ`.
    pub fn point_to_matrix(v: Vec3, w: f64) -> Self {
        Self {
            rows: 4,
            cols: 1,
            data: vec![v.x, v.y, v.z, w],
        }
    }

    /// Perspective-divide a 4x1 column by its last component.
    pub fn matrix_to_point(&self) -> Result<Vec3> {
        if (self.rows, self.cols) != (4, 1) {
            return Err(Error::ShapeMismatch {
                operation: "matrix_to_point",
                left: self.shape(),
                right: (4, 1),
            });
        }
        let w = self.data[3];
        if w == 0.0 {
            return Err(Error::DegenerateHomogeneous);
        }
        Ok(Vec3::new(self.data[0] / w, self.data[1] / w, self.data[2] / w))
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn column(&self, col: usize) -> Vec<f64> {
        (0..self.rows)
            .map(|row| self.data[row * self.cols + col])
            .collect()
    }

    /// `self * rhs`; the column count of `self` must equal the row count of `rhs`.
    pub fn multiply(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.cols != rhs.rows {
            return Err(Error::ShapeMismatch {
                operation: "multiply",
                left: self.shape(),
                right: rhs.shape(),
            });
        }
        let mut result = Matrix::zeros(self.rows, rhs.cols);
        for col in 0..rhs.cols {
            let column = rhs.column(col);
            for row in 0..self.rows {
                result.data[row * rhs.cols + col] = dot(self.row(row), &column)?;
            }
        }
        Ok(result)
    }

    /// Element-wise sum of two matrices of identical shape.
    pub fn add(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.shape() != rhs.shape() {
            return Err(Error::ShapeMismatch {
                operation: "add",
                left: self.shape(),
                right: rhs.shape(),
            });
        }
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().zip(&rhs.data).map(|(a, b)| a + b).collect(),
        })
    }

    /// Multiply every element by `k`, in place.
    pub fn scale_in_place(&mut self, k: f64) -> &mut Self {
        self.data.iter_mut().for_each(|v| *v *= k);
        self
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries((0..self.rows).map(|r| self.row(r)))
            .finish()
    }
}

impl From<Mat4> for Matrix {
    fn from(m: Mat4) -> Self {
        Self {
            rows: 4,
            cols: 4,
            data: m.rows().iter().flatten().copied().collect(),
        }
    }
}

impl TryFrom<&Matrix> for Mat4 {
    type Error = Error;

    fn try_from(m: &Matrix) -> Result<Mat4> {
        if m.shape() != (4, 4) {
            return Err(Error::ShapeMismatch {
                operation: "into Mat4",
                left: m.shape(),
                right: (4, 4),
            });
        }
        let mut out = Mat4::identity();
        for row in 0..4 {
            for col in 0..4 {
                out.set(row, col, m.data[row * 4 + col]);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m<const C: usize>(rows: &[[f64; C]]) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn identity_has_ones_on_diagonal_only() {
        assert_eq!(Matrix::identity(1), m(&[[1.0]]));
        assert_eq!(Matrix::identity(2), m(&[[1.0, 0.0], [0.0, 1.0]]));
        assert_eq!(
            Matrix::identity(3),
            m(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
        );
    }

    #[test]
    fn dot_of_equal_lengths() {
        assert_eq!(dot(&[1.0, 2.0, 3.0], &[1.0, 4.0, 3.0]).unwrap(), 18.0);
    }

    #[test]
    fn dot_rejects_length_mismatch() {
        assert!(matches!(
            dot(&[1.0, 2.0], &[1.0]),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn column_extraction() {
        let a = m(&[[1.0, 2.0, 3.0], [1.0, 2.0, 3.0], [1.0, 2.0, 3.0]]);
        assert_eq!(a.column(1), vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn multiply_square_matrices() {
        let a = m(&[[1.0, 2.0, 3.0], [-1.0, 7.0, 4.0], [8.0, 4.0, 2.0]]);
        let b = m(&[[4.0, 8.0, -1.0], [2.0, 9.0, 2.0], [5.0, 4.0, 0.0]]);
        let expected = m(&[
            [23.0, 38.0, 3.0],
            [30.0, 71.0, 15.0],
            [50.0, 108.0, 0.0],
        ]);
        assert_eq!(a.multiply(&b).unwrap(), expected);
    }

    #[test]
    fn identity_times_m_is_m() {
        let d = m(&[
            [1.0, 1.0, 2.0, 3.0],
            [1.0, 1.0, 2.0, 3.0],
            [11.0, -1.0, 2.0, 3.0],
            [1.0, 1.0, 2.0, 3.0],
        ]);
        assert_eq!(Matrix::identity(4).multiply(&d).unwrap(), d);
    }

    #[test]
    fn multiply_produces_rows_a_by_cols_b() {
        let column = m(&[[1.0], [2.0], [3.0]]);
        let row = m(&[[1.0, 2.0, 3.0]]);
        assert_eq!(column.multiply(&row).unwrap().shape(), (3, 3));
        assert_eq!(row.multiply(&column).unwrap(), m(&[[14.0]]));
    }

    #[test]
    fn multiply_rejects_incompatible_shapes() {
        let a = m(&[[1.0, 2.0, 3.0], [3.0, 2.0, 1.0]]);
        let err = a.multiply(&a).unwrap_err();
        assert!(matches!(
            err,
            Error::ShapeMismatch {
                operation: "multiply",
                left: (2, 3),
                right: (2, 3),
            }
        ));
    }

    #[test]
    fn add_same_shape() {
        let a = m(&[[1.0, 2.0, 3.0], [3.0, 2.0, 1.0]]);
        assert_eq!(
            a.add(&a).unwrap(),
            m(&[[2.0, 4.0, 6.0], [6.0, 4.0, 2.0]])
        );
        assert!(a.add(&Matrix::identity(2)).is_err());
    }

    #[test]
    fn scale_in_place_mutates_and_returns() {
        let mut a = Matrix::identity(2);
        a.scale_in_place(3.0).scale_in_place(2.0);
        assert_eq!(a, m(&[[6.0, 0.0], [0.0, 6.0]]));
    }

    #[test]
    fn point_round_trip_divides_by_w() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(
            Matrix::point_to_matrix(p, 1.0),
            m(&[[1.0], [2.0], [3.0], [1.0]])
        );
        let back = Matrix::point_to_matrix(p, 3.0).matrix_to_point().unwrap();
        assert_eq!(back, Vec3::new(1.0 / 3.0, 2.0 / 3.0, 1.0));
    }

    #[test]
    fn matrix_to_point_rejects_zero_w_and_bad_shape() {
        let at_infinity = Matrix::point_to_matrix(Vec3::ONE, 0.0);
        assert!(matches!(
            at_infinity.matrix_to_point(),
            Err(Error::DegenerateHomogeneous)
        ));
        assert!(matches!(
            Matrix::identity(4).matrix_to_point(),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let rows: Vec<Vec<f64>> = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(Matrix::from_rows(&rows).is_err());
    }

    #[test]
    fn mat4_conversion_round_trips() {
        let r = Mat4::rotation_z(0.3);
        let dynamic = Matrix::from(r);
        assert_eq!(Mat4::try_from(&dynamic).unwrap(), r);
        assert!(Mat4::try_from(&Matrix::identity(3)).is_err());
    }
}
