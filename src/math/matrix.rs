use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use std::fmt;

use crate::error::{Error, Result};

/// Dense row-major matrix of `f64` with value semantics.
///
/// Every algebraic operation allocates and returns a fresh matrix; operands
/// are never mutated. `data` always holds exactly `rows` rows of `cols`
/// elements each.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Builds a `rows x cols` matrix whose element `(i, j)` is `f(i, j)`.
    pub fn from_fn<F>(rows: usize, cols: usize, f: F) -> Matrix
    where
        F: Fn(usize, usize) -> f64,
    {
        Matrix {
            rows,
            cols,
            data: (0..rows).map(|i| (0..cols).map(|j| f(i, j)).collect()).collect(),
        }
    }

    /// Builds a matrix from nested rows. The input must be non-empty and
    /// rectangular.
    pub fn from_rows(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let cols = match data.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(Error::EmptyInput),
        };

        if let Some((row, found)) = data
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != cols)
        {
            return Err(Error::RaggedRows { row, expected: cols, found });
        }

        Ok(Matrix {
            rows: data.len(),
            cols,
            data,
        })
    }

    /// Uniform samples over `[-1, 1]` from the thread-local generator.
    pub fn random(rows: usize, cols: usize) -> Matrix {
        Matrix::random_unit(rows, cols, &mut rand::thread_rng())
    }

    /// Uniform samples over `[-1, 1]` from `rng`. The default parameter init.
    pub(crate) fn random_unit<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        res.fill_from(&Uniform::new_inclusive(-1.0, 1.0), rng);
        res
    }

    /// Every element drawn independently from `U[min, max]`.
    pub fn random_uniform<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        min: f64,
        max: f64,
        rng: &mut R,
    ) -> Result<Matrix> {
        let mut res = Matrix::zeros(rows, cols);
        res.randomize_uniform(min, max, rng)?;
        Ok(res)
    }

    /// Overwrites every element with a fresh draw from `U[min, max]`.
    /// Only used for parameter initialization.
    ///
    /// Bounds must be finite with `min <= max`, otherwise
    /// `Error::InvalidConfig` is returned and `self` is left untouched.
    pub fn randomize_uniform<R: Rng + ?Sized>(
        &mut self,
        min: f64,
        max: f64,
        rng: &mut R,
    ) -> Result<()> {
        // NaN fails the comparison; `Uniform` also rejects a span that overflows
        let valid = min <= max && (max - min).is_finite();
        if !valid {
            return Err(Error::InvalidConfig(format!(
                "uniform bounds must be finite with min <= max, got [{min}, {max}]"
            )));
        }
        self.fill_from(&Uniform::new_inclusive(min, max), rng);
        Ok(())
    }

    fn fill_from<R: Rng + ?Sized>(&mut self, dist: &Uniform<f64>, rng: &mut R) {
        for row in self.data.iter_mut() {
            for x in row.iter_mut() {
                *x = dist.sample(rng);
            }
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.check_index(row, col)?;
        Ok(self.data[row][col])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut f64> {
        self.check_index(row, col)?;
        Ok(&mut self.data[row][col])
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        *self.get_mut(row, col)? = value;
        Ok(())
    }

    pub fn row(&self, row: usize) -> Result<&[f64]> {
        self.data
            .get(row)
            .map(Vec::as_slice)
            .ok_or(Error::IndexOutOfRange {
                row,
                col: 0,
                rows: self.rows,
                cols: self.cols,
            })
    }

    /// Iterates over every element in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &f64> + '_ {
        self.data.iter().flatten()
    }

    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.data
    }

    /// Standard matrix product. Requires `self.cols == rhs.rows`.
    pub fn dot(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.cols != rhs.rows {
            return Err(self.mismatch("dot", rhs));
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i][k] * rhs.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        Ok(res)
    }

    /// Element-wise (Hadamard) product of two same-shape matrices.
    pub fn hadamard(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with("hadamard", rhs, |a, b| a * b)
    }

    pub fn add(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with("add", rhs, |a, b| a + b)
    }

    pub fn subtract(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with("subtract", rhs, |a, b| a - b)
    }

    pub fn scale(&self, scalar: f64) -> Matrix {
        self.map(|x| x * scalar)
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    /// Adds a `1 x cols` row to every row of `self`.
    ///
    /// This is the only broadcasting rule; any other shape of `row` is a
    /// mismatch.
    pub fn add_row_broadcast(&self, row: &Matrix) -> Result<Matrix> {
        if row.rows != 1 || row.cols != self.cols {
            return Err(self.mismatch("add_row_broadcast", row));
        }

        let bias = &row.data[0];
        let data = self
            .data
            .iter()
            .map(|r| r.iter().zip(bias).map(|(x, b)| x + b).collect())
            .collect();

        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    /// Column-wise sum over all rows, shape `1 x cols`.
    pub fn sum_rows(&self) -> Matrix {
        let mut res = Matrix::zeros(1, self.cols);

        for row in &self.data {
            for (acc, x) in res.data[0].iter_mut().zip(row) {
                *acc += x;
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    fn zip_with<F>(&self, op: &'static str, rhs: &Matrix, functor: F) -> Result<Matrix>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.shape() != rhs.shape() {
            return Err(self.mismatch(op, rhs));
        }

        let data = self
            .data
            .iter()
            .zip(&rhs.data)
            .map(|(row_a, row_b)| {
                row_a.iter().zip(row_b).map(|(&x, &y)| functor(x, y)).collect()
            })
            .collect();

        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    fn check_index(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::IndexOutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    fn mismatch(&self, op: &'static str, rhs: &Matrix) -> Error {
        Error::ShapeMismatch {
            op,
            left: self.shape(),
            right: rhs.shape(),
        }
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.data {
            for x in row {
                write!(f, "{:>8.4} ", x)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
