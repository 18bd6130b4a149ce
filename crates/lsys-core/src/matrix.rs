#![forbid(unsafe_code)]

//! Dense non-negative integer matrices with checked arithmetic.
//!
//! Just enough linear algebra to project symbol counts: multiplication,
//! exponentiation by squaring, and a readable [`Display`](std::fmt::Display).
//! Arithmetic never wraps: the `checked_*` operations return `None` on
//! overflow and the `saturating_*` ones clamp entries to `u128::MAX`.

use std::fmt;

/// Row-major `u128` matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<u128>,
}

impl Matrix {
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0; rows * cols],
        }
    }

    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = 1;
        }
        m
    }

    /// Build from rows. Panics if the rows have different lengths.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<u128>>) -> Self {
        let cols = rows.first().map_or(0, Vec::len);
        assert!(
            rows.iter().all(|r| r.len() == cols),
            "matrix rows must have equal length"
        );
        Self {
            rows: rows.len(),
            cols,
            data: rows.into_iter().flatten().collect(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> u128 {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: u128) {
        self.data[row * self.cols + col] = value;
    }

    #[inline]
    #[must_use]
    pub fn row(&self, row: usize) -> &[u128] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// `self * rhs`, or `None` on overflow or mismatched shapes.
    #[must_use]
    pub fn checked_mul(&self, rhs: &Self) -> Option<Self> {
        if self.cols != rhs.rows {
            return None;
        }
        self.product(rhs, |cell, a, b| cell.checked_add(a.checked_mul(b)?))
    }

    /// `self * rhs` with every entry clamped to `u128::MAX`.
    ///
    /// Entries are non-negative, so an entry whose exact value is below
    /// `u128::MAX` is computed exactly even when other entries saturate.
    /// Panics on mismatched shapes.
    #[must_use]
    pub fn saturating_mul(&self, rhs: &Self) -> Self {
        assert_eq!(self.cols, rhs.rows, "matrix shapes do not line up");
        let out = self.product(rhs, |cell, a, b| Some(cell.saturating_add(a.saturating_mul(b))));
        out.unwrap_or_else(|| Self::zeros(self.rows, rhs.cols))
    }

    fn product(
        &self,
        rhs: &Self,
        accumulate: impl Fn(u128, u128, u128) -> Option<u128>,
    ) -> Option<Self> {
        let mut out = Self::zeros(self.rows, rhs.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.get(i, k);
                if a == 0 {
                    continue;
                }
                for j in 0..rhs.cols {
                    let b = rhs.get(k, j);
                    if b == 0 {
                        continue;
                    }
                    let cell = &mut out.data[i * rhs.cols + j];
                    *cell = accumulate(*cell, a, b)?;
                }
            }
        }
        Some(out)
    }

    /// `self^exp` by repeated squaring: O(log exp) multiplications.
    ///
    /// The accumulator starts at the identity. For every set bit of `exp`
    /// (lowest first) the accumulator is multiplied by the current base, and
    /// the base is squared only while higher bits remain, so no square beyond
    /// the last one needed is ever computed.
    #[must_use]
    pub fn checked_pow(&self, exp: u32) -> Option<Self> {
        if self.rows != self.cols {
            return None;
        }
        self.power(exp, Self::checked_mul)
    }

    /// `self^exp` with saturating products. Panics if `self` is not square.
    #[must_use]
    pub fn saturating_pow(&self, exp: u32) -> Self {
        assert_eq!(self.rows, self.cols, "only square matrices have powers");
        self.power(exp, |a, b| Some(a.saturating_mul(b)))
            .unwrap_or_else(|| Self::identity(self.rows))
    }

    fn power(&self, exp: u32, mul: impl Fn(&Self, &Self) -> Option<Self>) -> Option<Self> {
        let mut acc = Self::identity(self.rows);
        let mut base = self.clone();
        let mut e = exp;
        while e > 0 {
            if e & 1 == 1 {
                acc = mul(&acc, &base)?;
            }
            e >>= 1;
            if e > 0 {
                base = mul(&base, &base)?;
            }
        }
        Some(acc)
    }
}

impl fmt::Display for Matrix {
    /// Column-aligned, with `/ \`, `| |`, `\ /` delimiters (or `[ ]` for a
    /// single row).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows == 0 {
            return f.write_str("[]");
        }
        let widths: Vec<usize> = (0..self.cols)
            .map(|j| {
                (0..self.rows)
                    .map(|i| self.get(i, j).to_string().len())
                    .max()
                    .unwrap_or(0)
            })
            .collect();
        for i in 0..self.rows {
            let (open, close) = match i {
                _ if self.rows == 1 => ('[', ']'),
                0 => ('/', '\\'),
                _ if i + 1 == self.rows => ('\\', '/'),
                _ => ('|', '|'),
            };
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{open}")?;
            for (j, width) in widths.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{:>width$}", self.get(i, j))?;
            }
            write!(f, "{close}")?;
        }
        Ok(())
    }
}
