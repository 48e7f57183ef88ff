use std::collections::TryReserveError;
use std::fmt;
use std::ops::{Add, Index, IndexMut, Sub};
use std::slice::Iter;

use num_traits::Zero;

use crate::config::{Limits, MAX_SIZE};
use crate::error::{Error, Result};
use crate::math::vector::{checked_length, TVector};

/// Square upper-triangular matrix.
///
/// Row `i` is a [`TVector`] with start index `i` holding columns `i..size`,
/// so only the upper triangle is stored. Elements below the diagonal are not
/// addressable: `get(i, j)` with `j < i` is a range error.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TMatrix<T> {
    rows: Vec<TVector<T>>,
}

impl<T> TMatrix<T> {
    pub const MAX_SIZE: usize = MAX_SIZE;

    /// Dimension of the matrix.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> Iter<'_, TVector<T>> {
        self.rows.iter()
    }

    #[inline]
    fn row_offset(&self, index: isize) -> Result<usize> {
        match usize::try_from(index) {
            Ok(i) if i < self.size() => Ok(i),
            _ => Err(Error::Range {
                index,
                start: 0,
                end: self.size(),
            }),
        }
    }

    /// Row `index`, covering columns `index..size`.
    pub fn row(&self, index: isize) -> Result<&TVector<T>> {
        let offset = self.row_offset(index)?;
        Ok(&self.rows[offset])
    }

    pub fn row_mut(&mut self, index: isize) -> Result<&mut TVector<T>> {
        let offset = self.row_offset(index)?;
        Ok(&mut self.rows[offset])
    }

    /// Element at `(row, col)`; fails unless `0 <= row <= col < size`.
    pub fn get(&self, row: isize, col: isize) -> Result<&T> {
        self.row(row)?.get(col)
    }

    pub fn get_mut(&mut self, row: isize, col: isize) -> Result<&mut T> {
        self.row_mut(row)?.get_mut(col)
    }

    pub fn set(&mut self, row: isize, col: isize, value: T) -> Result<()> {
        self.row_mut(row)?.set(col, value)
    }

    /// Replace the contents of `self` with a deep copy of `source`, resizing
    /// when the dimensions differ. The copy is built before the old rows are
    /// dropped, so a panicking element clone leaves `self` untouched.
    pub fn assign(&mut self, source: &TMatrix<T>)
    where
        T: Clone,
    {
        if self.size() != source.size() {
            log::debug!(
                "Resizing matrix from {} to {} on assignment",
                self.size(),
                source.size()
            );
        }
        let rows = source.rows.clone();
        self.rows = rows;
    }

    fn zip_rows<F>(&self, rhs: &TMatrix<T>, f: F) -> Result<TMatrix<T>>
    where
        F: Fn(&TVector<T>, &TVector<T>) -> Result<TVector<T>>,
    {
        if self.size() != rhs.size() {
            return Err(Error::SizeMismatch {
                left: self.size(),
                right: rhs.size(),
            });
        }
        let rows = self
            .rows
            .iter()
            .zip(rhs.rows.iter())
            .map(|(a, b)| f(a, b))
            .collect::<Result<Vec<_>>>()?;
        Ok(TMatrix { rows })
    }
}

impl<T> TMatrix<T>
where
    T: Clone + Zero,
{
    /// Zero-filled matrix of dimension `size`.
    pub fn new(size: isize) -> Result<Self> {
        Self::with_limits(size, &Limits::default())
    }

    /// Zero-filled matrix validated against `limits`.
    ///
    /// Storage grows as `size * (size + 1) / 2`, so a dimension within the
    /// limit may still not fit in memory. Allocation failure is reported as
    /// [`Error::Length`]; on systems that overcommit memory the process can
    /// still be killed once the pages are touched.
    pub fn with_limits(size: isize, limits: &Limits) -> Result<Self> {
        let requested = size;
        let max = limits.max_size();
        let size = checked_length(size, max)?;
        log::trace!("Creating {}x{} upper-triangular matrix", size, size);
        let out_of_memory = |_: TryReserveError| Error::Length { requested, max };
        let mut rows = Vec::new();
        rows.try_reserve_exact(size).map_err(out_of_memory)?;
        for i in 0..size {
            rows.push(TVector::try_zeroed(size - i, i).map_err(out_of_memory)?);
        }
        Ok(TMatrix { rows })
    }
}

impl<T> TMatrix<T>
where
    T: Clone + Add<Output = T>,
{
    /// Elementwise sum; dimensions must match.
    ///
    /// Only the shapes are checked. Elements are combined with `T::add`, so
    /// integer overflow panics in debug builds; use `std::num::Wrapping` for
    /// wrapping arithmetic.
    pub fn checked_add(&self, rhs: &TMatrix<T>) -> Result<TMatrix<T>> {
        self.zip_rows(rhs, TVector::checked_add)
    }
}

impl<T> TMatrix<T>
where
    T: Clone + Sub<Output = T>,
{
    /// Elementwise difference; dimensions must match.
    ///
    /// Only the shapes are checked, as with [`TMatrix::checked_add`].
    pub fn checked_sub(&self, rhs: &TMatrix<T>) -> Result<TMatrix<T>> {
        self.zip_rows(rhs, TVector::checked_sub)
    }
}

/// Build from explicit upper-triangle rows: row `i` must hold `size - i` values.
impl<T> TryFrom<Vec<Vec<T>>> for TMatrix<T> {
    type Error = Error;

    fn try_from(value: Vec<Vec<T>>) -> Result<Self> {
        let size = value.len();
        if size > MAX_SIZE {
            return Err(Error::Length {
                requested: isize::try_from(size).unwrap_or(isize::MAX),
                max: MAX_SIZE,
            });
        }
        let rows = value
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                if row.len() != size - i {
                    return Err(Error::SizeMismatch {
                        left: size - i,
                        right: row.len(),
                    });
                }
                Ok(TVector::from_parts(row, i))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(TMatrix { rows })
    }
}

impl<T> Index<usize> for TMatrix<T> {
    type Output = TVector<T>;

    fn index(&self, index: usize) -> &Self::Output {
        assert!(
            index < self.size(),
            "row index {} out of range [0, {})",
            index,
            self.size()
        );
        &self.rows[index]
    }
}

impl<T> IndexMut<usize> for TMatrix<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        assert!(
            index < self.size(),
            "row index {} out of range [0, {})",
            index,
            self.size()
        );
        &mut self.rows[index]
    }
}

impl<'a, 'b, T> Add<&'b TMatrix<T>> for &'a TMatrix<T>
where
    T: Clone + Add<Output = T>,
{
    type Output = Result<TMatrix<T>>;

    fn add(self, rhs: &'b TMatrix<T>) -> Self::Output {
        self.checked_add(rhs)
    }
}

impl<'a, 'b, T> Sub<&'b TMatrix<T>> for &'a TMatrix<T>
where
    T: Clone + Sub<Output = T>,
{
    type Output = Result<TMatrix<T>>;

    fn sub(self, rhs: &'b TMatrix<T>) -> Self::Output {
        self.checked_sub(rhs)
    }
}

impl<T: fmt::Display + Zero> fmt::Display for TMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows.iter() {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
