use std::collections::TryReserveError;
use std::fmt;
use std::ops::{Add, Index, IndexMut, Mul, Sub};
use std::slice::{Iter, IterMut};

use num_traits::Zero;

use crate::config::{Limits, MAX_SIZE};
use crate::error::{Error, Result};

/// Fixed-length vector whose logical indices run over
/// `[start_index, start_index + len)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TVector<T> {
    data: Vec<T>,
    start_index: usize,
}

/// Validate a signed length against `max` before it is used as a `usize`.
pub(crate) fn checked_length(requested: isize, max: usize) -> Result<usize> {
    match usize::try_from(requested) {
        Ok(len) if len <= max => Ok(len),
        _ => Err(Error::Length { requested, max }),
    }
}

impl<T> TVector<T> {
    pub const MAX_SIZE: usize = MAX_SIZE;

    /// Wrap an owned buffer starting at logical index 0.
    pub fn from_vec(data: Vec<T>) -> Result<Self> {
        if data.len() > MAX_SIZE {
            return Err(Error::Length {
                requested: isize::try_from(data.len()).unwrap_or(isize::MAX),
                max: MAX_SIZE,
            });
        }
        Ok(Self {
            data,
            start_index: 0,
        })
    }

    pub(crate) fn from_parts(data: Vec<T>, start_index: usize) -> Self {
        Self { data, start_index }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// One past the last valid logical index.
    pub fn end_index(&self) -> usize {
        self.start_index + self.data.len()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.data.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    fn offset(&self, index: isize) -> Result<usize> {
        match usize::try_from(index) {
            Ok(i) if i >= self.start_index && i < self.end_index() => Ok(i - self.start_index),
            _ => Err(Error::Range {
                index,
                start: self.start_index,
                end: self.end_index(),
            }),
        }
    }

    /// Element at logical `index`, or a range error.
    pub fn get(&self, index: isize) -> Result<&T> {
        let offset = self.offset(index)?;
        Ok(&self.data[offset])
    }

    pub fn get_mut(&mut self, index: isize) -> Result<&mut T> {
        let offset = self.offset(index)?;
        Ok(&mut self.data[offset])
    }

    /// Store `value` at logical `index`.
    pub fn set(&mut self, index: isize, value: T) -> Result<()> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    fn check_same_shape(&self, other: &TVector<T>) -> Result<()> {
        if self.len() != other.len() || self.start_index != other.start_index {
            return Err(Error::SizeMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        Ok(())
    }

    fn zip_with<F>(&self, other: &TVector<T>, mut f: F) -> Result<TVector<T>>
    where
        F: FnMut(&T, &T) -> T,
    {
        self.check_same_shape(other)?;
        Ok(TVector::from_parts(
            self.iter().zip(other.iter()).map(|(a, b)| f(a, b)).collect(),
            self.start_index,
        ))
    }

    pub fn mapv<U, F>(&self, f: F) -> TVector<U>
    where
        F: FnMut(&T) -> U,
    {
        TVector::from_parts(self.data.iter().map(f).collect(), self.start_index)
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.clone()
    }
}

impl<T> TVector<T>
where
    T: Clone + Zero,
{
    /// Zero-filled vector of `len` elements starting at logical index 0.
    pub fn new(len: isize) -> Result<Self> {
        Self::with_limits(len, 0, &Limits::default())
    }

    pub fn with_start_index(len: isize, start_index: isize) -> Result<Self> {
        Self::with_limits(len, start_index, &Limits::default())
    }

    /// Zero-filled vector validated against `limits`. A negative start index
    /// is rejected the same way as a negative length.
    pub fn with_limits(len: isize, start_index: isize, limits: &Limits) -> Result<Self> {
        let max = limits.max_size();
        let len = checked_length(len, max)?;
        let start_index = usize::try_from(start_index).map_err(|_| Error::Length {
            requested: start_index,
            max,
        })?;
        log::trace!("Creating vector of length {} at start index {}", len, start_index);
        Self::try_zeroed(len, start_index).map_err(|_| Error::Length {
            requested: isize::try_from(len).unwrap_or(isize::MAX),
            max,
        })
    }

    /// Zero-filled buffer, failing instead of aborting when it cannot be allocated.
    pub(crate) fn try_zeroed(
        len: usize,
        start_index: usize,
    ) -> std::result::Result<Self, TryReserveError> {
        let mut data = Vec::new();
        data.try_reserve_exact(len)?;
        data.resize(len, T::zero());
        Ok(Self::from_parts(data, start_index))
    }
}

impl<T> TVector<T>
where
    T: Clone + Add<Output = T>,
{
    pub fn add_scalar(&self, value: T) -> TVector<T> {
        self.mapv(|v| v.clone() + value.clone())
    }

    /// Elementwise sum of two vectors covering the same logical range.
    ///
    /// "Checked" refers to the shapes only: elements are combined with
    /// `T::add`, so integer overflow panics in debug builds and wraps in
    /// release builds. Wrap elements in `std::num::Wrapping` to make wrapping
    /// explicit.
    pub fn checked_add(&self, other: &TVector<T>) -> Result<TVector<T>> {
        self.zip_with(other, |a, b| a.clone() + b.clone())
    }
}

impl<T> TVector<T>
where
    T: Clone + Sub<Output = T>,
{
    pub fn sub_scalar(&self, value: T) -> TVector<T> {
        self.mapv(|v| v.clone() - value.clone())
    }

    /// Elementwise difference; overflow behaves as in [`TVector::checked_add`].
    pub fn checked_sub(&self, other: &TVector<T>) -> Result<TVector<T>> {
        self.zip_with(other, |a, b| a.clone() - b.clone())
    }
}

impl<T> TVector<T>
where
    T: Clone + Mul<Output = T>,
{
    pub fn mul_scalar(&self, value: T) -> TVector<T> {
        self.mapv(|v| v.clone() * value.clone())
    }
}

impl<T> TVector<T>
where
    T: Clone + Zero + Mul<Output = T>,
{
    /// Scalar product of two vectors covering the same logical range.
    pub fn dot(&self, other: &TVector<T>) -> Result<T> {
        self.check_same_shape(other)?;
        Ok(self
            .iter()
            .zip(other.iter())
            .fold(T::zero(), |acc, (a, b)| acc + a.clone() * b.clone()))
    }
}

impl<T> TryFrom<Vec<T>> for TVector<T> {
    type Error = Error;

    fn try_from(value: Vec<T>) -> Result<Self> {
        TVector::from_vec(value)
    }
}

impl<T> From<TVector<T>> for Vec<T> {
    fn from(value: TVector<T>) -> Self {
        value.data
    }
}

impl<T> Index<usize> for TVector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        assert!(
            index >= self.start_index && index < self.end_index(),
            "index {} out of range [{}, {})",
            index,
            self.start_index,
            self.end_index()
        );
        &self.data[index - self.start_index]
    }
}

impl<T> IndexMut<usize> for TVector<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        assert!(
            index >= self.start_index && index < self.end_index(),
            "index {} out of range [{}, {})",
            index,
            self.start_index,
            self.end_index()
        );
        let start = self.start_index;
        &mut self.data[index - start]
    }
}

impl<'a, 'b, T> Add<&'b TVector<T>> for &'a TVector<T>
where
    T: Clone + Add<Output = T>,
{
    type Output = Result<TVector<T>>;

    fn add(self, rhs: &'b TVector<T>) -> Self::Output {
        self.checked_add(rhs)
    }
}

impl<'a, 'b, T> Sub<&'b TVector<T>> for &'a TVector<T>
where
    T: Clone + Sub<Output = T>,
{
    type Output = Result<TVector<T>>;

    fn sub(self, rhs: &'b TVector<T>) -> Self::Output {
        self.checked_sub(rhs)
    }
}

/// Leading positions below the start index print as zeros so that the rows
/// of a triangular matrix line up.
impl<T: fmt::Display + Zero> fmt::Display for TVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        let total = self.end_index();
        for idx in 0..total {
            if idx < self.start_index {
                write!(f, "{}", T::zero())?;
            } else {
                write!(f, "{}", self.data[idx - self.start_index])?;
            }
            if idx + 1 != total {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
    }
}
