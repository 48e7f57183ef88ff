/// Errors raised by the vector and matrix containers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Requested length (or start index) is negative or above the limit.
    #[error("requested length {requested} is outside [0, {max}]")]
    Length { requested: isize, max: usize },
    /// Index falls outside the valid `[start, end)` range.
    #[error("index {index} is out of range [{start}, {end})")]
    Range {
        index: isize,
        start: usize,
        end: usize,
    },
    /// Operands of a binary operation have different dimensions.
    #[error("size mismatch: {left} vs {right}")]
    SizeMismatch { left: usize, right: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
