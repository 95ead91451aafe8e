#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("diagonal access at index {index}: the matrix stores no self-relation")]
    Diagonal { index: usize },

    #[error("pair ({i}, {j}) is out of range for a matrix of order {order}")]
    OutOfRange { i: usize, j: usize, order: usize },

    #[error("cannot combine matrices of order {left} and {right}")]
    OrderMismatch { left: usize, right: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
