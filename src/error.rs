use std::{error::Error, fmt};

/// Errors returned by [`Tree`](crate::binary_tree::Tree) mutations.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    ValueNotFound,
}

impl Error for TreeError {}

impl fmt::Debug for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::ValueNotFound => write!(f, "ValueNotFound"),
        }
    }
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::ValueNotFound => write!(f, "cannot find value in the tree"),
        }
    }
}

/// Errors returned by positional list operations.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    IndexOutOfBounds { index: usize, len: usize },
    NodeNotInList,
}

impl Error for ListError {}

impl fmt::Debug for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::IndexOutOfBounds { index, len } => {
                write!(f, "IndexOutOfBounds({} >= {})", index, len)
            }
            ListError::NodeNotInList => write!(f, "NodeNotInList"),
        }
    }
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::IndexOutOfBounds { index, len } => {
                write!(f, "element {} does not exist (len {})", index, len)
            }
            ListError::NodeNotInList => write!(f, "node does not belong to the list"),
        }
    }
}

pub type TreeResult<T> = std::result::Result<T, TreeError>;
pub type ListResult<T> = std::result::Result<T, ListError>;
