//! Row decoding from untyped query results.

use sea_orm::{QueryResult, TryGetable};

use quill_core::domain::Post;
use quill_core::error::RepoError;

/// What to do with a cell that cannot be read as the expected type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// Substitute the zero value (0 or "") and log a warning.
    #[default]
    Coerce,
    /// Fail the whole read.
    Strict,
}

/// A single cell that could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DecodeError {
    pub column: &'static str,
    pub expected: &'static str,
}

fn cell<T: TryGetable>(
    row: &QueryResult,
    column: &'static str,
    expected: &'static str,
) -> Result<T, DecodeError> {
    row.try_get::<T>("", column)
        .map_err(|_| DecodeError { column, expected })
}

impl DecodePolicy {
    fn resolve<T: Default>(self, cell: Result<T, DecodeError>) -> Result<T, RepoError> {
        match cell {
            Ok(value) => Ok(value),
            Err(DecodeError { column, expected }) => match self {
                DecodePolicy::Strict => Err(RepoError::Decode { column, expected }),
                DecodePolicy::Coerce => {
                    tracing::warn!(column, expected, "Row cell coerced to default value");
                    Ok(T::default())
                }
            },
        }
    }

    pub(crate) fn decode_post(self, row: &QueryResult) -> Result<Post, RepoError> {
        Ok(Post {
            id: self.resolve(cell::<i64>(row, "Id", "integer"))?,
            title: self.resolve(cell::<String>(row, "Title", "text"))?,
            content: self.resolve(cell::<String>(row, "Content", "text"))?,
        })
    }
}
