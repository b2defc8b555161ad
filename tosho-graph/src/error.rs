use thiserror::Error;

/// Graph processing error.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum GraphError {
    #[error("chunk {chunk:?} depends on {dst:?}, which is out of bounds for a sentence with {chunk_count:?} chunks")]
    DestinationOutOfBounds {
        chunk: usize,
        dst: usize,
        chunk_count: usize,
    },

    #[error("coreference cluster with {mention_count:?} mentions has no representative mention")]
    MissingRepresentative { mention_count: usize },
}
