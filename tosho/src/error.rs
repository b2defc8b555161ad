use std::io;

use thiserror::Error;
use tosho_graph::GraphError;

/// Reader error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Error in file IO.
    #[error("error reading annotations")]
    IO(#[from] io::Error),

    /// Annotation parsing error.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Annotation parsing errors.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum ParseError {
    /// Error constructing the chunk graph.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A morpheme line does not separate the surface form from the features.
    #[error("morpheme line without a tab: {line:?}")]
    MissingTab { line: String },

    /// A morpheme line has too few features.
    #[error("morpheme line has {count:?} features, at least {expected:?} are required: {line:?}")]
    MissingFeatures {
        line: String,
        count: usize,
        expected: usize,
    },

    /// A chunk line lacks the chunk identifier or destination.
    #[error("malformed chunk line: {line:?}")]
    MalformedChunkLine { line: String },

    /// The destination of a chunk is not suffixed with `D`.
    #[error("chunk destination without D suffix: {value:?}")]
    MissingDestinationSuffix { value: String },

    /// An integer field could not be parsed as an integer.
    #[error("cannot parse as integer field: {value:?}")]
    ParseIntField { value: String },

    /// A morpheme occurs before the first chunk of a sentence.
    #[error("morpheme outside a chunk: {line:?}")]
    MorphOutsideChunk { line: String },

    /// The annotation document is not well-formed XML.
    #[error("cannot parse annotation document: {message}")]
    Xml { message: String },

    /// A required child element is missing.
    #[error("element {element:?} has no {child:?} child")]
    MissingElement { element: String, child: String },

    /// A required attribute is missing.
    #[error("element {element:?} has no {attribute:?} attribute")]
    MissingAttribute { element: String, attribute: String },
}
