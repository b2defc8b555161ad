//! Records and dependency graphs reconstructed from annotation dumps.

mod error;
pub use crate::error::GraphError;

pub mod chunk;

pub mod corenlp;

mod graph_algo;
pub(crate) use crate::graph_algo::BfsWithDepth;

pub mod morph;
