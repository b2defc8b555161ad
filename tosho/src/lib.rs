//! Readers for the annotation dumps of CaboCha, MeCab and Stanford
//! CoreNLP, plus a plain-text sentence splitter.

mod error;
pub use crate::error::{Error, ParseError};

pub mod cabocha;

pub mod corenlp;

mod line;
pub use crate::line::{CHUNK_MARKER, EOS};

pub mod mecab;

pub mod text;
