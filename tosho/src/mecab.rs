//! MeCab morpheme reader.
//!
//! Every line holds one morpheme: the surface form, a tab, and the
//! comma-separated features of the tagger's dictionary. Sentences are
//! terminated by an `EOS` line.

use std::io;
use std::iter;

use itertools::Either;
use tracing::debug;

use tosho_graph::morph::Morph;

use crate::error::{Error, ParseError};
use crate::line::{is_eos, read_line, CHUNK_MARKER};

/// Feature column of the part-of-speech.
pub const POS_INDEX: usize = 0;

/// Feature column of the part-of-speech subdivision.
pub const POS1_INDEX: usize = 1;

/// Feature column of the dictionary base form.
pub const BASE_INDEX: usize = 6;

const MIN_FEATURES: usize = BASE_INDEX + 1;

/// Parse a morpheme line.
///
/// ```
/// use tosho::mecab::parse_morph_line;
///
/// let morph = parse_morph_line("見\t動詞,自立,*,*,一段,連用形,見る,ミ,ミ").unwrap();
/// assert_eq!(morph.base(), "見る");
/// ```
pub fn parse_morph_line(line: &str) -> Result<Morph, ParseError> {
    let (surface, features) = line.split_once('\t').ok_or_else(|| ParseError::MissingTab {
        line: line.to_owned(),
    })?;

    let features: Vec<&str> = features.split(',').collect();
    if features.len() < MIN_FEATURES {
        return Err(ParseError::MissingFeatures {
            line: line.to_owned(),
            count: features.len(),
            expected: MIN_FEATURES,
        });
    }

    Ok(Morph::new(
        surface,
        features[BASE_INDEX],
        features[POS_INDEX],
        features[POS1_INDEX],
    ))
}

/// A trait for objects that can read sentences of morphemes.
pub trait ReadMorphs {
    /// Read the morphemes of a sentence.
    ///
    /// # Errors
    ///
    /// A call to `read_morphs` may generate an error to indicate that
    /// the operation could not be completed.
    fn read_morphs(&mut self) -> Result<Option<Vec<Morph>>, Error>;

    /// Get an iterator over the sentences in this reader.
    fn sentences(self) -> MorphSentences<Self>
    where
        Self: Sized,
    {
        MorphSentences { reader: self }
    }
}

/// A reader for MeCab sentences.
///
/// Chunk lines of dependency parser output are skipped, so this reader
/// can also be used to read the morphemes of CaboCha output.
///
/// The sentence that is accumulated when the input ends is always
/// returned, even when it is empty. Consequently, input that ends with
/// `EOS` yields a final empty sentence.
///
/// After an error is returned, the reader is exhausted: every further
/// call returns `Ok(None)`.
pub struct Reader<R> {
    read: R,
    exhausted: bool,
}

impl<R: io::BufRead> Reader<R> {
    /// Construct a new reader from an object that implements the
    /// `io::BufRead` trait.
    pub fn new(read: R) -> Reader<R> {
        Reader {
            read,
            exhausted: false,
        }
    }
}

impl<R: io::BufRead> IntoIterator for Reader<R> {
    type Item = Result<Vec<Morph>, Error>;
    type IntoIter = MorphSentences<Reader<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sentences()
    }
}

impl<R: io::BufRead> ReadMorphs for Reader<R> {
    fn read_morphs(&mut self) -> Result<Option<Vec<Morph>>, Error> {
        if self.exhausted {
            return Ok(None);
        }

        // An error abandons the rest of the input.
        let morphs = self.read_morphs_inner();
        if morphs.is_err() {
            self.exhausted = true;
        }

        morphs
    }
}

impl<R: io::BufRead> Reader<R> {
    fn read_morphs_inner(&mut self) -> Result<Option<Vec<Morph>>, Error> {
        let mut line = String::new();
        let mut morphs = Vec::new();

        loop {
            if !read_line(&mut self.read, &mut line)? {
                debug!(morphs = morphs.len(), "end of input, returning last sentence");
                self.exhausted = true;
                return Ok(Some(morphs));
            }

            if line.starts_with(CHUNK_MARKER) {
                continue;
            }

            if is_eos(&line) {
                return Ok(Some(morphs));
            }

            morphs.push(parse_morph_line(&line)?);
        }
    }
}

/// An iterator over the sentences in a `ReadMorphs` reader.
pub struct MorphSentences<R>
where
    R: ReadMorphs,
{
    reader: R,
}

impl<R> Iterator for MorphSentences<R>
where
    R: ReadMorphs,
{
    type Item = Result<Vec<Morph>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_morphs().transpose()
    }
}

/// Get the morphemes of all sentences that satisfy `predicate`.
///
/// Errors of the underlying reader are passed through.
pub fn filter_morphs<R, P>(
    reader: R,
    mut predicate: P,
) -> impl Iterator<Item = Result<Morph, Error>>
where
    R: ReadMorphs,
    P: FnMut(&Morph) -> bool,
{
    reader
        .sentences()
        .flat_map(|sentence| match sentence {
            Ok(morphs) => Either::Left(morphs.into_iter().map(Ok)),
            Err(err) => Either::Right(iter::once(Err(err))),
        })
        .filter(move |morph| match morph {
            Ok(morph) => predicate(morph),
            Err(_) => true,
        })
}
