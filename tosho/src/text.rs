//! Plain-text sentence splitting.
//!
//! Every line of the input is a paragraph. A sentence ends with one of
//! `.`, `;`, `:`, `?` or `!` when it is followed by whitespace and a
//! capital letter, or by the end of the paragraph.

use std::collections::VecDeque;
use std::io;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Error;
use crate::line::read_line;

lazy_static! {
    static ref SENTENCE_BOUNDARY: Regex = Regex::new(r"[.;:?!](?:\s[A-Z]|$)").unwrap();
}

/// Split a paragraph into sentences.
///
/// Text after the last sentence boundary is dropped.
///
/// ```
/// use tosho::text::split_sentences;
///
/// let sentences: Vec<_> = split_sentences("Hello world. Next one here.").collect();
/// assert_eq!(sentences, vec!["Hello world.", "Next one here."]);
/// ```
pub fn split_sentences(paragraph: &str) -> impl Iterator<Item = &str> {
    let mut start = 0;

    SENTENCE_BOUNDARY
        .find_iter(paragraph)
        .filter_map(move |boundary| {
            // A sentence has at least one character before its terminator.
            if boundary.start() <= start {
                return None;
            }

            let end = boundary.start() + 1;
            let sentence = paragraph[start..end].trim_start();
            start = end;

            Some(sentence)
        })
}

/// A reader for sentences in plain text.
pub struct Reader<R> {
    read: R,
    pending: VecDeque<String>,
}

impl<R: io::BufRead> Reader<R> {
    /// Construct a new reader from an object that implements the
    /// `io::BufRead` trait.
    pub fn new(read: R) -> Reader<R> {
        Reader {
            read,
            pending: VecDeque::new(),
        }
    }

    /// Read the next sentence.
    ///
    /// Returns `None` at the end of the input.
    pub fn read_sentence(&mut self) -> Result<Option<String>, Error> {
        let mut line = String::new();

        while self.pending.is_empty() {
            if !read_line(&mut self.read, &mut line)? {
                return Ok(None);
            }

            self.pending
                .extend(split_sentences(&line).map(ToOwned::to_owned));
        }

        Ok(self.pending.pop_front())
    }
}

impl<R: io::BufRead> Iterator for Reader<R> {
    type Item = Result<String, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_sentence().transpose()
    }
}
