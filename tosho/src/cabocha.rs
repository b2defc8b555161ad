//! CaboCha chunk dependency reader.
//!
//! CaboCha output is MeCab output where the morphemes of each chunk are
//! preceded by a chunk line of the form
//!
//! ```text
//! * <chunk id> <destination>D <head>/<function word> <score>
//! ```
//!
//! A destination of `-1` marks the root of the sentence.

use std::io;

use tracing::debug;

use tosho_graph::chunk::{Chunk, ChunkSentence};

use crate::error::{Error, ParseError};
use crate::line::{is_eos, read_line, CHUNK_MARKER};
use crate::mecab::parse_morph_line;

const ROOT_DST: isize = -1;

/// Parse a chunk line.
///
/// The returned chunk has no morphemes and no dependents yet.
pub fn parse_chunk_line(line: &str) -> Result<Chunk, ParseError> {
    let mut fields = line.split(' ').skip(1);

    let id = fields.next().ok_or_else(|| ParseError::MalformedChunkLine {
        line: line.to_owned(),
    })?;
    let dst = fields.next().ok_or_else(|| ParseError::MalformedChunkLine {
        line: line.to_owned(),
    })?;

    Ok(Chunk::new(parse_id(id)?, parse_dst(dst)?))
}

fn parse_id(field: &str) -> Result<usize, ParseError> {
    field.parse::<usize>().map_err(|_| ParseError::ParseIntField {
        value: field.to_owned(),
    })
}

fn parse_dst(field: &str) -> Result<Option<usize>, ParseError> {
    let dst = field
        .strip_suffix('D')
        .ok_or_else(|| ParseError::MissingDestinationSuffix {
            value: field.to_owned(),
        })?;

    match dst.parse::<isize>() {
        Ok(ROOT_DST) => Ok(None),
        Ok(dst) if dst >= 0 => Ok(Some(dst as usize)),
        _ => Err(ParseError::ParseIntField {
            value: dst.to_owned(),
        }),
    }
}

/// A trait for objects that can read sentences of chunks.
pub trait ReadChunks {
    /// Read the chunks of a sentence.
    ///
    /// The reverse dependency edges of the returned sentence are
    /// resolved.
    ///
    /// # Errors
    ///
    /// A call to `read_chunks` may generate an error to indicate that
    /// the operation could not be completed.
    fn read_chunks(&mut self) -> Result<Option<ChunkSentence>, Error>;

    /// Get an iterator over the sentences in this reader.
    fn sentences(self) -> ChunkSentences<Self>
    where
        Self: Sized,
    {
        ChunkSentences { reader: self }
    }
}

/// A reader for CaboCha sentences.
///
/// Like the MeCab reader, the sentence that is accumulated when the
/// input ends is always returned, so input that ends with `EOS` yields
/// a final empty sentence.
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
    type Item = Result<ChunkSentence, Error>;
    type IntoIter = ChunkSentences<Reader<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sentences()
    }
}

impl<R: io::BufRead> ReadChunks for Reader<R> {
    fn read_chunks(&mut self) -> Result<Option<ChunkSentence>, Error> {
        if self.exhausted {
            return Ok(None);
        }

        // An error abandons the rest of the input.
        let sentence = self.read_chunks_inner();
        if sentence.is_err() {
            self.exhausted = true;
        }

        sentence
    }
}

impl<R: io::BufRead> Reader<R> {
    fn read_chunks_inner(&mut self) -> Result<Option<ChunkSentence>, Error> {
        let mut line = String::new();
        let mut sentence = ChunkSentence::new();

        loop {
            if !read_line(&mut self.read, &mut line)? {
                debug!(chunks = sentence.len(), "end of input, returning last sentence");
                self.exhausted = true;
                sentence.resolve().map_err(ParseError::from)?;
                return Ok(Some(sentence));
            }

            if is_eos(&line) {
                sentence.resolve().map_err(ParseError::from)?;
                return Ok(Some(sentence));
            }

            if line.starts_with(CHUNK_MARKER) {
                sentence.push(parse_chunk_line(&line)?);
                continue;
            }

            let morph = parse_morph_line(&line)?;
            sentence
                .last_mut()
                .ok_or_else(|| ParseError::MorphOutsideChunk { line: line.clone() })?
                .push(morph);
        }
    }
}

/// An iterator over the sentences in a `ReadChunks` reader.
pub struct ChunkSentences<R>
where
    R: ReadChunks,
{
    reader: R,
}

impl<R> Iterator for ChunkSentences<R>
where
    R: ReadChunks,
{
    type Item = Result<ChunkSentence, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_chunks().transpose()
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, Cursor};

    use tosho_graph::GraphError;

    use super::{parse_chunk_line, ReadChunks, Reader};
    use crate::error::ParseError;
    use crate::tests::{read_chunk_sentences, NEKO_CHUNKS};

    static CABOCHA: &str = "testdata/neko.cabocha";

    fn string_reader(s: &str) -> Box<dyn BufRead> {
        Box::new(Cursor::new(s.as_bytes().to_owned()))
    }

    fn surfaces(chunk: &tosho_graph::chunk::Chunk) -> Vec<&str> {
        chunk.morphs().iter().map(|m| m.surface()).collect()
    }

    #[test]
    fn parse_line() {
        let chunk = parse_chunk_line("* 0 5D 0/1 -1.514009").unwrap();
        assert_eq!(chunk.id(), 0);
        assert_eq!(chunk.dst(), Some(5));
        assert!(chunk.srcs().is_empty());
        assert!(chunk.morphs().is_empty());

        assert_eq!(parse_chunk_line("* 5 -1D 0/1 0.000000").unwrap().dst(), None);
    }

    #[test]
    fn parse_line_rejects_missing_suffix() {
        assert_eq!(
            parse_chunk_line("* 0 5 0/1 -1.514009"),
            Err(ParseError::MissingDestinationSuffix {
                value: "5".to_owned()
            })
        );
    }

    #[test]
    fn parse_line_rejects_non_numeric_fields() {
        assert_eq!(
            parse_chunk_line("* a 5D 0/1 -1.514009"),
            Err(ParseError::ParseIntField {
                value: "a".to_owned()
            })
        );
        assert_eq!(
            parse_chunk_line("* 0 -2D 0/1 -1.514009"),
            Err(ParseError::ParseIntField {
                value: "-2".to_owned()
            })
        );
    }

    #[test]
    fn parse_line_rejects_truncated_line() {
        assert_eq!(
            parse_chunk_line("* 0"),
            Err(ParseError::MalformedChunkLine {
                line: "* 0".to_owned()
            })
        );
    }

    #[test]
    fn reader() {
        assert_eq!(read_chunk_sentences(CABOCHA), *NEKO_CHUNKS);
    }

    #[test]
    fn reader_resolves_dependents() {
        let data = "* 0 1D 0/1 -1.5\n\
                    吾輩\t名詞,代名詞,一般,*,*,*,吾輩,ワガハイ,ワガハイ\n\
                    は\t助詞,係助詞,*,*,*,*,は,ハ,ワ\n\
                    * 1 -1D 0/1 0.0\n\
                    見\t動詞,自立,*,*,一段,連用形,見る,ミ,ミ\n\
                    EOS\n";

        let mut reader = Reader::new(string_reader(data));
        let sentence = reader.read_chunks().unwrap().unwrap();

        assert_eq!(sentence.len(), 2);

        assert_eq!(sentence[0].dst(), Some(1));
        assert_eq!(surfaces(&sentence[0]), vec!["吾輩", "は"]);
        assert!(sentence[0].srcs().is_empty());

        assert_eq!(sentence[1].dst(), None);
        assert_eq!(surfaces(&sentence[1]), vec!["見"]);
        assert_eq!(sentence[1].srcs(), &[0]);

        // Trailing sentence after the last EOS.
        assert!(reader.read_chunks().unwrap().unwrap().is_empty());
        assert!(reader.read_chunks().unwrap().is_none());
    }

    #[test]
    fn reader_resolves_sentence_without_final_eos() {
        let data = "* 0 1D 0/1 -1.5\n\
                    吾輩\t名詞,代名詞,一般,*,*,*,吾輩,ワガハイ,ワガハイ\n\
                    * 1 -1D 0/1 0.0\n\
                    見\t動詞,自立,*,*,一段,連用形,見る,ミ,ミ";

        let sentences: Vec<_> = Reader::new(string_reader(data))
            .sentences()
            .map(Result::unwrap)
            .collect();

        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0][1].srcs(), &[0]);
    }

    #[test]
    fn chunk_count_matches_chunk_lines() {
        let data = std::fs::read_to_string(CABOCHA).unwrap();
        let chunk_lines: Vec<_> = data
            .split("EOS\n")
            .map(|sent| sent.lines().filter(|l| l.starts_with('*')).count())
            .collect();
        let chunk_counts: Vec<_> = read_chunk_sentences(CABOCHA)
            .iter()
            .map(|s| s.len())
            .collect();

        assert_eq!(chunk_lines, chunk_counts);
    }

    #[test]
    fn chunk_surfaces_reproduce_tokens() {
        let sentence = &read_chunk_sentences(CABOCHA)[2];
        let text: String = sentence.iter().map(|c| c.surface()).collect();
        assert_eq!(text, "吾輩はここで始めて人間というものを見た。");
    }

    #[test]
    fn reader_is_deterministic() {
        assert_eq!(read_chunk_sentences(CABOCHA), read_chunk_sentences(CABOCHA));
    }

    #[test]
    #[should_panic(expected = "MorphOutsideChunk")]
    fn reader_rejects_morph_before_chunk() {
        let mut reader = Reader::new(string_reader(
            "吾輩\t名詞,代名詞,一般,*,*,*,吾輩,ワガハイ,ワガハイ\nEOS\n",
        ));
        reader.read_chunks().unwrap();
    }

    #[test]
    fn reader_stops_after_error() {
        let data = "* 0 2D 0/0 0.0\n\
                    南無阿弥陀仏\n\
                    * 1 2D 0/0 0.0\n\
                    南無\t名詞,一般,*,*,*,*,南無,ナム,ナム\n\
                    * 2 -1D 0/0 0.0\n\
                    。\t記号,句点,*,*,*,*,。,。,。\n\
                    * 3 1D 0/0 0.0\n\
                    ありがたい\t形容詞,自立,*,*,形容詞・アウオ段,基本形,ありがたい,アリガタイ,アリガタイ\n\
                    EOS\n";

        let mut reader = Reader::new(string_reader(data));
        assert!(matches!(
            reader.read_chunks(),
            Err(crate::Error::Parse(ParseError::MissingTab { .. }))
        ));
        assert!(reader.read_chunks().unwrap().is_none());
        assert!(reader.read_chunks().unwrap().is_none());
    }

    #[test]
    fn sentences_end_after_error() {
        let data = "* 0 -1D 0/0 0.0\n南無阿弥陀仏\nEOS\n* 0 -1D 0/0 0.0\nEOS\n";

        let sentences: Vec<_> = Reader::new(string_reader(data)).sentences().collect();
        assert_eq!(sentences.len(), 1);
        assert!(sentences[0].is_err());
    }

    #[test]
    fn reader_rejects_out_of_bounds_destination() {
        let mut reader = Reader::new(string_reader(
            "* 0 3D 0/1 0.0\n吾輩\t名詞,代名詞,一般,*,*,*,吾輩,ワガハイ,ワガハイ\nEOS\n",
        ));

        match reader.read_chunks() {
            Err(crate::Error::Parse(err)) => assert_eq!(
                err,
                ParseError::Graph(GraphError::DestinationOutOfBounds {
                    chunk: 0,
                    dst: 3,
                    chunk_count: 1
                })
            ),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
