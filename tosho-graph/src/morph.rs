//! Morphemes produced by the morphological tagger.

use std::fmt::{self, Display, Formatter};

/// A morpheme.
///
/// A morpheme stores the surface form as it occurred in the text, the
/// dictionary base form, and the two most coarse part-of-speech levels
/// of the tagger's tag set.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Morph {
    surface: String,
    base: String,
    pos: String,
    pos1: String,
}

impl Morph {
    /// Construct a morpheme.
    pub fn new(
        surface: impl Into<String>,
        base: impl Into<String>,
        pos: impl Into<String>,
        pos1: impl Into<String>,
    ) -> Self {
        Morph {
            surface: surface.into(),
            base: base.into(),
            pos: pos.into(),
            pos1: pos1.into(),
        }
    }

    /// Get the surface form.
    pub fn surface(&self) -> &str {
        &self.surface
    }

    /// Get the dictionary base form.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Get the part-of-speech.
    pub fn pos(&self) -> &str {
        &self.pos
    }

    /// Get the part-of-speech subdivision.
    pub fn pos1(&self) -> &str {
        &self.pos1
    }
}

impl Display for Morph {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        write!(
            fmt,
            "{}\t{}\t{}\t{}",
            self.surface, self.base, self.pos, self.pos1
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Morph;

    #[test]
    fn accessors() {
        let morph = Morph::new("見", "見る", "動詞", "自立");
        assert_eq!(morph.surface(), "見");
        assert_eq!(morph.base(), "見る");
        assert_eq!(morph.pos(), "動詞");
        assert_eq!(morph.pos1(), "自立");
    }

    #[test]
    fn display() {
        let morph = Morph::new("吾輩", "吾輩", "名詞", "代名詞");
        assert_eq!(morph.to_string(), "吾輩\t吾輩\t名詞\t代名詞");
    }
}
