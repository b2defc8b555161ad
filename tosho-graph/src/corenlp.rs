//! Records of the English annotation pipeline.

use std::fmt::{self, Display, Formatter};

use crate::error::GraphError;

/// A token of an annotated English sentence.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct EnToken {
    sentence_id: usize,
    token_id: usize,
    word: String,
    lemma: String,
    pos: String,
    ner: String,
}

impl EnToken {
    pub fn new(
        sentence_id: usize,
        token_id: usize,
        word: impl Into<String>,
        lemma: impl Into<String>,
        pos: impl Into<String>,
        ner: impl Into<String>,
    ) -> Self {
        EnToken {
            sentence_id,
            token_id,
            word: word.into(),
            lemma: lemma.into(),
            pos: pos.into(),
            ner: ner.into(),
        }
    }

    /// Get the identifier of the sentence that contains the token.
    pub fn sentence_id(&self) -> usize {
        self.sentence_id
    }

    /// Get the position of the token within its sentence.
    pub fn token_id(&self) -> usize {
        self.token_id
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn lemma(&self) -> &str {
        &self.lemma
    }

    /// Get the part-of-speech tag.
    pub fn pos(&self) -> &str {
        &self.pos
    }

    /// Get the named entity tag.
    pub fn ner(&self) -> &str {
        &self.ner
    }
}

/// A mention of a coreference cluster.
///
/// `start..end` is the half-open token span of the mention within
/// sentence `sentence_id`. `head` is the index of the syntactic head of
/// the mention.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Mention {
    sentence_id: usize,
    start: usize,
    end: usize,
    head: usize,
    text: String,
}

impl Mention {
    pub fn new(
        sentence_id: usize,
        start: usize,
        end: usize,
        head: usize,
        text: impl Into<String>,
    ) -> Self {
        Mention {
            sentence_id,
            start,
            end,
            head,
            text: text.into(),
        }
    }

    pub fn sentence_id(&self) -> usize {
        self.sentence_id
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Display for Mention {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        write!(fmt, "{}({}..{})", self.sentence_id, self.start, self.end)
    }
}

/// A coreference cluster.
///
/// The representative mention is one of the mentions of the cluster.
/// It is stored as an index into the mentions, so that a cluster
/// without a representative is an explicit state.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Coreference {
    mentions: Vec<Mention>,
    representative: Option<usize>,
}

impl Coreference {
    /// Construct a cluster.
    ///
    /// `representative` is the index of the representative mention in
    /// `mentions`. An index outside `mentions` is treated as absent.
    pub fn new(mentions: Vec<Mention>, representative: Option<usize>) -> Self {
        let representative = representative.filter(|&idx| idx < mentions.len());
        Coreference {
            mentions,
            representative,
        }
    }

    /// Get all mentions of the cluster, including the representative.
    pub fn mentions(&self) -> &[Mention] {
        &self.mentions
    }

    /// Get the representative mention.
    ///
    /// Returns `GraphError::MissingRepresentative` if no mention of the
    /// cluster was marked as representative.
    pub fn representative(&self) -> Result<&Mention, GraphError> {
        self.representative
            .map(|idx| &self.mentions[idx])
            .ok_or(GraphError::MissingRepresentative {
                mention_count: self.mentions.len(),
            })
    }

    /// Get the index of the representative in `mentions`, if any.
    pub fn representative_index(&self) -> Option<usize> {
        self.representative
    }

    /// Get the mentions other than the representative.
    pub fn referring_mentions(&self) -> impl Iterator<Item = &Mention> {
        let representative = self.representative;
        self.mentions
            .iter()
            .enumerate()
            .filter(move |&(idx, _)| Some(idx) != representative)
            .map(|(_, mention)| mention)
    }
}

impl Display for Coreference {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        match self.representative() {
            Ok(representative) => write!(
                fmt,
                "{} -> {}",
                representative,
                self.mentions.len() - 1
            ),
            Err(_) => write!(fmt, "? -> {}", self.mentions.len()),
        }
    }
}

/// A dependency relation between two tokens.
///
/// The governor and the dependent are labels of the form `word[index]`,
/// where `index` is the 1-based position of the token in its sentence.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Dependency {
    relation: String,
    governor: String,
    dependent: String,
}

impl Dependency {
    pub fn new(
        relation: impl Into<String>,
        governor: impl Into<String>,
        dependent: impl Into<String>,
    ) -> Self {
        Dependency {
            relation: relation.into(),
            governor: governor.into(),
            dependent: dependent.into(),
        }
    }

    /// Construct a dependency from the words and indices of its tokens.
    pub fn from_tokens(
        relation: impl Into<String>,
        governor: (&str, &str),
        dependent: (&str, &str),
    ) -> Self {
        Dependency::new(
            relation,
            token_label(governor.0, governor.1),
            token_label(dependent.0, dependent.1),
        )
    }

    pub fn relation(&self) -> &str {
        &self.relation
    }

    pub fn governor(&self) -> &str {
        &self.governor
    }

    pub fn dependent(&self) -> &str {
        &self.dependent
    }
}

impl Display for Dependency {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        write!(fmt, "{}({}, {})", self.relation, self.governor, self.dependent)
    }
}

fn token_label(word: &str, idx: &str) -> String {
    format!("{}[{}]", word, idx)
}
