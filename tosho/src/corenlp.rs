//! Stanford CoreNLP XML readers.
//!
//! CoreNLP writes one XML document per input text. The readers in this
//! module borrow a parsed `Document` and lazily return the tokens,
//! coreference clusters, dependency graphs and constituency parses that
//! it contains, in document order.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use roxmltree::Node;
use tracing::debug;

use tosho_graph::corenlp::{Coreference, Dependency, EnToken, Mention};

use crate::error::ParseError;

const DOCUMENT: &str = "document";

/// Dependency graph variant.
///
/// CoreNLP stores every variant that was requested in a `dependencies`
/// element with a `type` attribute of the form `<variant>-dependencies`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum DependencyType {
    Basic,
    Collapsed,
    CollapsedCcProcessed,
    Enhanced,
    EnhancedPlusPlus,

    /// A variant that is not known to this crate.
    Other(String),
}

impl DependencyType {
    /// Get the `type` attribute value of the variant's `dependencies` element.
    pub fn attribute_value(&self) -> String {
        format!("{}-dependencies", self)
    }
}

impl Default for DependencyType {
    fn default() -> Self {
        DependencyType::Collapsed
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            DependencyType::Basic => "basic",
            DependencyType::Collapsed => "collapsed",
            DependencyType::CollapsedCcProcessed => "collapsed-ccprocessed",
            DependencyType::Enhanced => "enhanced",
            DependencyType::EnhancedPlusPlus => "enhanced-plus-plus",
            DependencyType::Other(name) => name,
        };

        f.write_str(name)
    }
}

impl FromStr for DependencyType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "basic" => DependencyType::Basic,
            "collapsed" => DependencyType::Collapsed,
            "collapsed-ccprocessed" => DependencyType::CollapsedCcProcessed,
            "enhanced" => DependencyType::Enhanced,
            "enhanced-plus-plus" => DependencyType::EnhancedPlusPlus,
            other => DependencyType::Other(other.to_owned()),
        })
    }
}

/// A parsed CoreNLP document.
///
/// The `document` element may either be the root element or a child of
/// the root element, as in the output of the CoreNLP pipeline.
pub struct Document<'input> {
    tree: roxmltree::Document<'input>,
}

impl<'input> Document<'input> {
    /// Parse a CoreNLP XML document.
    pub fn parse(text: &'input str) -> Result<Self, ParseError> {
        let tree = roxmltree::Document::parse(text).map_err(|err| ParseError::Xml {
            message: err.to_string(),
        })?;

        Ok(Document { tree })
    }

    /// Get the tokens of all sentences.
    pub fn tokens(&self) -> impl Iterator<Item = Result<EnToken, ParseError>> + '_ {
        self.sentences().flat_map(|sentence| {
            sentence
                .descendants()
                .filter(|node| node.has_tag_name("token"))
                .map(move |token| read_token(sentence, token))
        })
    }

    /// Get the coreference clusters.
    pub fn coreferences(&self) -> impl Iterator<Item = Result<Coreference, ParseError>> + '_ {
        self.document()
            .and_then(|document| child_element(document, "coreference"))
            .into_iter()
            .flat_map(|clusters| {
                clusters
                    .children()
                    .filter(|node| node.has_tag_name("coreference"))
            })
            .map(read_coreference)
    }

    /// Get the dependencies of every sentence.
    ///
    /// Returns a pair of the sentence identifier and its dependencies of
    /// the given type. A sentence without dependencies of that type has
    /// an empty dependency list.
    pub fn dependencies(
        &self,
        dependency_type: &DependencyType,
    ) -> impl Iterator<Item = Result<(String, Vec<Dependency>), ParseError>> + '_ {
        let type_value = dependency_type.attribute_value();
        self.sentences()
            .map(move |sentence| read_dependencies(sentence, &type_value))
    }

    /// Get the constituency parse of every sentence.
    ///
    /// Returns a pair of the sentence identifier and the bracketed parse,
    /// if the sentence has one.
    pub fn parses(&self) -> impl Iterator<Item = Result<(String, Option<String>), ParseError>> + '_ {
        self.sentences().map(read_parse)
    }

    fn document(&self) -> Option<Node<'_, 'input>> {
        let root = self.tree.root_element();
        if root.has_tag_name(DOCUMENT) {
            Some(root)
        } else {
            child_element(root, DOCUMENT)
        }
    }

    fn sentences(&self) -> impl Iterator<Item = Node<'_, 'input>> + '_ {
        self.document()
            .and_then(|document| child_element(document, "sentences"))
            .into_iter()
            .flat_map(|sentences| {
                sentences
                    .children()
                    .filter(|node| node.has_tag_name("sentence"))
            })
    }
}

fn read_token(sentence: Node, token: Node) -> Result<EnToken, ParseError> {
    Ok(EnToken::new(
        int_attribute(sentence, "id")?,
        int_attribute(token, "id")?,
        child_text(token, "word")?,
        child_text(token, "lemma")?,
        child_text(token, "POS")?,
        child_text(token, "NER")?,
    ))
}

fn read_coreference(cluster: Node) -> Result<Coreference, ParseError> {
    let mut mentions = Vec::new();
    let mut representative = None;

    for mention in cluster
        .descendants()
        .filter(|node| node.has_tag_name("mention"))
    {
        if mention.attribute("representative") == Some("true") {
            representative = Some(mentions.len());
        }

        mentions.push(read_mention(mention)?);
    }

    if representative.is_none() {
        debug!(
            mentions = mentions.len(),
            "coreference cluster without representative mention"
        );
    }

    Ok(Coreference::new(mentions, representative))
}

fn read_mention(mention: Node) -> Result<Mention, ParseError> {
    Ok(Mention::new(
        child_int(mention, "sentence")?,
        child_int(mention, "start")?,
        child_int(mention, "end")?,
        child_int(mention, "head")?,
        child_text(mention, "text")?,
    ))
}

fn read_dependencies(
    sentence: Node,
    type_value: &str,
) -> Result<(String, Vec<Dependency>), ParseError> {
    let sentence_id = attribute(sentence, "id")?.to_owned();

    let graph = match sentence
        .children()
        .find(|node| node.has_tag_name("dependencies") && node.attribute("type") == Some(type_value))
    {
        Some(graph) => graph,
        None => {
            debug!(sentence_id = %sentence_id, dependency_type = type_value, "no dependencies of requested type");
            return Ok((sentence_id, Vec::new()));
        }
    };

    let dependencies = graph
        .children()
        .filter(|node| node.has_tag_name("dep"))
        .map(read_dependency)
        .collect::<Result<Vec<_>, _>>()?;

    Ok((sentence_id, dependencies))
}

fn read_dependency(dep: Node) -> Result<Dependency, ParseError> {
    let governor = required_child(dep, "governor")?;
    let dependent = required_child(dep, "dependent")?;

    Ok(Dependency::from_tokens(
        attribute(dep, "type")?,
        (governor.text().unwrap_or_default(), attribute(governor, "idx")?),
        (
            dependent.text().unwrap_or_default(),
            attribute(dependent, "idx")?,
        ),
    ))
}

fn read_parse(sentence: Node) -> Result<(String, Option<String>), ParseError> {
    let sentence_id = attribute(sentence, "id")?.to_owned();
    let parse = child_element(sentence, "parse")
        .map(|parse| parse.text().unwrap_or_default().to_owned());

    Ok((sentence_id, parse))
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| child.has_tag_name(name))
}

fn required_child<'a, 'input>(
    node: Node<'a, 'input>,
    name: &str,
) -> Result<Node<'a, 'input>, ParseError> {
    child_element(node, name).ok_or_else(|| ParseError::MissingElement {
        element: node.tag_name().name().to_owned(),
        child: name.to_owned(),
    })
}

/// Get the text of a child element, the empty string if it has no text.
fn child_text<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Result<&'a str, ParseError> {
    Ok(required_child(node, name)?.text().unwrap_or_default())
}

fn child_int(node: Node, name: &str) -> Result<usize, ParseError> {
    parse_int(child_text(node, name)?)
}

fn attribute<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Result<&'a str, ParseError> {
    node.attribute(name)
        .ok_or_else(|| ParseError::MissingAttribute {
            element: node.tag_name().name().to_owned(),
            attribute: name.to_owned(),
        })
}

fn int_attribute(node: Node, name: &str) -> Result<usize, ParseError> {
    parse_int(attribute(node, name)?)
}

fn parse_int(value: &str) -> Result<usize, ParseError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| ParseError::ParseIntField {
            value: value.to_owned(),
        })
}
