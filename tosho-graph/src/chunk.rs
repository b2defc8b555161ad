//! Chunk dependency graphs.
//!
//! The dependency parser only records, for every chunk, the index of the
//! chunk that it depends on. `ChunkSentence` stores the chunks of a
//! sentence as an indexable arena and adds the reverse edges (`srcs`), so
//! that the tree can be traversed in both directions.

use std::fmt::{self, Display, Formatter};
use std::ops::Index;
use std::slice;

use petgraph::graph::{node_index, DiGraph};
use petgraph::visit::Walker;

use crate::error::GraphError;
use crate::morph::Morph;
use crate::BfsWithDepth;

/// A chunk (bunsetsu).
///
/// A chunk is a contiguous run of morphemes that forms a single node
/// in the dependency tree of a sentence.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Chunk {
    id: usize,
    dst: Option<usize>,
    srcs: Vec<usize>,
    morphs: Vec<Morph>,
}

impl Chunk {
    /// Create a chunk without morphemes and dependents.
    ///
    /// `dst` is the index of the chunk that this chunk depends on, or
    /// `None` if the chunk is a root.
    pub fn new(id: usize, dst: Option<usize>) -> Self {
        Chunk {
            id,
            dst,
            srcs: Vec::new(),
            morphs: Vec::new(),
        }
    }

    /// Get the chunk identifier.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Get the index of the chunk that this chunk depends on.
    pub fn dst(&self) -> Option<usize> {
        self.dst
    }

    /// Returns `true` if the chunk does not depend on another chunk.
    pub fn is_root(&self) -> bool {
        self.dst.is_none()
    }

    /// Get the identifiers of the chunks that depend on this chunk.
    ///
    /// The dependents are only available after `ChunkSentence::resolve`
    /// was called.
    pub fn srcs(&self) -> &[usize] {
        &self.srcs
    }

    /// Get the morphemes of the chunk.
    pub fn morphs(&self) -> &[Morph] {
        &self.morphs
    }

    /// Append a morpheme to the chunk.
    pub fn push(&mut self, morph: Morph) {
        self.morphs.push(morph);
    }

    /// Get the surface form of the chunk.
    ///
    /// This is the concatenation of the surface forms of its morphemes.
    pub fn surface(&self) -> String {
        self.morphs.iter().map(Morph::surface).collect()
    }
}

impl Display for Chunk {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        match self.dst {
            Some(dst) => write!(fmt, "{}:{} -> {}", self.id, self.surface(), dst),
            None => write!(fmt, "{}:{}", self.id, self.surface()),
        }
    }
}

/// The chunks of a sentence.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ChunkSentence {
    chunks: Vec<Chunk>,
}

impl ChunkSentence {
    /// Construct an empty sentence.
    pub fn new() -> Self {
        ChunkSentence { chunks: Vec::new() }
    }

    /// Add a chunk to the sentence.
    ///
    /// Chunks should always be pushed in sentence order. Returns the
    /// index of the chunk.
    pub fn push(&mut self, chunk: Chunk) -> usize {
        self.chunks.push(chunk);
        self.chunks.len() - 1
    }

    /// Get the chunk that was added last, mutably.
    pub fn last_mut(&mut self) -> Option<&mut Chunk> {
        self.chunks.last_mut()
    }

    /// Get the chunks of the sentence.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Unwrap the chunks of the sentence.
    pub fn into_inner(self) -> Vec<Chunk> {
        self.chunks
    }

    /// Get an iterator over the chunks.
    pub fn iter(&self) -> slice::Iter<Chunk> {
        self.chunks.iter()
    }

    /// Get the number of chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns `true` if the sentence has no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Add the reverse dependency edges.
    ///
    /// For every chunk that depends on another chunk, the identifier of
    /// the chunk is added to the `srcs` of its destination. Dependents are
    /// added in sentence order. Existing `srcs` are replaced, so resolving
    /// twice gives the same result.
    pub fn resolve(&mut self) -> Result<(), GraphError> {
        let chunk_count = self.chunks.len();

        for chunk in &mut self.chunks {
            chunk.srcs.clear();
        }

        for idx in 0..chunk_count {
            let (id, dst) = (self.chunks[idx].id, self.chunks[idx].dst);
            if let Some(dst) = dst {
                if dst >= chunk_count {
                    return Err(GraphError::DestinationOutOfBounds {
                        chunk: id,
                        dst,
                        chunk_count,
                    });
                }

                self.chunks[dst].srcs.push(id);
            }
        }

        Ok(())
    }

    /// Get the indices of the chunks without a destination.
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.chunks
            .iter()
            .enumerate()
            .filter(|(_, chunk)| chunk.is_root())
            .map(|(idx, _)| idx)
    }

    /// Get the path from the chunk at `idx` to its root.
    ///
    /// The path starts with `idx` itself. The walk is bounded by the
    /// number of chunks, so a malformed cyclic sentence terminates.
    pub fn path_to_root(&self, idx: usize) -> PathToRoot {
        PathToRoot {
            chunks: &self.chunks,
            next: Some(idx).filter(|&idx| idx < self.chunks.len()),
            remaining: self.chunks.len(),
        }
    }

    /// Get the (transitive) dependents of the chunk at `idx`.
    ///
    /// Returns `(index, depth)` pairs in breadth-first order, starting
    /// with `(idx, 0)`. Chunks at the same depth are ordered by index.
    pub fn dependents_bfs(&self, idx: usize) -> Vec<(usize, usize)> {
        if idx >= self.chunks.len() {
            return Vec::new();
        }

        let graph = self.dep_graph();
        let mut visits: Vec<_> = BfsWithDepth::new(&graph, node_index(idx))
            .iter(&graph)
            .map(|(node, depth)| (node.index(), depth))
            .collect();
        visits.sort_by_key(|&(idx, depth)| (depth, idx));
        visits
    }

    /// Get the sentence as a `petgraph` graph.
    ///
    /// Node `i` corresponds to the chunk at index `i`, edges go from a
    /// chunk to its dependents. Destinations outside the sentence are
    /// not represented.
    pub fn dep_graph(&self) -> DiGraph<(), ()> {
        let mut graph = DiGraph::with_capacity(self.chunks.len(), self.chunks.len());
        for _ in &self.chunks {
            graph.add_node(());
        }

        for (idx, chunk) in self.chunks.iter().enumerate() {
            if let Some(dst) = chunk.dst.filter(|&dst| dst < self.chunks.len()) {
                graph.add_edge(node_index(dst), node_index(idx), ());
            }
        }

        graph
    }
}

impl From<Vec<Chunk>> for ChunkSentence {
    fn from(chunks: Vec<Chunk>) -> Self {
        ChunkSentence { chunks }
    }
}

impl Index<usize> for ChunkSentence {
    type Output = Chunk;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.chunks[idx]
    }
}

impl<'a> IntoIterator for &'a ChunkSentence {
    type Item = &'a Chunk;
    type IntoIter = slice::Iter<'a, Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for ChunkSentence {
    type Item = Chunk;
    type IntoIter = std::vec::IntoIter<Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.into_iter()
    }
}

/// Iterator over the chunk indices from a chunk to its root.
pub struct PathToRoot<'a> {
    chunks: &'a [Chunk],
    next: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for PathToRoot<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let idx = self.next?;
        self.remaining -= 1;
        self.next = self
            .chunks
            .get(idx)
            .and_then(Chunk::dst)
            .filter(|&dst| dst < self.chunks.len());

        Some(idx)
    }
}

#[cfg(test)]
mod tests {
    use lazy_static::lazy_static;
    use maplit::btreeset;

    use super::{Chunk, ChunkSentence};
    use crate::error::GraphError;
    use crate::morph::Morph;

    fn chunk(id: usize, dst: Option<usize>, surfaces: &[&str]) -> Chunk {
        let mut chunk = Chunk::new(id, dst);
        for &surface in surfaces {
            chunk.push(Morph::new(surface, surface, "名詞", "一般"));
        }
        chunk
    }

    lazy_static! {
        // 吾輩はここで始めて人間というものを見た。
        static ref NEKO: ChunkSentence = {
            let mut sentence = ChunkSentence::new();
            sentence.push(chunk(0, Some(5), &["吾輩", "は"]));
            sentence.push(chunk(1, Some(2), &["ここ", "で"]));
            sentence.push(chunk(2, Some(3), &["始め", "て"]));
            sentence.push(chunk(3, Some(4), &["人間", "という"]));
            sentence.push(chunk(4, Some(5), &["もの", "を"]));
            sentence.push(chunk(5, None, &["見", "た", "。"]));
            sentence.resolve().unwrap();
            sentence
        };
    }

    #[test]
    fn resolve_adds_reverse_edges() {
        let srcs: Vec<_> = NEKO.iter().map(|c| c.srcs().to_vec()).collect();
        assert_eq!(
            srcs,
            vec![vec![], vec![], vec![1], vec![2], vec![3], vec![0, 4]]
        );
    }

    #[test]
    fn resolved_edges_are_consistent() {
        for (idx, chunk) in NEKO.iter().enumerate() {
            if let Some(dst) = chunk.dst() {
                assert!(NEKO[dst].srcs().contains(&chunk.id()));
            }

            for &src in chunk.srcs() {
                assert_eq!(NEKO[src].dst(), Some(idx));
            }
        }
    }

    #[test]
    fn resolve_is_idempotent() {
        let mut sentence = NEKO.clone();
        sentence.resolve().unwrap();
        assert_eq!(sentence, *NEKO);
    }

    #[test]
    #[should_panic(expected = "DestinationOutOfBounds")]
    fn resolve_rejects_out_of_bounds_destination() {
        let mut sentence = ChunkSentence::new();
        sentence.push(chunk(0, Some(1), &["吾輩"]));
        sentence.resolve().unwrap();
    }

    #[test]
    fn resolve_reports_offending_chunk() {
        let mut sentence = ChunkSentence::new();
        sentence.push(chunk(0, None, &["吾輩"]));
        sentence.push(chunk(1, Some(7), &["は"]));
        assert_eq!(
            sentence.resolve(),
            Err(GraphError::DestinationOutOfBounds {
                chunk: 1,
                dst: 7,
                chunk_count: 2
            })
        );
    }

    #[test]
    fn surface() {
        assert_eq!(NEKO[3].surface(), "人間という");
        assert_eq!(NEKO[5].to_string(), "5:見た。");
        assert_eq!(NEKO[0].to_string(), "0:吾輩は -> 5");
    }

    #[test]
    fn roots() {
        assert_eq!(NEKO.roots().collect::<Vec<_>>(), vec![5]);
        assert!(ChunkSentence::new().roots().next().is_none());
        assert!(ChunkSentence::new().is_empty());
        assert!(!NEKO.is_empty());
    }

    #[test]
    fn path_to_root() {
        assert_eq!(
            NEKO.path_to_root(1).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5]
        );
        assert_eq!(NEKO.path_to_root(5).collect::<Vec<_>>(), vec![5]);
        assert!(NEKO.path_to_root(6).next().is_none());
    }

    #[test]
    fn path_to_root_terminates_on_cycles() {
        let sentence = ChunkSentence::from(vec![
            chunk(0, Some(1), &["a"]),
            chunk(1, Some(0), &["b"]),
        ]);
        assert_eq!(sentence.path_to_root(0).collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn dependents_bfs() {
        assert_eq!(
            NEKO.dependents_bfs(5),
            vec![(5, 0), (0, 1), (4, 1), (3, 2), (2, 3), (1, 4)]
        );
        assert_eq!(NEKO.dependents_bfs(1), vec![(1, 0)]);
        assert!(NEKO.dependents_bfs(6).is_empty());
    }

    #[test]
    fn dep_graph() {
        let graph = NEKO.dep_graph();
        assert_eq!(graph.node_count(), 6);
        assert_eq!(graph.edge_count(), 5);

        let dependents: std::collections::BTreeSet<_> = graph
            .neighbors(petgraph::graph::node_index(5))
            .map(|n| n.index())
            .collect();
        assert_eq!(dependents, btreeset! {0, 4});
    }
}
