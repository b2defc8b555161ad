use std::collections::VecDeque;

use petgraph::visit::{GraphRef, IntoNeighbors, VisitMap, Visitable, Walker};

/// Breadth-first walk that reports the depth of every visited node.
///
/// The start node has depth 0.
pub struct BfsWithDepth<N, VM> {
    queue: VecDeque<(N, usize)>,
    discovered: VM,
}

impl<N, VM> BfsWithDepth<N, VM>
where
    N: Copy + PartialEq,
    VM: VisitMap<N>,
{
    pub fn new<G>(graph: G, start: N) -> Self
    where
        G: GraphRef + Visitable<NodeId = N, Map = VM>,
    {
        let mut discovered = graph.visit_map();
        discovered.visit(start);

        let mut queue = VecDeque::new();
        queue.push_back((start, 0));

        BfsWithDepth { queue, discovered }
    }

    pub fn next(&mut self, graph: impl IntoNeighbors<NodeId = N>) -> Option<(N, usize)> {
        let (node, depth) = self.queue.pop_front()?;

        for succ in graph.neighbors(node) {
            if self.discovered.visit(succ) {
                self.queue.push_back((succ, depth + 1));
            }
        }

        Some((node, depth))
    }
}

impl<G> Walker<G> for BfsWithDepth<G::NodeId, G::Map>
where
    G: IntoNeighbors + Visitable,
{
    type Item = (G::NodeId, usize);

    fn walk_next(&mut self, context: G) -> Option<Self::Item> {
        self.next(context)
    }
}
