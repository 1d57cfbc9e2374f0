//! The fragment-compatibility graph.
//!
//! Directed; nodes are fragments (forward and reverse instances are distinct nodes). An edge
//! `a → b` exists iff `a`'s right overhang is complementary to `b`'s left overhang. Built once
//! per mix and read-only thereafter.
//!
//! A fragment and its own twin are always mutually complementary, so a fragment never gets an
//! edge to its own twin here. A genuine self-loop (`a → a`, when a fragment's own ends ligate
//! to each other) is unaffected.

use petgraph::graph::{DiGraph, NodeIndex};

use crate::fragment::{FragmentArena, FragmentId};

/// A read-only view over the compatibility graph.
pub struct CompatibilityGraph {
    graph: DiGraph<FragmentId, ()>,
}

impl CompatibilityGraph {
    /// O(n²) in the number of fragment ids in `arena`. Every ordered pair, including
    /// self-pairs, is tested once.
    pub fn build(arena: &FragmentArena) -> Self {
        let mut graph = DiGraph::new();
        let node_ids: Vec<FragmentId> = arena.ids().collect();

        // Nodes are added in ascending `FragmentId` order, so `NodeIndex(i).index() == i`
        // holds and no separate id↔index table is needed.
        for id in &node_ids {
            let idx = graph.add_node(*id);
            debug_assert_eq!(idx.index(), *id);
        }

        for &a in &node_ids {
            let frag_a = arena.get(a);
            let twin_a = arena.twin_of(a);
            for &b in &node_ids {
                if b == twin_a {
                    continue;
                }
                if frag_a.will_clip_before(arena.get(b)) {
                    graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
                }
            }
        }

        log::debug!(
            "built compatibility graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Self { graph }
    }

    pub fn inner(&self) -> &DiGraph<FragmentId, ()> {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = FragmentId> + '_ {
        self.graph.node_indices().map(|idx| self.graph[idx])
    }

    pub fn edges(&self) -> impl Iterator<Item = (FragmentId, FragmentId)> + '_ {
        self.graph
            .edge_indices()
            .filter_map(move |e| self.graph.edge_endpoints(e))
            .map(|(a, b)| (a.index(), b.index()))
    }

    pub fn has_edge(&self, a: FragmentId, b: FragmentId) -> bool {
        self.graph
            .contains_edge(NodeIndex::new(a), NodeIndex::new(b))
    }

    pub fn neighbors(&self, a: FragmentId) -> impl Iterator<Item = FragmentId> + '_ {
        self.graph
            .neighbors(NodeIndex::new(a))
            .map(|idx| idx.index())
    }

    /// The shortest path from `start` to `end`, inclusive of both ends, or `None` if `end`
    /// isn't reachable. Used by the adapter orchestrator to find the single ligation chain
    /// between a pair of adapter fragments.
    pub fn shortest_path(&self, start: FragmentId, end: FragmentId) -> Option<Vec<FragmentId>> {
        petgraph::algo::astar(
            &self.graph,
            NodeIndex::new(start),
            |idx| idx == NodeIndex::new(end),
            |_| 1u32,
            |_| 0u32,
        )
        .map(|(_, path)| path.into_iter().map(|idx| idx.index()).collect())
    }
}
