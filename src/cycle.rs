//! Simple-cycle enumeration over the compatibility graph, with canonicalization and
//! deduplication.
//!
//! Cycles are found with a minimum-start-vertex DFS, rooted at each cycle's lowest-id
//! fragment. A cycle and its reverse-complement walk are two distinct graph walks for the
//! same physical construct; `canonicalize` collapses them to one before handing a result to
//! the caller.
//!
//! `Deterministic` walks the graph once, in id order. `Randomized` reshuffles adjacency order
//! before each yielded cycle and gives up with an error once `staling_cutoff` consecutive
//! already-seen cycles come back within one shuffled pass.

use std::collections::HashSet;

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::{
    error::AssemblyError,
    filter::{FragmentSetFilter, all_fragment_filters_pass},
    fragment::{Fragment, FragmentArena, FragmentId},
    graph::CompatibilityGraph,
};

/// Rotate `cycle` to start at the fragment whose `as_string_key` is lexicographically least.
fn rotate_to_min(cycle: &[FragmentId], arena: &FragmentArena) -> Vec<FragmentId> {
    let n = cycle.len();
    let best_start = (0..n)
        .min_by_key(|&i| {
            (0..n)
                .map(|j| arena.get(cycle[(i + j) % n]).as_string_key())
                .collect::<Vec<_>>()
        })
        .unwrap_or(0);
    (0..n).map(|j| cycle[(best_start + j) % n]).collect()
}

/// The reverse-complement walk: traverse in reverse order, replacing each fragment with its
/// twin.
fn flip(cycle: &[FragmentId], arena: &FragmentArena) -> Vec<FragmentId> {
    cycle.iter().rev().map(|&id| arena.twin_of(id)).collect()
}

fn proportion_reverse(cycle: &[FragmentId], arena: &FragmentArena) -> f64 {
    let reversed = cycle.iter().filter(|&&id| arena.get(id).is_reverse).count();
    reversed as f64 / cycle.len() as f64
}

/// Canonical form of a cycle: oriented so that at most half its fragments are reverse
/// instances, then rotated to start at its lexicographically-least fragment.
pub fn canonicalize(cycle: &[FragmentId], arena: &FragmentArena) -> Vec<FragmentId> {
    let oriented = if proportion_reverse(cycle, arena) > 0.5 {
        flip(cycle, arena)
    } else {
        cycle.to_vec()
    };
    rotate_to_min(&oriented, arena)
}

/// A hashable key for a canonical cycle, used for the seen-set.
pub fn canonical_key(cycle: &[FragmentId], arena: &FragmentArena) -> String {
    cycle
        .iter()
        .map(|&id| arena.get(id).as_string_key())
        .collect::<Vec<_>>()
        .join(">")
}

/// Iterative, resumable DFS over a fixed adjacency order. One instance enumerates every simple
/// cycle reachable from its `start_order`, rooted at the lowest-id fragment in each cycle; it
/// never revisits the same raw walk twice.
struct RawCycleSearch {
    adj: Vec<Vec<FragmentId>>,
    start_order: Vec<FragmentId>,
    start_idx: usize,
    current_start: FragmentId,
    stack: Vec<(FragmentId, usize)>,
    path: Vec<FragmentId>,
    on_path: Vec<bool>,
}

impl RawCycleSearch {
    fn new(adj: Vec<Vec<FragmentId>>, start_order: Vec<FragmentId>) -> Self {
        let on_path = vec![false; adj.len()];
        Self {
            adj,
            start_order,
            start_idx: 0,
            current_start: 0,
            stack: Vec::new(),
            path: Vec::new(),
            on_path,
        }
    }

    fn begin_start(&mut self, start: FragmentId) {
        self.current_start = start;
        self.on_path.iter_mut().for_each(|b| *b = false);
        self.path.clear();
        self.stack.clear();
        self.path.push(start);
        self.on_path[start] = true;
        self.stack.push((start, 0));
    }

    /// Finds the next simple cycle in the graph, or `None` once every start has been
    /// exhausted.
    fn next_cycle(&mut self) -> Option<Vec<FragmentId>> {
        loop {
            if self.stack.is_empty() {
                if self.start_idx >= self.start_order.len() {
                    return None;
                }
                let start = self.start_order[self.start_idx];
                self.start_idx += 1;
                self.begin_start(start);
                continue;
            }

            let (node, from_idx) = *self.stack.last().unwrap();
            let neighbors = &self.adj[node];
            let mut cursor = from_idx;
            let mut next_candidate = None;
            while cursor < neighbors.len() {
                let candidate = neighbors[cursor];
                if candidate >= self.current_start {
                    next_candidate = Some((cursor, candidate));
                    break;
                }
                cursor += 1;
            }

            match next_candidate {
                None => {
                    self.stack.pop();
                    let done = self.path.pop().unwrap();
                    self.on_path[done] = false;
                }
                Some((cursor, candidate)) => {
                    self.stack.last_mut().unwrap().1 = cursor + 1;
                    if candidate == self.current_start {
                        return Some(self.path.clone());
                    } else if !self.on_path[candidate] {
                        self.on_path[candidate] = true;
                        self.path.push(candidate);
                        self.stack.push((candidate, 0));
                    }
                }
            }
        }
    }
}

/// Controls how the cycle stream explores the graph.
pub enum CycleMode {
    /// Walk the graph once, in ascending fragment-id order.
    Deterministic,
    /// Reshuffle adjacency before each yielded cycle, seeded for reproducibility. Raise an
    /// error after `staling_cutoff` consecutive already-seen cycles within one shuffled pass.
    Randomized { seed: u64, staling_cutoff: usize },
}

/// A lazy stream of canonical, deduplicated, filter-passing cycles. Each
/// `Iterator::next` call does the minimum work needed to produce (or rule out) one more
/// result; a consumer that stops early leaves the rest of the search undone.
pub struct CycleStream<'a> {
    arena: &'a FragmentArena,
    filters: &'a [Box<dyn FragmentSetFilter>],
    mode: CycleMode,
    seen: HashSet<String>,
    base_adj: Vec<Vec<FragmentId>>,
    base_order: Vec<FragmentId>,
    rng: Option<StdRng>,
    search: RawCycleSearch,
    done: bool,
}

impl<'a> CycleStream<'a> {
    pub fn new(
        graph: &CompatibilityGraph,
        arena: &'a FragmentArena,
        filters: &'a [Box<dyn FragmentSetFilter>],
        mode: CycleMode,
    ) -> Self {
        let base_order: Vec<FragmentId> = (0..graph.node_count()).collect();
        let base_adj: Vec<Vec<FragmentId>> = base_order
            .iter()
            .map(|&id| {
                let mut neighbors: Vec<FragmentId> = graph.neighbors(id).collect();
                neighbors.sort_unstable();
                neighbors
            })
            .collect();

        let rng = match &mode {
            CycleMode::Deterministic => None,
            CycleMode::Randomized { seed, .. } => Some(StdRng::seed_from_u64(*seed)),
        };

        let search = RawCycleSearch::new(base_adj.clone(), base_order.clone());
        let mut stream = Self {
            arena,
            filters,
            mode,
            seen: HashSet::new(),
            base_adj,
            base_order,
            rng,
            search,
            done: false,
        };
        if matches!(stream.mode, CycleMode::Randomized { .. }) {
            stream.reshuffle();
        }
        stream
    }

    fn reshuffle(&mut self) {
        let rng = self.rng.as_mut().expect("randomized mode has an rng");
        let mut order = self.base_order.clone();
        order.shuffle(rng);
        let mut adj = self.base_adj.clone();
        for neighbors in &mut adj {
            neighbors.shuffle(rng);
        }
        self.search = RawCycleSearch::new(adj, order);
    }

    fn accept(&mut self, raw: Vec<FragmentId>) -> Option<Result<Vec<FragmentId>, AssemblyError>> {
        let canon = canonicalize(&raw, self.arena);
        let key = canonical_key(&canon, self.arena);
        if self.seen.contains(&key) {
            return None;
        }
        self.seen.insert(key);
        let frags: Vec<&Fragment> = canon.iter().map(|&id| self.arena.get(id)).collect();
        if all_fragment_filters_pass(self.filters, &frags) {
            Some(Ok(canon))
        } else {
            None
        }
    }
}

impl<'a> Iterator for CycleStream<'a> {
    type Item = Result<Vec<FragmentId>, AssemblyError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let randomized_cutoff: Option<usize> = match &self.mode {
            CycleMode::Deterministic => None,
            CycleMode::Randomized { staling_cutoff, .. } => Some(*staling_cutoff),
        };

        match randomized_cutoff {
            None => loop {
                let raw = self.search.next_cycle()?;
                if let Some(result) = self.accept(raw) {
                    return Some(result);
                }
            },
            Some(staling_cutoff) => {
                self.reshuffle();
                let mut consecutive_duplicates = 0usize;
                loop {
                    let raw = match self.search.next_cycle() {
                        Some(raw) => raw,
                        None => {
                            self.done = true;
                            return None;
                        }
                    };
                    let canon = canonicalize(&raw, self.arena);
                    let key = canonical_key(&canon, self.arena);
                    if self.seen.contains(&key) {
                        consecutive_duplicates += 1;
                        if consecutive_duplicates > staling_cutoff {
                            self.done = true;
                            return Some(Err(AssemblyError::RandomizationStaled {
                                cutoff: staling_cutoff,
                            }));
                        }
                        continue;
                    }
                    self.seen.insert(key);
                    let frags: Vec<&Fragment> = canon.iter().map(|&id| self.arena.get(id)).collect();
                    if all_fragment_filters_pass(self.filters, &frags) {
                        return Some(Ok(canon));
                    }
                    // New but filter-rejected: keeps looking within this same shuffled pass,
                    // without counting against the staling cutoff.
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{digest::digest, enzyme::builtin, nucleotide::base_seq_from_str, overhang::{Overhang, OverhangSign, OverhangStrand}, record::SeqRecord};

    fn ring_arena() -> FragmentArena {
        let rec = SeqRecord::new(
            "x",
            "CGTCTCNAAAACCCCCCCCCCCCCGTCTCNTTTTGGGGGGGGGGGG",
            false,
        );
        let frags = digest(&rec, &[builtin::bsmbi()]).unwrap();
        let mut arena = FragmentArena::new();
        for f in frags {
            arena.push(f);
        }
        arena
    }

    #[test]
    fn deterministic_yields_each_construct_once() {
        let arena = ring_arena();
        let graph = CompatibilityGraph::build(&arena);
        let filters: Vec<Box<dyn FragmentSetFilter>> = Vec::new();
        let stream = CycleStream::new(&graph, &arena, &filters, CycleMode::Deterministic);
        let cycles: Vec<_> = stream.collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(cycles.len(), 1);
    }

    #[test]
    fn self_ligating_fragment_closes_a_one_cycle() {
        let frag = Fragment {
            seq: base_seq_from_str("ACGT"),
            left: Overhang::sticky(base_seq_from_str("AATT"), OverhangStrand::Five, OverhangSign::Top),
            right: Overhang::sticky(base_seq_from_str("AATT"), OverhangStrand::Five, OverhangSign::Bottom),
            is_reverse: false,
            source_id: "p".to_owned(),
        };
        let mut arena = FragmentArena::new();
        arena.push(frag);
        let graph = CompatibilityGraph::build(&arena);
        let filters: Vec<Box<dyn FragmentSetFilter>> = Vec::new();
        let stream = CycleStream::new(&graph, &arena, &filters, CycleMode::Deterministic);
        let cycles: Vec<_> = stream.collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), 1);
    }

    #[test]
    fn randomized_mode_exhausts_without_error_when_only_one_construct_exists() {
        let arena = ring_arena();
        let graph = CompatibilityGraph::build(&arena);
        let filters: Vec<Box<dyn FragmentSetFilter>> = Vec::new();
        let mut stream = CycleStream::new(
            &graph,
            &arena,
            &filters,
            CycleMode::Randomized { seed: 7, staling_cutoff: 20 },
        );
        let first = stream.next().unwrap().unwrap();
        assert_eq!(first.len(), 2);
        assert!(stream.next().is_none());
    }

    #[test]
    fn canonicalize_collapses_a_cycle_with_its_reverse_complement() {
        let arena = ring_arena();
        let a = 0;
        let b = arena
            .ids()
            .find(|&id| arena.get(a).will_clip_before(arena.get(id)))
            .unwrap();
        let forward = vec![a, b];
        let rc = flip(&forward, &arena);
        assert_eq!(
            canonical_key(&canonicalize(&forward, &arena), &arena),
            canonical_key(&canonicalize(&rc, &arena), &arena)
        );
    }
}
