//! Sticky-end fragments and the arena that owns them.
//!
//! A fragment and its reverse-complement twin point at each other. To avoid a reference
//! cycle, fragments live in a flat arena indexed by `FragmentId`, and the twin relation is
//! resolved through a side table (`FragmentArena::twin`) rather than a direct pointer.

use crate::{
    nucleotide::{BaseSeq, base_seq_complement, base_seq_to_str},
    overhang::{Overhang, complement_of},
};

pub type FragmentId = usize;

/// An immutable oriented double-stranded sequence, cut from a source record.
#[derive(Clone, PartialEq, Debug)]
pub struct Fragment {
    pub seq: BaseSeq,
    pub left: Overhang,
    pub right: Overhang,
    pub is_reverse: bool,
    /// Identifier of the record this fragment was cut from.
    pub source_id: String,
}

impl Fragment {
    /// `left | sequence | right`, used for canonical hashing.
    pub fn as_string_key(&self) -> String {
        format!(
            "{}|{}|{}",
            self.left.as_key(),
            base_seq_to_str(&self.seq),
            self.right.as_key()
        )
    }

    /// `complement_of(self.right, other.left)`.
    pub fn will_clip_before(&self, other: &Fragment) -> bool {
        complement_of(&self.right, &other.left)
    }

    fn reverse_complement(&self) -> Self {
        Self {
            seq: base_seq_complement(&self.seq),
            left: self.right.reverse_complement(),
            right: self.left.reverse_complement(),
            is_reverse: !self.is_reverse,
            source_id: self.source_id.clone(),
        }
    }
}

/// Owns every fragment in a mix (forward and reverse), and the `id ↔ twin_id` side table that
/// stands in for the mutual fragment↔twin reference.
#[derive(Clone, Debug, Default)]
pub struct FragmentArena {
    fragments: Vec<Fragment>,
    twins: Vec<FragmentId>,
}

impl FragmentArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: FragmentId) -> &Fragment {
        &self.fragments[id]
    }

    pub fn twin_of(&self, id: FragmentId) -> FragmentId {
        self.twins[id]
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = FragmentId> {
        0..self.fragments.len()
    }

    /// Appends `fragment` and its reverse-complement twin, returning the forward fragment's
    /// id. Maintains the invariant that the reverse list has the same length and index-parity
    /// as the forward list: every `push` adds exactly one forward/reverse pair.
    pub fn push(&mut self, fragment: Fragment) -> FragmentId {
        let rc = fragment.reverse_complement();

        let fwd_id = self.fragments.len();
        self.fragments.push(fragment);
        let rc_id = self.fragments.len();
        self.fragments.push(rc);

        self.twins.push(rc_id);
        self.twins.push(fwd_id);

        fwd_id
    }

    /// Ids of the forward fragments, in insertion order (every even id, by construction).
    pub fn forward_ids(&self) -> Vec<FragmentId> {
        (0..self.fragments.len()).step_by(2).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        nucleotide::base_seq_from_str,
        overhang::{OverhangSign, OverhangStrand},
    };

    fn fragment(seq: &str, left: &str, right: &str) -> Fragment {
        Fragment {
            seq: base_seq_from_str(seq),
            left: Overhang::sticky(base_seq_from_str(left), OverhangStrand::Five, OverhangSign::Top),
            right: Overhang::sticky(base_seq_from_str(right), OverhangStrand::Five, OverhangSign::Bottom),
            is_reverse: false,
            source_id: "partA".to_owned(),
        }
    }

    #[test]
    fn twin_of_twin_is_self() {
        let mut arena = FragmentArena::new();
        let fwd = arena.push(fragment("ACGTACGT", "AATT", "GGCC"));
        let rev = arena.twin_of(fwd);
        assert_eq!(arena.twin_of(rev), fwd);
    }

    #[test]
    fn reverse_complement_flips_is_reverse_and_swaps_overhangs() {
        let mut arena = FragmentArena::new();
        let fwd = arena.push(fragment("ACGTACGT", "AATT", "GGCC"));
        let rev = arena.twin_of(fwd);
        let f = arena.get(fwd);
        let r = arena.get(rev);
        assert!(!f.is_reverse);
        assert!(r.is_reverse);
        assert_eq!(r.left, f.right.reverse_complement());
        assert_eq!(r.right, f.left.reverse_complement());
    }

    #[test]
    fn arena_index_parity_holds() {
        let mut arena = FragmentArena::new();
        for i in 0..5 {
            arena.push(fragment(&format!("ACGT{i}"), "AATT", "GGCC"));
        }
        assert_eq!(arena.len(), 10);
        for id in arena.forward_ids() {
            assert_eq!(id % 2, 0);
        }
    }
}
