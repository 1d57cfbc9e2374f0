//! The assembly workspace: a frozen set of fragments cut from input records, the
//! compatibility graph built over them, and the lazy stream of circular assemblies they admit.

use crate::{
    assemble::assemble,
    cycle::{CycleMode, CycleStream},
    digest::digest,
    enzyme::EnzymeSpec,
    error::AssemblyError,
    filter::{FragmentSetFilter, RecordFilter, all_record_filters_pass},
    fragment::{Fragment, FragmentArena},
    graph::CompatibilityGraph,
    record::SeqRecord,
};

/// Records, fragments, and the compatibility graph over them, built once and queried
/// read-only thereafter.
pub struct Mix {
    arena: FragmentArena,
    graph: CompatibilityGraph,
}

impl Mix {
    fn from_arena(arena: FragmentArena) -> Self {
        let graph = CompatibilityGraph::build(&arena);
        Self { arena, graph }
    }

    pub fn fragment_arena(&self) -> &FragmentArena {
        &self.arena
    }

    /// Read-only view over the fragment-compatibility graph.
    pub fn compatibility_graph(&self) -> &CompatibilityGraph {
        &self.graph
    }

    /// The lazy stream of circular assemblies the mix admits. Each item names its construct
    /// `construct_<n>` in discovery order; `n` does not survive across separate calls to this
    /// method. Fragment-set filters run before assembly; record filters run after. A cycle
    /// that assembles but fails a record filter is skipped, not erred on, and the stream moves
    /// on to the next candidate.
    pub fn circular_assemblies<'a>(
        &'a self,
        fragment_set_filters: &'a [Box<dyn FragmentSetFilter>],
        record_filters: &'a [Box<dyn RecordFilter>],
        mode: CycleMode,
        annotate_homologies: bool,
    ) -> impl Iterator<Item = Result<SeqRecord, AssemblyError>> + 'a {
        CycleStream::new(&self.graph, &self.arena, fragment_set_filters, mode)
            .enumerate()
            .filter_map(move |(i, cycle)| {
                let cycle = match cycle {
                    Ok(c) => c,
                    Err(e) => return Some(Err(e)),
                };
                let fragments: Vec<&Fragment> =
                    cycle.iter().map(|&id| self.arena.get(id)).collect();
                match assemble(&format!("construct_{i}"), &fragments, true, annotate_homologies) {
                    Ok(record) => {
                        if all_record_filters_pass(record_filters, &record) {
                            Some(Ok(record))
                        } else {
                            None
                        }
                    }
                    Err(e) => Some(Err(e)),
                }
            })
    }
}

/// Digests every record with `enzymes` and builds the mix's fragment arena and compatibility
/// graph from the result. The usual entry point for the single-enzyme combinatorial protocol.
pub fn build_mix(records: &[SeqRecord], enzymes: &[EnzymeSpec]) -> Result<Mix, AssemblyError> {
    let mut arena = FragmentArena::new();
    for record in records {
        for fragment in digest(record, enzymes)? {
            arena.push(fragment);
        }
    }
    log::debug!(
        "built mix from {} record(s): {} fragment id(s) (forward + reverse)",
        records.len(),
        arena.len()
    );
    Ok(Mix::from_arena(arena))
}

/// Builds a mix directly from already-cut fragments, skipping digestion. Used by the
/// adapter/BASIC protocol, whose adapter fragments are constructed rather than cut.
pub fn build_mix_from_fragments(fragments: Vec<Fragment>) -> Mix {
    let mut arena = FragmentArena::new();
    for fragment in fragments {
        arena.push(fragment);
    }
    Mix::from_arena(arena)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enzyme::builtin;

    #[test]
    fn build_mix_digests_every_input_record() {
        let records = vec![SeqRecord::new(
            "x",
            "CGTCTCNAAAACCCCCCCCCCCCCGTCTCNTTTTGGGGGGGGGGGG",
            false,
        )];
        let mix = build_mix(&records, &[builtin::bsmbi()]).unwrap();
        assert_eq!(mix.fragment_arena().len(), 4); // 2 fragments + 2 twins
        assert_eq!(mix.compatibility_graph().node_count(), 4);
    }

    #[test]
    fn circular_assemblies_yields_the_expected_construct() {
        let records = vec![SeqRecord::new(
            "x",
            "CGTCTCNAAAACCCCCCCCCCCCCGTCTCNTTTTGGGGGGGGGGGG",
            false,
        )];
        let mix = build_mix(&records, &[builtin::bsmbi()]).unwrap();
        let fragment_filters: Vec<Box<dyn FragmentSetFilter>> = Vec::new();
        let record_filters: Vec<Box<dyn RecordFilter>> = Vec::new();
        let constructs: Vec<_> = mix
            .circular_assemblies(&fragment_filters, &record_filters, CycleMode::Deterministic, true)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(constructs.len(), 1);
        assert!(constructs[0].is_circular());
    }

    #[test]
    fn record_filter_rejects_constructs_after_assembly() {
        use crate::filter::MinLength;

        let records = vec![SeqRecord::new(
            "x",
            "CGTCTCNAAAACCCCCCCCCCCCCGTCTCNTTTTGGGGGGGGGGGG",
            false,
        )];
        let mix = build_mix(&records, &[builtin::bsmbi()]).unwrap();
        let fragment_filters: Vec<Box<dyn FragmentSetFilter>> = Vec::new();
        let record_filters: Vec<Box<dyn RecordFilter>> = vec![Box::new(MinLength::new(1_000))];
        let constructs: Vec<_> = mix
            .circular_assemblies(&fragment_filters, &record_filters, CycleMode::Deterministic, true)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert!(constructs.is_empty());
    }

    #[test]
    fn build_mix_from_fragments_skips_digestion() {
        use crate::{
            nucleotide::base_seq_from_str,
            overhang::{Overhang, OverhangSign, OverhangStrand},
        };
        let frag = Fragment {
            seq: base_seq_from_str("ACGT"),
            left: Overhang::sticky(base_seq_from_str("AATT"), OverhangStrand::Five, OverhangSign::Top),
            right: Overhang::sticky(base_seq_from_str("AATT"), OverhangStrand::Five, OverhangSign::Bottom),
            is_reverse: false,
            source_id: "adapter".to_owned(),
        };
        let mix = build_mix_from_fragments(vec![frag]);
        assert_eq!(mix.fragment_arena().len(), 2);
    }
}
