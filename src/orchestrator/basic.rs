//! Three-part adapter assembly.
//!
//! Parts come in triplets, each triplet is digested by a single "adapter" enzyme, and the
//! fragments whose overhang on either end exceeds the enzyme's own canonical overhang length
//! are the triplet's two adapted outer ends. The shortest path between each ordered pair of
//! distinct ends (through the triplet's ordinary fragments) gives the adapted linear chain in
//! both orientations, hence exactly two expected paths. The two adapted triplets are fed as
//! plain fragments into a fresh top-level combinatorial mix.

use crate::{
    assemble::assemble_fragment_chain,
    cycle::CycleMode,
    enzyme::EnzymeSpec,
    error::{AssemblyError, Warning},
    filter::{FragmentSetFilter, RecordFilter},
    fragment::{Fragment, FragmentId},
    mix::{Mix, build_mix, build_mix_from_fragments},
    nucleotide::base_seq_to_str,
    orchestrator::AssemblySimulation,
    overhang::Overhang,
    record::SeqRecord,
};

/// Parameters for one BASIC-style adapter assembly run.
pub struct BasicAssembly {
    pub adapter_enzyme: EnzymeSpec,
    pub max_constructs: usize,
    pub annotate_homologies: bool,
}

impl Default for BasicAssembly {
    fn default() -> Self {
        Self {
            adapter_enzyme: crate::enzyme::builtin::bsai(),
            max_constructs: usize::MAX,
            annotate_homologies: false,
        }
    }
}

fn overhang_len(o: &Overhang) -> usize {
    match o {
        Overhang::Blunt => 0,
        Overhang::Sticky { seq, .. } => seq.len(),
    }
}

/// A fragment counts as an adapter end iff either of its overhangs exceeds the enzyme's own
/// canonical overhang length.
fn is_adapter_fragment(fragment: &Fragment, enzyme_overhang_len: usize) -> bool {
    overhang_len(&fragment.left).max(overhang_len(&fragment.right)) > enzyme_overhang_len
}

/// The tagged outcome of adapting one triplet: either the single adapted fragment, or the
/// sub-mix plus the error that made adaptation fail.
pub enum AdapterOutcome {
    Ok(Fragment),
    Fail { mix: Mix, error: AssemblyError },
}

/// Adapts one triplet: builds its sub-mix, then delegates to [`adapt_mix`].
fn adapt_triplet(triplet: &[SeqRecord], enzyme: &EnzymeSpec, label: &str) -> AdapterOutcome {
    let mix = match build_mix(triplet, std::slice::from_ref(enzyme)) {
        Ok(mix) => mix,
        Err(error) => {
            // No mix to report yet. Reuse an empty one built from no fragments so the
            // tagged-union shape stays uniform even on a pre-mix failure.
            return AdapterOutcome::Fail {
                mix: build_mix_from_fragments(Vec::new()),
                error,
            };
        }
    };
    adapt_mix(mix, enzyme.overhang_len, label)
}

/// Identifies a pre-built sub-mix's adapter-fragment ids and searches for the two expected
/// shortest paths between them. Split out from [`adapt_triplet`] so the adapting logic itself
/// doesn't care whether its mix came from digestion or, as real BASIC linkers do, from
/// already-fragmented parts built directly via `build_mix_from_fragments`.
fn adapt_mix(mix: Mix, enzyme_overhang_len: usize, label: &str) -> AdapterOutcome {
    let arena = mix.fragment_arena();
    let adapter_ids: Vec<FragmentId> = arena
        .ids()
        .filter(|&id| is_adapter_fragment(arena.get(id), enzyme_overhang_len))
        .collect();

    if adapter_ids.len() != 4 {
        let error = AssemblyError::AdapterAmbiguity {
            message: format!(
                "{label}: too many long overhangs ({} found, expected 4)",
                adapter_ids.len()
            ),
        };
        return AdapterOutcome::Fail { mix, error };
    }

    let graph = mix.compatibility_graph();
    let mut constructs: Vec<(usize, Fragment)> = Vec::new();
    for &start in &adapter_ids {
        for &end in &adapter_ids {
            if start == end {
                continue;
            }
            if let Some(path) = graph.shortest_path(start, end) {
                let fragments: Vec<&Fragment> = path.iter().map(|&id| arena.get(id)).collect();
                let score = fragments.iter().filter(|f| f.is_reverse).count();
                if let Ok(chain) = assemble_fragment_chain(label, &fragments, score * 2 > fragments.len()) {
                    constructs.push((score, chain));
                }
            }
        }
    }

    if constructs.len() != 2 {
        let error = AssemblyError::AdapterAmbiguity {
            message: format!(
                "{label}: too many possible ligations ({} found, expected 2)",
                constructs.len()
            ),
        };
        return AdapterOutcome::Fail { mix, error };
    }

    // The pair found is a linear assembly and its reverse complement. Pick the one with
    // fewer reverse-oriented fragments, breaking ties on sequence for determinism.
    constructs.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then_with(|| base_seq_to_str(&a.1.seq).cmp(&base_seq_to_str(&b.1.seq)))
    });
    let (_, fragment) = constructs.into_iter().next().unwrap();
    AdapterOutcome::Ok(fragment)
}

/// Runs the three-part adapter protocol over `parts`. `parts.len()` must be a multiple of
/// three, or this reports `InvalidInputShape` immediately, checked up front.
pub fn simulate(parts: &[SeqRecord], spec: BasicAssembly) -> AssemblySimulation {
    if parts.is_empty() || parts.len() % 3 != 0 {
        return AssemblySimulation::with_error(AssemblyError::InvalidInputShape {
            message: format!(
                "BASIC assembly requires a part count that's a multiple of 3; got {}",
                parts.len()
            ),
        });
    }

    let mut adapted_fragments = Vec::new();

    for (i, triplet) in parts.chunks(3).enumerate() {
        let label = format!("triplet_{i}");
        match adapt_triplet(triplet, &spec.adapter_enzyme, &label) {
            AdapterOutcome::Ok(fragment) => adapted_fragments.push(fragment),
            AdapterOutcome::Fail { mix, error } => {
                return AssemblySimulation {
                    construct_records: Vec::new(),
                    mixes: vec![mix],
                    errors: vec![error],
                    warnings: Vec::new(),
                };
            }
        }
    }

    let top_mix = build_mix_from_fragments(adapted_fragments);
    let fragment_set_filters: Vec<Box<dyn FragmentSetFilter>> = Vec::new();
    let record_filters: Vec<Box<dyn RecordFilter>> = Vec::new();

    let mut construct_records = Vec::new();
    let mut truncated = false;
    let mut errors = Vec::new();

    for result in top_mix.circular_assemblies(
        &fragment_set_filters,
        &record_filters,
        CycleMode::Deterministic,
        spec.annotate_homologies,
    ) {
        if construct_records.len() >= spec.max_constructs {
            truncated = true;
            break;
        }
        match result {
            Ok(record) => construct_records.push(record),
            Err(e) => {
                errors.push(e);
                break;
            }
        }
    }
    construct_records.sort_by(|a, b| a.seq_str().cmp(b.seq_str()));

    let mut warnings = Vec::new();
    if truncated {
        warnings.push(Warning::MaxConstructsReached {
            cap: spec.max_constructs,
        });
    }

    AssemblySimulation {
        construct_records,
        mixes: vec![top_mix],
        errors,
        warnings,
    }
}
