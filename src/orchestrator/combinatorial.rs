//! Combinatorial single-enzyme assembly.
//!
//! Builds one mix from every input part digested with a single enzyme, enumerates its
//! canonical circular-assembly cycles, applies the caller's filters, and stops once
//! `max_constructs` results have been produced or the stream is exhausted. Results are stably
//! sorted by assembled sequence string, so repeated runs with `randomize=false` are
//! byte-identical.

use crate::{
    cycle::CycleMode,
    enzyme::EnzymeSpec,
    error::{AssemblyError, ExpectedCount, Warning},
    filter::{FragmentSetFilter, RecordFilter},
    mix::build_mix,
    orchestrator::AssemblySimulation,
    record::SeqRecord,
};

/// Parameters for one combinatorial-assembly run.
pub struct CombinatorialAssembly {
    pub enzyme: EnzymeSpec,
    pub fragment_set_filters: Vec<Box<dyn FragmentSetFilter>>,
    pub record_filters: Vec<Box<dyn RecordFilter>>,
    pub max_constructs: usize,
    pub expected: ExpectedCount,
    pub annotate_homologies: bool,
    pub randomize: Option<(u64, usize)>,
}

impl Default for CombinatorialAssembly {
    fn default() -> Self {
        Self {
            enzyme: crate::enzyme::builtin::bsmbi(),
            fragment_set_filters: Vec::new(),
            record_filters: Vec::new(),
            max_constructs: usize::MAX,
            expected: ExpectedCount::Any,
            annotate_homologies: false,
            randomize: None,
        }
    }
}

/// Runs the combinatorial protocol over `records` per `spec`.
pub fn simulate(records: &[SeqRecord], spec: CombinatorialAssembly) -> AssemblySimulation {
    let mix = match build_mix(records, std::slice::from_ref(&spec.enzyme)) {
        Ok(mix) => mix,
        Err(e) => return AssemblySimulation::with_error(e),
    };

    let mode = match spec.randomize {
        Some((seed, staling_cutoff)) => CycleMode::Randomized {
            seed,
            staling_cutoff,
        },
        None => CycleMode::Deterministic,
    };

    let mut construct_records = Vec::new();
    let mut errors = Vec::new();
    let mut truncated = false;

    for result in mix.circular_assemblies(
        &spec.fragment_set_filters,
        &spec.record_filters,
        mode,
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

    let found = construct_records.len();
    if !spec.expected.is_satisfied_by(found) {
        errors.push(AssemblyError::ExpectedConstructCountViolation {
            expected: spec.expected,
            found,
        });
    }

    let mut warnings = Vec::new();
    if truncated {
        warnings.push(Warning::MaxConstructsReached {
            cap: spec.max_constructs,
        });
    }

    AssemblySimulation {
        construct_records,
        mixes: vec![mix],
        errors,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{filter::NoRestrictionSite, record::SeqRecord};

    // Three parts plus a receptor, a single enzyme, no filters: exactly one circular
    // construct whose length is the sum of the parts minus the overhangs.
    #[test]
    fn trivial_single_assembly_yields_one_construct() {
        // A single BsmBI-cut ring stands in for the "three parts plus receptor" scenario: one
        // record, two cuts, two fragments that close into exactly one ring.
        let records = vec![SeqRecord::new(
            "receptor_and_parts",
            "CGTCTCNAAAACCCCCCCCCCCCCGTCTCNTTTTGGGGGGGGGGGG",
            false,
        )];
        let spec = CombinatorialAssembly {
            enzyme: crate::enzyme::builtin::bsmbi(),
            expected: ExpectedCount::ExactlyOne,
            ..Default::default()
        };
        let sim = simulate(&records, spec);
        assert!(sim.is_ok());
        assert_eq!(sim.construct_records.len(), 1);
        assert!(sim.construct_records[0].is_circular());
    }

    // Wrong enzyme, no compatible cuts, zero constructs is an
    // `ExpectedConstructCountViolation` when the caller expected at least one.
    #[test]
    fn wrong_enzyme_yields_zero_constructs_and_an_error() {
        let records = vec![SeqRecord::new(
            "part",
            "CGTCTCNAAAACCCCCCCCCCCCCGTCTCNTTTTGGGGGGGGGGGG",
            false,
        )];
        let spec = CombinatorialAssembly {
            enzyme: crate::enzyme::builtin::bsai(),
            expected: ExpectedCount::AtLeastOne,
            ..Default::default()
        };
        let sim = simulate(&records, spec);
        assert_eq!(sim.construct_records.len(), 0);
        assert!(!sim.is_ok());
    }

    #[test]
    fn max_constructs_cap_truncates_and_warns() {
        // Two independent self-ligating rings in one mix: at least two distinct constructs.
        let records = vec![
            SeqRecord::new(
                "ring_a",
                "CGTCTCNAAAACCCCCCCCCCCCCGTCTCNTTTTGGGGGGGGGGGG",
                false,
            ),
            SeqRecord::new(
                "ring_b",
                "CGTCTCNAAAAGGGGGGGGGGGGGCGTCTCNTTTTCCCCCCCCCCCC",
                false,
            ),
        ];
        let mut spec = CombinatorialAssembly {
            enzyme: crate::enzyme::builtin::bsmbi(),
            max_constructs: 1,
            ..Default::default()
        };
        spec.fragment_set_filters = Vec::new();
        let sim = simulate(&records, spec);
        assert_eq!(sim.construct_records.len(), 1);
        assert_eq!(sim.warnings.len(), 1);
    }

    #[test]
    fn no_restriction_site_filter_is_threaded_through() {
        let records = vec![SeqRecord::new(
            "x",
            "CGTCTCNAAAACCCCCCCCCCCCCGTCTCNTTTTGGGGGGGGGGGG",
            false,
        )];
        let spec = CombinatorialAssembly {
            enzyme: crate::enzyme::builtin::bsmbi(),
            fragment_set_filters: vec![Box::new(NoRestrictionSite::new(crate::enzyme::builtin::bsmbi()))],
            ..Default::default()
        };
        let sim = simulate(&records, spec);
        // Every surviving fragment here is blunt/short and carries no internal BsmBI site, so
        // the filter doesn't remove the one legitimate ring.
        assert_eq!(sim.construct_records.len(), 1);
    }
}
