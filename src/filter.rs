//! The filter pipeline: pure predicates over fragment sets (applied before
//! assembly) and over assembled records (applied after). Composed with short-circuit AND;
//! no filter may mutate its argument.

use crate::{
    enzyme::{EnzymeSpec, find_cuts},
    fragment::Fragment,
    record::SeqRecord,
};

/// A predicate over the fragments of a candidate cycle, evaluated before assembly.
pub trait FragmentSetFilter {
    fn accepts(&self, fragments: &[&Fragment]) -> bool;
}

impl<F: Fn(&[&Fragment]) -> bool> FragmentSetFilter for F {
    fn accepts(&self, fragments: &[&Fragment]) -> bool {
        self(fragments)
    }
}

/// A predicate over an assembled record, evaluated after assembly.
pub trait RecordFilter {
    fn accepts(&self, record: &SeqRecord) -> bool;
}

impl<F: Fn(&SeqRecord) -> bool> RecordFilter for F {
    fn accepts(&self, record: &SeqRecord) -> bool {
        self(record)
    }
}

/// Short-circuit AND over a slice of fragment-set filters.
pub fn all_fragment_filters_pass(filters: &[Box<dyn FragmentSetFilter>], fragments: &[&Fragment]) -> bool {
    filters.iter().all(|f| f.accepts(fragments))
}

/// Short-circuit AND over a slice of record filters.
pub fn all_record_filters_pass(filters: &[Box<dyn RecordFilter>], record: &SeqRecord) -> bool {
    filters.iter().all(|f| f.accepts(record))
}

/// Rejects cycles containing any fragment that still carries an interior recognition site
/// for the assembly enzyme.
pub struct NoRestrictionSite {
    enzyme: EnzymeSpec,
}

impl NoRestrictionSite {
    pub fn new(enzyme: EnzymeSpec) -> Self {
        Self { enzyme }
    }
}

impl FragmentSetFilter for NoRestrictionSite {
    fn accepts(&self, fragments: &[&Fragment]) -> bool {
        fragments
            .iter()
            .all(|f| find_cuts(&f.seq, &self.enzyme).is_empty())
    }
}

/// Rejects assembled constructs below a minimum length.
pub struct MinLength {
    min: usize,
}

impl MinLength {
    pub fn new(min: usize) -> Self {
        Self { min }
    }
}

impl RecordFilter for MinLength {
    fn accepts(&self, record: &SeqRecord) -> bool {
        record.len() >= self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        enzyme::builtin,
        nucleotide::base_seq_from_str,
        overhang::Overhang,
    };

    fn fragment_with_seq(seq: &str) -> Fragment {
        Fragment {
            seq: base_seq_from_str(seq),
            left: Overhang::Blunt,
            right: Overhang::Blunt,
            is_reverse: false,
            source_id: "x".to_owned(),
        }
    }

    #[test]
    fn no_restriction_site_rejects_fragment_with_interior_site() {
        let filter = NoRestrictionSite::new(builtin::bsmbi());
        let clean = fragment_with_seq("AAAAAAAAAAAAAAAAAAAA");
        let dirty = fragment_with_seq("AACGTCTCNAAAATTTTGGGG");
        assert!(filter.accepts(&[&clean]));
        assert!(!filter.accepts(&[&clean, &dirty]));
    }

    #[test]
    fn min_length_rejects_short_records() {
        let filter = MinLength::new(10);
        assert!(!filter.accepts(&SeqRecord::new("x", "ACGT", true)));
        assert!(filter.accepts(&SeqRecord::new("x", "ACGTACGTACGT", true)));
    }

    #[test]
    fn empty_filter_list_passes_everything() {
        let filters: Vec<Box<dyn FragmentSetFilter>> = Vec::new();
        let frag = fragment_with_seq("ACGT");
        assert!(all_fragment_filters_pass(&filters, &[&frag]));
    }
}
