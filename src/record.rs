//! Abstract DNA sequence records. GenBank/FASTA I/O is out of scope; this module only
//! defines the in-memory shape the engine consumes and produces.

use serde::{Deserialize, Serialize};

use crate::nucleotide::{BaseSeq, base_seq_from_str};

/// A feature annotation on a record or fragment: a type, a span, and free-form qualifiers.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Annotation {
    pub kind: AnnotationKind,
    pub start: usize,
    pub end: usize,
    pub qualifiers: Vec<(String, String)>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum AnnotationKind {
    /// Fragment provenance: which input record this span came from.
    Source { source_id: String },
    /// A junction span that used to be a sticky overhang.
    Homology,
    Misc(String),
}

/// A logical DNA record: identifier, sequence, topology, and annotations. Consumed read-only
/// by the engine; it never mutates an input record.
///
/// The sequence is stored as its raw string (over `{A,C,G,T,N}`) rather than a
/// pre-parsed `BaseSeq`, so the record round-trips through `serde` without a custom impl;
/// `seq()` parses on access.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SeqRecord {
    pub id: String,
    seq_str: String,
    /// `false` (default) means circular.
    pub linear: bool,
    pub annotations: Vec<Annotation>,
}

impl SeqRecord {
    pub fn new(id: impl Into<String>, sequence: &str, linear: bool) -> Self {
        Self {
            id: id.into(),
            seq_str: sequence.to_uppercase(),
            linear,
            annotations: Vec::new(),
        }
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn seq(&self) -> BaseSeq {
        base_seq_from_str(&self.seq_str)
    }

    pub fn seq_str(&self) -> &str {
        &self.seq_str
    }

    pub fn len(&self) -> usize {
        self.seq_str.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq_str.is_empty()
    }

    pub fn is_circular(&self) -> bool {
        !self.linear
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_parses_sequence_and_defaults_to_circular() {
        let rec = SeqRecord::new("partA", "acgtACGT", true);
        assert_eq!(rec.seq_str(), "ACGTACGT");
        assert_eq!(rec.len(), 8);
        assert!(rec.linear);
        assert!(!rec.is_circular());
    }

    #[test]
    fn default_topology_is_circular_when_constructed_false() {
        let rec = SeqRecord::new("plasmid", "ACGT", false);
        assert!(rec.is_circular());
    }

    #[test]
    fn n_bases_survive_round_trip() {
        let rec = SeqRecord::new("withN", "ACGNT", true);
        assert_eq!(rec.seq_str(), "ACGNT");
        assert_eq!(rec.seq().len(), 5);
    }
}
