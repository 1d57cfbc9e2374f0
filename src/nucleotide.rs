//! Nucleotide type, and the `Seq` (sequence) type built from it.

use std::{io, io::ErrorKind};

use bincode::{Decode, Encode};
use num_enum::TryFromPrimitive;
use Nucleotide::*;

/// A DNA nucleotide. The u8 repr is for use with a compact binary format.
/// This is the same nucleotide mapping as [.2bit format](http://genome.ucsc.edu/FAQ/FAQformat.html#format7).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Encode, Decode, TryFromPrimitive)]
#[repr(u8)]
pub enum Nucleotide {
    T = 0b00,
    C = 0b01,
    A = 0b10,
    G = 0b11,
}

impl Nucleotide {
    /// For interop with FASTA, GenBank, and SnapGene formats.
    pub fn from_u8(val: u8) -> io::Result<Self> {
        match val {
            b'A' | b'a' => Ok(A),
            b'T' | b't' => Ok(T),
            b'G' | b'g' => Ok(G),
            b'C' | b'c' => Ok(C),
            _ => Err(io::Error::new(ErrorKind::InvalidData, "Invalid nucleotide")),
        }
    }

    pub fn to_u8_upper(&self) -> u8 {
        match self {
            A => b'A',
            T => b'T',
            G => b'G',
            C => b'C',
        }
    }

    pub fn to_str_upper(&self) -> String {
        match self {
            A => "A".to_owned(),
            T => "T".to_owned(),
            C => "C".to_owned(),
            G => "G".to_owned(),
        }
    }

    pub fn complement(self) -> Self {
        match self {
            A => T,
            T => A,
            G => C,
            C => G,
        }
    }
}

/// Index 0: 5' end.
pub type Seq = Vec<Nucleotide>;

/// Reverse direction, and swap C for G, A for T.
pub fn seq_complement(seq: &[Nucleotide]) -> Seq {
    let mut result = seq.to_vec();
    result.reverse();

    for nt in &mut result {
        *nt = nt.complement();
    }

    result
}

/// Create a nucleotide sequence from a string. Case insensitive. Unrecognized characters
/// (e.g. `N`) are dropped; callers that need to preserve ambiguity codes should keep the
/// original string around (see `record::SeqRecord`, which stores the raw string alongside
/// the parsed `Seq`).
pub fn seq_from_str(str: &str) -> Seq {
    let mut result = Vec::new();

    for char in str.to_lowercase().chars() {
        match char {
            'a' => result.push(A),
            't' => result.push(T),
            'c' => result.push(C),
            'g' => result.push(G),
            _ => (),
        };
    }

    result
}

/// Convert a nucleotide sequence to string.
pub fn seq_to_str_upper(seq: &[Nucleotide]) -> String {
    let mut result = String::new();

    for nt in seq {
        result.push_str(&nt.to_str_upper());
    }

    result
}

/// A base that may be an unambiguous nucleotide, or the `N` ("any") ambiguity code.
///
/// Record sequences are defined over `{A,C,G,T,N}`; `N` never matches anything during
/// overhang comparisons, so it can't be folded into `Nucleotide` without breaking that type's
/// compact 2-bit encoding. Digestion, fragments, and overhangs work over `Base`/`BaseSeq`
/// instead; `Nucleotide`/`Seq` stay as the compact, `N`-free representation used for
/// serialization and anything that assumes a fully-determined sequence.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Base {
    Nt(Nucleotide),
    N,
}

pub type BaseSeq = Vec<Base>;

impl Base {
    pub fn complement(self) -> Self {
        match self {
            Self::Nt(nt) => Self::Nt(nt.complement()),
            Self::N => Self::N,
        }
    }

    pub fn to_char_upper(self) -> char {
        match self {
            Self::Nt(nt) => nt.to_u8_upper() as char,
            Self::N => 'N',
        }
    }
}

/// Create a `BaseSeq` from a string, preserving `N` bases. Case insensitive; any other
/// character is dropped.
pub fn base_seq_from_str(str: &str) -> BaseSeq {
    let mut result = Vec::new();
    for char in str.to_uppercase().chars() {
        match char {
            'A' => result.push(Base::Nt(A)),
            'T' => result.push(Base::Nt(T)),
            'C' => result.push(Base::Nt(C)),
            'G' => result.push(Base::Nt(G)),
            'N' => result.push(Base::N),
            _ => (),
        }
    }
    result
}

pub fn base_seq_to_str(seq: &[Base]) -> String {
    seq.iter().map(|b| b.to_char_upper()).collect()
}

/// Reverse direction, and complement every base. `N` stays `N`.
pub fn base_seq_complement(seq: &[Base]) -> BaseSeq {
    let mut result: BaseSeq = seq.to_vec();
    result.reverse();
    for b in &mut result {
        *b = b.complement();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complement_is_involutive() {
        for nt in [A, T, C, G] {
            assert_eq!(nt.complement().complement(), nt);
        }
    }

    #[test]
    fn seq_complement_reverses_and_complements() {
        let seq = seq_from_str("ACGT");
        let rc = seq_complement(&seq);
        assert_eq!(seq_to_str_upper(&rc), "ACGT"); // palindromic
        let seq = seq_from_str("AATTCC");
        let rc = seq_complement(&seq);
        assert_eq!(seq_to_str_upper(&rc), "GGAATT");
    }

    #[test]
    fn round_trips_through_str() {
        let s = "ACGTACGT";
        let seq = seq_from_str(s);
        assert_eq!(seq_to_str_upper(&seq), s);
    }

    #[test]
    fn base_seq_preserves_n() {
        let seq = base_seq_from_str("ACGNT");
        assert_eq!(base_seq_to_str(&seq), "ACGNT");
        let rc = base_seq_complement(&seq);
        assert_eq!(base_seq_to_str(&rc), "ANCGT");
    }
}
