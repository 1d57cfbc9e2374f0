//! The sticky-end overhang model.
//!
//! An overhang is either blunt, or a typed single-stranded extension. Two overhangs ligate
//! iff they are the same kind of protrusion (same strand, opposite sign) and their sequences
//! are reverse complements of one another, with `N` matching nothing.

use crate::nucleotide::{Base, BaseSeq, base_seq_complement, base_seq_to_str};

/// Which strand the overhang protrudes from, relative to the fragment end it's attached to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OverhangStrand {
    Five,
    Three,
}

/// Whether the single-stranded extension is read off the top or bottom strand.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OverhangSign {
    Top,
    Bottom,
}

/// A 5′/3′ sticky end, or the absence of one (a blunt end).
#[derive(Clone, PartialEq, Debug)]
pub enum Overhang {
    Blunt,
    Sticky {
        seq: BaseSeq,
        strand: OverhangStrand,
        sign: OverhangSign,
    },
}

impl Overhang {
    pub fn blunt() -> Self {
        Self::Blunt
    }

    pub fn sticky(seq: BaseSeq, strand: OverhangStrand, sign: OverhangSign) -> Self {
        if seq.is_empty() {
            Self::Blunt
        } else {
            Self::Sticky { seq, strand, sign }
        }
    }

    pub fn is_blunt(&self) -> bool {
        matches!(self, Self::Blunt)
    }

    /// Swaps strand/sign and reverse-complements the string; preserves blunt.
    pub fn reverse_complement(&self) -> Self {
        match self {
            Self::Blunt => Self::Blunt,
            Self::Sticky { seq, strand, sign } => Self::Sticky {
                seq: base_seq_complement(seq),
                strand: *strand,
                sign: match sign {
                    OverhangSign::Top => OverhangSign::Bottom,
                    OverhangSign::Bottom => OverhangSign::Top,
                },
            },
        }
    }

    /// A depiction used in canonical keys. Blunt is the empty string; a sticky end is prefixed
    /// with strand/sign sigils so visually similar but semantically distinct overhangs never
    /// collide in the hash.
    pub fn as_key(&self) -> String {
        match self {
            Self::Blunt => String::new(),
            Self::Sticky { seq, strand, sign } => {
                let strand_sigil = match strand {
                    OverhangStrand::Five => '5',
                    OverhangStrand::Three => '3',
                };
                let sign_sigil = match sign {
                    OverhangSign::Top => '+',
                    OverhangSign::Bottom => '-',
                };
                format!("{strand_sigil}{sign_sigil}{}", base_seq_to_str(seq))
            }
        }
    }
}

/// True iff `a` and `b` ligate: blunt pairs only with blunt; sticky ends pair only when they
/// protrude from the same strand position, with opposite top/bottom sign, and their sequences
/// are reverse complements of each other with no `N` on either side.
pub fn complement_of(a: &Overhang, b: &Overhang) -> bool {
    match (a, b) {
        (Overhang::Blunt, Overhang::Blunt) => true,
        (Overhang::Blunt, Overhang::Sticky { .. }) | (Overhang::Sticky { .. }, Overhang::Blunt) => {
            false
        }
        (
            Overhang::Sticky {
                seq: seq_a,
                strand: strand_a,
                sign: sign_a,
            },
            Overhang::Sticky {
                seq: seq_b,
                strand: strand_b,
                sign: sign_b,
            },
        ) => {
            if strand_a != strand_b || sign_a == sign_b {
                return false;
            }
            if seq_a.len() != seq_b.len() {
                return false;
            }
            if seq_a.iter().any(|b| matches!(b, Base::N)) || seq_b.iter().any(|b| matches!(b, Base::N)) {
                return false;
            }
            base_seq_complement(seq_a) == *seq_b
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nucleotide::base_seq_from_str;

    fn sticky(s: &str, strand: OverhangStrand, sign: OverhangSign) -> Overhang {
        Overhang::sticky(base_seq_from_str(s), strand, sign)
    }

    #[test]
    fn blunt_only_matches_blunt() {
        assert!(complement_of(&Overhang::Blunt, &Overhang::Blunt));
        let a = sticky("AATT", OverhangStrand::Five, OverhangSign::Top);
        assert!(!complement_of(&Overhang::Blunt, &a));
        assert!(!complement_of(&a, &Overhang::Blunt));
    }

    #[test]
    fn reverse_complementary_sticky_ends_match() {
        let a = sticky("AATT", OverhangStrand::Five, OverhangSign::Top);
        let b = sticky("AATT", OverhangStrand::Five, OverhangSign::Bottom);
        assert!(complement_of(&a, &b));
        assert!(complement_of(&b, &a));
    }

    #[test]
    fn mismatched_strand_or_sign_does_not_match() {
        let a = sticky("AATT", OverhangStrand::Five, OverhangSign::Top);
        let wrong_strand = sticky("AATT", OverhangStrand::Three, OverhangSign::Bottom);
        assert!(!complement_of(&a, &wrong_strand));
        let same_sign = sticky("AATT", OverhangStrand::Five, OverhangSign::Top);
        assert!(!complement_of(&a, &same_sign));
    }

    #[test]
    fn non_reverse_complementary_sequences_do_not_match() {
        let a = sticky("AATT", OverhangStrand::Five, OverhangSign::Top);
        let b = sticky("GGCC", OverhangStrand::Five, OverhangSign::Bottom);
        assert!(!complement_of(&a, &b));
    }

    #[test]
    fn n_never_matches() {
        let a = sticky("AANT", OverhangStrand::Five, OverhangSign::Top);
        let b = sticky("ANTT", OverhangStrand::Five, OverhangSign::Bottom);
        assert!(!complement_of(&a, &b));
    }

    #[test]
    fn reverse_complement_is_involutive() {
        let a = sticky("AATT", OverhangStrand::Five, OverhangSign::Top);
        assert_eq!(a.reverse_complement().reverse_complement(), a);
    }
}
