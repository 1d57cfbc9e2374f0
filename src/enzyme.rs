//! Restriction enzyme recognition and cut-site search.
//!
//! Models the Type IIS geometry used by Golden-Gate-style enzymes (`BsmBI`, `BsaI`, `BbsI`):
//! the enzyme recognizes a site, then cuts a fixed number of bases downstream of it (the
//! "spacer"), leaving an overhang of a fixed length. Because the recognition site is not
//! palindromic, the enzyme can bind either strand, so cut search runs over the forward
//! pattern and its reverse complement both.

use crate::nucleotide::{Base, BaseSeq, Nucleotide::*, base_seq_complement};

/// A recognition-site symbol: an unambiguous base, or one of the IUPAC "either" codes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GeneralBase {
    A,
    T,
    C,
    G,
    /// Any
    N,
    /// A or T
    W,
    /// C or G
    S,
    /// Pyrimidines: C or T
    Y,
    /// Purines: A or G
    R,
    /// A or C
    M,
    /// G or T
    K,
}

impl GeneralBase {
    /// Which bases this symbol matches. `N` in the *sequence* never matches anything; that's
    /// enforced by the caller (`matches`), not by this table.
    fn nt_matches(&self) -> &'static [crate::nucleotide::Nucleotide] {
        match self {
            Self::A => &[A],
            Self::T => &[T],
            Self::C => &[C],
            Self::G => &[G],
            Self::N => &[A, C, T, G],
            Self::W => &[A, T],
            Self::S => &[C, G],
            Self::Y => &[C, T],
            Self::R => &[A, G],
            Self::M => &[A, C],
            Self::K => &[T, G],
        }
    }

    fn matches(&self, base: Base) -> bool {
        match base {
            Base::N => false,
            Base::Nt(nt) => self.nt_matches().contains(&nt),
        }
    }

    fn complement(&self) -> Self {
        match self {
            Self::A => Self::T,
            Self::T => Self::A,
            Self::C => Self::G,
            Self::G => Self::C,
            Self::N => Self::N,
            Self::W => Self::W,
            Self::S => Self::S,
            Self::Y => Self::R,
            Self::R => Self::Y,
            Self::M => Self::K,
            Self::K => Self::M,
        }
    }
}

/// A restriction enzyme's recognition pattern and Type IIS cut geometry.
#[derive(Clone, Debug)]
pub struct EnzymeSpec {
    pub name: String,
    /// 5′→3′ recognition pattern, on the strand it's conventionally written.
    pub site: Vec<GeneralBase>,
    /// Number of bases between the end of the site and the near (top-strand) cut.
    pub spacer: usize,
    /// Length of the overhang produced. `0` means a blunt cutter.
    pub overhang_len: usize,
}

impl EnzymeSpec {
    pub fn new(name: &str, site: &str, spacer: usize, overhang_len: usize) -> Self {
        Self {
            name: name.to_owned(),
            site: parse_site(site),
            spacer,
            overhang_len,
        }
    }

    fn site_rev_comp(&self) -> Vec<GeneralBase> {
        self.site.iter().rev().map(|s| s.complement()).collect()
    }
}

fn parse_site(s: &str) -> Vec<GeneralBase> {
    s.chars()
        .filter_map(|c| {
            Some(match c.to_ascii_uppercase() {
                'A' => GeneralBase::A,
                'T' => GeneralBase::T,
                'C' => GeneralBase::C,
                'G' => GeneralBase::G,
                'N' => GeneralBase::N,
                'W' => GeneralBase::W,
                'S' => GeneralBase::S,
                'Y' => GeneralBase::Y,
                'R' => GeneralBase::R,
                'M' => GeneralBase::M,
                'K' => GeneralBase::K,
                _ => return None,
            })
        })
        .collect()
}

/// A pair of cut positions in top-strand coordinates (0-based), always `cut_top <= cut_bottom`.
/// The region `[cut_top, cut_bottom)` is the overhang produced by this cut, over the *top*
/// strand's bases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CutSite {
    pub cut_top: usize,
    pub cut_bottom: usize,
}

fn pattern_matches_at(seq: &[Base], pos: usize, pattern: &[GeneralBase]) -> bool {
    if pos + pattern.len() > seq.len() {
        return false;
    }
    pattern
        .iter()
        .zip(&seq[pos..pos + pattern.len()])
        .all(|(sym, base)| sym.matches(*base))
}

/// Search a (linear) base sequence for every cut this enzyme would make, in ascending
/// `cut_top` order. Both the forward pattern (enzyme bound to the top strand) and its reverse
/// complement (enzyme bound to the bottom strand) are searched.
pub fn find_cuts(seq: &[Base], enzyme: &EnzymeSpec) -> Vec<CutSite> {
    let mut cuts = Vec::new();
    if enzyme.site.is_empty() {
        return cuts;
    }

    let rev_site = enzyme.site_rev_comp();

    for pos in 0..seq.len() {
        if pattern_matches_at(seq, pos, &enzyme.site) {
            let cut_top = pos + enzyme.site.len() + enzyme.spacer;
            let cut_bottom = cut_top + enzyme.overhang_len;
            if cut_bottom <= seq.len() {
                cuts.push(CutSite {
                    cut_top,
                    cut_bottom,
                });
            }
        }
        if pattern_matches_at(seq, pos, &rev_site) {
            // Enzyme bound to the bottom strand: cuts fall the spacer+overhang distance to
            // the *left* of the match.
            let far = enzyme.spacer + enzyme.overhang_len;
            if pos >= far {
                let cut_top = pos - far;
                let cut_bottom = cut_top + enzyme.overhang_len;
                cuts.push(CutSite {
                    cut_top,
                    cut_bottom,
                });
            }
        }
    }

    cuts.sort_by_key(|c| c.cut_top);
    cuts.dedup();
    cuts
}

/// Search a circular base sequence: matches may wrap across the origin. Implemented by
/// scanning a sequence padded with its own prefix, then reducing cut positions mod `len`.
pub fn find_cuts_circular(seq: &[Base], enzyme: &EnzymeSpec) -> Vec<CutSite> {
    let len = seq.len();
    if len == 0 {
        return Vec::new();
    }
    let pad = (enzyme.site.len() + enzyme.spacer + enzyme.overhang_len).min(len);
    let mut padded: BaseSeq = seq.to_vec();
    padded.extend_from_slice(&seq[..pad]);

    // A site match only counts if it *starts* within the original bounds; matches fully
    // inside the appended duplicate are the same site seen again. `cut_top` is
    // `match_pos + site.len() + spacer`, so bound it the same way.
    let match_pos_bound = len + enzyme.site.len() + enzyme.spacer;
    let mut cuts: Vec<CutSite> = find_cuts(&padded, enzyme)
        .into_iter()
        .filter(|c| c.cut_top < match_pos_bound)
        .map(|c| {
            let overhang_len = c.cut_bottom - c.cut_top;
            let cut_top = c.cut_top % len;
            CutSite {
                cut_top,
                // May exceed `len`, meaning the overhang itself straddles the origin;
                // `digest()` wraps when slicing.
                cut_bottom: cut_top + overhang_len,
            }
        })
        .collect();
    cuts.sort_by_key(|c| c.cut_top);
    cuts.dedup();
    cuts
}

/// A minimal built-in registry for a handful of common Type IIS enzymes, so the crate is
/// runnable and testable without a full enzyme-name lookup.
pub mod builtin {
    use super::EnzymeSpec;

    /// `CGTCTC(N1)^NNNN`. 4nt 5′ overhang, 1nt spacer.
    pub fn bsmbi() -> EnzymeSpec {
        EnzymeSpec::new("BsmBI", "CGTCTC", 1, 4)
    }

    /// `GGTCTC(N1)^NNNN`. 4nt 5′ overhang, 1nt spacer.
    pub fn bsai() -> EnzymeSpec {
        EnzymeSpec::new("BsaI", "GGTCTC", 1, 4)
    }

    /// `GAAGAC(N2)^NNNN`. 4nt 5′ overhang, 2nt spacer.
    pub fn bbsi() -> EnzymeSpec {
        EnzymeSpec::new("BbsI", "GAAGAC", 2, 4)
    }

    pub fn by_name(name: &str) -> Option<EnzymeSpec> {
        match name {
            "BsmBI" => Some(bsmbi()),
            "BsaI" => Some(bsai()),
            "BbsI" => Some(bbsi()),
            _ => None,
        }
    }
}
