//! Cut a record into sticky-end fragments by one or more restriction enzymes.

use crate::{
    enzyme::{CutSite, EnzymeSpec, find_cuts, find_cuts_circular},
    error::AssemblyError,
    fragment::Fragment,
    nucleotide::{Base, BaseSeq, base_seq_complement},
    overhang::{Overhang, OverhangSign, OverhangStrand},
    record::SeqRecord,
};

/// A slice of `seq` from `start` to `end` (exclusive), wrapping around the end of `seq` if
/// `end > seq.len()`, used for spans that straddle a circular record's origin.
fn slice_wrapping(seq: &[Base], start: usize, end: usize) -> BaseSeq {
    if end <= seq.len() {
        seq[start..end].to_vec()
    } else {
        let mut result = seq[start..].to_vec();
        result.extend_from_slice(&seq[..end - seq.len()]);
        result
    }
}

/// The pair of overhangs produced at one cut: the left-hand fragment's right end, and the
/// right-hand fragment's left end.
fn overhangs_for_cut(seq: &[Base], cut: &CutSite) -> (Overhang, Overhang) {
    let protruding = slice_wrapping(seq, cut.cut_top, cut.cut_bottom);
    let left_fragment_right = Overhang::sticky(
        base_seq_complement(&protruding),
        OverhangStrand::Five,
        OverhangSign::Bottom,
    );
    let right_fragment_left = Overhang::sticky(protruding, OverhangStrand::Five, OverhangSign::Top);
    (left_fragment_right, right_fragment_left)
}

/// Cut `record` with `enzymes`, in enzyme order, merging and sorting all resulting cut sites.
pub fn digest(record: &SeqRecord, enzymes: &[EnzymeSpec]) -> Result<Vec<Fragment>, AssemblyError> {
    if enzymes.is_empty() {
        return Err(AssemblyError::DigestFailure {
            message: "no enzymes supplied".to_owned(),
        });
    }

    let seq = record.seq();
    let mut cuts: Vec<CutSite> = enzymes
        .iter()
        .flat_map(|e| {
            if record.is_circular() {
                find_cuts_circular(&seq, e)
            } else {
                find_cuts(&seq, e)
            }
        })
        .collect();
    cuts.sort_by_key(|c| c.cut_top);
    cuts.dedup();

    log::debug!(
        "digest: record {:?} ({} bp, {}) -> {} cut site(s)",
        record.id,
        seq.len(),
        if record.is_circular() { "circular" } else { "linear" },
        cuts.len()
    );

    if cuts.is_empty() {
        return Ok(if record.is_circular() {
            // Uncut circular input contributes no fragments: it's inert.
            Vec::new()
        } else {
            vec![Fragment {
                seq,
                left: Overhang::Blunt,
                right: Overhang::Blunt,
                is_reverse: false,
                source_id: record.id.clone(),
            }]
        });
    }

    let mut fragments = Vec::with_capacity(cuts.len());
    let source_id = record.id.clone();

    if record.is_circular() {
        // Each cut pairs with the next one around the ring; the fragment between them is
        // the interval `[this.cut_bottom, next.cut_top)`, wrapping past the origin when the
        // next cut comes before this one in sequence order.
        for i in 0..cuts.len() {
            let this_cut = &cuts[i];
            let next_cut = &cuts[(i + 1) % cuts.len()];
            let (_, left) = overhangs_for_cut(&seq, this_cut);
            let (right, _) = overhangs_for_cut(&seq, next_cut);
            let core_end = if next_cut.cut_top >= this_cut.cut_bottom {
                next_cut.cut_top
            } else {
                next_cut.cut_top + seq.len()
            };
            fragments.push(Fragment {
                seq: slice_wrapping(&seq, this_cut.cut_bottom, core_end),
                left,
                right,
                is_reverse: false,
                source_id: source_id.clone(),
            });
        }
    } else {
        // Outermost fragments carry blunt ends on their outer sides.
        let (first_right, _) = overhangs_for_cut(&seq, &cuts[0]);
        fragments.push(Fragment {
            seq: seq[..cuts[0].cut_top].to_vec(),
            left: Overhang::Blunt,
            right: first_right,
            is_reverse: false,
            source_id: source_id.clone(),
        });

        for window in cuts.windows(2) {
            let (_, left) = overhangs_for_cut(&seq, &window[0]);
            let (right, _) = overhangs_for_cut(&seq, &window[1]);
            fragments.push(Fragment {
                seq: seq[window[0].cut_bottom..window[1].cut_top].to_vec(),
                left,
                right,
                is_reverse: false,
                source_id: source_id.clone(),
            });
        }

        let (_, last_left) = overhangs_for_cut(&seq, cuts.last().unwrap());
        fragments.push(Fragment {
            seq: seq[cuts.last().unwrap().cut_bottom..].to_vec(),
            left: last_left,
            right: Overhang::Blunt,
            is_reverse: false,
            source_id,
        });
    }

    Ok(fragments)
}
