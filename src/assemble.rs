//! Turn an ordered chain of fragments into a single assembled record.
//!
//! A fragment's own `seq` holds only its core bases; the bases shared by a ligated junction
//! live in the overhang structs and are spliced in once per junction, not duplicated on both
//! sides. Whichever of the two overhangs at a junction carries `OverhangSign::Top` holds the
//! literal top-strand bases to insert; its partner holds the same bases' complement, read from
//! the other strand.

use crate::{
    error::AssemblyError,
    fragment::Fragment,
    nucleotide::{BaseSeq, base_seq_to_str},
    overhang::{Overhang, OverhangSign, complement_of},
    record::{Annotation, AnnotationKind, SeqRecord},
};

fn junction_insert(a_right: &Overhang, b_left: &Overhang) -> Result<BaseSeq, AssemblyError> {
    if !complement_of(a_right, b_left) {
        return Err(AssemblyError::JunctionMismatch {
            message: format!(
                "fragment junction does not ligate: {} / {}",
                a_right.as_key(),
                b_left.as_key()
            ),
        });
    }
    match (a_right, b_left) {
        (Overhang::Blunt, Overhang::Blunt) => Ok(Vec::new()),
        (Overhang::Sticky { seq, sign: OverhangSign::Top, .. }, _) => Ok(seq.clone()),
        (_, Overhang::Sticky { seq, sign: OverhangSign::Top, .. }) => Ok(seq.clone()),
        _ => Ok(Vec::new()),
    }
}

/// Concatenates `fragments` in order, splicing each junction's shared overhang bases in once,
/// and closes the chain back to the first fragment when `circularize` is set. Every junction
/// (including the closing one, if circularizing) must actually ligate, or this returns
/// `JunctionMismatch`. Each fragment contributes one `Source` annotation at its offset in the
/// assembled sequence; when `annotate_homologies` is set, each non-blunt junction also gets a
/// `Homology` annotation over the spliced-in span.
pub fn assemble(
    id: &str,
    fragments: &[&Fragment],
    circularize: bool,
    annotate_homologies: bool,
) -> Result<SeqRecord, AssemblyError> {
    if fragments.is_empty() {
        return Err(AssemblyError::EmptyAssembly);
    }

    let n = fragments.len();
    let mut seq: BaseSeq = Vec::new();
    let mut annotations = Vec::new();

    for (i, frag) in fragments.iter().enumerate() {
        let start = seq.len();
        seq.extend_from_slice(&frag.seq);
        let end = seq.len();
        annotations.push(Annotation {
            kind: AnnotationKind::Source {
                source_id: frag.source_id.clone(),
            },
            start,
            end,
            qualifiers: Vec::new(),
        });

        let has_next = circularize || i + 1 < n;
        if has_next {
            let next = fragments[(i + 1) % n];
            let junction_start = seq.len();
            let inserted = junction_insert(&frag.right, &next.left)?;
            let inserted_is_empty = inserted.is_empty();
            seq.extend_from_slice(&inserted);
            if annotate_homologies && !inserted_is_empty {
                annotations.push(Annotation {
                    kind: AnnotationKind::Homology,
                    start: junction_start,
                    end: seq.len(),
                    qualifiers: Vec::new(),
                });
            }
        }
    }

    log::debug!(
        "assembled {} fragment(s) into {} bp ({})",
        n,
        seq.len(),
        if circularize { "circular" } else { "linear" }
    );

    Ok(SeqRecord::new(id, &base_seq_to_str(&seq), !circularize).with_annotations(annotations))
}

/// Concatenates a linear chain of fragments into a single new fragment, the way the adapter
/// orchestrator combines a triplet's adapted parts back into one fragment to feed the
/// top-level combinatorial mix. Unlike [`assemble`], the outer ends are not
/// blunted or closed into a circle: the result's `left`/`right` overhangs are the chain's own
/// outer overhangs, so the returned fragment can go on ligating.
pub fn assemble_fragment_chain(
    source_id: &str,
    fragments: &[&Fragment],
    is_reverse: bool,
) -> Result<Fragment, AssemblyError> {
    if fragments.is_empty() {
        return Err(AssemblyError::EmptyAssembly);
    }

    let mut seq: BaseSeq = Vec::new();
    for (i, frag) in fragments.iter().enumerate() {
        seq.extend_from_slice(&frag.seq);
        if i + 1 < fragments.len() {
            let next = fragments[i + 1];
            let inserted = junction_insert(&frag.right, &next.left)?;
            seq.extend_from_slice(&inserted);
        }
    }

    Ok(Fragment {
        seq,
        left: fragments[0].left.clone(),
        right: fragments[fragments.len() - 1].right.clone(),
        is_reverse,
        source_id: source_id.to_owned(),
    })
}
