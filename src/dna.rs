// dna.rs - 序列工具函数

/// Valid DNA bases, uppercase.
pub const DNA_BASES: &[u8] = b"ACGT";

/// Overlap length used when the caller has no preference.
pub const DEFAULT_MINIMUM_OVERLAP: usize = 2;

/// Whether `sequence` is non-empty and every character, uppercased, is in
/// [`DNA_BASES`]. Does not normalize; use [`canonicalize`] for that.
pub fn is_valid_sequence(sequence: &str) -> bool {
    !sequence.is_empty()
        && sequence
            .bytes()
            .all(|b| DNA_BASES.contains(&b.to_ascii_uppercase()))
}

/// Canonical (uppercase) form used for storage and comparison.
pub fn canonicalize(sequence: &str) -> String {
    sequence.to_ascii_uppercase()
}

/// Find a suffix of `sample` that equals a prefix of `sequence`.
///
/// Candidate lengths grow from `minimum_overlap` up to the length of the
/// shorter input, and the first hit is returned. This is the *shortest*
/// qualifying overlap, not the longest: with sample `AGAGA` and sequence
/// `AGAGATT` the result is `AGA`, not `AGAGA`. Callers that need the maximal
/// overlap must search for it themselves.
///
/// A `minimum_overlap` of 0 behaves like 1. Empty inputs never overlap.
pub fn overlap_prefix<'a>(
    sample: &str,
    sequence: &'a str,
    minimum_overlap: usize,
) -> Option<&'a str> {
    if sample.is_empty() || sequence.is_empty() {
        return None;
    }

    let longest = sample.len().min(sequence.len());
    (minimum_overlap.max(1)..=longest)
        .filter_map(|len| sequence.get(..len))
        .find(|candidate| sample.ends_with(candidate))
}

/// Find a prefix of `sample` that equals a suffix of `sequence`.
///
/// Mirror image of [`overlap_prefix`], with the same shortest-match rule.
pub fn overlap_suffix<'a>(
    sample: &str,
    sequence: &'a str,
    minimum_overlap: usize,
) -> Option<&'a str> {
    if sample.is_empty() || sequence.is_empty() {
        return None;
    }

    let longest = sample.len().min(sequence.len());
    (minimum_overlap.max(1)..=longest)
        .filter_map(|len| sequence.get(sequence.len() - len..))
        .find(|candidate| sample.starts_with(candidate))
}
