//! Weighted Levenshtein distance.
//!
//! Insertions and deletions cost 1, substitutions cost 2. Dropped or added letters are
//! the usual noise in transliterated Hebrew, so they are cheaper than a wrong letter.

const INDEL_COST: u32 = 1;
const SUBSTITUTION_COST: u32 = 2;

/// Distance between two tokens, compared per `char`. Symmetric; zero only for equal input.
pub fn weighted_distance(a: &str, b: &str) -> u32 {
    if a == b {
        return 0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len() as u32 * INDEL_COST;
    }
    if b.is_empty() {
        return a.len() as u32 * INDEL_COST;
    }

    // Roll over the longer string so the rows hold min(|a|, |b|) + 1 cells.
    let (long, short) = if a.len() >= b.len() { (&a, &b) } else { (&b, &a) };

    let mut prev: Vec<u32> = (0..=short.len() as u32).map(|j| j * INDEL_COST).collect();
    let mut cur = vec![0u32; short.len() + 1];

    for (i, lc) in long.iter().enumerate() {
        cur[0] = (i as u32 + 1) * INDEL_COST;
        for (j, sc) in short.iter().enumerate() {
            let deletion = prev[j + 1] + INDEL_COST;
            let insertion = cur[j] + INDEL_COST;
            let edit = prev[j] + if lc == sc { 0 } else { SUBSTITUTION_COST };
            cur[j + 1] = deletion.min(insertion).min(edit);
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    prev[short.len()]
}
