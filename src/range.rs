//! Ratio-range arithmetic over [0, 1] edge parameters.

use crate::types::EPSILON;

/// A `[start, end]` interval of edge ratios, `start <= end`
pub type RatioRange = [f64; 2];

/// Remove every interval of `subtract` from every interval of `from`.
///
/// Overlapping intervals split their minuend into the pieces on either
/// side; pieces shorter than `EPSILON` are dropped. Output keeps the order
/// of `from`.
pub fn subtract_range_set(from: &[RatioRange], subtract: &[RatioRange]) -> Vec<RatioRange> {
    let mut remaining: Vec<RatioRange> = from.to_vec();
    for &[cut_start, cut_end] in subtract {
        remaining = remaining
            .into_iter()
            .flat_map(|[start, end]| {
                if cut_end <= start || cut_start >= end {
                    return vec![[start, end]];
                }
                let mut pieces = Vec::with_capacity(2);
                if cut_start - start > EPSILON {
                    pieces.push([start, cut_start]);
                }
                if end - cut_end > EPSILON {
                    pieces.push([cut_end, end]);
                }
                pieces
            })
            .collect();
    }
    remaining
}

/// Complement of sorted, disjoint `ranges` within [0, 1]
pub fn complement(ranges: &[RatioRange]) -> Vec<RatioRange> {
    subtract_range_set(&[[0.0, 1.0]], ranges)
}

/// Total covered length
pub fn total_length(ranges: &[RatioRange]) -> f64 {
    ranges.iter().map(|[start, end]| end - start).sum()
}

/// Whether two range sets share more than a boundary point
pub fn overlaps(a: &[RatioRange], b: &[RatioRange]) -> bool {
    a.iter().any(|[a0, a1]| {
        b.iter()
            .any(|[b0, b1]| a0.max(*b0) < a1.min(*b1) - EPSILON)
    })
}
