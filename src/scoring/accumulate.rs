/// Sum point changes in a canonical order.
///
/// Values are summed after sorting by IEEE 754 total order, so every
/// permutation of the same multiset produces a bit-identical result.
pub fn canonical_sum(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.iter().fold(0.0, |acc, v| acc + v)
}

/// Per-class split of point changes into merit and demerit buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tally {
    /// Sum of strictly positive changes
    pub plus: f64,
    /// Sum of strictly negative changes (never positive)
    pub minus: f64,
    /// Sum of changes in neither bucket: zeros and NaN
    pub other: f64,
}

impl Tally {
    pub fn from_changes(changes: &[f64]) -> Self {
        let mut plus = Vec::new();
        let mut minus = Vec::new();
        let mut other = Vec::new();

        for &change in changes {
            if change > 0.0 {
                plus.push(change);
            } else if change < 0.0 {
                minus.push(change);
            } else {
                other.push(change);
            }
        }

        Self {
            plus: canonical_sum(&plus),
            minus: canonical_sum(&minus),
            other: canonical_sum(&other),
        }
    }

    /// Total after applying this tally to `base_score`.
    ///
    /// `other` is zero unless a NaN slipped through ingestion, in which case
    /// it carries the NaN into the total.
    pub fn total(&self, base_score: f64) -> f64 {
        base_score + self.plus + self.minus + self.other
    }
}
