//! Result ranking.

/// Orders combination counts by count descending. The sort is stable, so
/// ties keep the first-encounter order the aggregator produced; the writer
/// relies on this ordering being reproducible run to run.
pub fn rank(counts: &[(String, usize)]) -> Vec<(String, usize)> {
    let mut ranked = counts.to_vec();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}
