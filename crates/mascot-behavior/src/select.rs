//! Weighted random choice.

/// Sum of all positive weights.
pub fn total_weight<T>(candidates: &[(T, f64)]) -> f64 {
    candidates.iter().map(|(_, w)| *w).filter(|w| *w > 0.0).sum()
}

/// Pick from `candidates` with probability proportional to weight.
///
/// `draw` is a value in `[0, total_weight)`.  Candidates are walked in
/// order, subtracting each weight from the draw; the first one that drives
/// it negative wins.  Non-positive (and NaN) weights are never chosen.  A draw that
/// floating-point accumulation pushes past the end lands on the last
/// positive-weight candidate, so every in-range draw selects exactly one.
///
/// Returns `None` only when no candidate has positive weight.
pub fn select<T>(candidates: &[(T, f64)], draw: f64) -> Option<&T> {
    let mut remaining = draw;
    let mut last = None;
    for (candidate, weight) in candidates {
        if weight.is_nan() || *weight <= 0.0 {
            continue;
        }
        last = Some(candidate);
        remaining -= weight;
        if remaining < 0.0 {
            return Some(candidate);
        }
    }
    last
}
