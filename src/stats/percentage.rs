/// Share of `part` in `whole`, in percent.
///
/// Returns `None` when `whole` is zero. The value is not rounded; callers
/// pick their own display precision.
pub fn percentage(part: usize, whole: usize) -> Option<f64> {
    if whole == 0 {
        None
    } else {
        Some((part as f64 / whole as f64) * 100.0)
    }
}
