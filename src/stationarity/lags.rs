/// Recommended lag truncation for a sample of `sample_size` observations
/// (Schwert's rule): `floor(12 * (n / 100)^(1/4))`.
///
/// Only used to pre-fill the manual lag input; the result is truncated
/// towards zero, so `recommend(400)` is 16 rather than 17.
pub fn recommend(sample_size: usize) -> usize {
    (12.0 * (sample_size as f64 / 100.0).powf(0.25)).floor() as usize
}
