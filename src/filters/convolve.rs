//! Same-length discrete convolution.

/// Convolves `input` with `weights`, keeping the central `input.len()` samples.
///
/// Output index `i` is aligned with tap `(weights.len() - 1) / 2`, and samples
/// outside `input` count as zero, so the edges are attenuated by whatever part
/// of the kernel hangs over the boundary.
///
/// An empty `weights` slice produces all zeros.
pub fn convolve_same(input: &[f64], weights: &[f64]) -> Vec<f64> {
    let n = input.len();
    let m = weights.len();
    if m == 0 {
        return vec![0.0; n];
    }
    let offset = (m - 1) / 2;

    (0..n)
        .map(|i| {
            // y[i] = Σ_k x[i + offset - k] * w[k], over k with a valid x index
            let centre = i + offset;
            let k_min = centre.saturating_sub(n - 1);
            let k_max = centre.min(m - 1);
            (k_min..=k_max)
                .map(|k| input[centre - k] * weights[k])
                .sum()
        })
        .collect()
}
