//! Synthetic series for demo files and tests.

/// Minimal deterministic PRNG (xoshiro256**)
pub struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    pub fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform draw in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    pub fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Independent Gaussian noise around a fixed mean (stationary).
pub fn white_noise(n: usize, mean: f64, std_dev: f64, rng: &mut SimpleRng) -> Vec<f64> {
    (0..n).map(|_| rng.gauss(mean, std_dev)).collect()
}

/// Cumulative sum of Gaussian steps starting at `start` (unit root).
pub fn random_walk(n: usize, start: f64, step_std: f64, rng: &mut SimpleRng) -> Vec<f64> {
    let mut level = start;
    (0..n)
        .map(|_| {
            level += rng.gauss(0.0, step_std);
            level
        })
        .collect()
}

/// Deterministic linear trend plus Gaussian noise (trend stationary).
pub fn noisy_trend(
    n: usize,
    intercept: f64,
    slope: f64,
    std_dev: f64,
    rng: &mut SimpleRng,
) -> Vec<f64> {
    (0..n)
        .map(|t| intercept + slope * t as f64 + rng.gauss(0.0, std_dev))
        .collect()
}
