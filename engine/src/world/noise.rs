//! Procedural Elevation Noise
//!
//! Seeded value noise with fractal octave summation. Used to synthesize
//! height fields for the headless driver and for tests that need bumpy,
//! deterministic terrain.

/// Fractal value-noise generator.
///
/// `sample` returns values in `[0, 1]`; scale the result to get elevations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractalNoise {
    /// Offsets the hash lattice so different seeds give unrelated terrain.
    pub seed: f32,
    /// Number of summed octaves (at least 1 is used).
    pub octaves: u32,
    /// Frequency multiplier per octave.
    pub lacunarity: f32,
    /// Amplitude multiplier per octave.
    pub gain: f32,
}

impl Default for FractalNoise {
    fn default() -> Self {
        Self {
            seed: 0.0,
            octaves: 4,
            lacunarity: 2.0,
            gain: 0.5,
        }
    }
}

impl FractalNoise {
    pub fn with_seed(seed: f32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Sum `octaves` layers of value noise, normalized to `[0, 1]`.
    pub fn sample(&self, x: f32, z: f32) -> f32 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut weight = 0.0;

        for _ in 0..self.octaves.max(1) {
            total += amplitude * self.value(x * frequency, z * frequency);
            weight += amplitude;
            amplitude *= self.gain;
            frequency *= self.lacunarity;
        }

        if weight > 0.0 { total / weight } else { 0.0 }
    }

    /// Single octave of smoothed lattice noise.
    fn value(&self, x: f32, z: f32) -> f32 {
        let cell_x = x.floor();
        let cell_z = z.floor();
        let tx = fade(x - cell_x);
        let tz = fade(z - cell_z);

        let a = self.hash(cell_x, cell_z);
        let b = self.hash(cell_x + 1.0, cell_z);
        let c = self.hash(cell_x, cell_z + 1.0);
        let d = self.hash(cell_x + 1.0, cell_z + 1.0);

        let near = a + (b - a) * tx;
        let far = c + (d - c) * tx;
        near + (far - near) * tz
    }

    /// Pseudo-random value in `[0, 1)` for a lattice point.
    fn hash(&self, x: f32, z: f32) -> f32 {
        let phase = (x + self.seed * 17.31) * 127.1 + (z - self.seed * 9.77) * 311.7;
        let n = phase.sin() * 43758.547;
        n - n.floor()
    }
}

/// Cubic smoothstep on `[0, 1]`.
#[inline]
fn fade(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_in_unit_range() {
        let noise = FractalNoise::default();
        for i in 0..200 {
            let x = i as f32 * 0.37 - 30.0;
            let z = i as f32 * -0.53 + 12.0;
            let v = noise.sample(x, z);
            assert!((0.0..=1.0).contains(&v), "sample {v} out of range");
        }
    }

    #[test]
    fn test_deterministic() {
        let noise = FractalNoise::with_seed(3.0);
        assert_eq!(noise.sample(1.25, -7.5), noise.sample(1.25, -7.5));
    }

    #[test]
    fn test_seed_changes_output() {
        let a = FractalNoise::with_seed(1.0).sample(0.3, 0.7);
        let b = FractalNoise::with_seed(2.0).sample(0.3, 0.7);
        assert!((a - b).abs() > 1e-6);
    }

    #[test]
    fn test_continuous_across_cells() {
        let noise = FractalNoise {
            octaves: 1,
            ..FractalNoise::default()
        };
        let left = noise.sample(0.9999, 0.5);
        let right = noise.sample(1.0001, 0.5);
        assert!((left - right).abs() < 1e-2);
    }

    #[test]
    fn test_fade_endpoints() {
        assert_eq!(fade(0.0), 0.0);
        assert_eq!(fade(1.0), 1.0);
        assert!((fade(0.5) - 0.5).abs() < 1e-6);
    }
}
