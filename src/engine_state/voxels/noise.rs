//! # Noise Field Module
//!
//! Seeded 3D gradient noise used by terrain generation.
//!
//! The field is a pure function of its seed and the sample coordinates: two
//! fields built from the same seed return bit-identical values, in the same
//! process or a later one. This is what lets persisted worlds store only the
//! seed and regenerate untouched terrain on demand.

/// Number of distinct entries in the permutation table.
const PERMUTATION_SIZE: usize = 256;

/// A deterministic 3D gradient noise generator.
///
/// Construction shuffles the identity permutation `0..256` with a
/// seed-derived generator and duplicates it to 512 entries so corner hashing
/// never needs to wrap.
#[derive(Clone, Debug)]
pub struct NoiseField {
    seed: i64,
    permutation: [usize; PERMUTATION_SIZE * 2],
}

impl NoiseField {
    /// Creates a new noise field for the given seed.
    pub fn new(seed: i64) -> Self {
        let mut table: Vec<usize> = (0..PERMUTATION_SIZE).collect();
        let mut rng = fastrand::Rng::with_seed(seed as u64);
        rng.shuffle(&mut table);

        let mut permutation = [0; PERMUTATION_SIZE * 2];
        for (i, value) in table.iter().enumerate() {
            permutation[i] = *value;
            permutation[PERMUTATION_SIZE + i] = *value;
        }

        NoiseField { seed, permutation }
    }

    /// The seed this field was built from.
    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// Samples the noise field at a point.
    ///
    /// # Returns
    /// A value in `[-1, 1]`. Integer lattice points always sample to `0`.
    pub fn get_noise(&self, x: f32, y: f32, z: f32) -> f32 {
        let p = &self.permutation;

        let (fx, fy, fz) = (x.floor(), y.floor(), z.floor());
        let xi = (fx as i32 & 255) as usize;
        let yi = (fy as i32 & 255) as usize;
        let zi = (fz as i32 & 255) as usize;

        let x = x - fx;
        let y = y - fy;
        let z = z - fz;

        let u = smoothstep(x);
        let v = smoothstep(y);
        let w = smoothstep(z);

        let a = p[xi] + yi;
        let aa = p[a & 255] + zi;
        let ab = p[(a + 1) & 255] + zi;
        let b = p[(xi + 1) & 255] + yi;
        let ba = p[b & 255] + zi;
        let bb = p[(b + 1) & 255] + zi;

        let result = lerp(
            lerp(
                lerp(gradient(p[aa], x, y, z), gradient(p[ba], x - 1.0, y, z), u),
                lerp(
                    gradient(p[ab], x, y - 1.0, z),
                    gradient(p[bb], x - 1.0, y - 1.0, z),
                    u,
                ),
                v,
            ),
            lerp(
                lerp(
                    gradient(p[aa + 1], x, y, z - 1.0),
                    gradient(p[ba + 1], x - 1.0, y, z - 1.0),
                    u,
                ),
                lerp(
                    gradient(p[ab + 1], x, y - 1.0, z - 1.0),
                    gradient(p[bb + 1], x - 1.0, y - 1.0, z - 1.0),
                    u,
                ),
                v,
            ),
            w,
        );

        result.clamp(-1.0, 1.0)
    }
}

/// The ease curve `3t² - 2t³`.
fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Dot product of the offset with one of the 12 cube-edge gradient directions,
/// chosen by the low 4 bits of the hash.
fn gradient(hash: usize, x: f32, y: f32, z: f32) -> f32 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}
