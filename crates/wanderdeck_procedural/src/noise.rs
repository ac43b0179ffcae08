//! # Hash Noise
//!
//! Deterministic value noise built from an integer hash.
//!
//! ## How a sample is produced
//!
//! 1. The four lattice corners around `(x, y)` are mixed with the channel
//!    offset and the world seed into one 32-bit integer each.
//! 2. Every mixed integer goes through a multiplicative hash that yields a
//!    lattice value in `[-1, 1]`.
//! 3. Corner values are blended with a smoothstep curve, so there are no
//!    flat blocks or hard edges along the lattice axes.
//! 4. A second octave at twice the frequency and half the amplitude adds
//!    detail; the sum is normalized to `[0, 1]`.
//!
//! ## Determinism Guarantee
//!
//! Only wrapping integer arithmetic and IEEE-754 basic operations are used.
//! Given the same `WorldSeed`, the same inputs return the same bits on any
//! platform.

/// World seed for deterministic generation.
///
/// All procedural generation derives from this seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldSeed(u64);

impl WorldSeed {
    /// Creates a new world seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Derives a sub-seed for a specific purpose (e.g., meadow placement).
    ///
    /// Uses a hash function to create independent streams from one seed.
    #[inline]
    #[must_use]
    pub const fn derive(self, purpose: u64) -> Self {
        let mut hash = self.0;
        hash ^= purpose;
        hash = hash.wrapping_mul(0x517c_c1b7_2722_0a95);
        hash ^= hash >> 32;
        Self(hash)
    }
}

impl Default for WorldSeed {
    fn default() -> Self {
        Self(0)
    }
}

impl From<u64> for WorldSeed {
    fn from(seed: u64) -> Self {
        Self::new(seed)
    }
}

/// Purpose tag used to derive the lattice salt from the world seed.
const NOISE_PURPOSE: u64 = 0x6e6f_6973_65;

/// Lattice mixing primes.
const PRIME_X: i32 = 1_619;
const PRIME_Y: i32 = 31_337;
const PRIME_OFFSET: i32 = 6_971;

/// Added to the channel offset for the detail octave so both octaves read
/// unrelated lattices.
const DETAIL_OCTAVE_SALT: i32 = 0x2f1d;

/// Relative weight of the detail octave.
const DETAIL_AMPLITUDE: f64 = 0.5;

/// Two-octave hash noise.
///
/// Produces smooth, continuous values in the range `[0, 1]`.
///
/// # Example
///
/// ```rust
/// use wanderdeck_procedural::{HashNoise, WorldSeed};
///
/// let noise = HashNoise::new(WorldSeed::new(42));
/// let elevation = noise.sample(3.2, -7.9, 0);
/// assert!((0.0..=1.0).contains(&elevation));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct HashNoise {
    /// Seed-derived salt mixed into every lattice point.
    salt: i32,
}

impl HashNoise {
    /// Creates a noise source for the given seed.
    #[must_use]
    pub const fn new(seed: WorldSeed) -> Self {
        // Truncation keeps the low 32 bits of the derived seed.
        #[allow(clippy::cast_possible_truncation)]
        let salt = seed.derive(NOISE_PURPOSE).value() as i32;
        Self { salt }
    }

    /// Samples the noise at `(x, y)` on the channel selected by `offset`.
    ///
    /// Different offsets give independent fields over the same coordinates
    /// (elevation, moisture, rivers).
    ///
    /// # Returns
    ///
    /// A value in the range `[0, 1]`.
    #[must_use]
    pub fn sample(&self, x: f64, y: f64, offset: i32) -> f64 {
        let base = self.smooth_value(x, y, offset);
        let detail = self.smooth_value(
            x * 2.0,
            y * 2.0,
            offset.wrapping_add(DETAIL_OCTAVE_SALT),
        );

        let combined = (base + DETAIL_AMPLITUDE * detail) / (1.0 + DETAIL_AMPLITUDE);
        (combined * 0.5 + 0.5).clamp(0.0, 1.0)
    }

    /// Smoothly interpolated lattice value in `[-1, 1]`.
    fn smooth_value(&self, x: f64, y: f64, offset: i32) -> f64 {
        let x0 = fast_floor(x);
        let y0 = fast_floor(y);
        let tx = fade(x - f64::from(x0));
        let ty = fade(y - f64::from(y0));

        let x1 = x0.wrapping_add(1);
        let y1 = y0.wrapping_add(1);

        let v00 = self.lattice(x0, y0, offset);
        let v10 = self.lattice(x1, y0, offset);
        let v01 = self.lattice(x0, y1, offset);
        let v11 = self.lattice(x1, y1, offset);

        lerp(lerp(v00, v10, tx), lerp(v01, v11, tx), ty)
    }

    /// Hashes one lattice point to a value in `[-1, 1]`.
    #[inline]
    fn lattice(&self, ix: i32, iy: i32, offset: i32) -> f64 {
        let mut n = ix.wrapping_mul(PRIME_X)
            ^ iy.wrapping_mul(PRIME_Y)
            ^ offset.wrapping_mul(PRIME_OFFSET)
            ^ self.salt;
        n = (n << 13) ^ n;

        let hashed = n
            .wrapping_mul(n.wrapping_mul(n).wrapping_mul(15_731).wrapping_add(789_221))
            .wrapping_add(1_376_312_589)
            & 0x7fff_ffff;

        1.0 - f64::from(hashed) / 1_073_741_824.0
    }
}

/// Smoothstep easing curve.
#[inline]
fn fade(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Fast floor function.
///
/// Faster than `f64::floor()` for our use case.
#[inline]
#[allow(clippy::cast_possible_truncation)]
fn fast_floor(x: f64) -> i32 {
    let xi = x as i32;
    if x < f64::from(xi) {
        xi - 1
    } else {
        xi
    }
}
