//! Seeded deterministic random stream.
//!
//! `Mulberry32` is a 32-bit state generator whose output stream matches the
//! classic `mulberry32` construction bit for bit. Particle variety (ring
//! placement, hue, size, lifespan, burst sizes) is drawn from it, so two runs
//! with the same seed and the same tick sequence produce identical particles.

use rand::{Error, RngCore, SeedableRng};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next value in [0, 1).
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }

    /// `a + (b - a) * next`, narrowed to `f32`.
    #[inline]
    pub fn range(&mut self, a: f32, b: f32) -> f32 {
        (a as f64 + (b as f64 - a as f64) * self.next_f64()) as f32
    }

    /// Uniform in [0, 1) as `f32`. Values that would round up to 1.0 are
    /// pulled back to the largest `f32` below one.
    #[inline]
    pub fn unit_f32(&mut self) -> f32 {
        (self.next_f64() as f32).min(1.0 - f32::EPSILON / 2.0)
    }
}

impl RngCore for Mulberry32 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let a = self.state;
        let mut t = (a ^ (a >> 15)).wrapping_mul(1 | a);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(61 | t));
        t ^ (t >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        let lo = self.next_u32() as u64;
        let hi = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        // Fold so that small seeds map to themselves.
        Self::new((state ^ (state >> 32)) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_bytes_handles_ragged_tail() {
        let mut a = Mulberry32::new(9);
        let mut b = Mulberry32::new(9);
        let mut buf = [0u8; 6];
        a.fill_bytes(&mut buf);
        let first = b.next_u32().to_le_bytes();
        let second = b.next_u32().to_le_bytes();
        assert_eq!(&buf[..4], &first);
        assert_eq!(&buf[4..], &second[..2]);
    }

    #[test]
    fn seed_from_u64_keeps_small_seeds() {
        assert_eq!(Mulberry32::seed_from_u64(42), Mulberry32::new(42));
    }
}
