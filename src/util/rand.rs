// Cubefall
// copyright zipxing@hotmail.com 2022～2025

use rand::Rng;
use rand_xoshiro::{
    rand_core::{RngCore, SeedableRng},
    Xoshiro256StarStar,
};
use std::time::{SystemTime, UNIX_EPOCH};

/// RNG used for scene placement
pub struct Rand {
    rng: Xoshiro256StarStar,
}

impl Default for Rand {
    fn default() -> Self {
        Rand::new()
    }
}

/// 封装Xoshiro256**随机数生成器
impl Rand {
    pub fn new() -> Self {
        Self {
            rng: Xoshiro256StarStar::seed_from_u64(0),
        }
    }

    pub fn srand(&mut self, seed: u64) {
        self.rng = Xoshiro256StarStar::seed_from_u64(seed);
    }

    pub fn srand_now(&mut self) {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        self.srand(seed);
    }

    pub fn rand64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    pub fn rand(&mut self) -> u32 {
        self.rng.next_u64() as u32
    }

    /// Uniform float in `[min, max)`, returns `min` for an empty or
    /// non-finite range
    pub fn gen_range(&mut self, min: f32, max: f32) -> f32 {
        if !(max - min).is_finite() || max <= min {
            return min;
        }
        self.rng.random_range(min..max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Rand::new();
        let mut b = Rand::new();
        a.srand(7);
        b.srand(7);
        for _ in 0..16 {
            assert_eq!(a.rand64(), b.rand64());
        }
    }

    #[test]
    fn gen_range_stays_in_bounds() {
        let mut r = Rand::new();
        r.srand(42);
        for _ in 0..1000 {
            let v = r.gen_range(-6.0, 6.0);
            assert!((-6.0..6.0).contains(&v));
        }
        assert_eq!(r.gen_range(3.0, 3.0), 3.0);
        assert_eq!(r.gen_range(5.0, 1.0), 5.0);
    }

    #[test]
    fn non_finite_range_returns_min() {
        let mut r = Rand::new();
        assert_eq!(r.gen_range(-1.0, f32::INFINITY), -1.0);
        assert_eq!(r.gen_range(f32::NEG_INFINITY, 1.0), f32::NEG_INFINITY);
        assert!(r.gen_range(f32::NAN, 1.0).is_nan());
        assert_eq!(r.gen_range(-f32::MAX, f32::MAX), -f32::MAX);
    }
}
