//! Observation noise
//!
//! Each player sees the opponent's move through its own noisy channel. The
//! two channels are sampled separately every round; a player's own move is
//! never noised.

use crate::random::SeededRng;
use crate::strategy::Move;

/// Default chance that an observation is flipped.
pub const DEFAULT_NOISE: f64 = 0.05;

/// Independent per-observation corruption of the opponent's move
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseModel {
    probability: f64,
}

impl NoiseModel {
    /// `probability` is expected in [0, 1]; `MatchConfig` enforces this.
    pub fn new(probability: f64) -> Self {
        Self { probability }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// What one observer perceives when the opponent played `actual`.
    pub fn observe(&self, actual: Move, rng: &mut SeededRng) -> Move {
        if rng.chance(self.probability) {
            tracing::trace!(%actual, "observation flipped");
            actual.flipped()
        } else {
            actual
        }
    }
}

impl Default for NoiseModel {
    fn default() -> Self {
        Self::new(DEFAULT_NOISE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> SeededRng {
        SeededRng::from_u64(42)
    }

    #[test]
    fn test_zero_noise_is_exact() {
        let noise = NoiseModel::new(0.0);
        let mut rng = rng();
        for _ in 0..200 {
            assert_eq!(noise.observe(Move::Cooperate, &mut rng), Move::Cooperate);
            assert_eq!(noise.observe(Move::Defect, &mut rng), Move::Defect);
        }
    }

    #[test]
    fn test_full_noise_always_flips() {
        let noise = NoiseModel::new(1.0);
        let mut rng = rng();
        for _ in 0..200 {
            assert_eq!(noise.observe(Move::Cooperate, &mut rng), Move::Defect);
            assert_eq!(noise.observe(Move::Defect, &mut rng), Move::Cooperate);
        }
    }

    #[test]
    fn test_default_flip_rate() {
        let noise = NoiseModel::default();
        assert_eq!(noise.probability(), DEFAULT_NOISE);

        let mut rng = rng();
        let flips = (0..20_000)
            .filter(|_| noise.observe(Move::Cooperate, &mut rng) == Move::Defect)
            .count();
        // Expected 1000
        assert!(flips > 800 && flips < 1200, "flips = {}", flips);
    }
}
