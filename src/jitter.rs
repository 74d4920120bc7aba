use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::projection::{ProjectionParams, Uv};

/// Random source for the placeholder UVs written to rejected faces.
///
/// The offsets are cosmetic: they only keep rejected corners from stacking
/// on one exact coordinate. Nothing in scoring or assignment reads them.
#[derive(Debug, Clone)]
pub struct PlaceholderJitter {
    rng: StdRng,
    base: Uv,
    spread: f64,
}

impl PlaceholderJitter {
    /// Creates a jitter source seeded from the operating system.
    #[must_use]
    pub fn from_entropy(params: &ProjectionParams) -> Self {
        Self::with_rng(StdRng::from_os_rng(), params)
    }

    /// Creates a reproducible jitter source.
    #[must_use]
    pub fn seeded(seed: u64, params: &ProjectionParams) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), params)
    }

    fn with_rng(rng: StdRng, params: &ProjectionParams) -> Self {
        Self {
            rng,
            base: params.placeholder,
            spread: params.placeholder_spread,
        }
    }

    /// Draws the next placeholder coordinate.
    pub fn next_uv(&mut self) -> Uv {
        let du: f64 = self.rng.random();
        let dv: f64 = self.rng.random();
        Uv::new(self.base.u + du * self.spread, self.base.v + dv * self.spread)
    }
}
