// In crates/simulator/src/normal.rs

use rand::Rng;
use rand::distributions::Standard;
use std::f64::consts::TAU;

/// A source of uniformly distributed reals in `[0, 1)`.
///
/// Every `rand::Rng` is a source, so seeded generators can be handed straight to
/// the simulator. Test code can implement it directly to script exact draws.
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

impl<R: Rng> UniformSource for R {
    fn next_uniform(&mut self) -> f64 {
        self.sample(Standard)
    }
}

/// Standard normal sampler using the Box–Muller transform.
///
/// Each sample consumes two non-zero uniforms. Only the cosine branch is returned;
/// the paired sine sample is dropped so that output matches the established
/// one-sample-per-two-draws sequence.
#[derive(Debug, Clone)]
pub struct NormalGenerator<U> {
    source: U,
}

impl<U: UniformSource> NormalGenerator<U> {
    pub fn new(source: U) -> Self {
        Self { source }
    }

    /// Draws one `N(0, 1)` sample.
    pub fn sample(&mut self) -> f64 {
        let u = self.nonzero_uniform();
        let v = self.nonzero_uniform();
        (-2.0 * u.ln()).sqrt() * (TAU * v).cos()
    }

    // ln(0) is -inf, so zero draws are rejected and redrawn.
    fn nonzero_uniform(&mut self) -> f64 {
        loop {
            let u = self.source.next_uniform();
            if u != 0.0 {
                return u;
            }
        }
    }

    pub fn into_inner(self) -> U {
        self.source
    }
}
