//! Defines a simple forward sampler for trained `Network`s
//!
//! Implementation of Koller & Friedman Algorithm 12.1 (pp 489)

use rand::Rng;

use crate::model::Network;
use crate::util::Result;
use crate::variable::Assignment;
use super::Sampler;

/// Draws complete samples from a trained `Network`, visiting `Variable`s in declaration order so
/// that every parent is sampled before its children.
pub struct ForwardSampler<'a, R: Rng> {

    /// The `Network` to sample
    model: &'a Network,

    /// Source of randomness
    rng: R

}

impl<'a, R: Rng> ForwardSampler<'a, R> {

    pub fn new(model: &'a Network, rng: R) -> Self {
        ForwardSampler { model, rng }
    }
}

impl<'a, R: Rng> Sampler for ForwardSampler<'a, R> {

    fn sample(&mut self) -> Result<Assignment> {
        let mut a = Assignment::new();

        for id in self.model.ids() {
            // parents precede children, so the parents of `id` are already in `a`
            let p = self.model.conditional_probability(id, &a)?;
            a.set(id, self.rng.gen_bool(p));
        }

        Ok(a)
    }

}
