//! Defines the `Sampler` trait - an object that can randomly sample from a `Network`.

use crate::util::Result;
use crate::variable::Assignment;

pub mod forward;

pub use self::forward::ForwardSampler;

pub trait Sampler {

    /// Draw one complete `Assignment` from the associated `Network`.
    fn sample(&mut self) -> Result<Assignment>;

    /// Draw `n` samples
    fn samples(&mut self, n: usize) -> Result<Vec<Assignment>> {
        (0..n).map(|_| self.sample()).collect()
    }

}
