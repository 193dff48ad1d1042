//! Defines an `Estimator`, which is used to estimate parameters of a `Network` from a dataset.

use crate::util::Result;
use crate::variable::Assignment;

mod laplace;
pub use self::laplace::LaplaceEstimator;

/// A trait that represents the ability to estimate the parameters of some model from a dataset of
/// complete `Assignment`s.
pub trait Estimator<'a> {

    /// Estimate the value of the parameters from the given dataset
    fn estimate(&mut self, dataset: impl Iterator<Item = &'a Assignment>) -> Result<()>;

}
