//! Defines the `LaplaceEstimator`, which learns the CPTs of a `Network` by counting outcomes with
//! add-one (Laplace) smoothing.

use log::{debug, info};

use crate::model::Network;
use crate::util::{CptError, Result};
use crate::variable::Assignment;
use super::Estimator;


/// A smoothed Maximum Likelihood `Estimator` for every CPT of a `Network`.
///
/// Based on the decomposability of the likelihood function, each CPT can be estimated
/// separately: for a variable ```X``` with parent assignment ```u```
///
/// ```text
///                    M[x = true, u] + 1
///     theta x|u = ------------------------
///                   M[u] + 2
/// ```
///
/// where the ```+ 1``` on each outcome comes from the count tables starting at 1. The estimate
/// is therefore strictly inside ```(0, 1)```, and exactly ```0.5``` for an unseen ```u```.
///
/// Counts live on the `Network` and are *not* reset between calls to `estimate`; a second call
/// adds its data on top of the first. Use `Network::reset_counts` to start over.
pub struct LaplaceEstimator<'m> {

    /// The model whose parameters are estimated in place
    model: &'m mut Network

}

impl<'m> LaplaceEstimator<'m> {

    pub fn new(model: &'m mut Network) -> Self {
        LaplaceEstimator { model }
    }

    /// The `(mask, value)` pair of each variable for one complete sample
    fn observations(&self, sample: &Assignment) -> Result<Vec<(usize, bool)>> {
        self.model.variables().map(|(id, var)| -> Result<(usize, bool)> {
            let value = sample.get(id).ok_or_else(|| CptError::MissingValue(var.name().to_string()))?;
            let mask = var.parent_mask(sample).ok_or_else(|| {
                // every parent is itself a variable, so it was checked above or will be below
                let missing = var.parents().iter().find(|&&p| !sample.contains(p));
                CptError::MissingValue(missing.map_or_else(String::new, |&p| self.model.name(p).to_string()))
            })?;
            Ok((mask, value))
        }).collect()
    }
}

impl<'a, 'm> Estimator<'a> for LaplaceEstimator<'m> {

    /// Count every sample, then recompute every CPT in full.
    ///
    /// The whole dataset is checked before any count changes, so an incomplete sample leaves the
    /// `Network` untouched.
    fn estimate(&mut self, dataset: impl Iterator<Item = &'a Assignment>) -> Result<()> {
        let rows: Vec<Vec<(usize, bool)>> = dataset.map(|sample| self.observations(sample))
                                                   .collect::<Result<_>>()?;

        for row in rows.iter() {
            for (var, &(mask, value)) in self.model.variables_mut().zip(row.iter()) {
                var.observe(mask, value);
            }
        }

        for var in self.model.variables_mut() {
            var.estimate();
            debug!("estimated {}: counts {} -> cpt {:?}", var.name(), var.counts(), var.cpt());
        }

        info!("trained {} variables on {} rows", self.model.len(), rows.len());
        Ok(())
    }
}
