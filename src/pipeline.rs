//! End-to-end steps shared by the command line tools: build a `Network` from a structure file,
//! train it on a dataset, and answer the queries of a test file.

use std::path::Path;

use log::{debug, info};

use crate::data::{read_structure, read_training, TestSet, TokenPolicy};
use crate::estimators::{Estimator, LaplaceEstimator};
use crate::inference::{classify, ConditionalInferenceEngine, EnumerationEngine};
use crate::model::Network;
use crate::util::Result;

/// Build the `Network` described by `structure` and train it on `training`
pub fn train_from_files<P, Q>(structure: P, training: Q, policy: TokenPolicy) -> Result<Network>
    where P: AsRef<Path>,
          Q: AsRef<Path>
{
    let mut network = read_structure(structure)?;
    let dataset = read_training(training, &network, policy)?;
    LaplaceEstimator::new(&mut network).estimate(dataset.iter())?;
    Ok(network)
}

/// Infer the unknown value of every record of `test_set`.
///
/// # Returns
/// one decision per record, or the first error; no decisions are returned if any record fails
pub fn predict(network: &Network, test_set: &TestSet) -> Result<Vec<bool>> {
    let engine = EnumerationEngine::new(network);

    let predictions = test_set.records().iter().map(|record| -> Result<bool> {
        let p = engine.infer(record.query(), record.evidence())?;
        debug!("P({} = 1 | evidence) = {}", network.name(record.query()), p);
        Ok(classify(p))
    }).collect::<Result<Vec<bool>>>()?;

    info!(
        "predicted {} records ({} true)",
        predictions.len(),
        predictions.iter().filter(|&&p| p).count()
    );
    Ok(predictions)
}
