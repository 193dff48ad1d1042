//! Defines the interface to inference engines

use crate::util::Result;
use crate::variable::{Assignment, VarId};

mod enumeration;

pub use self::enumeration::EnumerationEngine;


/// A posterior at or above this threshold classifies the query as `true`
pub const DECISION_THRESHOLD: f64 = 0.5;


/// A `ConditionalInferenceEngine` is capable of answering Conditional Probability Queries of the
/// form:
///     ```P(Y = true | E = e)```
/// for a single binary query variable ```Y```.
pub trait ConditionalInferenceEngine {

    /// Infer ```P(query = true | evidence)```
    fn infer(&self, query: VarId, evidence: &Assignment) -> Result<f64>;

    /// Infer the most probable value of `query` given `evidence`, using the `classify` decision
    /// rule.
    fn predict(&self, query: VarId, evidence: &Assignment) -> Result<bool> {
        self.infer(query, evidence).map(classify)
    }

}


/// The decision rule for a binary posterior: `true` iff ```p >= 0.5```
pub fn classify(probability: f64) -> bool {
    probability >= DECISION_THRESHOLD
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_inclusive() {
        assert!(classify(0.5));
        assert!(classify(0.75));
        assert!(!classify(0.4999));
    }
}
