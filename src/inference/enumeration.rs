//! Defines a `ConditionalInferenceEngine` that answers queries exactly by enumerating both values
//! of the query variable and scoring each with the chain rule.
//!
//! The engine requires every variable other than the query to be observed. There is no
//! summation over hidden variables: with ```Y``` the query and ```e``` a complete assignment to
//! everything else,
//!
//! ```text
//!                             P(Y = true, e)
//!     P(Y = true | e) = --------------------------------
//!                       P(Y = true, e) + P(Y = false, e)
//! ```
//!
//! and each joint term is the product of one local CPT entry per variable. The joint terms are
//! kept as logarithms, so the ratio stays finite however many variables the network has:
//!
//! ```text
//!     P(Y = true | e) = 1 / (1 + exp(ln P(Y = false, e) - ln P(Y = true, e)))
//! ```

use log::trace;

use crate::model::Network;
use crate::util::{CptError, Result};
use crate::variable::{Assignment, VarId};
use super::ConditionalInferenceEngine;


/// Exact inference of a single unknown variable over a fully observed `Network`.
///
/// The engine never mutates the `Network`: hypotheses are made on a local copy of the evidence,
/// so one engine can serve any number of queries, including from several threads.
pub struct EnumerationEngine<'a> {

    /// the trained `Network` to query
    model: &'a Network

}

impl<'a> EnumerationEngine<'a> {

    pub fn new(model: &'a Network) -> Self {
        EnumerationEngine { model }
    }

    /// The unnormalized log score ```ln P(query = value, evidence)```
    fn log_score(&self, query: VarId, value: bool, evidence: &Assignment) -> Result<f64> {
        let mut hypothesis = evidence.clone();
        hypothesis.set(query, value);
        self.model.log_probability(&hypothesis)
    }
}

impl<'a> ConditionalInferenceEngine for EnumerationEngine<'a> {

    fn infer(&self, query: VarId, evidence: &Assignment) -> Result<f64> {
        let name = self.model.name(query);

        ///////////////////////////////////////////////////////////////////////
        // 1) Check the preconditions: the query is the one and only unknown
        if evidence.contains(query) {
            return Err(CptError::QueryObserved(name.to_string()));
        }

        if let Some(hidden) = self.model.ids().find(|&id| id != query && !evidence.contains(id)) {
            return Err(CptError::MissingValue(self.model.name(hidden).to_string()));
        }

        ///////////////////////////////////////////////////////////////////////
        // 2) Score both hypotheses and normalize
        let true_score = self.log_score(query, true, evidence)?;
        let false_score = self.log_score(query, false, evidence)?;
        trace!("{}: log true score {}, log false score {}", name, true_score, false_score);

        Ok(1.0 / (1.0 + (false_score - true_score).exp()))
    }

}
