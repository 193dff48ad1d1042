//! Learning and exact inference for Bayesian networks of binary variables.
//!
//! A `Network` is read from a structure definition, its CPTs are estimated from a labeled
//! dataset with Laplace smoothing, and single unknown variables are then inferred exactly by
//! chain-rule enumeration over otherwise fully observed rows.

pub mod variable;
pub mod model;
pub mod estimators;
pub mod inference;
pub mod samplers;
pub mod data;
pub mod pipeline;
pub mod util;

pub use util::{CptError, Result};
pub use variable::{Assignment, VarId, Variable};
pub use model::{Network, NetworkBuilder};
pub use estimators::{Estimator, LaplaceEstimator};
pub use inference::{classify, ConditionalInferenceEngine, EnumerationEngine};
pub use samplers::{ForwardSampler, Sampler};
pub use data::TokenPolicy;
