//! Defines the `Network`, a Bayesian (directed) graphical model over binary variables
//! representing the factorization of a probability distribution P, and the `NetworkBuilder`
//! used to assemble it.

pub mod directed;

pub use self::directed::{Network, NetworkBuilder};
