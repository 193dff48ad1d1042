//! Defines a `Network`, a Bayesian network of binary `Variable`s whose parameters are learned
//! from data.

use itertools::Itertools;
use indexmap::IndexMap;
use log::debug;

use crate::util::{CptError, Result, MAX_PARENTS};
use crate::variable::{Assignment, VarId, Variable};


/// Represents a Bayesian Network - a Directed Probabilistic Graphical Model over binary
/// `Variable`s.
///
/// # Representation
/// The `Variable`s live in an arena keyed by name and held in declaration order. Edges are
/// implied by each `Variable`'s parent handles. Since a `Variable` may only name parents declared
/// before it, declaration order is also a topological order.
#[derive(Clone, Debug)]
pub struct Network {

    /// The `Variable`s of the network, in declaration order
    graph: IndexMap<String, Variable>

}

impl Network {

    /// Lookup a `Variable` handle by name
    pub fn lookup(&self, name: &str) -> Option<VarId> {
        self.graph.get_index_of(name).map(VarId)
    }

    /// Get the `Variable` behind a handle.
    ///
    /// # Panics
    /// if `id` was not issued by this `Network`
    pub fn variable(&self, id: VarId) -> &Variable {
        &self.graph[id.0]
    }

    pub fn name(&self, id: VarId) -> &str {
        self.variable(id).name()
    }

    /// Get the number of `Variable`s in the `Network`
    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// All handles in declaration (topological) order
    pub fn ids(&self) -> impl Iterator<Item = VarId> + '_ {
        (0..self.graph.len()).map(VarId)
    }

    /// All `Variable`s with their handles, in declaration order
    pub fn variables(&self) -> impl Iterator<Item = (VarId, &Variable)> + '_ {
        self.graph.values().enumerate().map(|(i, v)| (VarId(i), v))
    }

    pub(crate) fn variables_mut(&mut self) -> impl Iterator<Item = &mut Variable> + '_ {
        self.graph.values_mut()
    }

    /// `true` once every `Variable` has a CPT
    pub fn is_trained(&self) -> bool {
        self.graph.values().all(|v| v.cpt().is_some())
    }

    /// Put every count table back to the smoothing baseline, so that the next training pass
    /// starts from scratch instead of accumulating on top of previous data.
    pub fn reset_counts(&mut self) {
        for var in self.graph.values_mut() {
            var.reset_counts();
        }
    }

    /// The local conditional probability ```P(id = true | Pa(id))```, reading the parent values
    /// from `assignment`.
    ///
    /// # Returns
    /// the probability, or an error if the `Variable` is untrained or a parent has no value
    pub fn conditional_probability(&self, id: VarId, assignment: &Assignment) -> Result<f64> {
        let var = self.variable(id);
        let mask = var.parent_mask(assignment).ok_or_else(|| {
            let missing = var.parents().iter().find(|&&p| !assignment.contains(p));
            // parent_mask only fails on a missing parent
            CptError::MissingValue(missing.map_or_else(String::new, |&p| self.name(p).to_string()))
        })?;

        var.probability(mask).ok_or_else(|| CptError::Untrained(var.name().to_string()))
    }

    /// Determine the probability of a full `Assignment` to the `Variable`s in the `Network`.
    ///
    /// Specifically, this computes ```P(zeta)``` by the chain rule, where ```zeta``` is a full
    /// assignment. For large networks this underflows to `0`; prefer `log_probability`.
    pub fn probability(&self, assignment: &Assignment) -> Result<f64> {
        self.log_probability(assignment).map(f64::exp)
    }

    /// ```ln P(zeta)```, the chain rule as a sum of log factors
    pub fn log_probability(&self, assignment: &Assignment) -> Result<f64> {
        self.ids().try_fold(0.0, |acc, id| -> Result<f64> {
            let value = assignment.get(id)
                                  .ok_or_else(|| CptError::MissingValue(self.name(id).to_string()))?;
            let p = self.conditional_probability(id, assignment)?;
            Ok(acc + if value { p.ln() } else { (1.0 - p).ln() })
        })
    }
}


/// An implementation of the [builder pattern] for creating a `Network`.
///
/// Networks must be assembled in topological order: every parent has to be added before its
/// children. Cycles therefore cannot be expressed and are not checked for.
///
/// [builder pattern]: https://en.wikipedia.org/wiki/Builder_pattern
pub struct NetworkBuilder {

    /// The `Variable`s added so far
    graph: IndexMap<String, Variable>,

    /// The error state of the builder
    err: Option<CptError>

}

impl Default for NetworkBuilder {
    fn default() -> Self {
        NetworkBuilder::new()
    }
}

impl NetworkBuilder {

    /// Construct a new `NetworkBuilder` representing an empty `Network`
    pub fn new() -> Self {
        NetworkBuilder { graph: IndexMap::new(), err: None }
    }

    /// Add a named `Variable` to the `Network`.
    ///
    /// # Args
    /// * `name`: the name for the variable. Must be unique.
    /// * `parents`: the names of the parent variables, most significant first. The parents must
    ///   already be in the model.
    pub fn with_variable<S: AsRef<str>>(mut self, name: &str, parents: &[S]) -> Self {
        ///////////////////////////////////////////////////////////////////////
        // 1) if we are in an error state, do nothing
        if self.err.is_some() {
            return self;
        }

        ///////////////////////////////////////////////////////////////////////
        // 2) Check for error conditions
        if let Err(e) = self.add_variable(name, parents) {
            self.err = Some(e);
        }

        self
    }

    /// Complete building the model.
    ///
    /// # Returns
    /// the `Network`, or the first error generated during the building process
    pub fn build(self) -> Result<Network> {
        match self.err {
            Some(e) => Err(e),
            None => Ok(Network { graph: self.graph })
        }
    }

    /// Internal function that actually does the variable addition to the model
    fn add_variable<S: AsRef<str>>(&mut self, name: &str, parents: &[S]) -> Result<()> {
        let parents: Vec<&str> = parents.iter().map(|p| p.as_ref()).collect();

        if self.graph.contains_key(name) {
            return Err(CptError::DuplicateVariable(name.to_string()));
        }

        if parents.len() > MAX_PARENTS {
            return Err(CptError::TooManyParents {
                variable: name.to_string(),
                count: parents.len(),
                max: MAX_PARENTS
            });
        }

        if let Some(dup) = parents.iter().duplicates().next() {
            return Err(CptError::DuplicateParent {
                variable: name.to_string(),
                parent: dup.to_string()
            });
        }

        let ids = parents.iter()
                         .map(|&p| {
                             self.graph.get_index_of(p).map(VarId).ok_or_else(|| {
                                 CptError::MissingParent {
                                     variable: name.to_string(),
                                     parent: p.to_string()
                                 }
                             })
                         })
                         .collect::<Result<Vec<VarId>>>()?;

        debug!("declared {} with parents [{}]", name, parents.iter().join(", "));
        self.graph.insert(name.to_string(), Variable::new(name.to_string(), ids));
        Ok(())
    }
}
