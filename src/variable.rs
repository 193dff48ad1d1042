//! Definition of the variable module
//!
//! A `Variable` represents a binary random variable in a Bayesian network, together with its
//! parents, its smoothed counts, and its Conditional Probability Table (CPT).

use ndarray::{s, Array1};

use std::collections::HashMap;
use std::fmt;

/// A stable handle to a `Variable` inside a `Network`. Handles are positions in declaration
/// order and are only meaningful for the network that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub(crate) usize);

impl VarId {

    /// The position of the variable in declaration order
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}


/// A binary random variable.
///
/// # Parameter layout
/// With ```P``` parents, the parent assignment is encoded as a mask in ```[0, 2^P)``` where the
/// first declared parent is the most significant bit. The count table has ```2^(P+1)``` cells:
/// ```counts[mask]``` counts the `true` outcomes under ```mask``` and ```counts[mask + 2^P]```
/// counts the `false` outcomes. Every cell starts at 1 (Laplace smoothing).
#[derive(Clone, Debug)]
pub struct Variable {

    /// The user-defined name of the `Variable`
    name: String,

    /// The parents, in declaration order
    parents: Vec<VarId>,

    /// Smoothed outcome counts, true half followed by false half
    counts: Array1<u64>,

    /// ```P(self = true | parents = mask)``` for every mask, once estimated
    cpt: Option<Array1<f64>>

}

impl Variable {

    /// Construct an untrained `Variable` with the given parents
    pub(crate) fn new(name: String, parents: Vec<VarId>) -> Self {
        let counts = Array1::from_elem(2 << parents.len(), 1);
        Variable { name, parents, counts, cpt: None }
    }

    /// Get the name of the `Variable`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the parents of the `Variable` in declaration order
    pub fn parents(&self) -> &[VarId] {
        &self.parents
    }

    pub fn has_parents(&self) -> bool {
        !self.parents.is_empty()
    }

    /// The number of parent assignments, ```2^P```
    pub fn num_configurations(&self) -> usize {
        1 << self.parents.len()
    }

    /// The smoothed count table
    pub fn counts(&self) -> &Array1<u64> {
        &self.counts
    }

    /// The CPT, if the `Variable` has been estimated
    pub fn cpt(&self) -> Option<&Array1<f64>> {
        self.cpt.as_ref()
    }

    /// Encode the values of the parents in `assignment` as a mask.
    ///
    /// # Returns
    /// the mask, or `None` if some parent has no value in `assignment`
    pub fn parent_mask(&self, assignment: &Assignment) -> Option<usize> {
        self.parents.iter().try_fold(0, |mask, &p| {
            assignment.get(p).map(|value| (mask << 1) | value as usize)
        })
    }

    /// Record one observation of this `Variable` under the parent assignment `mask`
    pub(crate) fn observe(&mut self, mask: usize, value: bool) {
        let cell = if value { mask } else { mask + self.num_configurations() };
        self.counts[cell] += 1;
    }

    /// Recompute the full CPT from the counts:
    ///
    /// ```text
    ///                         counts[mask]
    ///     theta_mask = ---------------------------------
    ///                  counts[mask] + counts[mask + 2^P]
    /// ```
    pub(crate) fn estimate(&mut self) {
        let half = self.num_configurations();
        let trues = self.counts.slice(s![..half]).mapv(|c| c as f64);
        let falses = self.counts.slice(s![half..]).mapv(|c| c as f64);
        let totals = &trues + &falses;
        self.cpt = Some(trues / totals);
    }

    /// Put the counts back to the smoothing baseline. The CPT is left as it was until the next
    /// estimate.
    pub(crate) fn reset_counts(&mut self) {
        self.counts.fill(1);
    }

    /// ```P(self = true | parents = mask)```, or `None` if the `Variable` has not been estimated
    pub fn probability(&self, mask: usize) -> Option<f64> {
        self.cpt.as_ref().map(|cpt| cpt[mask])
    }
}


/// An explicit assignment of boolean values to `Variable`s.
///
/// Training rows, evidence and hypotheses are all carried in an `Assignment`; the `Variable`s
/// themselves never store a current value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    values: HashMap<VarId, bool>
}

impl Assignment {

    pub fn new() -> Self {
        Assignment { values: HashMap::new() }
    }

    /// Assign `value` to `var`, replacing any previous value
    pub fn set(&mut self, var: VarId, value: bool) {
        self.values.insert(var, value);
    }

    pub fn get(&self, var: VarId) -> Option<bool> {
        self.values.get(&var).copied()
    }

    /// Remove the value of `var`, returning it
    pub fn unset(&mut self, var: VarId) -> Option<bool> {
        self.values.remove(&var)
    }

    pub fn contains(&self, var: VarId) -> bool {
        self.values.contains_key(&var)
    }

    /// The number of assigned variables
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(VarId, bool)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (VarId, bool)>>(iter: I) -> Self {
        Assignment { values: iter.into_iter().collect() }
    }
}
