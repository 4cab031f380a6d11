//! Ordered, short-circuiting constraint evaluation
//!
//! A rule set is a list of `(label, predicate)` pairs. Predicates are closures
//! and run strictly in order; evaluation stops at the first one that returns
//! false and the rejection carries that label. Later predicates may therefore
//! index into collections whose length an earlier predicate checked.
//!
//! ```
//! use iou_core::requirements::Requirements;
//!
//! let outputs: Vec<i64> = vec![];
//! let result = Requirements::new()
//!     .require("exactly one output", || outputs.len() == 1)
//!     .require("output is positive", || outputs[0] > 0)
//!     .evaluate();
//! assert_eq!(result.unwrap_err().reason, "exactly one output");
//! ```

use tracing::debug;

use crate::error::Rejection;

type Predicate<'a> = Box<dyn FnOnce() -> bool + 'a>;

/// Ordered list of named constraints
#[derive(Default)]
pub struct Requirements<'a> {
    constraints: Vec<(&'static str, Predicate<'a>)>,
}

impl<'a> Requirements<'a> {
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
        }
    }

    /// Append a constraint. `predicate` is not run until [`evaluate`](Self::evaluate).
    pub fn require(mut self, label: &'static str, predicate: impl FnOnce() -> bool + 'a) -> Self {
        self.constraints.push((label, Box::new(predicate)));
        self
    }

    /// Append a constraint only when `applies` holds; otherwise it is skipped.
    pub fn require_if(
        self,
        applies: bool,
        label: &'static str,
        predicate: impl FnOnce() -> bool + 'a,
    ) -> Self {
        if applies {
            self.require(label, predicate)
        } else {
            self
        }
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Run the constraints in order and stop at the first failure.
    pub fn evaluate(self) -> Result<(), Rejection> {
        for (label, predicate) in self.constraints {
            if !predicate() {
                debug!(constraint = label, "constraint failed");
                return Err(Rejection::new(label));
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Requirements<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.constraints.iter().map(|(label, _)| label))
            .finish()
    }
}

/// Single eager check, for use with `?`
pub fn require_that(label: &'static str, holds: bool) -> Result<(), Rejection> {
    if holds {
        Ok(())
    } else {
        debug!(constraint = label, "constraint failed");
        Err(Rejection::new(label))
    }
}
