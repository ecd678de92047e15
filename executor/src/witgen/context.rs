use rsa_witgen_number::FieldElement;

use super::error::{ConstraintError, FailureKind};
use super::profiling::Profile;
use super::signals::Signals;

/// A parametrised circuit component.
///
/// Running a template computes every signal of one component instance from its
/// input signals, checking the component's assertions on the way.
pub trait Template<T: FieldElement> {
    type Input;
    type Witness: Signals<T>;

    /// The template name with its parameters, e.g. `FpMul(121, 32)`.
    fn name(&self) -> String;

    /// Runs the template. Sub-components have to be run through
    /// [`WitgenContext::run`] so that they show up in paths and statistics.
    fn run(&self, ctx: &mut WitgenContext, input: Self::Input)
        -> Result<Self::Witness, ConstraintError>;
}

/// Bookkeeping shared by all component instances of one witness generation run:
/// the path of the instance currently running, the number of assertions checked
/// so far and the per-template profile.
#[derive(Debug)]
pub struct WitgenContext {
    scope: Vec<String>,
    constraint_count: usize,
    profile: Profile,
}

impl WitgenContext {
    pub fn new(root: &str) -> Self {
        Self {
            scope: vec![root.to_string()],
            constraint_count: 0,
            profile: Profile::default(),
        }
    }

    /// Runs `template` as a sub-component called `label` of the running instance.
    pub fn run<T: FieldElement, C: Template<T>>(
        &mut self,
        label: impl Into<String>,
        template: &C,
        input: C::Input,
    ) -> Result<C::Witness, ConstraintError> {
        let name = template.name();
        self.scope.push(label.into());
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("Running {name} at {}", self.path());
        }
        self.profile.record_start(&name);
        let result = template.run(self, input);
        self.profile.record_end(&name);
        self.scope.pop();
        result
    }

    /// The dotted path of the running instance.
    pub fn path(&self) -> String {
        self.scope.join(".")
    }

    pub fn assert_eq<T: FieldElement>(
        &mut self,
        lhs: T,
        rhs: T,
        description: &'static str,
    ) -> Result<(), ConstraintError> {
        let index = self.next_index();
        if lhs == rhs {
            Ok(())
        } else {
            log::debug!("Constraint #{index} failed at {}: {description}", self.path());
            Err(ConstraintError {
                index,
                path: self.path(),
                kind: FailureKind::NotEqual {
                    description,
                    lhs: lhs.to_string(),
                    rhs: rhs.to_string(),
                },
            })
        }
    }

    pub fn assert_zero<T: FieldElement>(
        &mut self,
        value: T,
        description: &'static str,
    ) -> Result<(), ConstraintError> {
        self.assert_eq(value, T::zero(), description)
    }

    /// Turns a failed witness computation into an error of the running instance.
    pub fn fail(&mut self, kind: impl Into<FailureKind>) -> ConstraintError {
        ConstraintError {
            index: self.next_index(),
            path: self.path(),
            kind: kind.into(),
        }
    }

    fn next_index(&mut self) -> usize {
        let index = self.constraint_count;
        self.constraint_count += 1;
        index
    }

    /// The number of assertions checked so far.
    pub fn constraint_count(&self) -> usize {
        self.constraint_count
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }
}
