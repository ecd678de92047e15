use std::collections::BTreeMap;
use std::time::Instant;

use rsa_witgen_number::FieldElement;

pub use self::components::rsa_verify::{RsaVerify65537, RsaVerifyWitness};
pub use self::context::{Template, WitgenContext};
pub use self::error::{ConstraintError, FailureKind, LayoutError, WitgenError};
pub use self::inputs::{RsaVerifyInputs, BASE_MESSAGE, INPUT_SIGNALS, MODULUS, SIGNATURE};
pub use self::layout::{LimbLayout, MAX_RANGE_CHECK_BITS};
pub use self::profiling::{Profile, ProfileEntry};
pub use self::signals::Signals;

pub mod components;
mod context;
mod error;
mod inputs;
mod layout;
mod profiling;
mod signals;

/// Generates the witness of an RSA-65537 signature check.
#[derive(Clone, Copy, Debug, Default)]
pub struct RsaWitnessGenerator {
    layout: LimbLayout,
    profile_summary: bool,
}

impl RsaWitnessGenerator {
    pub fn new(layout: LimbLayout) -> Self {
        RsaWitnessGenerator {
            layout,
            profile_summary: false,
        }
    }

    /// Logs the time spent per template at debug level after generation.
    pub fn with_profile_summary(self, profile_summary: bool) -> Self {
        RsaWitnessGenerator {
            profile_summary,
            ..self
        }
    }

    pub fn layout(&self) -> LimbLayout {
        self.layout
    }

    /// Computes every signal of the verifier for `inputs`.
    ///
    /// Fails if the inputs do not fit the layout or if any circuit assertion does
    /// not hold, in particular for invalid signatures.
    pub fn generate<T: FieldElement>(
        &self,
        inputs: &RsaVerifyInputs<T>,
    ) -> Result<RsaWitness<T>, WitgenError> {
        let verifier = RsaVerify65537::new(self.layout)?;
        log::debug!("Generating witness for {}", verifier.name());
        let start = Instant::now();

        let mut ctx = WitgenContext::new("main");
        let result = verifier.generate(&mut ctx, inputs.clone());
        log::info!(
            "Witness generation took {}s ({} constraints checked)",
            start.elapsed().as_secs_f64(),
            ctx.constraint_count()
        );
        if self.profile_summary {
            ctx.profile().log_summary();
        }

        let verify = result.inspect_err(|e| log::debug!("Witness generation failed: {e}"))?;
        Ok(RsaWitness {
            verify,
            constraint_count: ctx.constraint_count(),
            template_instances: ctx
                .profile()
                .entries()
                .iter()
                .map(|(name, entry)| (name.clone(), entry.invocations))
                .collect(),
        })
    }
}

/// The witness of a successful signature check, with generation statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsaWitness<T> {
    pub verify: RsaVerifyWitness<T>,
    /// Number of circuit assertions that were checked.
    pub constraint_count: usize,
    /// Number of instances per template name, e.g. `FpMul(121, 32)`.
    pub template_instances: BTreeMap<String, usize>,
}

impl<T: FieldElement> RsaWitness<T> {
    /// All signals, led by the constant one.
    pub fn to_witness_vector(&self) -> Vec<T> {
        let mut witness = vec![T::one()];
        self.verify.collect_signals(&mut witness);
        witness
    }

    pub fn signal_count(&self) -> usize {
        self.verify.signal_count() + 1
    }
}
