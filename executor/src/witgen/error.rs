use rsa_witgen_bigint::BigIntError;

/// A circuit assertion that did not hold.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("constraint #{index} in `{path}` failed: {kind}")]
pub struct ConstraintError {
    /// Position of the assertion in evaluation order.
    pub index: usize,
    /// Dotted path of the component instance, e.g. `main.big_pow.doublers[3].t_check`.
    pub path: String,
    pub kind: FailureKind,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    #[error("{description}: {lhs} != {rhs}")]
    NotEqual {
        description: &'static str,
        lhs: String,
        rhs: String,
    },
    #[error(transparent)]
    Arithmetic(#[from] BigIntError),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("at least two limbs are required, got {0}")]
    TooFewLimbs(usize),
    #[error("limbs must be at least one bit wide")]
    EmptyLimbs,
    #[error(
        "{limb_count} limbs of {limb_bits} bits need {required}-bit carries, at most {available} fit into the field"
    )]
    FieldOverflow {
        limb_bits: usize,
        limb_count: usize,
        required: usize,
        available: usize,
    },
    #[error("{total_bits} bits cannot hold a padded SHA-256 signature, {required} are needed")]
    TooSmallForPadding { total_bits: usize, required: usize },
}

/// Why witness generation for a signature check stopped.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WitgenError {
    #[error("missing input signal `{0}`")]
    MissingInput(String),
    #[error("input `{signal}` has {actual} limbs, expected {expected}")]
    InputLength {
        signal: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("input `{signal}` does not fit the limb layout: {source}")]
    InputOverflow {
        signal: &'static str,
        source: BigIntError,
    },
    /// An input limb is out of range, the digest has bits above 256, or the modulus
    /// is too short to hold the padding.
    #[error("malformed input: {0}")]
    MalformedInput(ConstraintError),
    /// The signature is not below the modulus, or does not decrypt to the padded digest.
    #[error("invalid signature: {0}")]
    InvalidSignature(ConstraintError),
    /// A check that holds for every well-formed input failed.
    #[error("internal consistency check failed: {0}")]
    Internal(ConstraintError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
