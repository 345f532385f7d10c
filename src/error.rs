use std::fmt;

/// Everything that can go wrong while generating, transforming or importing
/// a sample sequence.
#[derive(Debug)]
pub enum SignalError {
    /// A generator function produced a sample outside [-1, 1].
    RangeViolation { index: usize, value: f32 },
    /// Combinator called with both or neither of multiply/add selected.
    InvalidMode { multiply: bool, add: bool },
    /// Combinator called with tracks of unequal length.
    LengthMismatch {
        track: usize,
        expected: usize,
        found: usize,
    },
    /// Peak normalization of a sequence whose peak is zero.
    DivisionByZero,
    /// An operation that needs at least one input received none.
    EmptyInput,
    InvalidParameter { name: &'static str, value: f64 },
    UnsupportedFormat { bits_per_sample: u16, float: bool },
    Wav(hound::Error),
}

pub type Result<T> = std::result::Result<T, SignalError>;

impl SignalError {
    pub(crate) fn invalid(name: &'static str, value: impl Into<f64>) -> Self {
        SignalError::InvalidParameter {
            name,
            value: value.into(),
        }
    }
}

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalError::RangeViolation { index, value } => write!(
                f,
                "function returned '{value}' at sample {index}, which is not between -1 and 1"
            ),
            SignalError::InvalidMode { multiply, add } => write!(
                f,
                "exactly one of multiply/add must be selected (multiply={multiply}, add={add})"
            ),
            SignalError::LengthMismatch {
                track,
                expected,
                found,
            } => write!(
                f,
                "track {track} has {found} samples, expected {expected}"
            ),
            SignalError::DivisionByZero => {
                write!(f, "cannot normalize a sequence whose peak magnitude is zero")
            }
            SignalError::EmptyInput => write!(f, "no input sequences given"),
            SignalError::InvalidParameter { name, value } => {
                write!(f, "invalid value {value} for parameter '{name}'")
            }
            SignalError::UnsupportedFormat {
                bits_per_sample,
                float,
            } => {
                let kind = if *float { "float" } else { "integer" };
                write!(
                    f,
                    "unsupported WAV format: {bits_per_sample}-bit {kind}, expected 16-bit integer PCM"
                )
            }
            SignalError::Wav(e) => write!(f, "WAV error: {e}"),
        }
    }
}

impl std::error::Error for SignalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SignalError::Wav(e) => Some(e),
            _ => None,
        }
    }
}

impl From<hound::Error> for SignalError {
    fn from(e: hound::Error) -> Self {
        SignalError::Wav(e)
    }
}
