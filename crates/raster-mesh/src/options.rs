use core::fmt;

use rm_pslg::MeshingDirective;

/// Pipeline configuration: simplification tolerance and an optional explicit
/// meshing directive. When `directive` is `None` the quality request is
/// derived from the assembled PSLG.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshOptions {
    pub tol: f64,
    pub directive: Option<MeshingDirective>,
}

/// Value side of a name/value option pair.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Number(f64),
    Directive(MeshingDirective),
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionError {
    /// Option names are validated up front; a misspelled name must not be
    /// silently ignored.
    Unknown { name: String },
    WrongType { name: String },
    NegativeTolerance { value: f64 },
}

impl fmt::Display for OptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionError::Unknown { name } => write!(f, "unknown option {name:?}"),
            OptionError::WrongType { name } => {
                write!(f, "option {name:?} has the wrong value type")
            }
            OptionError::NegativeTolerance { value } => {
                write!(f, "tolerance must be non-negative, got {value}")
            }
        }
    }
}

impl std::error::Error for OptionError {}

impl MeshOptions {
    /// Build options from name/value pairs. Recognized names are `"tol"`
    /// (non-negative number) and `"triangle_flags"` (a meshing directive);
    /// anything else is rejected. Later pairs override earlier ones.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, OptionError>
    where
        I: IntoIterator<Item = (&'a str, OptionValue)>,
    {
        let mut opts = Self::default();
        for (name, value) in pairs {
            match (name, value) {
                ("tol", OptionValue::Number(value)) => {
                    if value < 0.0 {
                        return Err(OptionError::NegativeTolerance { value });
                    }
                    opts.tol = value;
                }
                ("triangle_flags", OptionValue::Directive(directive)) => {
                    opts.directive = Some(directive);
                }
                ("tol", _) | ("triangle_flags", _) => {
                    return Err(OptionError::WrongType { name: name.to_owned() });
                }
                (other, _) => {
                    return Err(OptionError::Unknown { name: other.to_owned() });
                }
            }
        }
        Ok(opts)
    }
}
