//! Error types for component definition, composition and rendering.

use thiserror::Error;

pub type ComponeResult<T> = Result<T, ComponeError>;

/// Errors raised when a component contract is violated.
///
/// All of these are programmer errors: they are reported at the call that
/// breaks the contract and never recovered from internally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponeError {
    #[error("Component '{component}' cannot declare variable-arity parameter '{param}'")]
    Signature { component: String, param: String },

    #[error("Invalid component definition '{component}': {reason}")]
    Definition { component: String, reason: String },

    #[error(
        "{} already specified in {component}, use replace if you want to replace props",
        .keys.join(", ")
    )]
    Conflict { component: String, keys: Vec<String> },

    #[error("Lazy component '{component}' already has children")]
    Rebinding { component: String },

    #[error("Attribute '{attribute}' has both single and double quotes in its value")]
    Quoting { attribute: String },

    #[error("Unsupported operand for '{operator}': {operand}")]
    UnsupportedOperand {
        operator: &'static str,
        operand: String,
    },

    #[error("Cannot append {right} to {left} for prop '{prop}'")]
    Concat {
        prop: String,
        left: &'static str,
        right: &'static str,
    },

    #[error("Unknown prop '{prop}' for component '{component}'")]
    UnknownProp { component: String, prop: String },

    #[error("Component '{component}' takes {expected} positional arguments but {given} were given")]
    TooManyArguments {
        component: String,
        expected: usize,
        given: usize,
    },

    #[error("Missing required prop '{prop}' for component '{component}'")]
    MissingProp { component: String, prop: String },

    #[error("Element '{tag}' is self-closing and cannot take children")]
    VoidElement { tag: String },

    #[error("Maximum render depth ({max_depth}) exceeded")]
    RecursionLimit { max_depth: usize },

    #[error("Render error in '{component}': {message}")]
    Render { component: String, message: String },

    #[error("Invalid render config: {0}")]
    Config(String),
}

impl ComponeError {
    /// Error for a user-supplied producer that cannot produce content.
    pub fn render(component: impl Into<String>, message: impl Into<String>) -> Self {
        ComponeError::Render {
            component: component.into(),
            message: message.into(),
        }
    }
}

impl From<toml::de::Error> for ComponeError {
    fn from(err: toml::de::Error) -> Self {
        ComponeError::Config(err.to_string())
    }
}
