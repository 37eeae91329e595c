//! Statically declared parameter schemas for component types.

use crate::error::{ComponeError, ComponeResult};
use crate::value::{Props, Value};

/// Name reserved for the rendered-children slot.
pub const CHILDREN: &str = "children";

/// How a parameter may be supplied at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Matched by position or by name.
    Positional,
    /// Matched by name only.
    KeywordOnly,
    /// Collects extra positional values. Never valid for a component.
    VarPositional,
    /// Collects extra keyword values. Never valid for a component.
    VarKeyword,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
    pub default: Option<Value>,
}

/// Ordered parameter list of a component, with optional defaults.
///
/// ```ignore
/// let sig = Signature::new()
///     .param("title")
///     .param_default("level", 1)
///     .keyword_default("class_", "card")
///     .children();
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signature {
    params: Vec<Param>,
    takes_children: bool,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    /// A required parameter, matched by position or name.
    pub fn param(self, name: impl Into<String>) -> Self {
        self.push(name, ParamKind::Positional, None)
    }

    /// A positional parameter with a default value.
    pub fn param_default(self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.push(name, ParamKind::Positional, Some(default.into()))
    }

    /// A required keyword-only parameter.
    pub fn keyword(self, name: impl Into<String>) -> Self {
        self.push(name, ParamKind::KeywordOnly, None)
    }

    /// A keyword-only parameter with a default value.
    ///
    /// A `Value::None` default leaves the prop unset rather than storing it.
    pub fn keyword_default(self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.push(name, ParamKind::KeywordOnly, Some(default.into()))
    }

    pub fn var_args(self, name: impl Into<String>) -> Self {
        self.push(name, ParamKind::VarPositional, None)
    }

    pub fn var_kwargs(self, name: impl Into<String>) -> Self {
        self.push(name, ParamKind::VarKeyword, None)
    }

    /// Receive the rendered children when content is produced.
    pub fn children(mut self) -> Self {
        self.takes_children = true;
        self
    }

    fn push(mut self, name: impl Into<String>, kind: ParamKind, default: Option<Value>) -> Self {
        self.params.push(Param {
            name: name.into(),
            kind,
            default,
        });
        self
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn takes_children(&self) -> bool {
        self.takes_children
    }

    pub fn declares(&self, name: &str) -> bool {
        self.params.iter().any(|p| p.name == name)
    }

    /// Names that positional construction arguments bind to, in order.
    pub fn positional_names(&self) -> impl Iterator<Item = &str> {
        self.params
            .iter()
            .filter(|p| p.kind == ParamKind::Positional)
            .map(|p| p.name.as_str())
    }

    /// Parameters without a default, which must be present in the props.
    pub fn required(&self) -> impl Iterator<Item = &str> {
        self.params
            .iter()
            .filter(|p| p.default.is_none())
            .map(|p| p.name.as_str())
    }

    /// Fresh copies of the declared defaults.
    pub fn defaults(&self) -> Props {
        self.params
            .iter()
            .filter_map(|p| {
                let default = p.default.as_ref()?;
                if p.kind == ParamKind::KeywordOnly && default.is_none() {
                    return None;
                }
                Some((p.name.clone(), default.deep_clone()))
            })
            .collect()
    }

    /// Check the schema can back a component named `component`.
    ///
    /// Variable-arity parameters are rejected: props must be a fixed key set
    /// that copy, replace and merge can re-construct from.
    pub(crate) fn validate(&self, component: &str) -> ComponeResult<()> {
        for (i, param) in self.params.iter().enumerate() {
            if matches!(param.kind, ParamKind::VarPositional | ParamKind::VarKeyword) {
                return Err(ComponeError::Signature {
                    component: component.to_string(),
                    param: param.name.clone(),
                });
            }
            if param.name == CHILDREN {
                return Err(ComponeError::Definition {
                    component: component.to_string(),
                    reason: "'children' is reserved, declare it with .children()".to_string(),
                });
            }
            if self.params[..i].iter().any(|p| p.name == param.name) {
                return Err(ComponeError::Definition {
                    component: component.to_string(),
                    reason: format!("parameter '{}' declared twice", param.name),
                });
            }
        }
        Ok(())
    }
}
