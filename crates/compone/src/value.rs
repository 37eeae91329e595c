//! Prop values and content.
//!
//! The same closed variant is used for component props and for children, so
//! the render pipeline is a single recursive match over [`Value`].

use std::fmt;

use indexmap::IndexMap;

use crate::component::{CloneMemo, Component};
use crate::safe::{escape, SafeString};

/// A component's keyword arguments, in insertion order.
pub type Props = IndexMap<String, Value>;

/// A prop value or a unit of content.
#[derive(Clone, PartialEq)]
pub enum Value {
    /// Absence of a value: omitted as an attribute, empty as text.
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Plain text, escaped on output.
    Str(String),
    /// Finished markup, emitted verbatim.
    Safe(SafeString),
    Component(Component),
    /// A sequence of siblings, flattened on output.
    List(Vec<Value>),
}

impl Value {
    /// Build a list from any iterable of convertible items.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Safe(_) => "safe",
            Value::Component(_) => "component",
            Value::List(_) => "list",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            Value::Safe(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_component(&self) -> Option<&Component> {
        match self {
            Value::Component(c) => Some(c),
            _ => None,
        }
    }

    /// Concatenate two values the way `append` needs.
    ///
    /// Mixing plain and safe text escapes the plain side and yields safe text.
    /// Returns `None` when the two values do not concatenate.
    pub fn concat(&self, other: &Value) -> Option<Value> {
        let joined = match (self, other) {
            (Value::Int(a), Value::Int(b)) => Value::Int(a.wrapping_add(*b)),
            (Value::Int(a), Value::Float(b)) => Value::Float(*a as f64 + b),
            (Value::Float(a), Value::Int(b)) => Value::Float(a + *b as f64),
            (Value::Float(a), Value::Float(b)) => Value::Float(a + b),
            (Value::Str(a), Value::Str(b)) => Value::Str(format!("{a}{b}")),
            (Value::Safe(a), Value::Safe(b)) => Value::Safe(a.clone() + b),
            (Value::Safe(a), Value::Str(b)) => Value::Safe(a.clone() + escape(b)),
            (Value::Str(a), Value::Safe(b)) => Value::Safe(escape(a) + b),
            (Value::List(a), Value::List(b)) => {
                Value::List(a.iter().chain(b.iter()).cloned().collect())
            }
            _ => return None,
        };
        Some(joined)
    }

    /// Copy the value so that no component inside it is shared with the
    /// original.
    ///
    /// Children containers are the only mutable part of a component, so
    /// sharing a nested component between two prop bags would let one
    /// observe children attached through the other.
    ///
    /// Components reached more than once are copied once, so shared and
    /// cyclic structure is kept in the copy.
    pub fn deep_clone(&self) -> Value {
        self.deep_clone_in(&mut CloneMemo::default())
    }

    pub(crate) fn deep_clone_in(&self, memo: &mut CloneMemo) -> Value {
        match self {
            Value::Component(c) => Value::Component(c.duplicate_in(memo)),
            Value::List(items) => {
                Value::List(items.iter().map(|item| item.deep_clone_in(memo)).collect())
            }
            other => other.clone(),
        }
    }

    /// Text of a scalar value, used when it is emitted as content.
    pub(crate) fn scalar_text(&self) -> Option<String> {
        match self {
            Value::None => Some(String::new()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Int(n) => Some(n.to_string()),
            Value::Float(x) => Some(x.to_string()),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Safe(s) => write!(f, "safe({:?})", s.as_str()),
            Value::Component(c) => write!(f, "{c:?}"),
            Value::List(items) => f.debug_list().entries(items).finish(),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::None
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

impl From<SafeString> for Value {
    fn from(s: SafeString) -> Self {
        Value::Safe(s)
    }
}

impl From<Component> for Value {
    fn from(c: Component) -> Self {
        Value::Component(c)
    }
}

impl From<&Component> for Value {
    fn from(c: &Component) -> Self {
        Value::Component(c.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! int_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Int(n as i64)
                }
            }
        )*
    };
}

int_from!(i8, i16, i32, i64, u8, u16, u32, usize);

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(x as f64)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::None)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::list(items)
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Value::list(items)
    }
}

/// Build a [`Props`] bag from `name => value` pairs.
///
/// ```ignore
/// let props = props! { "title" => "Home", "class_" => "nav" };
/// ```
#[macro_export]
macro_rules! props {
    () => { $crate::Props::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut props = $crate::Props::new();
        $( props.insert(::std::string::String::from($key), $crate::Value::from($value)); )+
        props
    }};
}

/// Build a [`Value::List`] of siblings from heterogeneous items.
///
/// ```ignore
/// let children = content![h1.bind("Title")?, "some text", card];
/// ```
#[macro_export]
macro_rules! content {
    ($($item:expr),* $(,)?) => {
        $crate::Value::List(vec![$($crate::Value::from($item)),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn concatenates_compatible_values() {
        assert_eq!(Value::Int(1).concat(&Value::Int(2)), Some(Value::Int(3)));
        assert_eq!(
            Value::from("a ").concat(&Value::from("b")),
            Some(Value::from("a b"))
        );
        assert_eq!(
            Value::from(vec![1]).concat(&Value::from(vec![2])),
            Some(Value::from(vec![1, 2]))
        );
    }

    #[test]
    fn mixing_plain_and_safe_text_escapes_the_plain_side() {
        let joined = Value::Safe(SafeString::trusted("<b>")).concat(&Value::from("<"));

        assert_eq!(joined, Some(Value::Safe(SafeString::trusted("<b>&lt;"))));
    }

    #[test]
    fn refuses_incompatible_concatenation() {
        assert_eq!(Value::Int(1).concat(&Value::from("x")), None);
        assert_eq!(Value::Bool(true).concat(&Value::Bool(true)), None);
        assert_eq!(Value::None.concat(&Value::None), None);
    }

    #[test]
    fn props_macro_keeps_insertion_order() {
        let props = props! { "b" => 1, "a" => "x", "c" => true };
        let keys: Vec<&str> = props.keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(props["a"], Value::from("x"));
    }

    #[test]
    fn content_macro_builds_sibling_list() {
        let children = content!["a", 1, SafeString::trusted("<br />")];

        assert_eq!(children.as_list().map(<[Value]>::len), Some(3));
    }

    #[test]
    fn option_converts_to_none() {
        assert_eq!(Value::from(None::<&str>), Value::None);
        assert_eq!(Value::from(Some(3)), Value::Int(3));
    }
}
