//! Markup-element components and attribute serialization.

use std::sync::LazyLock;

use regex::Regex;

use crate::component::{ComponentType, Kind};
use crate::error::{ComponeError, ComponeResult};
use crate::render::Renderer;
use crate::safe::{escape, SafeString};
use crate::signature::Signature;
use crate::value::{Props, Value};

/// Names that collide with reserved identifiers. An attribute keyword made of
/// one of these plus a trailing underscore (`class_`, `for_`, `type_`) is
/// emitted under the bare name.
const RESERVED: &[&str] = &[
    // Rust
    "as", "async", "await", "box", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while", "yield",
    // Common template and scripting keywords
    "and", "assert", "class", "def", "del", "elif", "except", "finally", "from", "global",
    "import", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "try", "with",
];

fn is_reserved(name: &str) -> bool {
    RESERVED.contains(&name)
}

/// Tag and fixed attributes of an element type.
#[derive(Debug, Clone)]
pub(crate) struct ElementSpec {
    pub(crate) tag: String,
    /// Self-closing: rendered as `<tag attrs />`, never with children.
    pub(crate) void: bool,
    /// Attributes applied before the caller's own.
    pub(crate) preset: Props,
}

/// Builds element component types.
///
/// ```ignore
/// let submit = ElementBuilder::new("button")
///     .named("SubmitButton")
///     .preset("type", "submit")
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct ElementBuilder {
    tag: String,
    void: bool,
    name: Option<String>,
    preset: Props,
}

impl ElementBuilder {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            void: false,
            name: None,
            preset: Props::new(),
        }
    }

    /// Make the element self-closing.
    pub fn self_closing(mut self, void: bool) -> Self {
        self.void = void;
        self
    }

    /// Type name; defaults to the capitalized tag.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn preset(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.preset.insert(key.into(), value.into());
        self
    }

    /// Validate the tag and preset attributes and build the type.
    pub fn build(self) -> ComponeResult<ComponentType> {
        static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[A-Za-z][A-Za-z0-9]*(-[A-Za-z0-9]+)*$").expect("Invalid tag regex")
        });

        if !TAG_RE.is_match(&self.tag) {
            return Err(ComponeError::Definition {
                component: self.tag.clone(),
                reason: "not a valid element tag name".to_string(),
            });
        }
        let preset = convert_attributes(self.preset)?;
        Ok(define(self.tag, self.void, self.name, preset))
    }

    /// Build a type for a tag known to be valid, such as a catalog entry.
    ///
    /// Preset attributes are taken as given.
    pub fn build_unchecked(self) -> ComponentType {
        define(self.tag, self.void, self.name, self.preset)
    }
}

fn define(tag: String, void: bool, name: Option<String>, preset: Props) -> ComponentType {
    let name = name.unwrap_or_else(|| capitalize(&tag));
    let spec = ElementSpec { tag, void, preset };
    ComponentType::from_kind(name, Signature::new(), Kind::Element(spec))
}

/// Element type with a closing tag.
pub fn element(tag: &str) -> ComponeResult<ComponentType> {
    ElementBuilder::new(tag).build()
}

/// Self-closing element type.
pub fn void_element(tag: &str) -> ComponeResult<ComponentType> {
    ElementBuilder::new(tag).self_closing(true).build()
}

fn capitalize(tag: &str) -> String {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Normalize attribute keywords before they enter an element's props.
///
/// Strips the trailing underscore of reserved names and rejects text values
/// that contain both quote characters. Booleans given under a reserved name
/// become text values (`class_ = true` is `class="true"`).
pub(crate) fn convert_attributes(kwargs: Props) -> ComponeResult<Props> {
    kwargs
        .into_iter()
        .map(|(key, value)| {
            if let Some(text) = value.as_str() {
                if text.contains('"') && text.contains('\'') {
                    return Err(ComponeError::Quoting { attribute: key });
                }
            }
            match key.strip_suffix('_') {
                // a renamed attribute always carries a value, booleans included
                Some(bare) if is_reserved(bare) => {
                    let value = match value {
                        Value::Bool(flag) => Value::Str(flag.to_string()),
                        other => other,
                    };
                    Ok((bare.to_string(), value))
                }
                _ => Ok((key, value)),
            }
        })
        .collect()
}

/// Serialize element props into attribute text, with a leading space per
/// attribute.
///
/// Boolean attributes (value `true`) come first, then key/value pairs, each
/// group in insertion order. `false` and `None` values are left out.
fn attributes(renderer: &mut Renderer, props: &Props) -> ComponeResult<String> {
    let mut flags = Vec::new();
    let mut pairs = Vec::new();

    for (key, value) in props {
        match value {
            Value::Bool(true) => flags.push(attribute_name(key)),
            Value::Bool(false) | Value::None => {}
            value => {
                let name = attribute_name(key);
                let escaped = renderer.value(value)?;
                if escaped.contains('"') {
                    pairs.push(format!("{name}='{escaped}'"));
                } else {
                    pairs.push(format!("{name}=\"{escaped}\""));
                }
            }
        }
    }

    let mut out = String::new();
    for attr in flags.iter().map(SafeString::as_str).chain(pairs.iter().map(String::as_str)) {
        out.push(' ');
        out.push_str(attr);
    }
    Ok(out)
}

fn attribute_name(key: &str) -> SafeString {
    escape(&key.replace('_', "-"))
}

pub(crate) fn render(
    renderer: &mut Renderer,
    spec: &ElementSpec,
    props: &Props,
    children: SafeString,
) -> ComponeResult<SafeString> {
    let attrs = attributes(renderer, props)?;
    let tag = &spec.tag;
    let html = if spec.void {
        format!("<{tag}{attrs} />")
    } else {
        format!("<{tag}{attrs}>{children}</{tag}>")
    };
    Ok(SafeString::trusted(html))
}
