//! Component types and instances.
//!
//! A [`ComponentType`] is defined once, from a producer function, a
//! [`ComponentClass`] or an element tag. Calling it yields [`Component`]
//! instances whose props never change; the prop operators (`replace`,
//! `append`, `merge`, `copy`) always build a new instance. The only mutable
//! part of an instance is its children container.

use std::cell::{Cell, OnceCell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::ops::{AddAssign, Mul};
use std::rc::Rc;

use crate::context::ScopeGuard;
use crate::element::{self, ElementSpec};
use crate::error::{ComponeError, ComponeResult};
use crate::render::{RenderOptions, Renderer};
use crate::safe::SafeString;
use crate::signature::Signature;
use crate::value::{Props, Value};

/// Content-producing function of a function component.
pub type ProducerFn = dyn Fn(&Args<'_>) -> ComponeResult<Value>;

/// A user-defined type that renders content from its props.
///
/// The type is constructed from the full prop bag (once per instance), then
/// asked to render. `render` receives the resolved children only when
/// `TAKES_CHILDREN` is set.
pub trait ComponentClass: Sized + 'static {
    const TAKES_CHILDREN: bool = false;

    /// Parameters accepted at construction.
    fn signature() -> Signature;

    fn new(props: &Props) -> ComponeResult<Self>;

    fn render(&self, children: Option<&SafeString>) -> ComponeResult<Value>;
}

/// Object-safe face of a constructed [`ComponentClass`].
pub(crate) trait Renderable {
    fn render(&self, children: Option<&SafeString>) -> ComponeResult<Value>;
}

impl<T: ComponentClass> Renderable for T {
    fn render(&self, children: Option<&SafeString>) -> ComponeResult<Value> {
        ComponentClass::render(self, children)
    }
}

type ClassFactory = dyn Fn(&Props) -> ComponeResult<Rc<dyn Renderable>>;

pub(crate) enum Kind {
    Function {
        produce: Rc<ProducerFn>,
    },
    Class {
        construct: Rc<ClassFactory>,
        takes_children: bool,
    },
    Element(ElementSpec),
    /// Output of `source` repeated `times` times.
    Repeat {
        source: Component,
        times: usize,
    },
}

struct TypeDef {
    name: String,
    signature: Signature,
    kind: Kind,
}

/// A component type: builds instances from positional and keyword props.
#[derive(Clone)]
pub struct ComponentType(Rc<TypeDef>);

impl ComponentType {
    /// Define a component from a content-producing function.
    ///
    /// The producer reads its props through [`Args`]; when the signature
    /// declares `.children()` it also receives the rendered children.
    pub fn function<F>(
        name: impl Into<String>,
        signature: Signature,
        produce: F,
    ) -> ComponeResult<Self>
    where
        F: Fn(&Args<'_>) -> ComponeResult<Value> + 'static,
    {
        let name = name.into();
        validate_name(&name)?;
        signature.validate(&name)?;
        Ok(Self::from_kind(
            name,
            signature,
            Kind::Function {
                produce: Rc::new(produce),
            },
        ))
    }

    /// Define a component from a [`ComponentClass`] implementation.
    pub fn class<T: ComponentClass>(name: impl Into<String>) -> ComponeResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        let signature = T::signature();
        signature.validate(&name)?;
        let construct: Rc<ClassFactory> =
            Rc::new(|props: &Props| -> ComponeResult<Rc<dyn Renderable>> {
                Ok(Rc::new(T::new(props)?))
            });
        Ok(Self::from_kind(
            name,
            signature,
            Kind::Class {
                construct,
                takes_children: T::TAKES_CHILDREN,
            },
        ))
    }

    pub(crate) fn from_kind(name: String, signature: Signature, kind: Kind) -> Self {
        Self(Rc::new(TypeDef {
            name,
            signature,
            kind,
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn signature(&self) -> &Signature {
        &self.0.signature
    }

    pub(crate) fn kind(&self) -> &Kind {
        &self.0.kind
    }

    /// Tag name, for element components.
    pub fn tag(&self) -> Option<&str> {
        match &self.0.kind {
            Kind::Element(spec) => Some(spec.tag.as_str()),
            _ => None,
        }
    }

    /// Instance with default props only.
    pub fn create(&self) -> ComponeResult<Component> {
        self.call(Vec::new(), Props::new())
    }

    /// Instance from keyword props only.
    pub fn with_props(&self, kwargs: Props) -> ComponeResult<Component> {
        self.call(Vec::new(), kwargs)
    }

    /// Build an instance.
    ///
    /// Props start from fresh copies of the declared defaults, then
    /// positional values bound to the positional parameters in order, then
    /// keyword values (which win over positional ones).
    pub fn call(&self, args: Vec<Value>, kwargs: Props) -> ComponeResult<Component> {
        let positional: Vec<&str> = self.0.signature.positional_names().collect();
        if args.len() > positional.len() {
            return Err(ComponeError::TooManyArguments {
                component: self.0.name.clone(),
                expected: positional.len(),
                given: args.len(),
            });
        }

        let mut props = match &self.0.kind {
            Kind::Element(spec) => clone_props(&spec.preset, &mut CloneMemo::default()),
            _ => self.0.signature.defaults(),
        };
        for (name, value) in positional.into_iter().zip(args) {
            props.insert(name.to_string(), value);
        }
        props.extend(self.check_keywords(kwargs)?);
        self.drop_absent(&mut props);

        Ok(Component::from_parts(self.clone(), props))
    }

    /// Item access on the type: a lazy default instance bound to `content`.
    ///
    /// The result keeps its children, so it can be inspected and rendered
    /// later, and refuses a second binding.
    pub fn bind(&self, content: impl Into<Value>) -> ComponeResult<Component> {
        let bound = self.create()?.lazy().bind(content)?;
        match bound {
            Value::Component(component) => Ok(component),
            other => Err(ComponeError::render(
                self.name(),
                format!("lazy binding produced {}", other.type_name()),
            )),
        }
    }

    /// Normalize keyword props before they enter a prop bag.
    ///
    /// Element components accept any attribute name; every other component
    /// only accepts the names it declares.
    fn check_keywords(&self, kwargs: Props) -> ComponeResult<Props> {
        if let Kind::Element(_) = &self.0.kind {
            return element::convert_attributes(kwargs);
        }
        if let Some(unknown) = kwargs.keys().find(|k| !self.0.signature.declares(k)) {
            return Err(ComponeError::UnknownProp {
                component: self.0.name.clone(),
                prop: unknown.clone(),
            });
        }
        Ok(kwargs)
    }

    /// Element attributes set to `false` are absent, never stored.
    fn drop_absent(&self, props: &mut Props) {
        if let Kind::Element(_) = &self.0.kind {
            props.retain(|_, value| *value != Value::Bool(false));
        }
    }
}

impl fmt::Debug for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentType")
            .field("name", &self.0.name)
            .field("signature", &self.0.signature)
            .finish()
    }
}

impl PartialEq for ComponentType {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

fn validate_name(name: &str) -> ComponeResult<()> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(ComponeError::Definition {
            component: name.to_string(),
            reason: "component names must be non-empty and contain no whitespace".to_string(),
        });
    }
    Ok(())
}

/// Children binding state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    /// Item access renders immediately.
    Eager,
    /// Lazy, waiting for its one binding.
    Unbound,
    /// Lazy, children bound.
    Bound,
}

/// Copies made during one deep clone, keyed by the original instance.
/// `None` marks an instance whose props are still being copied.
#[derive(Default)]
pub(crate) struct CloneMemo {
    copies: HashMap<*const Instance, Option<Component>>,
}

fn clone_props(props: &Props, memo: &mut CloneMemo) -> Props {
    props
        .iter()
        .map(|(k, v)| (k.clone(), v.deep_clone_in(memo)))
        .collect()
}

struct Instance {
    ty: ComponentType,
    props: Props,
    children: RefCell<Vec<Value>>,
    binding: Cell<Binding>,
    user: OnceCell<Rc<dyn Renderable>>,
}

/// A component instance.
///
/// Cloning the handle shares the instance; equality is identity.
#[derive(Clone)]
pub struct Component(Rc<Instance>);

impl Component {
    pub(crate) fn from_parts(ty: ComponentType, props: Props) -> Self {
        Self(Rc::new(Instance {
            ty,
            props,
            children: RefCell::new(Vec::new()),
            binding: Cell::new(Binding::Eager),
            user: OnceCell::new(),
        }))
    }

    pub fn name(&self) -> &str {
        self.0.ty.name()
    }

    pub fn component_type(&self) -> &ComponentType {
        &self.0.ty
    }

    pub fn props(&self) -> &Props {
        &self.0.props
    }

    pub fn prop(&self, name: &str) -> Option<&Value> {
        self.0.props.get(name)
    }

    /// Snapshot of the attached children.
    pub fn children(&self) -> Vec<Value> {
        self.0.children.borrow().clone()
    }

    pub fn is_lazy(&self) -> bool {
        self.0.binding.get() != Binding::Eager
    }

    pub fn ptr_eq(&self, other: &Component) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// New instance with `kwargs` laid over the current props.
    ///
    /// On elements, replacing an attribute with `false` removes it.
    pub fn replace(&self, kwargs: Props) -> ComponeResult<Component> {
        let kwargs = self.0.ty.check_keywords(kwargs)?;
        Ok(self.rebuild(kwargs))
    }

    /// New instance where existing props are concatenated with the new
    /// values and missing ones are added.
    pub fn append(&self, kwargs: Props) -> ComponeResult<Component> {
        let mut kwargs = self.0.ty.check_keywords(kwargs)?;
        self.0.ty.drop_absent(&mut kwargs);
        let mut appended = Props::with_capacity(kwargs.len());
        for (key, value) in kwargs {
            let value = match self.0.props.get(&key) {
                Some(old) => old.concat(&value).ok_or_else(|| ComponeError::Concat {
                    prop: key.clone(),
                    left: old.type_name(),
                    right: value.type_name(),
                })?,
                None => value,
            };
            appended.insert(key, value);
        }
        Ok(self.rebuild(appended))
    }

    /// New instance with additional props; fails if any key is already set.
    pub fn merge(&self, kwargs: Props) -> ComponeResult<Component> {
        let mut kwargs = self.0.ty.check_keywords(kwargs)?;
        self.0.ty.drop_absent(&mut kwargs);
        let overlapping: Vec<String> = kwargs
            .keys()
            .filter(|k| self.0.props.contains_key(*k))
            .cloned()
            .collect();
        if !overlapping.is_empty() {
            return Err(ComponeError::Conflict {
                component: format!("{self:?}"),
                keys: overlapping,
            });
        }
        Ok(self.rebuild(kwargs))
    }

    /// New instance with the same props and no children.
    pub fn copy(&self) -> Component {
        self.rebuild(Props::new())
    }

    /// A copy that accepts its children through exactly one `bind`.
    pub fn lazy(&self) -> Component {
        let lazy = self.copy();
        lazy.0.binding.set(Binding::Unbound);
        lazy
    }

    fn rebuild(&self, overlay: Props) -> Component {
        let mut memo = CloneMemo::default();
        memo.copies.insert(Rc::as_ptr(&self.0), None);
        let mut props = clone_props(&self.0.props, &mut memo);
        props.extend(overlay);
        self.0.ty.drop_absent(&mut props);
        Component::from_parts(self.0.ty.clone(), props)
    }

    /// Full copy, children and binding state included, sharing nothing
    /// mutable with `self`.
    pub(crate) fn duplicate_in(&self, memo: &mut CloneMemo) -> Component {
        let key = Rc::as_ptr(&self.0);
        match memo.copies.get(&key) {
            Some(Some(copy)) => return copy.clone(),
            // reached again through its own props: those are immutable, so
            // the original can be shared
            Some(None) => return self.clone(),
            None => {}
        }

        memo.copies.insert(key, None);
        let props = clone_props(&self.0.props, memo);
        let copy = Component::from_parts(self.0.ty.clone(), props);
        copy.0.binding.set(self.0.binding.get());
        memo.copies.insert(key, Some(copy.clone()));

        let children = self.children();
        let children: Vec<Value> = children.iter().map(|c| c.deep_clone_in(memo)).collect();
        *copy.0.children.borrow_mut() = children;
        copy
    }

    /// A zero-argument component rendering this one `times` times.
    pub fn repeat(&self, times: usize) -> Component {
        let ty = ComponentType::from_kind(
            format!("Multi{}", self.name()),
            Signature::new(),
            Kind::Repeat {
                source: self.clone(),
                times,
            },
        );
        Component::from_parts(ty, Props::new())
    }

    /// Repetition by a dynamic operand. Negative counts repeat zero times.
    pub fn times(&self, operand: &Value) -> ComponeResult<Component> {
        match operand {
            Value::Int(n) => Ok(self.repeat(usize::try_from(*n).unwrap_or(0))),
            other => Err(ComponeError::UnsupportedOperand {
                operator: "*",
                operand: other.type_name().to_string(),
            }),
        }
    }

    /// Attach `content` as the next child.
    pub fn push(&self, content: impl Into<Value>) {
        self.0.children.borrow_mut().push(content.into());
    }

    /// Open a scoped block: components whose blocks open and close inside
    /// it attach themselves as children of `self`.
    pub fn enter(&self) -> ScopeGuard {
        ScopeGuard::enter(self)
    }

    /// Run `body` inside a scoped block on `self`.
    ///
    /// Nesting follows open blocks, not function boundaries: a block opened
    /// and closed inside a helper function called from `body` attaches to
    /// `self` as well.
    pub fn scope<R>(&self, body: impl FnOnce(&Component) -> R) -> R {
        let _guard = self.enter();
        body(self)
    }

    /// Item access.
    ///
    /// An eager component renders with `content` as its children and leaves
    /// itself untouched. A lazy component stores `content` as its children
    /// and returns itself; it can be bound once.
    pub fn bind(&self, content: impl Into<Value>) -> ComponeResult<Value> {
        if let Kind::Element(spec) = self.0.ty.kind() {
            if spec.void {
                return Err(ComponeError::VoidElement {
                    tag: spec.tag.clone(),
                });
            }
        }

        let children = match content.into() {
            Value::List(items) => items,
            single => vec![single],
        };

        match self.0.binding.get() {
            Binding::Eager => {
                let rendered = Renderer::run(&RenderOptions::default(), |renderer| {
                    renderer.component_with(self, &children)
                })?;
                Ok(Value::Safe(rendered))
            }
            Binding::Unbound if self.0.children.borrow().is_empty() => {
                tracing::debug!(
                    component = self.name(),
                    count = children.len(),
                    "bound lazy children"
                );
                *self.0.children.borrow_mut() = children;
                self.0.binding.set(Binding::Bound);
                Ok(Value::Component(self.clone()))
            }
            Binding::Unbound | Binding::Bound => Err(ComponeError::Rebinding {
                component: self.name().to_string(),
            }),
        }
    }

    pub fn render(&self) -> ComponeResult<SafeString> {
        self.render_with(&RenderOptions::default())
    }

    /// Render with explicit options. Called from inside a running render
    /// (from a producer), it joins that render and keeps its options.
    pub fn render_with(&self, options: &RenderOptions) -> ComponeResult<SafeString> {
        Renderer::run(options, |renderer| renderer.component(self))
    }

    /// Render as a whole document, with a doctype when configured.
    pub fn render_document(&self, options: &RenderOptions) -> ComponeResult<SafeString> {
        let body = self.render_with(options)?;
        if options.doctype {
            Ok(SafeString::trusted(crate::render::DOCTYPE) + body)
        } else {
            Ok(body)
        }
    }

    /// The constructed [`ComponentClass`] object, built on first use.
    pub(crate) fn user_instance(&self) -> ComponeResult<Option<Rc<dyn Renderable>>> {
        let Kind::Class { construct, .. } = self.0.ty.kind() else {
            return Ok(None);
        };
        if let Some(user) = self.0.user.get() {
            return Ok(Some(user.clone()));
        }
        let user = construct(&self.0.props)?;
        let _ = self.0.user.set(user.clone());
        Ok(Some(user))
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}(", self.name())?;
        for (i, (key, value)) in self.0.props.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value:?}")?;
        }
        f.write_str(")>")
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render() {
            Ok(text) => f.write_str(text.as_str()),
            Err(err) => {
                tracing::error!(component = self.name(), error = %err, "render failed");
                Err(fmt::Error)
            }
        }
    }
}

impl<T: Into<Value>> AddAssign<T> for Component {
    fn add_assign(&mut self, content: T) {
        self.push(content);
    }
}

impl Mul<usize> for &Component {
    type Output = Component;

    fn mul(self, times: usize) -> Component {
        self.repeat(times)
    }
}

impl Mul<usize> for Component {
    type Output = Component;

    fn mul(self, times: usize) -> Component {
        self.repeat(times)
    }
}

/// Props handed to a producer function.
pub struct Args<'a> {
    component: &'a Component,
    children: Option<&'a SafeString>,
}

impl<'a> Args<'a> {
    pub(crate) fn new(component: &'a Component, children: Option<&'a SafeString>) -> Self {
        Self {
            component,
            children,
        }
    }

    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.component.0.props.get(name)
    }

    /// A prop that must be present.
    pub fn value(&self, name: &str) -> ComponeResult<&'a Value> {
        self.get(name).ok_or_else(|| ComponeError::MissingProp {
            component: self.component.name().to_string(),
            prop: name.to_string(),
        })
    }

    /// A prop that must be text.
    pub fn text(&self, name: &str) -> ComponeResult<&'a str> {
        let value = self.value(name)?;
        value.as_str().ok_or_else(|| {
            ComponeError::render(
                self.component.name(),
                format!("prop '{name}' must be text, got {}", value.type_name()),
            )
        })
    }

    pub fn props(&self) -> &'a Props {
        &self.component.0.props
    }

    /// Rendered children; `None` unless the signature declares `.children()`.
    pub fn children(&self) -> Option<&'a SafeString> {
        self.children
    }

    pub fn component(&self) -> &'a Component {
        self.component
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{content, props};
    use pretty_assertions::assert_eq;

    fn card() -> ComponentType {
        ComponentType::function(
            "Card",
            Signature::new()
                .param("title")
                .param_default("level", 2)
                .keyword_default("tags", Vec::<Value>::new())
                .children(),
            |args| {
                let level = args.value("level")?.as_int().unwrap_or(1);
                Ok(Value::Safe(SafeString::trusted(format!(
                    "<h{level}>{}</h{level}>{}",
                    crate::safe::escape(args.text("title")?),
                    args.children().cloned().unwrap_or_default()
                ))))
            },
        )
        .unwrap()
    }

    #[test]
    fn positional_then_keyword_construction() {
        let c = card()
            .call(vec!["Hello".into()], props! { "level" => 3 })
            .unwrap();

        assert_eq!(c.prop("title"), Some(&Value::from("Hello")));
        assert_eq!(c.prop("level"), Some(&Value::Int(3)));
        assert_eq!(c.prop("tags"), Some(&Value::List(vec![])));
    }

    #[test]
    fn keyword_overrides_positional() {
        let c = card()
            .call(vec!["a".into()], props! { "title" => "b" })
            .unwrap();

        assert_eq!(c.prop("title"), Some(&Value::from("b")));
    }

    #[test]
    fn rejects_unknown_and_surplus_arguments() {
        assert_eq!(
            card().with_props(props! { "color" => "red" }).unwrap_err(),
            ComponeError::UnknownProp {
                component: "Card".to_string(),
                prop: "color".to_string(),
            }
        );
        assert!(matches!(
            card().call(vec![1.into(), 2.into(), 3.into()], Props::new()),
            Err(ComponeError::TooManyArguments {
                expected: 2,
                given: 3,
                ..
            })
        ));
    }

    #[test]
    fn replace_leaves_original_untouched() {
        let c = card().with_props(props! { "title" => "a" }).unwrap();
        let r = c.replace(props! { "title" => "b", "level" => 4 }).unwrap();

        assert_eq!(c.prop("title"), Some(&Value::from("a")));
        assert_eq!(c.prop("level"), Some(&Value::Int(2)));
        assert_eq!(r.prop("title"), Some(&Value::from("b")));
        assert_eq!(r.prop("level"), Some(&Value::Int(4)));
        assert!(!r.ptr_eq(&c));
    }

    #[test]
    fn append_concatenates_existing_props() {
        let c = card()
            .with_props(props! { "title" => "Hello", "tags" => vec!["a"] })
            .unwrap();
        let a = c
            .append(props! { "title" => " world", "tags" => vec!["b"], "level" => 1 })
            .unwrap();

        assert_eq!(a.prop("title"), Some(&Value::from("Hello world")));
        assert_eq!(a.prop("tags"), Some(&Value::from(vec!["a", "b"])));
        assert_eq!(a.prop("level"), Some(&Value::Int(3)));
        assert_eq!(c.prop("title"), Some(&Value::from("Hello")));
    }

    #[test]
    fn append_reports_incompatible_values() {
        let c = card().with_props(props! { "title" => "x" }).unwrap();

        assert_eq!(
            c.append(props! { "level" => "high" }).unwrap_err(),
            ComponeError::Concat {
                prop: "level".to_string(),
                left: "int",
                right: "str",
            }
        );
    }

    #[test]
    fn merge_names_every_conflict() {
        let c = card().with_props(props! { "title" => "x" }).unwrap();

        let err = c
            .merge(props! { "title" => "y", "level" => 1, "tags" => vec![1] })
            .unwrap_err();

        match err {
            ComponeError::Conflict { keys, .. } => {
                assert_eq!(keys, vec!["title", "level", "tags"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn merge_adds_new_keys() {
        let sig = Signature::new().keyword_default("id", Value::None);
        let ty = ComponentType::function("Anchor", sig, |_| Ok(Value::None)).unwrap();
        let c = ty.create().unwrap();

        let merged = c.merge(props! { "id" => "top" }).unwrap();

        assert_eq!(merged.prop("id"), Some(&Value::from("top")));
        assert!(c.prop("id").is_none());
    }

    #[test]
    fn copy_drops_children_and_keeps_props() {
        let c = card().with_props(props! { "title" => "x" }).unwrap();
        c.push("child");

        let copy = c.copy();

        assert!(!copy.ptr_eq(&c));
        assert_eq!(copy.props(), c.props());
        assert!(copy.children().is_empty());
        assert_eq!(c.children().len(), 1);
    }

    #[test]
    fn defaults_are_not_shared_between_instances() {
        let inner = ComponentType::function("Inner", Signature::new().children(), |args| {
            Ok(Value::from(args.children().cloned()))
        })
        .unwrap()
        .create()
        .unwrap();
        let ty = ComponentType::function(
            "Outer",
            Signature::new().param_default("slot", inner),
            |args| Ok(args.value("slot")?.clone()),
        )
        .unwrap();

        let first = ty.create().unwrap();
        if let Some(Value::Component(slot)) = first.prop("slot") {
            slot.push("leaked?");
        }
        let second = ty.create().unwrap();

        assert_eq!(first.render().unwrap(), "leaked?");
        assert_eq!(second.render().unwrap(), "");
    }

    #[test]
    fn eager_bind_renders_without_mutating() {
        let c = card().with_props(props! { "title" => "T" }).unwrap();

        let out = c.bind(content!["a", "<b>"]).unwrap();

        assert_eq!(
            out,
            Value::Safe(SafeString::trusted("<h2>T</h2>a&lt;b&gt;"))
        );
        assert!(c.children().is_empty());
    }

    #[test]
    fn lazy_binds_exactly_once() {
        let c = card().with_props(props! { "title" => "T" }).unwrap();
        let lazy = c.lazy();

        assert!(lazy.is_lazy());
        assert!(!c.is_lazy());

        let bound = lazy.bind("first").unwrap();
        assert_eq!(bound, Value::Component(lazy.clone()));
        assert_eq!(lazy.children(), vec![Value::from("first")]);

        assert_eq!(
            lazy.bind("second").unwrap_err(),
            ComponeError::Rebinding {
                component: "Card".to_string()
            }
        );
        assert_eq!(lazy.render().unwrap(), "<h2>T</h2>first");
    }

    #[test]
    fn lazy_with_attached_children_refuses_binding() {
        let mut lazy = card().with_props(props! { "title" => "T" }).unwrap().lazy();
        lazy += "attached";

        assert!(matches!(
            lazy.bind("bound"),
            Err(ComponeError::Rebinding { .. })
        ));
    }

    #[test]
    fn repetition_builds_a_zero_argument_component() {
        let c = card().with_props(props! { "title" => "x" }).unwrap();

        let many = &c * 2;

        assert_eq!(many.name(), "MultiCard");
        assert!(many.props().is_empty());
        assert_eq!(many.render().unwrap(), "<h2>x</h2><h2>x</h2>");
        assert!(matches!(
            c.times(&Value::Float(1.5)),
            Err(ComponeError::UnsupportedOperand { operator: "*", .. })
        ));
        assert_eq!(c.times(&Value::Int(-1)).unwrap().render().unwrap(), "");
    }

    #[test]
    fn debug_lists_props() {
        let c = card().with_props(props! { "title" => "x" }).unwrap();

        assert_eq!(format!("{c:?}"), r#"<Card(level=2, tags=[], title="x")>"#);
    }

    #[test]
    fn invalid_names_are_definition_errors() {
        let err = ComponentType::function("", Signature::new(), |_| Ok(Value::None));

        assert!(matches!(err, Err(ComponeError::Definition { .. })));
    }

    struct Greeting {
        name: String,
    }

    impl ComponentClass for Greeting {
        const TAKES_CHILDREN: bool = true;

        fn signature() -> Signature {
            Signature::new().param_default("name", "world")
        }

        fn new(props: &Props) -> ComponeResult<Self> {
            let name = props
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            Ok(Self { name })
        }

        fn render(&self, children: Option<&SafeString>) -> ComponeResult<Value> {
            Ok(crate::content![
                format!("Hello {}", self.name),
                children.cloned().unwrap_or_default()
            ])
        }
    }

    #[test]
    fn class_components_receive_props_and_children() {
        let ty = ComponentType::class::<Greeting>("Greeting").unwrap();
        let c = ty.call(vec!["<you>".into()], Props::new()).unwrap();

        let out = c.bind(SafeString::trusted("<br />")).unwrap();

        assert_eq!(
            out,
            Value::Safe(SafeString::trusted("Hello &lt;you&gt;<br />"))
        );
    }

    #[test]
    fn type_level_bind_keeps_children() {
        // Card needs a title, so the lazy instance fails only once rendered
        let c = card().bind("x").unwrap();

        assert_eq!(c.children(), vec![Value::from("x")]);
        assert!(matches!(
            c.render(),
            Err(ComponeError::MissingProp { .. })
        ));
    }

    #[test]
    fn copying_a_cyclic_prop_keeps_the_cycle() {
        let div = crate::element::element("div").unwrap();
        let mut looped = div.create().unwrap();
        let again = looped.clone();
        looped += again;
        let holder = ComponentType::function("Holder", Signature::new().param("slot"), |args| {
            Ok(args.value("slot")?.clone())
        })
        .unwrap();
        let held = holder.with_props(props! { "slot" => &looped }).unwrap();

        let copy = held.copy();
        let replaced = held.replace(props! { "slot" => &looped }).unwrap();

        let slot = copy.prop("slot").and_then(Value::as_component).unwrap();
        assert!(!slot.ptr_eq(&looped));
        let children = slot.children();
        assert_eq!(children.len(), 1);
        assert!(children[0].as_component().unwrap().ptr_eq(slot));
        assert!(replaced
            .prop("slot")
            .and_then(Value::as_component)
            .unwrap()
            .ptr_eq(&looped));
    }
}
