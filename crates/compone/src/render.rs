//! The escape/render pipeline.
//!
//! Every content unit is either raw (escaped on output) or safe (emitted
//! verbatim). Children are resolved into one safe blob first, then handed to
//! the component's content-producing step, whose result goes through the
//! same rules again.

use std::cell::Cell;

use serde::Deserialize;

use crate::component::{Args, Component, Kind, Renderable};
use crate::element;
use crate::error::{ComponeError, ComponeResult};
use crate::safe::{escape, SafeString};
use crate::value::Value;

pub(crate) const DOCTYPE: &str = "<!DOCTYPE html>\n";

/// Rendering configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Maximum component nesting depth. Cyclic component graphs fail with
    /// [`ComponeError::RecursionLimit`] once they reach it.
    pub max_depth: usize,

    /// Prefix documents rendered with `render_document` with a doctype.
    pub doctype: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_depth: 128,
            doctype: false,
        }
    }
}

impl RenderOptions {
    /// Read options from the `[render]` table of a TOML document.
    ///
    /// A missing table or missing keys fall back to the defaults.
    pub fn from_toml_str(source: &str) -> ComponeResult<Self> {
        #[derive(Deserialize, Default)]
        struct ConfigFile {
            #[serde(default)]
            render: RenderOptions,
        }

        let file: ConfigFile = toml::from_str(source)?;
        if file.render.max_depth == 0 {
            return Err(ComponeError::Config(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(file.render)
    }
}

#[derive(Debug, Clone, Copy)]
struct Session {
    options: RenderOptions,
    depth: usize,
}

thread_local! {
    /// The render running on this thread, if any. Renders started from
    /// inside a producer join it instead of starting over.
    static SESSION: Cell<Option<Session>> = const { Cell::new(None) };
}

/// Ends the thread's render session, also during unwinding.
struct SessionGuard;

impl SessionGuard {
    fn start(options: RenderOptions) -> Self {
        SESSION.with(|session| session.set(Some(Session { options, depth: 0 })));
        SessionGuard
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        SESSION.with(|session| session.set(None));
    }
}

/// One level of component nesting in the running session.
struct DepthGuard;

impl DepthGuard {
    fn enter() -> ComponeResult<Self> {
        SESSION.with(|cell| {
            let Some(mut session) = cell.get() else {
                return Ok(DepthGuard);
            };
            if session.depth >= session.options.max_depth {
                return Err(ComponeError::RecursionLimit {
                    max_depth: session.options.max_depth,
                });
            }
            session.depth += 1;
            cell.set(Some(session));
            Ok(DepthGuard)
        })
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        SESSION.with(|cell| {
            if let Some(mut session) = cell.get() {
                session.depth = session.depth.saturating_sub(1);
                cell.set(Some(session));
            }
        });
    }
}

/// Recursive renderer. Depth is tracked per thread, so a component bound
/// or rendered from inside a producer counts toward the same limit.
pub(crate) struct Renderer;

impl Renderer {
    /// Run `f` inside the render already running on this thread, or start
    /// one with `options`. A nested render keeps the outer render's options.
    pub(crate) fn run<R>(
        options: &RenderOptions,
        f: impl FnOnce(&mut Renderer) -> ComponeResult<R>,
    ) -> ComponeResult<R> {
        let mut renderer = Renderer;
        if SESSION.with(Cell::get).is_some() {
            return f(&mut renderer);
        }
        let _session = SessionGuard::start(*options);
        f(&mut renderer)
    }

    /// Render a component with its attached children.
    pub(crate) fn component(&mut self, component: &Component) -> ComponeResult<SafeString> {
        let children = component.children();
        self.component_with(component, &children)
    }

    /// Render a component with the given children instead of its own.
    pub(crate) fn component_with(
        &mut self,
        component: &Component,
        children: &[Value],
    ) -> ComponeResult<SafeString> {
        let _depth = DepthGuard::enter()?;
        let resolved = self.children(children)?;
        self.produce(component, resolved)
    }

    /// Resolve a sequence of siblings into one safe blob.
    pub(crate) fn children(&mut self, items: &[Value]) -> ComponeResult<SafeString> {
        items.iter().map(|item| self.value(item)).collect()
    }

    /// Resolve one content unit.
    pub(crate) fn value(&mut self, value: &Value) -> ComponeResult<SafeString> {
        match value {
            Value::Component(component) => self.component(component),
            Value::Safe(safe) => Ok(safe.clone()),
            Value::Str(text) => Ok(escape(text)),
            Value::List(items) => self.children(items),
            scalar => Ok(escape(&scalar.scalar_text().unwrap_or_default())),
        }
    }

    /// Run the component's content-producing step on resolved children.
    fn produce(&mut self, component: &Component, children: SafeString) -> ComponeResult<SafeString> {
        let ty = component.component_type();
        match ty.kind() {
            Kind::Function { produce } => {
                check_required(component)?;
                let passed = ty.signature().takes_children().then_some(&children);
                let content = produce(&Args::new(component, passed))?;
                self.value(&content)
            }
            Kind::Class { takes_children, .. } => {
                check_required(component)?;
                let content = match component.user_instance()? {
                    Some(user) => user.render(takes_children.then_some(&children))?,
                    None => Value::None,
                };
                self.value(&content)
            }
            Kind::Element(spec) => element::render(self, spec, component.props(), children),
            Kind::Repeat { source, times } => Ok(self.component(source)?.repeat(*times)),
        }
    }
}

fn check_required(component: &Component) -> ComponeResult<()> {
    let signature = component.component_type().signature();
    match signature
        .required()
        .find(|name| !component.props().contains_key(*name))
    {
        Some(missing) => Err(ComponeError::MissingProp {
            component: component.name().to_string(),
            prop: missing.to_string(),
        }),
        None => Ok(()),
    }
}
