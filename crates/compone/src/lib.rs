//! Composable HTML components.
//!
//! Components take named props and nested content and render to escaped
//! text. Nesting can be written three ways:
//!
//! - item access: `div.bind(content![h1.bind("Title")?, "text"])`
//! - explicit attachment: `page += section;`
//! - scoped blocks: a component whose block opens and closes inside another
//!   component's block attaches itself to it.
//!
//! ```ignore
//! use compone::{content, element, props, Signature, ComponentType, Value};
//!
//! let div = element("div")?;
//! let card = ComponentType::function(
//!     "Card",
//!     Signature::new().param("title").children(),
//!     |args| Ok(content![args.value("title")?.clone(), args.children().cloned()]),
//! )?;
//!
//! let page = div.create()?;
//! page.scope(|_| {
//!     let body = card.with_props(props! { "title" => "Hello" }).unwrap();
//!     body.scope(|body| body.push("<world>"));
//! });
//! assert_eq!(page.render()?, "<div>Hello&lt;world&gt;</div>");
//! ```

pub mod component;
pub mod context;
pub mod element;
pub mod error;
pub mod render;
pub mod safe;
pub mod signature;
pub mod value;

pub use component::{Args, Component, ComponentClass, ComponentType, ProducerFn};
pub use context::{current_parent, current_scope, ScopeGuard, ScopeId};
pub use element::{element, void_element, ElementBuilder};
pub use error::{ComponeError, ComponeResult};
pub use render::RenderOptions;
pub use safe::{escape, Escape, SafeString};
pub use signature::{Param, ParamKind, Signature, CHILDREN};
pub use value::{Props, Value};
