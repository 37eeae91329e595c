//! HTML element catalog for compone.
//!
//! Every function returns a fresh element [`ComponentType`](compone::ComponentType):
//!
//! ```ignore
//! use compone_html::{div, h1, p};
//!
//! let page = div().bind(compone::content![h1().bind("Title")?, p().bind("Body")?])?;
//! assert_eq!(page.render()?, "<div><h1>Title</h1><p>Body</p></div>");
//! ```

pub mod elements;
pub mod helpers;

pub use elements::*;
pub use helpers::classes;
