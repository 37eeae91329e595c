pub mod catalog;
pub mod render;
