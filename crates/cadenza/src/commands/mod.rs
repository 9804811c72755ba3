//! CLI command implementations.

pub(crate) mod list;
pub(crate) mod render;
pub(crate) mod serve;

pub(crate) use list::ListArgs;
pub(crate) use render::RenderArgs;
pub(crate) use serve::ServeArgs;
