//! HTTP request handlers.

pub(crate) mod instruments;
pub(crate) mod lessons;
pub(crate) mod pages;
