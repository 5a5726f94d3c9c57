//! Page-markup object model for ASP.NET style pages.
//!
//! Markup is tokenized by [parser], every tag is classified and validated by
//! [semantics], and [translators] turn a classified [semantics::Document] back
//! into text.

pub mod parser;
pub mod semantics;
pub mod translation;
pub mod translators;

pub use semantics::{Document, Error, Result};
