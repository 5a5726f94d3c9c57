//! Classification, validation and control resolution of page tags.
//!
//! Every tag occurrence is turned into one specialization of [Tag]: a [Directive],
//! a plain HTML [Tag], an [HtmlControlTag], a [Component], a [ServerObjectTag], a
//! [CloseTag] or an [InlineCode] block. Building a specialization validates the tag
//! and either yields the finished node or an [Error]; nothing half-built escapes.

mod attributes;
mod base;
mod component;
mod directive;
mod document;
mod element;
mod html;
mod ids;
mod registry;
mod server_object;

pub use attributes::{AttrKey, Attribute, AttributeBag};
pub use base::{Classification, CloseTag, Error, Result, Tag};
pub use component::Component;
pub use directive::{is_directive_name, Directive, DirectiveKind};
pub use document::{Classifier, Document};
pub use element::{Element, InlineCode, PlainText, TagNode};
pub use html::{resolve_control_kind, ControlKind, HtmlControlTag};
pub use ids::{IdGenerator, GENERATED_ID_PREFIX};
pub use registry::{ControlRegistry, ControlType, TypeRegistry, WEB_CONTROLS_NAMESPACE};
pub use server_object::ServerObjectTag;
