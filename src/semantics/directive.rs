use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use itertools::Itertools;
use lazy_static::lazy_static;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use super::attributes::AttributeBag;
use super::base::{Classification, Error, Result, Tag};

/// The page-level instructions written as `<%@ Kind ... %>`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "UPPERCASE")]
#[strum(ascii_case_insensitive)]
pub enum DirectiveKind {
    Page,
    Control,
    Import,
    Implements,
    Register,
    Assembly,
    OutputCache,
    Reference,
}

impl DirectiveKind {
    /// The attribute names this directive accepts, as documented.
    fn allowed_attributes(self) -> &'static [&'static str] {
        match self {
            DirectiveKind::Page => &[
                "AspCompat",
                "AutoEventWireup",
                "Buffer",
                "ClassName",
                "ClientTarget",
                "CodePage",
                "CompilerOptions",
                "ContentType",
                "Culture",
                "Debug",
                "Description",
                "EnableSessionState",
                "EnableViewState",
                "EnableViewStateMac",
                "ErrorPage",
                "Explicit",
                "Inherits",
                "Language",
                "LCID",
                "ResponseEncoding",
                "Src",
                "SmartNavigation",
                "Strict",
                "Trace",
                "TraceMode",
                "Transaction",
                "UICulture",
                "WarningLevel",
            ],
            DirectiveKind::Control => &[
                "AutoEventWireup",
                "ClassName",
                "CompilerOptions",
                "Debug",
                "Description",
                "EnableViewState",
                "Explicit",
                "Inherits",
                "Language",
                "Strict",
                "Src",
                "WarningLevel",
            ],
            DirectiveKind::Import => &["namespace"],
            DirectiveKind::Implements => &["interface"],
            DirectiveKind::Register => &["tagprefix", "tagname", "Namespace", "Src", "Assembly"],
            DirectiveKind::Assembly => &["name", "src"],
            DirectiveKind::OutputCache => &[
                "Duration",
                "Location",
                "VaryByControl",
                "VaryByCustom",
                "VaryByHeader",
                "VaryByParam",
            ],
            DirectiveKind::Reference => &["page", "control"],
        }
    }
}

lazy_static! {
    /// Lower-cased attribute whitelist of every directive.
    static ref DIRECTIVE_ATTRIBUTES: HashMap<DirectiveKind, HashSet<String>> = DirectiveKind::iter()
        .map(|kind| {
            let allowed = kind
                .allowed_attributes()
                .iter()
                .map(|att| att.to_lowercase())
                .collect();
            (kind, allowed)
        })
        .collect();
}

/// Whether `name` names one of the directives, in any case.
pub fn is_directive_name(name: &str) -> bool {
    DirectiveKind::from_str(name).is_ok()
}

/// A validated `<%@ ... %>` directive.
#[derive(Debug, Clone)]
pub struct Directive {
    tag: Tag,
    kind: DirectiveKind,
}

impl Directive {
    pub fn new(name: &str, attributes: AttributeBag) -> Result<Directive> {
        let tag = Tag::new(name, attributes, true)?;
        Directive::from_tag(tag)
    }

    /// Validates an already built tag as a directive.
    pub fn from_tag(tag: Tag) -> Result<Directive> {
        let kind = DirectiveKind::from_str(tag.name())
            .map_err(|_| Error::UnknownDirective(Rc::from(tag.name())))?;

        let allowed = &DIRECTIVE_ATTRIBUTES[&kind];
        if let Some(att) = tag
            .attributes()
            .keys()
            .find(|att| !allowed.contains(&att.to_lowercase()))
        {
            return Err(Error::InvalidAttribute(Rc::from(att), kind));
        }

        tracing::debug!("directive {} with {} attributes", kind, tag.attributes().count());
        return Ok(Directive {
            tag: tag.force_self_closing().classified(Classification::Directive),
            kind,
        });
    }

    pub fn kind(&self) -> DirectiveKind {
        self.kind
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn attributes(&self) -> &AttributeBag {
        self.tag.attributes()
    }

    /// The directive in its source form, `<%@ Name key="value" %>`.
    pub fn render(&self) -> String {
        let parts = std::iter::once(self.tag.name().to_owned())
            .chain(self.attributes().iter().map(|att| att.to_string()))
            .join(" ");
        format!("<%@ {} %>", parts)
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.render())
    }
}
