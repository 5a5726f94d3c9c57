use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;

use strum_macros::{AsRefStr, Display};

use super::attributes::AttributeBag;
use super::directive::DirectiveKind;
use super::ids::IdGenerator;
use crate::parser::Rule;

/// Why a tag (or a whole page) could not be classified.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A tag was constructed without a name.
    #[error("tag name must not be empty")]
    EmptyTagName,
    /// The key was added twice to a `runat="server"` tag.
    #[error("attribute {0} is set more than once on a runat=\"server\" tag")]
    DuplicateAttributeKey(Rc<str>),
    /// An update targeted a key that was never added.
    #[error("attribute {0} is not present")]
    UnknownAttribute(Rc<str>),
    /// The name of a `<%@ ... %>` tag is not a known directive.
    #[error("unknown directive: {0}")]
    UnknownDirective(Rc<str>),
    /// The attribute is not in the directive's whitelist.
    #[error("attribute {0} not valid for directive {1}")]
    InvalidAttribute(Rc<str>, DirectiveKind),
    #[error(
        "incorrect syntax: expected <object id=\"name\" class=\"full.class.name\" runat=\"server\" />"
    )]
    MalformedObjectDeclaration,
    #[error("INPUT tag without TYPE attribute")]
    MissingTypeAttribute,
    #[error("unknown input type: {0}")]
    UnknownInputType(Rc<str>),
    /// A custom control tag without the `prefix:` part.
    #[error("control tag {0} is not of the form prefix:name")]
    MalformedComponentName(Rc<str>),
    /// No control type is registered for `prefix:name`.
    #[error("no control registered for {0}:{1}")]
    UnknownControlType(Rc<str>, Rc<str>),
    /// The markup could not be tokenized.
    #[error("syntax error: {0}")]
    Syntax(Box<pest::error::Error<Rule>>),
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<pest::error::Error<Rule>> for Error {
    fn from(value: pest::error::Error<Rule>) -> Self {
        return Error::Syntax(Box::new(value));
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// The category a tag is assigned when a specialization is built from it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Display, AsRefStr)]
pub enum Classification {
    /// Not yet handed to a specialization.
    Unclassified,
    /// `<%@ Page ... %>` and friends.
    Directive,
    /// Plain HTML passed through untouched.
    Html,
    /// An HTML element marked `runat="server"`.
    HtmlControl,
    /// A `prefix:name` custom control.
    ServerControl,
    /// `<%= expression %>`.
    InlineVar,
    /// `<% code %>`.
    InlineCode,
    Closing,
    /// `<object runat="server" />`.
    ServerObject,
}

/// A tag occurrence: name, attributes, and whether it closed itself.
#[derive(Debug, Clone)]
pub struct Tag {
    name: Rc<str>,
    attributes: AttributeBag,
    self_closing: bool,
    classification: Classification,
}

impl Tag {
    pub fn new(name: &str, attributes: AttributeBag, self_closing: bool) -> Result<Tag> {
        if name.is_empty() {
            return Err(Error::EmptyTagName);
        }

        return Ok(Tag {
            name: Rc::from(name),
            attributes,
            self_closing,
            classification: Classification::Unclassified,
        });
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &AttributeBag {
        &self.attributes
    }

    pub fn self_closing(&self) -> bool {
        self.self_closing
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    /// Passes the tag through as plain HTML.
    pub fn into_html(self) -> Tag {
        self.classified(Classification::Html)
    }

    pub(super) fn classified(mut self, classification: Classification) -> Tag {
        self.classification = classification;
        self
    }

    pub(super) fn force_self_closing(mut self) -> Tag {
        self.self_closing = true;
        self
    }

    /// Adds a generated `ID` unless the tag already carries a non-empty one.
    pub(super) fn ensure_id(&mut self, ids: &IdGenerator) -> Result<()> {
        if self.attributes.get("ID").map_or(false, |id| !id.is_empty()) {
            return Ok(());
        }
        let id = ids.next_id();
        tracing::debug!("assigning id {} to <{}>", id, self.name);
        self.attributes.put("ID", &id)
    }

    /// The tag as markup, attributes in enumeration order.
    pub fn render(&self) -> String {
        let mut plain = String::from("<");
        if self.classification == Classification::Closing {
            plain.push('/');
        }
        plain.push_str(&self.name);
        if !self.attributes.is_empty() {
            plain.push(' ');
            plain.push_str(&self.attributes.to_string());
        }
        if self.self_closing {
            plain.push('/');
        }
        plain.push('>');
        plain
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// A `</name>` tag.
#[derive(Debug, Clone)]
pub struct CloseTag {
    tag: Tag,
}

impl CloseTag {
    pub fn new(name: &str) -> Result<CloseTag> {
        let tag = Tag::new(name, AttributeBag::new(), false)?;
        return Ok(CloseTag {
            tag: tag.classified(Classification::Closing),
        });
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn name(&self) -> &str {
        self.tag.name()
    }
}

impl From<CloseTag> for Tag {
    fn from(value: CloseTag) -> Self {
        value.tag
    }
}
