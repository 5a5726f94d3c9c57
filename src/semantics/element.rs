use std::fmt;

use super::attributes::AttributeBag;
use super::base::{Classification, CloseTag, Result, Tag};
use super::component::Component;
use super::directive::Directive;
use super::html::HtmlControlTag;
use super::server_object::ServerObjectTag;

/// A run of literal text between tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlainText {
    text: String,
}

impl PlainText {
    pub fn new(text: &str) -> PlainText {
        PlainText {
            text: text.to_owned(),
        }
    }

    pub fn append(&mut self, more: &str) {
        self.text.push_str(more);
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A `<% code %>` block or a `<%= expression %>`.
#[derive(Debug, Clone)]
pub struct InlineCode {
    tag: Tag,
    source: String,
}

impl InlineCode {
    pub fn code(source: &str) -> Result<InlineCode> {
        InlineCode::build("%", source, Classification::InlineCode)
    }

    pub fn expression(source: &str) -> Result<InlineCode> {
        InlineCode::build("%=", source, Classification::InlineVar)
    }

    fn build(marker: &str, source: &str, classification: Classification) -> Result<InlineCode> {
        let tag = Tag::new(marker, AttributeBag::new(), false)?;
        return Ok(InlineCode {
            tag: tag.classified(classification),
            source: source.to_owned(),
        });
    }

    /// The code between the markers, untrimmed.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_expression(&self) -> bool {
        self.tag.classification() == Classification::InlineVar
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn render(&self) -> String {
        format!("<{}{}%>", self.tag.name(), self.source)
    }
}

/// A classified tag.
#[derive(Debug, Clone)]
pub enum TagNode {
    Html(Tag),
    Close(CloseTag),
    Directive(Directive),
    ServerObject(ServerObjectTag),
    HtmlControl(HtmlControlTag),
    Component(Component),
    Code(InlineCode),
}

impl TagNode {
    pub fn tag(&self) -> &Tag {
        match self {
            TagNode::Html(tag) => tag,
            TagNode::Close(close) => close.tag(),
            TagNode::Directive(dir) => dir.tag(),
            TagNode::ServerObject(obj) => obj.tag(),
            TagNode::HtmlControl(ctrl) => ctrl.tag(),
            TagNode::Component(comp) => comp.tag(),
            TagNode::Code(code) => code.tag(),
        }
    }

    pub fn classification(&self) -> Classification {
        self.tag().classification()
    }

    /// The node as it would appear in a page.
    pub fn render(&self) -> String {
        match self {
            TagNode::Directive(dir) => dir.render(),
            TagNode::Component(comp) => comp.render(),
            TagNode::Code(code) => code.render(),
            other => other.tag().render(),
        }
    }
}

/// A node of a classified page.
#[derive(Debug, Clone)]
pub enum Element {
    Text(PlainText),
    Tag(TagNode),
}

impl Element {
    pub fn as_text(&self) -> Option<&PlainText> {
        match self {
            Element::Text(text) => Some(text),
            Element::Tag(_) => None,
        }
    }

    pub fn as_tag(&self) -> Option<&TagNode> {
        match self {
            Element::Tag(node) => Some(node),
            Element::Text(_) => None,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return match self {
            Element::Text(text) => f.write_str(text.text()),
            Element::Tag(node) => f.write_str(&node.render()),
        };
    }
}

macro_rules! impl_from_for_element {
    ($($variant:ident => $ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Element {
                fn from(value: $ty) -> Self {
                    Element::Tag(TagNode::$variant(value))
                }
            }
        )+
    };
}

impl_from_for_element!(
    Close => CloseTag,
    Directive => Directive,
    ServerObject => ServerObjectTag,
    HtmlControl => HtmlControlTag,
    Component => Component,
    Code => InlineCode,
);

impl From<PlainText> for Element {
    fn from(value: PlainText) -> Self {
        Element::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_appends() {
        let mut text = PlainText::new("Hello");
        text.append(", ");
        assert_eq!(text.text(), "Hello, ");

        text.append("world");
        assert_eq!(text.text(), "Hello, world");
    }

    #[test]
    fn test_inline_code() {
        let code = InlineCode::code(" if (x) { ").unwrap();
        let expr = InlineCode::expression(" DateTime.Now ").unwrap();

        assert_eq!(code.tag().classification(), Classification::InlineCode);
        assert!(!code.is_expression());
        assert_eq!(code.render(), "<% if (x) { %>");
        assert_eq!(expr.tag().classification(), Classification::InlineVar);
        assert_eq!(expr.render(), "<%= DateTime.Now %>");
    }

    #[test]
    fn test_element_display() {
        let close: Element = CloseTag::new("p").unwrap().into();
        let text: Element = PlainText::new("hi").into();

        assert_eq!(close.to_string(), "</p>");
        assert_eq!(text.to_string(), "hi");
        assert_eq!(
            close.as_tag().map(TagNode::classification),
            Some(Classification::Closing)
        );
        assert!(text.as_tag().is_none());
    }
}
