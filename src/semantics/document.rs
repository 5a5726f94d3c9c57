use std::path::Path;
use std::rc::Rc;

use super::attributes::AttributeBag;
use super::base::{CloseTag, Error, Result, Tag};
use super::component::Component;
use super::directive::{Directive, DirectiveKind};
use super::element::{Element, InlineCode, PlainText, TagNode};
use super::html::HtmlControlTag;
use super::ids::IdGenerator;
use super::registry::{ControlRegistry, TypeRegistry};
use super::server_object::ServerObjectTag;
use crate::parser::{tokenize, RawAttribute, Token};

/// Turns tokens into classified [Element]s, one page at a time.
pub struct Classifier<'a> {
    registry: ControlRegistry,
    ids: &'a IdGenerator,
    elements: Vec<Element>,
    /// Names of server components opened and not yet closed, innermost last.
    open_components: Vec<Rc<str>>,
}

impl Classifier<'static> {
    /// A classifier using the stock controls and the process-wide [IdGenerator].
    pub fn new() -> Classifier<'static> {
        Classifier::with(ControlRegistry::new(), IdGenerator::global())
    }
}

impl Default for Classifier<'static> {
    fn default() -> Self {
        Classifier::new()
    }
}

fn bag(attributes: &[RawAttribute]) -> Result<AttributeBag> {
    AttributeBag::from_pairs(
        attributes
            .iter()
            .map(|(key, value)| (key.as_ref(), value.as_deref())),
    )
}

impl<'a> Classifier<'a> {
    pub fn with(registry: ControlRegistry, ids: &'a IdGenerator) -> Classifier<'a> {
        Classifier {
            registry,
            ids,
            elements: vec![],
            open_components: vec![],
        }
    }

    pub fn registry(&self) -> &ControlRegistry {
        &self.registry
    }

    /// Classifies one token and appends the result.
    pub fn push(&mut self, token: &Token) -> Result<()> {
        let element = match token {
            Token::Text(text) => {
                if let Some(Element::Text(last)) = self.elements.last_mut() {
                    last.append(text);
                    return Ok(());
                }
                Element::Text(PlainText::new(text))
            }
            Token::Directive { name, attributes } => {
                let directive = Directive::new(name, bag(attributes)?)?;
                self.register(&directive);
                directive.into()
            }
            Token::Code { source, expression } => {
                if *expression {
                    InlineCode::expression(source)?.into()
                } else {
                    InlineCode::code(source)?.into()
                }
            }
            Token::Close(name) => self.close_tag(name)?,
            Token::Open {
                name,
                attributes,
                self_closing,
            } => {
                let tag = Tag::new(name, bag(attributes)?, *self_closing)?;
                self.open_tag(tag)?
            }
        };
        self.elements.push(element);
        Ok(())
    }

    /// A close tag ends a [Component] only when it matches a server component still open.
    fn close_tag(&mut self, name: &str) -> Result<Element> {
        let close = CloseTag::new(name)?;
        let Some(idx) = self
            .open_components
            .iter()
            .rposition(|open| open.eq_ignore_ascii_case(name))
        else {
            return Ok(close.into());
        };
        self.open_components.remove(idx);

        let resolved = name
            .split_once(':')
            .and_then(|(prefix, local)| self.registry.resolve(prefix, local));
        return match resolved {
            Some(control_type) => Ok(Component::with_ids(
                close.into(),
                control_type,
                &self.registry,
                self.ids,
            )?
            .into()),
            None => Ok(close.into()),
        };
    }

    fn open_tag(&mut self, tag: Tag) -> Result<Element> {
        if !tag.attributes().is_server_tagged() {
            return Ok(Element::Tag(TagNode::Html(tag.into_html())));
        }

        if tag.name().eq_ignore_ascii_case("object") {
            return Ok(ServerObjectTag::new(tag)?.into());
        }

        if let Some((prefix, local)) = tag.name().split_once(':') {
            let control_type = self.registry.resolve(prefix, local).ok_or_else(|| {
                Error::UnknownControlType(Rc::from(prefix), Rc::from(local))
            })?;
            let component = Component::with_ids(tag, control_type, &self.registry, self.ids)?;
            if !component.tag().self_closing() {
                self.open_components.push(Rc::from(component.tag().name()));
            }
            return Ok(component.into());
        }

        Ok(HtmlControlTag::with_ids(tag, self.ids)?.into())
    }

    /// Makes controls declared by `<%@ Register %>` resolvable for the rest of the page.
    fn register(&mut self, directive: &Directive) {
        if directive.kind() != DirectiveKind::Register {
            return;
        }

        let attributes = directive.attributes();
        let Some(prefix) = attributes.get("tagprefix") else {
            tracing::warn!("Register directive without TagPrefix ignored");
            return;
        };
        match (
            attributes.get("tagname"),
            attributes.get("src"),
            attributes.get("namespace"),
        ) {
            (Some(name), Some(src), _) => self.registry.register_user_control(prefix, name, src),
            (_, _, Some(namespace)) => self.registry.register_namespace(prefix, namespace),
            _ => tracing::warn!("Register directive for {} names no control", prefix),
        }
    }

    pub fn finish(self) -> Vec<Element> {
        self.elements
    }
}

/// A classified page.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub elements: Vec<Element>,
}

impl Document {
    /// Tokenizes and classifies `source` with the stock controls.
    pub fn parse(source: &str) -> Result<Document> {
        Document::parse_with(source, Classifier::new())
    }

    pub fn parse_with(source: &str, mut classifier: Classifier<'_>) -> Result<Document> {
        for token in tokenize(source)? {
            classifier.push(&token)?;
        }
        let elements = classifier.finish();
        tracing::debug!("classified page into {} elements", elements.len());
        return Ok(Document { elements });
    }

    /// Reads and classifies a page file.
    pub fn load(path: &Path) -> Result<Document> {
        let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("loaded {} ({} bytes)", path.display(), source.len());
        Document::parse(&source)
    }

    pub fn tags(&self) -> impl Iterator<Item = &TagNode> {
        self.elements.iter().filter_map(Element::as_tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantics::{Classification, ControlKind};

    fn parse(source: &str, ids: &IdGenerator) -> Result<Document> {
        Document::parse_with(source, Classifier::with(ControlRegistry::new(), ids))
    }

    fn classifications(doc: &Document) -> Vec<Classification> {
        doc.tags().map(TagNode::classification).collect()
    }

    #[test]
    fn test_classifies_each_kind() {
        let ids = IdGenerator::new();
        let doc = parse(
            "<%@ Page Language=\"C#\" %>\
             <html><form runat=\"server\">\
             <object id=\"cart\" class=\"Shop.Cart\" runat=\"server\" />\
             <asp:Button Text=\"Go\" runat=\"server\" />\
             <%= cart.Count %><% Render(); %>\
             </form></html>",
            &ids,
        )
        .unwrap();

        assert_eq!(
            classifications(&doc),
            vec![
                Classification::Directive,
                Classification::Html,
                Classification::HtmlControl,
                Classification::ServerObject,
                Classification::ServerControl,
                Classification::InlineVar,
                Classification::InlineCode,
                Classification::Closing,
                Classification::Closing,
            ]
        );
    }

    #[test]
    fn test_generated_ids_follow_document_order() {
        let ids = IdGenerator::new();
        let doc = parse(
            "<form runat=server><asp:Label runat=server /><td runat=server id=c1></td>\
             <select runat=server></select></form>",
            &ids,
        )
        .unwrap();

        let generated: Vec<_> = doc
            .tags()
            .filter_map(|node| match node {
                TagNode::HtmlControl(ctrl) => Some(ctrl.control_id().to_owned()),
                TagNode::Component(comp) => comp.control_id().map(str::to_owned),
                _ => None,
            })
            .collect();
        assert_eq!(generated, vec!["_control1", "_control2", "c1", "_control3"]);
    }

    #[test]
    fn test_adjacent_text_is_merged() {
        let ids = IdGenerator::new();
        let doc = parse("a < b<%-- x --%> c<p>", &ids).unwrap();

        assert_eq!(doc.elements.len(), 2);
        assert_eq!(doc.elements[0].as_text().map(PlainText::text), Some("a < b c"));
    }

    #[test]
    fn test_html_controls_resolve() {
        let ids = IdGenerator::new();
        let doc = parse("<input type=\"Password\" runat=\"server\" id=\"pw\"/>", &ids).unwrap();

        match doc.tags().next() {
            Some(TagNode::HtmlControl(ctrl)) => {
                assert_eq!(ctrl.control_kind(), ControlKind::InputText);
                assert_eq!(ctrl.control_id(), "pw");
            }
            other => panic!("expected an html control, got {:?}", other),
        };
    }

    #[test]
    fn test_plain_tags_keep_duplicates() {
        let ids = IdGenerator::new();
        let doc = parse("<a att=\"x\" att=\"y\">", &ids).unwrap();

        let tag = doc.tags().next().unwrap().tag();
        assert_eq!(tag.attributes().count(), 2);
        assert_eq!(ids.next_id(), "_control1");
    }

    #[test]
    fn test_register_user_control() {
        let ids = IdGenerator::new();
        let doc = parse(
            "<%@ Register TagPrefix=\"uc\" TagName=\"Header\" Src=\"header.ascx\" %>\
             <uc:Header runat=\"server\" ID=\"top\"></uc:Header>",
            &ids,
        )
        .unwrap();

        let components: Vec<_> = doc
            .tags()
            .filter_map(|node| match node {
                TagNode::Component(comp) => Some(comp),
                _ => None,
            })
            .collect();
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].control_type().name(), "header.ascx");
        assert_eq!(components[0].control_id(), Some("top"));
        assert!(components[1].is_closing());
    }

    #[test]
    fn test_register_namespace() {
        let ids = IdGenerator::new();
        let doc = parse(
            "<%@ Register TagPrefix=\"my\" Namespace=\"My.Controls\" Assembly=\"My\" %>\
             <my:Widget runat=\"server\" />",
            &ids,
        )
        .unwrap();

        match doc.tags().last() {
            Some(TagNode::Component(comp)) => {
                assert_eq!(comp.control_type().name(), "My.Controls.Widget");
                assert_eq!(comp.alias(), "my");
            }
            other => panic!("expected a component, got {:?}", other),
        };
    }

    #[test]
    fn test_close_tag_follows_its_opener() {
        let ids = IdGenerator::new();
        let doc = parse(
            "<asp:Panel>x</asp:Panel>\
             <asp:Panel runat=\"server\"><asp:Label runat=\"server\"/></ASP:PANEL>\
             </asp:Panel>",
            &ids,
        )
        .unwrap();

        assert_eq!(
            classifications(&doc),
            vec![
                Classification::Html,
                Classification::Closing,
                Classification::ServerControl,
                Classification::ServerControl,
                Classification::ServerControl,
                Classification::Closing,
            ]
        );
        assert!(matches!(doc.tags().nth(4), Some(TagNode::Component(comp)) if comp.is_closing()));
    }

    #[test]
    fn test_unknown_control_type() {
        let ids = IdGenerator::new();
        let result = parse("<uc:Footer runat=\"server\" />", &ids);

        assert!(matches!(
            result,
            Err(Error::UnknownControlType(ref prefix, ref name)) if &**prefix == "uc" && &**name == "Footer"
        ));
    }

    #[test]
    fn test_unregistered_prefix_without_runat_is_html() {
        let ids = IdGenerator::new();
        let doc = parse("<svg:rect width=\"1\"></svg:rect>", &ids).unwrap();

        assert_eq!(
            classifications(&doc),
            vec![Classification::Html, Classification::Closing]
        );
    }

    #[test]
    fn test_errors_abort_the_page() {
        let ids = IdGenerator::new();

        assert!(matches!(
            parse("<%@ Page Bogus=\"1\" %>", &ids),
            Err(Error::InvalidAttribute(..))
        ));
        assert!(matches!(
            parse("<%@ Frob %>", &ids),
            Err(Error::UnknownDirective(_))
        ));
        assert!(matches!(
            parse("<input runat=\"server\">", &ids),
            Err(Error::MissingTypeAttribute)
        ));
        assert!(matches!(
            parse("<object id=\"o\" runat=\"server\" />", &ids),
            Err(Error::MalformedObjectDeclaration)
        ));
        assert!(matches!(
            parse("<b id=1 runat=server ID=2>", &ids),
            Err(Error::DuplicateAttributeKey(_))
        ));
    }
}
