use std::collections::LinkedList;

use itertools::Itertools;

use crate::semantics::{Classification, Document, Element, Tag, TagNode};
use crate::translation::Translator;

/// Lists every element of a page with what it was classified and resolved as,
/// indented by nesting.
pub struct Outline;

impl Translator for Outline {
    fn translate(doc: &Document) -> String {
        let mut context = Context::new();

        for element in &doc.elements {
            append_element(element, &mut context);
        }

        return context.into_string();
    }
}

/// HTML elements that never have a closing tag.
static VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

struct Context {
    tab_size: usize,
    lines: LinkedList<String>,
}

impl Context {
    fn new() -> Self {
        Context {
            tab_size: 0,
            lines: LinkedList::new(),
        }
    }

    fn add_line(&mut self, line: &str) {
        self.lines.push_back(with_tabs(self.tab_size, line));
    }

    fn into_string(self) -> String {
        self.lines.into_iter().join("\n")
    }
}

static TAB_SPACES: &str = "  ";

fn with_tabs(num_tabs: usize, s: &str) -> String {
    str::repeat(TAB_SPACES, num_tabs) + s
}

/// Whether content after this tag is nested inside it.
fn opens_scope(tag: &Tag) -> bool {
    !tag.self_closing()
        && !VOID_ELEMENTS
            .iter()
            .any(|void| void.eq_ignore_ascii_case(tag.name()))
}

fn attributes_suffix(tag: &Tag) -> String {
    if tag.attributes().is_empty() {
        return String::new();
    }
    format!(" {}", tag.attributes())
}

fn append_element(element: &Element, ctx: &mut Context) {
    let node = match element {
        Element::Text(text) => {
            let trimmed = text.text().trim();
            if !trimmed.is_empty() {
                ctx.add_line(&format!("Text {:?}", trimmed));
            }
            return;
        }
        Element::Tag(node) => node,
    };

    let line = match node {
        TagNode::Html(tag) => format!("Html {}{}", tag.name(), attributes_suffix(tag)),
        TagNode::Close(close) => format!("Closing {}", close.name()),
        TagNode::Directive(dir) => {
            format!("Directive {}{}", dir.kind(), attributes_suffix(dir.tag()))
        }
        TagNode::ServerObject(obj) => {
            format!("ServerObject {} class={}", obj.object_id(), obj.object_class())
        }
        TagNode::HtmlControl(ctrl) => format!(
            "HtmlControl {} -> {} id={}",
            ctrl.tag().name(),
            ctrl.control_kind(),
            ctrl.control_id()
        ),
        TagNode::Component(comp) if comp.is_closing() => {
            format!("Closing {}:{}", comp.alias(), comp.local_name())
        }
        TagNode::Component(comp) => format!(
            "ServerControl {}:{} -> {} id={}{}",
            comp.alias(),
            comp.local_name(),
            comp.control_type(),
            comp.control_id().unwrap_or_default(),
            if comp.allows_children() {
                ""
            } else {
                " (no children)"
            }
        ),
        TagNode::Code(code) => format!("{} {:?}", node.classification(), code.source().trim()),
    };

    let closes = match node {
        TagNode::Close(_) => true,
        TagNode::Component(comp) => comp.is_closing(),
        _ => false,
    };
    if closes {
        ctx.tab_size = ctx.tab_size.saturating_sub(1);
        ctx.add_line(&line);
        return;
    }

    ctx.add_line(&line);
    let nests = matches!(
        node.classification(),
        Classification::Html | Classification::HtmlControl | Classification::ServerControl
    );
    if nests && opens_scope(node.tag()) {
        ctx.tab_size += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantics::{Classifier, ControlRegistry, IdGenerator};

    fn translate(source: &str) -> String {
        let ids = IdGenerator::new();
        let doc =
            Document::parse_with(source, Classifier::with(ControlRegistry::new(), &ids)).unwrap();
        Outline::translate(&doc)
    }

    #[test]
    fn test_outline() {
        let outline = translate(
            "<%@ Page Language=\"C#\" %>
<html>
  <body>
    <form runat=\"server\">
      <object id=\"cart\" class=\"Shop.Cart\" runat=\"server\" />
      <input type=\"submit\" runat=\"server\"><br>
      <asp:Panel runat=\"server\" ID=\"p\"><asp:TextBox runat=\"server\" /></asp:Panel>
      <%= cart.Count %>
    </form>
  </body>
</html>",
        );

        assert_eq!(
            outline,
            "Directive PAGE Language=\"C#\"
Html html
  Html body
    HtmlControl form -> HtmlForm id=_control1
      ServerObject cart class=Shop.Cart
      HtmlControl input -> HtmlInputButton id=_control2
      Html br
      ServerControl asp:Panel -> System.Web.UI.WebControls.Panel id=p
        ServerControl asp:TextBox -> System.Web.UI.WebControls.TextBox id=_control3 (no children)
      Closing asp:Panel
      InlineVar \"cart.Count\"
    Closing form
  Closing body
Closing html"
        );
    }

    #[test]
    fn test_text_lines() {
        assert_eq!(
            translate("  hello  <b>x</b>\n"),
            "Text \"hello\"\nHtml b\n  Text \"x\"\nClosing b"
        );
    }
}
