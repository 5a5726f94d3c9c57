use std::rc::Rc;

use super::base::{Classification, Error, Result, Tag};
use super::ids::IdGenerator;
use super::registry::{ControlType, TypeRegistry};

/// A custom server control such as `<asp:Button runat="server" />` or its `</asp:Button>`.
#[derive(Debug, Clone)]
pub struct Component {
    tag: Tag,
    control_type: ControlType,
    alias: Rc<str>,
    local_name: Rc<str>,
    is_closing: bool,
    allows_children: bool,
}

impl Component {
    /// Builds a component numbered from the process-wide [IdGenerator].
    pub fn new(
        source: Tag,
        control_type: ControlType,
        types: &dyn TypeRegistry,
    ) -> Result<Component> {
        Component::with_ids(source, control_type, types, IdGenerator::global())
    }

    /// Builds a component from an opening tag or a [super::CloseTag] turned into a [Tag].
    ///
    /// Opening tags without an `ID` receive a generated one; closing tags are left as is.
    pub fn with_ids(
        source: Tag,
        control_type: ControlType,
        types: &dyn TypeRegistry,
        ids: &IdGenerator,
    ) -> Result<Component> {
        let is_closing = source.classification() == Classification::Closing;

        let (alias, local_name): (Rc<str>, Rc<str>) = source
            .name()
            .split_once(':')
            .map(|(alias, local_name)| (Rc::from(alias), Rc::from(local_name)))
            .ok_or_else(|| Error::MalformedComponentName(Rc::from(source.name())))?;

        let allows_children = types.supports_children(&control_type);

        let mut tag = source.classified(Classification::ServerControl);
        if !is_closing {
            tag.ensure_id(ids)?;
        }

        tracing::debug!(
            "<{}> resolved to {} (children: {})",
            tag.name(),
            control_type,
            allows_children
        );
        return Ok(Component {
            tag,
            control_type,
            alias,
            local_name,
            is_closing,
            allows_children,
        });
    }

    /// The explicit or generated `ID`. Closing tags carry none.
    pub fn control_id(&self) -> Option<&str> {
        self.tag.attributes().get("ID")
    }

    /// The part before the colon, e.g. `asp`.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// The part after the colon, e.g. `Button`.
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    pub fn is_closing(&self) -> bool {
        self.is_closing
    }

    pub fn allows_children(&self) -> bool {
        self.allows_children
    }

    pub fn control_type(&self) -> &ControlType {
        &self.control_type
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// `<alias:name ...>`, or `</alias:name>` for closing tags.
    pub fn render(&self) -> String {
        if self.is_closing {
            return format!("</{}>", self.tag.name());
        }
        self.tag.render()
    }
}
