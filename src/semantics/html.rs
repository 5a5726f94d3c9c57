use std::collections::HashMap;
use std::rc::Rc;

use lazy_static::lazy_static;
use strum_macros::{AsRefStr, Display};

use super::attributes::AttributeBag;
use super::base::{Classification, Error, Result, Tag};
use super::ids::IdGenerator;

/// The server-side control an HTML element marked `runat="server"` stands for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum ControlKind {
    #[strum(serialize = "HtmlAnchor")]
    Anchor,
    #[strum(serialize = "HtmlButton")]
    Button,
    #[strum(serialize = "HtmlForm")]
    Form,
    #[strum(serialize = "HtmlImage")]
    Image,
    #[strum(serialize = "HtmlSelect")]
    Select,
    #[strum(serialize = "HtmlTable")]
    Table,
    /// Both `<td>` and `<th>`.
    #[strum(serialize = "HtmlTableCell")]
    TableCell,
    #[strum(serialize = "HtmlTableRow")]
    TableRow,
    #[strum(serialize = "HtmlTextArea")]
    TextArea,
    /// `<input type="button|submit|reset">`.
    #[strum(serialize = "HtmlInputButton")]
    InputButton,
    #[strum(serialize = "HtmlInputCheckBox")]
    InputCheckBox,
    #[strum(serialize = "HtmlInputFile")]
    InputFile,
    #[strum(serialize = "HtmlInputHidden")]
    InputHidden,
    #[strum(serialize = "HtmlInputImage")]
    InputImage,
    #[strum(serialize = "HtmlInputRadioButton")]
    InputRadioButton,
    /// `<input type="text|password">`.
    #[strum(serialize = "HtmlInputText")]
    InputText,
    /// Any element without a dedicated control.
    #[strum(serialize = "HtmlGenericControl")]
    Generic,
}

lazy_static! {
    /// Upper-cased element name to control. INPUT is resolved through [INPUT_TYPES].
    static ref ELEMENT_CONTROLS: HashMap<&'static str, ControlKind> = HashMap::from([
        ("A", ControlKind::Anchor),
        ("BUTTON", ControlKind::Button),
        ("FORM", ControlKind::Form),
        ("IMAGE", ControlKind::Image),
        ("SELECT", ControlKind::Select),
        ("TABLE", ControlKind::Table),
        ("TD", ControlKind::TableCell),
        ("TH", ControlKind::TableCell),
        ("TR", ControlKind::TableRow),
        ("TEXTAREA", ControlKind::TextArea),
    ]);

    /// Upper-cased `type` attribute of an INPUT element to control.
    static ref INPUT_TYPES: HashMap<&'static str, ControlKind> = HashMap::from([
        ("BUTTON", ControlKind::InputButton),
        ("SUBMIT", ControlKind::InputButton),
        ("RESET", ControlKind::InputButton),
        ("CHECKBOX", ControlKind::InputCheckBox),
        ("FILE", ControlKind::InputFile),
        ("HIDDEN", ControlKind::InputHidden),
        ("IMAGE", ControlKind::InputImage),
        ("RADIO", ControlKind::InputRadioButton),
        ("TEXT", ControlKind::InputText),
        ("PASSWORD", ControlKind::InputText),
    ]);
}

/// Finds the control for an element. Never fails for anything but INPUT.
pub fn resolve_control_kind(name: &str, attributes: &AttributeBag) -> Result<ControlKind> {
    if !name.eq_ignore_ascii_case("INPUT") {
        let kind = ELEMENT_CONTROLS
            .get(name.to_ascii_uppercase().as_str())
            .copied()
            .unwrap_or(ControlKind::Generic);
        return Ok(kind);
    }

    let input_type = attributes.get("TYPE").ok_or(Error::MissingTypeAttribute)?;
    return INPUT_TYPES
        .get(input_type.to_ascii_uppercase().as_str())
        .copied()
        .ok_or_else(|| Error::UnknownInputType(Rc::from(input_type)));
}

/// An HTML element marked `runat="server"`, resolved to its control.
#[derive(Debug, Clone)]
pub struct HtmlControlTag {
    tag: Tag,
    control_kind: ControlKind,
}

impl HtmlControlTag {
    /// Resolves `tag`, numbering it from the process-wide [IdGenerator] if it has no `ID`.
    pub fn new(tag: Tag) -> Result<HtmlControlTag> {
        HtmlControlTag::with_ids(tag, IdGenerator::global())
    }

    pub fn with_ids(tag: Tag, ids: &IdGenerator) -> Result<HtmlControlTag> {
        let control_kind = resolve_control_kind(tag.name(), tag.attributes())?;
        let mut tag = tag.classified(Classification::HtmlControl);
        tag.ensure_id(ids)?;

        tracing::debug!("<{}> resolved to {}", tag.name(), control_kind);
        return Ok(HtmlControlTag { tag, control_kind });
    }

    pub fn control_kind(&self) -> ControlKind {
        self.control_kind
    }

    /// The explicit or generated `ID`.
    pub fn control_id(&self) -> &str {
        self.tag.attributes().get("ID").unwrap_or_default()
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }
}
