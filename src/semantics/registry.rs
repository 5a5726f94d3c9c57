use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

/// Namespace of the controls available under the `asp` prefix.
pub const WEB_CONTROLS_NAMESPACE: &str = "System.Web.UI.WebControls";

/// The stock `asp:` controls and whether each accepts nested content.
const WEB_CONTROLS: &[(&str, bool)] = &[
    ("AdRotator", true),
    ("Button", true),
    ("Calendar", true),
    ("CheckBox", true),
    ("CheckBoxList", true),
    ("CompareValidator", true),
    ("CustomValidator", true),
    ("DataGrid", true),
    ("DataList", true),
    ("DropDownList", true),
    ("HiddenField", false),
    ("HyperLink", true),
    ("Image", false),
    ("ImageButton", false),
    ("Label", true),
    ("LinkButton", true),
    ("ListBox", true),
    ("Literal", false),
    ("Panel", true),
    ("PlaceHolder", true),
    ("RadioButton", true),
    ("RadioButtonList", true),
    ("RangeValidator", true),
    ("RegularExpressionValidator", true),
    ("Repeater", true),
    ("RequiredFieldValidator", true),
    ("Table", true),
    ("TableCell", true),
    ("TableRow", true),
    ("TextBox", false),
    ("ValidationSummary", true),
    ("Xml", true),
];

/// The identity a `prefix:name` tag resolves to, e.g. `System.Web.UI.WebControls.Button`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlType {
    name: Rc<str>,
}

impl ControlType {
    pub fn new(name: &str) -> ControlType {
        ControlType {
            name: Rc::from(name),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ControlType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Knows which control types exist and what they are capable of.
pub trait TypeRegistry {
    /// The type registered for `prefix:name`, if any.
    fn resolve(&self, prefix: &str, name: &str) -> Option<ControlType>;

    /// Whether controls of this type may contain nested markup.
    fn supports_children(&self, control_type: &ControlType) -> bool;
}

/// Control types known to a page: the stock `asp:` controls plus whatever its
/// `<%@ Register %>` directives add.
#[derive(Debug, Clone)]
pub struct ControlRegistry {
    /// (prefix, name), both lower-cased.
    controls: HashMap<(String, String), ControlType>,
    /// Lower-cased prefix to namespace.
    namespaces: HashMap<String, Rc<str>>,
    childless: HashSet<ControlType>,
}

impl Default for ControlRegistry {
    fn default() -> Self {
        ControlRegistry::new()
    }
}

impl ControlRegistry {
    /// A registry that only knows the `asp:` controls.
    pub fn new() -> ControlRegistry {
        let mut registry = ControlRegistry::empty();
        for (name, allows_children) in WEB_CONTROLS {
            let control_type = ControlType::new(&format!("{}.{}", WEB_CONTROLS_NAMESPACE, name));
            registry.register_control("asp", name, control_type, *allows_children);
        }
        registry
    }

    pub fn empty() -> ControlRegistry {
        ControlRegistry {
            controls: HashMap::new(),
            namespaces: HashMap::new(),
            childless: HashSet::new(),
        }
    }

    pub fn register_control(
        &mut self,
        prefix: &str,
        name: &str,
        control_type: ControlType,
        allows_children: bool,
    ) {
        if !allows_children {
            self.childless.insert(control_type.clone());
        }
        self.controls
            .insert((prefix.to_lowercase(), name.to_lowercase()), control_type);
    }

    /// `<%@ Register TagPrefix="uc" TagName="Header" Src="header.ascx" %>`
    pub fn register_user_control(&mut self, prefix: &str, name: &str, src: &str) {
        tracing::debug!("registered user control {}:{} from {}", prefix, name, src);
        self.register_control(prefix, name, ControlType::new(src), true);
    }

    /// `<%@ Register TagPrefix="my" Namespace="My.Controls" Assembly="My" %>`
    ///
    /// Every name under the prefix then resolves to `Namespace.name`.
    pub fn register_namespace(&mut self, prefix: &str, namespace: &str) {
        tracing::debug!("registered namespace {} as {}", namespace, prefix);
        self.namespaces
            .insert(prefix.to_lowercase(), Rc::from(namespace));
    }
}

impl TypeRegistry for ControlRegistry {
    fn resolve(&self, prefix: &str, name: &str) -> Option<ControlType> {
        let key = (prefix.to_lowercase(), name.to_lowercase());
        if let Some(control_type) = self.controls.get(&key) {
            return Some(control_type.clone());
        }

        return self
            .namespaces
            .get(&key.0)
            .map(|namespace| ControlType::new(&format!("{}.{}", namespace, name)));
    }

    fn supports_children(&self, control_type: &ControlType) -> bool {
        !self.childless.contains(control_type)
    }
}
