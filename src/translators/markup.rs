use itertools::Itertools;

use crate::semantics::Document;
use crate::translation::Translator;

/// Renders a page back to markup.
///
/// Attributes come out in enumeration order, double-quoted unless the value holds a `"`,
/// so the output is equivalent to the input rather than byte-identical.
pub struct Markup;

impl Translator for Markup {
    fn translate(doc: &Document) -> String {
        doc.elements.iter().join("")
    }
}
