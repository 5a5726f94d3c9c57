use crate::semantics::Document;

/// A translator takes a classified page and turns it into text.
pub trait Translator {
    /// Translate the document into text, ready to print or save to a file.
    fn translate(doc: &Document) -> String;
}
