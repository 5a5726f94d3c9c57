use super::base::{Classification, Error, Result, Tag};

/// `<object id="name" class="full.class.name" runat="server" />`
#[derive(Debug, Clone)]
pub struct ServerObjectTag {
    tag: Tag,
}

impl ServerObjectTag {
    /// Validates an object declaration.
    ///
    /// # Panics
    ///
    /// If the tag's attributes were never marked `runat="server"`. The tokenizer only
    /// routes server-tagged `<object>` elements here, so anything else is a bug upstream.
    pub fn new(tag: Tag) -> Result<ServerObjectTag> {
        assert!(
            tag.attributes().is_server_tagged(),
            "<{}> reached ServerObjectTag without runat=\"server\"",
            tag.name()
        );

        let attributes = tag.attributes();
        if attributes.count() != 3
            || !tag.self_closing()
            || attributes.get("id").is_none()
            || attributes.get("class").is_none()
        {
            return Err(Error::MalformedObjectDeclaration);
        }

        return Ok(ServerObjectTag {
            tag: tag.classified(Classification::ServerObject),
        });
    }

    pub fn object_id(&self) -> &str {
        self.tag.attributes().get("id").unwrap_or_default()
    }

    pub fn object_class(&self) -> &str {
        self.tag.attributes().get("class").unwrap_or_default()
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantics::AttributeBag;

    fn object(pairs: Vec<(&str, Option<&str>)>, self_closing: bool) -> Result<ServerObjectTag> {
        let attributes = AttributeBag::from_pairs(pairs).unwrap();
        ServerObjectTag::new(Tag::new("object", attributes, self_closing).unwrap())
    }

    #[test]
    fn test_valid_declaration() {
        let obj = object(
            vec![
                ("id", Some("o1")),
                ("class", Some("Foo.Bar")),
                ("runat", Some("server")),
            ],
            true,
        )
        .unwrap();

        assert_eq!(obj.object_id(), "o1");
        assert_eq!(obj.object_class(), "Foo.Bar");
        assert_eq!(obj.tag().classification(), Classification::ServerObject);
    }

    #[test]
    fn test_missing_class() {
        let result = object(vec![("id", Some("o1")), ("runat", Some("server"))], true);

        assert!(matches!(result, Err(Error::MalformedObjectDeclaration)));
    }

    #[test]
    fn test_class_without_value() {
        let result = object(
            vec![("runat", Some("server")), ("ID", Some("o1")), ("CLASS", None)],
            true,
        );

        assert!(matches!(result, Err(Error::MalformedObjectDeclaration)));
    }

    #[test]
    fn test_extra_attribute() {
        let result = object(
            vec![
                ("runat", Some("server")),
                ("id", Some("o1")),
                ("class", Some("Foo.Bar")),
                ("scope", Some("session")),
            ],
            true,
        );

        assert!(matches!(result, Err(Error::MalformedObjectDeclaration)));
    }

    #[test]
    fn test_not_self_closing() {
        let result = object(
            vec![
                ("id", Some("o1")),
                ("class", Some("Foo.Bar")),
                ("runat", Some("server")),
            ],
            false,
        );

        assert!(matches!(result, Err(Error::MalformedObjectDeclaration)));
    }

    #[test]
    #[should_panic(expected = "without runat")]
    fn test_list_mode_bag_is_a_bug() {
        let _ = object(vec![("id", Some("o1")), ("class", Some("Foo.Bar"))], true);
    }
}
