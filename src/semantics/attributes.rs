use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use itertools::Itertools;

use super::base::Error;

/// An attribute name that compares case-insensitively but remembers how it was written.
#[derive(Debug, Clone)]
pub struct AttrKey {
    /// The key exactly as it appeared in the markup.
    original: Rc<str>,
    /// The lower-cased key used for every comparison.
    folded: Rc<str>,
}

impl AttrKey {
    pub fn new(key: &str) -> AttrKey {
        return AttrKey {
            original: Rc::from(key),
            folded: Rc::from(key.to_lowercase()),
        };
    }

    /// The key as written.
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// The normalized (lower-cased) key.
    pub fn folded(&self) -> &str {
        &self.folded
    }

    pub fn matches(&self, key: &str) -> bool {
        &*self.folded == key.to_lowercase().as_str()
    }
}

impl PartialEq for AttrKey {
    fn eq(&self, other: &Self) -> bool {
        self.folded == other.folded
    }
}

impl Eq for AttrKey {}

impl fmt::Display for AttrKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.original)
    }
}

/// A single `key="value"` pair. The value is absent for bare attributes such as `checked`.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub key: AttrKey,
    pub value: Option<Rc<str>>,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return match &self.value {
            None => write!(f, "{}", self.key),
            Some(value) if value.contains('"') && !value.contains('\'') => {
                write!(f, "{}='{}'", self.key, value)
            }
            Some(value) => write!(f, "{}=\"{}\"", self.key, value.replace('"', "&quot;")),
        };
    }
}

/// Unique keys; enumeration follows insertion order.
#[derive(Debug, Clone, Default)]
struct KeyedAttributes {
    entries: Vec<Attribute>,
    index: HashMap<Rc<str>, usize>,
}

impl KeyedAttributes {
    fn insert(&mut self, attr: Attribute) -> Result<(), Error> {
        if self.index.contains_key(attr.key.folded()) {
            return Err(Error::DuplicateAttributeKey(Rc::from(attr.key.as_str())));
        }
        self.index
            .insert(Rc::clone(&attr.key.folded), self.entries.len());
        self.entries.push(attr);
        Ok(())
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key.to_lowercase().as_str()).copied()
    }
}

#[derive(Debug, Clone)]
enum Storage {
    /// Plain HTML: duplicate keys are legal, e.g. `<a att="x" att="y">`.
    List(Vec<Attribute>),
    /// Tags marked `runat="server"`: every key is unique.
    Map(KeyedAttributes),
}

/// The attributes of a single tag occurrence.
///
/// A bag starts in list mode and switches to map mode, once and for good, when a
/// `runat="server"` pair is added.
#[derive(Debug, Clone)]
pub struct AttributeBag {
    storage: Storage,
}

impl Default for AttributeBag {
    fn default() -> Self {
        AttributeBag::new()
    }
}

fn is_runat_server(key: &str, value: Option<&str>) -> bool {
    key.eq_ignore_ascii_case("runat")
        && value.map_or(false, |value| value.eq_ignore_ascii_case("server"))
}

impl AttributeBag {
    pub fn new() -> AttributeBag {
        AttributeBag {
            storage: Storage::List(vec![]),
        }
    }

    /// Builds a bag by adding every pair in order.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<AttributeBag, Error>
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        let mut bag = AttributeBag::new();
        for (key, value) in pairs {
            bag.add(key, value)?;
        }
        Ok(bag)
    }

    /// Adds a pair. A `runat="server"` pair switches the bag to map mode first.
    pub fn add(&mut self, key: &str, value: Option<&str>) -> Result<(), Error> {
        if is_runat_server(key, value) {
            self.make_keyed()?;
        }

        let attr = Attribute {
            key: AttrKey::new(key),
            value: value.map(Rc::from),
        };
        match &mut self.storage {
            Storage::List(attrs) => {
                attrs.push(attr);
                Ok(())
            }
            Storage::Map(keyed) => keyed.insert(attr),
        }
    }

    /// Migrates list entries into map mode. Does nothing if already there.
    fn make_keyed(&mut self) -> Result<(), Error> {
        let attrs = match &self.storage {
            Storage::Map(_) => return Ok(()),
            Storage::List(attrs) => attrs,
        };

        let mut keyed = KeyedAttributes::default();
        for attr in attrs {
            keyed.insert(attr.clone())?;
        }
        tracing::trace!(
            "attribute bag switched to map mode with {} entries",
            keyed.entries.len()
        );
        self.storage = Storage::Map(keyed);
        Ok(())
    }

    /// Whether `runat="server"` has been seen.
    pub fn is_server_tagged(&self) -> bool {
        matches!(self.storage, Storage::Map(_))
    }

    fn position(&self, key: &str) -> Option<usize> {
        return match &self.storage {
            Storage::List(attrs) => attrs.iter().position(|attr| attr.key.matches(key)),
            Storage::Map(keyed) => keyed.position(key),
        };
    }

    fn entries(&self) -> &[Attribute] {
        match &self.storage {
            Storage::List(attrs) => attrs,
            Storage::Map(keyed) => &keyed.entries,
        }
    }

    fn entries_mut(&mut self) -> &mut [Attribute] {
        match &mut self.storage {
            Storage::List(attrs) => attrs,
            Storage::Map(keyed) => &mut keyed.entries,
        }
    }

    /// True if the key was added, with or without a value.
    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// The value of the first attribute matching `key`.
    ///
    /// Returns `None` both for absent keys and for bare attributes without a value.
    pub fn get(&self, key: &str) -> Option<&str> {
        let idx = self.position(key)?;
        self.entries()[idx].value.as_deref()
    }

    /// Replaces the value of an existing key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        let idx = self
            .position(key)
            .ok_or_else(|| Error::UnknownAttribute(Rc::from(key)))?;
        self.entries_mut()[idx].value = Some(Rc::from(value));
        Ok(())
    }

    /// Sets `key` to `value`, adding it if absent.
    pub(crate) fn put(&mut self, key: &str, value: &str) -> Result<(), Error> {
        if self.contains(key) {
            self.set(key, value)
        } else {
            self.add(key, Some(value))
        }
    }

    pub fn count(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Keys in enumeration order, as written.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries().iter().map(|attr| attr.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.entries().iter()
    }
}

impl fmt::Display for AttributeBag {
    /// Renders `key="value"` pairs separated by single spaces.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.iter().join(" "))
    }
}
