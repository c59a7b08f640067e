//! Document model: a front matter mapping plus the untouched body
//!
//! A [`Document`] is the parsed form of one content file: which delimiter
//! style its front matter block uses (if any), the decoded field mapping,
//! the body text, and the block exactly as authored. The authored block is
//! kept so callers can tell whether a re-encode actually changed anything
//! and can diff against the original lines.

use std::collections::BTreeMap;

use crate::codec::{self, FrontMatterFormat};
use crate::core::value::FieldValue;
use crate::error::Result;

/// The flat field mapping of a single document's front matter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    fields: BTreeMap<String, FieldValue>,
}

impl FrontMatter {
    /// Create an empty front matter mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the mapping has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Look up a field by name
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Set a field, replacing any existing value
    pub fn set(&mut self, key: impl Into<String>, value: FieldValue) {
        self.fields.insert(key.into(), value);
    }

    /// Remove a field, returning its previous value
    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.fields.remove(key)
    }

    /// Whether a field exists
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Iterate fields in lexicographic key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    /// Iterate field names in lexicographic order
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }
}

impl FromIterator<(String, FieldValue)> for FrontMatter {
    fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// A parsed content file.
#[derive(Debug, Clone)]
pub struct Document {
    format: Option<FrontMatterFormat>,
    matter: FrontMatter,
    body: String,
    original_matter: String,
}

impl Document {
    /// Parse a document from its raw text.
    ///
    /// Detects the front matter delimiter style and decodes the block; a
    /// file without a recognizable block parses successfully with an empty
    /// mapping and the whole input as body.
    pub fn parse(content: &str) -> Result<Self> {
        let split = codec::detect(content);
        let matter = match split.format {
            Some(format) => codec::decode(format, split.matter)?,
            None => FrontMatter::new(),
        };
        Ok(Self {
            format: split.format,
            matter,
            body: split.body.to_string(),
            original_matter: split.matter.to_string(),
        })
    }

    /// The delimiter style of the front matter block, if one was detected
    pub fn format(&self) -> Option<FrontMatterFormat> {
        self.format
    }

    /// Whether the document has a front matter block
    pub fn has_front_matter(&self) -> bool {
        self.format.is_some()
    }

    /// The decoded front matter mapping
    pub fn front_matter(&self) -> &FrontMatter {
        &self.matter
    }

    /// Mutable access to the front matter mapping
    pub fn front_matter_mut(&mut self) -> &mut FrontMatter {
        &mut self.matter
    }

    /// The body text following the front matter block
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The front matter block exactly as authored
    pub fn original_matter(&self) -> &str {
        &self.original_matter
    }

    /// Re-encode just the front matter block in its detected format.
    ///
    /// Returns the empty string for documents without a block.
    pub fn encode_matter(&self) -> Result<String> {
        match self.format {
            Some(format) => codec::encode(format, &self.matter),
            None => Ok(String::new()),
        }
    }

    /// Render the whole document: the re-encoded block wrapped in its
    /// delimiters, followed by the body. A document whose fields were not
    /// touched renders byte-identical to its input.
    pub fn render(&self) -> Result<String> {
        match self.format {
            Some(format) => {
                let block = codec::encode(format, &self.matter)?;
                Ok(codec::assemble(format, &block, &self.body))
            }
            None => Ok(self.body.clone()),
        }
    }
}
