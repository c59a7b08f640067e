//! Core types and domain logic: field values, documents, and conditions

pub mod condition;
pub mod document;
pub mod value;

pub use condition::{evaluate, Clause};
pub use document::{Document, FrontMatter};
pub use value::FieldValue;
