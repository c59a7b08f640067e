//! matterbatch: batch editing for YAML, TOML, and JSON front matter
//!
//! This library powers a command-line batch editor for the metadata block
//! ("front matter") that prefixes markdown documents in a content tree.
//! It detects all three common front matter syntaxes, filters documents
//! with a small boolean condition language, mutates and lints fields,
//! extracts values, and writes changes back atomically.
//!
//! # Features
//!
//! - **Three syntaxes** detected from the document head: `---` YAML
//!   fences, `+++` TOML fences, and a leading JSON object
//! - **Canonical re-encoding** with a fixed field order (`title`, `date`,
//!   `draft`, `series`, `categories`, `tags`, then everything else
//!   lexicographically) and inline sequence formatting
//! - **Condition language** with `=`, `contains`, and `date<` clauses
//!   combined by `AND` / `OR`; malformed conditions never match and never
//!   raise
//! - **Structural lint** for required and prohibited fields, with
//!   auto-fix
//! - **Field-level diffs** before every write, dry-run mode, and an
//!   optional git commit of the modified files
//!
//! # Quick Start
//!
//! ## Parsing and editing one document
//!
//! ```rust
//! use matterbatch::{Document, FieldValue, Result};
//!
//! fn main() -> Result<()> {
//!     let mut doc = Document::parse("---\ntitle: Hello\ndraft: true\n---\nBody\n")?;
//!     doc.front_matter_mut().set("draft", FieldValue::Bool(false));
//!     assert_eq!(doc.render()?, "---\ntitle: Hello\ndraft: false\n---\nBody\n");
//!     Ok(())
//! }
//! ```
//!
//! ## Filtering with conditions
//!
//! ```rust
//! use matterbatch::{evaluate, Document, Result};
//!
//! fn main() -> Result<()> {
//!     let doc = Document::parse("---\ntags: [rust, cli]\ndate: 2023-05-01\n---\n")?;
//!     assert!(evaluate(doc.front_matter(), "tags contains 'rust' AND date<2024-01-01"));
//!     assert!(!evaluate(doc.front_matter(), "draft=true"));
//!     Ok(())
//! }
//! ```
//!
//! ## Running a batch over a content tree
//!
//! ```rust,no_run
//! use matterbatch::{ops, Config, Result, SetField};
//!
//! fn main() -> Result<()> {
//!     let config = Config {
//!         set: SetField::parse("draft=false"),
//!         condition: Some("date<2024-01-01".to_string()),
//!         dry_run: true,
//!         ..Config::default()
//!     };
//!     let report = ops::run(&config, |_| Ok(true))?;
//!     print!("{}", report.render_summary(false));
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`codec`]: front matter detection, decoding, canonical encoding, and
//!   document reassembly
//! - [`core`]: the document model, the value type, and the condition
//!   evaluator
//! - [`diff`]: field-level diff rendering
//! - [`ops`]: the batch run over a content tree
//! - [`io`]: content-tree walking and atomic writes
//! - [`report`]: run statistics, extraction rows, and output rendering
//! - [`config`]: the options struct a run is driven by
//! - [`git`]: optional commit of modified files
//! - [`error`]: the library error type

// Public API exports
pub use error::{MatterBatchError, Result};

// Core types
pub use codec::{detect, FrontMatterFormat, Split};
pub use config::{clean_field_list, Config, SetField};
pub use core::{evaluate, Clause, Document, FieldValue, FrontMatter};
pub use report::{ExtractFormat, Extraction, RunReport, RunStats};

// Internal modules
pub mod codec;
pub mod config;
pub mod core;
pub mod diff;
pub mod error;
pub mod git;
pub mod io;
pub mod ops;
pub mod report;
