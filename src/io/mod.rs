pub mod fs;

pub use fs::{is_markdown, read_to_string, walk_markdown_files, write_atomic};
