// src/source/mod.rs
pub mod properties;
pub mod reader;

#[allow(unused_imports)]
pub use properties::{parse_properties, read_property, VersionSource, DEFAULT_PROPERTY_KEY};
#[allow(unused_imports)]
pub use reader::{read_lines, split_lines};
