// src/extractors/mod.rs
pub mod section;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use section::{
    extract_section,
    find_heading,
    is_heading,
    ExtractedSection,
    SectionExtractor,
    HEADING_MARKER,
};
