//! TypeScript source parsing and declaration extraction using tree-sitter

pub mod declaration_detector;
pub mod typescript_parser;
pub mod utils;

// Re-export commonly used items
pub use declaration_detector::DeclarationDetector;
pub use typescript_parser::{Dialect, TypeScriptParser};
pub use utils::{node_span, node_text, node_to_position};
