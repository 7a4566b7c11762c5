pub mod path;

pub use path::{absolutize, dedupe_preserving_order, import_specifier, normalize, to_slash};
