pub mod formatter;

pub use formatter::{print_analysis, print_cancelled, print_outcome, print_result};
