pub mod escape;
pub mod markers;
pub mod options;
pub mod paths;
pub mod preprocessor;
pub mod scanner;

pub use escape::{escape_regex, escape_shell};
pub use markers::{accepted_path, marker_path};
pub use options::{DEFAULT_PREPROCESSOR, OptionsError, Overrides, ScanOptions, interpret};
pub use paths::{PathFilter, compact, exists};
pub use preprocessor::{CommandPreprocessor, Preprocessor};
pub use scanner::scan;
