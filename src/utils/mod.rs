//! Utility module - terminal styling, progress bars, data-directory paths

pub mod paths;
pub mod progress;
pub mod styling;

pub use paths::*;
pub use progress::*;
pub use styling::*;
