//! Suggest normalized, date-prefixed file names.
//!
//! The date comes from the first source in the priority chain that finds one:
//! the file name, document metadata, document content, then file system
//! timestamps. The remaining name is sanitized into one delimiter style.

pub mod config;
pub mod dates;
pub mod error;
pub mod extract;
pub mod rename;
pub mod resolver;
pub mod sanitize;
pub mod sources;
pub mod suggest;

pub use config::Config;
pub use error::{ExtractError, RenameError};
pub use resolver::{PriorityResolver, ResolutionResult};
pub use sanitize::sanitize_name;
pub use sources::{Strategy, PRIORITY_CHAIN};
pub use suggest::{suggest_filename, Suggester, Suggestion};
