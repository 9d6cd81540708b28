//! Builtin backend tools
//!
//! Each backend has its own module holding its typed arguments and a pure
//! request builder. Response formatting is shared and lives in [`format`].

pub mod analyze;
pub mod extract;
pub mod format;
pub mod search;

pub use analyze::AnalyzeArgs;
pub use extract::ExtractArgs;
pub use search::SearchArgs;
