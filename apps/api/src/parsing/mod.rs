//! Document parsing: bytes → plain text → structured candidate profile.
//! Every heuristic here degrades to empty/default values; only the text
//! extractor can fail.

pub mod profile;
pub mod rules;
pub mod text;
