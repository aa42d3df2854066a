mod models;
mod matcher;
mod parser;
mod pattern;

pub use models::{DynamicContentParser, ParserTuning};
pub use matcher::{MatchBlock, SequenceMatcher};
pub use pattern::generate_matching_regex;
