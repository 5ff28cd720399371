//! Editor features computed from a parsed [`Tree`](crate::Tree).

pub mod documentation;
pub mod folding;
pub mod reference;
pub mod semantic_tokens;
