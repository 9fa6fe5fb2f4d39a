//! Query matching: transliteration, three-tier text matching and fuzzy ranking.

pub mod ranking;
pub mod text;
pub mod transliterate;

pub use ranking::{rank, rank_with_limit, MAX_RESULTS};
pub use text::match_text;
pub use transliterate::normalize;
