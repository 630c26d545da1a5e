/// Analysis modules — post-scan aggregation.

pub mod top_words;

pub use top_words::top_words;
