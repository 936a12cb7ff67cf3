pub mod analytics;
pub mod frequency;
pub mod lexicon;
pub mod readability;
pub mod sentiment;
pub mod themes;
pub mod tokenize;
pub mod topics;

pub use analytics::*;
pub use frequency::*;
pub use lexicon::*;
pub use readability::*;
pub use sentiment::*;
pub use themes::*;
pub use tokenize::*;
pub use topics::*;
