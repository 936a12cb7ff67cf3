pub mod correlation;
pub mod crosstab;
pub mod descriptive;
pub mod hypothesis;
pub mod performance;
pub mod pvalue;
pub mod trend;

pub use correlation::*;
pub use crosstab::*;
pub use descriptive::*;
pub use hypothesis::*;
pub use performance::*;
pub use pvalue::*;
pub use trend::*;
