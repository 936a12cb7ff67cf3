pub mod choice;
pub mod insights;
pub mod orchestrator;
pub mod report;

pub use choice::*;
pub use insights::*;
pub use orchestrator::*;
pub use report::*;
