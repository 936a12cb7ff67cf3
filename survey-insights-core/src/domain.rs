pub mod metric;
pub mod question;
pub mod request;
pub mod series;

pub use metric::*;
pub use question::*;
pub use request::*;
pub use series::*;
