pub mod rating;
pub mod score;
pub mod stats;

pub use rating::*;
pub use score::*;
pub use stats::*;
