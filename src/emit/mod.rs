pub mod binary;
pub mod coverage;
pub mod error;

pub use binary::*;
pub use coverage::*;
pub use error::*;
