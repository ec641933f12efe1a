pub mod error;
pub mod glob;
pub mod resolver;

pub use error::*;
pub use glob::*;
pub use resolver::*;
