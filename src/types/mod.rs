pub mod action;
pub mod properties;

pub use action::*;
pub use properties::*;
