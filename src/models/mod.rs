//! Data models

pub mod option;
pub mod maintenance;

pub use option::*;
pub use maintenance::*;
