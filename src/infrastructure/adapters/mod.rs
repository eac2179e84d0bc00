//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod fake;
pub mod forvo;
pub mod process;

pub use forvo::*;
pub use process::*;
