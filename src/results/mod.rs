//! Result types module
//!
//! Upstream business records, the restaurants projected from them and the
//! ordered result set a search returns.

mod set;
mod types;

pub use set::ResultSet;
pub use types::*;
