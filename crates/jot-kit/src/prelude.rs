//! Convenient re-exports for common usage.
//!
//! ```
//! use jot_kit::prelude::*;
//! ```

pub use crate::Counter;
pub use crate::Record;
pub use crate::RecordFields;
pub use crate::ValidationError;
