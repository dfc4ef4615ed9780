pub mod error;
pub mod types;

pub use error::{DialogTreeError, ErrorKind};
pub use types::*;
