use std::error::Error as StdError;

/// Errors the front end knows how to print.
pub trait Error: StdError + Send {}
