//! HTTP access to the practice backend.
mod error;
pub mod judge;
pub mod problem;
mod retry;
pub mod session;
#[cfg(test)]
mod stub;
pub mod submission;
pub mod user;

pub use error::{Error, Result};
pub(crate) use error::status_error;
pub use judge::Judge;
pub use problem::ProblemDetail;
pub use session::Session;
