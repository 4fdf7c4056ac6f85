//! Application use cases (business logic orchestration).

mod create_request;
mod duplicate_request;
mod execute_saved_request;

#[cfg(test)]
pub(crate) mod test_support;

pub use create_request::*;
pub use duplicate_request::*;
pub use execute_saved_request::*;
