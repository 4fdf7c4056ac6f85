//! HTTP Request domain types

mod body;
mod descriptor;
mod header;
mod method;
mod query;

pub use body::{BodyType, RequestBody};
pub use descriptor::RequestDescriptor;
pub use header::{Header, Headers};
pub use method::HttpMethod;
pub use query::{QueryParam, QueryParams};
