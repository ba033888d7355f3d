//! Request description types

mod descriptor;
mod headers;
mod method;
mod query;

pub use descriptor::RequestDescriptor;
pub use headers::{Header, Headers};
pub use method::HttpMethod;
pub use query::{QueryParam, QueryParams};
