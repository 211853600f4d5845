//! Request domain types

mod body;
mod key_value;
mod method;
mod spec;

pub use body::RequestBody;
pub use key_value::{FormField, FormFieldType, KeyValue};
pub use method::HttpMethod;
pub use spec::HttpRequest;
