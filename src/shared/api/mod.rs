//! Request contract shared by the read endpoints: output-format negotiation,
//! page validation and slicing, and format-keyed serialization.

pub mod negotiation;
pub mod pagination;
pub mod serialization;
pub mod xml;

pub use negotiation::{FormatNegotiator, OutputFormat};
pub use pagination::{ListQuery, PageRequest, PageSource, PaginationApi, Paginator, ResultPage};
pub use serialization::{EncodedBody, Payload, RecordSerializer, SerializerAdapter};
