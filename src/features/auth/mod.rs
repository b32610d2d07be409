//! API-key gate applied to every facilities endpoint.
//!
//! Keys are read from the `api-key` query parameter or the `X-API-Key`
//! header and checked against `API_KEYS`.

mod api_key;

pub mod model;

pub use api_key::ApiKeyValidator;
