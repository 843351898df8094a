//! Types shared by every layer: the response envelope returned across the
//! API boundary, small wire types and logging setup.

pub mod envelope;
pub mod types;
pub mod utils;

pub use envelope::{ApiResponse, BaseResponse, DataResponse, EnvelopeError, ErrorResponse, PageMeta, PaginatedResponse};
