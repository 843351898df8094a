//! Uniform response envelope.
//!
//! Every API response takes one of three shapes so clients can branch on the
//! `success` field alone:
//!
//! - [`DataResponse`]: `{success: true, message?, data}`
//! - [`PaginatedResponse`]: `{success: true, message?, data: [..], meta}`
//! - [`ErrorResponse`]: `{success: false, message?, error_code?, detail?}`
//!
//! Envelopes are built once and never mutated; fields are read through
//! accessors. The `success` flag is fixed by the shape and checked again on
//! decode, so an error body carrying `data` cannot be produced or accepted.

use serde::{de, Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("page must be >= 1, got {0}")]
    InvalidPage(u64),
    #[error("per_page must be > 0")]
    InvalidPerPage,
    #[error("pages must equal ceil(total / per_page) = {expected}, got {actual}")]
    InconsistentPages { expected: u64, actual: u64 },
}

fn always_true<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    match bool::deserialize(d)? {
        true => Ok(true),
        false => Err(de::Error::custom("expected success = true")),
    }
}

fn always_false<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    match bool::deserialize(d)? {
        false => Ok(false),
        true => Err(de::Error::custom("expected success = false")),
    }
}

/// Acknowledgement without a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseResponse {
    #[serde(deserialize_with = "always_true")]
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl BaseResponse {
    pub fn ok() -> Self {
        Self { success: true, message: None }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self { success: true, message: Some(message.into()) }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Single-item success response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataResponse<T> {
    #[serde(deserialize_with = "always_true")]
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { success: true, message: None, data }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self { success: true, message: Some(message.into()), data }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn into_data(self) -> T {
        self.data
    }
}

#[derive(Deserialize)]
struct RawPageMeta {
    page: u64,
    per_page: u64,
    total: u64,
    pages: u64,
}

/// Pagination metadata. `pages` is always `ceil(total / per_page)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPageMeta")]
pub struct PageMeta {
    page: u64,
    per_page: u64,
    total: u64,
    pages: u64,
}

impl PageMeta {
    /// `page` is 1-based.
    pub fn new(page: u64, per_page: u64, total: u64) -> Result<Self, EnvelopeError> {
        if page == 0 {
            return Err(EnvelopeError::InvalidPage(page));
        }
        if per_page == 0 {
            return Err(EnvelopeError::InvalidPerPage);
        }
        Ok(Self { page, per_page, total, pages: total.div_ceil(per_page) })
    }

    pub fn page(&self) -> u64 { self.page }
    pub fn per_page(&self) -> u64 { self.per_page }
    pub fn total(&self) -> u64 { self.total }
    pub fn pages(&self) -> u64 { self.pages }
}

impl TryFrom<RawPageMeta> for PageMeta {
    type Error = EnvelopeError;

    fn try_from(raw: RawPageMeta) -> Result<Self, Self::Error> {
        let meta = PageMeta::new(raw.page, raw.per_page, raw.total)?;
        if meta.pages != raw.pages {
            return Err(EnvelopeError::InconsistentPages { expected: meta.pages, actual: raw.pages });
        }
        Ok(meta)
    }
}

/// Collection success response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(deserialize_with = "always_true")]
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    data: Vec<T>,
    meta: PageMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, meta: PageMeta) -> Self {
        Self { success: true, message: None, data, meta }
    }

    /// Build the page and its metadata in one step.
    pub fn from_page(data: Vec<T>, page: u64, per_page: u64, total: u64) -> Result<Self, EnvelopeError> {
        Ok(Self::new(data, PageMeta::new(page, per_page, total)?))
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn meta(&self) -> &PageMeta {
        &self.meta
    }

    pub fn into_parts(self) -> (Vec<T>, PageMeta) {
        (self.data, self.meta)
    }
}

/// Failure response. There is no `data` field; unknown fields are refused
/// on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorResponse {
    #[serde(deserialize_with = "always_false")]
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl Default for ErrorResponse {
    fn default() -> Self {
        Self { success: false, message: None, error_code: None, detail: None }
    }
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, detail: impl Into<String>) -> Self {
        Self { error_code: Some(error_code.into()), detail: Some(detail.into()), ..Self::default() }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn error_code(&self) -> Option<&str> {
        self.error_code.as_deref()
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

/// Any of the three shapes, for code that decodes a body before knowing
/// which one it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiResponse<T> {
    Page(PaginatedResponse<T>),
    Data(DataResponse<T>),
    Error(ErrorResponse),
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        !matches!(self, ApiResponse::Error(_))
    }
}
