//! Agent System
//!
//! One agent lives here: the Document Agent, which turns an uploaded file
//! into a model reply.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Document Submission (bytes + filename)
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Extract    │  → format-specific reader produces plain text
//! └─────────────┘
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Memory     │  → opaque save of the upload + extracted text
//! └─────────────┘
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Generate   │  → context string forwarded to the text endpoint
//! └─────────────┘
//!      │
//!      ▼
//!  Model Reply
//! ```

pub mod document;

pub use document::{build_context, user_message, DocumentAgent, DocumentAnalysis};
