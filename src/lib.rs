//! Media Gateway
//!
//! HTTP gateway that lets clients store, list, and delete media assets in a
//! backing S3-compatible bucket without ever seeing storage credentials.
//! Uploads are validated against a fixed extension allow-list, buffered in
//! memory, stored under a collision-resistant key, and served back to
//! clients as time-limited presigned download URLs.
//!
//! ## Architecture
//!
//! ```text
//! HTTP client                 Gateway                     S3 bucket
//! ┌──────────────┐       ┌────────────────┐          ┌──────────────┐
//! │ POST /upload │──────▶│ validate ext   │          │              │
//! │              │       │ buffer payload │── put ──▶│ <uuid>.png   │
//! │ GET /images  │──────▶│ list + presign │◀─ list ──│ <uuid>.mp4   │
//! │              │◀──────│ signed URLs    │          │ ...          │
//! │ DELETE /...  │──────▶│ remove by key  │── del ──▶│              │
//! └──────────────┘       └────────────────┘          └──────────────┘
//! ```
//!
//! The bucket is the only source of truth about stored objects; the gateway
//! keeps no record of its own and re-queries the backend on every request.

pub mod api;
pub mod config;
pub mod error;
pub mod media_type;
pub mod naming;
pub mod object_store;

pub use api::{create_router, start_api_server, AppState, FileResponse};
pub use config::Config;
pub use error::{ErrorResponse, GatewayError};
pub use media_type::MediaExtension;
pub use naming::NamingStrategy;
pub use object_store::{ObjectStore, PresignedUrl, S3ObjectStore, StoreError};
