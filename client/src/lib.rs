//! Persistence and session layer for the NeatMemo whiteboard.
//!
//! The `canvas` crate owns the in-memory model; this crate owns everything
//! that touches the network or the clock: the bearer-token memo API
//! transport, the storage client that maps projects to persisted JSON blobs,
//! the OCR upload path, and the canvas session that wires engine actions to
//! a debounced auto-save.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`api`] | Authenticated JSON transport for the memo API |
//! | [`storage`] | Project/item persistence over a [`storage::MemoStore`] |
//! | [`session`] | Open-canvas session: mutations, auto-save debounce |
//! | [`ocr`] | Image-to-text upload with diagnostic error detail |
//! | [`error`] | Shared error taxonomy ([`error::ClientError`]) |

pub mod api;
pub mod error;
pub mod ocr;
pub mod session;
pub mod storage;

pub use error::ClientError;
