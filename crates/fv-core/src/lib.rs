//! # fv-core
//!
//! Core domain models and business logic for FileViewer.
//!
//! This crate contains the request-correlation and permission-state-machine
//! layer without any infrastructure dependencies. The host operating system
//! is consumed exclusively through the traits in [`ports`].

// Public module exports
pub mod locator;
pub mod mime;
pub mod open;
pub mod permission;
pub mod ports;

// Re-export commonly used types at the crate root
pub use locator::{Locator, MediaResolver, Resolution};
pub use mime::MediaKind;
pub use open::{OpenDispatcher, OpenOptions, OpenRequest, ViewerEvent, REQUEST_CODE_OFFSET};
pub use permission::{PermissionState, StorageAccessMachine, ACCESS_CONSENT_REQUEST_CODE};
