//! Storage policy port - the OS permission model behind broad storage access.
//!
//! Newer host capability levels gate broad filesystem access behind a single
//! authoritative "full storage manager" flag; older levels require two
//! discrete grants (read, write). The difference is captured as a polymorphic
//! strategy selected once at startup, not branched at every call site.

use anyhow::Result;
use async_trait::async_trait;

/// Outcome of attempting to launch the OS consent flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentLaunch {
    /// The consent screen was launched; a result will arrive later for the
    /// request code it was tagged with.
    Launched,
    /// No foreground context was available to host the consent screen.
    NoForegroundContext,
}

/// Grant strategy for broad storage access.
#[async_trait]
pub trait StoragePolicyPort: Send + Sync {
    /// Authoritative grant check under this policy's permission model.
    fn is_granted(&self) -> bool;

    /// Launch the consent flow against the current foreground context,
    /// tagged with `request_code`.
    async fn request_consent(&self, request_code: i64) -> Result<ConsentLaunch>;
}
