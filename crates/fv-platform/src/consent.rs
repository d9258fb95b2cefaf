//! Storage-consent host adapters.
//!
//! [`HostPermissionState`] models the host's grant flags and consent
//! screens; the two policy adapters implement the grant strategies the host
//! generation dictates. Which strategy applies is decided once at startup
//! via [`select_storage_policy`] and never changes afterwards.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tracing::{debug, warn};

use fv_core::ports::{ConsentLaunch, StoragePolicyPort};

/// Host-side code the legacy read/write prompt is tagged with. Only visible
/// in the launch log; result correlation toward the permission machine stays
/// on the fixed consent request code.
pub const LEGACY_PROMPT_REQUEST_CODE: i64 = 100;

/// Which consent surface a launch landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentScreen {
    /// The app-scoped full-access settings screen.
    AllFilesAccessSettings,
    /// The system-wide full-access settings screen, used when the
    /// app-scoped one cannot be opened.
    GenericAllFilesAccess,
    /// The classic read/write grant prompt.
    LegacyPrompt,
}

/// One recorded consent-screen launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsentLaunchRecord {
    pub request_code: i64,
    pub screen: ConsentScreen,
}

/// Mutable host-side permission surface shared by the policy adapters.
///
/// Grant flags flip when the user resolves a consent screen; the embedder
/// (or a test) drives that by setting the flags and then delivering the
/// activity-result signal.
#[derive(Debug)]
pub struct HostPermissionState {
    full_access_granted: AtomicBool,
    read_granted: AtomicBool,
    write_granted: AtomicBool,
    foreground_available: AtomicBool,
    settings_screen_available: AtomicBool,
    generic_screen_available: AtomicBool,
    launches: Mutex<Vec<ConsentLaunchRecord>>,
}

impl Default for HostPermissionState {
    fn default() -> Self {
        Self {
            full_access_granted: AtomicBool::new(false),
            read_granted: AtomicBool::new(false),
            write_granted: AtomicBool::new(false),
            foreground_available: AtomicBool::new(true),
            settings_screen_available: AtomicBool::new(true),
            generic_screen_available: AtomicBool::new(true),
            launches: Mutex::new(Vec::new()),
        }
    }
}

impl HostPermissionState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_full_access(&self, granted: bool) {
        self.full_access_granted.store(granted, Ordering::SeqCst);
    }

    pub fn set_legacy_grants(&self, read: bool, write: bool) {
        self.read_granted.store(read, Ordering::SeqCst);
        self.write_granted.store(write, Ordering::SeqCst);
    }

    /// Whether a foreground context exists to launch consent screens from.
    pub fn set_foreground_available(&self, available: bool) {
        self.foreground_available.store(available, Ordering::SeqCst);
    }

    pub fn set_settings_screen_available(&self, available: bool) {
        self.settings_screen_available.store(available, Ordering::SeqCst);
    }

    pub fn set_generic_screen_available(&self, available: bool) {
        self.generic_screen_available.store(available, Ordering::SeqCst);
    }

    /// Every consent-screen launch recorded so far, oldest first.
    pub fn launches(&self) -> Vec<ConsentLaunchRecord> {
        self.launches.lock().expect("launch log poisoned").clone()
    }

    fn record_launch(&self, request_code: i64, screen: ConsentScreen) {
        debug!(request_code, ?screen, "consent screen launched");
        self.launches
            .lock()
            .expect("launch log poisoned")
            .push(ConsentLaunchRecord {
                request_code,
                screen,
            });
    }
}

/// Full-access strategy for hosts with managed storage.
///
/// The grant is a single all-files flag; consent goes through the
/// app-scoped settings screen, falling back to the system-wide one.
pub struct ManagedStoragePolicy {
    host: Arc<HostPermissionState>,
}

impl ManagedStoragePolicy {
    pub fn new(host: Arc<HostPermissionState>) -> Self {
        Self { host }
    }
}

#[async_trait]
impl StoragePolicyPort for ManagedStoragePolicy {
    fn is_granted(&self) -> bool {
        self.host.full_access_granted.load(Ordering::SeqCst)
    }

    async fn request_consent(&self, request_code: i64) -> Result<ConsentLaunch> {
        if !self.host.foreground_available.load(Ordering::SeqCst) {
            return Ok(ConsentLaunch::NoForegroundContext);
        }
        if self.host.settings_screen_available.load(Ordering::SeqCst) {
            self.host
                .record_launch(request_code, ConsentScreen::AllFilesAccessSettings);
            return Ok(ConsentLaunch::Launched);
        }
        if self.host.generic_screen_available.load(Ordering::SeqCst) {
            warn!("app settings screen unavailable, using the generic one");
            self.host
                .record_launch(request_code, ConsentScreen::GenericAllFilesAccess);
            return Ok(ConsentLaunch::Launched);
        }
        Err(anyhow!("no storage settings screen available"))
    }
}

/// Read/write grant strategy for hosts without managed storage.
///
/// Access means both grants held at once; consent is a single prompt that
/// requests the pair together.
pub struct LegacyGrantsPolicy {
    host: Arc<HostPermissionState>,
}

impl LegacyGrantsPolicy {
    pub fn new(host: Arc<HostPermissionState>) -> Self {
        Self { host }
    }
}

#[async_trait]
impl StoragePolicyPort for LegacyGrantsPolicy {
    fn is_granted(&self) -> bool {
        self.host.read_granted.load(Ordering::SeqCst)
            && self.host.write_granted.load(Ordering::SeqCst)
    }

    async fn request_consent(&self, _request_code: i64) -> Result<ConsentLaunch> {
        if !self.host.foreground_available.load(Ordering::SeqCst) {
            return Ok(ConsentLaunch::NoForegroundContext);
        }
        self.host
            .record_launch(LEGACY_PROMPT_REQUEST_CODE, ConsentScreen::LegacyPrompt);
        Ok(ConsentLaunch::Launched)
    }
}

/// Pick the grant strategy for this host. Decided once at startup.
pub fn select_storage_policy(
    host: Arc<HostPermissionState>,
    managed_storage: bool,
) -> Arc<dyn StoragePolicyPort> {
    if managed_storage {
        Arc::new(ManagedStoragePolicy::new(host))
    } else {
        Arc::new(LegacyGrantsPolicy::new(host))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn managed_policy_reflects_the_full_access_flag() {
        let host = HostPermissionState::new();
        let policy = ManagedStoragePolicy::new(host.clone());

        assert!(!policy.is_granted());
        host.set_full_access(true);
        assert!(policy.is_granted());
    }

    #[tokio::test]
    async fn managed_policy_defers_without_a_foreground_context() {
        let host = HostPermissionState::new();
        host.set_foreground_available(false);
        let policy = ManagedStoragePolicy::new(host.clone());

        let launch = policy.request_consent(2_296).await.unwrap();
        assert_eq!(launch, ConsentLaunch::NoForegroundContext);
        assert!(host.launches().is_empty());
    }

    #[tokio::test]
    async fn managed_policy_falls_back_to_the_generic_screen() {
        let host = HostPermissionState::new();
        host.set_settings_screen_available(false);
        let policy = ManagedStoragePolicy::new(host.clone());

        let launch = policy.request_consent(2_296).await.unwrap();
        assert_eq!(launch, ConsentLaunch::Launched);
        assert_eq!(
            host.launches(),
            vec![ConsentLaunchRecord {
                request_code: 2_296,
                screen: ConsentScreen::GenericAllFilesAccess,
            }]
        );
    }

    #[tokio::test]
    async fn managed_policy_errors_when_no_screen_exists() {
        let host = HostPermissionState::new();
        host.set_settings_screen_available(false);
        host.set_generic_screen_available(false);
        let policy = ManagedStoragePolicy::new(host);

        assert!(policy.request_consent(2_296).await.is_err());
    }

    #[tokio::test]
    async fn legacy_policy_requires_both_grants() {
        let host = HostPermissionState::new();
        let policy = LegacyGrantsPolicy::new(host.clone());

        host.set_legacy_grants(true, false);
        assert!(!policy.is_granted());
        host.set_legacy_grants(true, true);
        assert!(policy.is_granted());
    }

    #[tokio::test]
    async fn legacy_policy_launches_the_prompt() {
        let host = HostPermissionState::new();
        let policy = LegacyGrantsPolicy::new(host.clone());

        let launch = policy.request_consent(2_296).await.unwrap();
        assert_eq!(launch, ConsentLaunch::Launched);
        assert_eq!(
            host.launches()[0],
            ConsentLaunchRecord {
                request_code: LEGACY_PROMPT_REQUEST_CODE,
                screen: ConsentScreen::LegacyPrompt,
            }
        );
    }
}
