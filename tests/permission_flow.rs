//! End-to-end storage-permission flows through the assembled viewer.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, timeout};

use fileviewer::{
    ConsentScreen, FileViewer, HostPermissionState, HostSignal, PermissionState,
    ACCESS_CONSENT_REQUEST_CODE,
};

fn viewer_with(host: Arc<HostPermissionState>, managed: bool) -> FileViewer {
    FileViewer::builder()
        .permission_host(host)
        .managed_storage(managed)
        .build()
}

async fn deliver_consent_result(viewer: &FileViewer) {
    viewer
        .host_signals()
        .send(HostSignal::ActivityResult {
            request_code: ACCESS_CONSENT_REQUEST_CODE,
            payload: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn managed_grant_round_trip() {
    let host = HostPermissionState::new();
    let viewer = Arc::new(viewer_with(host.clone(), true));

    let caller = viewer.clone();
    let pending = tokio::spawn(async move { caller.ensure_storage_access().await });
    sleep(Duration::from_millis(50)).await;

    assert_eq!(viewer.storage_state(), PermissionState::RequestInFlight);
    let launches = host.launches();
    assert_eq!(launches.len(), 1);
    assert_eq!(launches[0].request_code, ACCESS_CONSENT_REQUEST_CODE);
    assert_eq!(launches[0].screen, ConsentScreen::AllFilesAccessSettings);

    host.set_full_access(true);
    deliver_consent_result(&viewer).await;

    let granted = timeout(Duration::from_secs(2), pending)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert!(granted);
    assert_eq!(viewer.storage_state(), PermissionState::Granted);
}

#[tokio::test]
async fn denied_consent_returns_false_and_resets_for_reprobe() {
    let host = HostPermissionState::new();
    let viewer = Arc::new(viewer_with(host, true));

    let caller = viewer.clone();
    let pending = tokio::spawn(async move { caller.ensure_storage_access().await });
    sleep(Duration::from_millis(50)).await;

    // User left the settings screen without granting anything.
    deliver_consent_result(&viewer).await;

    let granted = timeout(Duration::from_secs(2), pending)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert!(!granted);
    assert_eq!(viewer.storage_state(), PermissionState::Unknown);
}

#[tokio::test]
async fn deferred_consent_retries_on_resume() {
    let host = HostPermissionState::new();
    host.set_foreground_available(false);
    let viewer = Arc::new(viewer_with(host.clone(), true));

    let caller = viewer.clone();
    let pending = tokio::spawn(async move { caller.ensure_storage_access().await });
    sleep(Duration::from_millis(50)).await;

    assert_eq!(viewer.storage_state(), PermissionState::RequestDeferred);
    assert!(host.launches().is_empty());

    host.set_foreground_available(true);
    viewer.host_signals().send(HostSignal::Resumed).await.unwrap();
    sleep(Duration::from_millis(50)).await;

    assert_eq!(viewer.storage_state(), PermissionState::RequestInFlight);
    assert_eq!(host.launches().len(), 1);

    host.set_full_access(true);
    deliver_consent_result(&viewer).await;

    let granted = timeout(Duration::from_secs(2), pending)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert!(granted);
}

#[tokio::test]
async fn legacy_grants_flow_uses_the_prompt() {
    let host = HostPermissionState::new();
    let viewer = Arc::new(viewer_with(host.clone(), false));

    let caller = viewer.clone();
    let pending = tokio::spawn(async move { caller.ensure_storage_access().await });
    sleep(Duration::from_millis(50)).await;

    assert_eq!(host.launches()[0].screen, ConsentScreen::LegacyPrompt);

    host.set_legacy_grants(true, true);
    deliver_consent_result(&viewer).await;

    let granted = timeout(Duration::from_secs(2), pending)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert!(granted);
    assert_eq!(viewer.storage_state(), PermissionState::Granted);
}

#[tokio::test]
async fn already_granted_resolves_without_a_prompt() {
    let host = HostPermissionState::new();
    host.set_full_access(true);
    let viewer = viewer_with(host.clone(), true);

    let granted = viewer.ensure_storage_access().await.unwrap();
    assert!(granted);
    assert!(host.launches().is_empty());
    // The fast path answers without touching the state machine.
    assert_eq!(viewer.storage_state(), PermissionState::Unknown);
}

#[tokio::test]
async fn later_caller_supersedes_the_first() {
    let host = HostPermissionState::new();
    let viewer = Arc::new(viewer_with(host.clone(), true));

    let first_caller = viewer.clone();
    let first = tokio::spawn(async move { first_caller.ensure_storage_access().await });
    sleep(Duration::from_millis(50)).await;

    let second_caller = viewer.clone();
    let second = tokio::spawn(async move { second_caller.ensure_storage_access().await });
    sleep(Duration::from_millis(50)).await;

    host.set_full_access(true);
    deliver_consent_result(&viewer).await;

    let second_outcome = timeout(Duration::from_secs(2), second)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert!(second_outcome);

    // The superseded caller's callbacks were dropped unfired.
    let first_outcome = timeout(Duration::from_secs(2), first)
        .await
        .unwrap()
        .unwrap();
    assert!(first_outcome.is_err());
}
