//! Action port - abstracts intent-style action submission to the host.

use anyhow::Result;
use async_trait::async_trait;

use crate::locator::Locator;

/// A view action handed to whatever external handler the host resolves.
///
/// Carries the locator, the MIME type, read+write grant flags, and
/// new-independent-task semantics: the launched handler must not depend on
/// the caller's current screen stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewAction {
    pub locator: Locator,
    pub mime_type: Option<String>,
    pub grant_read: bool,
    pub grant_write: bool,
    pub new_task: bool,
}

impl ViewAction {
    pub fn new(locator: Locator, mime_type: Option<String>) -> Self {
        Self {
            locator,
            mime_type,
            grant_read: true,
            grant_write: true,
            new_task: true,
        }
    }
}

/// How a [`ViewAction`] is submitted: directly to the resolved default
/// handler, or wrapped in the host's selection prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmittedAction {
    Direct(ViewAction),
    Chooser { action: ViewAction, title: String },
}

impl SubmittedAction {
    pub fn action(&self) -> &ViewAction {
        match self {
            SubmittedAction::Direct(action) => action,
            SubmittedAction::Chooser { action, .. } => action,
        }
    }
}

/// Host action submission surface.
#[async_trait]
pub trait ActionPort: Send + Sync {
    /// Whether any installed handler can service the action.
    async fn can_resolve(&self, action: &ViewAction) -> bool;

    /// Submit the action for a later result callback keyed by `request_code`.
    ///
    /// Success means handoff succeeded, nothing more; the handler's own
    /// outcome is not observable through this port.
    async fn submit_for_result(&self, action: SubmittedAction, request_code: i64) -> Result<()>;

    /// Launch a marketplace search for handlers of the given MIME type.
    ///
    /// Fire-and-forget: not correlated, no result delivery.
    async fn launch_store_search(&self, mime_type: &str) -> Result<()>;
}
