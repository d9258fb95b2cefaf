//! External-handler opener backed by the platform's opener command.
//!
//! Submitting an action spawns the opener process and a watcher task that
//! reports the result code back through the injected notifier once the
//! process exits. That notifier is the host's asynchronous result channel;
//! the facade wires it to the runtime's signal queue.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, trace, warn};

use fv_core::ports::{ActionPort, SubmittedAction, ViewAction};

/// Called with the request code when a submitted action completes.
pub type ResultNotifier = Arc<dyn Fn(i64) + Send + Sync>;

/// Opens locators with the operating system's default-handler command.
pub struct ProcessOpener {
    program: String,
    args: Vec<String>,
    notifier: ResultNotifier,
}

#[cfg(target_os = "macos")]
fn default_program() -> (&'static str, &'static [&'static str]) {
    ("open", &["-W"])
}

#[cfg(target_os = "windows")]
fn default_program() -> (&'static str, &'static [&'static str]) {
    ("cmd", &["/C", "start", "/WAIT", ""])
}

#[cfg(all(unix, not(target_os = "macos")))]
fn default_program() -> (&'static str, &'static [&'static str]) {
    ("xdg-open", &[])
}

fn program_on_path(program: &str) -> bool {
    let Some(paths) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&paths).any(|dir| {
        let candidate = dir.join(program);
        if candidate.is_file() {
            return true;
        }
        #[cfg(windows)]
        {
            if dir.join(format!("{program}.exe")).is_file() {
                return true;
            }
        }
        false
    })
}

/// Turn a locator into a process argument: `file://` locators become plain
/// decoded paths, anything else is passed through as-is.
fn locator_argument(locator: &str) -> String {
    match locator.strip_prefix("file://") {
        Some(rest) => urlencoding::decode(rest)
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| rest.to_string()),
        None => locator.to_string(),
    }
}

impl ProcessOpener {
    pub fn new(notifier: ResultNotifier) -> Self {
        let (program, args) = default_program();
        Self::with_program(program, args.iter().map(|a| a.to_string()), notifier)
    }

    /// Build an opener around an explicit command. The default-program
    /// constructor is the normal entry point; this one exists so embedders
    /// can substitute their own handler.
    pub fn with_program(
        program: impl Into<String>,
        args: impl IntoIterator<Item = String>,
        notifier: ResultNotifier,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().collect(),
            notifier,
        }
    }

    fn spawn_and_watch(&self, argument: String, request_code: i64) -> Result<()> {
        let mut command = Command::new(&self.program);
        command.args(&self.args).arg(&argument);

        let mut child = command
            .spawn()
            .with_context(|| format!("failed to spawn {}", self.program))?;
        trace!(request_code, %argument, "handler process spawned");

        let notifier = self.notifier.clone();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => trace!(request_code, ?status, "handler process exited"),
                Err(error) => warn!(request_code, %error, "failed to await handler process"),
            }
            notifier(request_code);
        });
        Ok(())
    }
}

#[async_trait]
impl ActionPort for ProcessOpener {
    async fn can_resolve(&self, action: &ViewAction) -> bool {
        let resolvable = program_on_path(&self.program);
        trace!(locator = %action.locator, resolvable, "handler resolution probe");
        resolvable
    }

    async fn submit_for_result(&self, action: SubmittedAction, request_code: i64) -> Result<()> {
        // No handler-selection prompt exists here, so a chooser submission
        // degrades to a direct launch.
        if let SubmittedAction::Chooser { title, .. } = &action {
            debug!(%title, "no chooser surface, launching the default handler");
        }
        let argument = locator_argument(action.action().locator.as_str());
        self.spawn_and_watch(argument, request_code)
    }

    async fn launch_store_search(&self, mime_type: &str) -> Result<()> {
        let query = urlencoding::encode(mime_type);
        let url = format!("https://www.google.com/search?q=application+to+open+{query}");
        debug!(%mime_type, "launching handler search");

        let mut command = Command::new(&self.program);
        command.args(&self.args).arg(&url);
        let mut child = command
            .spawn()
            .with_context(|| format!("failed to spawn {}", self.program))?;
        tokio::spawn(async move {
            let _ = child.wait().await;
        });
        Ok(())
    }
}
