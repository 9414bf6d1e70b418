//! Foreground-application sampling.
//!
//! The host query lives behind [`WorkspaceAdapter`] so the poller is testable
//! without a desktop session. The production adapter shells out to
//! `osascript`; a machine without one (or a query that errors) reads as "no
//! active application", which classifies as idle downstream.

use pet_core::AppIdentity;
use std::process::Command;

pub trait WorkspaceAdapter: Send {
    fn frontmost(&self) -> Result<Option<AppIdentity>, String>;
}

#[derive(Debug, Clone, Default)]
pub struct CommandWorkspaceAdapter;

const FRONTMOST_SCRIPT: &str = r#"tell application "System Events"
    set frontApp to first application process whose frontmost is true
    set appName to name of frontApp
    try
        set bid to bundle identifier of frontApp
    on error
        set bid to ""
    end try
    return bid & tab & appName
end tell"#;

impl WorkspaceAdapter for CommandWorkspaceAdapter {
    fn frontmost(&self) -> Result<Option<AppIdentity>, String> {
        let output = run_osascript(FRONTMOST_SCRIPT)?;
        Ok(parse_frontmost(&output))
    }
}

fn run_osascript(script: &str) -> Result<String, String> {
    match Command::new("osascript").arg("-e").arg(script).output() {
        Ok(output) if output.status.success() => {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        }
        Ok(_) => Ok(String::new()),
        Err(_) => Ok(String::new()),
    }
}

fn parse_frontmost(output: &str) -> Option<AppIdentity> {
    let line = output.trim();
    if line.is_empty() {
        return None;
    }

    let (bundle_id, display_name) = match line.split_once('\t') {
        Some((bundle, name)) => (bundle.trim(), name.trim()),
        None => ("", line),
    };

    let bundle_id = if bundle_id == "missing value" {
        ""
    } else {
        bundle_id
    };

    if bundle_id.is_empty() && display_name.is_empty() {
        return None;
    }

    Some(AppIdentity {
        bundle_id: bundle_id.to_string(),
        display_name: display_name.to_string(),
    })
}
