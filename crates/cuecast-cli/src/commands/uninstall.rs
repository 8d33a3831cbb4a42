//! `cuecast uninstall`: removes cuecast's hook entries from the host's
//! settings JSON, leaving every unrelated key untouched.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use super::settings_path;

#[derive(Args, Debug)]
pub struct UninstallArgs {
    /// Hook event name to remove cuecast from. Repeatable; defaults to
    /// every hook type when omitted.
    #[arg(long = "hook-type")]
    pub hook_type: Vec<String>,

    /// Path to the settings file, overriding `~/.claude/settings.json`.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: UninstallArgs) -> Result<()> {
    let path = settings_path(args.config.as_deref());
    if !path.exists() {
        println!("No settings file found at {}", path.display());
        return Ok(());
    }

    let raw = std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
    let mut settings: Value = serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))?;

    let Some(hooks) = settings.get_mut("hooks").and_then(Value::as_object_mut) else {
        println!("No hooks configured.");
        return Ok(());
    };

    let hook_types: Vec<String> = if args.hook_type.is_empty() {
        hooks.keys().cloned().collect()
    } else {
        args.hook_type.clone()
    };

    let command = hook_command();
    let mut removed_count = 0;

    for hook_type in &hook_types {
        if let Some(array) = hooks.get_mut(hook_type).and_then(Value::as_array_mut) {
            let before = array.len();
            array.retain(|entry| !matches_command(entry, &command));
            removed_count += before - array.len();
        }
    }

    if removed_count == 0 {
        println!("No cuecast hooks found to remove.");
        return Ok(());
    }

    let content = serde_json::to_string_pretty(&settings)?;
    std::fs::write(&path, content).with_context(|| format!("failed to write {}", path.display()))?;

    println!("Removed {removed_count} cuecast hook entry(ies) from {}", path.display());
    Ok(())
}

fn hook_command() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.to_str().map(str::to_string))
        .unwrap_or_else(|| "cuecast".to_string())
}

fn matches_command(entry: &Value, command: &str) -> bool {
    entry
        .get("hooks")
        .and_then(Value::as_array)
        .is_some_and(|hooks| {
            hooks
                .iter()
                .any(|h| h.get("command").and_then(Value::as_str) == Some(command))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::install::{InstallArgs, run as install};
    use serde_json::json;

    #[test]
    fn uninstall_removes_only_cuecast_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"hooks": {"Stop": [{"matcher": "*", "hooks": [{"type": "command", "command": "other-tool"}]}]}}"#,
        )
        .unwrap();

        install(InstallArgs {
            force: false,
            hook_type: vec!["Stop".to_string()],
            config: Some(path.clone()),
        })
        .unwrap();

        run(UninstallArgs {
            hook_type: vec!["Stop".to_string()],
            config: Some(path.clone()),
        })
        .unwrap();

        let settings: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let stop = settings["hooks"]["Stop"].as_array().unwrap();
        assert_eq!(stop.len(), 1);
        assert_eq!(stop[0]["hooks"][0]["command"], "other-tool");
    }

    #[test]
    fn uninstall_on_missing_file_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let result = run(UninstallArgs {
            hook_type: vec![],
            config: Some(path),
        });
        assert!(result.is_ok());
    }

    #[test]
    fn uninstall_preserves_unrelated_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, json!({"theme": "dark", "hooks": {}}).to_string()).unwrap();

        run(UninstallArgs {
            hook_type: vec![],
            config: Some(path.clone()),
        })
        .unwrap();

        let settings: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(settings["theme"], "dark");
    }
}
