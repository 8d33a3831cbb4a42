//! `cuecast install`: registers the hook command in the host's settings JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::{Value, json};

use super::settings_path;

const ALL_HOOK_TYPES: &[&str] = &[
    "PreToolUse",
    "PostToolUse",
    "UserPromptSubmit",
    "Notification",
    "Stop",
    "SubagentStop",
    "PreCompact",
];

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Overwrite a pre-existing hook entry for the same hook type.
    #[arg(long)]
    pub force: bool,

    /// Hook event name to install for. Repeatable; defaults to all known
    /// hook types when omitted.
    #[arg(long = "hook-type")]
    pub hook_type: Vec<String>,

    /// Path to the settings file, overriding `~/.claude/settings.json`.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: InstallArgs) -> Result<()> {
    let path = settings_path(args.config.as_deref());
    let mut settings = load_settings(&path)?;

    let hook_types: Vec<&str> = if args.hook_type.is_empty() {
        ALL_HOOK_TYPES.to_vec()
    } else {
        args.hook_type.iter().map(String::as_str).collect()
    };

    let command = hook_command();
    ensure_hooks_object(&mut settings);

    let mut installed = Vec::new();
    let mut skipped = Vec::new();

    for hook_type in hook_types {
        let array = settings["hooks"]
            .as_object_mut()
            .unwrap()
            .entry(hook_type.to_string())
            .or_insert_with(|| json!([]));
        let array = array.as_array_mut().context("hooks entry was not an array")?;

        let already_present = array.iter().any(|entry| matches_command(entry, &command));

        if already_present && !args.force {
            skipped.push(hook_type.to_string());
            continue;
        }

        if args.force {
            array.retain(|entry| !matches_command(entry, &command));
        }

        array.push(json!({
            "matcher": "*",
            "hooks": [{
                "type": "command",
                "command": command,
            }]
        }));
        installed.push(hook_type.to_string());
    }

    save_settings(&path, &settings)?;

    if !installed.is_empty() {
        println!("Installed cuecast hooks: {}", installed.join(", "));
    }
    if !skipped.is_empty() {
        println!(
            "Already installed, use --force to overwrite: {}",
            skipped.join(", ")
        );
    }
    println!("Settings file: {}", path.display());

    Ok(())
}

fn hook_command() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.to_str().map(str::to_string))
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

fn ensure_hooks_object(settings: &mut Value) {
    if settings.get("hooks").is_none() {
        settings["hooks"] = json!({});
    }
}

fn load_settings(path: &std::path::Path) -> Result<Value> {
    if !path.exists() {
        return Ok(json!({}));
    }
    let raw = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

fn save_settings(path: &std::path::Path, settings: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}
