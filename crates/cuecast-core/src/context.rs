//! Classification of a raw [`HookEvent`] into a structured [`EventContext`].

use serde_json::Value;

use crate::event::{HookEvent, HookEventName};
use crate::slug::slugify;

/// The coarse bucket a hook event falls into.
///
/// Drives which branch of the soundpack (`loading/`, `success/`, `error/`,
/// `interactive/`) a sound is looked up under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Loading,
    Success,
    Error,
    Interactive,
}

impl Category {
    /// The slug used as the first path segment of every [`crate::LogicalPath`]
    /// derived from an event in this category.
    pub fn as_slug(self) -> &'static str {
        match self {
            Category::Loading => "loading",
            Category::Success => "success",
            Category::Error => "error",
            Category::Interactive => "interactive",
        }
    }
}

/// A normalized, derived view of a [`HookEvent`], ready for sound mapping.
///
/// Every field besides `category` may be empty; consumers check `!= ""`
/// (here, `.is_empty()`) before using a field to build a path segment.
#[derive(Debug, Clone)]
pub struct EventContext {
    pub category: Category,
    pub tool_name: String,
    pub original_tool: String,
    pub operation: String,
    pub sound_hint: String,
    pub file_type: String,
    pub is_success: bool,
    pub has_error: bool,
}

/// MCP-style tool wrapper prefix: `mcp__<server>__<tool>`. Tools arriving
/// through this convention are remapped to their innermost segment, with
/// the untouched raw name retained as `original_tool`.
const MCP_WRAPPER_PREFIX: &str = "mcp__";

/// Classifies a raw hook event into an [`EventContext`].
///
/// Never panics: every lookup into the loosely-typed `tool_input`/
/// `tool_response` JSON values degrades to an empty/false default rather
/// than erroring.
pub fn classify(event: &HookEvent) -> EventContext {
    let (category, is_success, has_error) = classify_category(event);
    let (tool_name, original_tool) = normalize_tool_name(event.tool_name.as_deref());
    let operation = derive_operation(event.tool_input.as_ref());
    let sound_hint = event
        .sound_hint
        .as_deref()
        .map(slugify)
        .unwrap_or_default();
    let file_type = derive_file_type(event.tool_input.as_ref());

    EventContext {
        category,
        tool_name,
        original_tool,
        operation,
        sound_hint,
        file_type,
        is_success,
        has_error,
    }
}

fn classify_category(event: &HookEvent) -> (Category, bool, bool) {
    match event.hook_event_name {
        Some(HookEventName::PreToolUse) => (Category::Loading, false, false),
        Some(HookEventName::PostToolUse) => {
            let has_error = post_tool_use_is_error(event.tool_response.as_ref());
            if has_error {
                (Category::Error, false, true)
            } else {
                (Category::Success, true, false)
            }
        }
        Some(HookEventName::Stop) | Some(HookEventName::SubagentStop) => {
            (Category::Success, true, false)
        }
        Some(HookEventName::UserPromptSubmit)
        | Some(HookEventName::Notification)
        | Some(HookEventName::PreCompact) => (Category::Interactive, false, false),
        Some(HookEventName::Unknown) | None => (Category::Interactive, false, false),
    }
}

fn post_tool_use_is_error(response: Option<&Value>) -> bool {
    let Some(response) = response else {
        return false;
    };

    let stderr_nonempty = response
        .get("stderr")
        .and_then(Value::as_str)
        .is_some_and(|s| !s.is_empty());
    let interrupted = response
        .get("interrupted")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let explicit_failure = response
        .get("success")
        .and_then(Value::as_bool)
        .is_some_and(|success| !success);

    stderr_nonempty || interrupted || explicit_failure
}

fn normalize_tool_name(raw: Option<&str>) -> (String, String) {
    let Some(raw) = raw else {
        return (String::new(), String::new());
    };
    if raw.is_empty() {
        return (String::new(), String::new());
    }

    match strip_mcp_wrapper(raw) {
        Some(inner) => (slugify(inner), raw.to_string()),
        None => (slugify(raw), String::new()),
    }
}

/// Unwraps `mcp__<server>__<tool>` down to `<tool>`, the innermost segment.
fn strip_mcp_wrapper(raw: &str) -> Option<&str> {
    let rest = raw.strip_prefix(MCP_WRAPPER_PREFIX)?;
    rest.rsplit_once("__").map(|(_, tool)| tool)
}

fn derive_operation(tool_input: Option<&Value>) -> String {
    let Some(input) = tool_input.and_then(Value::as_object) else {
        return String::new();
    };

    let has = |key: &str| input.contains_key(key);

    if has("file_path") && has("content") {
        "write".to_string()
    } else if has("file_path") {
        "read".to_string()
    } else if has("command") {
        "run".to_string()
    } else if has("pattern") || has("query") {
        "search".to_string()
    } else if has("url") {
        "fetch".to_string()
    } else {
        String::new()
    }
}

fn derive_file_type(tool_input: Option<&Value>) -> String {
    let path = tool_input
        .and_then(Value::as_object)
        .and_then(|obj| obj.get("file_path"))
        .and_then(Value::as_str);

    let Some(path) = path else {
        return String::new();
    };

    std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(name: HookEventName) -> HookEvent {
        HookEvent {
            hook_event_name: Some(name),
            ..Default::default()
        }
    }

    #[test]
    fn pre_tool_use_is_loading() {
        let ctx = classify(&event(HookEventName::PreToolUse));
        assert_eq!(ctx.category, Category::Loading);
    }

    #[test]
    fn post_tool_use_with_stderr_is_error() {
        let mut evt = event(HookEventName::PostToolUse);
        evt.tool_response = Some(json!({"stdout": "", "stderr": "boom", "interrupted": false}));
        let ctx = classify(&evt);
        assert_eq!(ctx.category, Category::Error);
        assert!(ctx.has_error);
        assert!(!ctx.is_success);
    }

    #[test]
    fn post_tool_use_with_interrupted_is_error() {
        let mut evt = event(HookEventName::PostToolUse);
        evt.tool_response = Some(json!({"interrupted": true}));
        assert_eq!(classify(&evt).category, Category::Error);
    }

    #[test]
    fn post_tool_use_with_explicit_failure_is_error() {
        let mut evt = event(HookEventName::PostToolUse);
        evt.tool_response = Some(json!({"success": false}));
        assert_eq!(classify(&evt).category, Category::Error);
    }

    #[test]
    fn post_tool_use_without_failure_markers_is_success() {
        let mut evt = event(HookEventName::PostToolUse);
        evt.tool_response = Some(json!({"stdout": "ok", "stderr": "", "interrupted": false}));
        let ctx = classify(&evt);
        assert_eq!(ctx.category, Category::Success);
        assert!(ctx.is_success);
    }

    #[test]
    fn stop_and_subagent_stop_are_success() {
        assert_eq!(classify(&event(HookEventName::Stop)).category, Category::Success);
        assert_eq!(
            classify(&event(HookEventName::SubagentStop)).category,
            Category::Success
        );
    }

    #[test]
    fn user_prompt_and_notification_are_interactive() {
        assert_eq!(
            classify(&event(HookEventName::UserPromptSubmit)).category,
            Category::Interactive
        );
        assert_eq!(
            classify(&event(HookEventName::Notification)).category,
            Category::Interactive
        );
    }

    #[test]
    fn missing_hook_event_name_is_interactive() {
        let ctx = classify(&HookEvent::default());
        assert_eq!(ctx.category, Category::Interactive);
    }

    #[test]
    fn mcp_wrapped_tool_is_unwrapped_with_original_preserved() {
        let mut evt = event(HookEventName::PreToolUse);
        evt.tool_name = Some("mcp__ide__Bash".to_string());
        let ctx = classify(&evt);
        assert_eq!(ctx.tool_name, "bash");
        assert_eq!(ctx.original_tool, "mcp__ide__Bash");
    }

    #[test]
    fn plain_tool_name_has_no_original_tool() {
        let mut evt = event(HookEventName::PreToolUse);
        evt.tool_name = Some("Bash".to_string());
        let ctx = classify(&evt);
        assert_eq!(ctx.tool_name, "bash");
        assert_eq!(ctx.original_tool, "");
    }

    #[test]
    fn operation_write_requires_file_path_and_content() {
        let mut evt = event(HookEventName::PreToolUse);
        evt.tool_input = Some(json!({"file_path": "/tmp/x", "content": "hi"}));
        assert_eq!(classify(&evt).operation, "write");
    }

    #[test]
    fn operation_read_is_file_path_only() {
        let mut evt = event(HookEventName::PreToolUse);
        evt.tool_input = Some(json!({"file_path": "/tmp/x"}));
        assert_eq!(classify(&evt).operation, "read");
    }

    #[test]
    fn operation_run_from_command() {
        let mut evt = event(HookEventName::PreToolUse);
        evt.tool_input = Some(json!({"command": "ls"}));
        assert_eq!(classify(&evt).operation, "run");
    }

    #[test]
    fn operation_search_from_pattern_or_query() {
        let mut evt = event(HookEventName::PreToolUse);
        evt.tool_input = Some(json!({"pattern": "foo"}));
        assert_eq!(classify(&evt).operation, "search");

        let mut evt2 = event(HookEventName::PreToolUse);
        evt2.tool_input = Some(json!({"query": "foo"}));
        assert_eq!(classify(&evt2).operation, "search");
    }

    #[test]
    fn operation_fetch_from_url() {
        let mut evt = event(HookEventName::PreToolUse);
        evt.tool_input = Some(json!({"url": "https://example.com"}));
        assert_eq!(classify(&evt).operation, "fetch");
    }

    #[test]
    fn file_type_lowercased_from_file_path_extension() {
        let mut evt = event(HookEventName::PreToolUse);
        evt.tool_input = Some(json!({"file_path": "/tmp/NOTES.TXT"}));
        assert_eq!(classify(&evt).file_type, "txt");
    }

    #[test]
    fn sound_hint_is_normalized() {
        let mut evt = event(HookEventName::PostToolUse);
        evt.tool_response = Some(json!({"stdout": "ok"}));
        evt.sound_hint = Some("Bash Success".to_string());
        assert_eq!(classify(&evt).sound_hint, "bash-success");
    }
}
