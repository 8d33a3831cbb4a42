//! The pure event-context-to-candidate-paths mapping.
//!
//! This module never touches the filesystem; see `cuecast-soundpack` for
//! the resolver that turns a [`MappedSound`]'s candidates into a real file.

use crate::context::EventContext;
use crate::logical_path::LogicalPath;

/// The result of mapping an [`EventContext`] to candidate sound paths.
///
/// `selected_path` and `fallback_level` describe the mapper's own default
/// guess (the first candidate, tagged with its originating rule number);
/// the soundpack resolver recomputes both once it knows which candidate
/// actually exists on disk.
///
/// `rule_numbers[i]` is the 1-6 priority rule (per the order documented on
/// [`map_sound`]) that produced `all_paths[i]`; the two vectors are always
/// the same length and move in lockstep.
#[derive(Debug, Clone)]
pub struct MappedSound {
    pub selected_path: LogicalPath,
    pub fallback_level: usize,
    pub all_paths: Vec<LogicalPath>,
    pub rule_numbers: Vec<usize>,
}

/// Builds the ordered, de-duplicated list of candidate [`LogicalPath`]s
/// for `ctx`, highest priority first.
///
/// Priority order: sound hint (1), tool name (2), original (pre-alias)
/// tool name (3), operation verb (4), bare category (5), then the
/// universal `default` path (6).
pub fn map_sound(ctx: &EventContext) -> MappedSound {
    let category = ctx.category.as_slug();
    let mut all_paths = Vec::with_capacity(6);
    let mut rule_numbers = Vec::with_capacity(6);

    let mut push_unique = |rule: usize, path: LogicalPath| {
        if !all_paths.contains(&path) {
            all_paths.push(path);
            rule_numbers.push(rule);
        }
    };

    if !ctx.sound_hint.is_empty() {
        push_unique(1, LogicalPath::scoped(category, &ctx.sound_hint));
    }
    if !ctx.tool_name.is_empty() {
        push_unique(2, LogicalPath::scoped(category, &ctx.tool_name));
    }
    if !ctx.original_tool.is_empty() && ctx.original_tool != ctx.tool_name {
        push_unique(3, LogicalPath::scoped(category, &ctx.original_tool));
    }
    if !ctx.operation.is_empty() {
        push_unique(4, LogicalPath::scoped(category, &ctx.operation));
    }
    push_unique(5, LogicalPath::scoped(category, category));
    push_unique(6, LogicalPath::default_path());

    let selected_path = all_paths[0].clone();
    let fallback_level = rule_numbers[0];

    MappedSound {
        selected_path,
        fallback_level,
        all_paths,
        rule_numbers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Category;
    use proptest::prelude::*;

    fn base_ctx() -> EventContext {
        EventContext {
            category: Category::Success,
            tool_name: String::new(),
            original_tool: String::new(),
            operation: String::new(),
            sound_hint: String::new(),
            file_type: String::new(),
            is_success: true,
            has_error: false,
        }
    }

    #[test]
    fn bare_category_yields_category_and_default_only() {
        let mapped = map_sound(&base_ctx());
        let paths: Vec<_> = mapped.all_paths.iter().map(LogicalPath::as_str).collect();
        assert_eq!(paths, vec!["success/success", "default"]);
        assert_eq!(mapped.rule_numbers, vec![5, 6]);
        assert_eq!(mapped.fallback_level, 5);
        assert_eq!(mapped.selected_path.as_str(), "success/success");
    }

    #[test]
    fn full_context_produces_all_five_tiers_plus_default() {
        let ctx = EventContext {
            sound_hint: "bash-success".to_string(),
            tool_name: "bash".to_string(),
            original_tool: "Mcp__Ide__Bash".to_string(),
            operation: "run".to_string(),
            ..base_ctx()
        };
        let mapped = map_sound(&ctx);
        let paths: Vec<_> = mapped.all_paths.iter().map(LogicalPath::as_str).collect();
        assert_eq!(
            paths,
            vec![
                "success/bash-success",
                "success/bash",
                "success/mcp__ide__bash",
                "success/run",
                "success/success",
                "default",
            ]
        );
        assert_eq!(mapped.rule_numbers, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(mapped.fallback_level, 1);
    }

    #[test]
    fn original_tool_equal_to_tool_name_is_not_duplicated() {
        let ctx = EventContext {
            tool_name: "bash".to_string(),
            original_tool: "bash".to_string(),
            ..base_ctx()
        };
        let mapped = map_sound(&ctx);
        let paths: Vec<_> = mapped.all_paths.iter().map(LogicalPath::as_str).collect();
        assert_eq!(paths, vec!["success/bash", "success/success", "default"]);
        assert_eq!(mapped.rule_numbers, vec![2, 5, 6]);
        assert_eq!(mapped.fallback_level, 2);
    }

    #[test]
    fn duplicate_candidates_are_collapsed() {
        let ctx = EventContext {
            tool_name: "success".to_string(),
            ..base_ctx()
        };
        let mapped = map_sound(&ctx);
        let paths: Vec<_> = mapped.all_paths.iter().map(LogicalPath::as_str).collect();
        assert_eq!(paths, vec!["success/success", "default"]);
        // The tool-name candidate (rule 2) collapses into the identical
        // bare-category candidate (rule 5); the earlier rule wins the tag.
        assert_eq!(mapped.rule_numbers, vec![2, 6]);
        assert_eq!(mapped.fallback_level, 2);
    }

    #[test]
    fn selected_path_is_first_entry() {
        let ctx = EventContext {
            sound_hint: "custom".to_string(),
            ..base_ctx()
        };
        let mapped = map_sound(&ctx);
        assert_eq!(mapped.all_paths[0], mapped.selected_path);
        assert_eq!(mapped.rule_numbers[0], mapped.fallback_level);
    }

    proptest::proptest! {
        #[test]
        fn mapper_is_deterministic(
            hint in "[a-zA-Z0-9 _-]{0,12}",
            tool in "[a-zA-Z0-9 _-]{0,12}",
            op in "[a-zA-Z0-9 _-]{0,12}",
        ) {
            let ctx = EventContext {
                sound_hint: crate::slug::slugify(&hint),
                tool_name: crate::slug::slugify(&tool),
                original_tool: String::new(),
                operation: crate::slug::slugify(&op),
                ..base_ctx()
            };
            let first = map_sound(&ctx);
            let second = map_sound(&ctx);
            prop_assert_eq!(first.all_paths.clone(), second.all_paths.clone());
            prop_assert_eq!(first.rule_numbers.clone(), second.rule_numbers.clone());
            prop_assert_eq!(first.all_paths[0].clone(), first.selected_path.clone());
            prop_assert_eq!(first.rule_numbers[0], first.fallback_level);

            let mut seen = std::collections::HashSet::new();
            for path in &first.all_paths {
                prop_assert!(seen.insert(path.clone()), "duplicate candidate: {path}");
            }
        }
    }
}
