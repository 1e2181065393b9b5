//! Guided prompt templates
//!
//! Each prompt is a Liquid template rendered into a single user message.
//! Optional arguments that are not supplied render as empty and test false.

use crate::error::{LinearKanbanError, Result};
use crate::template::TemplateEngine;
use rmcp::model::{
    GetPromptResult, Prompt, PromptArgument, PromptMessage, PromptMessageContent,
    PromptMessageRole,
};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// One declared prompt argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptArgumentDescriptor {
    /// Argument name as used in the template
    pub name: &'static str,
    /// What the argument means
    pub description: &'static str,
    /// Whether rendering fails without it
    pub required: bool,
}

/// Static description of a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptDescriptor {
    /// Prompt name
    pub name: &'static str,
    /// What the prompt does
    pub description: &'static str,
    /// Declared arguments
    pub arguments: &'static [PromptArgumentDescriptor],
    /// Liquid template source
    pub template: &'static str,
}

impl PromptDescriptor {
    fn optional_names(&self) -> Vec<&'static str> {
        self.arguments
            .iter()
            .filter(|a| !a.required)
            .map(|a| a.name)
            .collect()
    }
}

/// `focus` value used when `write_project_update` gets none
pub const DEFAULT_FOCUS: &str = "summary";

/// The prompt catalog, in listing order
pub const PROMPTS: &[PromptDescriptor] = &[
    PromptDescriptor {
        name: "kanban_overview",
        description:
            "Get an overview of the current kanban board state with all issues organized by column",
        arguments: &[PromptArgumentDescriptor {
            name: "teamId",
            description: "Optional team ID to filter by",
            required: false,
        }],
        template: include_str!("prompt_templates/kanban_overview.liquid"),
    },
    PromptDescriptor {
        name: "create_task",
        description: "Guided prompt for creating a new task/issue in Linear",
        arguments: &[
            PromptArgumentDescriptor {
                name: "title",
                description: "Title of the task to create",
                required: true,
            },
            PromptArgumentDescriptor {
                name: "description",
                description: "Description of the task",
                required: false,
            },
        ],
        template: include_str!("prompt_templates/create_task.liquid"),
    },
    PromptDescriptor {
        name: "daily_standup",
        description:
            "Generate a summary suitable for a daily standup meeting based on recent issue activity",
        arguments: &[],
        template: include_str!("prompt_templates/daily_standup.liquid"),
    },
    PromptDescriptor {
        name: "write_project_update",
        description: "Guided prompt for writing a project update that summarizes development progress, accomplishments, and next steps",
        arguments: &[
            PromptArgumentDescriptor {
                name: "projectId",
                description: "The ID of the project to write an update for",
                required: true,
            },
            PromptArgumentDescriptor {
                name: "focus",
                description: "Optional focus area: 'progress' (what was accomplished), 'blockers' (issues encountered), 'planning' (next steps), or 'summary' (comprehensive)",
                required: false,
            },
        ],
        template: include_str!("prompt_templates/write_project_update.liquid"),
    },
    PromptDescriptor {
        name: "milestone_overview",
        description:
            "Get an overview of milestones for a project, including progress and assigned issues",
        arguments: &[PromptArgumentDescriptor {
            name: "projectId",
            description: "The ID of the project to show milestones for",
            required: true,
        }],
        template: include_str!("prompt_templates/milestone_overview.liquid"),
    },
];

/// Look up a prompt by name
pub fn find_prompt(name: &str) -> Option<&'static PromptDescriptor> {
    PROMPTS.iter().find(|p| p.name == name)
}

/// The catalog as MCP prompts
pub fn list_prompts() -> Vec<Prompt> {
    PROMPTS
        .iter()
        .map(|p| Prompt {
            name: p.name.to_string(),
            description: Some(p.description.to_string()),
            arguments: Some(
                p.arguments
                    .iter()
                    .map(|a| PromptArgument {
                        name: a.name.to_string(),
                        description: Some(a.description.to_string()),
                        required: Some(a.required),
                    })
                    .collect(),
            ),
        })
        .collect()
}

/// Flatten MCP prompt arguments to strings; nulls count as absent
fn json_map_to_string_map(args: Option<&Map<String, Value>>) -> HashMap<String, String> {
    args.into_iter()
        .flatten()
        .filter_map(|(key, value)| {
            let value = match value {
                Value::Null => return None,
                Value::String(s) if s.is_empty() => return None,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some((key.clone(), value))
        })
        .collect()
}

/// Render a prompt to its message text
pub fn render_prompt_text(name: &str, args: Option<&Map<String, Value>>) -> Result<String> {
    let prompt = find_prompt(name).ok_or_else(|| LinearKanbanError::UnknownPrompt(name.to_string()))?;
    let mut values = json_map_to_string_map(args);

    if let Some(missing) = prompt
        .arguments
        .iter()
        .find(|a| a.required && values.get(a.name).map_or(true, |v| v.is_empty()))
    {
        return Err(LinearKanbanError::missing(missing.name));
    }

    if prompt.name == "write_project_update" && values.get("focus").map_or(true, |v| v.is_empty()) {
        values.insert("focus".to_string(), DEFAULT_FOCUS.to_string());
    }

    let text = TemplateEngine::new().render(prompt.template, &values, &prompt.optional_names())?;
    Ok(text.trim_end().to_string())
}

/// Render a prompt into a single user message
pub fn render_prompt(name: &str, args: Option<&Map<String, Value>>) -> Result<GetPromptResult> {
    let text = render_prompt_text(name, args)?;
    let description = find_prompt(name).map(|p| p.description.to_string());
    Ok(GetPromptResult {
        description,
        messages: vec![PromptMessage {
            role: PromptMessageRole::User,
            content: PromptMessageContent::Text { text },
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_every_template_parses() {
        for prompt in PROMPTS {
            assert!(
                crate::template::Template::new(prompt.template).is_ok(),
                "{} does not parse",
                prompt.name
            );
        }
    }

    #[test]
    fn test_kanban_overview_with_and_without_team() {
        let text = render_prompt_text("kanban_overview", None).unwrap();
        assert!(text.starts_with(
            "Please provide a kanban board overview for my Linear workspace.\n"
        ));

        let text =
            render_prompt_text("kanban_overview", Some(&args(json!({ "teamId": "T1" })))).unwrap();
        assert!(text.contains("workspace (team: T1)."));
        assert!(text.ends_with("- Assignee (if assigned)"));
    }

    #[test]
    fn test_create_task_description_line() {
        let text = render_prompt_text("create_task", Some(&args(json!({ "title": "Fix login" }))))
            .unwrap();
        assert!(text.contains("Title: Fix login\n\n\nFirst, use list_teams"));
        assert!(!text.contains("Description:"));

        let text = render_prompt_text(
            "create_task",
            Some(&args(json!({ "title": "Fix login", "description": "SSO is broken" }))),
        )
        .unwrap();
        assert!(text.contains("Title: Fix login\nDescription: SSO is broken\n"));
    }

    #[test]
    fn test_empty_optional_arguments_render_as_absent() {
        let text = render_prompt_text(
            "create_task",
            Some(&args(json!({ "title": "Fix login", "description": "" }))),
        )
        .unwrap();
        assert!(!text.contains("Description:"));
        assert!(text.contains("Title: Fix login\n\n\nFirst, use list_teams"));

        let text =
            render_prompt_text("kanban_overview", Some(&args(json!({ "teamId": "" })))).unwrap();
        assert!(text.starts_with(
            "Please provide a kanban board overview for my Linear workspace.\n"
        ));
        assert!(!text.contains("(team:"));
    }

    #[test]
    fn test_write_project_update_focus() {
        let text = render_prompt_text(
            "write_project_update",
            Some(&args(json!({ "projectId": "P1" }))),
        )
        .unwrap();
        assert!(text.contains("Focus area: summary"));
        assert!(text.contains("4. Provide a comprehensive summary"));

        let text = render_prompt_text(
            "write_project_update",
            Some(&args(json!({ "projectId": "P1", "focus": "blockers" }))),
        )
        .unwrap();
        assert!(text.contains("Focus area: blockers"));
        assert!(text.contains("4. Focus on any blockers, risks, or issues encountered"));
    }

    #[test]
    fn test_missing_required_argument() {
        let err = render_prompt_text("milestone_overview", None).unwrap_err();
        assert_eq!(err.to_string(), "Missing required argument: projectId");

        let err = render_prompt_text(
            "create_task",
            Some(&args(json!({ "title": null }))),
        )
        .unwrap_err();
        assert!(matches!(err, LinearKanbanError::MissingArgument(_)));
    }

    #[test]
    fn test_unknown_prompt() {
        let err = render_prompt_text("nope", None).unwrap_err();
        assert_eq!(err.to_string(), "Unknown prompt: nope");
    }

    #[test]
    fn test_render_prompt_is_single_user_message() {
        let result = render_prompt("daily_standup", None).unwrap();
        assert_eq!(result.messages.len(), 1);
        assert!(matches!(result.messages[0].role, PromptMessageRole::User));
    }

    #[test]
    fn test_list_prompts_declares_arguments() {
        let prompts = list_prompts();
        assert_eq!(prompts.len(), 5);
        let create_task = prompts.iter().find(|p| p.name == "create_task").unwrap();
        let arguments = create_task.arguments.as_ref().unwrap();
        assert_eq!(arguments[0].required, Some(true));
        assert_eq!(arguments[1].required, Some(false));
    }
}
