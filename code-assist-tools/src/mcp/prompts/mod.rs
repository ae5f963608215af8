//! Built-in prompts
//!
//! | Prompt             | Arguments                 |
//! |--------------------|---------------------------|
//! | `code-assist-init` | none                      |
//! | `git-commands`     | `repo_path`, `operation`  |
//! | `cli-commands`     | `operation`               |

use crate::mcp::tool_registry::ToolContext;
use code_assist_git::GitOperations;
use rmcp::model::{
    GetPromptResult, JsonObject, Prompt, PromptArgument, PromptMessage, PromptMessageContent,
    PromptMessageRole,
};
use rmcp::ErrorData as McpError;
use tracing::{debug, warn};

const CODE_ASSIST_INIT: &str = "code-assist-init";
const GIT_COMMANDS: &str = "git-commands";
const CLI_COMMANDS: &str = "cli-commands";

const DONE_HANDSHAKE: &str = "After you provide the commands and I run them, I'll reply with 'done'.";

struct PromptDefinition {
    name: &'static str,
    description: &'static str,
    arguments: &'static [(&'static str, &'static str)],
}

const PROMPTS: &[PromptDefinition] = &[
    PromptDefinition {
        name: CODE_ASSIST_INIT,
        description: "Teaches the XML diff protocol used by create_file, modify_file and rewrite_file",
        arguments: &[],
    },
    PromptDefinition {
        name: GIT_COMMANDS,
        description: "Ask for the git shell commands that perform an operation, given the current status",
        arguments: &[
            ("repo_path", "Path inside the repository"),
            ("operation", "What the git commands should accomplish"),
        ],
    },
    PromptDefinition {
        name: CLI_COMMANDS,
        description: "Ask for the shell commands that perform an operation on this system",
        arguments: &[("operation", "What the commands should accomplish")],
    },
];

/// All prompts the server offers, in a stable order
pub fn list_prompts() -> Vec<Prompt> {
    PROMPTS
        .iter()
        .map(|definition| {
            let arguments = (!definition.arguments.is_empty()).then(|| {
                definition
                    .arguments
                    .iter()
                    .map(|(name, description)| {
                        PromptArgument::new(*name)
                            .with_description(*description)
                            .with_required(true)
                    })
                    .collect()
            });
            Prompt::new(definition.name, Some(definition.description), arguments)
        })
        .collect()
}

/// Render the prompt `name` with `arguments`
pub fn get_prompt(
    name: &str,
    arguments: Option<&JsonObject>,
    context: &ToolContext,
) -> Result<GetPromptResult, McpError> {
    let definition = PROMPTS
        .iter()
        .find(|definition| definition.name == name)
        .ok_or_else(|| {
            warn!("Prompt '{}' not found", name);
            McpError::invalid_request(format!("Unknown prompt: {name}"), None)
        })?;

    let text = match definition.name {
        CODE_ASSIST_INIT => include_str!("code_assist_init.md").to_string(),
        GIT_COMMANDS => {
            let repo_path = required_argument(arguments, name, "repo_path")?;
            let operation = required_argument(arguments, name, "operation")?;
            git_commands(context, repo_path, operation)?
        }
        _ => cli_commands(required_argument(arguments, name, "operation")?),
    };

    debug!(prompt = name, length = text.len(), "Rendered prompt");
    Ok(GetPromptResult::new(vec![PromptMessage::new(
        PromptMessageRole::User,
        PromptMessageContent::Text { text },
    )])
    .with_description(definition.description))
}

fn required_argument<'a>(
    arguments: Option<&'a JsonObject>,
    prompt: &str,
    key: &str,
) -> Result<&'a str, McpError> {
    arguments
        .and_then(|arguments| arguments.get(key))
        .and_then(|value| value.as_str())
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            McpError::invalid_params(
                format!("Prompt '{prompt}' requires the '{key}' argument"),
                None,
            )
        })
}

/// `<os> <arch>` of the machine the server runs on
fn system_info() -> String {
    format!("{} {}", std::env::consts::OS, std::env::consts::ARCH)
}

fn git_commands(
    context: &ToolContext,
    repo_path: &str,
    operation: &str,
) -> Result<String, McpError> {
    let work_dir = context
        .resolve_repo_path(Some(repo_path))
        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

    let status = match GitOperations::with_work_dir(&work_dir) {
        Ok(git) => match context.ensure_repository_allowed(&git) {
            Ok(()) => git.status_report().map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        },
        Err(e) => Err(e.to_string()),
    }
    .unwrap_or_else(|e| format!("Unable to read git status: {e}"));

    Ok(format!(
        "Please help with the following git operation in {}:\n{operation}\n\n\
         Current status:\n{}\n\n\
         System info:\n{}\n\n\
         {DONE_HANDSHAKE} Then use the git tools to verify the changes.",
        work_dir.display(),
        status.trim_end(),
        system_info()
    ))
}

fn cli_commands(operation: &str) -> String {
    format!(
        "Please help with the following command:\n{operation}\n\n\
         System info:\n{}\n\n\
         {DONE_HANDSHAKE}",
        system_info()
    )
}
