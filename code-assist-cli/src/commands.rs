//! Subcommand implementations

use crate::cli::ConfigArgs;
use anyhow::Context;
use code_assist_common::Pretty;
use code_assist_config::{CodeAssistConfig, ConfigOverrides, ConfigProvider};
use code_assist_tools::mcp::{register_all_tools, run_stdio_server, McpServer, ToolRegistry};
use std::io::Write;

/// Apply `--working-dir`, then load the layered configuration with the command line on top
pub fn load_config(args: &ConfigArgs) -> anyhow::Result<CodeAssistConfig> {
    if let Some(dir) = &args.working_dir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("Failed to change to working directory {}", dir.display()))?;
    }

    let overrides = ConfigOverrides {
        allowed_roots: args.allowed_roots.clone(),
        log_file: args.log_file.clone(),
    };
    ConfigProvider::new()
        .load_with_overrides(&overrides)
        .context("Failed to load configuration")
}

/// Run the MCP server on stdio until the client disconnects
pub async fn serve(config: CodeAssistConfig) -> anyhow::Result<()> {
    tracing::debug!("Effective configuration: {}", Pretty(&config));
    let server = McpServer::new(config).context("Failed to start MCP server")?;
    run_stdio_server(server).await?;
    Ok(())
}

/// Print the effective configuration as YAML
pub fn print_config(config: &CodeAssistConfig, out: &mut impl Write) -> anyhow::Result<()> {
    let yaml = serde_yaml_ng::to_string(config).context("Failed to render configuration")?;
    out.write_all(yaml.as_bytes())?;
    Ok(())
}

/// Print each tool name with the first line of its description
pub fn print_tools(out: &mut impl Write) -> anyhow::Result<()> {
    let mut registry = ToolRegistry::new();
    register_all_tools(&mut registry);

    for name in registry.list_tool_names() {
        let summary = registry
            .get_tool(&name)
            .and_then(|tool| tool.description().lines().next())
            .unwrap_or_default();
        writeln!(out, "{name:<22}{summary}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_tools_lists_every_tool() {
        let mut out = Vec::new();
        print_tools(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().count(), 14);
        assert!(text
            .lines()
            .any(|line| line.starts_with("modify_file") && line.len() > "modify_file".len()));
    }

    #[test]
    fn test_print_config_is_yaml() {
        let mut out = Vec::new();
        print_config(&CodeAssistConfig::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("trash_dir_name:"));
        assert!(text.contains(".mcp_server_code_assist_trash"));
        assert!(text.contains("internet:"));
    }
}
