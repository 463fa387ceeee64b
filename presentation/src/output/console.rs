//! Console output for the `tools` and `call` commands

use civic_domain::tool::{
    entities::{ToolDefinition, ToolSpec},
    provider::ServerInfo,
    value_objects::ToolResult,
};
use colored::Colorize;

/// Formats tool listings and call results for terminal display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format every tool of a spec, in registration order
    pub fn format_tools(server: &ServerInfo, spec: &ToolSpec) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!("{} {}", server.name, server.version)));
        output.push('\n');

        if spec.is_empty() {
            output.push_str(&format!(
                "{}\n",
                "No tools available. Check the adapter configuration (--show-config).".yellow()
            ));
            return output;
        }

        for tool in spec.all() {
            output.push_str(&Self::format_tool(tool));
        }

        output.push_str(&format!(
            "\n{} {}\n",
            "Tools:".cyan().bold(),
            spec.len()
        ));
        output
    }

    fn format_tool(tool: &ToolDefinition) -> String {
        let mut output = format!("\n{}\n  {}\n", tool.name.yellow().bold(), tool.description);

        for param in &tool.parameters {
            let required = if param.required { ", required" } else { "" };
            output.push_str(&format!(
                "    {} ({}{})  {}\n",
                param.name.green(),
                param.param_type,
                required,
                param.description
            ));
        }
        output
    }

    /// The text payload printed on stdout for `call`
    pub fn format_result(result: &ToolResult) -> String {
        match result.error() {
            Some(error) => format!("{} {}", "Error:".red().bold(), error.message),
            None => result.text(),
        }
    }

    /// One-line summary of a call, for stderr
    pub fn format_summary(result: &ToolResult) -> String {
        let mut details = Vec::new();
        if let Some(count) = result.metadata.match_count {
            details.push(format!("{} matches", count));
        }
        if let Some(ms) = result.metadata.duration_ms {
            details.push(format!("{} ms", ms));
        }
        let details = if details.is_empty() {
            String::new()
        } else {
            format!(" ({})", details.join(", "))
        };

        match result.error() {
            Some(error) => format!(
                "{} {} [{}]{}",
                "✗".red().bold(),
                result.tool_name,
                error.code,
                details
            ),
            None => format!("{} {}{}", "✓".green().bold(), result.tool_name, details),
        }
    }

    fn header(title: &str) -> String {
        let line = "═".repeat(title.chars().count() + 4);
        format!(
            "{}\n{}\n{}\n",
            line.cyan(),
            format!("  {}  ", title).cyan().bold(),
            line.cyan()
        )
    }
}
