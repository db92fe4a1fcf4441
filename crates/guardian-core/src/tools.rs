//! Tool registry: names, input schemas and dispatch.
//!
//! Transport code hands over a tool name and a JSON argument object and
//! gets back the serialized report. Nothing here knows about framing.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::ToolError;
use crate::inspector::Inspector;
use crate::{checklist, hygiene, version};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    CheckRepoHygiene,
    CheckGitHygiene,
    CheckVersionAlignment,
    CollectVersionSources,
    GenerateReleaseChecklist,
}

impl ToolName {
    pub const ALL: [ToolName; 5] = [
        ToolName::CheckRepoHygiene,
        ToolName::CheckGitHygiene,
        ToolName::CheckVersionAlignment,
        ToolName::CollectVersionSources,
        ToolName::GenerateReleaseChecklist,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolName::CheckRepoHygiene => hygiene::static_checks::TOOL,
            ToolName::CheckGitHygiene => hygiene::git_aware::TOOL,
            ToolName::CheckVersionAlignment => version::align::TOOL,
            ToolName::CollectVersionSources => version::evidence::TOOL,
            ToolName::GenerateReleaseChecklist => checklist::generate::TOOL,
        }
    }

    fn description(self) -> &'static str {
        match self {
            ToolName::CheckRepoHygiene => {
                "Run seven read-only presence checks (package definition, license, readme, \
                 bug report template, CI workflows, V1 contract, determinism notes). \
                 Fail-closed: ok is true only when every check passes."
            }
            ToolName::CheckGitHygiene => {
                "Check a git working tree: repository marker, clean tree, no untracked files, \
                 readme, license and changelog. A non-repository yields a single failing check."
            }
            ToolName::CheckVersionAlignment => {
                "Detect the version declared in pyproject.toml and compare it with an optional \
                 expected tag (one leading 'v' is ignored). fail_closed is true when no version \
                 could be detected."
            }
            ToolName::CollectVersionSources => {
                "Read every available version source (pyproject.toml, Cargo.toml, package.json, \
                 git tags). all_aligned is true only if at least one source was read and all agree."
            }
            ToolName::GenerateReleaseChecklist => {
                "Generate a deterministic release checklist stamped with the target version, \
                 annotated with locally detected signals."
            }
        }
    }

    fn input_schema(self) -> Value {
        let repo_path = json!({
            "type": "string",
            "description": "Absolute or relative path to the local repository root."
        });
        match self {
            ToolName::CheckRepoHygiene | ToolName::CheckGitHygiene => json!({
                "type": "object",
                "properties": { "repo_path": repo_path },
                "required": ["repo_path"]
            }),
            ToolName::CheckVersionAlignment | ToolName::CollectVersionSources => json!({
                "type": "object",
                "properties": {
                    "repo_path": repo_path,
                    "expected_tag": {
                        "type": ["string", "null"],
                        "description": "Release tag to validate against, e.g. \"v0.1.0\"."
                    }
                },
                "required": ["repo_path"]
            }),
            ToolName::GenerateReleaseChecklist => json!({
                "type": "object",
                "properties": {
                    "repo_path": repo_path,
                    "version": {
                        "type": "string",
                        "description": "Target release version or tag, e.g. \"v0.1.0\"."
                    }
                },
                "required": ["repo_path", "version"]
            }),
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolName::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ToolError::UnknownTool(s.to_string()))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

pub fn descriptors() -> Vec<ToolDescriptor> {
    ToolName::ALL
        .into_iter()
        .map(|t| ToolDescriptor {
            name: t.as_str(),
            description: t.description(),
            input_schema: t.input_schema(),
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct RepoArgs {
    repo_path: String,
}

#[derive(Debug, Deserialize)]
struct AlignmentArgs {
    repo_path: String,
    #[serde(default)]
    expected_tag: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChecklistArgs {
    repo_path: String,
    version: String,
}

fn parse_args<T: DeserializeOwned>(arguments: Option<&Value>) -> Result<T, ToolError> {
    let value = match arguments {
        None | Some(Value::Null) => json!({}),
        Some(v) => v.clone(),
    };
    serde_json::from_value(value).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

/// Validate `arguments` for `name` and run the tool.
pub fn call(inspector: &Inspector, name: &str, arguments: Option<&Value>) -> Result<Value, ToolError> {
    let tool: ToolName = name.parse()?;
    tracing::debug!(%tool, "tool call");

    let report = match tool {
        ToolName::CheckRepoHygiene => {
            let args: RepoArgs = parse_args(arguments)?;
            serde_json::to_value(inspector.check_repo_hygiene(&args.repo_path))?
        }
        ToolName::CheckGitHygiene => {
            let args: RepoArgs = parse_args(arguments)?;
            serde_json::to_value(inspector.check_git_hygiene(&args.repo_path))?
        }
        ToolName::CheckVersionAlignment => {
            let args: AlignmentArgs = parse_args(arguments)?;
            serde_json::to_value(
                inspector.check_version_alignment(&args.repo_path, args.expected_tag.as_deref()),
            )?
        }
        ToolName::CollectVersionSources => {
            let args: AlignmentArgs = parse_args(arguments)?;
            serde_json::to_value(
                inspector.collect_version_sources(&args.repo_path, args.expected_tag.as_deref()),
            )?
        }
        ToolName::GenerateReleaseChecklist => {
            let args: ChecklistArgs = parse_args(arguments)?;
            serde_json::to_value(
                inspector.generate_release_checklist(&args.repo_path, &args.version),
            )?
        }
    };
    Ok(report)
}
