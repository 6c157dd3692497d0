//! The tool catalog.
//!
//! Holds the ordered list of tool descriptors for a run: the built-in
//! tools plus any custom tools from config. Validated once at startup.

use super::builtin::builtin_tools;
use super::descriptor::ToolDescriptor;
use crate::config::ArsenalConfig;
use crate::error::{ArsenalError, Result};
use std::collections::HashSet;

/// Ordered, validated collection of tool descriptors.
#[derive(Debug, Clone)]
pub struct Catalog {
    tools: Vec<ToolDescriptor>,
}

impl Catalog {
    /// Build a catalog from descriptors, rejecting invalid entries.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateTool` if two entries share a name and
    /// `ConfigValidationError` for an empty name, empty command, or
    /// empty platform list.
    pub fn new(tools: Vec<ToolDescriptor>) -> Result<Self> {
        validate(&tools)?;
        Ok(Self { tools })
    }

    /// The built-in catalog.
    pub fn builtin() -> Result<Self> {
        Self::new(builtin_tools())
    }

    /// The built-in catalog merged with custom tools from config.
    ///
    /// A custom tool whose name matches a built-in one replaces it in place;
    /// other custom tools are appended in config order.
    pub fn from_config(config: &ArsenalConfig) -> Result<Self> {
        let mut tools = builtin_tools();
        let builtin_count = tools.len();

        for custom in &config.tools {
            let descriptor = custom.to_descriptor();
            match tools[..builtin_count]
                .iter()
                .position(|t| t.name == descriptor.name)
            {
                Some(index) => {
                    tracing::debug!("Custom tool '{}' overrides built-in", descriptor.name);
                    tools[index] = descriptor;
                }
                None => tools.push(descriptor),
            }
        }

        Self::new(tools)
    }

    /// All descriptors in catalog order.
    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Look up a descriptor by name.
    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.tools
            .iter()
            .map(|t| t.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }
}

fn validate(tools: &[ToolDescriptor]) -> Result<()> {
    let mut names = HashSet::new();

    for tool in tools {
        if tool.name.trim().is_empty() {
            return Err(ArsenalError::ConfigValidationError {
                message: "tool name must not be empty".to_string(),
            });
        }
        if tool.probe_command.trim().is_empty() {
            return Err(ArsenalError::ConfigValidationError {
                message: format!("tool '{}' has an empty command", tool.name),
            });
        }
        if tool.platforms.is_empty() {
            return Err(ArsenalError::ConfigValidationError {
                message: format!("tool '{}' lists no platforms", tool.name),
            });
        }
        if !names.insert(tool.name.as_str()) {
            return Err(ArsenalError::DuplicateTool {
                name: tool.name.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{InstallType, Platform};
    use crate::config::CustomTool;

    fn tool(name: &str) -> ToolDescriptor {
        ToolDescriptor {
            name: name.to_string(),
            probe_command: format!("{} --version", name),
            category: "Testing".to_string(),
            description: String::new(),
            package_name: name.to_string(),
            install_type: InstallType::Npm,
            platforms: Platform::ALL.to_vec(),
            critical: false,
            install: None,
        }
    }

    fn custom(yaml: &str) -> CustomTool {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 40);
        assert!(catalog.get("rg").is_some());
    }

    #[test]
    fn duplicate_names_rejected() {
        let result = Catalog::new(vec![tool("jq"), tool("jq")]);
        assert!(matches!(result, Err(ArsenalError::DuplicateTool { name }) if name == "jq"));
    }

    #[test]
    fn empty_platforms_rejected() {
        let mut bad = tool("jq");
        bad.platforms.clear();
        let result = Catalog::new(vec![bad]);
        assert!(matches!(result, Err(ArsenalError::ConfigValidationError { .. })));
    }

    #[test]
    fn empty_command_rejected() {
        let mut bad = tool("jq");
        bad.probe_command = "  ".to_string();
        assert!(Catalog::new(vec![bad]).is_err());
    }

    #[test]
    fn categories_in_first_seen_order() {
        let mut a = tool("a");
        a.category = "Zeta".to_string();
        let mut b = tool("b");
        b.category = "Alpha".to_string();
        let mut c = tool("c");
        c.category = "Zeta".to_string();

        let catalog = Catalog::new(vec![a, b, c]).unwrap();
        assert_eq!(catalog.categories(), vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn custom_tools_append() {
        let config = ArsenalConfig {
            tools: vec![custom("name: hyperfine\ncategory: Benchmarking\n")],
            ..Default::default()
        };

        let catalog = Catalog::from_config(&config).unwrap();
        assert_eq!(catalog.len(), 41);
        assert_eq!(catalog.tools()[40].name, "hyperfine");
    }

    #[test]
    fn custom_tool_replaces_builtin_in_place() {
        let config = ArsenalConfig {
            tools: vec![custom("name: jq\ncommand: jq -V\ncritical: true\n")],
            ..Default::default()
        };

        let catalog = Catalog::from_config(&config).unwrap();
        assert_eq!(catalog.len(), 40);
        let jq = catalog.get("jq").unwrap();
        assert_eq!(jq.probe_command, "jq -V");
        assert!(jq.critical);
    }

    #[test]
    fn duplicate_custom_tools_rejected() {
        let config = ArsenalConfig {
            tools: vec![custom("name: just\n"), custom("name: just\n")],
            ..Default::default()
        };
        assert!(Catalog::from_config(&config).is_err());
    }

    #[test]
    fn custom_tool_with_empty_platforms_rejected() {
        let config = ArsenalConfig {
            tools: vec![custom("name: just\nplatforms: []\n")],
            ..Default::default()
        };
        assert!(Catalog::from_config(&config).is_err());
    }
}
