//! Resolver configuration
//!
//! The classification heuristics (directory conventions, keyword table,
//! UI package list) and the phase timing table are plain data so they can
//! be replaced or extended without touching the traversal code. A config
//! can be written in TOML, YAML or JSON:
//!
//! ```toml
//! high_complexity_threshold = 5
//!
//! [phase_minutes]
//! atom = 5
//! page = 60
//!
//! [rules]
//! fallback = "molecule"
//!
//! [[rules.keywords]]
//! tier = "atom"
//! keywords = ["Button", "Input"]
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Tier;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Unsupported configuration format: {0} (expected toml, yaml, yml or json)")]
    UnsupportedFormat(String),
}

/// Maps a directory name to a tier (e.g. `atoms/` -> atom)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryRule {
    pub tier: Tier,
    pub directory: String,
}

/// Name fragments that imply a tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub tier: Tier,
    pub keywords: Vec<String>,
}

/// Ordered rule set used to classify imports and components
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierRules {
    /// Tier used when neither directories nor keywords match
    pub fallback: Tier,

    /// Bare specifiers that count as UI components (`react`, `@mui/material`, ...)
    pub ui_packages: Vec<String>,

    /// Source extensions stripped from the last path segment
    pub extensions: Vec<String>,

    /// Checked first; any directory segment of the path may match
    pub directories: Vec<DirectoryRule>,

    /// Checked in table order against the component name
    pub keywords: Vec<KeywordRule>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for TierRules {
    fn default() -> Self {
        Self {
            directories: Tier::ALL
                .iter()
                .map(|tier| DirectoryRule {
                    tier: *tier,
                    directory: tier.plural().to_string(),
                })
                .collect(),
            keywords: vec![
                KeywordRule {
                    tier: Tier::Atom,
                    keywords: strings(&[
                        "Button", "Input", "Label", "Icon", "Badge", "Avatar", "Spinner",
                    ]),
                },
                KeywordRule {
                    tier: Tier::Molecule,
                    keywords: strings(&["Card", "Form", "Modal", "Dropdown", "Tooltip", "Alert"]),
                },
                KeywordRule {
                    tier: Tier::Organism,
                    keywords: strings(&[
                        "Header",
                        "Footer",
                        "Sidebar",
                        "Navigation",
                        "Table",
                        "List",
                    ]),
                },
                KeywordRule {
                    tier: Tier::Template,
                    keywords: strings(&["Layout", "Page", "Template", "Container"]),
                },
                KeywordRule {
                    tier: Tier::Page,
                    keywords: strings(&["Dashboard", "Profile", "Settings", "Home"]),
                },
            ],
            fallback: Tier::Molecule,
            ui_packages: strings(&[
                "react",
                "react-dom",
                "react-native",
                "next",
                "vue",
                "svelte",
                "solid-js",
                "preact",
                "@angular/core",
                "@mui/material",
                "@chakra-ui/react",
                "@headlessui/react",
                "@radix-ui",
                "antd",
                "styled-components",
                "@emotion/styled",
                "framer-motion",
                "lucide-react",
            ]),
            extensions: strings(&[".tsx", ".ts", ".jsx", ".js"]),
        }
    }
}

impl TierRules {
    /// Returns the tier of the first directory segment with a matching rule
    pub fn directory_tier<'a>(&self, mut segments: impl Iterator<Item = &'a str>) -> Option<Tier> {
        segments.find_map(|segment| {
            self.directories
                .iter()
                .find(|rule| rule.directory == segment)
                .map(|rule| rule.tier)
        })
    }

    /// Returns the tier of the first keyword contained in `name`
    pub fn keyword_tier(&self, name: &str) -> Option<Tier> {
        self.keywords
            .iter()
            .find(|rule| rule.keywords.iter().any(|kw| name.contains(kw.as_str())))
            .map(|rule| rule.tier)
    }

    /// Returns true if the bare specifier names a UI or framework package
    pub fn is_ui_package(&self, specifier: &str) -> bool {
        self.ui_packages.iter().any(|pkg| {
            specifier == pkg.as_str()
                || specifier
                    .strip_prefix(pkg.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    /// Strips a known source extension from a file name
    pub fn strip_extension<'a>(&self, file_name: &'a str) -> &'a str {
        self.extensions
            .iter()
            .find_map(|ext| file_name.strip_suffix(ext.as_str()))
            .unwrap_or(file_name)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for rule in &self.keywords {
            if !seen.insert(rule.tier) {
                return Err(ConfigError::Invalid(format!(
                    "keyword table lists tier '{}' more than once",
                    rule.tier
                )));
            }
            if rule.keywords.iter().any(|kw| kw.trim().is_empty()) {
                return Err(ConfigError::Invalid(format!(
                    "empty keyword for tier '{}'",
                    rule.tier
                )));
            }
        }

        if let Some(rule) = self.directories.iter().find(|r| r.directory.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "empty directory name for tier '{}'",
                rule.tier
            )));
        }

        Ok(())
    }
}

/// Estimated effort per component, in minutes, for each tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseMinutes {
    pub atom: u32,
    pub molecule: u32,
    pub organism: u32,
    pub template: u32,
    pub page: u32,
}

impl Default for PhaseMinutes {
    fn default() -> Self {
        Self {
            atom: 5,
            molecule: 15,
            organism: 30,
            template: 45,
            page: 60,
        }
    }
}

impl PhaseMinutes {
    pub fn for_tier(&self, tier: Tier) -> u32 {
        match tier {
            Tier::Atom => self.atom,
            Tier::Molecule => self.molecule,
            Tier::Organism => self.organism,
            Tier::Template => self.template,
            Tier::Page => self.page,
        }
    }
}

/// Complete resolver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Components with more internal dependencies than this are flagged
    pub high_complexity_threshold: usize,

    pub phase_minutes: PhaseMinutes,

    pub rules: TierRules,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            rules: TierRules::default(),
            phase_minutes: PhaseMinutes::default(),
            high_complexity_threshold: 5,
        }
    }
}

impl ResolverConfig {
    /// Checks the rule set and timing table for unusable entries
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rules.validate()?;

        if let Some(tier) = Tier::ALL
            .iter()
            .find(|tier| self.phase_minutes.for_tier(**tier) == 0)
        {
            return Err(ConfigError::Invalid(format!(
                "phase minutes for tier '{}' must be greater than zero",
                tier
            )));
        }

        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file, choosing the format from its extension
    pub fn load(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read resolver config: {}", path.display()))?;

        let config = match extension.as_str() {
            "toml" => Self::from_toml_str(&content),
            "yaml" | "yml" => Self::from_yaml_str(&content),
            "json" => Self::from_json_str(&content),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        };

        config.with_context(|| format!("Failed to load resolver config: {}", path.display()))
    }

    /// Serializes the configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize resolver config")
    }
}
