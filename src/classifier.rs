//! Import classification
//!
//! Scans component source text for `import <bindings> from '<specifier>'`
//! statements and turns each specifier into a [`ComponentDependency`].
//! Anything that does not look like such a statement is ignored.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::TierRules;
use crate::domain::{ComponentDependency, DependencyKind, Tier};

/// Bindings may span lines (`import {\n A,\n B\n} from './x'`).
static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bimport\s+([\w$*{}\s,]+?)\s+from\s+['"]([^'"\r\n]+)['"]"#)
        .expect("import pattern is valid")
});

/// Directory names that mark non-component internal modules
const KIND_DIRECTORIES: [(&str, DependencyKind); 4] = [
    ("hooks", DependencyKind::Hook),
    ("services", DependencyKind::Service),
    ("types", DependencyKind::Type),
    ("utils", DependencyKind::Util),
];

/// A matched import statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement<'s> {
    pub raw: &'s str,
    pub bindings: &'s str,
    pub specifier: &'s str,
}

/// Returns every import statement in `source`, in source order
pub fn scan_imports(source: &str) -> Vec<ImportStatement<'_>> {
    IMPORT_RE
        .captures_iter(source)
        .filter_map(|caps| {
            Some(ImportStatement {
                raw: caps.get(0)?.as_str(),
                bindings: caps.get(1)?.as_str().trim(),
                specifier: caps.get(2)?.as_str().trim(),
            })
        })
        .collect()
}

/// Returns true for bare package specifiers
pub fn is_external_specifier(specifier: &str) -> bool {
    !specifier.starts_with('.') && !specifier.starts_with('/')
}

fn split_path(path: &str) -> (Vec<&str>, Option<&str>) {
    let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let last = segments.pop();
    (segments, last)
}

/// Classifies imports and components according to a [`TierRules`] table
#[derive(Debug, Clone, Copy)]
pub struct ImportClassifier<'r> {
    rules: &'r TierRules,
}

impl<'r> ImportClassifier<'r> {
    pub fn new(rules: &'r TierRules) -> Self {
        Self { rules }
    }

    /// Derives a component name from a path: last segment, extension stripped
    pub fn component_name(&self, path: &str) -> Option<String> {
        let (_, last) = split_path(path);
        let name = self.rules.strip_extension(last?);
        if name.is_empty() || name == "." || name == ".." {
            return None;
        }
        Some(name.to_string())
    }

    /// Resolves a tier from directory segments, then keywords, then the fallback
    pub fn tier_for(&self, path: &str, name: &str) -> Tier {
        let (directories, _) = split_path(path);
        self.rules
            .directory_tier(directories.into_iter())
            .or_else(|| self.rules.keyword_tier(name))
            .unwrap_or(self.rules.fallback)
    }

    /// Extracts and classifies all imports of one component
    pub fn classify(&self, source: &str, component: &str) -> Vec<ComponentDependency> {
        let deps: Vec<_> = scan_imports(source)
            .into_iter()
            .filter_map(|stmt| {
                let dep = self.classify_specifier(stmt.specifier, stmt.raw);
                if dep.is_none() {
                    tracing::trace!(
                        component,
                        specifier = stmt.specifier,
                        "skipping irregular import"
                    );
                }
                dep
            })
            .collect();

        tracing::trace!(component, count = deps.len(), "classified imports");
        deps
    }

    /// Classifies a single specifier; `None` when no usable name can be derived
    pub fn classify_specifier(&self, specifier: &str, raw: &str) -> Option<ComponentDependency> {
        let name = self.component_name(specifier)?;

        if is_external_specifier(specifier) {
            return Some(ComponentDependency {
                kind: self.external_kind(specifier),
                name,
                path: specifier.to_string(),
                is_external: true,
                tier: Tier::Atom,
                raw_imports: vec![raw.to_string()],
            });
        }

        Some(ComponentDependency {
            kind: internal_kind(specifier),
            tier: self.tier_for(specifier, &name),
            name,
            path: specifier.to_string(),
            is_external: false,
            raw_imports: vec![raw.to_string()],
        })
    }

    fn external_kind(&self, specifier: &str) -> DependencyKind {
        if self.rules.is_ui_package(specifier) {
            DependencyKind::Component
        } else if specifier.starts_with("use") || specifier.contains("hook") {
            DependencyKind::Hook
        } else if specifier.contains("service") || specifier.contains("api") {
            DependencyKind::Service
        } else if specifier.contains("type") || specifier.contains("interface") {
            DependencyKind::Type
        } else {
            DependencyKind::Util
        }
    }
}

fn internal_kind(specifier: &str) -> DependencyKind {
    let (directories, _) = split_path(specifier);
    KIND_DIRECTORIES
        .iter()
        .find(|(dir, _)| directories.contains(dir))
        .map(|(_, kind)| *kind)
        .unwrap_or(DependencyKind::Component)
}
