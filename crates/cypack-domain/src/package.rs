//! Dependency folding for npm `package.json` manifests.

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// Sections whose entries are folded from suite manifests into the shared one.
pub const DEPENDENCY_SECTIONS: &[&str] = &["dependencies", "devDependencies"];

#[derive(Debug, Clone, PartialEq)]
pub struct PackageManifest {
    root: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyConflict {
    pub section: String,
    pub package: String,
    pub kept: String,
    pub ignored: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub added: Vec<String>,
    pub conflicts: Vec<DependencyConflict>,
}

impl MergeReport {
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.conflicts.is_empty()
    }
}

impl Default for PackageManifest {
    fn default() -> Self {
        let mut root = Map::new();
        root.insert("private".to_string(), Value::Bool(true));
        Self { root }
    }
}

impl PackageManifest {
    pub fn parse(contents: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(contents).context("package manifest is not valid JSON")?;
        match value {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(anyhow!("package manifest must be a JSON object")),
        }
    }

    pub fn render(&self) -> Result<String> {
        let mut rendered = serde_json::to_string_pretty(&Value::Object(self.root.clone()))?;
        rendered.push('\n');
        Ok(rendered)
    }

    /// Returns the version requirement declared for `package` in `section`.
    pub fn dependency(&self, section: &str, package: &str) -> Option<&str> {
        self.root
            .get(section)
            .and_then(Value::as_object)
            .and_then(|deps| deps.get(package))
            .and_then(Value::as_str)
    }

    /// Folds the dependency sections of `other` into `self`.
    ///
    /// Entries already present keep their version; differing requests are
    /// reported as conflicts. Non-string requirements in `other` are rejected.
    pub fn merge_dependencies(&mut self, other: &PackageManifest) -> Result<MergeReport> {
        let mut report = MergeReport::default();
        for section in DEPENDENCY_SECTIONS {
            let Some(incoming) = other.root.get(*section) else {
                continue;
            };
            let incoming = incoming
                .as_object()
                .ok_or_else(|| anyhow!("`{section}` must be an object"))?;
            if incoming.is_empty() {
                continue;
            }
            let target = self
                .root
                .entry((*section).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            let target = target
                .as_object_mut()
                .ok_or_else(|| anyhow!("shared manifest `{section}` must be an object"))?;
            for (package, requested) in incoming {
                let requested = requested.as_str().ok_or_else(|| {
                    anyhow!("`{section}.{package}` must be a version string")
                })?;
                match target.get(package).and_then(Value::as_str) {
                    Some(existing) if existing == requested => {}
                    Some(existing) => report.conflicts.push(DependencyConflict {
                        section: (*section).to_string(),
                        package: package.clone(),
                        kept: existing.to_string(),
                        ignored: requested.to_string(),
                    }),
                    None => {
                        target.insert(package.clone(), Value::String(requested.to_string()));
                        report.added.push(format!("{section}:{package}@{requested}"));
                    }
                }
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_adds_missing_and_keeps_existing() {
        let mut shared = PackageManifest::parse(
            r#"{"private": true, "dependencies": {"cypress-cucumber-preprocessor": "^4.0.0"}}"#,
        )
        .unwrap();
        let suite = PackageManifest::parse(
            r#"{
                "name": "suite-a",
                "dependencies": {"cypress-cucumber-preprocessor": "^2.0.0", "lodash": "^4.17.0"},
                "devDependencies": {"eslint": "8.0.0"}
            }"#,
        )
        .unwrap();

        let report = shared.merge_dependencies(&suite).unwrap();
        assert_eq!(
            report.added,
            vec![
                "dependencies:lodash@^4.17.0".to_string(),
                "devDependencies:eslint@8.0.0".to_string()
            ]
        );
        assert_eq!(report.conflicts.len(), 1);
        assert_eq!(report.conflicts[0].kept, "^4.0.0");
        assert_eq!(report.conflicts[0].ignored, "^2.0.0");
        assert_eq!(
            shared.dependency("dependencies", "cypress-cucumber-preprocessor"),
            Some("^4.0.0")
        );
        assert_eq!(shared.dependency("devDependencies", "eslint"), Some("8.0.0"));
        assert!(shared.root.get("name").is_none());
    }

    #[test]
    fn merging_twice_is_idempotent() {
        let suite =
            PackageManifest::parse(r#"{"dependencies": {"faker": "5.5.3"}}"#).unwrap();
        let mut shared = PackageManifest::default();
        shared.merge_dependencies(&suite).unwrap();
        let once = shared.render().unwrap();
        let report = shared.merge_dependencies(&suite).unwrap();
        assert!(report.is_noop());
        assert_eq!(shared.render().unwrap(), once);
    }

    #[test]
    fn rejects_non_object_manifest() {
        let err = PackageManifest::parse("[]").unwrap_err();
        assert!(err.to_string().contains("JSON object"));
    }

    #[test]
    fn rejects_non_string_requirement() {
        let suite = PackageManifest::parse(r#"{"dependencies": {"faker": 5}}"#).unwrap();
        let err = PackageManifest::default()
            .merge_dependencies(&suite)
            .unwrap_err();
        assert!(err.to_string().contains("dependencies.faker"));
    }
}
