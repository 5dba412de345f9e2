//! Source configuration: which sheets to fetch and what they measure.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One remote source: the opaque sheet key and the semantic variable name
/// its value column takes after the wide-to-long reshape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSpec {
    pub key: String,
    pub variable: String,
}

/// Ordered list of remote sources.
///
/// Stored as a JSON array so the file order is the merge fold order:
/// ```json
/// [
///   { "key": "1LBC-cells-sheet", "variable": "cellphones" },
///   { "key": "1LBC-tv-sheet", "variable": "tvs" }
/// ]
/// ```
#[derive(Debug, Clone, Default)]
pub struct SourceConfig {
    sources: Vec<SourceSpec>,
}

impl SourceConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading source config {path}"))?;
        let sources: Vec<SourceSpec> =
            serde_json::from_str(&content).with_context(|| format!("parsing source config {path}"))?;
        Ok(Self { sources })
    }

    pub fn specs(&self) -> &[SourceSpec] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn test_load_preserves_order() {
        let path = env::temp_dir().join("trend_rater_sources.json");
        fs::write(
            &path,
            r#"[
                { "key": "sheet-b", "variable": "tvs" },
                { "key": "sheet-a", "variable": "cellphones" }
            ]"#,
        )
        .unwrap();

        let config = SourceConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.len(), 2);
        assert_eq!(config.specs()[0].key, "sheet-b");
        assert_eq!(config.specs()[1].variable, "cellphones");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let path = env::temp_dir().join("trend_rater_sources_bad.json");
        fs::write(&path, r#"{ "sheet-a": "cellphones" }"#).unwrap();

        assert!(SourceConfig::load(path.to_str().unwrap()).is_err());

        fs::remove_file(&path).unwrap();
    }
}
