use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Emoji key to its annotation record. Sorted map keeps the generated
/// resource files deterministic across runs.
pub type EmojiMap = BTreeMap<String, EmojiEntry>;

/// One CLDR annotation document. A primary file carries its emoji map
/// under `annotations.annotations`, a derived file under
/// `annotationsDerived.annotations`.
#[derive(Debug, Default, Deserialize)]
pub struct AnnotationFile {
    annotations: Option<AnnotationBlock>,
    #[serde(rename = "annotationsDerived")]
    annotations_derived: Option<AnnotationBlock>,
}

#[derive(Debug, Default, Deserialize)]
struct AnnotationBlock {
    annotations: Option<EmojiMap>,
}

/// Name lists may contain JSON nulls; only the first usable element of
/// each list is ever consumed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmojiEntry {
    #[serde(default)]
    pub default: Vec<Option<String>>,
    #[serde(default)]
    pub tts: Vec<Option<String>>,
}

impl EmojiEntry {
    pub fn first_default(&self) -> Option<&str> {
        first_name(&self.default)
    }

    pub fn first_tts(&self) -> Option<&str> {
        first_name(&self.tts)
    }
}

fn first_name(names: &[Option<String>]) -> Option<&str> {
    match names.first()? {
        Some(name) if !name.is_empty() => Some(name.as_str()),
        _ => None,
    }
}

impl AnnotationFile {
    pub fn into_primary(self) -> Option<EmojiMap> {
        self.annotations.and_then(|block| block.annotations)
    }

    pub fn into_derived(self) -> Option<EmojiMap> {
        self.annotations_derived.and_then(|block| block.annotations)
    }
}

pub async fn load(path: &Path) -> Result<AnnotationFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read annotation file: {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse annotation file: {}", path.display()))
}

/// Overlay primary entries on the derived base. Primary wins whole-entry
/// on key collision; fields are never merged across sources.
pub fn merge(primary: EmojiMap, derived: EmojiMap) -> EmojiMap {
    let mut merged = derived;
    merged.extend(primary);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> AnnotationFile {
        serde_json::from_str(raw).expect("parse annotation file")
    }

    #[test]
    fn parses_primary_structure() {
        let file = parse(
            r#"{"annotations":{"annotations":{"😀":{"default":["grinning face"],"tts":["grinning face"]}}}}"#,
        );
        let map = file.into_primary().expect("primary map");
        let entry = map.get("\u{1f600}").expect("entry");
        assert_eq!(entry.first_default(), Some("grinning face"));
        assert_eq!(entry.first_tts(), Some("grinning face"));
    }

    #[test]
    fn missing_substructure_is_none() {
        let file = parse(r#"{"other":{"annotations":{}}}"#);
        assert!(file.into_primary().is_none());

        let file = parse(r#"{"annotations":{"identity":{"language":"en"}}}"#);
        assert!(file.into_primary().is_none());
    }

    #[test]
    fn null_and_empty_names_are_unusable() {
        let file = parse(
            r#"{"annotations":{"annotations":{"x":{"default":[null,"later"],"tts":[""]}}}}"#,
        );
        let map = file.into_primary().expect("primary map");
        let entry = map.get("x").expect("entry");
        assert_eq!(entry.first_default(), None);
        assert_eq!(entry.first_tts(), None);
    }

    #[test]
    fn absent_name_lists_default_to_empty() {
        let file = parse(r#"{"annotations":{"annotations":{"x":{}}}}"#);
        let map = file.into_primary().expect("primary map");
        let entry = map.get("x").expect("entry");
        assert_eq!(entry.first_default(), None);
        assert_eq!(entry.first_tts(), None);
    }

    #[test]
    fn merge_prefers_primary_entries() {
        let primary_file = parse(
            r#"{"annotations":{"annotations":{"a":{"default":["primary a"]}}}}"#,
        );
        let derived_file = parse(
            r#"{"annotationsDerived":{"annotations":{"a":{"default":["derived a"],"tts":["derived tts"]},"b":{"default":["derived b"]}}}}"#,
        );
        let merged = merge(
            primary_file.into_primary().expect("primary"),
            derived_file.into_derived().expect("derived"),
        );
        // whole-entry replacement: the derived tts for "a" is gone too
        let entry = merged.get("a").expect("entry a");
        assert_eq!(entry.first_default(), Some("primary a"));
        assert_eq!(entry.first_tts(), None);
        assert_eq!(
            merged.get("b").expect("entry b").first_default(),
            Some("derived b")
        );
    }
}
