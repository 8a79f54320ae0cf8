use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use crate::discovery::{AnnotationSource, SourceRole};

/// Locale is the path component immediately following an `annotations` or
/// `annotationsDerived` directory (dual-source mode).
pub fn locale_from_annotations_dir(path: &Path) -> Result<String> {
    let mut components = path.components();
    while let Some(component) = components.next() {
        let text = component.as_os_str().to_string_lossy();
        if text == "annotations" || text == "annotationsDerived" {
            if let Some(locale) = components.next() {
                return Ok(component_text(locale));
            }
        }
    }
    Err(anyhow!("cannot resolve locale from path: {}", path.display()))
}

/// Locale is the first path segment (single-source mode). A bare file name
/// has no locale segment and fails the run.
pub fn locale_from_first_segment(path: &Path) -> Result<String> {
    let mut components = path
        .components()
        .filter(|component| matches!(component, Component::Normal(_)));
    let first = components
        .next()
        .ok_or_else(|| anyhow!("cannot resolve locale from path: {}", path.display()))?;
    if components.next().is_none() {
        return Err(anyhow!("path has no locale directory: {}", path.display()));
    }
    Ok(component_text(first))
}

fn component_text(component: Component<'_>) -> String {
    component.as_os_str().to_string_lossy().into_owned()
}

/// Sources of one locale, validated: exactly one primary and, in
/// dual-source mode, exactly one derived file.
#[derive(Debug, Clone)]
pub struct LocalePair {
    pub locale: String,
    pub primary: PathBuf,
    pub derived: Option<PathBuf>,
}

/// Insertion-ordered mapping from locale to its discovered sources.
#[derive(Debug, Default)]
pub struct LocaleGroups {
    order: Vec<String>,
    groups: HashMap<String, Vec<AnnotationSource>>,
}

/// One pass over the combined source list, resolving and grouping by
/// locale. Resolver failures abort the run.
pub fn group<F>(sources: Vec<AnnotationSource>, resolve: F) -> Result<LocaleGroups>
where
    F: Fn(&Path) -> Result<String>,
{
    let mut grouped = LocaleGroups::default();
    for source in sources {
        let locale = resolve(&source.path)?;
        if !grouped.groups.contains_key(&locale) {
            grouped.order.push(locale.clone());
        }
        grouped.groups.entry(locale).or_default().push(source);
    }
    Ok(grouped)
}

impl LocaleGroups {
    /// Validate each group into a pair. Wrong source counts are reported
    /// and skipped; a primary/derived ordering violation aborts the run.
    /// Returns the pairs and the number of skipped locales.
    pub fn into_pairs(mut self, dual: bool) -> Result<(Vec<LocalePair>, usize)> {
        let expected = if dual { 2 } else { 1 };
        let mut pairs = Vec::new();
        let mut skipped = 0;
        for locale in self.order {
            let sources = self.groups.remove(&locale).unwrap_or_default();
            if sources.len() != expected {
                tracing::warn!(
                    locale = %locale,
                    count = sources.len(),
                    expected,
                    "unexpected number of annotation files, skipping locale"
                );
                skipped += 1;
                continue;
            }
            if dual {
                if sources[0].role != SourceRole::Primary
                    || sources[1].role == SourceRole::Primary
                {
                    return Err(anyhow!(
                        "annotation sources out of order for locale {}",
                        locale
                    ));
                }
                pairs.push(LocalePair {
                    locale,
                    primary: sources[0].path.clone(),
                    derived: Some(sources[1].path.clone()),
                });
            } else {
                let mut sources = sources;
                pairs.push(LocalePair {
                    locale,
                    primary: sources.remove(0).path,
                    derived: None,
                });
            }
        }
        Ok((pairs, skipped))
    }
}
