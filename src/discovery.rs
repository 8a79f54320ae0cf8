use anyhow::{Context, Result, anyhow};
use globset::{GlobBuilder, GlobMatcher};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceRole {
    Primary,
    Derived,
}

#[derive(Debug, Clone)]
pub struct AnnotationSource {
    pub path: PathBuf,
    pub role: SourceRole,
}

/// Resolve a glob pattern into a sorted list of annotation sources, all
/// tagged with the given role. A pattern that matches nothing yields an
/// empty list; the pair-count check downstream reports it per locale.
pub fn discover(pattern: &str, role: SourceRole) -> Result<Vec<AnnotationSource>> {
    let matcher = GlobBuilder::new(pattern)
        .literal_separator(true)
        .backslash_escape(true)
        .build()
        .map_err(|err| anyhow!("invalid glob pattern '{}': {}", pattern, err))?
        .compile_matcher();

    let root = literal_prefix(pattern);
    let root = if root.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        root
    };

    let mut matched = Vec::new();
    match fs::metadata(&root) {
        Ok(meta) if meta.is_file() => {
            if matcher.is_match(normalize(&root)) {
                matched.push(PathBuf::from(normalize(&root)));
            }
        }
        Ok(_) => walk(&root, &matcher, &mut matched)?,
        Err(_) => {
            tracing::warn!(pattern = %pattern, "pattern root does not exist");
        }
    }

    matched.sort();
    Ok(matched
        .into_iter()
        .map(|path| AnnotationSource { path, role })
        .collect())
}

fn walk(dir: &Path, matcher: &GlobMatcher, matched: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?;
    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in: {}", dir.display()))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .with_context(|| format!("failed to stat: {}", path.display()))?;
        if file_type.is_dir() {
            walk(&path, matcher, matched)?;
        } else if matcher.is_match(normalize(&path)) {
            matched.push(PathBuf::from(normalize(&path)));
        }
    }
    Ok(())
}

/// Leading pattern components with no glob metacharacters; the walk starts
/// there instead of scanning the whole working directory.
fn literal_prefix(pattern: &str) -> PathBuf {
    let mut prefix = PathBuf::new();
    for part in pattern.split('/') {
        if part
            .chars()
            .any(|ch| matches!(ch, '*' | '?' | '[' | '{'))
        {
            break;
        }
        if part.is_empty() {
            if prefix.as_os_str().is_empty() {
                prefix.push("/");
            }
            continue;
        }
        prefix.push(part);
    }
    prefix
}

fn normalize(path: &Path) -> String {
    let text = path.to_string_lossy().replace('\\', "/");
    text.strip_prefix("./").map(str::to_string).unwrap_or(text)
}
