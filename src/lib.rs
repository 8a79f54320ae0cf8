use anyhow::Result;
use futures_util::future;
use std::path::PathBuf;

pub mod annotations;
pub mod discovery;
pub mod emoji;
pub mod locale;
pub mod logging;
pub mod translations;

pub use discovery::{AnnotationSource, SourceRole};
pub use emoji::{EmojiClassifier, UnicodeTable};

use annotations::EmojiMap;
use locale::LocalePair;

#[derive(Debug, Clone)]
pub struct Config {
    /// Glob pattern for the authoritative annotation tree.
    pub primary_pattern: String,
    /// Glob pattern for the derived (fallback) annotation tree; absent in
    /// single-source mode.
    pub derived_pattern: Option<String>,
    pub out_dir: PathBuf,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub locales_written: usize,
    pub locales_skipped: usize,
    pub lines_emitted: usize,
}

pub async fn run(config: Config) -> Result<Summary> {
    run_with_classifier(config, &UnicodeTable).await
}

/// Full pipeline with an injected emoji classifier: discover sources,
/// group and pair them by locale, load and merge the annotation maps,
/// render and emit one resource file per locale.
pub async fn run_with_classifier(
    config: Config,
    classifier: &dyn EmojiClassifier,
) -> Result<Summary> {
    let dual = config.derived_pattern.is_some();

    let mut sources = discovery::discover(&config.primary_pattern, SourceRole::Primary)?;
    if let Some(pattern) = config.derived_pattern.as_deref() {
        sources.extend(discovery::discover(pattern, SourceRole::Derived)?);
    }

    let groups = if dual {
        locale::group(sources, locale::locale_from_annotations_dir)?
    } else {
        locale::group(sources, locale::locale_from_first_segment)?
    };
    let (pairs, skipped) = groups.into_pairs(dual)?;

    let mut summary = Summary {
        locales_skipped: skipped,
        ..Summary::default()
    };
    for pair in pairs {
        let Some(emojis) = load_merged(&pair).await? else {
            summary.locales_skipped += 1;
            continue;
        };
        let buffer = translations::render(&emojis, classifier);
        if buffer.is_empty() {
            tracing::debug!(locale = %pair.locale, "no translation lines, nothing to write");
            continue;
        }
        let path = translations::write_locale_file(&config.out_dir, &pair.locale, &buffer).await?;
        tracing::debug!(locale = %pair.locale, path = %path.display(), "wrote translation file");
        summary.lines_emitted += buffer.lines().count();
        summary.locales_written += 1;
    }
    Ok(summary)
}

/// Load one locale's sources and merge them, primary over derived. A file
/// lacking its required emoji map skips the locale (None), not the run.
async fn load_merged(pair: &LocalePair) -> Result<Option<EmojiMap>> {
    match pair.derived.as_deref() {
        Some(derived_path) => {
            let (primary_file, derived_file) = future::try_join(
                annotations::load(&pair.primary),
                annotations::load(derived_path),
            )
            .await?;
            let (Some(primary), Some(derived)) =
                (primary_file.into_primary(), derived_file.into_derived())
            else {
                tracing::warn!(
                    locale = %pair.locale,
                    primary = %pair.primary.display(),
                    derived = %derived_path.display(),
                    "annotation files did not contain required emojis, skipping locale"
                );
                return Ok(None);
            };
            Ok(Some(annotations::merge(primary, derived)))
        }
        None => {
            let file = annotations::load(&pair.primary).await?;
            match file.into_primary() {
                Some(map) => Ok(Some(map)),
                None => {
                    tracing::warn!(
                        locale = %pair.locale,
                        path = %pair.primary.display(),
                        "annotation file did not contain required emojis, skipping locale"
                    );
                    Ok(None)
                }
            }
        }
    }
}
