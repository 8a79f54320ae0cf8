use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::annotations::EmojiMap;
use crate::emoji::{self, EmojiClassifier};

pub const OUTPUT_FILE_NAME: &str = "cosmic_applet_emoji_selector.ftl";

/// Translation category of a resource line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    Default,
    Tts,
}

impl Term {
    pub fn as_str(self) -> &'static str {
        match self {
            Term::Default => "default",
            Term::Tts => "tts",
        }
    }
}

/// Render the resource buffer for one locale. Keys the classifier does
/// not recognize produce no lines; a term with no usable name is skipped.
pub fn render(emojis: &EmojiMap, classifier: &dyn EmojiClassifier) -> String {
    let mut buffer = String::new();
    for (key, entry) in emojis {
        if !classifier.is_emoji_sequence(key) {
            continue;
        }
        let id = emoji::codepoint_id(key);
        push_line(&mut buffer, Term::Default, &id, entry.first_default(), key);
        push_line(&mut buffer, Term::Tts, &id, entry.first_tts(), key);
    }
    buffer
}

fn push_line(buffer: &mut String, term: Term, id: &str, name: Option<&str>, key: &str) {
    let Some(name) = name else {
        tracing::debug!(emoji = %key, term = term.as_str(), "no usable name, skipping term");
        return;
    };
    buffer.push_str(term.as_str());
    buffer.push('-');
    buffer.push_str(id);
    buffer.push_str(" = ");
    buffer.push_str(name);
    buffer.push('\n');
}

/// Write the buffer to `<out_dir>/<locale>/cosmic_applet_emoji_selector.ftl`,
/// creating the directory as needed and overwriting any previous file.
pub async fn write_locale_file(out_dir: &Path, locale: &str, content: &str) -> Result<PathBuf> {
    let dir = out_dir.join(locale);
    tokio::fs::create_dir_all(&dir)
        .await
        .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
    let path = dir.join(OUTPUT_FILE_NAME);
    tokio::fs::write(&path, content)
        .await
        .with_context(|| format!("failed to write translation file: {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::EmojiEntry;
    use tempfile::tempdir;

    struct AcceptAll;

    impl EmojiClassifier for AcceptAll {
        fn is_emoji_sequence(&self, _key: &str) -> bool {
            true
        }
    }

    struct RejectAll;

    impl EmojiClassifier for RejectAll {
        fn is_emoji_sequence(&self, _key: &str) -> bool {
            false
        }
    }

    fn entry(default: &[&str], tts: &[&str]) -> EmojiEntry {
        EmojiEntry {
            default: default.iter().map(|name| Some(name.to_string())).collect(),
            tts: tts.iter().map(|name| Some(name.to_string())).collect(),
        }
    }

    #[test]
    fn renders_both_terms() {
        let mut emojis = EmojiMap::new();
        emojis.insert(
            "\u{1f600}".to_string(),
            entry(&["grinning face"], &["grinning face"]),
        );
        let buffer = render(&emojis, &AcceptAll);
        assert_eq!(
            buffer,
            "default-1f600 = grinning face\ntts-1f600 = grinning face\n"
        );
    }

    #[test]
    fn missing_default_emits_only_tts() {
        let mut emojis = EmojiMap::new();
        emojis.insert(
            "\u{1f600}".to_string(),
            EmojiEntry {
                default: vec![None],
                tts: vec![Some("x".to_string())],
            },
        );
        let buffer = render(&emojis, &AcceptAll);
        assert_eq!(buffer, "tts-1f600 = x\n");
    }

    #[test]
    fn rejected_keys_produce_no_lines() {
        let mut emojis = EmojiMap::new();
        emojis.insert(
            "\u{1f600}".to_string(),
            entry(&["grinning face"], &["grinning face"]),
        );
        assert!(render(&emojis, &RejectAll).is_empty());
    }

    #[test]
    fn only_first_name_is_used() {
        let mut emojis = EmojiMap::new();
        emojis.insert("\u{1f600}".to_string(), entry(&["first", "second"], &[]));
        assert_eq!(render(&emojis, &AcceptAll), "default-1f600 = first\n");
    }

    #[tokio::test]
    async fn writes_and_overwrites_locale_file() {
        let dir = tempdir().expect("tempdir");
        let path = write_locale_file(dir.path(), "en", "default-1f600 = a\n")
            .await
            .expect("write");
        assert_eq!(path, dir.path().join("en").join(OUTPUT_FILE_NAME));
        let content = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(content, "default-1f600 = a\n");

        // second write replaces the content, directory creation is idempotent
        write_locale_file(dir.path(), "en", "default-1f600 = b\n")
            .await
            .expect("rewrite");
        let content = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(content, "default-1f600 = b\n");
    }
}
