/// Best-effort classification of annotation keys. CLDR files mix real emoji
/// with keycap bases and stray symbols; keys the table does not know are
/// dropped rather than guessed at.
pub trait EmojiClassifier {
    fn is_emoji_sequence(&self, key: &str) -> bool;
}

/// Classifier backed by the bundled Unicode emoji table of the `emojis`
/// crate (exact sequence lookup, flags and ZWJ sequences included).
#[derive(Debug, Default, Clone, Copy)]
pub struct UnicodeTable;

impl EmojiClassifier for UnicodeTable {
    fn is_emoji_sequence(&self, key: &str) -> bool {
        if emojis::get(key).is_some() {
            return true;
        }
        // CLDR keys often omit the U+FE0F presentation selector.
        emojis::get(&format!("{}\u{fe0f}", key)).is_some()
    }
}

/// Hyphen-joined lowercase hex code points of the key, in key order.
/// Stable and filesystem/resource-key safe even for multi-scalar sequences.
pub fn codepoint_id(key: &str) -> String {
    key.chars()
        .map(|ch| format!("{:x}", ch as u32))
        .collect::<Vec<_>>()
        .join("-")
}
