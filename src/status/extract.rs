//! Best-effort text-scan extraction of a world's tier.
//!
//! The Lodestone markup drifts without notice, so this deliberately avoids
//! structural selectors. The page is flattened to plain text, then scanned
//! two ways: a pass over the text surrounding each mention of the world
//! name, and a direct `"<world> <tier>"` adjacency match over the whole
//! text. The direct match runs last and wins when both find something.

use regex::Regex;

use super::{Tier, TierExtractor};

/// How far around a world-name mention the structural pass looks for a
/// tier keyword, in bytes of flattened text.
const CONTEXT_RADIUS: usize = 120;

pub struct TextScanExtractor {
    tag: Regex,
}

impl TextScanExtractor {
    pub fn new() -> Self {
        Self {
            // Static pattern, cannot fail to compile.
            tag: Regex::new(r"<[^>]*>").expect("valid tag pattern"),
        }
    }

    /// Replace markup tags with spaces so keyword adjacency survives
    /// element boundaries.
    fn flatten(&self, page: &str) -> String {
        self.tag.replace_all(page, " ").into_owned()
    }
}

impl Default for TextScanExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TierExtractor for TextScanExtractor {
    fn extract(&self, page: &str, world: &str) -> Tier {
        let text = self.flatten(page);
        let mut found = Tier::Unknown;

        // Structural pass: scan the context around each mention of the
        // world name. Later mentions overwrite earlier ones.
        for (idx, _) in text.match_indices(world) {
            let context = context_window(&text, idx, world.len());
            if context.contains("Congested") {
                found = Tier::Congested;
            } else if context.contains("Standard") {
                found = Tier::Standard;
            } else if context.contains("Preferred+") {
                found = Tier::PreferredPlus;
            } else if context.contains("Preferred") {
                found = Tier::Preferred;
            }
        }

        // Direct pass: the world name immediately followed by a tier
        // keyword anywhere in the text. Takes precedence over the
        // structural pass when it matches.
        let pattern = format!(
            r"(?i){}\s+(Congested|Standard|Preferred\+?)",
            regex::escape(world)
        );
        if let Ok(direct) = Regex::new(&pattern) {
            if let Some(caps) = direct.captures(&text) {
                let tier = Tier::from_keyword(&caps[1]);
                if tier != Tier::Unknown {
                    found = tier;
                }
            }
        }

        found
    }
}

/// Slice a window of `CONTEXT_RADIUS` bytes either side of a match,
/// clamped to char boundaries.
fn context_window(text: &str, idx: usize, len: usize) -> &str {
    let mut start = idx.saturating_sub(CONTEXT_RADIUS);
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = (idx + len + CONTEXT_RADIUS).min(text.len());
    while end < text.len() && !text.is_char_boundary(end) {
        end += 1;
    }
    &text[start..end]
}
