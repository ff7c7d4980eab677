use crate::models::SearchOptions;
use crate::ranking::{fold_case, query_tokens};

const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy)]
pub struct SnippetConfig {
    pub max_chars: usize,
    pub context_before: usize,
    pub context_after: usize,
}

impl From<&SearchOptions> for SnippetConfig {
    fn from(value: &SearchOptions) -> Self {
        Self {
            max_chars: value.snippet_max_chars,
            context_before: value.snippet_context_before,
            context_after: value.snippet_context_after,
        }
    }
}

impl Default for SnippetConfig {
    fn default() -> Self {
        Self::from(&SearchOptions::default())
    }
}

// positions are character offsets, never byte offsets
pub fn extract_snippet(text: &str, query: &str, config: SnippetConfig) -> String {
    let tokens = query_tokens(query);
    let folded = fold_case(text);
    let chars = text.chars().collect::<Vec<_>>();

    let anchor = densest_anchor(&folded, &tokens, config);
    let start = anchor.saturating_sub(config.context_before);
    let end = start.saturating_add(config.max_chars).min(chars.len());

    let mut snippet = String::new();
    if start > 0 {
        snippet.push_str(ELLIPSIS);
    }
    snippet.extend(&chars[start.min(end)..end]);
    if end < chars.len() {
        snippet.push_str(ELLIPSIS);
    }
    snippet
}

// ties keep the earlier token of the query
fn densest_anchor(folded: &str, tokens: &[String], config: SnippetConfig) -> usize {
    let folded_chars = folded.chars().collect::<Vec<_>>();
    let mut best_position = 0;
    let mut best_density = 0;

    for token in tokens {
        let Some(byte_offset) = folded.find(token.as_str()) else {
            continue;
        };
        let position = folded[..byte_offset].chars().count();

        let lo = position.saturating_sub(config.context_before);
        let hi = position
            .saturating_add(config.context_after)
            .min(folded_chars.len());
        let window = folded_chars[lo..hi].iter().collect::<String>();
        let density = tokens
            .iter()
            .filter(|other| window.contains(other.as_str()))
            .count();

        if density > best_density {
            best_density = density;
            best_position = position;
        }
    }

    best_position
}
