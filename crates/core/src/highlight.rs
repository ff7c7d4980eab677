use crate::ranking::query_tokens;
use regex::{Captures, RegexBuilder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighter {
    pub open: String,
    pub close: String,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(r#"<span class="highlight">"#, "</span>")
    }
}

impl Highlighter {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    // tokens are applied one after another, so overlapping matches get wrapped twice
    pub fn highlight(&self, text: &str, query: &str) -> String {
        let mut marked = text.to_string();

        for token in query_tokens(query) {
            let pattern = match RegexBuilder::new(&regex::escape(&token))
                .case_insensitive(true)
                .build()
            {
                Ok(pattern) => pattern,
                Err(error) => {
                    tracing::debug!(%token, %error, "skipping token that cannot be highlighted");
                    continue;
                }
            };

            marked = pattern
                .replace_all(&marked, |found: &Captures<'_>| {
                    format!("{}{}{}", self.open, &found[0], self.close)
                })
                .into_owned();
        }

        marked
    }
}
