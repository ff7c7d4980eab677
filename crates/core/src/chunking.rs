use crate::extractor::PageText;
use crate::models::{SearchOptions, Section};

#[derive(Debug, Clone, Copy)]
pub struct ChunkingConfig {
    pub words_per_section: usize,
    pub min_page_chars: usize,
    pub min_section_chars: usize,
}

impl From<&SearchOptions> for ChunkingConfig {
    fn from(value: &SearchOptions) -> Self {
        Self {
            words_per_section: value.words_per_section,
            min_page_chars: value.min_page_chars,
            min_section_chars: value.min_section_chars,
        }
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self::from(&SearchOptions::default())
    }
}

pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits one page of normalized text into word chunks.
///
/// `section_index` is the 1-based ordinal of the chunk within the page split,
/// so dropped chunks leave gaps in the numbering.
pub fn split_into_sections(normalized: &str, page: u32, config: ChunkingConfig) -> Vec<Section> {
    let words = normalized.split(' ').collect::<Vec<_>>();
    let size = config.words_per_section.max(1);

    words
        .chunks(size)
        .enumerate()
        .filter_map(|(ordinal, words)| {
            let chunk = words.join(" ");
            if chunk.trim().chars().count() > config.min_section_chars {
                Some(Section {
                    content: chunk,
                    page,
                    section_index: ordinal as u32 + 1,
                })
            } else {
                None
            }
        })
        .collect()
}

pub fn build_sections(pages: &[PageText], config: ChunkingConfig) -> Vec<Section> {
    let mut sections = Vec::new();

    for page in pages {
        let normalized = normalize_whitespace(&page.text);
        if normalized.chars().count() <= config.min_page_chars {
            continue;
        }
        sections.extend(split_into_sections(&normalized, page.number, config));
    }

    sections
}
