use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A fixed-size word chunk of one page, the unit of indexing and retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub content: String,
    pub page: u32,
    #[serde(rename = "section")]
    pub section_index: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub content: String,
    pub page: u32,
    #[serde(rename = "section")]
    pub section_index: u32,
    pub relevance: u32,
}

impl SearchResult {
    pub fn from_section(section: &Section, relevance: u32) -> Self {
        Self {
            content: section.content.clone(),
            page: section.page,
            section_index: section.section_index,
            relevance,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadedDocument {
    pub name: String,
    pub page_count: u32,
    pub section_count: usize,
    pub checksum: String,
    pub loaded_at: DateTime<Utc>,
}

/// Scoring weights of the keyword ranker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelevanceWeights {
    pub exact_match: u32,
    pub per_occurrence: u32,
    pub all_terms_present: u32,
}

impl Default for RelevanceWeights {
    fn default() -> Self {
        Self {
            exact_match: 20,
            per_occurrence: 3,
            all_terms_present: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub words_per_section: usize,
    pub min_page_chars: usize,
    pub min_section_chars: usize,
    pub max_results: usize,
    pub max_sources: usize,
    pub results_per_page: usize,
    pub snippet_max_chars: usize,
    pub snippet_context_before: usize,
    pub snippet_context_after: usize,
    pub weights: RelevanceWeights,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            words_per_section: 200,
            min_page_chars: 20,
            min_section_chars: 50,
            max_results: 15,
            max_sources: 5,
            results_per_page: 5,
            snippet_max_chars: 300,
            snippet_context_before: 50,
            snippet_context_after: 150,
            weights: RelevanceWeights::default(),
        }
    }
}

/// Most recent query, its ranked results and the sources forwarded for synthesis.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub sources: Vec<SearchResult>,
}
