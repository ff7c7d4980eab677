use crate::extractor::PdfExtractor;
use crate::fallback::placeholder_results;
use crate::highlight::Highlighter;
use crate::loader::{load_first_available, DocumentSource};
use crate::models::{SearchOptions, SearchResult, SessionState};
use crate::ranking::rank;
use crate::snippet::{extract_snippet, SnippetConfig};
use crate::store::SectionStore;
use crate::synthesis::{AnswerSynthesizer, SynthesisOutcome, TextCompletion};
use tracing::{debug, info};

/// One rendered entry of the result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub index: usize,
    pub snippet: String,
    pub page: u32,
    pub section_index: u32,
    pub relevance: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultPage {
    NoResults,
    Results {
        cards: Vec<ResultCard>,
        /// Results left out of a collapsed page.
        hidden: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultDetail {
    pub index: usize,
    pub content: String,
    pub page: u32,
    pub section_index: u32,
}

/// Owns the loaded section store and the state of the latest search.
#[derive(Debug, Default)]
pub struct SearchEngine {
    store: Option<SectionStore>,
    session: SessionState,
    options: SearchOptions,
    highlighter: Highlighter,
}

impl SearchEngine {
    pub fn new(options: SearchOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn with_highlighter(mut self, highlighter: Highlighter) -> Self {
        self.highlighter = highlighter;
        self
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn install_store(&mut self, store: SectionStore) {
        info!(sections = store.len(), "section store installed");
        self.store = Some(store);
    }

    /// Loads the first available candidate. On failure the current store,
    /// if any, is kept.
    pub async fn load<S, E>(&mut self, source: &S, extractor: &E, candidates: &[&str]) -> bool
    where
        S: DocumentSource + Sync + ?Sized,
        E: PdfExtractor + ?Sized,
    {
        match load_first_available(source, extractor, candidates, &self.options).await {
            Some(store) => {
                self.install_store(store);
                true
            }
            None => false,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.store.is_some()
    }

    pub fn store(&self) -> Option<&SectionStore> {
        self.store.as_ref()
    }

    /// A blank query is ignored and returns `None`.
    pub fn search(&mut self, query: &str) -> Option<&[SearchResult]> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let results = match &self.store {
            Some(store) => rank(store, query, &self.options),
            None => {
                debug!("no manual loaded; using placeholder results");
                placeholder_results(query)
            }
        };
        info!(query, results = results.len(), "search complete");

        let sources = results
            .iter()
            .take(self.options.max_sources)
            .cloned()
            .collect();
        self.session = SessionState {
            query: query.to_string(),
            results,
            sources,
        };

        Some(self.session.results.as_slice())
    }

    pub fn current_query(&self) -> &str {
        &self.session.query
    }

    pub fn current_results(&self) -> &[SearchResult] {
        &self.session.results
    }

    pub fn current_sources(&self) -> &[SearchResult] {
        &self.session.sources
    }

    pub fn result_page(&self, show_all: bool) -> ResultPage {
        let results = &self.session.results;
        if results.is_empty() {
            return ResultPage::NoResults;
        }

        let shown = if show_all {
            results.len()
        } else {
            results.len().min(self.options.results_per_page)
        };
        let snippet_config = SnippetConfig::from(&self.options);

        let cards = results
            .iter()
            .take(shown)
            .enumerate()
            .map(|(index, result)| {
                let snippet = extract_snippet(&result.content, &self.session.query, snippet_config);
                ResultCard {
                    index,
                    snippet: self.highlighter.highlight(&snippet, &self.session.query),
                    page: result.page,
                    section_index: result.section_index,
                    relevance: result.relevance,
                }
            })
            .collect();

        ResultPage::Results {
            cards,
            hidden: results.len() - shown,
        }
    }

    /// Full highlighted content of one current result. Out-of-range
    /// indexes give `None`.
    pub fn result_detail(&self, index: usize) -> Option<ResultDetail> {
        let result = self.session.results.get(index)?;
        Some(ResultDetail {
            index,
            content: self
                .highlighter
                .highlight(&result.content, &self.session.query),
            page: result.page,
            section_index: result.section_index,
        })
    }

    pub fn sources_report(&self) -> Option<String> {
        if self.session.sources.is_empty() {
            return None;
        }

        Some(
            self.session
                .sources
                .iter()
                .enumerate()
                .map(|(index, source)| {
                    format!("Fonte {} (Página {}):\n{}", index + 1, source.page, source.content)
                })
                .collect::<Vec<_>>()
                .join("\n\n---\n\n"),
        )
    }

    pub async fn ask<C>(&self, synthesizer: &AnswerSynthesizer<C>) -> SynthesisOutcome
    where
        C: TextCompletion + Send + Sync,
    {
        synthesizer
            .synthesize(&self.session.query, &self.session.sources)
            .await
    }
}
