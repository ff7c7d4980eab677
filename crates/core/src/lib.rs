pub mod chunking;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod fallback;
pub mod gemini;
pub mod highlight;
pub mod loader;
pub mod models;
pub mod ranking;
pub mod snippet;
pub mod store;
pub mod synthesis;

pub use chunking::{build_sections, normalize_whitespace, split_into_sections, ChunkingConfig};
pub use engine::{ResultCard, ResultDetail, ResultPage, SearchEngine};
pub use error::{LoadError, SynthesisError};
pub use extractor::{LopdfExtractor, PageText, PdfExtractor};
pub use fallback::placeholder_results;
pub use gemini::{GeminiClient, GeminiConfig};
pub use highlight::Highlighter;
pub use loader::{
    index_document, load_first_available, DocumentSource, FsDocumentSource, DEFAULT_CANDIDATES,
};
pub use models::{
    LoadedDocument, RelevanceWeights, SearchOptions, SearchResult, Section, SessionState,
};
pub use ranking::{query_tokens, rank, score_section};
pub use snippet::{extract_snippet, SnippetConfig};
pub use store::SectionStore;
pub use synthesis::{
    build_prompt, format_answer_html, AnswerSynthesizer, GenerationConfig, SkipReason,
    SynthesisOutcome, TextCompletion,
};
