use crate::error::SynthesisError;
use crate::models::{SearchOptions, SearchResult};
use async_trait::async_trait;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 2000,
        }
    }
}

/// A remote text-completion service.
#[async_trait]
pub trait TextCompletion {
    /// Whether a usable credential is present. Checked before every call.
    fn is_configured(&self) -> bool {
        true
    }

    async fn complete(
        &self,
        prompt: &str,
        config: GenerationConfig,
    ) -> Result<String, SynthesisError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotConfigured,
    NoSources,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisOutcome {
    Answered(String),
    Failed(String),
    Skipped(SkipReason),
}

pub fn build_context(sources: &[SearchResult]) -> String {
    sources
        .iter()
        .enumerate()
        .map(|(index, source)| {
            format!("[Fonte {} - Página {}]\n{}", index + 1, source.page, source.content)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn build_prompt(query: &str, sources: &[SearchResult]) -> String {
    format!(
        "Você é um assistente especializado em analisar documentos e responder perguntas com base em informações fornecidas.

CONTEXTO DO MANUAL (extraído de PDF):
{context}

PERGUNTA DO USUÁRIO: {query}

Analise o contexto fornecido e responda à pergunta do usuário de forma clara, objetiva e em português.

Diretrizes:
1. Baseie a resposta EXCLUSIVAMENTE nas informações do contexto fornecido
2. Se a informação não estiver no contexto, diga claramente que não a encontrou
3. Cite as páginas relevantes quando possível (ex: \"Conforme a página 3...\")
4. Organize a resposta de forma estruturada e fácil de ler
5. Seja conciso mas completo
6. Use linguagem profissional mas acessível",
        context = build_context(sources),
    )
}

/// Turns the plain-text answer into paragraphs, line breaks and bold runs.
pub fn format_answer_html(text: &str) -> String {
    let body = text.replace("\n\n", "</p><p>").replace('\n', "<br>");
    let pieces = body.split("**").collect::<Vec<_>>();

    let mut formatted = String::from("<p>");
    for (index, piece) in pieces.iter().enumerate() {
        if index % 2 == 1 {
            if index + 1 < pieces.len() {
                formatted.push_str("<strong>");
                formatted.push_str(piece);
                formatted.push_str("</strong>");
                continue;
            }
            // unpaired marker
            formatted.push_str("**");
        }
        formatted.push_str(piece);
    }
    formatted.push_str("</p>");
    formatted
}

/// Forwards the top-ranked results and the query to a completion service.
pub struct AnswerSynthesizer<C> {
    client: C,
    generation: GenerationConfig,
    max_sources: usize,
}

impl<C> AnswerSynthesizer<C>
where
    C: TextCompletion + Send + Sync,
{
    pub fn new(client: C, options: &SearchOptions) -> Self {
        Self {
            client,
            generation: GenerationConfig::default(),
            max_sources: options.max_sources,
        }
    }

    pub fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Only the first `max_sources` results, in ranked order, are sent as sources.
    pub async fn synthesize(&self, query: &str, results: &[SearchResult]) -> SynthesisOutcome {
        if results.is_empty() {
            return SynthesisOutcome::Skipped(SkipReason::NoSources);
        }

        if !self.client.is_configured() {
            warn!("completion service credential not configured; answer synthesis disabled");
            return SynthesisOutcome::Skipped(SkipReason::NotConfigured);
        }

        let sources = &results[..results.len().min(self.max_sources)];
        let prompt = build_prompt(query, sources);
        info!(sources = sources.len(), "requesting answer synthesis");

        match self.client.complete(&prompt, self.generation).await {
            Ok(text) => SynthesisOutcome::Answered(text),
            Err(failure) => {
                error!(error = %failure, "answer synthesis failed");
                SynthesisOutcome::Failed(failure.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingCompletion {
        configured: bool,
        reply: Result<String, String>,
        prompts: Mutex<Vec<String>>,
    }

    impl RecordingCompletion {
        fn answering(text: &str) -> Self {
            Self {
                configured: true,
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                configured: true,
                reply: Err(message.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn recorded(&self) -> Vec<String> {
            self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl TextCompletion for RecordingCompletion {
        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn complete(
            &self,
            prompt: &str,
            _config: GenerationConfig,
        ) -> Result<String, SynthesisError> {
            if let Ok(mut prompts) = self.prompts.lock() {
                prompts.push(prompt.to_string());
            }
            self.reply.clone().map_err(SynthesisError::Remote)
        }
    }

    fn result(page: u32, content: &str) -> SearchResult {
        SearchResult {
            content: content.to_string(),
            page,
            section_index: 1,
            relevance: 10,
        }
    }

    #[test]
    fn context_tags_each_source_with_its_page() {
        let context = build_context(&[result(3, "Férias"), result(8, "Licença")]);
        assert_eq!(context, "[Fonte 1 - Página 3]\nFérias\n\n[Fonte 2 - Página 8]\nLicença");
    }

    #[test]
    fn answer_formatting_handles_paragraphs_and_bold() {
        assert_eq!(
            format_answer_html("**Prazo**: 30 dias\nAssinado\n\nFim"),
            "<p><strong>Prazo</strong>: 30 dias<br>Assinado</p><p>Fim</p>"
        );
        assert_eq!(format_answer_html("a ** b"), "<p>a ** b</p>");
    }

    #[tokio::test]
    async fn only_top_five_sources_are_forwarded_in_order() {
        let results = (1..=8)
            .map(|page| result(page, &format!("conteúdo {page}")))
            .collect::<Vec<_>>();
        let synthesizer =
            AnswerSynthesizer::new(RecordingCompletion::answering("ok"), &SearchOptions::default());

        let outcome = synthesizer.synthesize("férias", &results).await;

        assert_eq!(outcome, SynthesisOutcome::Answered("ok".to_string()));
        let prompts = synthesizer.client().recorded();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("[Fonte 5 - Página 5]"));
        assert!(!prompts[0].contains("Página 6]"));
        assert!(prompts[0].contains("PERGUNTA DO USUÁRIO: férias"));
        let first = prompts[0].find("[Fonte 1 - Página 1]");
        let second = prompts[0].find("[Fonte 2 - Página 2]");
        assert!(first < second);
    }

    #[tokio::test]
    async fn source_cap_follows_search_options() {
        let results = (1..=4)
            .map(|page| result(page, &format!("conteúdo {page}")))
            .collect::<Vec<_>>();
        let options = SearchOptions {
            max_sources: 2,
            ..SearchOptions::default()
        };
        let synthesizer = AnswerSynthesizer::new(RecordingCompletion::answering("ok"), &options);

        synthesizer.synthesize("férias", &results).await;

        let prompts = synthesizer.client().recorded();
        assert!(prompts[0].contains("[Fonte 2 - Página 2]"));
        assert!(!prompts[0].contains("Página 3]"));
    }

    #[tokio::test]
    async fn missing_credential_skips_the_call() {
        let mut client = RecordingCompletion::answering("never");
        client.configured = false;
        let synthesizer = AnswerSynthesizer::new(client, &SearchOptions::default());

        let outcome = synthesizer.synthesize("férias", &[result(1, "x")]).await;

        assert_eq!(outcome, SynthesisOutcome::Skipped(SkipReason::NotConfigured));
        assert!(synthesizer.client().recorded().is_empty());
    }

    #[tokio::test]
    async fn remote_failure_is_reported_as_message() {
        let synthesizer = AnswerSynthesizer::new(
            RecordingCompletion::failing("quota exceeded"),
            &SearchOptions::default(),
        );

        let outcome = synthesizer.synthesize("férias", &[result(1, "x")]).await;

        assert_eq!(outcome, SynthesisOutcome::Failed("quota exceeded".to_string()));
    }

    #[tokio::test]
    async fn no_results_means_no_call() {
        let synthesizer = AnswerSynthesizer::new(
            RecordingCompletion::answering("never"),
            &SearchOptions::default(),
        );
        let outcome = synthesizer.synthesize("férias", &[]).await;

        assert_eq!(outcome, SynthesisOutcome::Skipped(SkipReason::NoSources));
        assert!(synthesizer.client().recorded().is_empty());
    }
}
