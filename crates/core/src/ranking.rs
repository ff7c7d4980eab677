use crate::models::{RelevanceWeights, SearchOptions, SearchResult};
use crate::store::SectionStore;

// one char in, one char out: offsets stay aligned with the input
pub fn fold_case(text: &str) -> String {
    text.chars()
        .map(|ch| ch.to_lowercase().next().unwrap_or(ch))
        .collect()
}

pub fn query_tokens(query: &str) -> Vec<String> {
    fold_case(query)
        .split_whitespace()
        .filter(|word| word.chars().count() > 2)
        .map(str::to_string)
        .collect()
}

pub fn score_section(
    content: &str,
    query: &str,
    tokens: &[String],
    weights: RelevanceWeights,
) -> Option<u32> {
    let content = fold_case(content);
    let query = fold_case(query);
    let mut relevance = 0u32;
    let mut matched = false;

    if !query.is_empty() && content.contains(&query) {
        relevance += weights.exact_match;
        matched = true;
    }

    for token in tokens {
        let occurrences = content.matches(token.as_str()).count() as u32;
        if occurrences > 0 {
            relevance += occurrences * weights.per_occurrence;
            matched = true;
        }
    }

    if tokens.len() > 1 && tokens.iter().all(|token| content.contains(token.as_str())) {
        relevance += weights.all_terms_present;
    }

    matched.then_some(relevance)
}

pub fn rank(store: &SectionStore, query: &str, options: &SearchOptions) -> Vec<SearchResult> {
    let tokens = query_tokens(query);

    let mut results = store
        .sections()
        .iter()
        .filter_map(|section| {
            score_section(&section.content, query, &tokens, options.weights)
                .map(|relevance| SearchResult::from_section(section, relevance))
        })
        .collect::<Vec<_>>();

    results.sort_by(|left, right| right.relevance.cmp(&left.relevance));
    results.truncate(options.max_results);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Section;

    fn section(content: &str, page: u32, section_index: u32) -> Section {
        Section {
            content: content.to_string(),
            page,
            section_index,
        }
    }

    fn weights() -> RelevanceWeights {
        RelevanceWeights::default()
    }

    #[test]
    fn tokens_drop_short_words() {
        assert_eq!(
            query_tokens("Abertura de um Processo"),
            vec!["abertura".to_string(), "processo".to_string()]
        );
        assert!(query_tokens("de um a").is_empty());
    }

    #[test]
    fn exact_match_of_short_query_adds_twenty() {
        let tokens = query_tokens("rh");
        assert!(tokens.is_empty());
        assert_eq!(score_section("Fale com o RH.", "rh", &tokens, weights()), Some(20));
    }

    #[test]
    fn each_occurrence_adds_three() {
        let tokens = query_tokens("férias");
        // the exact match of a one-word query is also one occurrence
        assert_eq!(
            score_section("Férias e mais férias", "férias", &tokens, weights()),
            Some(20 + 3 + 3)
        );
    }

    #[test]
    fn occurrences_are_not_anchored_to_word_boundaries() {
        let tokens = query_tokens("cess");
        assert_eq!(
            score_section("processo e acesso", "cess", &tokens, weights()),
            Some(20 + 3 + 3)
        );
    }

    #[test]
    fn all_terms_present_bonus_without_exact_match() {
        let tokens = query_tokens("prazo recurso");
        assert_eq!(
            score_section(
                "O recurso deve ser enviado dentro do prazo.",
                "prazo recurso",
                &tokens,
                weights()
            ),
            Some(3 + 3 + 10)
        );
    }

    #[test]
    fn all_terms_present_bonus_with_exact_match() {
        let tokens = query_tokens("prazo recurso");
        assert_eq!(
            score_section("Qual o prazo recurso?", "prazo recurso", &tokens, weights()),
            Some(20 + 3 + 3 + 10)
        );
    }

    #[test]
    fn partial_term_coverage_gets_no_bonus() {
        let tokens = query_tokens("prazo recurso");
        assert_eq!(
            score_section("Somente o prazo aparece.", "prazo recurso", &tokens, weights()),
            Some(3)
        );
    }

    #[test]
    fn non_matching_section_is_excluded() {
        let tokens = query_tokens("salário");
        assert_eq!(
            score_section("Nada relacionado aqui.", "salário", &tokens, weights()),
            None
        );
    }

    #[test]
    fn ranking_is_sorted_capped_and_stable() {
        let mut sections = Vec::new();
        for index in 0..20 {
            sections.push(section("contrato padrão", 1, index + 1));
        }
        sections.push(section("contrato contrato contrato", 2, 1));
        sections.push(section("sem relação", 3, 1));
        let store = SectionStore::new(sections);

        let results = rank(&store, "contrato", &SearchOptions::default());

        assert_eq!(results.len(), 15);
        assert_eq!(results[0].page, 2);
        assert!(results
            .windows(2)
            .all(|pair| pair[0].relevance >= pair[1].relevance));
        let tied = results[1..]
            .iter()
            .map(|result| result.section_index)
            .collect::<Vec<_>>();
        assert_eq!(tied, (1..=14).collect::<Vec<_>>());
    }

    #[test]
    fn ranking_is_idempotent() {
        let store = SectionStore::new(vec![
            section("abertura de processo", 1, 1),
            section("processo de férias e processo de licença", 1, 2),
            section("férias coletivas", 2, 1),
        ]);
        let options = SearchOptions::default();

        let first = rank(&store, "processo férias", &options);
        let second = rank(&store, "processo férias", &options);
        assert_eq!(first, second);
        assert_eq!(first[0].section_index, 2);
    }

    #[test]
    fn query_without_qualifying_tokens_or_exact_match_is_empty() {
        let store = SectionStore::new(vec![section("abertura de processo", 1, 1)]);
        assert!(rank(&store, "xy", &SearchOptions::default()).is_empty());
    }

    #[test]
    fn vacation_scenario_echoes_page_and_section() {
        let store = SectionStore::new(vec![section(
            "Processo de férias: documentação necessária...",
            3,
            1,
        )]);

        let results = rank(&store, "férias documentação", &SearchOptions::default());

        assert_eq!(results.len(), 1);
        assert!(results[0].relevance >= 6);
        assert_eq!(results[0].page, 3);
        assert_eq!(results[0].section_index, 1);
    }
}
