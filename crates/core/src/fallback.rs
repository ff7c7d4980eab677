//! Placeholder results for when no manual could be loaded.
//!
//! This path never scores anything: it echoes the query into four fixed
//! templates so the front-end still has something to show.

use crate::models::SearchResult;

const PLACEHOLDERS: [(u32, u32, u32); 4] = [(1, 1, 15), (2, 1, 12), (3, 2, 10), (4, 1, 9)];

pub fn placeholder_results(query: &str) -> Vec<SearchResult> {
    PLACEHOLDERS
        .iter()
        .enumerate()
        .map(|(slot, &(page, section_index, relevance))| SearchResult {
            content: placeholder_text(slot, query),
            page,
            section_index,
            relevance,
        })
        .collect()
}

fn placeholder_text(slot: usize, query: &str) -> String {
    match slot {
        0 => format!(
            "Processo de {query}: Documentação necessária para abertura de processo relacionado a {query}. \
             Este procedimento deve ser seguido conforme as diretrizes estabelecidas no manual de processos da organização."
        ),
        1 => format!(
            "Procedimentos para {query}: Fluxo detalhado das etapas necessárias para execução de {query}. \
             Importante verificar todos os requisitos antes de iniciar o processo."
        ),
        2 => format!(
            "Aprovação de {query}: Critérios e responsáveis pela aprovação de processos relacionados a {query}. \
             O tempo médio de aprovação é de 5 a 10 dias úteis."
        ),
        _ => format!(
            "Documentação para {query}: Lista completa de documentos necessários para solicitações de {query}. \
             Verifique se todos os documentos estão atualizados e válidos."
        ),
    }
}
