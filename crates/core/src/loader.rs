use crate::chunking::{build_sections, ChunkingConfig};
use crate::error::LoadError;
use crate::extractor::PdfExtractor;
use crate::models::{LoadedDocument, SearchOptions};
use crate::store::SectionStore;
use async_trait::async_trait;
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Manual file names, most preferred first.
pub const DEFAULT_CANDIDATES: [&str; 10] = [
    "Data/Manual PROCESSOS TCI.pdf",
    "manual_tci.pdf",
    "manual-processos.pdf",
    "manual_processos.pdf",
    "manual.pdf",
    "tci-manual.pdf",
    "tci_manual.pdf",
    "processos.pdf",
    "manual-procedimentos.pdf",
    "manual_procedimentos.pdf",
];

#[async_trait]
pub trait DocumentSource {
    async fn fetch(&self, name: &str) -> Result<Vec<u8>, LoadError>;
}

#[derive(Debug, Clone)]
pub struct FsDocumentSource {
    base_dir: PathBuf,
}

impl FsDocumentSource {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

#[async_trait]
impl DocumentSource for FsDocumentSource {
    async fn fetch(&self, name: &str) -> Result<Vec<u8>, LoadError> {
        let path = self.base_dir.join(name);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                Err(LoadError::NotFound(path.display().to_string()))
            }
            Err(error) => Err(LoadError::Io(error)),
        }
    }
}

pub fn digest_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

pub fn index_document<E>(
    name: &str,
    bytes: &[u8],
    extractor: &E,
    options: &SearchOptions,
) -> Result<SectionStore, LoadError>
where
    E: PdfExtractor + ?Sized,
{
    let pages = extractor.extract_pages(bytes)?;
    let sections = build_sections(&pages, ChunkingConfig::from(options));

    let document = LoadedDocument {
        name: name.to_string(),
        page_count: pages.len() as u32,
        section_count: sections.len(),
        checksum: digest_bytes(bytes),
        loaded_at: Utc::now(),
    };

    Ok(SectionStore::with_document(sections, document))
}

pub async fn load_first_available<S, E>(
    source: &S,
    extractor: &E,
    candidates: &[&str],
    options: &SearchOptions,
) -> Option<SectionStore>
where
    S: DocumentSource + Sync + ?Sized,
    E: PdfExtractor + ?Sized,
{
    for &name in candidates {
        let bytes = match source.fetch(name).await {
            Ok(bytes) => bytes,
            Err(error) => {
                debug!(candidate = name, %error, "candidate unavailable");
                continue;
            }
        };

        match index_document(name, &bytes, extractor, options) {
            Ok(store) => {
                info!(candidate = name, sections = store.len(), "manual loaded");
                return Some(store);
            }
            Err(error) => {
                warn!(candidate = name, %error, "candidate could not be indexed");
            }
        }
    }

    info!("no manual found; searches will use placeholder results");
    None
}
