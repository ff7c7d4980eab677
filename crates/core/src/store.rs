use crate::models::{LoadedDocument, Section};

/// The in-memory section list of the loaded manual.
#[derive(Debug, Clone)]
pub struct SectionStore {
    sections: Vec<Section>,
    document: Option<LoadedDocument>,
}

impl SectionStore {
    pub fn new(sections: Vec<Section>) -> Self {
        Self {
            sections,
            document: None,
        }
    }

    pub fn with_document(sections: Vec<Section>, document: LoadedDocument) -> Self {
        Self {
            sections,
            document: Some(document),
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn document(&self) -> Option<&LoadedDocument> {
        self.document.as_ref()
    }
}
