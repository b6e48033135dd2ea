//! Secondary index from property token to the assessments made of it.

use hqa_types::{AssessmentId, PropertyToken};
use std::collections::HashMap;

/// Append-only; ids per token are kept in submission order.
#[derive(Clone, Debug, Default)]
pub struct PropertyIndex {
    entries: HashMap<PropertyToken, Vec<AssessmentId>>,
}

impl PropertyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, property: &PropertyToken, id: AssessmentId) {
        self.entries.entry(property.clone()).or_default().push(id);
    }

    /// Number of assessments for `property`; zero for unknown tokens.
    pub fn count(&self, property: &PropertyToken) -> usize {
        self.entries.get(property).map_or(0, Vec::len)
    }

    /// Assessment ids for `property` in submission order; empty for unknown tokens.
    pub fn ids(&self, property: &PropertyToken) -> &[AssessmentId] {
        self.entries.get(property).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct properties assessed.
    pub fn property_count(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&PropertyToken, &Vec<AssessmentId>)> {
        self.entries.iter()
    }

    pub(crate) fn from_entries(
        entries: impl IntoIterator<Item = (PropertyToken, Vec<AssessmentId>)>,
    ) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }
}
