//! Parsed radar document

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::{Phase, TechItem};

/// Items grouped by phase, in document order
///
/// All four phases are always present, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RadarDocument {
    phases: [Vec<TechItem>; 4],
}

impl RadarDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an item to the sequence of its phase
    pub fn push(&mut self, item: TechItem) {
        self.phases[item.phase.index()].push(item);
    }

    /// Items of one phase, in document order
    pub fn items(&self, phase: Phase) -> &[TechItem] {
        &self.phases[phase.index()]
    }

    /// Iterates phases in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Phase, &[TechItem])> {
        Phase::ALL.into_iter().map(move |p| (p, self.items(p)))
    }

    /// Total number of items across phases
    pub fn len(&self) -> usize {
        self.phases.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.iter().all(Vec::is_empty)
    }
}

impl Serialize for RadarDocument {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(Phase::ALL.len()))?;
        for (phase, items) in self.iter() {
            map.serialize_entry(phase.key(), items)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_has_all_phases() {
        let doc = RadarDocument::new();
        assert!(doc.is_empty());
        assert_eq!(doc.iter().count(), 4);

        let json = serde_json::to_value(&doc).unwrap();
        for phase in Phase::ALL {
            assert_eq!(json[phase.key()], serde_json::json!([]));
        }
    }

    #[test]
    fn push_groups_by_phase() {
        let mut doc = RadarDocument::new();
        doc.push(TechItem::new("Rust", Phase::Observe));
        doc.push(TechItem::new("React", Phase::Adopt));
        doc.push(TechItem::new("Deno", Phase::Observe));

        let names: Vec<_> = doc.items(Phase::Observe).iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Rust", "Deno"]);
        assert_eq!(doc.items(Phase::Adopt).len(), 1);
        assert_eq!(doc.len(), 3);
    }
}
