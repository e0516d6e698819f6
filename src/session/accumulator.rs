use crate::data::geojson::FeatureCollection;
use crate::data::poi::{Poi, PoiId};
use fxhash::FxHashSet;

/// Outcome of merging one candidate batch
#[derive(Debug)]
pub struct Reconciliation<'a> {
    /// POIs from the batch that were not known before, in batch order
    pub newly_added: Vec<Poi>,
    /// Every POI known after the merge, oldest discovery first
    pub full_set: &'a [Poi],
}

impl Reconciliation<'_> {
    /// Whether the renderer needs a new snapshot
    pub fn has_changes(&self) -> bool {
        !self.newly_added.is_empty()
    }
}

/// Session-scoped set of every POI discovered so far.
///
/// Invariants: at most one POI per id, nothing is ever removed or replaced,
/// and `known` always holds exactly the ids in `accumulated`.
/// [`Accumulator::reconcile`] is the only mutating method.
#[derive(Debug, Default, Clone)]
pub struct Accumulator {
    known: FxHashSet<PoiId>,
    accumulated: Vec<Poi>,
    /// Renderer view of `accumulated`, grown alongside it
    snapshot: FeatureCollection,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges a candidate batch into the session.
    ///
    /// Candidates are taken in order; the first occurrence of an unknown id
    /// wins, both against earlier batches and within this one.
    pub fn reconcile<I>(&mut self, candidates: I) -> Reconciliation<'_>
    where
        I: IntoIterator<Item = Poi>,
    {
        let mut newly_added = Vec::new();
        for poi in candidates {
            if self.known.insert(poi.id().clone()) {
                self.snapshot.push(&poi);
                self.accumulated.push(poi.clone());
                newly_added.push(poi);
            }
        }

        debug_assert_eq!(self.known.len(), self.accumulated.len());
        debug_assert_eq!(self.snapshot.len(), self.accumulated.len());

        Reconciliation {
            newly_added,
            full_set: &self.accumulated,
        }
    }

    /// All known POIs in discovery order
    pub fn points(&self) -> &[Poi] {
        &self.accumulated
    }

    pub fn contains(&self, id: &PoiId) -> bool {
        self.known.contains(id)
    }

    pub fn len(&self) -> usize {
        self.accumulated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accumulated.is_empty()
    }

    /// Every known POI in the shape the renderer consumes
    pub fn feature_collection(&self) -> &FeatureCollection {
        &self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;

    fn poi(id: u64, title: &str) -> Poi {
        Poi::new(id, title, LatLng::new(id as f64, id as f64))
    }

    #[test]
    fn test_empty_batch() {
        let mut acc = Accumulator::new();
        let result = acc.reconcile(Vec::new());
        assert!(!result.has_changes());
        assert!(result.full_set.is_empty());
        assert!(acc.is_empty());
    }

    #[test]
    fn test_string_and_integer_ids_are_distinct() {
        let mut acc = Accumulator::new();
        let batch = vec![
            poi(1, "integer"),
            Poi::new("1", "string", LatLng::new(0.0, 0.0)),
        ];
        assert_eq!(acc.reconcile(batch).newly_added.len(), 2);
        assert!(acc.contains(&PoiId::Page(1)));
        assert!(acc.contains(&PoiId::from("1")));
    }

    #[test]
    fn test_feature_collection_snapshot() {
        let mut acc = Accumulator::new();
        acc.reconcile(vec![poi(3, "C"), poi(1, "A")]);
        let snapshot = acc.feature_collection();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.features()[0].properties.title, "C");
        assert_eq!(snapshot.features()[1].properties.title, "A");
    }

    #[test]
    fn test_snapshot_grows_with_each_batch() {
        let mut acc = Accumulator::new();
        acc.reconcile(vec![poi(1, "A")]);
        acc.reconcile(vec![poi(1, "A again"), poi(2, "B")]);

        let snapshot = acc.feature_collection();
        assert_eq!(snapshot, &FeatureCollection::from_pois(acc.points()));
        assert_eq!(snapshot.features()[0].properties.title, "A");
    }
}
