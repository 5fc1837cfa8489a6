use indexmap::IndexMap;
use tracing::debug;

use crate::catalog::Composition;
use crate::sources::{normalize_name, ExternalComposition};

/// External records keyed by normalized name, in source order.
///
/// A later record with the same normalized name replaces the earlier value
/// but keeps its position.
#[derive(Debug, Clone, Default)]
pub struct ExternalLookup {
    entries: IndexMap<String, ExternalComposition>,
}

impl ExternalLookup {
    pub fn new(external: &[ExternalComposition]) -> Self {
        let mut entries = IndexMap::with_capacity(external.len());
        for record in external {
            entries.insert(normalize_name(&record.name), record.clone());
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExternalComposition)> {
        self.entries.iter().map(|(key, record)| (key.as_str(), record))
    }
}

/// Strategy for pairing a local composition with an external record.
pub trait NameMatcher {
    fn find<'a>(&self, name: &str, lookup: &'a ExternalLookup) -> Option<&'a ExternalComposition>;
}

/// Matches when either normalized name contains the other's leading
/// characters. The first hit in lookup order wins; when several external
/// records qualify, which one that is depends on source order. A name that
/// normalizes to nothing has an empty prefix and so matches the first record.
#[derive(Debug, Clone, Copy)]
pub struct PrefixSubstringMatcher {
    pub prefix_len: usize,
}

impl Default for PrefixSubstringMatcher {
    fn default() -> Self {
        Self { prefix_len: 6 }
    }
}

impl PrefixSubstringMatcher {
    fn prefix<'s>(&self, value: &'s str) -> &'s str {
        match value.char_indices().nth(self.prefix_len) {
            Some((end, _)) => &value[..end],
            None => value,
        }
    }
}

impl NameMatcher for PrefixSubstringMatcher {
    fn find<'a>(&self, name: &str, lookup: &'a ExternalLookup) -> Option<&'a ExternalComposition> {
        let local = normalize_name(name);
        let local_prefix = self.prefix(&local);

        lookup
            .iter()
            .find(|(key, _)| key.contains(local_prefix) || local.contains(self.prefix(key)))
            .map(|(_, record)| record)
    }
}

/// Attaches external win rate and placement to local compositions.
#[derive(Debug, Clone, Default)]
pub struct CompositionMerger<M = PrefixSubstringMatcher> {
    matcher: M,
}

impl<M: NameMatcher> CompositionMerger<M> {
    pub fn new(matcher: M) -> Self {
        Self { matcher }
    }

    /// Returns an enriched copy; stats are cleared when nothing matches.
    pub fn merge_one(&self, local: &Composition, lookup: &ExternalLookup) -> Composition {
        let mut merged = local.clone();
        match self.matcher.find(&local.name, lookup) {
            Some(record) => {
                merged.winrate = record.winrate;
                merged.avg_place = record.avg_place;
                merged.tactics_name = Some(record.name.clone());
            }
            None => {
                merged.winrate = None;
                merged.avg_place = None;
                merged.tactics_name = None;
            }
        }
        merged
    }

    pub fn merge(
        &self,
        local: &[Composition],
        external: &[ExternalComposition],
    ) -> Vec<Composition> {
        let lookup = ExternalLookup::new(external);
        let merged: Vec<Composition> = local
            .iter()
            .map(|composition| self.merge_one(composition, &lookup))
            .collect();

        debug!(
            local = local.len(),
            external = lookup.len(),
            matched = merged.iter().filter(|c| c.tactics_name.is_some()).count(),
            "merged external statistics"
        );
        merged
    }
}
