//! Sorted index over the item catalog.
//!
//! Records are ordered by `(resolved_name, defindex)` once at construction and
//! never reordered. Many definitions share a display name (stock and
//! upgradeable weapons, promo duplicates, kits), so a name lookup isolates the
//! whole run of equal names and then picks one record by a fixed policy
//! instead of trusting whichever entry the search lands on.

use crate::catalog::identity::Defindex;
use crate::catalog::model::SchemaItem;
use anyhow::{Result, bail};
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug)]
/// Immutable catalog of stripped item records sorted for name search.
pub struct CatalogIndex {
    items: Vec<SchemaItem>,
}

impl CatalogIndex {
    /// Build the index from stripped records.
    ///
    /// Rejects empty catalogs and duplicate defindexes; both mean the dataset
    /// is not the one the resolver was written against.
    pub fn build(mut items: Vec<SchemaItem>) -> Result<Self> {
        if items.is_empty() {
            bail!("catalog contains no items");
        }

        let mut seen = BTreeSet::new();
        for item in &items {
            if !seen.insert(item.defindex) {
                bail!("duplicate defindex {} ({})", item.defindex, item.name);
            }
        }

        items.sort_by(|a, b| {
            a.resolved_name()
                .cmp(b.resolved_name())
                .then(a.defindex.cmp(&b.defindex))
        });
        debug!(items = items.len(), "built catalog index");
        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates records in index order.
    pub fn iter(&self) -> impl Iterator<Item = &SchemaItem> {
        self.items.iter()
    }

    /// Find the defindex best matching `name`.
    ///
    /// Binary search lands somewhere inside the run of records whose resolved
    /// name equals `name`; the run is then widened to both ends and scanned in
    /// order. The first record that is not an upgradeable-marked stock entry
    /// (or that is the upgradeable variant itself) wins; otherwise the last
    /// upgradeable-marked record in the run is returned.
    pub fn search(&self, name: &str) -> Option<Defindex> {
        let hit = self
            .items
            .binary_search_by(|item| item.resolved_name().cmp(name))
            .ok()?;

        let start = self.items[..hit]
            .iter()
            .rposition(|item| item.resolved_name() != name)
            .map_or(0, |pos| pos + 1);
        let end = self.items[hit..]
            .iter()
            .position(|item| item.resolved_name() != name)
            .map_or(self.items.len(), |pos| hit + pos);

        select(&self.items[start..end]).map(|item| item.defindex)
    }

    /// Linear lookup of the full record for `name`, using the same selection
    /// policy as [`CatalogIndex::search`].
    pub fn item_named(&self, name: &str) -> Option<&SchemaItem> {
        select(self.items.iter().filter(|item| item.resolved_name() == name))
    }

    /// Linear lookup of the record carrying `defindex`.
    pub fn item_with_defindex(&self, defindex: Defindex) -> Option<&SchemaItem> {
        select(self.items.iter().filter(|item| item.defindex == defindex))
    }
}

fn select<'a>(candidates: impl IntoIterator<Item = &'a SchemaItem>) -> Option<&'a SchemaItem> {
    let mut fallback = None;
    for item in candidates {
        if item.is_immediate_match() {
            return Some(item);
        }
        fallback = Some(item);
    }
    fallback
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(defindex: u32, name: &str, class: &str, item_name: &str) -> SchemaItem {
        SchemaItem {
            name: name.to_string(),
            proper_name: false,
            defindex: Defindex(defindex),
            item_class: class.to_string(),
            item_type_name: "Weapon".to_string(),
            item_name: item_name.to_string(),
        }
    }

    fn kit(defindex: u32, type_name: &str) -> SchemaItem {
        SchemaItem {
            item_type_name: type_name.to_string(),
            ..item(defindex, "Killstreak Kit", "tool", "Kit")
        }
    }

    fn sample() -> CatalogIndex {
        CatalogIndex::build(vec![
            item(205, "Upgradeable TF_WEAPON_ROCKETLAUNCHER", "tf_weapon_rocketlauncher", "Rocket Launcher"),
            item(18, "TF_WEAPON_ROCKETLAUNCHER", "tf_weapon_rocketlauncher", "Rocket Launcher"),
            item(127, "The Direct Hit", "tf_weapon_rocketlauncher_directhit", "Direct Hit"),
            item(13, "TF_WEAPON_SCATTERGUN", "tf_weapon_scattergun", "Scattergun"),
            item(200, "Upgradeable TF_WEAPON_SCATTERGUN", "tf_weapon_scattergun", "Scattergun"),
            item(669, "Festive Scattergun 2011", "tf_weapon_scattergun", "Festive Scattergun"),
            item(101, "Specialized Killstreak Kit", "tool", "Specialized Killstreak Kit"),
            kit(100, "Specialized Killstreak Kit"),
            item(20003, "Fabricator Tier 3", "tool", "Professional Killstreak Fabricator Kit"),
            item(20002, "Fabricator Tier 2", "tool", "Fabricator Kit"),
            item(5021, "Decoder Ring", "tool", "Mann Co. Supply Crate Key"),
        ])
        .unwrap()
    }

    #[test]
    fn index_is_sorted_by_resolved_name_then_defindex() {
        let index = sample();
        let items: Vec<&SchemaItem> = index.iter().collect();
        for pair in items.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!(
                a.resolved_name() < b.resolved_name()
                    || (a.resolved_name() == b.resolved_name() && a.defindex < b.defindex),
                "{} ({}) sorted before {} ({})",
                a.resolved_name(),
                a.defindex,
                b.resolved_name(),
                b.defindex
            );
        }
        assert_eq!(index.len(), 11);
    }

    #[test]
    fn upgradeable_variant_wins_when_stock_is_marked() {
        let index = sample();
        assert_eq!(index.search("Rocket Launcher"), Some(Defindex(205)));
        assert_eq!(index.search("Scattergun"), Some(Defindex(200)));
    }

    #[test]
    fn unmarked_record_beats_marked_one() {
        let index = CatalogIndex::build(vec![
            item(10, "TF_WEAPON_SHOVEL", "tf_weapon_shovel", "Shovel"),
            item(11, "Promo Shovel", "tf_weapon_club", "Shovel"),
        ])
        .unwrap();
        assert_eq!(index.search("Shovel"), Some(Defindex(11)));
    }

    #[test]
    fn only_marked_records_fall_back_to_last_scanned() {
        let index = CatalogIndex::build(vec![
            item(30, "TF_WEAPON_BAT", "tf_weapon_bat", "Bat"),
            item(31, "TF_WEAPON_BAT promo", "tf_weapon_bat", "Bat"),
            item(32, "TF_WEAPON_BAT event", "tf_weapon_bat", "Bat"),
            item(1, "Axe", "tf_weapon_fireaxe", "Axe"),
            item(99, "Zatoichi", "tf_weapon_katana", "Zatoichi"),
        ])
        .unwrap();
        assert_eq!(index.search("Bat"), Some(Defindex(32)));
        assert_eq!(index.item_named("Bat").map(|i| i.defindex), Some(Defindex(32)));
    }

    #[test]
    fn kit_and_named_item_pick_smaller_defindex() {
        let index = sample();
        assert_eq!(index.search("Specialized Killstreak Kit"), Some(Defindex(100)));
    }

    #[test]
    fn fabricators_are_found_by_fixed_names_only() {
        let index = sample();
        assert_eq!(
            index.search("Professional Killstreak Fabricator"),
            Some(Defindex(20003))
        );
        assert_eq!(
            index.search("Specialized Killstreak Fabricator"),
            Some(Defindex(20002))
        );
        assert_eq!(index.search("Fabricator Kit"), None);
    }

    #[test]
    fn missing_names_are_not_found() {
        let index = sample();
        assert_eq!(index.search("nonexistent-name"), None);
        assert_eq!(index.search(""), None);
        assert_eq!(index.search("Aaaa"), None);
        assert_eq!(index.search("zzzz"), None);
        assert!(index.item_named("nonexistent-name").is_none());
    }

    #[test]
    fn runs_at_index_edges_are_fully_expanded() {
        let index = CatalogIndex::build(vec![
            item(3, "A3", "c", "A"),
            item(1, "A1", "c", "A"),
            item(2, "A2", "c", "A"),
            item(9, "Z9", "y", "Z"),
            item(8, "Z8", "y", "Z"),
        ])
        .unwrap();
        assert_eq!(index.search("A"), Some(Defindex(1)));
        assert_eq!(index.search("Z"), Some(Defindex(8)));
    }

    #[test]
    fn linear_lookup_agrees_with_search() {
        let index = sample();
        for name in ["Rocket Launcher", "Scattergun", "Direct Hit", "Specialized Killstreak Kit"] {
            assert_eq!(
                index.item_named(name).map(|item| item.defindex),
                index.search(name),
                "{name}"
            );
        }
        assert_eq!(
            index.item_with_defindex(Defindex(5021)).map(|item| item.item_name.as_str()),
            Some("Mann Co. Supply Crate Key")
        );
        assert!(index.item_with_defindex(Defindex(4)).is_none());
    }

    #[test]
    fn build_rejects_empty_and_duplicate_catalogs() {
        let err = CatalogIndex::build(Vec::new()).unwrap_err();
        assert!(err.to_string().contains("no items"));

        let err = CatalogIndex::build(vec![
            item(7, "One", "c", "One"),
            item(7, "Two", "c", "Two"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("duplicate defindex 7"));
    }
}
