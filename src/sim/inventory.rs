//! Per-level collection of picked-up resources

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Colour pairing keys with the locks they open
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KeyColor {
    Blue,
    Green,
}

/// Resource kinds the inventory tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InventoryItem {
    Flour,
    Key(KeyColor),
    WaterPickup,
}

/// One inventory line as it appears in snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub item: InventoryItem,
    pub count: u32,
}

/// Counts of collected resources, ordered for stable snapshots
///
/// Serialized as a list of entries since keyed items aren't valid JSON keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<InventoryEntry>", from = "Vec<InventoryEntry>")]
pub struct Inventory {
    items: BTreeMap<InventoryItem, u32>,
}

impl From<Inventory> for Vec<InventoryEntry> {
    fn from(inventory: Inventory) -> Self {
        inventory
            .iter()
            .map(|(item, count)| InventoryEntry { item, count })
            .collect()
    }
}

impl From<Vec<InventoryEntry>> for Inventory {
    fn from(entries: Vec<InventoryEntry>) -> Self {
        let mut inventory = Inventory::new();
        for entry in entries {
            *inventory.items.entry(entry.item).or_insert(0) += entry.count;
        }
        inventory
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: InventoryItem) {
        *self.items.entry(item).or_insert(0) += 1;
    }

    pub fn has(&self, item: InventoryItem) -> bool {
        self.count(item) > 0
    }

    pub fn count(&self, item: InventoryItem) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (InventoryItem, u32)> + '_ {
        self.items.iter().map(|(item, count)| (*item, *count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_count() {
        let mut inventory = Inventory::new();
        assert!(!inventory.has(InventoryItem::Flour));

        inventory.add(InventoryItem::Flour);
        inventory.add(InventoryItem::Flour);
        inventory.add(InventoryItem::Key(KeyColor::Blue));

        assert_eq!(inventory.count(InventoryItem::Flour), 2);
        assert!(inventory.has(InventoryItem::Key(KeyColor::Blue)));
        assert!(!inventory.has(InventoryItem::Key(KeyColor::Green)));
        assert_eq!(inventory.iter().count(), 2);
    }

    #[test]
    fn test_serializes_as_entry_list() {
        let mut inventory = Inventory::new();
        inventory.add(InventoryItem::Key(KeyColor::Green));
        inventory.add(InventoryItem::WaterPickup);

        let json = serde_json::to_value(&inventory).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "item": { "KEY": "GREEN" }, "count": 1 },
                { "item": "WATER_PICKUP", "count": 1 },
            ])
        );
    }
}
