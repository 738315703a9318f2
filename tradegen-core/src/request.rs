use serde::{Deserialize, Serialize};

use crate::items::ItemId;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NpcKind {
    Pawnshop,
    Shop,
    Quest,
}

impl NpcKind {
    pub fn type_id(self) -> u32 {
        match self {
            NpcKind::Pawnshop => 1,
            NpcKind::Shop => 2,
            NpcKind::Quest => 3,
        }
    }
}

/// Body of one `request_*.json` file. Only one of the lists is filled per
/// category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDocument<S, P = NpcPatch> {
    pub store: Vec<S>,
    pub patch: Vec<P>,
    pub delete: Vec<u32>,
}

impl<S, P> Default for RequestDocument<S, P> {
    fn default() -> Self {
        Self {
            store: Vec::new(),
            patch: Vec::new(),
            delete: Vec::new(),
        }
    }
}

impl<S, P> RequestDocument<S, P> {
    pub fn entry_count(&self) -> usize {
        self.store.len() + self.patch.len() + self.delete.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcEntry {
    pub name: String,
    pub biome_id: u32,
    pub profession_id: u32,
    pub npc_type_id: u32,
    pub trades: Vec<Trade>,
}

/// Trades appended to an NPC that already exists on the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcPatch {
    pub id: u32,
    pub name: String,
    pub biome_id: u32,
    pub profession_id: u32,
    pub npc_type_id: u32,
    pub add_trades: Vec<Trade>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub content: String,
    pub view_item_id: ItemId,
    pub costs: Vec<LineItem>,
    pub rewards: Vec<LineItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineItem {
    Item { item_id: ItemId, quantity: u32 },
    Price { price: u64 },
}

impl LineItem {
    pub fn item(item_id: ItemId, quantity: u32) -> Self {
        LineItem::Item { item_id, quantity }
    }

    pub fn price(price: u64) -> Self {
        LineItem::Price { price }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lottery {
    pub name: String,
    pub rarities: Vec<LotteryRarity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotteryRarity {
    pub name: String,
    pub probability: u32,
    pub items: Vec<ItemId>,
}

/// Every document produced by one run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestSet {
    pub pawnshop: RequestDocument<NpcEntry>,
    pub shop: RequestDocument<NpcEntry>,
    pub quest: RequestDocument<NpcEntry>,
    pub quest_patch: RequestDocument<NpcEntry>,
    pub lottery: RequestDocument<Lottery>,
    pub armor_trades: RequestDocument<NpcEntry>,
    pub food_trades: RequestDocument<NpcEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn line_items_serialize_without_tags() {
        let costs = vec![LineItem::item(7, 1), LineItem::price(1000)];
        assert_eq!(
            serde_json::to_value(&costs).expect("serialize"),
            json!([{"item_id": 7, "quantity": 1}, {"price": 1000}])
        );
    }

    #[test]
    fn empty_document_keeps_all_three_lists_in_order() {
        let doc: RequestDocument<NpcEntry> = RequestDocument::default();
        let text = serde_json::to_string(&doc).expect("serialize");
        assert_eq!(text, r#"{"store":[],"patch":[],"delete":[]}"#);
    }

    #[test]
    fn npc_fields_serialize_in_declared_order() {
        let npc = NpcEntry {
            name: "雑貨屋".to_string(),
            biome_id: 1,
            profession_id: 1,
            npc_type_id: NpcKind::Shop.type_id(),
            trades: Vec::new(),
        };
        let text = serde_json::to_string(&npc).expect("serialize");
        assert_eq!(
            text,
            r#"{"name":"雑貨屋","biome_id":1,"profession_id":1,"npc_type_id":2,"trades":[]}"#
        );
    }
}
