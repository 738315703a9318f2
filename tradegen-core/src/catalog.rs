use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::resolve::ItemRef;
use crate::{GeneratorError, Result};

/// Everything the generator turns into requests: pawnshops, shops, quests
/// and the lottery.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub pawnshop: Vec<PawnshopCategory>,
    pub shops: Vec<Shop>,
    pub armor_shops: Vec<Shop>,
    pub restaurant_shops: Vec<Shop>,
    pub quest_patches: Vec<QuestPatchGroup>,
    pub quests: Vec<QuestGroup>,
    pub armor_quests: Vec<QuestGroup>,
    pub lottery: LotteryDefinition,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Catalog> {
        let data = fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(|source| GeneratorError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|source| GeneratorError::Json {
            path: "<catalog>".into(),
            source,
        })
    }
}

/// A pawnshop NPC buying stock items for a flat price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PawnshopCategory {
    pub category: String,
    pub items: Vec<PawnshopItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PawnshopItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub key: String,
    pub price: u64,
}

impl PawnshopItem {
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub name: String,
    /// Counter blurb for catalog authors. Kept through `--dump-catalog`,
    /// never copied into a request document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub items: Vec<ShopItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopItem {
    pub name: String,
    pub item: ItemRef,
    pub cost: ShopCost,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// What the player hands over for a shop item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopCost {
    Price(u64),
    /// Exchange tickets, paid with the configured ticket item.
    Tickets(u32),
    /// One unit of a named item.
    Item(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestGroup {
    pub difficulty: String,
    pub list: Vec<QuestDefinition>,
}

/// Quests added to an existing quest NPC, identified by its backend id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestPatchGroup {
    pub id: u32,
    pub difficulty: String,
    pub list: Vec<QuestDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestDefinition {
    pub name: String,
    pub requirement: ItemRef,
    pub amount: u32,
    pub reward: QuestReward,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestReward {
    Tickets(u32),
    LotteryTickets(u32),
    /// A named item; `None` marks a reward that has not been assigned yet.
    Item(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LotteryDefinition {
    pub name: String,
    pub rarities: Vec<RarityDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RarityDefinition {
    pub name: String,
    pub probability: u32,
    #[serde(default)]
    pub items: Vec<ItemRef>,
}
