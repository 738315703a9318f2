use log::debug;

use crate::catalog::{
    Catalog, LotteryDefinition, PawnshopCategory, QuestDefinition, QuestGroup, QuestPatchGroup,
    QuestReward, Shop, ShopCost, ShopItem,
};
use crate::items::ItemId;
use crate::request::{
    LineItem, Lottery, LotteryRarity, NpcEntry, NpcKind, NpcPatch, RequestDocument, RequestSet,
    Trade,
};
use crate::resolve::Resolver;

/// Values shared by every generated record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyContext {
    pub biome_id: u32,
    pub profession_id: u32,
    /// Item paid or handed out as a generic exchange ticket; `None` when the
    /// ticket key did not resolve.
    pub ticket_item_id: Option<ItemId>,
    pub lottery_ticket_item_id: ItemId,
}

impl AssemblyContext {
    fn npc(&self, name: String, kind: NpcKind, trades: Vec<Trade>) -> NpcEntry {
        NpcEntry {
            name,
            biome_id: self.biome_id,
            profession_id: self.profession_id,
            npc_type_id: kind.type_id(),
            trades,
        }
    }

    fn tickets(&self, quantity: u32) -> Option<LineItem> {
        self.ticket_item_id.map(|id| LineItem::item(id, quantity))
    }
}

/// Which shop costs a counter accepts.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum CostPolicy {
    Any,
    ItemOnly,
}

/// How a quest's reward is turned into a line item.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum RewardPolicy {
    /// Tickets and named items; anything else pays one ticket.
    Standard,
    /// Like `Standard`, but lottery tickets pay the lottery ticket item.
    WithLotteryTickets,
    /// Only a named item is a valid reward.
    ItemOnly,
}

fn quest_npc_name(difficulty: &str) -> String {
    format!("クエスト ({difficulty})")
}

pub fn build_requests(resolver: &Resolver, catalog: &Catalog, ctx: &AssemblyContext) -> RequestSet {
    RequestSet {
        pawnshop: pawnshop_request(resolver, &catalog.pawnshop, ctx),
        shop: shop_request(resolver, &catalog.shops, ctx),
        quest: quest_request(resolver, &catalog.quests, ctx),
        quest_patch: quest_patch_request(resolver, &catalog.quest_patches, ctx),
        lottery: lottery_request(resolver, &catalog.lottery),
        armor_trades: armor_trades_request(
            resolver,
            &catalog.armor_shops,
            &catalog.armor_quests,
            ctx,
        ),
        food_trades: food_trades_request(resolver, &catalog.restaurant_shops, ctx),
    }
}

pub fn pawnshop_request(
    resolver: &Resolver,
    categories: &[PawnshopCategory],
    ctx: &AssemblyContext,
) -> RequestDocument<NpcEntry> {
    let mut request = RequestDocument::default();

    for category in categories {
        let trades: Vec<Trade> = category
            .items
            .iter()
            .filter_map(|item| {
                let id = resolver.resolve_key(Some(item.key.as_str()))?;
                Some(Trade {
                    content: format!("Buy {}", item.label()),
                    view_item_id: id,
                    costs: vec![LineItem::item(id, 1)],
                    rewards: vec![LineItem::price(item.price)],
                })
            })
            .collect();

        if !trades.is_empty() {
            request
                .store
                .push(ctx.npc(category.category.clone(), NpcKind::Pawnshop, trades));
        }
    }

    request
}

fn shop_trade(
    resolver: &Resolver,
    item: &ShopItem,
    ctx: &AssemblyContext,
    policy: CostPolicy,
) -> Option<Trade> {
    let id = resolver.resolve(&item.item)?;

    let cost = match (&item.cost, policy) {
        (ShopCost::Item(cost_name), _) => LineItem::item(resolver.resolve_name(cost_name)?, 1),
        (ShopCost::Price(price), CostPolicy::Any) => LineItem::price(*price),
        (ShopCost::Tickets(count), CostPolicy::Any) => match ctx.tickets(*count) {
            Some(cost) => cost,
            None => {
                debug!("skipping {}: ticket item unresolved", item.name);
                return None;
            }
        },
        (cost, CostPolicy::ItemOnly) => {
            debug!("skipping {}: cost {:?} not accepted here", item.name, cost);
            return None;
        }
    };

    Some(Trade {
        content: format!("Sell {}", item.name),
        view_item_id: id,
        costs: vec![cost],
        rewards: vec![LineItem::item(id, item.quantity)],
    })
}

fn shop_npcs(
    resolver: &Resolver,
    shops: &[Shop],
    ctx: &AssemblyContext,
    policy: CostPolicy,
) -> Vec<NpcEntry> {
    shops
        .iter()
        .filter_map(|shop| {
            let trades: Vec<Trade> = shop
                .items
                .iter()
                .filter_map(|item| shop_trade(resolver, item, ctx, policy))
                .collect();
            if trades.is_empty() {
                debug!("dropping shop {}: no trades resolved", shop.name);
                return None;
            }
            Some(ctx.npc(shop.name.clone(), NpcKind::Shop, trades))
        })
        .collect()
}

pub fn shop_request(
    resolver: &Resolver,
    shops: &[Shop],
    ctx: &AssemblyContext,
) -> RequestDocument<NpcEntry> {
    RequestDocument {
        store: shop_npcs(resolver, shops, ctx, CostPolicy::Any),
        ..RequestDocument::default()
    }
}

fn quest_reward(
    resolver: &Resolver,
    quest: &QuestDefinition,
    ctx: &AssemblyContext,
    policy: RewardPolicy,
) -> Option<LineItem> {
    match (&quest.reward, policy) {
        (QuestReward::Item(Some(reward_name)), _) => {
            Some(LineItem::item(resolver.resolve_name(reward_name)?, 1))
        }
        (_, RewardPolicy::ItemOnly) => {
            debug!("skipping quest {}: reward is not an item", quest.name);
            None
        }
        (QuestReward::Tickets(count), _) => ctx.tickets(*count),
        (QuestReward::LotteryTickets(count), RewardPolicy::WithLotteryTickets) => {
            Some(LineItem::item(ctx.lottery_ticket_item_id, *count))
        }
        (QuestReward::LotteryTickets(_), RewardPolicy::Standard) | (QuestReward::Item(None), _) => {
            ctx.tickets(1)
        }
    }
}

fn quest_trade(
    resolver: &Resolver,
    quest: &QuestDefinition,
    ctx: &AssemblyContext,
    policy: RewardPolicy,
) -> Option<Trade> {
    let required = resolver.resolve(&quest.requirement)?;
    let reward = quest_reward(resolver, quest, ctx, policy)?;

    Some(Trade {
        content: quest.name.clone(),
        view_item_id: required,
        costs: vec![LineItem::item(required, quest.amount)],
        rewards: vec![reward],
    })
}

fn quest_trades(
    resolver: &Resolver,
    quests: &[QuestDefinition],
    ctx: &AssemblyContext,
    policy: RewardPolicy,
) -> Vec<Trade> {
    quests
        .iter()
        .filter_map(|quest| quest_trade(resolver, quest, ctx, policy))
        .collect()
}

fn quest_npcs(
    resolver: &Resolver,
    groups: &[QuestGroup],
    ctx: &AssemblyContext,
    policy: RewardPolicy,
) -> Vec<NpcEntry> {
    groups
        .iter()
        .filter_map(|group| {
            let trades = quest_trades(resolver, &group.list, ctx, policy);
            (!trades.is_empty())
                .then(|| ctx.npc(quest_npc_name(&group.difficulty), NpcKind::Quest, trades))
        })
        .collect()
}

pub fn quest_request(
    resolver: &Resolver,
    groups: &[QuestGroup],
    ctx: &AssemblyContext,
) -> RequestDocument<NpcEntry> {
    RequestDocument {
        store: quest_npcs(resolver, groups, ctx, RewardPolicy::Standard),
        ..RequestDocument::default()
    }
}

pub fn quest_patch_request(
    resolver: &Resolver,
    groups: &[QuestPatchGroup],
    ctx: &AssemblyContext,
) -> RequestDocument<NpcEntry> {
    let mut request = RequestDocument::default();

    for group in groups {
        let add_trades = quest_trades(resolver, &group.list, ctx, RewardPolicy::WithLotteryTickets);
        if add_trades.is_empty() {
            continue;
        }
        request.patch.push(NpcPatch {
            id: group.id,
            name: quest_npc_name(&group.difficulty),
            biome_id: ctx.biome_id,
            profession_id: ctx.profession_id,
            npc_type_id: NpcKind::Quest.type_id(),
            add_trades,
        });
    }

    request
}

pub fn lottery_request(resolver: &Resolver, lottery: &LotteryDefinition) -> RequestDocument<Lottery> {
    let rarities = lottery
        .rarities
        .iter()
        .map(|rarity| LotteryRarity {
            name: rarity.name.clone(),
            probability: rarity.probability,
            items: rarity
                .items
                .iter()
                .filter_map(|item| resolver.resolve(item))
                .collect(),
        })
        .collect();

    RequestDocument {
        store: vec![Lottery {
            name: lottery.name.clone(),
            rarities,
        }],
        ..RequestDocument::default()
    }
}

/// Armor counters: unlimited ticket exchanges followed by the one-off armor
/// quests.
pub fn armor_trades_request(
    resolver: &Resolver,
    shops: &[Shop],
    quests: &[QuestGroup],
    ctx: &AssemblyContext,
) -> RequestDocument<NpcEntry> {
    let mut store = shop_npcs(resolver, shops, ctx, CostPolicy::ItemOnly);
    store.extend(quest_npcs(resolver, quests, ctx, RewardPolicy::ItemOnly));

    RequestDocument {
        store,
        ..RequestDocument::default()
    }
}

pub fn food_trades_request(
    resolver: &Resolver,
    shops: &[Shop],
    ctx: &AssemblyContext,
) -> RequestDocument<NpcEntry> {
    RequestDocument {
        store: shop_npcs(resolver, shops, ctx, CostPolicy::ItemOnly),
        ..RequestDocument::default()
    }
}
