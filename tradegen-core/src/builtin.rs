use crate::catalog::{
    Catalog, LotteryDefinition, PawnshopCategory, PawnshopItem, QuestDefinition, QuestGroup,
    QuestPatchGroup, QuestReward, RarityDefinition, Shop, ShopCost, ShopItem,
};
use crate::resolve::ItemRef;

fn key(key: &str) -> ItemRef {
    ItemRef::key(key)
}

fn name(name: &str) -> ItemRef {
    ItemRef::name(name)
}

fn buy(label: &str, item_key: &str, price: u64) -> PawnshopItem {
    PawnshopItem {
        name: Some(label.to_string()),
        key: item_key.to_string(),
        price,
    }
}

fn sell(label: &str, item: ItemRef, cost: ShopCost, quantity: u32) -> ShopItem {
    ShopItem {
        name: label.to_string(),
        item,
        cost,
        quantity,
    }
}

// Armor and food counters hand out the item named like the trade itself.
fn exchange(label: &str, ticket: &str) -> ShopItem {
    sell(label, name(label), ShopCost::Item(ticket.to_string()), 1)
}

fn quest(label: &str, requirement: ItemRef, amount: u32, reward: QuestReward) -> QuestDefinition {
    QuestDefinition {
        name: label.to_string(),
        requirement,
        amount,
        reward,
    }
}

fn lottery_tickets(label: &str, item_key: &str, amount: u32, tickets: u32) -> QuestDefinition {
    quest(label, key(item_key), amount, QuestReward::LotteryTickets(tickets))
}

fn reward_item(item_name: Option<&str>) -> QuestReward {
    QuestReward::Item(item_name.map(str::to_string))
}

fn shop(shop_name: &str, description: Option<&str>, items: Vec<ShopItem>) -> Shop {
    Shop {
        name: shop_name.to_string(),
        description: description.map(str::to_string),
        items,
    }
}

fn rarity(rarity_name: &str, probability: u32, items: Vec<ItemRef>) -> RarityDefinition {
    RarityDefinition {
        name: rarity_name.to_string(),
        probability,
        items,
    }
}

const ARMOR_TICKET: &str = "防具チケット";
const MEAL_TICKET: &str = "お食事券";

impl Catalog {
    /// The trade, quest and lottery tables of the 2025 winter server.
    pub fn builtin() -> Catalog {
        Catalog {
            pawnshop: pawnshop(),
            shops: shops(),
            armor_shops: armor_shops(),
            restaurant_shops: restaurant_shops(),
            quest_patches: quest_patches(),
            quests: quests(),
            armor_quests: armor_quests(),
            lottery: lottery(),
        }
    }
}

fn pawnshop() -> Vec<PawnshopCategory> {
    vec![
        PawnshopCategory {
            category: "買取屋(鉱石)".to_string(),
            items: vec![
                buy("原銅ブロック", "minecraft:raw_copper_block", 10),
                buy("原金ブロック", "minecraft:raw_gold_block", 300),
                buy("ダイヤ", "minecraft:diamond", 1000),
                buy("レッドストーンブロック", "minecraft:redstone_block", 100),
                buy("ラピスラズリブロック", "minecraft:lapis_block", 100),
                buy("ネザーラック", "minecraft:netherrack", 1),
                buy("丸石", "minecraft:cobblestone", 1),
                buy("荒れた深層岩", "minecraft:cobbled_deepslate", 1),
            ],
        },
        PawnshopCategory {
            category: "買取屋(農作物)".to_string(),
            items: vec![
                buy("人参", "minecraft:carrot", 2),
                buy("じゃがいも", "minecraft:potato", 2),
                buy("俵", "minecraft:hay_block", 100),
                buy("ビートルート", "minecraft:beetroot", 10),
                buy("青い目のジャガイモ", "minecraft:poisonous_potato", 100),
            ],
        },
        PawnshopCategory {
            category: "買取屋(水産物)".to_string(),
            items: vec![
                buy("タラ", "minecraft:cod", 10),
                buy("鮭", "minecraft:salmon", 10),
                buy("フグ", "minecraft:pufferfish", 50),
                buy("熱帯魚", "minecraft:tropical_fish", 50),
            ],
        },
        PawnshopCategory {
            category: "買取屋(レア)".to_string(),
            items: vec![
                buy("エンチャント金リンゴ", "minecraft:enchanted_golden_apple", 30000),
                buy("海の心", "minecraft:heart_of_the_sea", 10000),
            ],
        },
    ]
}

fn shops() -> Vec<Shop> {
    use crate::catalog::ShopCost::{Price, Tickets};

    vec![
        shop(
            "雑貨屋",
            None,
            vec![
                sell("シュルカーボックス", key("minecraft:shulker_box"), Price(100000), 1),
                sell("バンドル", key("minecraft:bundle"), Price(500), 1),
                sell("額縁", key("minecraft:item_frame"), Price(100), 1),
                sell("蝋燭(白)", key("minecraft:white_candle"), Price(100), 1),
                sell("ランタン", key("minecraft:lantern"), Price(100), 1),
            ],
        ),
        shop(
            "武器・防具屋",
            None,
            vec![
                sell("弓 (耐久Ⅲ)", name("unbreakingBow"), Price(1000), 1),
                sell("矢 ×64", key("minecraft:arrow"), Price(500), 64),
                sell("トライデント", key("minecraft:trident"), Price(5000), 1),
                sell("メイス", key("minecraft:mace"), Price(50000), 1),
            ],
        ),
        shop(
            "本屋",
            None,
            vec![
                sell("エンチャ本 (耐久Ⅲ)", name("unbreaking"), Price(5000), 1),
                sell("エンチャ本 (鋭さV)", name("sharpness"), Price(5000), 1),
                sell("エンチャ本 (幸運Ⅲ)", name("fortune"), Price(10000), 1),
                sell("エンチャ本 (効率強化V)", name("efficiency"), Price(10000), 1),
            ],
        ),
        shop(
            "海晶屋",
            None,
            vec![
                sell("海晶ブロック ×64", key("minecraft:prismarine"), Price(3000), 64),
                sell("暗海晶ブロック ×64", key("minecraft:dark_prismarine"), Price(3000), 64),
                sell("シーランタン ×1", key("minecraft:sea_lantern"), Price(1000), 1),
            ],
        ),
        shop(
            "ツールチケット交換所",
            Some("ツールチケットで１つと交換"),
            vec![
                sell("幸運ダイヤピッケル", name("luckPick"), Tickets(1), 1),
                sell("効率強化ダイヤピッケル", name("efficiencyPick"), Tickets(1), 1),
                sell("効率強化ダイヤ斧", name("efficiencyAxe"), Tickets(1), 1),
                sell("効率強化ダイヤシャベル", name("efficiencyShovel"), Tickets(1), 1),
            ],
        ),
        shop(
            "武器チケット交換所",
            Some("武器チケットで1つと交換"),
            vec![
                sell("ダイヤ剣 (虫特効Ⅵ)", name("baneOfArthropodsSword"), Tickets(1), 1),
                sell("ダイヤ剣 (アンデット特効Ⅵ)", name("smiteSword"), Tickets(1), 1),
                sell("ダイヤ剣 (ノックバックX)", name("knockbackSword"), Tickets(1), 1),
                sell("弓 (ノックバックX)", name("knockbackBow"), Tickets(1), 1),
            ],
        ),
    ]
}

fn armor_shops() -> Vec<Shop> {
    vec![shop(
        "防具交換所 (無制限)",
        Some("防具チケット枚で交換"),
        vec![
            exchange("ダイヤのヘルメット(水中呼吸 III)", ARMOR_TICKET),
            exchange("ダイヤのヘルメット(水中呼吸 I)", ARMOR_TICKET),
            exchange("ダイヤのブーツ(水中歩行 III)", ARMOR_TICKET),
        ],
    )]
}

fn restaurant_shops() -> Vec<Shop> {
    vec![shop(
        "お食事処",
        Some("お食事券1枚と交換"),
        vec![
            exchange("鉱夫じゃがいも", MEAL_TICKET),
            exchange("爆速スープ", MEAL_TICKET),
            exchange("マグマパイ", MEAL_TICKET),
        ],
    )]
}

fn quest_patches() -> Vec<QuestPatchGroup> {
    vec![
        QuestPatchGroup {
            id: 1,
            difficulty: "★ (初級)".to_string(),
            list: vec![
                lottery_tickets("ケーキ", "minecraft:cake", 1, 1),
                lottery_tickets("ビートルート", "minecraft:beetroot", 16, 1),
                lottery_tickets("パンプキンパイ", "minecraft:pumpkin_pie", 1, 1),
                lottery_tickets("クッキー", "minecraft:cookie", 16, 1),
            ],
        },
        QuestPatchGroup {
            id: 2,
            difficulty: "★★ (中級)".to_string(),
            list: vec![
                lottery_tickets("熱帯魚", "minecraft:tropical_fish", 16, 2),
                lottery_tickets("鱈", "minecraft:cod", 64, 2),
                lottery_tickets("鮭", "minecraft:salmon", 64, 2),
                lottery_tickets("うさぎの皮", "minecraft:rabbit_hide", 4, 2),
                lottery_tickets("青緑の染料", "minecraft:cyan_dye", 16, 2),
            ],
        },
        QuestPatchGroup {
            id: 3,
            difficulty: "★★★ (上級)".to_string(),
            list: vec![
                lottery_tickets("古代の残骸", "minecraft:ancient_debris", 1, 3),
                lottery_tickets("エンドクリスタル", "minecraft:end_crystal", 1, 3),
            ],
        },
    ]
}

fn quests() -> Vec<QuestGroup> {
    vec![
        QuestGroup {
            difficulty: "★ (初級)".to_string(),
            list: vec![
                lottery_tickets("街のお掃除", "minecraft:oak_leaves", 64, 1),
                lottery_tickets("珍味？", "minecraft:golden_apple", 1, 1),
                lottery_tickets("ダイヤ発見記念", "minecraft:diamond", 1, 1),
                lottery_tickets("アメジスト発見記念", "minecraft:amethyst_block", 10, 1),
                lottery_tickets("スローライフ", "minecraft:salmon", 16, 1),
                lottery_tickets("モンスターハンター", "minecraft:rotten_flesh", 16, 1),
                lottery_tickets("雪だるま", "minecraft:snow_block", 2, 1),
            ],
        },
        QuestGroup {
            difficulty: "★★ (中級)".to_string(),
            list: vec![
                lottery_tickets("リッチな昼食", "minecraft:rabbit_stew", 1, 2),
                lottery_tickets("硬くて溶けない氷", "minecraft:packed_ice", 1, 2),
                lottery_tickets("ブヨブヨしてる緑な奴", "minecraft:slime_block", 4, 2),
                lottery_tickets("ブヨブヨしてる甘い奴", "minecraft:honey_block", 4, 2),
            ],
        },
        QuestGroup {
            difficulty: "★★★ (上級)".to_string(),
            list: vec![
                lottery_tickets("うさぎ討伐隊", "minecraft:rabbit_foot", 4, 3),
                lottery_tickets("お豆腐屋さん", "minecraft:dried_ghast", 3, 3),
                lottery_tickets("イカしたフィスを探せ", "minecraft:wither_skeleton_skull", 1, 3),
                lottery_tickets("ホットな羽付き大会", "minecraft:ghast_tear", 3, 3),
            ],
        },
        QuestGroup {
            difficulty: "特別クエスト".to_string(),
            list: vec![
                // Pickaxe repair reward not decided yet.
                quest("ブラック鉱夫", key("minecraft:obsidian"), 32, reward_item(None)),
                quest(
                    "赤くてデカくなるアレ",
                    key("minecraft:red_mushroom"),
                    32,
                    reward_item(Some("health_boost_1")),
                ),
                quest(
                    "目指せ太公望",
                    key("minecraft:pufferfish"),
                    64,
                    reward_item(Some("fishingRod")),
                ),
                // Turtle shell reward not decided yet.
                quest("追尾しない方の甲羅", key("minecraft:nautilus_shell"), 3, reward_item(None)),
            ],
        },
    ]
}

fn armor_quests() -> Vec<QuestGroup> {
    let armor = [
        "ダイヤのヘルメット(防護V、耐久V)",
        "ダイヤのチェストプレート(防護V、耐久V)",
        "ダイヤのレギンス(防護V、耐久V)",
        "ダイヤのブーツ(防護V、耐久V)",
    ];

    vec![QuestGroup {
        difficulty: "防具交換 (初回限定)".to_string(),
        list: armor
            .into_iter()
            .map(|piece| quest(piece, name(ARMOR_TICKET), 1, reward_item(Some(piece))))
            .collect(),
    }]
}

fn lottery() -> LotteryDefinition {
    LotteryDefinition {
        name: "通常福引".to_string(),
        rarities: vec![
            // The losing ticket is a custom item that is not in the dump yet.
            rarity("ハズレ", 70, Vec::new()),
            rarity(
                "当たり",
                24,
                vec![
                    key("minecraft:sponge"),
                    key("minecraft:diamond_block"),
                    key("minecraft:gold_block"),
                    key("minecraft:iron_block"),
                    key("minecraft:totem_of_undying"),
                    key("minecraft:experience_bottle"),
                ],
            ),
            rarity(
                "大当たり",
                5,
                vec![key("minecraft:shulker_box"), name("mending")],
            ),
            rarity(
                "アクセサリー",
                1,
                [
                    "health_boost_1",
                    "health_boost_2",
                    "health_boost_3",
                    "speed_boost_1",
                    "haste_boost_2",
                    "jump_boost_2",
                    "slow_falling",
                    "fire_resistance",
                    "night_vision",
                    "infinite_pearl",
                    "petapeta",
                    "jumpkun",
                ]
                .into_iter()
                .map(name)
                .collect(),
            ),
        ],
    }
}
