use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

use tradegen_core::{
    run, GeneratorError, GeneratorSettings, ARMOR_TRADES_FILE, FOOD_TRADES_FILE, LOTTERY_FILE,
    PAWNSHOP_FILE, QUEST_FILE, QUEST_PATCH_FILE, SHOP_FILE,
};

const ALL_FILES: [&str; 7] = [
    PAWNSHOP_FILE,
    SHOP_FILE,
    QUEST_FILE,
    QUEST_PATCH_FILE,
    LOTTERY_FILE,
    ARMOR_TRADES_FILE,
    FOOD_TRADES_FILE,
];

fn read_json(path: &Path) -> Value {
    let data = fs::read_to_string(path).expect("read output");
    serde_json::from_str(&data).expect("output is JSON")
}

#[test]
fn pawnshop_round_trip_from_catalog_file() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let items_path = dir.path().join("items.json");
    let catalog_path = dir.path().join("catalog.json");
    let out = dir.path().join("json_data");

    fs::write(&items_path, r#"[{"id":7,"key":"minecraft:diamond","is_original":0}]"#)
        .expect("write items");
    fs::write(
        &catalog_path,
        r#"{"pawnshop": [{"category": "買取屋(鉱石)", "items": [
            {"key": "minecraft:diamond", "price": 1000},
            {"key": "minecraft:unobtainium", "price": 5}
        ]}]}"#,
    )
    .expect("write catalog");

    let mut settings = GeneratorSettings::new(&items_path, &out);
    settings.catalog_path = Some(catalog_path);
    let written = run(settings).expect("run succeeds");

    assert_eq!(written.len(), ALL_FILES.len());
    assert_eq!(written[0].entries, 1);

    let pawnshop = read_json(&out.join(PAWNSHOP_FILE));
    assert_eq!(
        pawnshop["store"][0]["trades"],
        json!([{
            "content": "Buy minecraft:diamond",
            "view_item_id": 7,
            "costs": [{"item_id": 7, "quantity": 1}],
            "rewards": [{"price": 1000}]
        }])
    );
    assert_eq!(pawnshop["patch"], json!([]));
    assert_eq!(pawnshop["delete"], json!([]));

    let shop = read_json(&out.join(SHOP_FILE));
    assert_eq!(shop, json!({"store": [], "patch": [], "delete": []}));
}

#[test]
fn builtin_catalog_writes_every_document() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let items_path = dir.path().join("items.json");
    let out = dir.path().join("json_data");

    fs::write(
        &items_path,
        r#"[
            {"id": 1, "key": "minecraft:paper", "is_original": 0},
            {"id": 2, "key": "minecraft:diamond", "is_original": 0},
            {"id": 3, "key": "minecraft:cod", "is_original": 0},
            {"id": 4, "key": "minecraft:sponge", "is_original": 0},
            {"id": 5, "name": "mending", "is_original": 1},
            {"id": 6, "name": "お食事券", "is_original": 1},
            {"id": 7, "name": "爆速スープ", "is_original": 1},
            {"id": 8, "name": "luckPick", "is_original": 1}
        ]"#,
    )
    .expect("write items");

    let settings = GeneratorSettings::new(&items_path, &out);
    run(settings).expect("run succeeds");

    for file in ALL_FILES {
        assert!(out.join(file).is_file(), "{file} should be written");
    }

    let pawnshop = read_json(&out.join(PAWNSHOP_FILE));
    let names: Vec<&str> = pawnshop["store"]
        .as_array()
        .expect("store list")
        .iter()
        .map(|npc| npc["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["買取屋(鉱石)", "買取屋(水産物)"]);

    let shop = read_json(&out.join(SHOP_FILE));
    assert_eq!(shop["store"][0]["name"], json!("ツールチケット交換所"));
    assert_eq!(
        shop["store"][0]["trades"][0]["costs"],
        json!([{"item_id": 1, "quantity": 1}])
    );

    let quest = read_json(&out.join(QUEST_FILE));
    assert_eq!(quest["store"][0]["name"], json!("クエスト (★ (初級))"));
    assert_eq!(quest["store"][0]["trades"][0]["content"], json!("ダイヤ発見記念"));
    assert_eq!(
        quest["store"][0]["trades"][0]["rewards"],
        json!([{"item_id": 1, "quantity": 1}])
    );

    let patch = read_json(&out.join(QUEST_PATCH_FILE));
    assert_eq!(patch["store"], json!([]));
    assert_eq!(patch["patch"][0]["id"], json!(2));
    assert_eq!(
        patch["patch"][0]["add_trades"][0]["rewards"],
        json!([{"item_id": 1532, "quantity": 2}])
    );

    let lottery = read_json(&out.join(LOTTERY_FILE));
    let rarities = lottery["store"][0]["rarities"].as_array().expect("rarities");
    assert_eq!(rarities.len(), 4);
    assert_eq!(rarities[0]["items"], json!([]));
    assert_eq!(rarities[1]["items"], json!([4]));
    assert_eq!(rarities[2]["items"], json!([5]));

    let food = read_json(&out.join(FOOD_TRADES_FILE));
    assert_eq!(food["store"][0]["trades"][0]["view_item_id"], json!(7));

    let armor = read_json(&out.join(ARMOR_TRADES_FILE));
    assert_eq!(armor["store"], json!([]));
}

#[test]
fn output_keeps_non_ascii_text_and_two_space_indent() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let items_path = dir.path().join("items.json");
    let out = dir.path().join("json_data");
    fs::write(&items_path, r#"[{"id": 2, "key": "minecraft:diamond"}]"#).expect("write items");

    run(GeneratorSettings::new(&items_path, &out)).expect("run succeeds");

    let text = fs::read_to_string(out.join(PAWNSHOP_FILE)).expect("read output");
    assert!(text.contains("\"name\": \"買取屋(鉱石)\""));
    assert!(text.starts_with("{\n  \"store\": ["));
}

#[test]
fn malformed_item_catalog_writes_nothing() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let items_path = dir.path().join("items.json");
    let out = dir.path().join("json_data");
    fs::write(&items_path, r#"{"id": 1}"#).expect("write items");

    let err = run(GeneratorSettings::new(&items_path, &out)).expect_err("object is not a list");

    assert!(matches!(err, GeneratorError::Json { .. }));
    assert!(!out.exists());
}

#[test]
fn missing_catalog_file_writes_nothing() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let items_path = dir.path().join("items.json");
    let out = dir.path().join("json_data");
    fs::write(&items_path, "[]").expect("write items");

    let mut settings = GeneratorSettings::new(&items_path, &out);
    settings.catalog_path = Some(dir.path().join("nope.json"));

    let err = run(settings).expect_err("catalog file is missing");
    assert!(matches!(err, GeneratorError::Io(_)));
    assert!(!out.exists());
}
