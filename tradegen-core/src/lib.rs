use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

mod assemble;
mod builtin;
pub mod catalog;
pub mod items;
pub mod request;
pub mod resolve;

pub use assemble::{
    armor_trades_request, build_requests, food_trades_request, lottery_request, pawnshop_request,
    quest_patch_request, quest_request, shop_request, AssemblyContext,
};
pub use catalog::Catalog;
pub use items::{load_items, ItemId, ItemIndex, ItemRecord};
pub use request::RequestSet;
pub use resolve::{ItemRef, LogReporter, MissReporter, RefScheme, Resolver};

pub const DEFAULT_TICKET_ITEM_KEY: &str = "minecraft:paper";
pub const DEFAULT_LOTTERY_TICKET_ITEM_ID: ItemId = 1532;
pub const DEFAULT_BIOME_ID: u32 = 1;
pub const DEFAULT_PROFESSION_ID: u32 = 1;

pub const PAWNSHOP_FILE: &str = "request_pawnshop.json";
pub const SHOP_FILE: &str = "request_shop.json";
pub const QUEST_FILE: &str = "request_quest.json";
pub const QUEST_PATCH_FILE: &str = "request_quest_patch.json";
pub const LOTTERY_FILE: &str = "request_lottery.json";
pub const ARMOR_TRADES_FILE: &str = "request_armor_trades.json";
pub const FOOD_TRADES_FILE: &str = "request_food_trades.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    pub items_path: PathBuf,
    pub output_path: PathBuf,
    pub catalog_path: Option<PathBuf>,
    pub biome_id: u32,
    pub profession_id: u32,
    pub ticket_item_key: String,
    pub lottery_ticket_item_id: ItemId,
}

impl GeneratorSettings {
    pub fn new(items_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            items_path: items_path.into(),
            output_path: output_path.into(),
            catalog_path: None,
            biome_id: DEFAULT_BIOME_ID,
            profession_id: DEFAULT_PROFESSION_ID,
            ticket_item_key: DEFAULT_TICKET_ITEM_KEY.to_string(),
            lottery_ticket_item_id: DEFAULT_LOTTERY_TICKET_ITEM_ID,
        }
    }
}

/// Settings as written in a `--config` file. Every field is optional so the
/// command line can fill in or override any of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsFile {
    pub items_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
    pub biome_id: Option<u32>,
    pub profession_id: Option<u32>,
    pub ticket_item_key: Option<String>,
    pub lottery_ticket_item_id: Option<ItemId>,
}

impl SettingsFile {
    pub fn load(path: &Path) -> Result<SettingsFile> {
        let data = fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(|source| GeneratorError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn into_settings(self) -> Result<GeneratorSettings> {
        let items_path = self
            .items_path
            .ok_or_else(|| GeneratorError::Config("no item catalog path given".to_string()))?;
        let output_path = self
            .output_path
            .ok_or_else(|| GeneratorError::Config("no output directory given".to_string()))?;

        let mut settings = GeneratorSettings::new(items_path, output_path);
        settings.catalog_path = self.catalog_path;
        if let Some(biome_id) = self.biome_id {
            settings.biome_id = biome_id;
        }
        if let Some(profession_id) = self.profession_id {
            settings.profession_id = profession_id;
        }
        if let Some(key) = self.ticket_item_key {
            settings.ticket_item_key = key;
        }
        if let Some(id) = self.lottery_ticket_item_id {
            settings.lottery_ticket_item_id = id;
        }
        Ok(settings)
    }
}

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GeneratorError>;

/// A request file written by [`write_requests`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenDocument {
    pub path: PathBuf,
    pub entries: usize,
}

/// Load the item dump and the catalog, then assemble every request document
/// in memory. Nothing is written.
pub fn generate(settings: &GeneratorSettings, reporter: &dyn MissReporter) -> Result<RequestSet> {
    if !settings.items_path.is_file() {
        return Err(GeneratorError::Config(format!(
            "Item catalog does not exist: {}",
            settings.items_path.display()
        )));
    }

    info!("Loading {}", settings.items_path.display());
    let items = load_items(&settings.items_path)?;
    let index = ItemIndex::build(&items);
    info!(
        "Loaded {} items total ({} unique stock item keys, {} named items)",
        index.item_count(),
        index.key_count(),
        index.name_count()
    );

    let catalog = match &settings.catalog_path {
        Some(path) => {
            info!("Using catalog definitions from {}", path.display());
            Catalog::load(path)?
        }
        None => Catalog::builtin(),
    };

    let resolver = Resolver::new(&index, reporter);
    let ctx = AssemblyContext {
        biome_id: settings.biome_id,
        profession_id: settings.profession_id,
        ticket_item_id: resolver.resolve_key(Some(settings.ticket_item_key.as_str())),
        lottery_ticket_item_id: settings.lottery_ticket_item_id,
    };

    Ok(build_requests(&resolver, &catalog, &ctx))
}

fn write_document<T: Serialize>(output_dir: &Path, file_name: &str, document: &T) -> Result<PathBuf> {
    let path = output_dir.join(file_name);
    let data = serde_json::to_string_pretty(document).map_err(|source| GeneratorError::Json {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, data)?;
    Ok(path)
}

pub fn write_requests(requests: &RequestSet, output_dir: &Path) -> Result<Vec<WrittenDocument>> {
    fs::create_dir_all(output_dir)?;

    let mut written = Vec::new();
    let mut record = |path: PathBuf, entries: usize| {
        info!("Created {} with {} entries", path.display(), entries);
        written.push(WrittenDocument { path, entries });
    };

    record(
        write_document(output_dir, PAWNSHOP_FILE, &requests.pawnshop)?,
        requests.pawnshop.entry_count(),
    );
    record(
        write_document(output_dir, SHOP_FILE, &requests.shop)?,
        requests.shop.entry_count(),
    );
    record(
        write_document(output_dir, QUEST_FILE, &requests.quest)?,
        requests.quest.entry_count(),
    );
    record(
        write_document(output_dir, QUEST_PATCH_FILE, &requests.quest_patch)?,
        requests.quest_patch.entry_count(),
    );
    // Counted by rarity; there is always exactly one lottery.
    record(
        write_document(output_dir, LOTTERY_FILE, &requests.lottery)?,
        requests.lottery.store.iter().map(|l| l.rarities.len()).sum(),
    );
    record(
        write_document(output_dir, ARMOR_TRADES_FILE, &requests.armor_trades)?,
        requests.armor_trades.entry_count(),
    );
    record(
        write_document(output_dir, FOOD_TRADES_FILE, &requests.food_trades)?,
        requests.food_trades.entry_count(),
    );

    Ok(written)
}

pub fn run(settings: GeneratorSettings) -> Result<Vec<WrittenDocument>> {
    let requests = generate(&settings, &LogReporter)?;
    let written = write_requests(&requests, &settings.output_path)?;
    info!("Output directory: {}", settings.output_path.display());
    Ok(written)
}
