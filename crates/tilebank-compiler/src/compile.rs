//! Compile entry point.

use indexmap::IndexMap;
use tilebank_core::Project;

use crate::bank::{bank_source, banks_header};
use crate::emit::{
    DataPtrs, MusicTrack, PointerTables, STRING_TEXT_BYTES, StartScene, assign_music_banks,
    chunk_strings, data_ptrs_header, data_ptrs_source, overlong_strings, string_bank_source,
};
use crate::event::EventCompiler;
use crate::link::link;
use crate::observer::{Observer, Stage};
use crate::precompile::precompile;
use crate::raster::Rasterizer;
use crate::{Config, EntityRef, Error, Result};

/// Everything a compile produces.
#[derive(Debug, Clone)]
pub struct Output {
    /// Artifact name to source text, in emission order.
    pub files: IndexMap<String, String>,
    pub music: Vec<MusicTrack>,
    pub summary: Summary,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub bank_size: usize,
    pub string_banks: Vec<u8>,
    /// Bank number and bytes used, per data bank.
    pub data_banks: Vec<(u8, usize)>,
    pub flags: usize,
    pub strings: usize,
    pub images: usize,
    pub tilesets: usize,
    pub sprites: usize,
    pub scenes: usize,
    pub music: usize,
}

/// Compile `project` into banked data and C sources.
///
/// Nothing is returned unless every stage succeeds.
pub fn compile(
    project: &Project,
    rasterizer: &dyn Rasterizer,
    compiler: &dyn EventCompiler,
    config: &Config,
    observer: &mut dyn Observer,
) -> Result<Output> {
    config.validate()?;

    let precompiled = precompile(project, rasterizer, config, observer)?;

    for text in overlong_strings(&precompiled.strings) {
        let message =
            format!("text \"{text}\" is longer than {STRING_TEXT_BYTES} bytes, truncating");
        log::warn!("{message}");
        observer.warning(&message);
    }
    let strings: Vec<String> = precompiled.strings.keys().cloned().collect();
    let string_banks = chunk_strings(&strings, config.bank_offset, config.strings_per_bank)
        .map_err(|bank| Error::OutOfBanks {
            entity: EntityRef::StringTable,
            bank,
        })?;

    let first_data_bank = usize::from(config.bank_offset) + string_banks.len();
    let first_data_bank = u8::try_from(first_data_bank).map_err(|_| Error::OutOfBanks {
        entity: EntityRef::StringTable,
        bank: first_data_bank,
    })?;
    let linked = link(&precompiled, compiler, config, first_data_bank, observer)?;

    observer.progress(Stage::Music);
    let music = assign_music_banks(
        &precompiled.music,
        linked.banked.next_free_bank(),
        config.music_bank_slots,
    );

    let settings = &project.settings;
    let start = StartScene {
        index: precompiled
            .scenes
            .iter()
            .position(|scene| settings.start_scene_id.as_deref() == Some(scene.id()))
            .unwrap_or(0),
        x: settings.start_x,
        y: settings.start_y,
        direction: settings.start_direction,
    };
    let string_bank_numbers: Vec<u8> = string_banks.iter().map(|bank| bank.number).collect();
    let data_ptrs = DataPtrs {
        start,
        player_sprite: precompiled.player_sprite,
        ui: linked.ui,
        tables: PointerTables {
            tilesets: &linked.tilesets,
            images: &linked.images,
            sprites: &linked.sprites,
            scenes: &linked.scenes,
        },
        music: &music,
        flag_count: precompiled.flags.len(),
        string_banks: &string_bank_numbers,
        data_banks: usize::from(first_data_bank)..linked.banked.next_free_bank(),
        bank_offset: config.bank_offset,
    };

    let banks = linked.banked.banks();
    let mut files = IndexMap::new();
    files.insert("data_ptrs.h".to_string(), data_ptrs_header(&data_ptrs));
    files.insert("data_ptrs.c".to_string(), data_ptrs_source(&data_ptrs));
    files.insert("banks.h".to_string(), banks_header(banks));
    for bank in &string_banks {
        files.insert(format!("strings_{}.c", bank.number), string_bank_source(bank));
    }
    for bank in banks {
        files.insert(format!("bank_{}.c", bank.number), bank_source(bank));
    }

    let summary = Summary {
        bank_size: config.bank_size,
        string_banks: string_bank_numbers,
        data_banks: banks.iter().map(|bank| (bank.number, bank.data.len())).collect(),
        flags: precompiled.flags.len(),
        strings: precompiled.strings.len(),
        images: precompiled.images.len(),
        tilesets: precompiled.tilesets.len(),
        sprites: precompiled.sprites.len(),
        scenes: precompiled.scenes.len(),
        music: music.len(),
    };

    observer.progress(Stage::Complete);
    log::info!(
        "emitted {} files: {} string banks, {} data banks",
        files.len(),
        summary.string_banks.len(),
        summary.data_banks.len()
    );

    Ok(Output {
        files,
        music,
        summary,
    })
}
