//! `data_ptrs.h` / `data_ptrs.c`: the runtime's entry points into the banks.

use std::fmt::Write;
use std::ops::Range;

use tilebank_core::Direction;

use super::{MusicTrack, STRING_RECORD_WIDTH, hex8, hex16};
use crate::bank::Pointer;

/// Where the player starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StartScene {
    /// Scene pool index.
    pub index: usize,
    pub x: u8,
    pub y: u8,
    pub direction: Direction,
}

/// Placement of the fixed interface assets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiPointers {
    pub ui: Pointer,
    pub font: Pointer,
    pub frame: Pointer,
    pub emotes: Pointer,
}

/// Per-pool pointer tables, in pool order.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerTables<'a> {
    pub tilesets: &'a [Pointer],
    pub images: &'a [Pointer],
    pub sprites: &'a [Pointer],
    pub scenes: &'a [Pointer],
}

impl<'a> PointerTables<'a> {
    fn named(&self) -> [(&'static str, &'a [Pointer]); 4] {
        [
            ("tileset_bank_ptrs", self.tilesets),
            ("image_bank_ptrs", self.images),
            ("sprite_bank_ptrs", self.sprites),
            ("scene_bank_ptrs", self.scenes),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct DataPtrs<'a> {
    pub start: StartScene,
    /// Sprite pool index of the player.
    pub player_sprite: usize,
    pub ui: UiPointers,
    pub tables: PointerTables<'a>,
    pub music: &'a [MusicTrack],
    pub flag_count: usize,
    pub string_banks: &'a [u8],
    /// Bank numbers holding allocator data.
    pub data_banks: Range<usize>,
    /// First bank number given to this compile.
    pub bank_offset: u8,
}

pub fn data_ptrs_header(data: &DataPtrs<'_>) -> String {
    let start = &data.start;
    let (dir_x, dir_y) = start.direction.unit_offset();
    let ui = &data.ui;
    let start_index = u16::try_from(start.index).unwrap_or(u16::MAX);

    let mut out = String::new();
    out.push_str("#ifndef DATA_PTRS_H\n#define DATA_PTRS_H\n\n");
    out.push_str("typedef struct _BANK_PTR {\n");
    out.push_str("  unsigned char bank;\n");
    out.push_str("  unsigned int offset;\n");
    out.push_str("} BANK_PTR;\n\n");

    writeln!(out, "#define START_SCENE_INDEX {}", hex16(start_index)).unwrap();
    writeln!(out, "#define START_SCENE_X {}", hex8(start.x)).unwrap();
    writeln!(out, "#define START_SCENE_Y {}", hex8(start.y)).unwrap();
    writeln!(out, "#define START_SCENE_DIR_X {dir_x}").unwrap();
    writeln!(out, "#define START_SCENE_DIR_Y {dir_y}").unwrap();
    writeln!(out, "#define START_PLAYER_SPRITE {}", data.player_sprite).unwrap();
    for (name, pointer) in [
        ("UI", ui.ui),
        ("FONT", ui.font),
        ("FRAME", ui.frame),
        ("EMOTES_SPRITE", ui.emotes),
    ] {
        writeln!(out, "#define {name}_BANK {}", pointer.bank).unwrap();
        writeln!(out, "#define {name}_BANK_OFFSET {}", pointer.offset).unwrap();
    }
    out.push('\n');

    for (name, _) in data.tables.named() {
        writeln!(out, "extern const BANK_PTR {name}[];").unwrap();
    }
    out.push_str("extern const unsigned char (*bank_data_ptrs[])[];\n");
    out.push_str("extern const unsigned char * music_tracks[];\n");
    out.push_str("extern const unsigned char music_banks[];\n");
    writeln!(out, "extern unsigned char script_flags[{}];", data.flag_count + 1).unwrap();
    for bank in data.string_banks {
        writeln!(
            out,
            "extern const unsigned char strings_{bank}[][{STRING_RECORD_WIDTH}];"
        )
        .unwrap();
    }
    for track in data.music {
        writeln!(out, "extern const unsigned char * {}_Data[];", track.data_name).unwrap();
    }
    out.push_str("\n#endif\n");
    out
}

pub fn data_ptrs_source(data: &DataPtrs<'_>) -> String {
    let mut out = String::new();
    writeln!(out, "#pragma bank={}", data.bank_offset.saturating_sub(1)).unwrap();
    out.push_str("#include \"data_ptrs.h\"\n");
    out.push_str("#include \"banks.h\"\n\n");

    let bank_ptrs: Vec<String> = (0..data.data_banks.end)
        .map(|bank| {
            if data.data_banks.contains(&bank) {
                format!("&bank_{bank}_data")
            } else {
                "0".to_string()
            }
        })
        .collect();
    out.push_str("const unsigned char (*bank_data_ptrs[])[] = {\n");
    out.push_str(&bank_ptrs.join(","));
    out.push_str("\n};\n\n");

    let tables: Vec<String> = data
        .tables
        .named()
        .into_iter()
        .map(|(name, pointers)| {
            let entries: Vec<String> = pad_table(pointers)
                .into_iter()
                .map(pointer_literal)
                .collect();
            format!("const BANK_PTR {name}[] = {{\n{}\n}};\n", entries.join(","))
        })
        .collect();
    out.push_str(&tables.join("\n"));
    out.push('\n');

    let tracks: Vec<String> = data
        .music
        .iter()
        .map(|track| format!("{}_Data", track.data_name))
        .collect();
    let banks: Vec<String> = data.music.iter().map(|track| track.bank.to_string()).collect();
    writeln!(
        out,
        "const unsigned char * music_tracks[] = {{\n{}\n}};\n",
        tracks.join(", ")
    )
    .unwrap();
    writeln!(
        out,
        "const unsigned char music_banks[] = {{\n{}\n}};\n",
        banks.join(", ")
    )
    .unwrap();
    writeln!(
        out,
        "unsigned char script_flags[{}] = {{ 0 }};",
        data.flag_count + 1
    )
    .unwrap();
    out
}

/// An empty table gets one placeholder entry so the C array stays
/// non-empty.
fn pad_table(pointers: &[Pointer]) -> Vec<Option<Pointer>> {
    if pointers.is_empty() {
        vec![None]
    } else {
        pointers.iter().copied().map(Some).collect()
    }
}

fn pointer_literal(pointer: Option<Pointer>) -> String {
    let Pointer { bank, offset } = pointer.unwrap_or_default();
    format!("{{{},{}}}", hex8(bank), hex16(offset))
}
