use std::fmt::Write as _;
use std::path::PathBuf;

use tilebank_compiler::precompile::{Precompiled, precompile};
use tilebank_compiler::{CachedRasterizer, Config, LogObserver, PngRasterizer};

use super::project_loader::load_project;

pub struct PoolsArgs {
    pub project_path: PathBuf,
    pub project_root: PathBuf,
    pub templates: Option<PathBuf>,
}

pub fn run(args: PoolsArgs) {
    let project = match load_project(&args.project_path) {
        Ok(project) => project,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let mut config = Config::new().project_root(&args.project_root);
    if let Some(templates) = &args.templates {
        config = config.template_root(templates);
    }
    let rasterizer = CachedRasterizer::new(PngRasterizer::new());
    let precompiled = match precompile(&project, &rasterizer, &config, &mut LogObserver) {
        Ok(precompiled) => precompiled,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    print!("{}", render_pools(&precompiled));
}

pub fn render_pools(pools: &Precompiled<'_>) -> String {
    let mut out = String::new();

    writeln!(out, "flags ({})", pools.flags.len()).unwrap();
    for (i, flag) in pools.flags.keys().enumerate() {
        writeln!(out, "  {i:>3} {flag}").unwrap();
    }

    writeln!(out, "strings ({})", pools.strings.len()).unwrap();
    for (i, text) in pools.strings.keys().enumerate() {
        writeln!(out, "  {i:>3} {text:?}").unwrap();
    }

    writeln!(out, "tilesets ({})", pools.tilesets.len()).unwrap();
    for (i, tileset) in pools.tilesets.keys().enumerate() {
        writeln!(out, "  {i:>3} {} tiles", tileset.len()).unwrap();
    }

    writeln!(out, "images ({})", pools.images.len()).unwrap();
    for (i, (id, image)) in pools.images.iter().enumerate() {
        writeln!(
            out,
            "  {i:>3} {id} '{}' {}x{} tileset {}",
            image.name, image.width, image.height, image.tileset
        )
        .unwrap();
    }

    writeln!(out, "sprites ({})", pools.sprites.len()).unwrap();
    for (i, (id, sprite)) in pools.sprites.iter().enumerate() {
        let player = if i == pools.player_sprite { " player" } else { "" };
        writeln!(
            out,
            "  {i:>3} {id} '{}' {} frames {:?}{player}",
            sprite.name, sprite.frames, sprite.kind
        )
        .unwrap();
    }

    writeln!(out, "music ({})", pools.music.len()).unwrap();
    for (i, (id, track)) in pools.music.iter().enumerate() {
        writeln!(out, "  {i:>3} {id} '{}' {}", track.name, track.data_name).unwrap();
    }

    writeln!(out, "scenes ({})", pools.scenes.len()).unwrap();
    for (i, scene) in pools.scenes.iter().enumerate() {
        writeln!(
            out,
            "  {i:>3} {} '{}' image {} actors {} triggers {}",
            scene.id(),
            scene.scene.name,
            scene.image,
            scene.actors.len(),
            scene.triggers.len()
        )
        .unwrap();
    }
    out
}
