use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tilebank_compiler::{
    CachedRasterizer, CommandStreamCompiler, Config, LogObserver, Output, PngRasterizer,
    RetryPlacement, compile,
};

use super::project_loader::load_project;

pub struct BuildArgs {
    pub project_path: PathBuf,
    pub output: PathBuf,
    pub project_root: PathBuf,
    pub templates: Option<PathBuf>,
    pub bank_size: Option<usize>,
    pub bank_offset: Option<u8>,
    pub strings_per_bank: Option<usize>,
    pub legacy_retry: bool,
}

pub fn run(args: BuildArgs) {
    let project = match load_project(&args.project_path) {
        Ok(project) => project,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let config = build_config(&args);
    let rasterizer = CachedRasterizer::new(PngRasterizer::new());
    let output = match compile(
        &project,
        &rasterizer,
        &CommandStreamCompiler,
        &config,
        &mut LogObserver,
    ) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    log::debug!("rasterized {} distinct files", rasterizer.cached_len());

    if let Err(e) = write_artifacts(&args.output, &output) {
        eprintln!("error: failed to write '{}': {}", args.output.display(), e);
        std::process::exit(1);
    }

    print!("{}", render_summary(&output));
}

pub fn build_config(args: &BuildArgs) -> Config {
    let mut config = Config::new().project_root(&args.project_root);
    if let Some(templates) = &args.templates {
        config = config.template_root(templates);
    }
    if let Some(size) = args.bank_size {
        config = config.bank_size(size);
    }
    if let Some(offset) = args.bank_offset {
        config = config.bank_offset(offset);
    }
    if let Some(count) = args.strings_per_bank {
        config = config.strings_per_bank(count);
    }
    if args.legacy_retry {
        config = config.retry_placement(RetryPlacement::Original);
    }
    config
}

/// Write every artifact into `dir`, creating it if needed.
pub fn write_artifacts(dir: &Path, output: &Output) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    for (name, contents) in &output.files {
        fs::write(dir.join(name), contents)?;
    }
    Ok(())
}

pub fn render_summary(output: &Output) -> String {
    let summary = &output.summary;
    let mut out = String::new();

    writeln!(
        out,
        "{} flags, {} strings, {} images ({} tilesets), {} sprites, {} scenes, {} music",
        summary.flags,
        summary.strings,
        summary.images,
        summary.tilesets,
        summary.sprites,
        summary.scenes,
        summary.music
    )
    .unwrap();

    for bank in &summary.string_banks {
        writeln!(out, "bank {:>3}  strings", bank).unwrap();
    }
    for (bank, used) in &summary.data_banks {
        let percent = used * 100 / summary.bank_size.max(1);
        writeln!(
            out,
            "bank {:>3}  {:>5}/{} bytes ({}%)",
            bank, used, summary.bank_size, percent
        )
        .unwrap();
    }
    for track in &output.music {
        writeln!(out, "bank {:>3}  music {}", track.bank, track.data_name).unwrap();
    }
    out
}
