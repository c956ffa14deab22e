//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use crate::commands::build::BuildArgs;
use crate::commands::pools::PoolsArgs;

pub struct BuildParams {
    pub project_path: PathBuf,
    pub output: PathBuf,
    pub project_root: Option<PathBuf>,
    pub templates: Option<PathBuf>,
    pub bank_size: Option<usize>,
    pub bank_offset: Option<u8>,
    pub strings_per_bank: Option<usize>,
    pub legacy_retry: bool,
    pub verbose: bool,
}

impl BuildParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            project_path: required_path(m, "project_path"),
            output: required_path(m, "output"),
            project_root: m.get_one::<PathBuf>("project_root").cloned(),
            templates: m.get_one::<PathBuf>("templates").cloned(),
            bank_size: m.get_one::<usize>("bank_size").copied(),
            bank_offset: m.get_one::<u8>("bank_offset").copied(),
            strings_per_bank: m.get_one::<usize>("strings_per_bank").copied(),
            legacy_retry: m.get_flag("legacy_retry"),
            verbose: m.get_flag("verbose"),
        }
    }
}

impl From<BuildParams> for BuildArgs {
    fn from(p: BuildParams) -> Self {
        let project_root = resolve_project_root(&p.project_path, p.project_root);
        Self {
            project_path: p.project_path,
            output: p.output,
            project_root,
            templates: p.templates,
            bank_size: p.bank_size,
            bank_offset: p.bank_offset,
            strings_per_bank: p.strings_per_bank,
            legacy_retry: p.legacy_retry,
        }
    }
}

pub struct PoolsParams {
    pub project_path: PathBuf,
    pub project_root: Option<PathBuf>,
    pub templates: Option<PathBuf>,
    pub verbose: bool,
}

impl PoolsParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            project_path: required_path(m, "project_path"),
            project_root: m.get_one::<PathBuf>("project_root").cloned(),
            templates: m.get_one::<PathBuf>("templates").cloned(),
            verbose: m.get_flag("verbose"),
        }
    }
}

impl From<PoolsParams> for PoolsArgs {
    fn from(p: PoolsParams) -> Self {
        let project_root = resolve_project_root(&p.project_path, p.project_root);
        Self {
            project_path: p.project_path,
            project_root,
            templates: p.templates,
        }
    }
}

/// Required and defaulted args are always present once clap accepts the input.
fn required_path(m: &ArgMatches, id: &str) -> PathBuf {
    m.get_one::<PathBuf>(id).cloned().unwrap_or_default()
}

/// Explicit root wins, then the directory holding the project file.
fn resolve_project_root(project_path: &std::path::Path, explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| match project_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    })
}
