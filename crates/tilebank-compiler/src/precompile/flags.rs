use tilebank_core::script::DEFAULT_FLAG;
use tilebank_core::{AssetPool, Command, Scene};

/// Pool every flag any script reads or writes, in traversal order.
pub fn collect_flags(scenes: &[Scene]) -> AssetPool<String> {
    scenes
        .iter()
        .flat_map(Scene::scripts)
        .fold(AssetPool::new(), |pool, script| {
            script.fold(pool, &mut |mut pool: AssetPool<String>, command: &Command| {
                if let Some(flag) = flag_of(command) {
                    pool.intern(flag.to_string());
                }
                pool
            })
        })
}

fn flag_of(command: &Command) -> Option<&str> {
    match command {
        Command::SetFlag { flag } | Command::ClearFlag { flag } | Command::IfFlag { flag, .. } => {
            Some(flag.as_str())
        }
        Command::Custom { args, .. } => args
            .flag
            .as_deref()
            .map(|flag| if flag.is_empty() { DEFAULT_FLAG } else { flag }),
        _ => None,
    }
}
