use tilebank_core::{AssetPool, Command, Scene};

/// Sole entry of the string pool when no script shows text.
pub const NO_STRINGS: &str = "NOSTRINGS";

/// Pool every text payload, in traversal order.
///
/// Empty texts become a single space. The pool is never empty.
pub fn collect_strings(scenes: &[Scene]) -> AssetPool<String> {
    let mut pool = scenes
        .iter()
        .flat_map(Scene::scripts)
        .fold(AssetPool::new(), |pool, script| {
            script.fold(pool, &mut |mut pool: AssetPool<String>, command: &Command| {
                if let Some(text) = text_of(command) {
                    pool.intern(normalize(text));
                }
                pool
            })
        });

    if pool.is_empty() {
        pool.intern(NO_STRINGS.to_string());
    }
    pool
}

/// Pooled form of a text argument.
pub(crate) fn normalize(text: &str) -> String {
    if text.is_empty() {
        " ".to_string()
    } else {
        text.to_string()
    }
}

fn text_of(command: &Command) -> Option<&str> {
    match command {
        Command::Text { text } => Some(text.as_str()),
        Command::Custom { args, .. } => args.text.as_deref(),
        _ => None,
    }
}
