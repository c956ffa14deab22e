use std::collections::HashSet;

use tilebank_core::{AssetEntry, AssetPool, Command, Scene};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsedMusic {
    pub name: String,
    pub filename: String,
    /// Symbol of the compiled track data, `music_track_<index>`.
    pub data_name: String,
}

/// Pool every track a script plays, in catalog order.
///
/// A play command without a track id plays the first catalog entry.
pub fn collect_music(scenes: &[Scene], catalog: &[AssetEntry]) -> AssetPool<String, UsedMusic> {
    let fallback = catalog.first().map(|track| track.id.as_str());
    let mut used: HashSet<String> = HashSet::new();
    for script in scenes.iter().flat_map(Scene::scripts) {
        used = script.fold(used, &mut |mut used: HashSet<String>, command: &Command| {
            let id = match command {
                Command::PlayMusic { music_id } => Some(music_id.as_deref()),
                Command::Custom { args, .. } => args.music_id.as_deref().map(Some),
                _ => None,
            };
            if let Some(id) = id.and_then(|id| id.filter(|id| !id.is_empty()).or(fallback)) {
                used.insert(id.to_string());
            }
            used
        });
    }

    let mut pool = AssetPool::new();
    for track in catalog.iter().filter(|t| used.contains(&t.id)) {
        let data_name = format!("music_track_{}", pool.len());
        pool.insert(
            track.id.clone(),
            UsedMusic {
                name: track.name.clone(),
                filename: track.filename.clone(),
                data_name,
            },
        );
    }
    pool
}
