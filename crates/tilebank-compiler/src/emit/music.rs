use tilebank_core::AssetPool;

use crate::precompile::UsedMusic;

/// A used track and the bank its data is loaded into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MusicTrack {
    pub id: String,
    pub name: String,
    pub filename: String,
    pub data_name: String,
    pub bank: usize,
}

/// Spread tracks round-robin over `slots` banks starting at `first_bank`.
pub fn assign_music_banks(
    music: &AssetPool<String, UsedMusic>,
    first_bank: usize,
    slots: usize,
) -> Vec<MusicTrack> {
    music
        .iter()
        .enumerate()
        .map(|(index, (id, track))| MusicTrack {
            id: id.clone(),
            name: track.name.clone(),
            filename: track.filename.clone(),
            data_name: track.data_name.clone(),
            bank: first_bank + index % slots.max(1),
        })
        .collect()
}
