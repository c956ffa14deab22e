use tilebank_core::Script;

use super::{EventCompiler, EventContext};
use crate::bank::{BankAllocator, Pointer, place_blob};
use crate::{EntityRef, Error, Result, RetryPlacement};

/// Compile `script` with full context and place it.
///
/// When the blob overflows the cursor bank the script is recompiled with a
/// reduced context. `policy` decides which of the two blobs lands in the
/// new bank.
pub fn place_script(
    compiler: &dyn EventCompiler,
    script: &Script,
    context: &EventContext<'_>,
    banked: &mut BankAllocator,
    policy: RetryPlacement,
    entity: EntityRef,
) -> Result<Pointer> {
    let blob = compiler
        .compile(script, context)
        .map_err(|source| Error::EventCompile {
            entity: entity.clone(),
            source,
        })?;
    if banked.fits(&blob) {
        return place_blob(banked, &blob, entity);
    }

    let blob = match policy {
        RetryPlacement::Original => blob,
        RetryPlacement::Reduced => match compiler.compile(script, &context.reduced()) {
            Ok(reduced) => {
                log::debug!(
                    "{entity}: {} bytes overflow bank, placing reduced blob of {} bytes",
                    blob.len(),
                    reduced.len()
                );
                reduced
            }
            Err(err) => {
                log::debug!("{entity}: reduced compile failed ({err}), placing full blob");
                blob
            }
        },
    };
    place_blob(banked, &blob, entity)
}
