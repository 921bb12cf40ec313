//! # Item Placement
//!
//! Scatters swords and health potions onto random floor cells.

use crate::game::{Level, PickupKind};
use crate::generation::{utils, GenerationConfig, RandomSource};
use crate::DelverResult;

/// Places the configured swords, then the potions.
///
/// Returns how many of each were placed. Fewer than requested is fine when
/// the floor runs out.
pub fn place_items(
    level: &mut Level,
    config: &GenerationConfig,
    rng: &mut dyn RandomSource,
) -> DelverResult<(u32, u32)> {
    let swords = place_pickups(level, PickupKind::Sword, config.sword_count, rng)?;
    let potions = place_pickups(level, PickupKind::Potion, config.potion_count, rng)?;
    Ok((swords, potions))
}

/// Places up to `count` pickups, each on a floor cell drawn from the grid as
/// it stands after the previous placement.
pub fn place_pickups(
    level: &mut Level,
    kind: PickupKind,
    count: u32,
    rng: &mut dyn RandomSource,
) -> DelverResult<u32> {
    let mut placed = 0;

    for _ in 0..count {
        let Some(pos) = utils::random_floor_position(level.grid(), rng) else {
            log::debug!("no floor left for {:?} {} of {}", kind, placed + 1, count);
            continue;
        };
        match kind {
            PickupKind::Sword => level.place_sword(pos)?,
            PickupKind::Potion => level.place_potion(pos)?,
        }
        placed += 1;
    }

    Ok(placed)
}
