//! Folds a rule chain into a deduplicated list of target positions.
use std::collections::HashSet;

use glam::Vec3;

use crate::array::chain::ModifierChain;
use crate::error::{Error, Result};
use crate::scene::bounds::resolve_bounds;
use crate::scene::SceneHost;

/// Plans the positions produced by the rule at `rule_index`.
///
/// Base positions come from the preceding active rule, planned recursively
/// from scratch on every call; the head of the chain arrays from the root's
/// own local origin. Positions are local to the chain root and deduplicated
/// by exact equality in first-seen order: stacked rules routinely coincide
/// on the shared origin slot, and duplicates would pile invisible instances
/// on top of each other.
///
/// Fails with [`Error::InactiveRule`] when `rule_index` does not name an
/// active rule, and propagates bounds-resolution failures; the caller treats
/// those as a no-op for the live instances.
pub fn plan_positions(
    chain: &ModifierChain,
    host: &mut dyn SceneHost,
    rule_index: usize,
) -> Result<Vec<Vec3>> {
    let rule = chain
        .rule(rule_index)
        .filter(|rule| rule.is_active())
        .ok_or(Error::InactiveRule { index: rule_index })?;

    let bounds = resolve_bounds(host, chain.template())?;

    let bases = match chain.previous_active(rule_index) {
        Some(previous) => plan_positions(chain, host, previous)?,
        None => vec![Vec3::ZERO],
    };

    let count = rule.count() as usize;
    let mut seen: HashSet<[u32; 3]> = HashSet::with_capacity(bases.len() * count);
    let mut positions = Vec::with_capacity(bases.len() * count);

    for base in bases {
        for index in 0..count {
            let offset = Vec3::from(rule.placement().relative_offset(index, count, &bounds));
            let position = base + offset;
            if seen.insert(position_key(position)) {
                positions.push(position);
            }
        }
    }

    Ok(positions)
}

/// Bit-exact key; distinguishes 0.0 from -0.0, which is what "exact
/// equality" means for coincidence of generated points.
fn position_key(position: Vec3) -> [u32; 3] {
    [
        position.x.to_bits(),
        position.y.to_bits(),
        position.z.to_bits(),
    ]
}
