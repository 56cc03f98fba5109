//! Collision detection and perfectly inelastic merging.
//!
//! Pairs are scanned in index order and merges apply immediately. The lower
//! index survives. The absorbed body keeps its slot with `mass = 0`, its
//! position and velocity untouched, unless the collection is compacted.
//!
//! With three or more bodies meeting in one step the outcome depends on the
//! order of the collection.

use crate::simulation::states::{Body, NVec3};

/// When two bodies count as collided.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CollisionMode {
    /// Bit-identical positions (component-wise `==`).
    #[default]
    Exact,
    /// Separation at or below the given distance in meters.
    Threshold(f64),
}

impl CollisionMode {
    pub fn collides(&self, a: &Body, b: &Body) -> bool {
        match *self {
            CollisionMode::Exact => a.coincides_with(b),
            CollisionMode::Threshold(distance) => (a.position - b.position).norm() <= distance,
        }
    }
}

/// One merge: `absorbed` was folded into `survivor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Merge {
    pub survivor: usize,
    pub absorbed: usize,
}

/// Fold `absorbed` into `survivor`, conserving mass and linear momentum.
pub fn merge_pair(survivor: &mut Body, absorbed: &mut Body, mode: CollisionMode) {
    let total = survivor.mass + absorbed.mass;

    if total > 0.0 {
        let momentum: NVec3 = survivor.velocity * survivor.mass + absorbed.velocity * absorbed.mass;
        survivor.velocity = momentum / total;

        if let CollisionMode::Threshold(_) = mode {
            survivor.position =
                (survivor.position * survivor.mass + absorbed.position * absorbed.mass) / total;
        }
    }

    survivor.mass = total;
    absorbed.mass = 0.0;
    absorbed.absorbed = true;
}

/// Scan every unordered pair and merge the ones that collide.
pub fn resolve_collisions(bodies: &mut [Body], mode: CollisionMode) -> Vec<Merge> {
    let mut merges = Vec::new();
    let n = bodies.len();

    for i in 0..n {
        for j in (i + 1)..n {
            if bodies[i].absorbed {
                break;
            }
            if bodies[j].absorbed || !mode.collides(&bodies[i], &bodies[j]) {
                continue;
            }

            let (head, tail) = bodies.split_at_mut(j);
            merge_pair(&mut head[i], &mut tail[0], mode);
            merges.push(Merge {
                survivor: i,
                absorbed: j,
            });
        }
    }

    merges
}

/// Drop absorbed bodies. Returns how many were removed.
pub fn compact(bodies: &mut Vec<Body>) -> usize {
    let before = bodies.len();
    bodies.retain(|b| !b.absorbed);
    before - bodies.len()
}
