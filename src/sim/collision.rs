//! Contact classification
//!
//! The host reports raw pairs in whatever order its physics engine found
//! them. Pairs are normalized by category first, so Enemy-vs-Player and
//! Player-vs-Enemy end up on the same path.

use super::state::{Category, Contact, EntityRef};

/// A contact the match cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// An enemy touched the ship
    PlayerEnemy { player: EntityRef, enemy: EntityRef },
    /// A bullet touched an enemy
    BulletEnemy { bullet: EntityRef, enemy: EntityRef },
}

/// Classify a contact, or `None` for pairs with no gameplay meaning
pub fn classify(contact: Contact) -> Option<ContactKind> {
    let (first, second) = contact.normalized();
    match (first.category, second.category) {
        (Category::Player, Category::Enemy) => Some(ContactKind::PlayerEnemy {
            player: first.entity,
            enemy: second.entity,
        }),
        (Category::Bullet, Category::Enemy) => Some(ContactKind::BulletEnemy {
            bullet: first.entity,
            enemy: second.entity,
        }),
        _ => None,
    }
}

/// Whether an enemy is still above the boundary where hits start to count
#[inline]
pub fn above_boundary(enemy_y: f32, upper_boundary: f32) -> bool {
    enemy_y > upper_boundary
}
