//! Shop Groups
//!
//! Pure partitioning of a cart snapshot by owning shop. Groupings are derived
//! on every call and never persisted; they drive one independent checkout per
//! vendor. Being plain functions over a slice, they are testable without any
//! store or rendering context.

use rustc_hash::FxHashMap;
use smallvec::{SmallVec, smallvec};

use crate::{cart::CartEntry, products::ShopId};

/// The subset of cart entries belonging to one shop, in snapshot order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopGroup {
    shop_id: ShopId,
    items: SmallVec<[CartEntry; 8]>,
}

impl ShopGroup {
    /// The owning shop's identifier.
    #[must_use]
    pub fn shop_id(&self) -> &ShopId {
        &self.shop_id
    }

    /// The entries in this group, in their original snapshot order.
    #[must_use]
    pub fn items(&self) -> &[CartEntry] {
        &self.items
    }

    /// Iterate over the entries in this group.
    pub fn iter(&self) -> impl Iterator<Item = &CartEntry> {
        self.items.iter()
    }

    /// Sum of price times quantity over this group, in minor units.
    #[must_use]
    pub fn subtotal(&self) -> i64 {
        self.items.iter().map(CartEntry::line_total).sum()
    }

    /// Number of entries in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Partition cart entries by owning shop.
///
/// Groups appear in order of each shop's first entry, and entries keep their
/// relative order within each group. The union of all groups reproduces the
/// input exactly; a cart spanning N shops yields N groups, each finalized
/// with its own checkout composition.
#[must_use]
pub fn group_by_shop(entries: &[CartEntry]) -> Vec<ShopGroup> {
    let mut positions: FxHashMap<ShopId, usize> = FxHashMap::default();
    let mut groups: Vec<ShopGroup> = Vec::new();

    for entry in entries {
        let shop_id = &entry.product().shop_id;

        if let Some(&at) = positions.get(shop_id) {
            if let Some(group) = groups.get_mut(at) {
                group.items.push(entry.clone());
            }
        } else {
            positions.insert(shop_id.clone(), groups.len());

            groups.push(ShopGroup {
                shop_id: shop_id.clone(),
                items: smallvec![entry.clone()],
            });
        }
    }

    groups
}
