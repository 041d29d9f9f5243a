use serde::Deserialize;

/// Category/mask/group filtering with the same rules as Box2D fixtures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(default)]
pub struct CollisionFilter {
    pub category_bits: u16,
    pub mask_bits: u16,
    pub group_index: i16,
}

impl Default for CollisionFilter {
    fn default() -> Self {
        CollisionFilter {
            category_bits: 0x0001,
            mask_bits: 0xFFFF,
            group_index: 0,
        }
    }
}

impl CollisionFilter {
    pub fn new(category_bits: u16, mask_bits: u16, group_index: i16) -> Self {
        CollisionFilter {
            category_bits,
            mask_bits,
            group_index,
        }
    }
    pub fn with_category(mut self, category_bits: u16) -> Self {
        self.category_bits = category_bits;
        self
    }
    pub fn with_mask(mut self, mask_bits: u16) -> Self {
        self.mask_bits = mask_bits;
        self
    }
    pub fn with_group(mut self, group_index: i16) -> Self {
        self.group_index = group_index;
        self
    }
    pub fn should_collide(&self, other: &Self) -> bool {
        if self.group_index == other.group_index && self.group_index != 0 {
            return self.group_index > 0;
        }
        (self.mask_bits & other.category_bits) != 0 && (other.mask_bits & self.category_bits) != 0
    }
}
