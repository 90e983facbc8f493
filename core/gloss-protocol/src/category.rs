use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use bitflags::bitflags;

/// Coarse semantic buckets used as one-hot features by the local embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum SemanticCategory {
    Greeting = 0,
    Time = 1,
    Clothing = 2,
    Furniture = 3,
    Device = 4,
    FeelingPositive = 5,
    FeelingNegative = 6,
    Household = 7,
    Accessibility = 8,
    Imagination = 9,
}

impl SemanticCategory {
    pub const COUNT: usize = 10;

    /// Feature-slot order.
    pub const ALL: [SemanticCategory; Self::COUNT] = [
        SemanticCategory::Greeting,
        SemanticCategory::Time,
        SemanticCategory::Clothing,
        SemanticCategory::Furniture,
        SemanticCategory::Device,
        SemanticCategory::FeelingPositive,
        SemanticCategory::FeelingNegative,
        SemanticCategory::Household,
        SemanticCategory::Accessibility,
        SemanticCategory::Imagination,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn flag(self) -> CategoryFlags {
        CategoryFlags::from_bits_truncate(1u16 << (self as u16))
    }
}

bitflags! {
    /// Set of categories whose keywords occur in a piece of text.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct CategoryFlags: u16 {
        const GREETING = 1;
        const TIME = 2;
        const CLOTHING = 4;
        const FURNITURE = 8;
        const DEVICE = 16;
        const FEELING_POSITIVE = 32;
        const FEELING_NEGATIVE = 64;
        const HOUSEHOLD = 128;
        const ACCESSIBILITY = 256;
        const IMAGINATION = 512;
    }
}

impl CategoryFlags {
    /// Iterates the active categories in feature-slot order.
    pub fn categories(self) -> impl Iterator<Item = SemanticCategory> {
        SemanticCategory::ALL
            .into_iter()
            .filter(move |c| self.contains(c.flag()))
    }
}
