//! Connector direction masks and the tiles they select.
//!
//! A connector tile is addressed by a five-bit mask: four bits for the sides
//! the tile joins (up, down, left, right) and one bit choosing the solid
//! variant over the dashed one. Only masks joining at least two sides select a
//! tile, which gives 11 shapes in 2 styles.

use std::ops::{BitOr, BitOrAssign};

use crate::{draw::SpriteFrame, identifier::Id};

/// A set of connector directions plus the solid flag.
///
/// # Examples
///
/// ```
/// use treesnap_core::draw::Direction;
///
/// let mut mask = Direction::DOWN | Direction::RIGHT;
/// assert!(!mask.is_solid());
///
/// mask |= Direction::SOLID;
/// assert!(mask.is_solid());
/// assert_eq!(mask.bits(), 26);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Direction(u8);

impl Direction {
    pub const NONE: Direction = Direction(0);
    pub const UP: Direction = Direction(1);
    pub const DOWN: Direction = Direction(2);
    pub const LEFT: Direction = Direction(4);
    pub const RIGHT: Direction = Direction(8);
    pub const SOLID: Direction = Direction(16);

    const SIDES: u8 = 0b0_1111;
    const ALL: u8 = 0b1_1111;

    /// Builds a mask from raw bits. Bits above the solid flag are dropped.
    pub fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL)
    }

    /// Returns the raw mask value.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` if every flag in `other` is set in `self`.
    pub fn contains(self, other: Direction) -> bool {
        self.0 & other.0 == other.0
    }

    /// Sets every flag in `other`.
    pub fn insert(&mut self, other: Direction) {
        self.0 |= other.0;
    }

    /// Returns `true` if the solid flag is set.
    pub fn is_solid(self) -> bool {
        self.contains(Self::SOLID)
    }

    /// Returns `true` if no flag is set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns only the side flags, without the solid flag.
    pub fn sides(self) -> Direction {
        Self(self.0 & Self::SIDES)
    }
}

impl BitOr for Direction {
    type Output = Direction;

    fn bitor(self, rhs: Direction) -> Direction {
        Direction(self.0 | rhs.0)
    }
}

impl BitOrAssign for Direction {
    fn bitor_assign(&mut self, rhs: Direction) {
        self.insert(rhs);
    }
}

/// The geometric shape of a connector tile: the sides it joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LinkShape {
    UpDown,
    UpLeft,
    DownLeft,
    UpDownLeft,
    UpRight,
    DownRight,
    UpDownRight,
    LeftRight,
    UpLeftRight,
    DownLeftRight,
    UpDownLeftRight,
}

impl LinkShape {
    /// Every shape, in mask order.
    pub const ALL: [LinkShape; 11] = [
        LinkShape::UpDown,
        LinkShape::UpLeft,
        LinkShape::DownLeft,
        LinkShape::UpDownLeft,
        LinkShape::UpRight,
        LinkShape::DownRight,
        LinkShape::UpDownRight,
        LinkShape::LeftRight,
        LinkShape::UpLeftRight,
        LinkShape::DownLeftRight,
        LinkShape::UpDownLeftRight,
    ];

    /// Selects the shape joining exactly the sides in `sides`.
    ///
    /// Returns `None` for masks joining fewer than two sides; those have no tile.
    pub fn from_sides(sides: Direction) -> Option<LinkShape> {
        let shape = match sides.sides().bits() {
            3 => LinkShape::UpDown,
            5 => LinkShape::UpLeft,
            6 => LinkShape::DownLeft,
            7 => LinkShape::UpDownLeft,
            9 => LinkShape::UpRight,
            10 => LinkShape::DownRight,
            11 => LinkShape::UpDownRight,
            12 => LinkShape::LeftRight,
            13 => LinkShape::UpLeftRight,
            14 => LinkShape::DownLeftRight,
            15 => LinkShape::UpDownLeftRight,
            _ => return None,
        };
        Some(shape)
    }

    /// Returns the sides joined by this shape.
    pub fn sides(self) -> Direction {
        let bits = match self {
            LinkShape::UpDown => 3,
            LinkShape::UpLeft => 5,
            LinkShape::DownLeft => 6,
            LinkShape::UpDownLeft => 7,
            LinkShape::UpRight => 9,
            LinkShape::DownRight => 10,
            LinkShape::UpDownRight => 11,
            LinkShape::LeftRight => 12,
            LinkShape::UpLeftRight => 13,
            LinkShape::DownLeftRight => 14,
            LinkShape::UpDownLeftRight => 15,
        };
        Direction::from_bits(bits)
    }

    /// Returns the name of the sprite sheet holding this shape.
    pub fn sprite_name(self) -> &'static str {
        match self {
            LinkShape::UpDown => "GFX_focus_link_up_down",
            LinkShape::UpLeft => "GFX_focus_link_up_left",
            LinkShape::DownLeft => "GFX_focus_link_down_left",
            LinkShape::UpDownLeft => "GFX_focus_link_up_down_left",
            LinkShape::UpRight => "GFX_focus_link_up_right",
            LinkShape::DownRight => "GFX_focus_link_down_right",
            LinkShape::UpDownRight => "GFX_focus_link_up_down_right",
            LinkShape::LeftRight => "GFX_focus_link_left_right",
            LinkShape::UpLeftRight => "GFX_focus_link_up_left_right",
            LinkShape::DownLeftRight => "GFX_focus_link_down_left_right",
            LinkShape::UpDownLeftRight => "GFX_focus_link_up_down_left_right",
        }
    }
}

/// Whether a connector is drawn as a continuous or a dashed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LinkStyle {
    /// An optional prerequisite.
    Dashed,
    /// A mandatory prerequisite.
    Solid,
}

impl LinkStyle {
    /// Returns the style encoded in a mask's solid flag.
    pub fn of(mask: Direction) -> Self {
        if mask.is_solid() {
            LinkStyle::Solid
        } else {
            LinkStyle::Dashed
        }
    }

    /// Returns the 1-based frame holding this style in every link sprite sheet.
    pub fn frame(self) -> u32 {
        match self {
            LinkStyle::Solid => 3,
            LinkStyle::Dashed => 4,
        }
    }
}

/// One of the 22 legal connector tiles.
///
/// # Examples
///
/// ```
/// use treesnap_core::draw::{Direction, LinkShape, LinkStyle, LinkTile};
///
/// let tile = LinkTile::from_mask(Direction::from_bits(26)).unwrap();
/// assert_eq!(tile.shape(), LinkShape::DownRight);
/// assert_eq!(tile.style(), LinkStyle::Solid);
///
/// // A single side is not a tile.
/// assert!(LinkTile::from_mask(Direction::UP).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkTile {
    shape: LinkShape,
    style: LinkStyle,
}

impl LinkTile {
    /// Create a tile from a shape and a style.
    pub fn new(shape: LinkShape, style: LinkStyle) -> Self {
        Self { shape, style }
    }

    /// Selects the tile for a mask, or `None` when the mask is not one of the
    /// 22 legal combinations.
    pub fn from_mask(mask: Direction) -> Option<LinkTile> {
        LinkShape::from_sides(mask).map(|shape| Self::new(shape, LinkStyle::of(mask)))
    }

    /// Iterates over all 22 legal tiles, dashed variants first.
    pub fn all() -> impl Iterator<Item = LinkTile> {
        [LinkStyle::Dashed, LinkStyle::Solid]
            .into_iter()
            .flat_map(|style| LinkShape::ALL.into_iter().map(move |shape| Self::new(shape, style)))
    }

    /// Returns the shape of this tile.
    pub fn shape(self) -> LinkShape {
        self.shape
    }

    /// Returns the style of this tile.
    pub fn style(self) -> LinkStyle {
        self.style
    }

    /// Returns the mask that selects this tile.
    pub fn mask(self) -> Direction {
        match self.style {
            LinkStyle::Solid => self.shape.sides() | Direction::SOLID,
            LinkStyle::Dashed => self.shape.sides(),
        }
    }

    /// Returns the sprite frame drawn for this tile.
    pub fn sprite(self) -> SpriteFrame {
        SpriteFrame::new(Id::new(self.shape.sprite_name()), self.style.frame())
    }
}
