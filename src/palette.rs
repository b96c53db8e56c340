//! Colours of the explainer: edge types, groups, sides and the neutral tones.

use crate::{
    classify::edges::EdgeType,
    foundation::core::Rgb8,
    topology::model::{Group, Side},
};

/// Canvas background.
pub const BACKGROUND: Rgb8 = Rgb8::WHITE;
/// Unclassified edges, titles and freshly drawn matrix cells.
pub const INK: Rgb8 = Rgb8::BLACK;
/// Neutral node fill.
pub const NEUTRAL: Rgb8 = Rgb8::GREY;

/// Colour of an edge type.
pub fn edge_color(ty: EdgeType) -> Rgb8 {
    match ty {
        EdgeType::IntraLab => Rgb8::new(0xF7, 0x59, 0x69),
        EdgeType::InterLab => Rgb8::new(0xF9, 0xD3, 0x5A),
        EdgeType::IntraProche => Rgb8::new(0x6E, 0xCC, 0x82),
        EdgeType::InterProche => Rgb8::new(0x5C, 0xAA, 0xEA),
    }
}

/// Final node colour of a group.
pub fn group_color(group: Group) -> Rgb8 {
    match group {
        Group::Sds => Rgb8::new(0xC4, 0xD0, 0x8D),
        Group::Bio => Rgb8::new(0xF2, 0x8B, 0xB6),
        Group::Stat => Rgb8::new(0xE4, 0xC2, 0xB9),
        Group::Mstat => Rgb8::new(0xBD, 0x8E, 0xBF),
        Group::Fam => Rgb8::new(0x85, 0x93, 0xC9),
        Group::Fr => Rgb8::new(0xAC, 0xD8, 0xCF),
        Group::Sfam => Rgb8::new(0x8C, 0xAB, 0xAB),
    }
}

/// Temporary node colour used while grouping by side.
pub fn side_color(side: Side) -> Rgb8 {
    match side {
        Side::Middle => Rgb8::new(0xC5, 0x5F, 0x73),
        Side::Left => Rgb8::new(0xF0, 0xAC, 0x5F),
        Side::Right => Rgb8::new(0xDC, 0x75, 0xCD),
    }
}
