//! TreeSnap Core Types and Definitions
//!
//! This crate provides the foundational types shared by the TreeSnap parser,
//! layout engine and command-line tool. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Pixel and grid coordinate types ([`geometry`] module)
//! - **Draw**: Connector masks, tiles and draw intents ([`draw`] module)
//! - **Semantic**: Typed records for focus trees, GUI layout, sprite catalogs
//!   and localisation ([`semantic`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod semantic;
