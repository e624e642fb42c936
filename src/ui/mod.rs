//! Rendering-layer glue
//!
//! Column metadata, the render snapshot and terminal table output. Nothing
//! in here feeds back into list state except through `ViewEvent`s.

pub mod columns;
pub mod render_state;
pub mod table_display;
