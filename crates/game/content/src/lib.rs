//! Authored game content and the loaders that turn it into running games.
//!
//! Game definitions are plain JSON documents matching the serde shapes in
//! `fable-core::def`. This crate reads them from disk or from the built-in
//! catalog, and seeds a fresh [`fable_core::GameState`] from a definition's
//! start block. Content is data; no game rules live here.

pub mod catalog;
pub mod loaders;

pub use loaders::{new_game, seed_instance, DefinitionLoader, LoadResult};
