//! Prompt composition and the interactive studio session built on
//! `fstop-contracts`.

pub mod ambiance;
pub mod composer;
pub mod recipe_card;
pub mod studio;

pub use ambiance::{compute_theme, Rgb, Theme};
pub use composer::{compose, OutputSet, Variant};
pub use recipe_card::{export_recipe, RecipeExport};
pub use studio::{prompt_fingerprint, Studio};
