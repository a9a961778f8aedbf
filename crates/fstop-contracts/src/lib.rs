//! Data and state for the f-stop prompt composer: the parameter catalog,
//! presets, the form record, target models, persisted history and the
//! session event log.

pub mod catalog;
pub mod chat;
pub mod events;
pub mod form;
pub mod models;
pub mod presets;
pub mod store;
