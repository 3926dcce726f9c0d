//! Long-lived data used by entities and scenes.
//!
//! Overview
//! - `gameconfig` – tuning values and starting progress loaded from INI
//! - `imagestore` – opaque image handles keyed by semantic names
//! - `leveldesc` – pre-parsed level spawn lists and the overworld graph
//! - `progress` – coins, health and unlocked levels for the playthrough
//! - `worldtime` – per-registry simulation time and delta
pub mod gameconfig;
pub mod imagestore;
pub mod leveldesc;
pub mod progress;
pub mod worldtime;
