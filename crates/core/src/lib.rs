//! Core client-side banking state engine for Bankview.
//!
//! This crate contains pure state logic with ZERO web or filesystem
//! dependencies. Remote calls and persistence are reached through traits
//! implemented at the IO edge (`bankview-client`).
//!
//! # Modules
//!
//! - `ledger` - Transaction normalization, classified ledger views, summaries
//! - `transfer` - Guarded 3-step money transfer workflow
//! - `session` - Authenticated session state with paired persistence
//! - `notify` - Broadcast queue of short-lived user-facing alerts

pub mod ledger;
pub mod notify;
pub mod session;
pub mod transfer;
