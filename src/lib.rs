// SPDX-License-Identifier: MPL-2.0
//! `gigscope` is a live-event discovery app built with the Iced GUI
//! framework.
//!
//! It browses the DICE ticketing API: paginated event cards, debounced venue
//! search, audio preview playback, session reminders, and a detail drawer,
//! with booking and reminder intents confirmed via native dialogs.

pub mod api;
pub mod app;
pub mod config;
pub mod currency;
pub mod dialogs;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod preview_player;
pub mod ui;
