// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! This module organizes all UI-related code following a component-based
//! architecture with the Elm-style "state down, messages up" pattern.
//!
//! # Components
//!
//! - [`header`] - Top bar with the expandable venue search
//! - [`venue_search`] - Debounced venue search input
//! - [`event_card`] - Event card (artwork, badges, info, price, actions)
//! - [`event_actions`] - Book / reminder button logic shared by card and drawer
//! - [`event_drawer`] - Detail drawer content
//! - [`drawer`] - Modal drawer state machine and chrome
//! - [`badge`] - Status badges over artwork
//! - [`empty_state`] - "No events found" placeholder
//!
//! # Shared Infrastructure
//!
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`styles`] - Centralized button/container styling
//! - [`theming`] - Light/Dark/System theme mode management
//! - [`icons`] - Embedded SVG icons
//! - [`widgets`] - Custom widgets (animated spinner)

pub mod badge;
pub mod design_tokens;
pub mod drawer;
pub mod empty_state;
pub mod event_actions;
pub mod event_card;
pub mod event_drawer;
pub mod header;
pub mod icons;
pub mod styles;
pub mod theming;
pub mod venue_search;
pub mod widgets;
