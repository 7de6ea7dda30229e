// SPDX-License-Identifier: MPL-2.0
//! Centralized icon module.
//!
//! Icons are white-stroke SVGs embedded at compile time via `include_bytes!`;
//! handles are cached with `OnceLock` so each file is parsed once. Names
//! describe the visual, not the action context (`pin`, not `venue_search`).

use iced::widget::svg::{Handle, Svg};
use std::sync::OnceLock;

/// Macro to define an icon function with a cached handle.
macro_rules! define_icon {
    ($name:ident, $filename:literal, $doc:literal) => {
        #[doc = $doc]
        pub fn $name() -> Svg<'static> {
            static HANDLE: OnceLock<Handle> = OnceLock::new();
            static DATA: &[u8] = include_bytes!(concat!("../../assets/icons/", $filename));
            let handle = HANDLE.get_or_init(|| Handle::from_memory(DATA));
            Svg::new(handle.clone())
        }
    };
}

define_icon!(play, "play.svg", "Solid play triangle.");
define_icon!(pause, "pause.svg", "Two pause bars.");
define_icon!(search, "search.svg", "Magnifying glass.");
define_icon!(close, "close.svg", "Circled X.");
define_icon!(pin, "pin.svg", "Map pin.");

/// Constrains an icon to a square of `size` logical pixels.
pub fn sized(icon: Svg<'static>, size: f32) -> Svg<'static> {
    icon.width(size).height(size)
}
