//! # Theme System
//!
//! Provides a centralized color theme system for the explorer.
//!
//! ## Overview
//!
//! The [`Theme`] struct defines all colors used throughout the UI. Rendering
//! code references theme fields instead of hardcoding `ratatui::style::Color`
//! values. The active theme can be cycled at runtime with `t`.
//!
//! ## Built-in Themes
//!
//! - **Gryffindor** (default) - scarlet and gold
//! - **Slytherin** - green and silver
//! - **Ravenclaw** - blue and bronze
//! - **Hufflepuff** - yellow and black
//! - **Catppuccin Mocha** - neutral dark pastel theme

use ratatui::style::Color;

/// All colors used by the TUI, grouped by semantic role.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Human-readable name, also the value stored in the config file.
    pub name: &'static str,

    // -- Background colors --
    /// Main background color for panels.
    pub bg: Color,

    // -- Foreground / text colors --
    /// Primary text color (card titles, input text).
    pub fg: Color,
    /// Muted/secondary text (labels, hints, footer).
    pub fg_dim: Color,

    // -- Accent / brand colors --
    /// Primary accent used for the header, focused borders and the active tab.
    pub accent: Color,
    /// Secondary accent for card titles and the search cursor.
    pub secondary: Color,

    // -- Semantic status colors --
    /// Loading indicator.
    pub success: Color,
    /// Error messages and "no results" notices.
    pub error: Color,

    // -- Selection --
    /// Background of the selected result row.
    pub selection_bg: Color,
}

impl Theme {
    /// Return the list of all built-in themes (order = cycle order).
    pub fn all() -> &'static [Theme] {
        &BUILT_IN_THEMES
    }

    /// Find a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        BUILT_IN_THEMES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Return the default theme (Gryffindor).
    pub fn default_theme() -> &'static Theme {
        &BUILT_IN_THEMES[0]
    }

    /// The theme after this one, wrapping around.
    pub fn next(&self) -> &'static Theme {
        let pos = BUILT_IN_THEMES
            .iter()
            .position(|t| t.name == self.name)
            .unwrap_or(0);
        &BUILT_IN_THEMES[(pos + 1) % BUILT_IN_THEMES.len()]
    }
}

// ---------------------------------------------------------------------------
// Built-in theme definitions
// ---------------------------------------------------------------------------

static BUILT_IN_THEMES: [Theme; 5] = [
    // 0 - Gryffindor (default)
    Theme {
        name: "Gryffindor",
        bg: Color::Rgb(28, 10, 12),
        fg: Color::Rgb(245, 245, 245),
        fg_dim: Color::Rgb(158, 132, 120),
        accent: Color::Rgb(211, 166, 37),    // gold
        secondary: Color::Rgb(238, 186, 48), // light gold
        success: Color::Rgb(166, 227, 161),
        error: Color::Rgb(255, 99, 99),
        selection_bg: Color::Rgb(116, 0, 1), // scarlet
    },
    // 1 - Slytherin
    Theme {
        name: "Slytherin",
        bg: Color::Rgb(10, 24, 16),
        fg: Color::Rgb(226, 232, 228),
        fg_dim: Color::Rgb(110, 128, 118),
        accent: Color::Rgb(42, 157, 85),      // green
        secondary: Color::Rgb(170, 170, 170), // silver
        success: Color::Rgb(120, 200, 140),
        error: Color::Rgb(230, 90, 90),
        selection_bg: Color::Rgb(26, 71, 42),
    },
    // 2 - Ravenclaw
    Theme {
        name: "Ravenclaw",
        bg: Color::Rgb(12, 18, 36),
        fg: Color::Rgb(222, 228, 245),
        fg_dim: Color::Rgb(110, 120, 150),
        accent: Color::Rgb(92, 130, 220),    // blue
        secondary: Color::Rgb(205, 127, 50), // bronze
        success: Color::Rgb(140, 200, 160),
        error: Color::Rgb(235, 100, 110),
        selection_bg: Color::Rgb(14, 26, 64),
    },
    // 3 - Hufflepuff
    Theme {
        name: "Hufflepuff",
        bg: Color::Rgb(20, 18, 12),
        fg: Color::Rgb(240, 234, 214),
        fg_dim: Color::Rgb(140, 128, 100),
        accent: Color::Rgb(236, 185, 57),     // yellow
        secondary: Color::Rgb(255, 219, 0),   // canary
        success: Color::Rgb(160, 210, 120),
        error: Color::Rgb(240, 96, 80),
        selection_bg: Color::Rgb(55, 46, 41), // badger
    },
    // 4 - Catppuccin Mocha
    Theme {
        name: "Catppuccin Mocha",
        bg: Color::Rgb(30, 30, 46),           // base
        fg: Color::Rgb(205, 214, 244),        // text
        fg_dim: Color::Rgb(108, 112, 134),    // overlay0
        accent: Color::Rgb(137, 180, 250),    // blue
        secondary: Color::Rgb(249, 226, 175), // yellow
        success: Color::Rgb(166, 227, 161),   // green
        error: Color::Rgb(243, 139, 168),     // red
        selection_bg: Color::Rgb(69, 71, 90), // surface1
    },
];
