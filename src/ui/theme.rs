use crossterm::style::Color;

/// Design tokens for the Stagehand console.
///
/// All colors, icons and rules used by the UI come from this module.
pub mod colors {
    use super::Color;

    /// #22C55E
    pub const SUCCESS: Color = Color::Green;
    /// #EF4444
    pub const ERROR: Color = Color::Red;
    /// #F59E0B
    pub const WARNING: Color = Color::Yellow;
    /// #06B6D4
    pub const INFO: Color = Color::Cyan;
    /// #6B7280
    pub const DIM: Color = Color::DarkGrey;
    /// Section rules
    pub const ACCENT: Color = Color::Magenta;
}

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const ARROW: &str = "→";
    pub const SIGNAL: &str = "⚡";
    pub const SECTION: &str = "▶";
}

pub mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const WARNING: &str = "[WARN]";
    pub const ARROW: &str = "->";
    pub const SIGNAL: &str = "[SIG]";
    pub const SECTION: &str = ">>>";
}

pub mod rules {
    pub const HEAVY: &str = "═";
    pub const HEAVY_ASCII: &str = "=";
    /// Banner rule width in characters
    pub const WIDTH: usize = 60;
}
