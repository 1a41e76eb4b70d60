//! Terminal styling helpers.
//!
//! Color is used only by the `rich` output format and honours the `NO_COLOR`
//! and `TERM=dumb` conventions.

/// ANSI escape codes used by the rich renderer.
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    /// Bold reverse green badge for flyable routes.
    pub const TAG_OK: &str = "\x1b[1;7;32m";
    /// Bold reverse red badge for routes that cannot be flown.
    pub const TAG_FAIL: &str = "\x1b[1;7;31m";
    /// Bright bold white for airport and aircraft codes.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for labels.
    pub const GRAY: &str = "\x1b[90m";
    /// Green for income figures.
    pub const GREEN: &str = "\x1b[32m";
    /// Cyan for distances.
    pub const CYAN: &str = "\x1b[36m";
}

/// Resolved color codes, either ANSI sequences or empty strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub tag_ok: &'static str,
    pub tag_fail: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub green: &'static str,
    pub cyan: &'static str,
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            tag_ok: colors::TAG_OK,
            tag_fail: colors::TAG_FAIL,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            green: colors::GREEN,
            cyan: colors::CYAN,
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            tag_ok: "",
            tag_fail: "",
            white_bold: "",
            gray: "",
            green: "",
            cyan: "",
        }
    }

    /// `colored()` when the terminal accepts ANSI codes, otherwise `plain()`.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// Respects `NO_COLOR` (https://no-color.org/) and `TERM=dumb`.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}

/// Format a number with thousand separators (commas).
///
/// ```
/// # use am4route_cli::terminal::format_with_separators;
/// assert_eq!(format_with_separators(999), "999");
/// assert_eq!(format_with_separators(1000), "1,000");
/// assert_eq!(format_with_separators(1234567), "1,234,567");
/// ```
#[must_use]
pub fn format_with_separators(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Dollar amount rounded to whole units, with separators.
#[must_use]
pub fn format_money(amount: f64) -> String {
    let rounded = amount.round();
    if rounded < 0.0 {
        format!("-${}", format_with_separators(rounded.abs() as u64))
    } else {
        format!("${}", format_with_separators(rounded as u64))
    }
}
