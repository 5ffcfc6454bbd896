use crate::config::{ColorSpec, ThemeConfig};
use crossterm::style::Color;

impl From<&ColorSpec> for Color {
    fn from(spec: &ColorSpec) -> Self {
        match spec {
            ColorSpec::Rgb(r, g, b) => Color::Rgb {
                r: *r,
                g: *g,
                b: *b,
            },
            ColorSpec::Named(name) => match name.as_str() {
                "Black" => Color::Black,
                "Red" => Color::DarkRed,
                "Green" => Color::DarkGreen,
                "Yellow" => Color::DarkYellow,
                "Blue" => Color::DarkBlue,
                "Magenta" => Color::DarkMagenta,
                "Cyan" => Color::DarkCyan,
                "Gray" => Color::Grey,
                "DarkGray" => Color::DarkGrey,
                "LightRed" => Color::Red,
                "LightGreen" => Color::Green,
                "LightYellow" => Color::Yellow,
                "LightBlue" => Color::Blue,
                "LightMagenta" => Color::Magenta,
                "LightCyan" => Color::Cyan,
                "White" => Color::White,
                // Terminal default foreground
                "Default" | "Reset" => Color::Reset,
                _ => Color::Reset,
            },
        }
    }
}

/// How one scrollback line is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Prompt,
    Error,
    Accent,
    Muted,
    Plain,
}

impl LineStyle {
    /// Pick a style from the line itself; output entries carry no style.
    pub fn classify(text: &str, is_input: bool) -> Self {
        if is_input {
            return LineStyle::Prompt;
        }
        if text.starts_with("Error: ")
            || text.starts_with("command not found: ")
            || text.ends_with(": No such file or directory")
            || text.ends_with(": missing file operand")
            || text.ends_with(": missing search term")
        {
            return LineStyle::Error;
        }
        if text == "AI Response:"
            || text == "Suggested follow-up questions:"
            || text.starts_with("Confidence: ")
        {
            return LineStyle::Accent;
        }
        if text.starts_with("Sources: ") || text.starts_with("Usage: ") {
            return LineStyle::Muted;
        }
        LineStyle::Plain
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub prompt: Color,
    pub error: Color,
    pub accent: Color,
    pub muted: Color,
    pub plain: bool,
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        Self {
            prompt: (&config.prompt).into(),
            error: (&config.error).into(),
            accent: (&config.accent).into(),
            muted: (&config.muted).into(),
            plain: config.plain,
        }
    }

    /// No colors at all, for piped output.
    pub fn monochrome() -> Self {
        Self {
            plain: true,
            ..Self::from_config(&ThemeConfig::default())
        }
    }

    /// Foreground for a line, or `None` to print it unstyled.
    pub fn color_for(&self, style: LineStyle) -> Option<Color> {
        if self.plain {
            return None;
        }
        match style {
            LineStyle::Prompt => Some(self.prompt),
            LineStyle::Error => Some(self.error),
            LineStyle::Accent => Some(self.accent),
            LineStyle::Muted => Some(self.muted),
            LineStyle::Plain => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_and_rgb_colors() {
        assert_eq!(Color::from(&ColorSpec::Named("Green".into())), Color::DarkGreen);
        assert_eq!(Color::from(&ColorSpec::Named("nonsense".into())), Color::Reset);
        assert_eq!(
            Color::from(&ColorSpec::Rgb(1, 2, 3)),
            Color::Rgb { r: 1, g: 2, b: 3 }
        );
    }

    #[test]
    fn test_classify() {
        assert_eq!(LineStyle::classify("ada@portfolio:~ $ ls", true), LineStyle::Prompt);
        assert_eq!(
            LineStyle::classify("cat: x.md: No such file or directory", false),
            LineStyle::Error
        );
        assert_eq!(
            LineStyle::classify("Error: Invalid request parameters.", false),
            LineStyle::Error
        );
        assert_eq!(LineStyle::classify("Confidence: ●●● HIGH", false), LineStyle::Accent);
        assert_eq!(LineStyle::classify("Sources: skills", false), LineStyle::Muted);
        assert_eq!(LineStyle::classify("about.md", false), LineStyle::Plain);
    }

    #[test]
    fn test_monochrome_never_colors() {
        let theme = Theme::monochrome();
        assert_eq!(theme.color_for(LineStyle::Error), None);
        assert_eq!(Theme::default().color_for(LineStyle::Error), Some(Color::DarkRed));
    }
}
