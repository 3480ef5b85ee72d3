use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
}

/// Guess the background from `COLORFGBG` (`"fg;bg"`, bg 0–6 dark, 7–15 light).
pub fn detect_background() -> BackgroundType {
    background_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

fn background_from_colorfgbg(val: Option<&str>) -> BackgroundType {
    let bg = val
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.parse::<u8>().ok());
    match bg {
        Some(n) if n > 6 => BackgroundType::Light,
        _ => BackgroundType::Dark,
    }
}

/// Base colours a theme is derived from.
struct Palette {
    accent: Color,
    fg: Color,
    fg_alt: Color,
    muted: Color,
    highlight: Color,
    up: Color,
    down: Color,
    emphasis: bool,
    series: [Color; 6],
}

/// Styles used by the dashboard views.
#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub text: Style,
    pub dim: Style,
    pub warning: Style,
    pub error: Style,

    /// Net units above zero.
    pub positive: Style,
    /// Net units below zero.
    pub negative: Style,

    pub table_header: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub table_total: Style,

    /// Line colours assigned to staff members in chart order.
    pub series: Vec<Color>,
}

impl Theme {
    fn from_palette(p: Palette) -> Self {
        let strong = |c: Color| {
            let s = Style::default().fg(c);
            if p.emphasis {
                s.add_modifier(Modifier::BOLD)
            } else {
                s
            }
        };
        Self {
            header: strong(p.accent),
            text: Style::default().fg(p.fg),
            dim: Style::default().fg(p.muted),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),
            positive: Style::default().fg(p.up),
            negative: Style::default().fg(p.down),
            table_header: strong(p.accent),
            table_row: Style::default().fg(p.fg),
            table_row_alt: Style::default().fg(p.fg_alt),
            table_total: strong(p.highlight),
            series: p.series.to_vec(),
        }
    }

    /// For dark terminals; the default.
    pub fn dark() -> Self {
        Self::from_palette(Palette {
            accent: Color::Cyan,
            fg: Color::White,
            fg_alt: Color::Gray,
            muted: Color::DarkGray,
            highlight: Color::Yellow,
            up: Color::Green,
            down: Color::Red,
            emphasis: true,
            series: [
                Color::Cyan,
                Color::Magenta,
                Color::Yellow,
                Color::Green,
                Color::LightBlue,
                Color::LightRed,
            ],
        })
    }

    pub fn light() -> Self {
        Self::from_palette(Palette {
            accent: Color::Blue,
            fg: Color::Black,
            fg_alt: Color::DarkGray,
            muted: Color::Gray,
            highlight: Color::Magenta,
            up: Color::Green,
            down: Color::Red,
            emphasis: true,
            series: [
                Color::Blue,
                Color::Magenta,
                Color::Red,
                Color::Green,
                Color::Cyan,
                Color::DarkGray,
            ],
        })
    }

    /// 8-colour ANSI, no bold.
    pub fn classic() -> Self {
        Self::from_palette(Palette {
            accent: Color::Cyan,
            fg: Color::White,
            fg_alt: Color::Gray,
            muted: Color::DarkGray,
            highlight: Color::Yellow,
            up: Color::Green,
            down: Color::Red,
            emphasis: false,
            series: [
                Color::Cyan,
                Color::Magenta,
                Color::Yellow,
                Color::Green,
                Color::Blue,
                Color::Red,
            ],
        })
    }

    /// Resolve a `--theme` value; `auto` and unknown names follow the
    /// detected background.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => match detect_background() {
                BackgroundType::Light => Self::light(),
                BackgroundType::Dark => Self::dark(),
            },
        }
    }

    /// Style for a net-units value: green up, red down, plain at zero.
    pub fn units_style(&self, value: f64) -> Style {
        match value.partial_cmp(&0.0) {
            Some(std::cmp::Ordering::Greater) => self.positive,
            Some(std::cmp::Ordering::Less) => self.negative,
            _ => self.text,
        }
    }

    /// Colour of the `idx`-th chart series, cycling through the palette.
    pub fn series_color(&self, idx: usize) -> Color {
        match self.series.len() {
            0 => Color::Reset,
            n => self.series[idx % n],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_from_colorfgbg() {
        assert_eq!(background_from_colorfgbg(Some("15;0")), BackgroundType::Dark);
        assert_eq!(background_from_colorfgbg(Some("0;15")), BackgroundType::Light);
        assert_eq!(background_from_colorfgbg(Some("garbage")), BackgroundType::Dark);
        assert_eq!(background_from_colorfgbg(None), BackgroundType::Dark);
    }

    #[test]
    fn test_from_name_known_themes() {
        assert_eq!(Theme::from_name("light").text, Theme::light().text);
        assert_eq!(Theme::from_name("dark").text, Theme::dark().text);
        assert_eq!(Theme::from_name("classic").header, Theme::classic().header);
    }

    #[test]
    fn test_classic_has_no_bold() {
        let classic = Theme::classic();
        assert!(!classic.header.add_modifier.contains(Modifier::BOLD));
        assert!(Theme::dark().header.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_units_style() {
        let theme = Theme::dark();
        assert_eq!(theme.units_style(2.0), theme.positive);
        assert_eq!(theme.units_style(-0.5), theme.negative);
        assert_eq!(theme.units_style(0.0), theme.text);
    }

    #[test]
    fn test_series_color_cycles() {
        let theme = Theme::dark();
        let n = theme.series.len();
        assert_eq!(theme.series_color(0), theme.series_color(n));
        assert_ne!(theme.series_color(0), theme.series_color(1));
    }
}
