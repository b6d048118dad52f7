use iced::widget::{button, container};
use iced::{Background, Border, Color, Shadow, Theme, Vector};

use crate::models::Kind;

// Zen Theme Colors
pub const ZEN_BG: Color = Color::from_rgb(0.992, 0.988, 0.973); // #FDFCF8
pub const ZEN_TEXT: Color = Color::from_rgb(0.29, 0.29, 0.29); // #4A4A4A
pub const ZEN_SUBTEXT: Color = Color::from_rgb(0.55, 0.55, 0.55); // #8C8C8C
pub const ZEN_ACCENT: Color = Color::from_rgb(0.545, 0.616, 0.467); // #8B9D77 (Sage)
pub const ZEN_ACCENT_HOVER: Color = Color::from_rgb(0.49, 0.56, 0.41);
pub const ZEN_DESTRUCTIVE: Color = Color::from_rgb(0.831, 0.647, 0.647); // #D4A5A5
pub const ZEN_WARNING: Color = Color::from_rgb(0.871, 0.725, 0.478); // #DEB97A
pub const ZEN_INFO: Color = Color::from_rgb(0.541, 0.655, 0.757); // #8AA7C1

pub fn kind_color(kind: Kind) -> Color {
    match kind {
        Kind::Success => ZEN_ACCENT,
        Kind::Error => ZEN_DESTRUCTIVE,
        Kind::Warning => ZEN_WARNING,
        Kind::Info => ZEN_INFO,
    }
}

pub struct BackgroundStyle;
impl container::StyleSheet for BackgroundStyle {
    type Style = Theme;
    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(ZEN_BG)),
            ..Default::default()
        }
    }
}

/// Card with a kind-colored border, used for toasts.
pub struct ToastStyle(pub Kind);
impl container::StyleSheet for ToastStyle {
    type Style = Theme;
    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(Color::WHITE)),
            border: Border {
                radius: 8.0.into(),
                width: 2.0,
                color: kind_color(self.0),
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.08),
                offset: Vector::new(0.0, 2.0),
                blur_radius: 6.0,
            },
            text_color: Some(ZEN_TEXT),
        }
    }
}

/// Raised card for dialogs.
pub struct DialogStyle;
impl container::StyleSheet for DialogStyle {
    type Style = Theme;
    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(Color::WHITE)),
            border: Border {
                radius: 12.0.into(),
                width: 1.0,
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.05),
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.12),
                offset: Vector::new(0.0, 6.0),
                blur_radius: 16.0,
            },
            text_color: Some(ZEN_TEXT),
        }
    }
}

pub struct PrimaryButtonStyle;
impl button::StyleSheet for PrimaryButtonStyle {
    type Style = Theme;
    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(ZEN_ACCENT)),
            text_color: Color::WHITE,
            border: Border {
                radius: 6.0.into(),
                ..Default::default()
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.1),
                offset: Vector::new(0.0, 2.0),
                blur_radius: 4.0,
            },
            ..Default::default()
        }
    }
    fn hovered(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(ZEN_ACCENT_HOVER)),
            text_color: Color::WHITE,
            border: Border {
                radius: 6.0.into(),
                ..Default::default()
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.15),
                offset: Vector::new(0.0, 3.0),
                blur_radius: 5.0,
            },
            ..Default::default()
        }
    }
    fn pressed(&self, style: &Self::Style) -> button::Appearance {
        self.active(style)
    }
}

pub struct DestructiveButtonStyle;
impl button::StyleSheet for DestructiveButtonStyle {
    type Style = Theme;
    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: None,
            text_color: ZEN_DESTRUCTIVE,
            border: Border {
                radius: 6.0.into(),
                width: 1.0,
                color: ZEN_DESTRUCTIVE,
            },
            ..Default::default()
        }
    }
    fn hovered(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(ZEN_DESTRUCTIVE)),
            text_color: Color::WHITE,
            border: Border {
                radius: 6.0.into(),
                width: 1.0,
                color: ZEN_DESTRUCTIVE,
            },
            ..Default::default()
        }
    }
    fn pressed(&self, style: &Self::Style) -> button::Appearance {
        self.active(style)
    }
}

/// Borderless button for secondary choices and the close glyph.
pub struct QuietButtonStyle;
impl button::StyleSheet for QuietButtonStyle {
    type Style = Theme;
    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: None,
            text_color: ZEN_SUBTEXT,
            border: Border::default(),
            shadow: Shadow::default(),
            ..Default::default()
        }
    }
    fn hovered(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.03))),
            text_color: ZEN_TEXT,
            border: Border {
                radius: 6.0.into(),
                ..Default::default()
            },
            shadow: Shadow::default(),
            ..Default::default()
        }
    }
    fn pressed(&self, style: &Self::Style) -> button::Appearance {
        self.hovered(style)
    }
}
