// File: crates/plotbridge-core/src/theme.rs
// Summary: Built-in color schemes for the style record and the default qualitative colormap.

use crate::geometry::Vec4;
use crate::types::{StyleCol, AUTO_COLOR};

/// Named palettes that fill `PlotStyle::colors`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    /// Every role deduced from the host UI theme.
    #[default]
    Auto,
    Classic,
    Dark,
    Light,
}

pub type Palette = [Vec4; StyleCol::COUNT];

impl ColorScheme {
    pub const fn name(self) -> &'static str {
        match self {
            ColorScheme::Auto => "auto",
            ColorScheme::Classic => "classic",
            ColorScheme::Dark => "dark",
            ColorScheme::Light => "light",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            ColorScheme::Auto => [AUTO_COLOR; StyleCol::COUNT],
            ColorScheme::Classic => classic(),
            ColorScheme::Dark => dark(),
            ColorScheme::Light => light(),
        }
    }
}

// Item colors and axis backgrounds stay auto in every non-auto scheme; they
// follow the colormap and the frame background respectively.
struct Surface {
    frame_bg: Vec4,
    plot_bg: Vec4,
    plot_border: Vec4,
    legend_bg: Vec4,
    legend_border: Vec4,
    text: Vec4,
    axis_grid: Vec4,
    selection: Vec4,
    crosshairs: Vec4,
}

fn build(s: Surface) -> Palette {
    let mut p = [AUTO_COLOR; StyleCol::COUNT];
    p[StyleCol::FrameBg as usize] = s.frame_bg;
    p[StyleCol::PlotBg as usize] = s.plot_bg;
    p[StyleCol::PlotBorder as usize] = s.plot_border;
    p[StyleCol::LegendBg as usize] = s.legend_bg;
    p[StyleCol::LegendBorder as usize] = s.legend_border;
    for role in [StyleCol::LegendText, StyleCol::TitleText, StyleCol::InlayText, StyleCol::AxisText] {
        p[role as usize] = s.text;
    }
    p[StyleCol::AxisGrid as usize] = s.axis_grid;
    p[StyleCol::Selection as usize] = s.selection;
    p[StyleCol::Crosshairs as usize] = s.crosshairs;
    p
}

fn dark() -> Palette {
    build(Surface {
        frame_bg: Vec4::new(1.00, 1.00, 1.00, 0.07),
        plot_bg: Vec4::new(0.00, 0.00, 0.00, 0.50),
        plot_border: Vec4::new(0.43, 0.43, 0.50, 0.50),
        legend_bg: Vec4::new(0.08, 0.08, 0.08, 0.94),
        legend_border: Vec4::new(0.43, 0.43, 0.50, 0.50),
        text: Vec4::new(1.00, 1.00, 1.00, 1.00),
        axis_grid: Vec4::new(1.00, 1.00, 1.00, 0.25),
        selection: Vec4::new(1.00, 0.60, 0.00, 1.00),
        crosshairs: Vec4::new(1.00, 1.00, 1.00, 0.50),
    })
}

fn classic() -> Palette {
    build(Surface {
        frame_bg: Vec4::new(0.43, 0.43, 0.43, 0.39),
        plot_bg: Vec4::new(0.00, 0.00, 0.00, 0.35),
        plot_border: Vec4::new(0.50, 0.50, 0.50, 0.50),
        legend_bg: Vec4::new(0.11, 0.11, 0.14, 0.92),
        legend_border: Vec4::new(0.50, 0.50, 0.50, 0.50),
        text: Vec4::new(0.90, 0.90, 0.90, 1.00),
        axis_grid: Vec4::new(0.90, 0.90, 0.90, 0.25),
        selection: Vec4::new(0.97, 0.97, 0.39, 1.00),
        crosshairs: Vec4::new(0.50, 0.50, 0.50, 0.75),
    })
}

fn light() -> Palette {
    build(Surface {
        frame_bg: Vec4::new(1.00, 1.00, 1.00, 1.00),
        plot_bg: Vec4::new(0.42, 0.57, 1.00, 0.13),
        plot_border: Vec4::new(0.00, 0.00, 0.00, 0.00),
        legend_bg: Vec4::new(1.00, 1.00, 1.00, 0.98),
        legend_border: Vec4::new(0.82, 0.82, 0.82, 0.80),
        text: Vec4::new(0.00, 0.00, 0.00, 1.00),
        axis_grid: Vec4::new(1.00, 1.00, 1.00, 1.00),
        selection: Vec4::new(0.82, 0.64, 0.03, 1.00),
        crosshairs: Vec4::new(0.00, 0.00, 0.00, 0.50),
    })
}

/// Return a list of built-in schemes.
pub fn presets() -> Vec<ColorScheme> {
    vec![ColorScheme::Auto, ColorScheme::Classic, ColorScheme::Dark, ColorScheme::Light]
}

/// Find a scheme by its `name`, falling back to auto.
pub fn find(name: &str) -> ColorScheme {
    for s in presets() { if s.name().eq_ignore_ascii_case(name) { return s; } }
    ColorScheme::Auto
}

const DEEP_RGB8: [(u8, u8, u8); 10] = [
    (76, 114, 176),
    (221, 132, 82),
    (85, 168, 104),
    (196, 78, 82),
    (129, 114, 179),
    (147, 120, 96),
    (218, 139, 195),
    (140, 140, 140),
    (204, 185, 116),
    (100, 181, 205),
];

/// Color assigned to the `index`-th auto-colored item under the default colormap.
pub fn deep_color(index: usize) -> Vec4 {
    let (r, g, b) = DEEP_RGB8[index % DEEP_RGB8.len()];
    Vec4::from_rgb8(r, g, b)
}
