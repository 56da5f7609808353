// File: crates/plotbridge-core/src/types.rs
// Summary: Closed integer enumerations and flag bitmasks shared with the engine, plus sentinel constants.
// Notes:
// - Every enum carries the engine's integer values; `from_raw` is the only way in from the C surface.
// - Flag types are transparent i32 newtypes so unknown bits pass through to the engine untouched.

use crate::error::{Error, Result};
use crate::geometry::Vec4;

/// Sentinel for sizes/weights meaning "deduce from style".
pub const AUTO: f32 = -1.0;
/// Sentinel color meaning "deduce from style/colormap".
pub const AUTO_COLOR: Vec4 = Vec4::new(0.0, 0.0, 0.0, -1.0);

/// Returns true if `c` is the auto sentinel (only the alpha channel is checked, like the engine does).
pub fn is_auto_color(c: Vec4) -> bool {
    c.w == -1.0
}

macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $value:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(i32)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $value ),+
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const COUNT: usize = Self::ALL.len();

            pub const fn as_raw(self) -> i32 {
                self as i32
            }

            pub fn from_raw(raw: i32) -> Option<Self> {
                match raw {
                    $( v if v == $value => Some($name::$variant), )+
                    _ => None,
                }
            }

            pub fn try_from_raw(raw: i32) -> Result<Self> {
                Self::from_raw(raw).ok_or(Error::InvalidEnum { kind: $kind, value: raw })
            }
        }
    };
}

macro_rules! flags_type {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$cmeta:meta])* const $flag:ident = $value:expr; )*
        }
    ) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name(pub i32);

        impl $name {
            pub const NONE: Self = Self(0);
            $( $(#[$cmeta])* pub const $flag: Self = Self($value); )*

            pub const fn bits(self) -> i32 { self.0 }
            pub const fn contains(self, other: Self) -> bool { self.0 & other.0 == other.0 }
        }

        impl std::ops::BitOr for $name {
            type Output = Self;
            fn bitor(self, rhs: Self) -> Self { Self(self.0 | rhs.0) }
        }

        impl std::ops::BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: Self) { self.0 |= rhs.0; }
        }
    };
}

closed_enum! {
    /// Axis indices. X1 and Y1 are enabled by default.
    pub enum Axis ("axis") {
        X1 = 0,
        X2 = 1,
        X3 = 2,
        Y1 = 3,
        Y2 = 4,
        Y3 = 5,
    }
}

impl Axis {
    pub const fn is_x(self) -> bool {
        (self as i32) < (Axis::Y1 as i32)
    }
}

closed_enum! {
    /// Condition for limit setup (a subset of the UI framework's conditions).
    pub enum Condition ("condition") {
        /// Same as Always.
        None = 0,
        Always = 1,
        /// Only applied the first time the plot is shown.
        Once = 2,
    }
}

closed_enum! {
    /// Color roles of the style record; indexes `PlotStyle::colors`.
    pub enum StyleCol ("style color") {
        Line = 0,
        Fill = 1,
        MarkerOutline = 2,
        MarkerFill = 3,
        ErrorBar = 4,
        FrameBg = 5,
        PlotBg = 6,
        PlotBorder = 7,
        LegendBg = 8,
        LegendBorder = 9,
        LegendText = 10,
        TitleText = 11,
        InlayText = 12,
        AxisText = 13,
        AxisGrid = 14,
        AxisTick = 15,
        AxisBg = 16,
        AxisBgHovered = 17,
        AxisBgActive = 18,
        Selection = 19,
        Crosshairs = 20,
    }
}

impl StyleCol {
    pub const fn name(self) -> &'static str {
        match self {
            StyleCol::Line => "Line",
            StyleCol::Fill => "Fill",
            StyleCol::MarkerOutline => "MarkerOutline",
            StyleCol::MarkerFill => "MarkerFill",
            StyleCol::ErrorBar => "ErrorBar",
            StyleCol::FrameBg => "FrameBg",
            StyleCol::PlotBg => "PlotBg",
            StyleCol::PlotBorder => "PlotBorder",
            StyleCol::LegendBg => "LegendBg",
            StyleCol::LegendBorder => "LegendBorder",
            StyleCol::LegendText => "LegendText",
            StyleCol::TitleText => "TitleText",
            StyleCol::InlayText => "InlayText",
            StyleCol::AxisText => "AxisText",
            StyleCol::AxisGrid => "AxisGrid",
            StyleCol::AxisTick => "AxisTick",
            StyleCol::AxisBg => "AxisBg",
            StyleCol::AxisBgHovered => "AxisBgHovered",
            StyleCol::AxisBgActive => "AxisBgActive",
            StyleCol::Selection => "Selection",
            StyleCol::Crosshairs => "Crosshairs",
        }
    }
}

/// Declared value kind of a style variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Float,
    Int,
    Vec2,
}

closed_enum! {
    /// Style variable identifiers; each has exactly one `ValueKind`.
    pub enum StyleVar ("style variable") {
        LineWeight = 0,
        Marker = 1,
        MarkerSize = 2,
        MarkerWeight = 3,
        FillAlpha = 4,
        ErrorBarSize = 5,
        ErrorBarWeight = 6,
        DigitalBitHeight = 7,
        DigitalBitGap = 8,
        PlotBorderSize = 9,
        MinorAlpha = 10,
        MajorTickLen = 11,
        MinorTickLen = 12,
        MajorTickSize = 13,
        MinorTickSize = 14,
        MajorGridSize = 15,
        MinorGridSize = 16,
        PlotPadding = 17,
        LabelPadding = 18,
        LegendPadding = 19,
        LegendInnerPadding = 20,
        LegendSpacing = 21,
        MousePosPadding = 22,
        AnnotationPadding = 23,
        FitPadding = 24,
        PlotDefaultSize = 25,
        PlotMinSize = 26,
    }
}

impl StyleVar {
    pub const fn kind(self) -> ValueKind {
        match self {
            StyleVar::Marker => ValueKind::Int,
            StyleVar::LineWeight
            | StyleVar::MarkerSize
            | StyleVar::MarkerWeight
            | StyleVar::FillAlpha
            | StyleVar::ErrorBarSize
            | StyleVar::ErrorBarWeight
            | StyleVar::DigitalBitHeight
            | StyleVar::DigitalBitGap
            | StyleVar::PlotBorderSize
            | StyleVar::MinorAlpha => ValueKind::Float,
            _ => ValueKind::Vec2,
        }
    }
}

closed_enum! {
    /// Marker shapes. Cross, Plus and Asterisk are not fillable.
    pub enum Marker ("marker") {
        None = -1,
        Circle = 0,
        Square = 1,
        Diamond = 2,
        Up = 3,
        Down = 4,
        Left = 5,
        Right = 6,
        Cross = 7,
        Plus = 8,
        Asterisk = 9,
    }
}

impl Marker {
    pub const fn name(self) -> &'static str {
        match self {
            Marker::None => "None",
            Marker::Circle => "Circle",
            Marker::Square => "Square",
            Marker::Diamond => "Diamond",
            Marker::Up => "Up",
            Marker::Down => "Down",
            Marker::Left => "Left",
            Marker::Right => "Right",
            Marker::Cross => "Cross",
            Marker::Plus => "Plus",
            Marker::Asterisk => "Asterisk",
        }
    }
}

closed_enum! {
    /// Built-in colormaps.
    pub enum Colormap ("colormap") {
        Deep = 0,
        Dark = 1,
        Pastel = 2,
        Paired = 3,
        Viridis = 4,
        Plasma = 5,
        Hot = 6,
        Cool = 7,
        Pink = 8,
        Jet = 9,
        Twilight = 10,
        RdBu = 11,
        BrBG = 12,
        PiYG = 13,
        Spectral = 14,
        Greys = 15,
    }
}

closed_enum! {
    /// Positions for legends and mouse text; compass bits combine into corners.
    pub enum Location ("location") {
        Center = 0,
        North = 1,
        South = 2,
        West = 4,
        East = 8,
        NorthWest = 5,
        NorthEast = 9,
        SouthWest = 6,
        SouthEast = 10,
    }
}

flags_type! {
    /// Flags for `begin_plot`.
    pub struct PlotFlags {
        const NO_TITLE = 1 << 0;
        const NO_LEGEND = 1 << 1;
        const NO_MOUSE_TEXT = 1 << 2;
        const NO_INPUTS = 1 << 3;
        const NO_MENUS = 1 << 4;
        const NO_BOX_SELECT = 1 << 5;
        const NO_CHILD = 1 << 6;
        const NO_FRAME = 1 << 7;
        const EQUAL = 1 << 8;
        const CROSSHAIRS = 1 << 9;
        const ANTI_ALIASED = 1 << 10;
        const CANVAS_ONLY = (1 << 0) | (1 << 1) | (1 << 4) | (1 << 5) | (1 << 2);
    }
}

flags_type! {
    /// Flags for `setup_axis`.
    pub struct AxisFlags {
        const NO_LABEL = 1 << 0;
        const NO_GRID_LINES = 1 << 1;
        const NO_TICK_MARKS = 1 << 2;
        const NO_TICK_LABELS = 1 << 3;
        const NO_INITIAL_FIT = 1 << 4;
        const NO_MENUS = 1 << 5;
        const OPPOSITE = 1 << 6;
        const FOREGROUND = 1 << 7;
        const LOG_SCALE = 1 << 8;
        const TIME = 1 << 9;
        const INVERT = 1 << 10;
        const AUTO_FIT = 1 << 11;
        const RANGE_FIT = 1 << 12;
        const LOCK_MIN = 1 << 13;
        const LOCK_MAX = 1 << 14;
        const LOCK = (1 << 13) | (1 << 14);
        const NO_DECORATIONS = (1 << 0) | (1 << 1) | (1 << 2) | (1 << 3);
        const AUX_DEFAULT = (1 << 1) | (1 << 6);
    }
}

flags_type! {
    /// Flags for `begin_subplots`.
    pub struct SubplotFlags {
        const NO_TITLE = 1 << 0;
        const NO_LEGEND = 1 << 1;
        const NO_MENUS = 1 << 2;
        const NO_RESIZE = 1 << 3;
        const NO_ALIGN = 1 << 4;
        const SHARE_ITEMS = 1 << 5;
        const LINK_ROWS = 1 << 6;
        const LINK_COLS = 1 << 7;
        const LINK_ALL_X = 1 << 8;
        const LINK_ALL_Y = 1 << 9;
        const COL_MAJOR = 1 << 10;
    }
}

flags_type! {
    /// Flags for `setup_legend`.
    pub struct LegendFlags {
        const NO_BUTTONS = 1 << 0;
        const NO_HIGHLIGHT_ITEM = 1 << 1;
        const NO_HIGHLIGHT_AXIS = 1 << 2;
        const NO_MENUS = 1 << 3;
        const OUTSIDE = 1 << 4;
        const HORIZONTAL = 1 << 5;
    }
}

flags_type! {
    /// Flags for `setup_mouse_text`.
    pub struct MouseTextFlags {
        const NO_AUX_AXES = 1 << 0;
        const NO_FORMAT = 1 << 1;
        const SHOW_ALWAYS = 1 << 2;
    }
}

flags_type! {
    /// Flags for grouped bars.
    pub struct BarGroupsFlags {
        /// Items in a group are stacked on top of each other instead of side by side.
        const STACKED = 1 << 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_values_round_trip() {
        for &v in StyleVar::ALL {
            assert_eq!(StyleVar::from_raw(v.as_raw()), Some(v));
        }
        assert_eq!(StyleVar::COUNT, 27);
        assert_eq!(StyleCol::COUNT, 21);
        assert_eq!(Marker::from_raw(-1), Some(Marker::None));
        assert!(Axis::from_raw(6).is_none());
    }

    #[test]
    fn unknown_raw_value_is_reported_with_kind() {
        let err = StyleCol::try_from_raw(99).unwrap_err();
        assert!(err.to_string().contains("style color"));
        assert!(err.to_string().contains("99"));
    }

    #[test]
    fn flag_unions() {
        let f = AxisFlags::LOCK_MIN | AxisFlags::LOCK_MAX;
        assert_eq!(f, AxisFlags::LOCK);
        assert!(AxisFlags::NO_DECORATIONS.contains(AxisFlags::NO_TICK_LABELS));
        assert!(PlotFlags::CANVAS_ONLY.contains(PlotFlags::NO_MOUSE_TEXT));
    }
}
