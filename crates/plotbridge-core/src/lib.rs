// File: crates/plotbridge-core/src/lib.rs
// Summary: Core library entry point; exports the marshalling layer between host callers and a plotting engine.

pub mod axis;
pub mod context;
pub mod engine;
pub mod error;
pub mod format;
pub mod geometry;
pub mod grid;
pub mod plotter;
pub mod record;
pub mod series;
pub mod style;
pub mod theme;
pub mod types;

pub use axis::{SetupCommand, TickSpec};
pub use context::{ContextId, ContextRegistry, PlotContext, UiContext};
pub use engine::{NextItemStyle, PlotEngine, SubplotsSpec};
pub use error::{fatal, Error, Result};
pub use format::{FormatterTable, FormatterToken, TickFormat, TickLabel};
pub use geometry::{Point, Range, Rect, Vec2, Vec4};
pub use plotter::{Plotter, PlotterOptions};
pub use record::RecordingEngine;
pub use series::{Element, ElementKind, PlotItem, StridedView, XyData};
pub use style::{PlotStyle, StyleStack, StyleValue};
pub use theme::ColorScheme;
pub use types::*;
