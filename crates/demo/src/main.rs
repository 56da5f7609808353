// File: crates/demo/src/main.rs
// Summary: Loads OHLC rows from CSV and plots them through the igp* surface, the way a C host would.
// Notes:
// - Rows stay in one #[repr(C)] array; every series is a strided view into it.
// - The recording engine stands in for a renderer; the demo prints what it captured.

use std::ffi::{c_char, c_int, c_void, CStr};
use std::mem::{offset_of, size_of};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use plotbridge_capi::context::*;
use plotbridge_capi::plot::*;
use plotbridge_capi::setup::*;
use plotbridge_capi::style::*;
use plotbridge_core::record::Recorded;
use plotbridge_core::theme::{self, ColorScheme};
use plotbridge_core::{Axis, AxisFlags, Condition, Location, RecordingEngine, StyleCol, StyleVar, Vec2, Vec4, AUTO, AUTO_COLOR};
use tracing_subscriber::EnvFilter;

#[repr(C)]
#[derive(Clone, Copy, Debug)]
struct Row {
    t: f64,
    o: f64,
    h: f64,
    l: f64,
    c: f64,
    volume: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let raw = args.next().unwrap_or_else(|| "ohlc.csv".to_string());
    let scheme = theme::find(&args.next().unwrap_or_else(|| "dark".to_string()));

    let (path, used_alt) = resolve_path(&raw)?;
    tracing::info!(path = %path.display(), used_alt, scheme = scheme.name(), "loading rows");
    let rows = load_ohlc_csv(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
    if rows.is_empty() {
        anyhow::bail!("no rows loaded, check headers/delimiter");
    }
    tracing::info!(rows = rows.len(), "rows loaded");

    let engine = Arc::new(Mutex::new(RecordingEngine::new()));
    plotbridge_capi::install_engine(Box::new(Arc::clone(&engine)));

    let ctx = igpCreateContext();
    apply_scheme(scheme);
    draw(&rows);
    report(&engine.lock().unwrap_or_else(PoisonError::into_inner));
    igpDestroyContext(ctx);
    Ok(())
}

fn apply_scheme(scheme: ColorScheme) {
    let style = igpGetStyle();
    unsafe {
        match scheme {
            ColorScheme::Auto => igpStyleColorsAuto(style),
            ColorScheme::Classic => igpStyleColorsClassic(style),
            ColorScheme::Dark => igpStyleColorsDark(style),
            ColorScheme::Light => igpStyleColorsLight(style),
        }
        igpStyleSetVarFloat(style, StyleVar::LineWeight as c_int, 1.5);
    }
}

/// Tick formatter for epoch-second axes; `user_data` is a NUL-terminated strftime pattern.
extern "C" fn date_ticks(value: f64, buf: *mut c_char, size: c_int, user_data: *mut c_void) {
    if buf.is_null() || size <= 0 {
        return;
    }
    let pattern = unsafe { CStr::from_ptr(user_data as *const c_char) }.to_str().unwrap_or("%Y-%m-%d");
    let text = match DateTime::<Utc>::from_timestamp(value as i64, 0) {
        Some(dt) => dt.format(pattern).to_string(),
        None => format!("{value:.0}"),
    };
    let n = text.len().min(size as usize - 1);
    unsafe {
        std::ptr::copy_nonoverlapping(text.as_ptr() as *const c_char, buf, n);
        *buf.add(n) = 0;
    }
}

fn draw(rows: &[Row]) {
    let n = rows.len() as c_int;
    let stride = size_of::<Row>() as c_int;
    let base = rows.as_ptr() as *const u8;
    let field = |offset: usize| unsafe { base.add(offset) as *const f64 };
    let (t_min, t_max) = (rows[0].t, rows[rows.len() - 1].t);
    let (lo, hi) = rows.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| (lo.min(r.l), hi.max(r.h)));

    let dates = igpRegisterAxisFormatter(Some(date_ticks), c"%Y-%m-%d".as_ptr() as *mut c_void);

    unsafe {
        if igpBeginPlot(c"OHLC".as_ptr(), Vec2::new(-1.0, 400.0), 0) {
            igpSetupAxes(c"date".as_ptr(), c"price".as_ptr(), 0, AxisFlags::AUTO_FIT.bits());
            igpSetupAxis(Axis::Y2 as c_int, c"volume".as_ptr(), AxisFlags::AUX_DEFAULT.bits());
            igpSetupAxesLimits(t_min, t_max, lo, hi * 1.02, Condition::Once as c_int);
            igpSetupAxisFormatCallback(Axis::X1 as c_int, dates);
            igpSetupAxisFormat(Axis::Y1 as c_int, c"%.4f".as_ptr());
            igpSetupLegend(Location::NorthWest as c_int, 0);
            igpSetupFinish();

            let t = field(offset_of!(Row, t));
            igpPlotShadedLinesXY(c"low/high".as_ptr(), t, field(offset_of!(Row, l)), field(offset_of!(Row, h)), n, stride);
            igpPlotLineXY(c"close".as_ptr(), t, field(offset_of!(Row, c)), n, stride);

            igpSetNextMarkerStyle(1, 3.0, Vec4::new(1.0, 1.0, 1.0, 1.0), AUTO, AUTO_COLOR);
            igpPlotScatterXY(c"open".as_ptr(), t, field(offset_of!(Row, o)), n, stride);

            igpPushStyleColor(StyleCol::Fill as c_int, Vec4::new(0.5, 0.5, 0.5, 0.4));
            let width = if rows.len() > 1 { (t_max - t_min) / rows.len() as f64 * 0.8 } else { 1.0 };
            igpPlotBarsXY(c"volume".as_ptr(), t, field(offset_of!(Row, volume)), n, width, stride);
            igpPopStyleColor(1);
            igpEndPlot();
        }
    }
    igpUnregisterAxisFormatter(dates);
}

fn report(engine: &RecordingEngine) {
    for event in engine.events() {
        match event {
            Recorded::Item(item) => tracing::info!(
                kind = item.kind,
                label = item.label.as_deref().unwrap_or(""),
                points = item.points.len(),
                color = ?item.color.to_array(),
                "item"
            ),
            Recorded::Setup(name) => tracing::debug!(name, "setup"),
            other => tracing::debug!(?other, "event"),
        }
    }
    let x = engine.axis(Axis::X1);
    tracing::info!(ticks = ?x.formatted, limits = ?engine.primary_limits(), "x tick labels");
    if engine.dropped() > 0 {
        tracing::warn!(dropped = engine.dropped(), "frame log overflowed");
    }
}

/// Resolve path, trying a .csv/.cvs swap if needed. Returns (actual_path, used_alt).
fn resolve_path(raw: &str) -> Result<(PathBuf, bool)> {
    let p = Path::new(raw);
    if p.exists() {
        return Ok((p.to_path_buf(), false));
    }
    if let Some(alt) = swap_ext(p) {
        if alt.exists() {
            return Ok((alt, true));
        }
    }
    anyhow::bail!("file not found: {}", p.display());
}

fn swap_ext(p: &Path) -> Option<PathBuf> {
    let mut alt = p.to_path_buf();
    match p.extension()?.to_string_lossy().to_lowercase().as_str() {
        "cvs" => alt.set_extension("csv"),
        "csv" => alt.set_extension("cvs"),
        _ => return None,
    };
    Some(alt)
}

/// Load Binance-like OHLC CSV; rows missing a price column are skipped.
fn load_ohlc_csv(path: &Path) -> Result<Vec<Row>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.trim().to_lowercase()).collect::<Vec<_>>();
    tracing::debug!(?headers, "csv headers");
    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));

    let i_time = idx(&["time", "timestamp", "open_time", "date", "datetime"]);
    let i_open = idx(&["open", "o"]);
    let i_high = idx(&["high", "h"]);
    let i_low = idx(&["low", "l"]);
    let i_close = idx(&["close", "c", "adj_close", "close_price"]);
    let i_volume = idx(&["volume", "vol", "v"]);
    if [i_open, i_high, i_low, i_close].iter().any(Option::is_none) {
        tracing::warn!("could not find one of open/high/low/close columns");
    }

    let mut out = Vec::new();
    for (row_index, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let parse = |i: Option<usize>| i.and_then(|ix| rec.get(ix)).and_then(|s| s.trim().parse::<f64>().ok());
        let t = i_time.and_then(|ix| rec.get(ix)).and_then(parse_time).unwrap_or(row_index as f64);
        if let (Some(o), Some(h), Some(l), Some(c)) = (parse(i_open), parse(i_high), parse(i_low), parse(i_close)) {
            out.push(Row { t, o, h, l, c, volume: parse(i_volume).unwrap_or(0.0) });
        }
    }
    Ok(out)
}

/// Epoch seconds from an epoch (s or ms) or an ISO-like date/datetime.
fn parse_time(s: &str) -> Option<f64> {
    let s = s.trim();
    if let Ok(n) = s.parse::<i64>() {
        // epoch ms -> sec
        return Some(if n > 10_i64.pow(12) { n as f64 / 1000.0 } else { n as f64 });
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp() as f64);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc().timestamp() as f64);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp() as f64)
}
