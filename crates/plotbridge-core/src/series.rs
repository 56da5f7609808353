// File: crates/plotbridge-core/src/series.rs
// Summary: Zero-copy strided views over caller memory, value/XY layouts and the plot item descriptors.
// Notes:
// - Views never copy; they borrow the caller's buffer for the duration of one forwarded call.
// - Reads are unaligned so interleaved records with odd strides are fine.

use std::marker::PhantomData;
use std::mem::size_of;

use crate::error::{fatal, Error, Result};
use crate::geometry::Point;
use crate::types::BarGroupsFlags;

/// Scalar types a view can read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    F32,
    F64,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
}

impl ElementKind {
    pub const fn size(self) -> usize {
        match self {
            ElementKind::I8 | ElementKind::U8 => 1,
            ElementKind::I16 | ElementKind::U16 => 2,
            ElementKind::F32 | ElementKind::I32 | ElementKind::U32 => 4,
            ElementKind::F64 | ElementKind::I64 | ElementKind::U64 => 8,
        }
    }

    /// # Safety
    /// `ptr` must be valid for reading `self.size()` bytes.
    #[inline]
    unsafe fn read(self, ptr: *const u8) -> f64 {
        match self {
            ElementKind::F32 => (ptr as *const f32).read_unaligned() as f64,
            ElementKind::F64 => (ptr as *const f64).read_unaligned(),
            ElementKind::I8 => (ptr as *const i8).read_unaligned() as f64,
            ElementKind::U8 => ptr.read() as f64,
            ElementKind::I16 => (ptr as *const i16).read_unaligned() as f64,
            ElementKind::U16 => (ptr as *const u16).read_unaligned() as f64,
            ElementKind::I32 => (ptr as *const i32).read_unaligned() as f64,
            ElementKind::U32 => (ptr as *const u32).read_unaligned() as f64,
            ElementKind::I64 => (ptr as *const i64).read_unaligned() as f64,
            ElementKind::U64 => (ptr as *const u64).read_unaligned() as f64,
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Scalar element of a series buffer.
pub trait Element: Copy + sealed::Sealed {
    const KIND: ElementKind;
}

macro_rules! element {
    ($($t:ty => $k:ident),+ $(,)?) => {
        $(
            impl sealed::Sealed for $t {}
            impl Element for $t {
                const KIND: ElementKind = ElementKind::$k;
            }
        )+
    };
}

element! {
    f32 => F32, f64 => F64,
    i8 => I8, u8 => U8,
    i16 => I16, u16 => U16,
    i32 => I32, u32 => U32,
    i64 => I64, u64 => U64,
}

/// Borrowed (pointer, length, byte stride, element kind) descriptor.
#[derive(Clone, Copy)]
pub struct StridedView<'a> {
    ptr: *const u8,
    len: usize,
    stride: usize,
    kind: ElementKind,
    _marker: PhantomData<&'a [u8]>,
}

impl<'a> StridedView<'a> {
    /// Contiguous view, stride = element size.
    pub fn from_slice<T: Element>(values: &'a [T]) -> Self {
        Self {
            ptr: values.as_ptr() as *const u8,
            len: values.len(),
            stride: size_of::<T>(),
            kind: T::KIND,
            _marker: PhantomData,
        }
    }

    /// View one field of each record, e.g. `StridedView::from_field(&pts, |p| &p.y)`.
    ///
    /// Panics if `field` returns a reference outside the record it was given.
    #[track_caller]
    pub fn from_field<R, T: Element>(records: &'a [R], field: impl Fn(&R) -> &T) -> Self {
        let base = records.as_ptr() as *const u8;
        let stride = size_of::<R>();
        let Some(first) = records.first() else {
            return Self { ptr: base, len: 0, stride, kind: T::KIND, _marker: PhantomData };
        };
        let record = first as *const R as usize;
        let addr = field(first) as *const T as usize;
        if addr < record || addr - record + size_of::<T>() > stride {
            fatal("StridedView::from_field: accessor must return a field of its record");
        }
        Self {
            ptr: base.wrapping_add(addr - record),
            len: records.len(),
            stride,
            kind: T::KIND,
            _marker: PhantomData,
        }
    }

    /// View `count` elements of type `T` starting `offset` bytes into `bytes`, `stride` bytes apart.
    pub fn from_bytes<T: Element>(bytes: &'a [u8], offset: usize, count: usize, stride: usize) -> Result<Self> {
        let oob = Error::StrideOutOfBounds { offset, count, stride, len: bytes.len() };
        if count > 0 {
            let end = (count - 1)
                .checked_mul(stride)
                .and_then(|span| span.checked_add(offset))
                .and_then(|last| last.checked_add(size_of::<T>()))
                .ok_or_else(|| oob.clone())?;
            if end > bytes.len() {
                return Err(oob);
            }
        } else if offset > bytes.len() {
            return Err(oob);
        }
        Ok(Self {
            ptr: bytes.as_ptr().wrapping_add(offset),
            len: count,
            stride,
            kind: T::KIND,
            _marker: PhantomData,
        })
    }

    /// Raw view for the C surface; nothing is checked.
    ///
    /// # Safety
    /// For every `i < count`, `ptr + i * stride` must be readable as a `T`
    /// (alignment not required) for the lifetime `'a`.
    pub unsafe fn from_raw_parts<T: Element>(ptr: *const T, count: usize, stride: usize) -> Self {
        Self { ptr: ptr as *const u8, len: count, stride, kind: T::KIND, _marker: PhantomData }
    }

    pub fn len(&self) -> usize { self.len }
    pub fn is_empty(&self) -> bool { self.len == 0 }
    pub fn stride(&self) -> usize { self.stride }
    pub fn kind(&self) -> ElementKind { self.kind }

    /// Element `i` converted to f64.
    #[inline]
    pub fn get(&self, i: usize) -> Option<f64> {
        if i >= self.len {
            return None;
        }
        // SAFETY: constructors guarantee every index below len is readable.
        Some(unsafe { self.kind.read(self.ptr.wrapping_add(i * self.stride)) })
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).filter_map(move |i| self.get(i))
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }
}

impl std::fmt::Debug for StridedView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StridedView")
            .field("len", &self.len)
            .field("stride", &self.stride)
            .field("kind", &self.kind)
            .finish()
    }
}

/// The two data layouts a series can arrive in.
#[derive(Clone, Copy, Debug)]
pub enum XyData<'a> {
    /// Only Y values; x_i = x0 + i * xscale.
    Values { ys: StridedView<'a>, xscale: f64, x0: f64 },
    /// Paired coordinates, each with its own stride.
    Xy { xs: StridedView<'a>, ys: StridedView<'a> },
}

impl<'a> XyData<'a> {
    pub fn values(ys: StridedView<'a>, xscale: f64, x0: f64) -> Self {
        XyData::Values { ys, xscale, x0 }
    }

    pub fn xy(xs: StridedView<'a>, ys: StridedView<'a>) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(Error::DataLengthMismatch { x_len: xs.len(), y_len: ys.len() });
        }
        Ok(XyData::Xy { xs, ys })
    }

    /// Pair without a length check; the shorter view bounds the series.
    pub fn xy_unchecked(xs: StridedView<'a>, ys: StridedView<'a>) -> Self {
        XyData::Xy { xs, ys }
    }

    pub fn len(&self) -> usize {
        match self {
            XyData::Values { ys, .. } => ys.len(),
            XyData::Xy { xs, ys } => xs.len().min(ys.len()),
        }
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn x(&self, i: usize) -> Option<f64> {
        if i >= self.len() {
            return None;
        }
        match self {
            XyData::Values { xscale, x0, .. } => Some(x0 + i as f64 * xscale),
            XyData::Xy { xs, .. } => xs.get(i),
        }
    }

    pub fn y(&self, i: usize) -> Option<f64> {
        if i >= self.len() {
            return None;
        }
        match self {
            XyData::Values { ys, .. } | XyData::Xy { ys, .. } => ys.get(i),
        }
    }

    pub fn point(&self, i: usize) -> Option<Point> {
        Some(Point::new(self.x(i)?, self.y(i)?))
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.len()).filter_map(move |i| self.point(i))
    }
}

/// One plot primitive as handed to the engine.
#[derive(Clone, Copy, Debug)]
pub enum PlotItem<'a> {
    Line { label: &'a str, data: XyData<'a> },
    Scatter { label: &'a str, data: XyData<'a> },
    Stairs { label: &'a str, data: XyData<'a> },
    /// Area between the curve and the horizontal line y = yref.
    ShadedRef { label: &'a str, data: XyData<'a>, yref: f64 },
    /// Area between two curves sharing X.
    ShadedBetween { label: &'a str, data: XyData<'a>, ys2: StridedView<'a> },
    /// For horizontal bars the synthesized coordinate (or xs) is the bar position on Y
    /// and the value (ys) is the bar length along X.
    Bars { label: &'a str, data: XyData<'a>, width: f64, horizontal: bool },
    /// `values[item * groups + group]`.
    BarGroups {
        labels: &'a [&'a str],
        values: &'a [f64],
        groups: usize,
        width: f64,
        shift: f64,
        flags: BarGroupsFlags,
        horizontal: bool,
    },
}

impl<'a> PlotItem<'a> {
    pub fn shaded_between(label: &'a str, data: XyData<'a>, ys2: StridedView<'a>) -> Result<Self> {
        if data.len() != ys2.len() {
            return Err(Error::DataLengthMismatch { x_len: data.len(), y_len: ys2.len() });
        }
        Ok(PlotItem::ShadedBetween { label, data, ys2 })
    }

    pub fn bar_groups(
        labels: &'a [&'a str],
        values: &'a [f64],
        groups: usize,
        width: f64,
        shift: f64,
        flags: BarGroupsFlags,
        horizontal: bool,
    ) -> Result<Self> {
        let expected = labels.len().saturating_mul(groups);
        if values.len() != expected {
            return Err(Error::DataLengthMismatch { x_len: expected, y_len: values.len() });
        }
        Ok(PlotItem::BarGroups { labels, values, groups, width, shift, flags, horizontal })
    }

    pub const fn kind_name(&self) -> &'static str {
        match self {
            PlotItem::Line { .. } => "line",
            PlotItem::Scatter { .. } => "scatter",
            PlotItem::Stairs { .. } => "stairs",
            PlotItem::ShadedRef { .. } => "shaded",
            PlotItem::ShadedBetween { .. } => "shaded_between",
            PlotItem::Bars { horizontal: false, .. } => "bars",
            PlotItem::Bars { horizontal: true, .. } => "bars_h",
            PlotItem::BarGroups { horizontal: false, .. } => "bar_groups",
            PlotItem::BarGroups { horizontal: true, .. } => "bar_groups_h",
        }
    }

    /// Legend label; grouped bars carry one label per item instead.
    pub fn label(&self) -> Option<&'a str> {
        match *self {
            PlotItem::Line { label, .. }
            | PlotItem::Scatter { label, .. }
            | PlotItem::Stairs { label, .. }
            | PlotItem::ShadedRef { label, .. }
            | PlotItem::ShadedBetween { label, .. }
            | PlotItem::Bars { label, .. } => Some(label),
            PlotItem::BarGroups { .. } => None,
        }
    }

    /// Number of points (or bar values) the item covers.
    pub fn count(&self) -> usize {
        match self {
            PlotItem::Line { data, .. }
            | PlotItem::Scatter { data, .. }
            | PlotItem::Stairs { data, .. }
            | PlotItem::ShadedRef { data, .. }
            | PlotItem::Bars { data, .. } => data.len(),
            PlotItem::ShadedBetween { data, ys2, .. } => data.len().min(ys2.len()),
            PlotItem::BarGroups { values, .. } => values.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_rejects_overrun() {
        let buf = [0u8; 24];
        assert!(StridedView::from_bytes::<f64>(&buf, 0, 3, 8).is_ok());
        let err = StridedView::from_bytes::<f64>(&buf, 4, 3, 8).unwrap_err();
        assert!(matches!(err, Error::StrideOutOfBounds { len: 24, .. }));
    }

    #[test]
    fn mixed_kinds_convert_to_f64() {
        let a = [1i16, -2, 3];
        let v = StridedView::from_slice(&a);
        assert_eq!(v.to_vec(), vec![1.0, -2.0, 3.0]);
        assert_eq!(v.kind(), ElementKind::I16);
        assert_eq!(v.get(3), None);
    }

    #[test]
    #[should_panic(expected = "from_field")]
    fn from_field_rejects_foreign_reference() {
        static OTHER: f64 = 0.0;
        let recs = [(1.0f64, 2.0f64)];
        let _ = StridedView::from_field(&recs, |_| &OTHER);
    }
}
