use crate::data::model::{Collection, Sample};

// ---------------------------------------------------------------------------
// Axis selection
// ---------------------------------------------------------------------------

/// Which sample column to put on an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Time,
    Voltage,
    Current,
}

impl Axis {
    /// Canonical column name (`t_s`, `v`, `i`).
    pub fn column(self) -> &'static str {
        match self {
            Axis::Time => "t_s",
            Axis::Voltage => "v",
            Axis::Current => "i",
        }
    }

    fn base_label(self) -> &'static str {
        match self {
            Axis::Time => "Time [s]",
            Axis::Voltage => "V [V]",
            Axis::Current => "I [A]",
        }
    }

    /// Axis label for a given scale factor. The common current scales get
    /// proper units; anything else is annotated with the raw factor.
    fn scaled_label(self, factor: f64) -> String {
        if factor == 1.0 {
            return self.base_label().to_string();
        }
        match self {
            Axis::Current if factor == 1e6 => "I [µA]".to_string(),
            Axis::Current if factor == 1e9 => "I [nA]".to_string(),
            _ => format!("{} (x{factor})", self.base_label()),
        }
    }
}

fn sample_value(sample: &Sample, axis: Axis) -> f64 {
    match axis {
        Axis::Time => sample.t_s,
        Axis::Voltage => sample.v,
        Axis::Current => sample.i,
    }
}

// ---------------------------------------------------------------------------
// PlotSpec – renderable description, no drawing here
// ---------------------------------------------------------------------------

/// Options controlling how a [`PlotSpec`] is built.
#[derive(Debug, Clone)]
pub struct PlotOptions {
    /// Multiplier applied to every y value (e.g. 1e6 to plot µA).
    pub y_factor: f64,
    /// Render series as point markers instead of lines.
    pub points: bool,
    /// Collections longer than this collapse into one concatenated
    /// series instead of one series per record.
    pub flatten_threshold: usize,
}

impl Default for PlotOptions {
    fn default() -> Self {
        PlotOptions {
            y_factor: 1.0,
            points: false,
            flatten_threshold: 50,
        }
    }
}

/// One legended series of (x, y) points.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

/// A complete plot description: axis labels plus one series per record,
/// legended by label. Rendering is left to an external sink; nothing in
/// here touches a drawing backend or global figure state.
#[derive(Debug, Clone)]
pub struct PlotSpec {
    pub x_label: String,
    pub y_label: String,
    /// Marker style requested by the caller (lines when false).
    pub points: bool,
    pub series: Vec<Series>,
}

impl PlotSpec {
    /// Build the plot description for `collection` with `x`/`y` axis
    /// selectors. Over the flatten threshold, all records are merged into
    /// a single series (keeps the legend and draw cost sane for very
    /// large collections).
    pub fn build(collection: &Collection, x: Axis, y: Axis, opts: &PlotOptions) -> PlotSpec {
        let series = if collection.len() > opts.flatten_threshold {
            let mut points = Vec::new();
            for record in &collection.records {
                points.extend(record_points(record.samples.iter(), x, y, opts.y_factor));
            }
            vec![Series {
                name: format!("{} runs", collection.len()),
                points,
            }]
        } else {
            collection
                .records
                .iter()
                .map(|record| Series {
                    name: record.label.clone(),
                    points: record_points(record.samples.iter(), x, y, opts.y_factor),
                })
                .collect()
        };

        PlotSpec {
            x_label: x.scaled_label(1.0),
            y_label: y.scaled_label(opts.y_factor),
            points: opts.points,
            series,
        }
    }
}

fn record_points<'a>(
    samples: impl Iterator<Item = &'a Sample>,
    x: Axis,
    y: Axis,
    y_factor: f64,
) -> Vec<[f64; 2]> {
    samples
        .map(|s| [sample_value(s, x), sample_value(s, y) * y_factor])
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
