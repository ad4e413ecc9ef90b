//! Line-plot rendering for performance graphs
//!
//! ```rust
//! use ml_logwriter::plot::LinePlot;
//!
//! let plot = LinePlot::new(&[1, 2, 3], &[0.9, 0.5, 0.3])?
//!     .title("loss")
//!     .x_label("epoch")
//!     .y_label("value");
//!
//! let mut png = Vec::new();
//! plot.write_png(&mut png)?;
//! assert!(!png.is_empty());
//! # Ok::<(), ml_logwriter::Error>(())
//! ```
//!
//! Drawing goes through `plotters` on an in-memory bitmap; text uses a font
//! bundled with the crate, so rendering does not depend on system fonts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::OnceLock;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};

use crate::{Error, Result};

/// Default image width in pixels.
pub const DEFAULT_WIDTH: u32 = 640;
/// Default image height in pixels.
pub const DEFAULT_HEIGHT: u32 = 480;
/// Grid divisions per axis.
pub const GRID_DIVISIONS: usize = 5;

const MIN_SIDE: u32 = 120;
const PADDING: f64 = 0.05;
const FONT_FAMILY: &str = "sans-serif";
const TITLE_SIZE: u32 = 22;
const LABEL_SIZE: u32 = 16;

const SERIES: RGBColor = RGBColor(31, 119, 180);
const GRID: RGBColor = RGBColor(220, 220, 220);

/// A single-series line plot.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePlot {
    points: Vec<(f64, f64)>,
    title: String,
    x_label: String,
    y_label: String,
    width: u32,
    height: u32,
}

impl LinePlot {
    /// Pair up `x` and `y`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the sequences differ in length
    pub fn new<X, Y>(x: &[X], y: &[Y]) -> Result<Self>
    where
        X: Into<f64> + Copy,
        Y: Into<f64> + Copy,
    {
        if x.len() != y.len() {
            return Err(Error::Validation(format!(
                "x and y must have the same length (x: {}, y: {})",
                x.len(),
                y.len()
            )));
        }

        let points = x
            .iter()
            .zip(y)
            .map(|(&x, &y)| (x.into(), y.into()))
            .collect();

        Ok(Self {
            points,
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        })
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the x-axis label.
    #[must_use]
    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = label.into();
        self
    }

    /// Set the y-axis label.
    #[must_use]
    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = label.into();
        self
    }

    /// Set the image size; each side is at least 120 pixels.
    #[must_use]
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(MIN_SIDE);
        self.height = height.max(MIN_SIDE);
        self
    }

    /// Data points in input order.
    #[must_use]
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Draw title, axis labels, grid and data onto a white RGB image.
    ///
    /// Non-finite points are skipped and break the line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Plot`] if the chart cannot be drawn
    pub fn render(&self) -> Result<RgbImage> {
        register_bundled_font()?;

        let (width, height) = (self.width, self.height);
        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(plot_error)?;

            let x_range = axis_range(self.finite().map(|p| p.0));
            let y_range = axis_range(self.finite().map(|p| p.1));

            let mut builder = ChartBuilder::on(&root);
            builder.margin(12).x_label_area_size(48).y_label_area_size(60);
            if !self.title.is_empty() {
                builder.caption(self.title.as_str(), (FONT_FAMILY, TITLE_SIZE));
            }
            let mut chart = builder
                .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)
                .map_err(plot_error)?;

            let mut mesh = chart.configure_mesh();
            mesh.x_labels(GRID_DIVISIONS + 1)
                .y_labels(GRID_DIVISIONS + 1)
                .bold_line_style(&GRID)
                .light_line_style(&WHITE)
                .axis_desc_style((FONT_FAMILY, LABEL_SIZE));
            if !self.x_label.is_empty() {
                mesh.x_desc(self.x_label.as_str());
            }
            if !self.y_label.is_empty() {
                mesh.y_desc(self.y_label.as_str());
            }
            mesh.draw().map_err(plot_error)?;

            for segment in self.segments() {
                chart
                    .draw_series(LineSeries::new(segment.iter().copied(), &SERIES))
                    .map_err(plot_error)?;
            }
            chart
                .draw_series(self.finite().map(|&p| Circle::new(p, 2, SERIES.filled())))
                .map_err(plot_error)?;

            root.present().map_err(plot_error)?;
        }

        RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| Error::Plot(format!("bitmap does not fit {width}x{height}")))
    }

    /// Encode the rendered plot as PNG into `writer`.
    ///
    /// # Errors
    ///
    /// Returns error if drawing, encoding or writing fails
    pub fn write_png<W: Write>(&self, writer: W) -> Result<()> {
        let image = self.render()?;
        PngEncoder::new(writer).write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgb8,
        )?;
        Ok(())
    }

    /// Write the plot to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be created or encoding fails
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        let mut writer = BufWriter::new(file);
        self.write_png(&mut writer)?;
        writer.flush().map_err(|e| Error::io(path, e))
    }

    fn finite(&self) -> impl Iterator<Item = &(f64, f64)> {
        self.points
            .iter()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
    }

    /// Runs of consecutive finite points.
    fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for &(x, y) in &self.points {
            if x.is_finite() && y.is_finite() {
                current.push((x, y));
            } else if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

/// Register the bundled font under the family every chart asks for.
fn register_bundled_font() -> Result<()> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    let ok = *REGISTERED.get_or_init(|| {
        register_font(FONT_FAMILY, FontStyle::Normal, epaint_default_fonts::UBUNTU_LIGHT).is_ok()
    });
    if ok {
        Ok(())
    } else {
        Err(Error::Plot("bundled font could not be loaded".to_string()))
    }
}

fn plot_error(e: impl std::fmt::Display) -> Error {
    Error::Plot(e.to_string())
}

/// Padded min/max of `values`; `(0, 1)` when empty, widened by 1 when flat.
fn axis_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if lo > hi {
        return (0.0, 1.0);
    }
    if (hi - lo).abs() < f64::EPSILON {
        return (lo - 1.0, hi + 1.0);
    }
    let pad = (hi - lo) * PADDING;
    (lo - pad, hi + pad)
}
