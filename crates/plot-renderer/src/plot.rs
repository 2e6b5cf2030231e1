//! Figure rasterization
//!
//! Draws the potential heatmap, the field quiver and the charge markers into
//! an RGB8 buffer with `plotters`. Axes, tick labels and the colorbar values
//! need a system font; everything else is plain geometry.

use colormap::{blues, css, seismic, Color, Colormap, Norm, NormError};
use field_simulation::{FieldScene, PotentialNorm};
use glam::DVec2;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::Color as _;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("drawing failed: {0}")]
    Draw(String),

    #[error("figure size {0}x{1} is too small")]
    TooSmall(u32, u32),

    #[error(transparent)]
    Norm(#[from] NormError),
}

impl<E> From<DrawingAreaErrorKind<E>> for PlotError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        PlotError::Draw(err.to_string())
    }
}

/// Figure appearance
#[derive(Debug, Clone)]
pub struct PlotStyle {
    /// Axes, tick labels and colorbar values (needs a font)
    pub annotate: bool,
    /// Draw the potential colorbar strip
    pub colorbar: bool,
    /// Arrow length as a fraction of the field grid spacing
    pub arrow_scale: f64,
    /// Charge marker radius in pixels
    pub marker_radius: u32,
    pub background: Color,
    pub marker_color: Color,
    pub potential_cmap: Colormap,
    pub field_cmap: Colormap,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            annotate: true,
            colorbar: true,
            arrow_scale: 0.8,
            marker_radius: 6,
            background: css::WHITE,
            marker_color: css::GREEN,
            potential_cmap: seismic(),
            field_cmap: blues(),
        }
    }
}

/// Rendered figure, tightly packed RGB8 rows from the top
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Figure {
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = self.offset(x, y);
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }

    /// Byte offset of pixel `(x, y)`
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 3
    }

    /// Expand to RGBA8 for texture upload
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .chunks_exact(3)
            .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], 255])
            .collect()
    }
}

const MARGIN: u32 = 20;
const COLORBAR_WIDTH: u32 = 110;
const COLORBAR_STEPS: usize = 256;
const MIN_SIZE: u32 = 64;

fn rgb(color: Color) -> RGBColor {
    let [r, g, b] = color.to_rgb8();
    RGBColor(r, g, b)
}

/// Render the scene; if annotations cannot be drawn (typically no usable
/// font), fall back to a figure without them.
pub fn render_figure(
    scene: &FieldScene,
    style: &PlotStyle,
    size: (u32, u32),
) -> Result<Figure, PlotError> {
    with_bare_fallback(style, |style| rasterize(scene, style, size))
}

fn with_bare_fallback<F>(style: &PlotStyle, mut draw: F) -> Result<Figure, PlotError>
where
    F: FnMut(&PlotStyle) -> Result<Figure, PlotError>,
{
    match draw(style) {
        Err(PlotError::Draw(reason)) if style.annotate => {
            log::warn!("Annotations unavailable ({}), drawing bare figure", reason);
            let bare = PlotStyle {
                annotate: false,
                ..style.clone()
            };
            draw(&bare)
        }
        result => result,
    }
}

/// Render the scene exactly as styled
pub fn rasterize(
    scene: &FieldScene,
    style: &PlotStyle,
    (width, height): (u32, u32),
) -> Result<Figure, PlotError> {
    let bar_width = if style.colorbar { COLORBAR_WIDTH } else { 0 };
    if width < MIN_SIZE + bar_width || height < MIN_SIZE {
        return Err(PlotError::TooSmall(width, height));
    }

    let potential_norm = scene.potential_norm()?;
    let mut pixels = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        root.fill(&rgb(style.background))?;

        let (main, bar) = root.split_horizontally(width - bar_width);
        draw_main(&main, scene, style, &*potential_norm)?;
        if style.colorbar {
            draw_colorbar(&bar, scene, style, &*potential_norm)?;
        }
        root.present()?;
    }

    log::debug!(
        "Rasterized {}x{} figure ({} / {})",
        width,
        height,
        style.potential_cmap.name(),
        style.field_cmap.name()
    );
    Ok(Figure {
        width,
        height,
        pixels,
    })
}

/// Largest plot rectangle with the window's aspect ratio
fn fit_aspect(available: (u32, u32), window: (f64, f64)) -> (u32, u32) {
    let (aw, ah) = (available.0 as f64, available.1 as f64);
    let aspect = window.0 / window.1;
    if aw / ah > aspect {
        ((ah * aspect).floor() as u32, available.1)
    } else {
        (available.0, (aw / aspect).floor() as u32)
    }
}

fn draw_main(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    scene: &FieldScene,
    style: &PlotStyle,
    potential_norm: &dyn Norm,
) -> Result<(), PlotError> {
    let params = scene.params();
    let (w, h) = params.window;
    let (x0, x1, y0, y1) = (-w / 2.0, w / 2.0, -h / 2.0, h / 2.0);

    // Equal aspect: size the chart so the plotting area matches the window
    let label_area = if style.annotate { 40 } else { 0 };
    let chrome = 2 * MARGIN + label_area;
    let (area_w, area_h) = area.dim_in_pixel();
    let (plot_w, plot_h) = fit_aspect(
        (
            area_w.saturating_sub(chrome).max(1),
            area_h.saturating_sub(chrome).max(1),
        ),
        params.window,
    );
    let (chart_w, chart_h) = (plot_w + chrome, plot_h + chrome);
    let offset = (
        (area_w.saturating_sub(chart_w) / 2) as i32,
        (area_h.saturating_sub(chart_h) / 2) as i32,
    );
    let chart_area = area.clone().shrink(offset, (chart_w, chart_h));

    let mut chart = ChartBuilder::on(&chart_area)
        .margin(MARGIN)
        .x_label_area_size(label_area)
        .y_label_area_size(label_area)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    if style.annotate {
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("x")
            .y_desc("y")
            .label_style(("sans-serif", 14))
            .axis_desc_style(("sans-serif", 16))
            .draw()?;
    }

    // Potential heatmap, one cell per sample centred on the sample point
    let grid = scene.potential_grid();
    let half = grid.spacing() * 0.5;
    let clamp = |p: DVec2| (p.x.clamp(x0, x1), p.y.clamp(y0, y1));
    chart.draw_series(grid.points().zip(scene.potential()).filter_map(|(point, &v)| {
        let color = style.potential_cmap.map(potential_norm.normalize(v));
        if color.a == 0.0 {
            return None;
        }
        Some(Rectangle::new(
            [clamp(point - half), clamp(point + half)],
            rgb(color).filled(),
        ))
    }))?;

    let arrows = quiver(scene, style)?;
    chart.draw_series(arrows.iter().map(|(arrow, color)| {
        PathElement::new(vec![arrow.tail, arrow.neck], color.stroke_width(2))
    }))?;
    chart.draw_series(
        arrows
            .iter()
            .map(|(arrow, color)| Polygon::new(arrow.head.to_vec(), color.filled())),
    )?;

    // Charges
    let marker = rgb(style.marker_color);
    chart.draw_series(
        scene
            .particles()
            .iter()
            .map(|p| Circle::new((p.x(), p.y()), style.marker_radius, marker.filled())),
    )?;

    Ok(())
}

/// Quiver: unit arrows with the tail on the sample point, colored by |E|.
/// Masked samples get no arrow.
fn quiver(scene: &FieldScene, style: &PlotStyle) -> Result<Vec<(Arrow, RGBColor)>, PlotError> {
    let norm = match scene.magnitude_norm() {
        Ok(norm) => norm,
        Err(NormError::EmptyData) => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };

    let (w, h) = scene.params().window;
    let spacing = scene.field_grid().spacing();
    let step = match (spacing.x > 0.0, spacing.y > 0.0) {
        (true, true) => spacing.x.min(spacing.y),
        (true, false) => spacing.x,
        (false, true) => spacing.y,
        (false, false) => w.min(h) * 0.1,
    };
    let length = step * style.arrow_scale;

    Ok(scene
        .field_grid()
        .points()
        .zip(scene.field())
        .filter(|(_, sample)| !sample.is_masked())
        .map(|(point, sample)| {
            let color = rgb(style.field_cmap.map(norm.normalize(sample.magnitude)));
            (Arrow::new(point, sample.direction, length), color)
        })
        .collect())
}

/// Quiver arrow geometry in data coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
struct Arrow {
    tail: (f64, f64),
    neck: (f64, f64),
    head: [(f64, f64); 3],
}

impl Arrow {
    const HEAD_LENGTH: f64 = 0.35;
    const HEAD_WIDTH: f64 = 0.22;

    fn new(tail: DVec2, direction: DVec2, length: f64) -> Self {
        let tip = tail + direction * length;
        let neck = tip - direction * (length * Self::HEAD_LENGTH);
        let side = direction.perp() * (length * Self::HEAD_WIDTH * 0.5);
        let pair = |v: DVec2| (v.x, v.y);
        Self {
            tail: pair(tail),
            neck: pair(neck),
            head: [pair(tip), pair(neck + side), pair(neck - side)],
        }
    }
}

fn colorbar_ticks(scene: &FieldScene, vmin: f64, vmax: f64) -> Vec<f64> {
    let mut ticks = vec![vmin, vmax];
    match scene.params().potential_norm {
        PotentialNorm::SymLog { lin_thres, .. } => {
            ticks.extend([-lin_thres, 0.0, lin_thres]);
        }
        PotentialNorm::MidpointLog {
            lin_thres,
            midpoint,
            ..
        } => {
            ticks.extend([-lin_thres, midpoint, lin_thres]);
        }
    }
    ticks.retain(|t| *t >= vmin && *t <= vmax);
    ticks.sort_by(f64::total_cmp);
    ticks.dedup();
    ticks
}

fn draw_colorbar(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    scene: &FieldScene,
    style: &PlotStyle,
    norm: &dyn Norm,
) -> Result<(), PlotError> {
    let (vmin, vmax) = norm.range();

    let mut bar = ChartBuilder::on(area)
        .margin(MARGIN)
        .margin_top(MARGIN + 20)
        .margin_bottom(MARGIN + 20)
        .build_cartesian_2d(0.0..4.0, 0.0..1.0)?;

    let step = 1.0 / COLORBAR_STEPS as f64;
    bar.draw_series((0..COLORBAR_STEPS).map(|i| {
        let t = i as f64 * step;
        let color = rgb(style.potential_cmap.map(Some(t + step * 0.5)));
        Rectangle::new([(0.0, t), (1.0, t + step)], color.filled())
    }))?;
    bar.draw_series(std::iter::once(Rectangle::new(
        [(0.0, 0.0), (1.0, 1.0)],
        rgb(css::BLACK).stroke_width(1),
    )))?;

    if style.annotate {
        let ticks: Vec<(f64, f64)> = colorbar_ticks(scene, vmin, vmax)
            .into_iter()
            .filter_map(|v| norm.normalize(v).map(|t| (v, t.clamp(0.0, 1.0))))
            .collect();
        bar.draw_series(ticks.iter().map(|&(_, t)| {
            PathElement::new(vec![(1.0, t), (1.3, t)], rgb(css::BLACK).stroke_width(1))
        }))?;
        bar.draw_series(ticks.iter().map(|&(v, t)| {
            Text::new(format!("{:.2}", v), (1.4, t), ("sans-serif", 12).into_font())
        }))?;
    }

    Ok(())
}
