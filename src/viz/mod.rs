//! Visualization: compose commodity balance charts and render them to **SVG** or **PNG**.
//!
//! - Upper panel: stacked created (above zero) and consumed (below zero) flows plus a demand line
//! - Lower panel: buy/sell price curves or storage state of charge
//! - Layers sorted by variance so base load sits at the bottom of each stack
//! - One-row legend below the upper panel; tick spacing adapted to the horizon length
//! - Locale-aware, thousands-grouped y tick labels (`30,000` vs `30.000`)
//!
//! [`figure`] only composes a [`Figure`]; call [`Figure::save`] to write it.

pub mod axis;
pub mod color;
pub mod legend;
pub mod reshape;
pub mod secondary;
pub mod sort;
pub mod stack;
pub mod types;
pub mod util;

// Re-export types for public API
pub use color::{ColorMap, Rgb};
pub use reshape::Balance;
pub use types::{
    AxisSpec, Figure, FigureOptions, LegendEntry, LineOverlay, Panel, SecondaryKind, StackLayer,
};

use crate::error::{PlotError, Result};
use crate::models::Timestep;
use crate::results::ResultSource;
use num_format::Locale;

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::LineSeries;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;
use std::sync::Once;

use axis::axis_spec;
use legend::{build_legend, draw_legend_row, legend_band_height_px};
use reshape::reshape;
use secondary::{price_panel, storage_panel};
use sort::sort_plot_elements;
use stack::{consumed_layers, created_layers, demand_line};
use util::{compute_left_label_area_px, group_thousands, map_locale};

/// One-time registration for a fallback "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    // Safe to call many times; only runs once.
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

/// Fetch, reshape and sort the balance of `commodity` in `site` over `timesteps`.
pub fn sorted_balance<S: ResultSource + ?Sized>(
    source: &S,
    commodity: &str,
    site: &str,
    timesteps: &[Timestep],
) -> Result<Balance> {
    let raw = source.get_timeseries(commodity, site, timesteps)?;
    let Balance {
        created,
        consumed,
        demand,
        level,
    } = reshape(raw)?;
    let (created, consumed) = sort_plot_elements(created, consumed);
    Ok(Balance {
        created,
        consumed,
        demand,
        level,
    })
}

/// Compose the two-panel balance chart of `commodity` in `site`.
///
/// Fails when the balance has no `Demand` series or a storage flow is
/// missing. Missing price or capacity data only leaves the lower panel empty
/// or auto-scaled.
pub fn figure<S: ResultSource + ?Sized>(
    source: &S,
    colors: &ColorMap,
    commodity: &str,
    site: &str,
    timesteps: Option<&[Timestep]>,
    options: &FigureOptions,
) -> Result<Figure> {
    let mut timesteps: Vec<Timestep> = match timesteps {
        Some(t) => t.to_vec(),
        None => source.timesteps(),
    };
    timesteps.sort_unstable();
    timesteps.dedup();
    if timesteps.is_empty() {
        return Err(PlotError::EmptyHorizon);
    }

    let balance = sorted_balance(source, commodity, site, &timesteps)?;

    let mut layers = created_layers(&balance.created, colors);
    layers.extend(consumed_layers(&balance.consumed, colors));
    let legend = build_legend(&balance.created, &balance.consumed, colors);

    let title = match options.title_prefix.as_deref() {
        Some(prefix) if !prefix.trim().is_empty() => {
            format!("{}: Energy balance of {} in {}", prefix.trim(), commodity, site)
        }
        _ => format!("Energy balance of {} in {}", commodity, site),
    };
    let primary = Panel {
        title: Some(title),
        x_label: None,
        y_label: format!("Power ({})", options.power_unit),
        layers,
        lines: vec![demand_line(&balance.demand, colors)],
        y_limits: None,
        show_x_labels: false,
    };

    let secondary = match options.secondary {
        SecondaryKind::Prices => price_panel(source, site, &timesteps, colors)?,
        SecondaryKind::Storage => storage_panel(
            &balance.level,
            &source.get_constants(),
            site,
            commodity,
            &options.energy_unit,
            colors,
        ),
    };

    let axis = axis_spec(&timesteps, colors)?;
    log::debug!(
        "composed {} in {}: {} layers, {} legend entries, tick stride {}",
        commodity,
        site,
        primary.layers.len(),
        legend.len(),
        axis.stride
    );

    Ok(Figure {
        timesteps,
        primary,
        secondary,
        legend,
        axis,
    })
}

/// Y-range of a panel: fixed limits if set, else the data extent with 5% padding.
pub fn panel_y_range(panel: &Panel) -> (f64, f64) {
    if let Some(limits) = panel.y_limits {
        return limits;
    }
    let values = panel
        .layers
        .iter()
        .flat_map(|l| l.lower.iter().chain(&l.upper))
        .chain(panel.lines.iter().flat_map(|l| l.values.iter()))
        .copied()
        .filter(|v| v.is_finite());
    let (mut lo, mut hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if (hi - lo).abs() < f64::EPSILON {
        lo -= 1.0;
        hi += 1.0;
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

impl Figure {
    /// Write the chart to `out_path`; `.svg` selects SVG, anything else PNG.
    pub fn save<P: AsRef<Path>>(
        &self,
        out_path: P,
        width: u32,
        height: u32,
        locale_tag: &str,
    ) -> Result<()> {
        ensure_fonts_registered();
        let out_path = out_path.as_ref();
        let path_string = out_path.to_string_lossy().into_owned();
        let locale = map_locale(locale_tag);

        if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
            let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
            self.draw(root, locale)?;
        } else {
            let root =
                BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
            self.draw(root, locale)?;
        }
        log::info!("wrote chart to {}", out_path.display());
        Ok(())
    }

    /// Draw both panels and the legend onto any Plotters backend.
    ///
    /// Layout from top to bottom: balance panel, legend band, secondary panel,
    /// with the two panels at a 2:1 height ratio.
    pub fn draw<DB: DrawingBackend>(
        &self,
        root: DrawingArea<DB, Shift>,
        locale: &Locale,
    ) -> Result<()> {
        root.fill(&WHITE).map_err(PlotError::render)?;

        let (_, root_h) = root.dim_in_pixel();
        let legend_h = legend_band_height_px();
        let plot_h = (root_h as i32 - legend_h).max(60);
        let primary_h = plot_h * 2 / 3;

        let (primary_area, rest) = root.split_vertically(primary_h);
        let (legend_area, secondary_area) = rest.split_vertically(legend_h);

        // Shared left gutter keeps both x-axes aligned.
        let left_px = [&self.primary, &self.secondary]
            .iter()
            .map(|p| {
                let (lo, hi) = panel_y_range(p);
                compute_left_label_area_px(lo, hi, Y_LABELS, 12, locale)
            })
            .max()
            .unwrap_or(80);

        let xs: Vec<f64> = self.timesteps.iter().map(|t| *t as f64).collect();
        draw_panel(&primary_area, &self.primary, &self.axis, &xs, locale, left_px)?;
        draw_legend_row(&legend_area, &self.legend)?;
        draw_panel(&secondary_area, &self.secondary, &self.axis, &xs, locale, left_px)?;

        root.present().map_err(PlotError::render)?;
        Ok(())
    }
}

const MARGIN: u32 = 16;
const Y_LABELS: usize = 8;

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
    axis: &AxisSpec,
    xs: &[f64],
    locale: &Locale,
    left_px: u32,
) -> Result<()> {
    let x_min = axis.x_range.0 as f64;
    let mut x_max = axis.x_range.1 as f64;
    if x_max <= x_min {
        x_max = x_min + 1.0;
    }
    let (y_min, y_max) = panel_y_range(panel);

    let decoration: RGBColor = axis.decoration.into();
    let grid: RGBColor = axis.grid.into();

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(MARGIN)
        .set_label_area_size(LabelAreaPosition::Left, left_px)
        .set_label_area_size(
            LabelAreaPosition::Bottom,
            if panel.show_x_labels { 48 } else { 8 },
        );
    if let Some(title) = panel.title.as_deref() {
        builder.caption(title, (FontFamily::SansSerif, 20));
    }
    let mut chart = builder
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(PlotError::render)?;

    // Frame off: only the axis lines remain, in the decoration color.
    // Major y gridlines come from the mesh, x gridlines are drawn at our own ticks.
    let y_label_fmt = |v: &f64| group_thousands(*v, locale);
    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh()
        .x_labels(0)
        .y_labels(Y_LABELS)
        .y_label_formatter(&y_label_fmt)
        .y_desc(panel.y_label.as_str())
        .bold_line_style(grid)
        .light_line_style(TRANSPARENT)
        .axis_style(decoration)
        .set_all_tick_mark_size(0)
        .label_style((FontFamily::SansSerif, 12))
        .axis_desc_style((FontFamily::SansSerif, 14));
    if let Some(x_label) = panel.x_label.as_deref() {
        mesh.x_desc(x_label);
    }
    mesh.draw().map_err(PlotError::render)?;

    chart
        .draw_series(axis.x_ticks.iter().map(|t| {
            let x = *t as f64;
            PathElement::new(vec![(x, y_min), (x, y_max)], grid.stroke_width(1))
        }))
        .map_err(PlotError::render)?;

    for layer in &panel.layers {
        let fill: RGBColor = layer.fill.into();
        let outline: RGBColor = layer.outline.into();
        // polygon: lower (forward) + upper (reverse)
        let mut poly: Vec<(f64, f64)> = Vec::with_capacity(layer.upper.len() * 2);
        poly.extend(xs.iter().copied().zip(layer.lower.iter().copied()));
        poly.extend(xs.iter().copied().zip(layer.upper.iter().copied()).rev());
        if poly.is_empty() {
            continue;
        }
        let mut border = poly.clone();
        border.push(poly[0]);
        chart
            .draw_series(std::iter::once(Polygon::new(poly, fill.filled())))
            .map_err(PlotError::render)?;
        chart
            .draw_series(std::iter::once(PathElement::new(
                border,
                outline.stroke_width(1),
            )))
            .map_err(PlotError::render)?;
    }

    for line in panel.lines.iter().filter(|l| !l.is_empty()) {
        let color: RGBColor = line.color.into();
        let points: Vec<(f64, f64)> = xs.iter().copied().zip(line.values.iter().copied()).collect();
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(line.width)))
            .map_err(PlotError::render)?;
    }

    if panel.show_x_labels {
        let (x_px, y_px) = area.get_pixel_range();
        let base = (x_px.start, y_px.start);
        let style: TextStyle = TextStyle::from((FontFamily::SansSerif, 12))
            .pos(Pos::new(HPos::Center, VPos::Top));
        for t in &axis.x_ticks {
            let (px, py) = chart.backend_coord(&(*t as f64, y_min));
            area.draw(&Text::new(
                t.to_string(),
                (px - base.0, py - base.1 + 6),
                style.clone(),
            ))
            .map_err(PlotError::render)?;
        }
    }
    Ok(())
}
