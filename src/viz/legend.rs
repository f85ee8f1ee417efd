//! Legend entries for the balance panel and the single-row legend band.

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::color::{ColorMap, DECORATION};
use super::types::LegendEntry;
use super::util::text_width_px;
use crate::error::{PlotError, Result};
use crate::models::TimeseriesTable;

// Layout constants shared by the estimator and the drawing code.
const FONT_PX: u32 = 14;
const SWATCH_PX: i32 = 12;
const SWATCH_TO_TEXT_GAP: i32 = 6;
const ENTRY_GAP: i32 = 18;

/// Build legend entries: every created column in order, then consumed-only
/// columns that are not all-zero.
///
/// Every swatch is outlined in the decoration color regardless of its side.
pub fn build_legend(
    created: &TimeseriesTable,
    consumed: &TimeseriesTable,
    colors: &ColorMap,
) -> Vec<LegendEntry> {
    let outline = colors.to_color(DECORATION);
    let entry = |name: &str| LegendEntry {
        label: name.to_string(),
        color: colors.to_color(name),
        outline,
    };

    let mut entries: Vec<LegendEntry> = created.column_names().into_iter().map(entry).collect();
    for series in consumed.columns() {
        if created.contains(&series.name) || series.is_all_zero() {
            continue;
        }
        entries.push(entry(&series.name));
    }
    entries
}

fn entry_width_px(entry: &LegendEntry) -> i32 {
    SWATCH_PX + SWATCH_TO_TEXT_GAP + text_width_px(&entry.label, FONT_PX) as i32
}

/// Total width of the legend row in pixels (one column per entry, no wrapping).
pub fn legend_row_width_px(entries: &[LegendEntry]) -> i32 {
    let items: i32 = entries.iter().map(entry_width_px).sum();
    let gaps = ENTRY_GAP * (entries.len().saturating_sub(1) as i32);
    items + gaps
}

/// Height of the legend band.
pub fn legend_band_height_px() -> i32 {
    FONT_PX as i32 + 16
}

/// Draw all entries as one centered horizontal row.
pub fn draw_legend_row<DB: DrawingBackend>(
    legend_area: &DrawingArea<DB, Shift>,
    entries: &[LegendEntry],
) -> Result<()> {
    legend_area
        .fill(&WHITE)
        .map_err(PlotError::render)?;
    if entries.is_empty() {
        return Ok(());
    }

    let (w_u32, h_u32) = legend_area.dim_in_pixel();
    let (w, h) = (w_u32 as i32, h_u32 as i32);
    let center_y = h / 2;
    let label_style: TextStyle =
        TextStyle::from((FontFamily::SansSerif, FONT_PX)).pos(Pos::new(HPos::Left, VPos::Center));

    // Overlong rows start at the left edge and clip on the right.
    let mut x = ((w - legend_row_width_px(entries)) / 2).max(0);
    for entry in entries {
        let top_left = (x, center_y - SWATCH_PX / 2);
        let bottom_right = (x + SWATCH_PX, center_y + SWATCH_PX / 2);
        let fill: RGBColor = entry.color.into();
        let outline: RGBColor = entry.outline.into();
        legend_area
            .draw(&Rectangle::new([top_left, bottom_right], fill.filled()))
            .map_err(PlotError::render)?;
        legend_area
            .draw(&Rectangle::new([top_left, bottom_right], outline.stroke_width(1)))
            .map_err(PlotError::render)?;
        legend_area
            .draw(&Text::new(
                entry.label.as_str(),
                (x + SWATCH_PX + SWATCH_TO_TEXT_GAP, center_y),
                label_style.clone(),
            ))
            .map_err(PlotError::render)?;
        x += entry_width_px(entry) + ENTRY_GAP;
    }
    Ok(())
}
