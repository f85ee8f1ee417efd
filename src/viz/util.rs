//! Tick label formatting and gutter sizing.

use num_format::{Locale, ToFormattedString};

/// Rough pixel width of `text` at `font_px`; Plotters cannot measure text up front.
pub fn text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Map a user-provided locale tag to a `num_format::Locale`.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en, // default
    }
}

/// Whole-number tick label with thousands grouping, e.g. `12,500`.
///
/// The fractional part is cut off, not rounded.
pub fn group_thousands(v: f64, locale: &Locale) -> String {
    let n = v.trunc() as i64;
    n.to_formatted_string(locale)
}

/// Left gutter width for `ticks` evenly spaced y labels between `ymin` and `ymax`.
pub fn compute_left_label_area_px(
    ymin: f64,
    ymax: f64,
    ticks: usize,
    font_px: u32,
    locale: &Locale,
) -> u32 {
    let mut max_px = 0u32;
    for i in 0..=ticks {
        let t = if ticks == 0 {
            0.0
        } else {
            i as f64 / ticks as f64
        };
        let s = group_thousands(ymin + (ymax - ymin) * t, locale);
        max_px = max_px.max(text_width_px(&s, font_px));
    }

    // Room for the axis description next to the labels.
    let with_padding = max_px.saturating_add(36);
    with_padding.clamp(56, 160)
}
