//! Chart projection for the language aggregate.
//!
//! The theme is an explicit argument; nothing here reads global display
//! state.

use serde::Serialize;

use crate::history::Theme;
use crate::summarize::LanguageAggregate;

const LANGUAGE_COLORS: &[(&str, &str)] = &[
    ("JavaScript", "#f1e05a"),
    ("TypeScript", "#3178c6"),
    ("Python", "#3572A5"),
    ("Java", "#b07219"),
    ("HTML", "#e34c26"),
    ("CSS", "#563d7c"),
    ("PHP", "#4F5D95"),
    ("Ruby", "#701516"),
    ("C++", "#f34b7d"),
    ("C", "#555555"),
    ("Shell", "#89e051"),
    ("Go", "#00ADD8"),
    ("Swift", "#F05138"),
    ("Kotlin", "#A97BFF"),
    ("Rust", "#dea584"),
    ("Vue", "#41b883"),
    ("Dart", "#00B4AB"),
    ("SCSS", "#C6538C"),
    ("Svelte", "#ff3e00"),
];

const OTHER_COLOR: &str = "#ccc";

/// Palette color for a language label. Unknown labels, and the `Other`
/// sentinel itself, share one neutral color.
#[must_use]
pub fn language_color(label: &str) -> &'static str {
    LANGUAGE_COLORS
        .iter()
        .find(|(name, _)| *name == label)
        .map_or(OTHER_COLOR, |(_, color)| *color)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    pub label: String,
    pub count: usize,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSpec {
    pub slices: Vec<ChartSlice>,
    pub legend_text_color: &'static str,
    pub border_color: &'static str,
}

impl ChartSpec {
    #[must_use]
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }
}

/// Builds the chart for `aggregate` under `theme`.
///
/// Returns `None` for an empty aggregate so the presenter can show its
/// neutral "no data" state.
#[must_use]
pub fn project_chart(aggregate: &LanguageAggregate, theme: Theme) -> Option<ChartSpec> {
    if aggregate.is_empty() {
        return None;
    }

    let slices = aggregate
        .iter()
        .map(|(label, count)| ChartSlice {
            label: label.to_owned(),
            count,
            color: language_color(label),
        })
        .collect();

    let (legend_text_color, border_color) = match theme {
        Theme::Light => ("#57606a", "#ffffff"),
        Theme::Dark => ("#e6edf3", "#0d1117"),
    };

    Some(ChartSpec {
        slices,
        legend_text_color,
        border_color,
    })
}
