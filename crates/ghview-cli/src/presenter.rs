//! Terminal rendering of lookup results.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use ghview_core::{
    project_chart, project_profile, project_repository, ChartSpec, LookupFailure, LookupResult,
    Presenter, ProfileView, ProjectedField, RepositorySection, RepositoryStatus, Theme,
};

const BAR_WIDTH: usize = 24;
const RESET: &str = "\x1b[0m";

/// ANSI styling, or plain text when color is off.
#[derive(Debug, Clone, Copy)]
struct Style {
    color: bool,
}

impl Style {
    fn wrap(self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_owned()
        }
    }

    fn bold(self, text: &str) -> String {
        self.wrap("\x1b[1m", text)
    }

    fn dim(self, text: &str) -> String {
        self.wrap("\x1b[2m", text)
    }

    fn fg(self, hex: &str, text: &str) -> String {
        match parse_hex_color(hex) {
            Some((r, g, b)) => self.wrap(&format!("\x1b[38;2;{r};{g};{b}m"), text),
            None => text.to_owned(),
        }
    }
}

/// Parses `#rgb` and `#rrggbb`.
fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    match digits.len() {
        3 => Some((
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        6 => Some((channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        _ => None,
    }
}

fn field_line(style: Style, label: &str, field: &ProjectedField) -> String {
    let text = if field.is_defaulted {
        style.dim(&field.text)
    } else {
        field.text.clone()
    };
    match &field.link {
        Some(link) if *link != field.text => format!("  {label:<10}{text}  <{link}>"),
        _ => format!("  {label:<10}{text}"),
    }
}

fn profile_lines(style: Style, view: &ProfileView) -> Vec<String> {
    let card = project_profile(&view.profile);
    let mut heading = format!("{} ({})", style.bold(&card.display_name), card.handle);
    if card.hireable {
        heading.push_str("  [available for hire]");
    }

    vec![
        heading,
        field_line(style, "", &card.bio),
        field_line(style, "Location", &card.location),
        field_line(style, "Company", &card.company),
        field_line(style, "Website", &card.blog),
        field_line(style, "Twitter", &card.twitter),
        field_line(style, "Email", &card.email),
        field_line(style, "Joined", &card.joined),
        format!("  {:<10}{}", "Profile", card.profile_url),
        format!(
            "  Followers {}  Following {}  Repos {}  Gists {}",
            card.followers, card.following, card.public_repos, card.public_gists
        ),
    ]
}

fn chart_lines(style: Style, chart: &ChartSpec) -> Vec<String> {
    let total = chart.total().max(1);
    let widest = chart.slices.iter().map(|s| s.count).max().unwrap_or(1).max(1);
    let label_width = chart
        .slices
        .iter()
        .map(|s| s.label.chars().count())
        .max()
        .unwrap_or(0);

    chart
        .slices
        .iter()
        .map(|slice| {
            let bar = "█".repeat((slice.count * BAR_WIDTH / widest).max(1));
            let label = format!("{:<label_width$}", slice.label);
            format!(
                "  {}  {}  {} ({}%)",
                style.fg(chart.legend_text_color, &label),
                style.fg(slice.color, &bar),
                slice.count,
                slice.count * 100 / total
            )
        })
        .collect()
}

fn section_lines(style: Style, theme: Theme, section: &RepositorySection) -> Vec<String> {
    let mut lines = vec![style.bold(&format!("Top repositories (by {})", section.sort))];

    match &section.status {
        RepositoryStatus::Loaded => {
            for repo in &section.repositories {
                let card = project_repository(repo);
                let language = card.language.as_ref().map_or_else(String::new, |(name, color)| {
                    format!("  {}", style.fg(color, name))
                });
                lines.push(format!(
                    "  {}  ★ {}  ⑂ {}{}  updated {}",
                    style.bold(&card.name),
                    card.stars,
                    card.forks,
                    language,
                    card.updated
                ));
                lines.push(field_line(style, "", &card.description));
                lines.push(format!("  {:<10}{}", "", card.url));
            }
        }
        RepositoryStatus::Empty => lines.push(style.dim("  No public repositories.")),
        RepositoryStatus::Degraded { message } => lines.push(format!("  {}", style.dim(message))),
    }

    lines.push(String::new());
    lines.push(style.bold("Languages"));
    match project_chart(&section.languages, theme) {
        Some(chart) => lines.extend(chart_lines(style, &chart)),
        None => lines.push(style.dim("  No language data.")),
    }
    lines
}

fn failure_lines(style: Style, failure: &LookupFailure) -> Vec<String> {
    vec![
        style.bold(&format!("✖ {}", failure.title())),
        format!("  {}", failure.user_message()),
    ]
}

/// Renders a complete lookup result as text.
#[must_use]
pub fn render_result(result: &LookupResult, theme: Theme, color: bool) -> String {
    let style = Style { color };
    let lines = match result {
        LookupResult::Success(view) => {
            let mut lines = profile_lines(style, view);
            lines.push(String::new());
            lines.extend(section_lines(style, theme, &view.section));
            lines
        }
        LookupResult::Failure(failure) => failure_lines(style, failure),
    };
    lines.join("\n")
}

/// Renders only the repository section and its chart.
#[must_use]
pub fn render_section(section: &RepositorySection, theme: Theme, color: bool) -> String {
    section_lines(Style { color }, theme, section).join("\n")
}

/// [`Presenter`] that writes to a terminal stream.
///
/// The theme is held here and passed into chart projection on every render.
pub struct TerminalPresenter<W> {
    out: Mutex<W>,
    theme: Mutex<Theme>,
    color: bool,
}

impl TerminalPresenter<io::Stdout> {
    #[must_use]
    pub fn stdout(theme: Theme, color: bool) -> Self {
        Self::new(io::stdout(), theme, color)
    }
}

impl<W: Write + Send> TerminalPresenter<W> {
    #[must_use]
    pub fn new(out: W, theme: Theme, color: bool) -> Self {
        Self {
            out: Mutex::new(out),
            theme: Mutex::new(theme),
            color,
        }
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        *self.theme.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_theme(&self, theme: Theme) {
        *self.theme.lock().unwrap_or_else(PoisonError::into_inner) = theme;
    }

    /// Writes a free-form line, used for command feedback.
    pub fn notice(&self, text: &str) {
        self.emit(text);
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(out, "{text}").and_then(|()| out.flush()) {
            tracing::warn!(error = %e, "failed to write to terminal");
        }
    }
}

impl<W: Write + Send> Presenter for TerminalPresenter<W> {
    fn render(&self, result: &LookupResult) {
        self.emit(&render_result(result, self.theme(), self.color));
    }

    fn render_loading(&self, loading: bool) {
        if loading {
            self.emit(&Style { color: self.color }.dim("Searching…"));
        }
    }

    fn render_repositories(&self, section: &RepositorySection) {
        self.emit(&render_section(section, self.theme(), self.color));
    }
}

#[cfg(test)]
#[path = "presenter_test.rs"]
mod tests;
