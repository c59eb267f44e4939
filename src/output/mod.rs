use colored::{Color, Colorize};
use itertools::Itertools;

use crate::model::{Pokemon, TypeTag};
use crate::paginate::Paginator;
use crate::store::DetailFailure;

const STAT_BAR_WIDTH: usize = 30;
const STAT_BAR_SCALE: u32 = 150;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

fn type_color(tag: TypeTag) -> Color {
    match tag {
        TypeTag::Normal => Color::White,
        TypeTag::Fire => Color::Red,
        TypeTag::Water => Color::Blue,
        TypeTag::Electric => Color::Yellow,
        TypeTag::Grass => Color::Green,
        TypeTag::Ice => Color::Cyan,
        TypeTag::Fighting => Color::BrightRed,
        TypeTag::Poison => Color::Magenta,
        TypeTag::Ground => Color::BrightYellow,
        TypeTag::Flying => Color::BrightBlue,
        TypeTag::Psychic => Color::BrightMagenta,
        TypeTag::Bug => Color::BrightGreen,
        TypeTag::Rock => Color::Yellow,
        TypeTag::Ghost => Color::Magenta,
        TypeTag::Dragon => Color::Blue,
        TypeTag::Dark => Color::BrightBlack,
        TypeTag::Steel => Color::White,
        TypeTag::Fairy => Color::BrightMagenta,
    }
}

pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Pokédex numbers render zero-padded to three digits, like the games.
pub fn format_id(id: u32) -> String {
    format!("#{id:03}")
}

fn format_type_badges(types: &[TypeTag]) -> String {
    types
        .iter()
        .map(|t| format!("[{}]", t.as_str()).as_str().color(type_color(*t)).to_string())
        .join(" ")
}

fn format_base_experience(exp: Option<u32>) -> String {
    match exp {
        Some(exp) => exp.to_string(),
        None => "N/A".to_string(),
    }
}

/// One catalog row: dex number, name, type badges, base experience.
pub fn render_card(pokemon: &Pokemon) -> String {
    format!(
        "{} {:<12} {:<24} exp {}",
        format_id(pokemon.id).as_str().bold(),
        capitalize(&pokemon.name),
        format_type_badges(&pokemon.types),
        format_base_experience(pokemon.base_experience),
    )
}

pub fn render_listing(page: &[Pokemon]) -> String {
    let mut out = String::new();
    for pokemon in page {
        out.push_str(&render_card(pokemon));
        out.push('\n');
    }
    out
}

pub fn render_empty_notice(search_term: &str) -> String {
    if search_term.is_empty() {
        "No records match the current filters.".to_string()
    } else {
        format!("No records match \"{search_term}\" with the current filters.")
    }
}

pub fn render_incomplete_notice(failures: &[DetailFailure]) -> String {
    let mut out = format!(
        "{} {} record(s) failed to load and are omitted from the catalog:",
        "warning:".yellow().bold(),
        failures.len()
    );
    for failure in failures {
        out.push_str(&format!("\n  - {}: {}", failure.name, failure.reason));
    }
    out
}

fn render_stat_bar(value: u32) -> String {
    let filled = (value.min(STAT_BAR_SCALE) as usize * STAT_BAR_WIDTH) / STAT_BAR_SCALE as usize;
    let mut bar = String::with_capacity(STAT_BAR_WIDTH);
    for i in 0..STAT_BAR_WIDTH {
        bar.push(if i < filled { '█' } else { '░' });
    }
    bar
}

/// The full single-record view: measurements in metric units, type badges,
/// abilities with a hidden marker, and stat bars on a 0-150 scale.
pub fn render_detail(pokemon: &Pokemon) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n",
        format_id(pokemon.id).as_str().bold(),
        capitalize(&pokemon.name).as_str().bold()
    ));
    out.push_str(&format!("Types    : {}\n", format_type_badges(&pokemon.types)));
    // the wire format carries decimetres and hectograms
    out.push_str(&format!("Height   : {:.1} m\n", pokemon.height as f64 / 10.0));
    out.push_str(&format!("Weight   : {:.1} kg\n", pokemon.weight as f64 / 10.0));
    out.push_str(&format!(
        "Base Exp : {}\n",
        format_base_experience(pokemon.base_experience)
    ));
    if !pokemon.abilities.is_empty() {
        let abilities = pokemon
            .abilities
            .iter()
            .map(|a| {
                if a.is_hidden {
                    format!("{} (hidden)", capitalize(&a.name))
                } else {
                    capitalize(&a.name)
                }
            })
            .join(", ");
        out.push_str(&format!("Abilities: {abilities}\n"));
    }
    if !pokemon.stats.is_empty() {
        out.push_str("Stats    :\n");
        for stat in &pokemon.stats {
            out.push_str(&format!(
                "  {:<16} {:>3} {}\n",
                stat.name,
                stat.base_stat,
                render_stat_bar(stat.base_stat)
            ));
        }
    }
    if let Some(image) = pokemon.image_url() {
        out.push_str(&format!("Artwork  : {image}\n"));
    }
    out
}

/// The page-control row. Suppressed entirely when everything fits on one
/// page, matching the listing view contract.
pub fn render_pagination(paginator: &Paginator) -> Option<String> {
    if paginator.total_pages() <= 1 {
        return None;
    }

    let window = paginator.page_window();
    let mut parts: Vec<String> = Vec::new();

    if paginator.is_first_page() {
        parts.push("[prev]".dimmed().to_string());
    } else {
        parts.push("[prev]".to_string());
    }
    if window.leading_jump {
        parts.push("1".to_string());
        parts.push("...".dimmed().to_string());
    }
    for page in &window.pages {
        if *page == paginator.current_page() {
            parts.push(page.to_string().as_str().bold().underline().to_string());
        } else {
            parts.push(page.to_string());
        }
    }
    if window.trailing_jump {
        parts.push("...".dimmed().to_string());
        parts.push(paginator.total_pages().to_string());
    }
    if paginator.is_last_page() {
        parts.push("[next]".dimmed().to_string());
    } else {
        parts.push("[next]".to_string());
    }

    let meta = paginator.metadata();
    Some(format!(
        "Showing {} - {} of {}\n{}",
        meta.showing_start,
        meta.showing_end,
        meta.total_items,
        parts.join(" ")
    ))
}

/// Plain one-line-per-record form for file output.
pub fn render_text(records: &[Pokemon]) -> Vec<u8> {
    let mut out = String::new();
    for r in records {
        let types = r.types.iter().map(|t| t.as_str()).join(",");
        out.push_str(&format!(
            "{} {} types={} exp={}\n",
            format_id(r.id),
            r.name,
            types,
            format_base_experience(r.base_experience)
        ));
    }
    out.into_bytes()
}

pub fn render_json(records: &[Pokemon]) -> Vec<u8> {
    serde_json::to_vec_pretty(records).unwrap_or_else(|_| b"[]\n".to_vec())
}
