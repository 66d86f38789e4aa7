//! Presentation helpers for rendering catalog records in a terminal.

use colored::{ColoredString, Colorize};
use std::sync::Arc;

use crate::catalog::{CategoryTag, EntityId, EntityRecord};

const STAT_MAX: f64 = 255.0;

/// Ordering applied to a listing before display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortOption {
    #[default]
    Id,
    #[value(name = "a-z")]
    AToZ,
    #[value(name = "z-a")]
    ZToA,
}

/// Keeps records carrying `tag` (all records when `None`) and orders them.
pub fn filter_and_sort(
    records: &[Arc<EntityRecord>],
    tag: Option<CategoryTag>,
    sort: SortOption,
) -> Vec<Arc<EntityRecord>> {
    let mut kept: Vec<Arc<EntityRecord>> = records
        .iter()
        .filter(|r| tag.map_or(true, |t| r.has_tag(t)))
        .cloned()
        .collect();

    match sort {
        SortOption::Id => kept.sort_by_key(|r| r.id),
        SortOption::AToZ => kept.sort_by(|a, b| a.name.cmp(&b.name)),
        SortOption::ZToA => kept.sort_by(|a, b| b.name.cmp(&a.name)),
    }
    kept
}

/// `#025` style display number.
pub fn display_id(id: EntityId) -> String {
    format!("#{:03}", id)
}

pub fn height_m(record: &EntityRecord) -> f64 {
    f64::from(record.measurements.primary) / 10.0
}

pub fn weight_kg(record: &EntityRecord) -> f64 {
    f64::from(record.measurements.secondary) / 10.0
}

pub fn stat_label(name: &str) -> String {
    name.replacen('-', " ", 1)
}

/// Horizontal bar of `width` cells filled in proportion to `value / 255`.
pub fn stat_bar(value: u8, width: usize) -> String {
    let filled = ((f64::from(value) / STAT_MAX) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn tag_rgb(tag: CategoryTag) -> (u8, u8, u8) {
    match tag {
        CategoryTag::Normal => (0xA8, 0xA7, 0x7A),
        CategoryTag::Fire => (0xEE, 0x81, 0x30),
        CategoryTag::Water => (0x63, 0x90, 0xF0),
        CategoryTag::Electric => (0xF7, 0xD0, 0x2C),
        CategoryTag::Grass => (0x7A, 0xC7, 0x4C),
        CategoryTag::Ice => (0x96, 0xD9, 0xD6),
        CategoryTag::Fighting => (0xC2, 0x2E, 0x28),
        CategoryTag::Poison => (0xA3, 0x3E, 0xA1),
        CategoryTag::Ground => (0xE2, 0xBF, 0x65),
        CategoryTag::Flying => (0xA9, 0x8F, 0xF3),
        CategoryTag::Psychic => (0xF9, 0x55, 0x87),
        CategoryTag::Bug => (0xA6, 0xB9, 0x1A),
        CategoryTag::Rock => (0xB6, 0xA1, 0x36),
        CategoryTag::Ghost => (0x73, 0x57, 0x97),
        CategoryTag::Dragon => (0x6F, 0x35, 0xFC),
        CategoryTag::Dark => (0x70, 0x57, 0x46),
        CategoryTag::Steel => (0xB7, 0xB7, 0xCE),
        CategoryTag::Fairy => (0xD6, 0x85, 0xAD),
    }
}

pub fn colored_tag(tag: CategoryTag) -> ColoredString {
    let (r, g, b) = tag_rgb(tag);
    format!(" {} ", tag).white().on_truecolor(r, g, b)
}

pub fn tag_list(record: &EntityRecord) -> String {
    record
        .category_tags
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
