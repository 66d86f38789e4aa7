use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use prettytable::{Cell, Row as PrettyRow, Table};
use std::sync::Arc;
use tracing::info;

use dexcat::catalog::{CatalogSession, CategoryTag, EntityDetail, EntityRecord};
use dexcat::environment::CatalogConfig;
use dexcat::logging;
use dexcat::view::{self, SortOption};

const STAT_BAR_WIDTH: usize = 30;

#[derive(Parser)]
#[command(author, version, about = "Browse the creature catalog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one page of the catalog
    Page {
        /// Page number, clamped to the available range
        #[arg(default_value = "1")]
        number: u32,

        /// Only show entries of this type
        #[arg(short, long)]
        tag: Option<CategoryTag>,

        /// Sort order of the listing
        #[arg(short, long, value_enum, default_value_t = SortOption::Id)]
        sort: SortOption,
    },

    /// Look an entry up by name or id
    Search {
        /// Name or id; an empty term shows the first page
        term: String,
    },

    /// Show an entry with its stats and similar entries
    Detail {
        /// Name or id
        key: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::configure_logging();

    let cli = Cli::parse();

    let config = CatalogConfig::from_env().context("Failed to read catalog configuration")?;
    let session = CatalogSession::new(config).context("Failed to start catalog session")?;

    match cli.command {
        Commands::Page { number, tag, sort } => {
            let descriptor = *session.descriptor();
            let number = descriptor.clamp(number);
            let records = session.load_page(number).await;
            let records = view::filter_and_sort(&records, tag, sort);
            print_listing(&records);
            println!(
                "{}",
                format!("Page {} of {}", number, descriptor.total_pages).dimmed()
            );
        }
        Commands::Search { term } => {
            let records = session.search(&term).await;
            if records.is_empty() {
                println!("{}", format!("No entry matches '{}'", term).bright_yellow());
            } else {
                print_listing(&records);
            }
        }
        Commands::Detail { key } => match session.load_detail(&key).await {
            Some(detail) => print_detail(&detail),
            None => println!("{}", format!("No entry found for '{}'", key).bright_yellow()),
        },
    }

    info!("Cached {} entries this session", session.cache().len());
    Ok(())
}

fn print_listing(records: &[Arc<EntityRecord>]) {
    let mut table = Table::new();
    table.add_row(PrettyRow::new(vec![
        Cell::new("No."),
        Cell::new("Name"),
        Cell::new("Types"),
        Cell::new("Height"),
        Cell::new("Weight"),
    ]));

    for record in records {
        table.add_row(PrettyRow::new(vec![
            Cell::new(&view::display_id(record.id)),
            Cell::new(&record.name),
            Cell::new(&view::tag_list(record)),
            Cell::new(&format!("{}m", view::height_m(record))),
            Cell::new(&format!("{}kg", view::weight_kg(record))),
        ]));
    }

    table.printstd();
}

fn print_detail(detail: &EntityDetail) {
    let entity = &detail.entity;

    println!("\n{}", "═".repeat(60).bright_blue());
    println!(
        "{}  {}",
        view::display_id(entity.id).dimmed(),
        entity.name.to_uppercase().bold()
    );
    let tags: Vec<String> = entity
        .category_tags
        .iter()
        .map(|t| view::colored_tag(*t).to_string())
        .collect();
    println!("{}", tags.join(" "));
    println!("{}", "═".repeat(60).bright_blue());

    println!(
        "{}: {}m   {}: {}kg",
        "Height".bright_blue(),
        view::height_m(entity),
        "Weight".bright_blue(),
        view::weight_kg(entity)
    );
    println!("{}: {}", "Artwork".bright_blue(), entity.image_ref);

    println!("\n{}", "Base Stats".bright_blue());
    println!("{}", "─".repeat(60).dimmed());
    for attribute in &entity.attributes {
        println!(
            "{:<16} {:>3} {}",
            view::stat_label(&attribute.name),
            attribute.value,
            view::stat_bar(attribute.value, STAT_BAR_WIDTH).bright_blue()
        );
    }

    if !detail.similar.is_empty() {
        println!("\n{}", "Similar".bright_blue());
        print_listing(&detail.similar);
    }
}
