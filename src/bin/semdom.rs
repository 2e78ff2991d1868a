//! CLI browser for a semantic-domain taxonomy.
//!
//! Loads the configured per-language sources, merges them and lets you walk
//! the resulting tree from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Print the top two levels
//! cargo run --bin semdom -- tree --depth 1
//!
//! # Print a subtree
//! cargo run --bin semdom -- tree --root 1.1
//!
//! # Show one domain with its breadcrumb and children
//! cargo run --bin semdom -- show 1.1.1
//!
//! # Search names, then descriptions
//! cargo run --bin semdom -- search sun --lang en
//!
//! # Restore a domain from a stored guid
//! cargo run --bin semdom -- guid 999581c4-1611-4acb-ae1b-5e6c1dfe6f0c
//! ```
//!
//! # Environment Variables
//!
//! See [`semantic_domains::config`]; `SEMDOM_SOURCES` is required.

use semantic_domains::application::services::{Taxonomy, TaxonomyService};
use semantic_domains::config;
use semantic_domains::domain::hierarchy::Node;
use semantic_domains::domain::search::MatchField;
use semantic_domains::telemetry;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use uuid::Uuid;

/// Browse a semantic-domain taxonomy.
#[derive(Parser)]
#[command(name = "semdom")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Display language (defaults to SEMDOM_DEFAULT_LANG)
    #[arg(short, long, global = true)]
    lang: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Print the tree, or a subtree
    Tree {
        /// Start below this code instead of the roots
        #[arg(short, long)]
        root: Option<String>,

        /// Maximum depth to print, relative to the start
        #[arg(short, long)]
        depth: Option<usize>,
    },

    /// Show one domain with breadcrumb, description and children
    Show {
        /// Dotted code, e.g. 1.2.3
        code: String,
    },

    /// Print the breadcrumb from the root to a domain
    Path {
        /// Dotted code, e.g. 1.2.3
        code: String,
    },

    /// Search names, then descriptions
    Search {
        /// Text to look for (case-insensitive)
        query: String,

        /// Maximum number of hits (defaults to SEMDOM_SEARCH_LIMIT)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Resolve a stored guid to its current position
    Guid {
        guid: Uuid,
    },

    /// Show what was loaded
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    telemetry::init_tracing(&config);
    config.print_summary();

    let service = TaxonomyService::new(config.record_sources(), config.default_language.clone());
    let taxonomy = service
        .load_taxonomy()
        .await
        .context("Failed to load taxonomy")?;

    let lang = cli
        .lang
        .unwrap_or_else(|| config.default_language.clone());

    match cli.command {
        Commands::Tree { root, depth } => print_tree(&taxonomy, &lang, root.as_deref(), depth)?,
        Commands::Show { code } => show_domain(&taxonomy, &lang, &code)?,
        Commands::Path { code } => print_path(&taxonomy, &lang, &code)?,
        Commands::Search { query, limit } => {
            search(&taxonomy, &lang, &query, limit.unwrap_or(config.search_limit))?
        }
        Commands::Guid { guid } => resolve_guid(&taxonomy, &lang, &guid)?,
        Commands::Info => print_info(&taxonomy)?,
    }

    Ok(())
}

fn label(taxonomy: &Taxonomy, node: &Node, lang: &str) -> String {
    node.label(lang, taxonomy.default_language())
}

/// Prints nodes indented by depth, in code order.
fn print_tree(
    taxonomy: &Taxonomy,
    lang: &str,
    root: Option<&str>,
    max_depth: Option<usize>,
) -> Result<()> {
    let index = taxonomy.index();

    let (nodes, base_depth) = match root {
        Some(code) => {
            let start = index
                .get(code)?
                .with_context(|| format!("Domain {} not found", code))?;
            let nodes = index.descendants(code)?.unwrap_or_default();
            (nodes, start.depth() + 1)
        }
        None => (index.iter()?.collect(), 0),
    };

    for node in nodes {
        let relative = node.depth() - base_depth;
        if max_depth.is_some_and(|max| relative > max) {
            continue;
        }
        let indent = "  ".repeat(relative);
        let text = label(taxonomy, node, lang);
        if node.is_leaf() {
            println!("{}{}", indent, text);
        } else {
            println!("{}{}", indent, text.bold());
        }
    }

    Ok(())
}

fn show_domain(taxonomy: &Taxonomy, lang: &str, code: &str) -> Result<()> {
    let index = taxonomy.index();
    let Some(node) = index.get(code)? else {
        println!("{}", format!("Domain {} not found", code).red());
        return Ok(());
    };

    print_path(taxonomy, lang, code)?;
    println!();
    println!("{} {}", "Guid:".bright_black(), node.guid());
    println!("{} {}", "Id:".bright_black(), node.record().id);
    if !node.record().predefined {
        println!("{}", "Project-local domain".yellow());
    }

    let names: Vec<String> = node
        .record()
        .name
        .iter()
        .map(|(l, n)| format!("{}: {}", l, n))
        .collect();
    println!("{} {}", "Names:".bright_black(), names.join(", "));

    if let Some(description) = node
        .record()
        .description
        .best(lang, taxonomy.default_language())
    {
        println!();
        println!("{}", description);
    }

    let children = index.children(code)?.unwrap_or_default();
    if !children.is_empty() {
        println!();
        println!("{}", "Subdomains:".bright_blue().bold());
        for child in children {
            println!("  {}", label(taxonomy, child, lang));
        }
    }

    Ok(())
}

fn print_path(taxonomy: &Taxonomy, lang: &str, code: &str) -> Result<()> {
    match taxonomy.index().path(code)? {
        Some(path) => {
            let crumbs: Vec<String> = path.iter().map(|n| label(taxonomy, n, lang)).collect();
            let separator = " > ".bright_black().to_string();
            println!("{}", crumbs.join(separator.as_str()));
        }
        None => println!("{}", format!("Domain {} not found", code).red()),
    }
    Ok(())
}

fn search(taxonomy: &Taxonomy, lang: &str, query: &str, limit: usize) -> Result<()> {
    let mut results = taxonomy.search_with_fallback(query, lang)?;
    if results.language() != lang {
        println!(
            "{}",
            format!(
                "No names in '{}', searching '{}' instead",
                lang,
                results.language()
            )
            .yellow()
        );
    }

    let mut shown = 0;
    while let Some((node, field)) = results.next_hit() {
        if shown == limit {
            println!("{}", format!("... more than {} results", limit).bright_black());
            break;
        }
        let text = label(taxonomy, node, results.language());
        match field {
            MatchField::Name => println!("{}", text.green()),
            MatchField::Description => println!("{} {}", text, "(description)".bright_black()),
        }
        shown += 1;
    }

    if shown == 0 {
        println!("{}", "No matching domains".yellow());
    }
    Ok(())
}

fn resolve_guid(taxonomy: &Taxonomy, lang: &str, guid: &Uuid) -> Result<()> {
    match taxonomy.breadcrumb_for_guid(guid)? {
        Some(path) => {
            let crumbs: Vec<String> = path.iter().map(|n| label(taxonomy, n, lang)).collect();
            println!("{}", crumbs.join(" > "));
        }
        None => println!(
            "{}",
            format!("Guid {} is not in the loaded taxonomy", guid).red()
        ),
    }
    Ok(())
}

fn print_info(taxonomy: &Taxonomy) -> Result<()> {
    let index = taxonomy.index();
    let languages: Vec<&str> = index.languages()?.iter().map(String::as_str).collect();

    println!("{}", "Semantic domain taxonomy".bright_blue().bold());
    println!("  Sources:   {}", taxonomy.source_count());
    println!("  Domains:   {}", index.len()?);
    println!("  Roots:     {}", index.roots()?.len());
    println!("  Languages: {}", languages.join(", "));
    println!(
        "  Loaded at: {}",
        taxonomy.loaded_at().format("%Y-%m-%d %H:%M:%S UTC")
    );
    Ok(())
}
