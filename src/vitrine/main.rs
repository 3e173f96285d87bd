use chrono::{DateTime, Utc};
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use std::path::PathBuf;
use std::time::Instant;
use unicode_width::UnicodeWidthStr;
use vitrine::config::VitrineConfig;
use vitrine::error::{Result, VitrineError};
use vitrine::facets::{build_facets, FacetBody, FacetSection};
use vitrine::listing::PageView;
use vitrine::model::{Item, Scope, SortOption};
use vitrine::params::{InMemoryAddress, ParamMap, MAX_PRICE_PARAM, MIN_PRICE_PARAM};
use vitrine::session::ListingSession;
use vitrine::state::STOCK_FLAG;
use vitrine::store::fs::JsonCatalog;
use vitrine::store::CatalogSource;

mod args;
use args::{BrowseArgs, Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    catalog_path: PathBuf,
    config: VitrineConfig,
    config_dir: PathBuf,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Browse(args)) => handle_browse(&ctx, args),
        Some(Commands::Facets {
            category,
            subcategory,
        }) => handle_facets(&ctx, category, subcategory),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_browse(&ctx, BrowseArgs::default()),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let proj_dirs = ProjectDirs::from("com", "vitrine", "vitrine")
        .ok_or_else(|| VitrineError::Api("Could not determine config dir".into()))?;
    let config_dir = proj_dirs.config_dir().to_path_buf();
    let config = VitrineConfig::load(&config_dir).unwrap_or_default();

    Ok(AppContext {
        catalog_path: cli.catalog.clone(),
        config,
        config_dir,
    })
}

fn handle_browse(ctx: &AppContext, args: BrowseArgs) -> Result<()> {
    let params = collect_params(&args)?;
    let scope = Scope {
        category: args.category.clone(),
        subcategory: args.subcategory.clone(),
    };

    let catalog = JsonCatalog::new(&ctx.catalog_path);
    let address = InMemoryAddress::new(params);
    let mut session = ListingSession::mount(catalog, address, scope, &ctx.config)?;

    let now = Instant::now();
    if let Some(query) = &args.query {
        session.set_query(query, now);
    }
    if let Some(sort) = &args.sort {
        let sort: SortOption = sort.parse().map_err(VitrineError::Api)?;
        session.set_sort(sort, now);
    }
    // One-shot invocation: fast-forward past the debounce window so the
    // final state is the one that renders.
    if session.has_pending_refresh() {
        session.tick(now + ctx.config.debounce_window());
    }
    if let Some(page) = args.page {
        session.set_page(page);
    }

    print_page(&session.page_view(), session.active_filter_count());

    let share = session.share_params();
    if !share.is_empty() {
        println!();
        println!("{} {}", "Share:".dimmed(), share.to_query_string().cyan());
    }
    Ok(())
}

/// Merges the shared query string (if any) with the explicit flags. Flags
/// win for single-valued keys; repeatable flags append.
fn collect_params(args: &BrowseArgs) -> Result<ParamMap> {
    let mut params = args
        .params
        .as_deref()
        .map(ParamMap::parse)
        .unwrap_or_default();

    if let Some(min) = args.min_price {
        params.remove_key(MIN_PRICE_PARAM);
        params.append(MIN_PRICE_PARAM, min.to_string());
    }
    if let Some(max) = args.max_price {
        params.remove_key(MAX_PRICE_PARAM);
        params.append(MAX_PRICE_PARAM, max.to_string());
    }
    if args.in_stock {
        params.remove_key(STOCK_FLAG);
        params.append(STOCK_FLAG, "true");
    }
    for color in &args.color {
        params.append("color", color.as_str());
    }
    for brand in &args.brand {
        params.append("brand", brand.as_str());
    }
    for storage in &args.storage {
        params.append("storage", storage.as_str());
    }
    for rating in &args.rating {
        params.append("rating", rating.as_str());
    }
    for attr in &args.attrs {
        let (key, value) = attr.split_once('=').ok_or_else(|| {
            VitrineError::Api(format!("Invalid --attr (expected key=value): {}", attr))
        })?;
        params.append(key, value);
    }
    Ok(params)
}

fn handle_facets(
    ctx: &AppContext,
    category: Option<String>,
    subcategory: Option<String>,
) -> Result<()> {
    let items = JsonCatalog::new(&ctx.catalog_path).items()?;
    let scope = Scope {
        category,
        subcategory,
    };
    print_facets(&build_facets(&items, &scope), ctx.config.visible_options);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let mut config = ctx.config.clone();
    match (key.as_deref(), value) {
        (None, _) => {
            println!("page-size = {}", config.page_size);
            println!("debounce-ms = {}", config.debounce_ms);
            println!("visible-options = {}", config.visible_options);
        }
        (Some("page-size"), None) => println!("page-size = {}", config.page_size),
        (Some("debounce-ms"), None) => println!("debounce-ms = {}", config.debounce_ms),
        (Some("visible-options"), None) => {
            println!("visible-options = {}", config.visible_options)
        }
        (Some("page-size"), Some(v)) => {
            config.page_size = v
                .parse()
                .map_err(|_| VitrineError::Api(format!("Invalid page size: {}", v)))?;
            config.save(&ctx.config_dir)?;
            println!("{}", format!("page-size set to {}", config.page_size).green());
        }
        (Some("debounce-ms"), Some(v)) => {
            config.debounce_ms = v
                .parse()
                .map_err(|_| VitrineError::Api(format!("Invalid debounce window: {}", v)))?;
            config.save(&ctx.config_dir)?;
            println!(
                "{}",
                format!("debounce-ms set to {}", config.debounce_ms).green()
            );
        }
        (Some("visible-options"), Some(v)) => {
            config.visible_options = v
                .parse()
                .map_err(|_| VitrineError::Api(format!("Invalid option count: {}", v)))?;
            config.save(&ctx.config_dir)?;
            println!(
                "{}",
                format!("visible-options set to {}", config.visible_options).green()
            );
        }
        (Some(other), _) => println!("Unknown config key: {}", other),
    }
    Ok(())
}

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;

fn print_page(view: &PageView, active_filters: usize) {
    if active_filters > 0 {
        println!(
            "{}",
            format!("Filters active: {}", active_filters).yellow()
        );
    }
    println!("{}", view.summary.bold());

    if view.items.is_empty() {
        return;
    }
    println!();

    for (i, item) in view.items.iter().enumerate() {
        print_item_line(i + 1, item);
    }

    if view.total_pages > 1 {
        println!();
        println!(
            "{}",
            format!("Page {} of {}", view.page, view.total_pages).dimmed()
        );
    }
}

fn print_item_line(index: usize, item: &Item) {
    let idx_str = format!("{:>3}. ", index);

    let mut details = vec![item.brand.clone()];
    if !item.color.is_empty() {
        details.push(item.color.clone());
    }
    if let Some(storage) = &item.storage {
        details.push(storage.clone());
    }
    let name_detail = format!("{}  {}", item.name, details.join(" · "));

    let price_str = format!("₹{:<7}", item.our_price);
    let rating_str = format!("{:.1}★ ", item.rating);
    const STOCK_MARKER: &str = "out of stock ";
    let (stock_str, stock_width) = if item.stock == 0 {
        (STOCK_MARKER.red().to_string(), STOCK_MARKER.width())
    } else {
        (String::new(), 0)
    };

    let time_ago = format_time_ago(item.created_at);

    let right_width = price_str.width() + rating_str.width() + stock_width + TIME_WIDTH;
    let fixed_width = idx_str.width() + right_width;
    let available = LINE_WIDTH.saturating_sub(fixed_width);
    let name_display = truncate_to_width(&name_detail, available);
    let padding = available.saturating_sub(name_display.width());

    println!(
        "{}{}{}{}{}{}{}",
        idx_str,
        name_display,
        " ".repeat(padding),
        price_str.green(),
        rating_str.yellow(),
        stock_str,
        time_ago.dimmed()
    );
}

fn print_facets(sections: &[FacetSection], visible_limit: usize) {
    for section in sections {
        match &section.body {
            FacetBody::Range(range) => {
                println!(
                    "{} {}",
                    section.title.bold(),
                    format!("{} – {} (step {})", range.min, range.max, range.step).dimmed()
                );
            }
            FacetBody::Checkbox { options } => {
                println!(
                    "{} {}",
                    section.title.bold(),
                    format!("({})", options.len()).dimmed()
                );
                let visible = section.visible_options(visible_limit);
                for option in visible {
                    let marker = if option.checked { "[x]" } else { "[ ]" };
                    println!("  {} {}", marker, option.label);
                }
                let hidden = options.len() - visible.len();
                if hidden > 0 {
                    println!("  {}", format!("… {} more", hidden).dimmed());
                }
            }
        }
        println!();
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
