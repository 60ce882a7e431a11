use anyhow::{anyhow, Context, Result};
use scrobble_stats::{
    dimension_lists, import, Dimension, LastFmUrls, Settings, StatsBuilder, Top10Item,
};
use std::path::PathBuf;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter("inspect=info,scrobble_stats=info")
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Err(anyhow!("missing required argument: export file"));
    }

    let path = PathBuf::from(&args[1]);
    let dimensions: Vec<Dimension> = match args.get(2).map(String::as_str) {
        None => Dimension::ALL.to_vec(),
        Some("artists") => vec![Dimension::ArtistOnly],
        Some("albums") => vec![Dimension::ArtistAlbum],
        Some("tracks") => vec![Dimension::ArtistTrack],
        Some(other) => {
            print_usage();
            return Err(anyhow!("unknown list kind: {other}"));
        }
    };

    let settings = Settings::from_env().context("failed to read settings")?;
    let export = import::load_export(&path)?;

    if export.scrobbles.is_empty() {
        tracing::warn!("no scrobbles found in {}, nothing to show", path.display());
        return Ok(());
    }

    let urls = LastFmUrls::new(export.username.clone());
    let mut builder = StatsBuilder::new();
    let stats = builder.absorb_all(export.scrobbles);

    println!("scrobbles:        {}", stats.scrobble_count);
    println!("days active:      {}", stats.days_active());
    println!("longest streak:   {} days", stats.longest_listening_streak());

    for dimension in dimensions {
        let lists = dimension_lists(&stats, dimension, &settings, &urls);
        print_list(&format!("{} by scrobbles", dimension.label()), &lists.by_scrobbles);
        print_list(&format!("{} streaks", dimension.label()), &lists.streaks);
        print_list(&format!("{} gaps", dimension.label()), &lists.gaps);
        print_list(&format!("{} ongoing", dimension.label()), &lists.ongoing);
    }

    Ok(())
}

fn print_list(title: &str, items: &[Top10Item]) {
    println!("\n=== {} ===", title);
    if items.is_empty() {
        println!("  (none)");
        return;
    }
    for (rank, item) in items.iter().enumerate() {
        match &item.description {
            Some(description) => println!("{:>3}. {}  [{}]", rank + 1, item.name, description),
            None => println!("{:>3}. {}", rank + 1, item.name),
        }
    }
}

fn print_usage() {
    println!("usage: inspect <export.json> [artists|albums|tracks]");
    println!();
    println!("environment:");
    println!("  LIST_SIZE      - entries per list (default 10)");
    println!("  MIN_SCROBBLES  - minimum plays for gap and ongoing lists (default 0)");
}
