use anyhow::{bail, Context, Result};
use regisresq::{
    filter_by_kind, import_csv, AnimalKind, AnimalRecord, AnimalStore, AppConfig, KindFilter,
    LogFormat,
};
use std::env;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const USAGE: &str = "\
Usage: regisresq <command> [args]

  list [all|cat|dog] [--json]                         List animals by name
  add <cat|dog> <breed> <name> <yes|no> <YYYY-MM-DD>  Register a new animal
  update <cat|dog> <breed> <name> <yes|no> <YYYY-MM-DD>
                                                      Change an animal's details (matched by name)
  rename <old-name> <new-name>                        Rename an animal
  delete <name>                                       Remove an animal
  import <file.csv>                                   Bulk add from CSV (type,breed,name,sterilized,arrived)

Environment: REGISRESQ_DB_PATH, REGISRESQ_LOG_FORMAT (pretty|json), RUST_LOG";

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_logging(config.log_format);

    let args: Vec<String> = env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("list");
    let rest: &[String] = if args.len() > 1 { &args[1..] } else { &[] };

    if matches!(command, "help" | "-h" | "--help") {
        println!("{}", USAGE);
        return Ok(());
    }

    info!(version = regisresq::VERSION, db_path = %config.db_path.display(), "Starting RegisResQ");

    // No store, no app
    let store = AnimalStore::open(&config.db_path).with_context(|| {
        format!("Failed to open animal registry at {}", config.db_path.display())
    })?;

    match command {
        "list" => run_list(&store, rest),
        "add" => run_add(&store, rest),
        "update" => run_update(&store, rest),
        "rename" => run_rename(&store, rest),
        "delete" => run_delete(&store, rest),
        "import" => run_import(&store, rest),
        other => {
            eprintln!("{}", USAGE);
            bail!("Unknown command: {}", other)
        }
    }
}

fn init_logging(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(regisresq::config::DEFAULT_LOG_FILTER));

    // Diagnostics go to stderr so listings on stdout stay clean
    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

fn parse_yes_no(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" => Ok(true),
        "no" | "n" | "false" => Ok(false),
        _ => bail!("Sterilized must be yes or no, got {:?}", value),
    }
}

/// Build a record from `<cat|dog> <breed> <name> <yes|no> <date>` and refuse it unless valid
fn parse_record(args: &[String]) -> Result<AnimalRecord> {
    let [kind, breed, name, sterilized, arrived] = args else {
        bail!("Expected: <cat|dog> <breed> <name> <yes|no> <YYYY-MM-DD>");
    };

    let kind: AnimalKind = kind.parse()?;
    let record = AnimalRecord::new(
        kind,
        breed.trim(),
        name.trim(),
        Some(parse_yes_no(sterilized)?),
        arrived.trim(),
    );

    if !record.validate() {
        bail!(
            "Enter a name, a breed and a real arrival date (YYYY-MM-DD, 1900-2999): {}",
            record
        );
    }

    Ok(record)
}

fn find_by_name(store: &AnimalStore, name: &str) -> Result<AnimalRecord> {
    match store.get_all()?.into_iter().find(|a| a.name() == name) {
        Some(animal) => Ok(animal),
        None => bail!("No animal named {:?}", name),
    }
}

fn run_list(store: &AnimalStore, args: &[String]) -> Result<()> {
    let json = args.iter().any(|a| a == "--json");
    let filter = match args.iter().find(|a| !a.starts_with("--")) {
        Some(f) => f.parse::<KindFilter>()?,
        None => KindFilter::All,
    };

    let animals = filter_by_kind(&store.get_all()?, filter);

    if json {
        println!("{}", serde_json::to_string_pretty(&animals)?);
        return Ok(());
    }

    println!(
        "{:<4} | {:<20} | {:<20} | {:<10} | {}",
        "Type", "Breed", "Name", "Sterilized", "Arrived"
    );
    for a in &animals {
        let sterilized = if a.sterilized() == Some(true) { "yes" } else { "no" };
        println!(
            "{:<4} | {:<20} | {:<20} | {:<10} | {}",
            a.species(),
            a.breed(),
            a.name(),
            sterilized,
            a.date_arrived()
        );
    }
    println!("\n{} animal(s)", animals.len());

    Ok(())
}

fn run_add(store: &AnimalStore, args: &[String]) -> Result<()> {
    let record = parse_record(args)?;

    if !store.add(&record) {
        bail!("Insert failed");
    }

    println!("✓ Added {}", record);
    Ok(())
}

fn run_update(store: &AnimalStore, args: &[String]) -> Result<()> {
    let record = parse_record(args)?;

    if !store.update(&record) {
        bail!("Update failed");
    }

    println!("✓ Updated {}", record);
    Ok(())
}

/// Trimmed (old, new) names for a rename; both must be present and differ
fn rename_pair<'a>(old_name: &'a str, new_name: &'a str) -> Result<(&'a str, &'a str)> {
    let (old_name, new_name) = (old_name.trim(), new_name.trim());

    if old_name.is_empty() || new_name.is_empty() {
        bail!("Both the old and the new name are required");
    }
    if old_name == new_name {
        bail!("Name unchanged; use `update` to change other details");
    }

    Ok((old_name, new_name))
}

fn run_rename(store: &AnimalStore, args: &[String]) -> Result<()> {
    let [old_name, new_name] = args else {
        bail!("Expected: rename <old-name> <new-name>");
    };

    let (old_name, new_name) = rename_pair(old_name, new_name)?;

    let original = find_by_name(store, old_name)?;
    let updated = original.renamed(new_name);
    if !updated.validate() {
        bail!("Renamed record is not valid: {}", updated);
    }

    if !store.rename(&original, &updated) {
        bail!("Rename failed; original record kept");
    }

    println!("✓ Renamed {:?} to {:?}", old_name, new_name);
    Ok(())
}

fn run_delete(store: &AnimalStore, args: &[String]) -> Result<()> {
    let [name] = args else {
        bail!("Expected: delete <name>");
    };

    let animal = find_by_name(store, name.trim())?;
    if !store.delete(&animal) {
        bail!("Delete failed");
    }

    println!("✓ Deleted {} ({})", animal.name(), animal.breed());
    Ok(())
}

fn run_import(store: &AnimalStore, args: &[String]) -> Result<()> {
    let [path] = args else {
        bail!("Expected: import <file.csv>");
    };

    let summary = import_csv(store, Path::new(path))
        .with_context(|| format!("Failed to import {}", path))?;

    println!("✓ Added: {}", summary.added);
    println!("✓ Rejected (invalid): {}", summary.rejected);
    if summary.failed > 0 {
        println!("❌ Failed to store: {}", summary.failed);
    }

    Ok(())
}
