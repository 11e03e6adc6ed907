use std::path::PathBuf;

use anyhow::{Context, Result};
use flatframe::{load_file, Dataset, DropNulls, Predicate, Value};

/// Walk a sightings file through every dataset operation, printing as it
/// goes. Pass a path, or run `generate_sample` first and use its output:
///
/// ```text
/// cargo run --bin generate_sample
/// cargo run -- sightings.csv
/// ```
fn main() -> Result<()> {
    env_logger::init();

    let path: PathBuf = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sightings.csv".to_string())
        .into();

    let sightings = load_file(&path)
        .with_context(|| format!("loading {} (run generate_sample first?)", path.display()))?;

    // ---- Inspecting ----
    let (rows, cols) = sightings.shape();
    println!("{rows} rows x {cols} columns");
    println!("columns: {:?}", sightings.columns());
    for (name, dtype) in sightings.dtypes() {
        println!("  {name}: {dtype}");
    }
    print_dataset("head(5)", &sightings.head(5));

    let states = sightings.column("State").context("projecting State")?;
    println!("\nState value counts:");
    for (value, count) in sightings.value_counts("State", true)? {
        println!("  {value}: {count}");
    }
    let summary = sightings.describe("Shape Reported")?;
    println!(
        "Shape Reported: {} recorded, {} unique, most common {:?} ({}x)",
        summary.count, summary.unique, summary.top, summary.freq
    );
    println!("first state on file: {:?}", states.get(0));

    // ---- Selecting ----
    let narrow = sightings.select_columns(&["City", "State"])?;
    print_dataset("City/State only", &narrow.head(3));
    print_dataset("labels 1..=3", &sightings.select_rows_by_label(1, 3)?);
    print_dataset("positions 0..3", &sightings.select_rows_by_position(0..3)?);

    // ---- Filtering ----
    let texas = sightings.filter(&Predicate::eq("State", "TX"))?;
    println!("\n{} Texas sightings", texas.len());
    let elsewhere = sightings.filter(&Predicate::eq("State", "TX").not())?;
    println!("{} sightings elsewhere", elsewhere.len());
    let big_cities = sightings.filter(&Predicate::one_of(
        "City",
        ["Austin", "Dallas", "Houston"],
    ))?;
    print_dataset("big Texas cities", &big_cities.head(5));
    let dallas = sightings.filter(
        &Predicate::eq("City", "Dallas").and(Predicate::eq("State", "TX")),
    )?;
    println!("Dallas, TX: {} rows", dallas.len());

    // ---- Sorting ----
    let by_state = sightings.sort_by(&[("State", true)])?;
    print_dataset("sorted by State", &by_state.head(5));
    let by_state_shape = sightings.sort_by(&[("State", false), ("Shape Reported", true)])?;
    print_dataset("State desc, Shape asc", &by_state_shape.head(5));
    print_dataset("back to file order", &by_state_shape.sort_by_label(true).head(3));

    // ---- Duplicates ----
    let dup_count = sightings.duplicated(None)?.iter().filter(|&&d| d).count();
    println!("\n{dup_count} exact duplicate rows");
    let keyed = sightings.duplicated(Some(&["State", "Time"]))?;
    println!(
        "{} rows repeat an earlier State/Time pair",
        keyed.iter().filter(|&&d| d).count()
    );
    let unique = sightings.drop_duplicates(None)?;
    println!("{} rows after dedup", unique.len());

    // ---- Modifying columns ----
    let mut working = sightings.clone();
    working.add_column("Location", |row| {
        match (row.get("City"), row.get("State")) {
            (Some(Value::String(city)), Some(Value::String(state))) => {
                Value::String(format!("{city}, {state}"))
            }
            _ => Value::Null,
        }
    })?;
    working.rename_columns(&[
        ("Colors Reported", "Colors"),
        ("Shape Reported", "Shape"),
    ])?;
    print_dataset("with Location, renamed", &working.head(3));
    working.drop_column("Location")?;

    // ---- Missing values ----
    println!("\nmissing values per column:");
    for (name, count) in working.null_counts() {
        println!("  {name}: {count}");
    }
    let complete = working.drop_nulls(DropNulls::Any);
    println!("{} fully recorded rows", complete.len());
    let informative = working.drop_nulls(DropNulls::All);
    println!("{} rows with at least one value", informative.len());

    working.fill_missing(Value::from("Unknown"), Some("Colors"))?;
    working.fill_missing(Value::from("Unknown"), None)?;
    let remaining: usize = working
        .null_counts()
        .iter()
        .map(|(_, count)| count)
        .sum();
    println!("missing values after fill: {remaining}");

    Ok(())
}

/// Print a small dataset as label-prefixed rows.
fn print_dataset(title: &str, ds: &Dataset) {
    println!("\n-- {title} --");
    println!("     {}", ds.columns().join(" | "));
    for position in 0..ds.len() {
        let (label, values) = ds.row(position).unwrap();
        let cells: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        println!("{label:>4} {}", cells.join(" | "));
    }
}
