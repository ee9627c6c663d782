/// Tablesift API demo
///
/// Builds an index from two in-memory sheets and runs a few phrase
/// searches against it.

use tablesift::core::config::Config;
use tablesift::core::types::{Row, Table};
use tablesift::sheets::reader::TableReader;
use tablesift::{IndexBuilder, QueryEngine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("\n╔═══════════════════════════════════════════════╗");
    println!("║        Tablesift - Phrase Search Demo         ║");
    println!("╚═══════════════════════════════════════════════╝\n");

    // Step 1: Load sheets
    let reader = TableReader::default();
    let jira = reader.parse(
        "jira",
        "Key,Summary,Status\n\
         SIDE-1752,Login page broken on Safari,Open\n\
         SIDE-1753,\"Export to \"\"CSV\"\" drops the header\",Closed\n",
    )?;

    let mut support = Table::new("support", vec!["Ticket".to_string(), "Notes".to_string()]);
    support.push_row(
        Row::new()
            .with_field("Ticket", "T-9")
            .with_field("Notes", "Customer hit SIDE-1752 twice"),
    );
    println!("Loaded {} sheets\n", 2);

    // Step 2: Build the index
    let builder = IndexBuilder::new(Config::default())?;
    let index = builder.create_index("demo")?;
    let stats = builder.index_tables(&index, &[jira, support])?;
    println!(
        "Indexed {} rows in {} flushes ({:.0} rows/s)\n",
        stats.rows,
        stats.flushes,
        stats.rows_per_second()
    );

    // Step 3: Search
    let engine = QueryEngine::new();
    for phrase in ["SIDE-1752", "\"login page\"", "export to csv", "page login"] {
        let results = engine.search(&index, phrase)?;
        println!("  {:<16} {} results", phrase, results.len());
        for result in &results {
            let mut fields: Vec<_> = result.fields.iter().collect();
            fields.sort();
            println!("      row {}: {:?}", result.row_id, fields);
        }
    }

    // Step 4: Release
    index.close();
    println!("\nDone!");
    Ok(())
}
