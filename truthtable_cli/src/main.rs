//! ttimport - import a CSV truth table into the analyzer model

use clap::Parser;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use truthtable_csv::config::{ImportPreferences, RuntimeConfig};
use truthtable_csv::model::TruthTableRow;
use truthtable_csv::{
    import_file, logging, pipeline, AnalyzerModel, Confirmation, FixedAnswer, ImportError,
    ImportReport, ImportStatus, TruthTable,
};

#[derive(Parser, Debug)]
#[command(name = "ttimport")]
#[command(version)]
#[command(about = "Import a CSV truth table and print the resulting table", long_about = None)]
struct Cli {
    /// CSV file to import
    file: PathBuf,

    /// Cell separator character
    #[arg(short, long)]
    separator: Option<char>,

    /// Quote character
    #[arg(short, long)]
    quote: Option<char>,

    /// Runtime configuration file (TOML with [import] and [logging] tables)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Force the import when rows conflict, without asking
    #[arg(long, conflicts_with = "no")]
    yes: bool,

    /// Cancel the import when rows conflict, without asking
    #[arg(long)]
    no: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Print one row per input combination instead of the rows as written
    #[arg(long)]
    expand: bool,
}

/// Asks on stderr and reads the answer from stdin; end of input means no
struct StdinConfirmation;

impl Confirmation for StdinConfirmation {
    fn confirm(&mut self, messages: &[String]) -> bool {
        let mut stderr = io::stderr();
        for message in messages {
            let _ = writeln!(stderr, "{}", message);
        }
        let _ = write!(stderr, "Import anyway? [y/N] ");
        let _ = stderr.flush();

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => parse_answer(&answer),
            Err(_) => false,
        }
    }
}

fn parse_answer(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    status: &'static str,
    report: &'a ImportReport,
    columns: Vec<String>,
    rows: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let runtime = match &cli.config {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::default(),
    };
    logging::config::init_runtime_preferences(runtime.logging.clone())?;
    logging::init_global_logging()?;
    pipeline::validate_pipeline()?;

    let preferences = import_preferences(&cli, runtime.import);
    let mut model = AnalyzerModel::new();

    let result = if cli.yes || cli.no {
        import_file(&cli.file, &preferences, &mut model, &mut FixedAnswer(cli.yes))
    } else {
        import_file(&cli.file, &preferences, &mut model, &mut StdinConfirmation)
    };

    let (status, report) = match result {
        Ok(ImportStatus::Installed(report)) => ("installed", report),
        Ok(ImportStatus::ForceInstalled(report)) => ("force-installed", report),
        Ok(ImportStatus::Declined) => {
            println!("import cancelled");
            return Ok(());
        }
        Err(error) => {
            print_detailed_error(&error);
            std::process::exit(1);
        }
    };

    let Some(table) = model.table() else {
        eprintln!("FAILED: no table was installed");
        std::process::exit(1);
    };

    if cli.json {
        let output = JsonOutput {
            status,
            report: &report,
            columns: column_names(table),
            rows: table_rows(table, cli.expand)
                .iter()
                .map(|row| render_row(row, table.input_bits()))
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "{}: {} ({} row(s), {} input bit(s), {} output bit(s))",
            report.file_name,
            status,
            report.row_count(),
            report.input_bits,
            report.output_bits
        );
        print!("{}", render_table(table, cli.expand));
    }

    Ok(())
}

fn import_preferences(cli: &Cli, base: ImportPreferences) -> ImportPreferences {
    ImportPreferences {
        separator: cli.separator.unwrap_or(base.separator),
        quote: cli.quote.unwrap_or(base.quote),
        ..base
    }
}

fn column_names(table: &TruthTable) -> Vec<String> {
    table
        .inputs()
        .iter()
        .chain(table.outputs())
        .flat_map(|v| v.bit_names())
        .collect()
}

fn table_rows(table: &TruthTable, expand: bool) -> Vec<TruthTableRow> {
    if expand {
        table.expanded_rows()
    } else {
        table.rows().to_vec()
    }
}

fn render_row(row: &[truthtable_csv::Entry], input_bits: usize) -> String {
    let (inputs, outputs) = row.split_at(input_bits.min(row.len()));
    let inputs: String = inputs.iter().map(|e| e.as_char()).collect();
    let outputs: String = outputs.iter().map(|e| e.as_char()).collect();
    format!("{} | {}", inputs, outputs)
}

fn render_table(table: &TruthTable, expand: bool) -> String {
    let inputs: Vec<String> = table.inputs().iter().map(|v| v.to_string()).collect();
    let outputs: Vec<String> = table.outputs().iter().map(|v| v.to_string()).collect();

    let mut text = format!("{} | {}\n", inputs.join(" "), outputs.join(" "));
    for row in table_rows(table, expand) {
        text.push_str(&render_row(&row, table.input_bits()));
        text.push('\n');
    }
    text
}

fn print_detailed_error(error: &ImportError) {
    if error.is_io() {
        eprintln!("Could not read the file:");
    } else {
        eprintln!("FAILED: {} stage rejected the file:", error.category());
    }
    eprintln!("  [{}] {}", error.error_code(), error);
    eprintln!("  Severity: {}", error.severity());
    eprintln!("  Action: {}", error.recommended_action());
}
