use clap::Parser;
use facility_rank::dataset::{ColumnIndex, FacilityReader, MissingColumns};
use facility_rank::filter::FilterCriteria;
use facility_rank::scoring::ScoringEngine;
use std::path::PathBuf;
use std::time::Instant;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_MISSING_COLUMNS: i32 = 2;
const EXIT_OUTPUT: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Parser, Debug)]
#[command(name = "facility-rank")]
#[command(
    about = "Filter nursing home facilities by state and other criteria, ranked by recommendation score",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Enable verbose logging and per-factor score breakdowns
    #[arg(short, long)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/facility-rank/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSV file containing the nursing home provider data
    #[arg(long, visible_alias = "input_file")]
    input_file: PathBuf,

    /// Two-letter state to filter facilities by (case insensitive)
    #[arg(long, value_parser = parse_state)]
    state: String,

    /// File to write the JSON results to
    #[arg(long, visible_alias = "output_file", default_value = "output.json")]
    output_file: PathBuf,

    /// Number of facilities to return (0 returns all)
    #[arg(long, visible_alias = "num_facilities", default_value_t = 20)]
    num_facilities: usize,

    /// Minimum overall rating required for each returned facility
    #[arg(
        long,
        visible_alias = "min_rating",
        default_value_t = 1,
        value_parser = clap::value_parser!(i64).range(1..=5)
    )]
    min_rating: i64,

    /// Minimum number of certified beds required for each returned facility
    #[arg(long, visible_alias = "num_beds", default_value_t = 0)]
    num_beds: i64,

    /// Maximum number of health deficiencies allowed for each returned facility
    #[arg(long, visible_alias = "max_deficiencies", default_value_t = f64::INFINITY)]
    max_deficiencies: f64,

    /// Maximum number of penalties allowed for each returned facility
    #[arg(long, visible_alias = "max_penalties", default_value_t = f64::INFINITY)]
    max_penalties: f64,
}

/// Accept exactly two ASCII letters, returned upper-cased.
fn parse_state(value: &str) -> Result<String, String> {
    if value.len() == 2 && value.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(value.to_ascii_uppercase())
    } else {
        Err(format!("'{}' is not a valid 2-character alphabetic input", value))
    }
}

fn main() {
    let cli = Cli::parse();
    let start_time = Instant::now();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    // Load config
    let config = match facility_rank::config::load_config(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    if let Err(errors) = facility_rank::scoring::validate_scoring(&config.scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let mut reader = match FacilityReader::open(&cli.input_file) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Input error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    };

    // Resolve every column before any row is read
    let required = config.columns.required();
    let index = match ColumnIndex::resolve(reader.headers(), &required) {
        Ok(index) => index,
        Err(MissingColumns { columns }) => {
            eprintln!(
                "Invalid CSV file {}: the columns do not match those expected.",
                cli.input_file.display()
            );
            eprintln!("Missing expected column(s):");
            for column in columns {
                eprintln!("  - {}", column);
            }
            std::process::exit(EXIT_MISSING_COLUMNS);
        }
    };
    log::debug!("Resolved {} columns in {}", index.len(), cli.input_file.display());

    let criteria = FilterCriteria {
        state: cli.state.clone(),
        min_rating: cli.min_rating,
        min_beds: cli.num_beds,
        max_deficiencies: cli.max_deficiencies,
        max_penalties: cli.max_penalties,
    };
    let engine = ScoringEngine::new(config.scoring, config.columns);

    let mut summary =
        match facility_rank::rank::rank_facilities(reader.records(), &index, &criteria, &engine) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Input error: {:#}", e);
                std::process::exit(EXIT_INPUT);
            }
        };
    let matched = summary.facilities.len();
    summary.truncate(cli.num_facilities);

    let outputs = summary.outputs();
    if let Err(e) = facility_rank::output::write_json(&cli.output_file, &outputs) {
        eprintln!("Output error: {:#}", e);
        std::process::exit(EXIT_OUTPUT);
    }

    let use_colors = facility_rank::output::should_use_colors();
    if cli.verbose && !summary.facilities.is_empty() {
        for ranked in &summary.facilities {
            let detail = facility_rank::output::format_facility_detail(
                &ranked.output,
                &ranked.result,
                use_colors,
            );
            println!("{}", detail);
            println!();
        }
    } else {
        println!(
            "{}",
            facility_rank::output::format_ranked_table(&outputs, use_colors)
        );
    }

    eprintln!();
    eprintln!(
        "{} of {} matching facilities written to {}",
        outputs.len(),
        matched,
        cli.output_file.display()
    );
    eprintln!("Empty rows: {}", summary.empty_rows);
    log::debug!(
        "Scanned {} rows ({} rejected) in {:?}",
        summary.rows_read,
        summary.rejected,
        start_time.elapsed()
    );

    std::process::exit(EXIT_SUCCESS);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_state() {
        assert_eq!(parse_state("nv"), Ok("NV".to_string()));
        assert_eq!(parse_state("Ca"), Ok("CA".to_string()));
        assert!(parse_state("N").is_err());
        assert!(parse_state("NEV").is_err());
        assert!(parse_state("N1").is_err());
    }

    #[test]
    fn test_underscore_flag_spellings() {
        let cli = Cli::try_parse_from([
            "facility-rank",
            "--input_file",
            "data.csv",
            "--state",
            "nv",
            "--min_rating",
            "3",
            "--max_penalties",
            "2",
        ])
        .unwrap();
        assert_eq!(cli.input_file, PathBuf::from("data.csv"));
        assert_eq!(cli.state, "NV");
        assert_eq!(cli.min_rating, 3);
        assert_eq!(cli.max_penalties, 2.0);
        assert_eq!(cli.max_deficiencies, f64::INFINITY);
        assert_eq!(cli.num_facilities, 20);
        assert_eq!(cli.output_file, PathBuf::from("output.json"));
    }

    #[test]
    fn test_min_rating_out_of_range() {
        let result = Cli::try_parse_from([
            "facility-rank",
            "--input-file",
            "data.csv",
            "--state",
            "NV",
            "--min-rating",
            "6",
        ]);
        assert!(result.is_err());
    }
}
