//! EDA - Exploratory Data Analysis CLI
//!
//! Command-line interface for correlation reports, pie charts and
//! normality checks on CSV data.

use clap::{Parser, Subcommand, ValueEnum};
use composable_eda::chart::{pie, PieData};
use composable_eda::config::EdaConfig;
use composable_eda::data::FeatureTable;
use composable_eda::error::{EdaError, Result};
use composable_eda::normality::normality_check;
use composable_eda::report::correlation_report;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Output format for the correlation report
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormat {
    /// Aligned plain-text table
    Text,
    /// Tab-separated values
    Tsv,
    /// JSON document
    Json,
}

/// Composable Exploratory Data Analysis
#[derive(Parser)]
#[command(name = "eda")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an SPSS-style correlation report
    Corr {
        /// Path to CSV data (header row of feature names)
        #[arg(short, long)]
        input: PathBuf,

        /// Append significance markers to coefficients
        #[arg(short, long)]
        significance: bool,

        /// Decimal places to round to
        #[arg(short, long)]
        decimals: Option<u32>,

        /// Omit the sample-size rows
        #[arg(long)]
        no_sample_size: bool,

        /// YAML or JSON configuration; flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: ReportFormat,
    },

    /// Draw a pie chart of category counts as SVG
    Pie {
        /// Labels file (one per line), or CSV when --column is given
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// CSV column holding the category of each row
        #[arg(long)]
        column: Option<String>,

        /// Slice values instead of counted categories (comma-separated)
        #[arg(long, conflicts_with_all = ["input", "column"])]
        values: Option<String>,

        /// Chart title
        #[arg(short, long)]
        title: Option<String>,

        /// Maximum number of slices before grouping the rest as "Other"
        #[arg(long)]
        slices: Option<usize>,

        /// Annotate slices with the percentage only
        #[arg(long)]
        percent_only: bool,

        /// Do not offset the largest slice
        #[arg(long)]
        no_explode: bool,

        /// Annotation text color
        #[arg(long)]
        text_color: Option<String>,

        /// YAML or JSON configuration; flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output SVG path
        #[arg(short, long, default_value = "pie.svg")]
        output: PathBuf,
    },

    /// Check whether a column looks normally distributed
    Normality {
        /// Path to CSV data
        #[arg(short, long)]
        input: PathBuf,

        /// Column to test
        #[arg(long)]
        column: String,

        /// Significance level
        #[arg(long)]
        alpha: Option<f64>,

        /// Maximum observations tested before sub-sampling
        #[arg(long)]
        max_sample: Option<usize>,

        /// Random seed for sub-sampling
        #[arg(long)]
        seed: Option<u64>,

        /// YAML or JSON configuration; flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the assessment as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate an example configuration
    Example {
        /// Output path (.yaml or .json)
        #[arg(short, long, default_value = "eda.yaml")]
        output: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Corr {
            input,
            significance,
            decimals,
            no_sample_size,
            config,
            output,
            format,
        } => cmd_corr(
            &input,
            significance,
            decimals,
            no_sample_size,
            config.as_deref(),
            output.as_deref(),
            format,
        ),

        Commands::Pie {
            input,
            column,
            values,
            title,
            slices,
            percent_only,
            no_explode,
            text_color,
            config,
            output,
        } => {
            let source = match (values, input, column) {
                (Some(values), _, _) => PieSource::Values(values),
                (None, Some(input), Some(column)) => PieSource::CsvColumn(input, column),
                (None, Some(input), None) => PieSource::Lines(input),
                (None, None, _) => PieSource::Missing,
            };
            let overrides = PieOverrides {
                title,
                slices,
                percent_only,
                no_explode,
                text_color,
            };
            cmd_pie(source, overrides, config.as_deref(), &output)
        }

        Commands::Normality {
            input,
            column,
            alpha,
            max_sample,
            seed,
            config,
            json,
        } => cmd_normality(&input, &column, alpha, max_sample, seed, config.as_deref(), json),

        Commands::Example { output } => cmd_example(&output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<EdaConfig> {
    match path {
        Some(path) => {
            eprintln!("Loading configuration from {:?}...", path);
            EdaConfig::from_file(path)
        }
        None => Ok(EdaConfig::default()),
    }
}

/// Build a correlation report
fn cmd_corr(
    input: &Path,
    significance: bool,
    decimals: Option<u32>,
    no_sample_size: bool,
    config_path: Option<&Path>,
    output: Option<&Path>,
    format: ReportFormat,
) -> Result<()> {
    let mut options = load_config(config_path)?.correlation;
    if significance {
        options.significance = true;
    }
    if let Some(decimals) = decimals {
        options.decimals = decimals;
    }
    if no_sample_size {
        options.sample_size = false;
    }

    eprintln!("Loading data...");
    let table = FeatureTable::from_csv(input)?;
    eprintln!(
        "Loaded {} features x {} rows",
        table.n_features(),
        table.n_rows()
    );

    let report = correlation_report(&table, &options)?;

    let rendered = match format {
        ReportFormat::Text => report.to_string(),
        ReportFormat::Json => serde_json::to_string_pretty(&report)?,
        ReportFormat::Tsv => {
            let mut buffer = Vec::new();
            report.write_tsv(&mut buffer)?;
            String::from_utf8_lossy(&buffer).into_owned()
        }
    };

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            eprintln!("Report written to {:?}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
        }
    }

    Ok(())
}

/// Where pie chart data comes from
enum PieSource {
    Values(String),
    CsvColumn(PathBuf, String),
    Lines(PathBuf),
    Missing,
}

/// Pie flags that override the configuration
struct PieOverrides {
    title: Option<String>,
    slices: Option<usize>,
    percent_only: bool,
    no_explode: bool,
    text_color: Option<String>,
}

/// Draw a pie chart
fn cmd_pie(
    source: PieSource,
    overrides: PieOverrides,
    config_path: Option<&Path>,
    output: &Path,
) -> Result<()> {
    let mut options = load_config(config_path)?.pie;
    if let Some(title) = overrides.title {
        options.title = title;
    }
    if let Some(slices) = overrides.slices {
        options.slices = Some(slices);
    }
    if overrides.percent_only {
        options.percent_only = true;
    }
    if overrides.no_explode {
        options.explode = false;
    }
    if let Some(color) = overrides.text_color {
        options.text_color = color;
    }

    let data = match source {
        PieSource::Values(values) => PieData::from_values(&parse_values(&values)?),
        PieSource::CsvColumn(path, column) => PieData::value_counts(&read_text_column(&path, &column)?),
        PieSource::Lines(path) => {
            let text = std::fs::read_to_string(&path)?;
            let labels: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
            PieData::value_counts(&labels)
        }
        PieSource::Missing => {
            return Err(EdaError::InvalidParameter(
                "either --input or --values is required".to_string(),
            ))
        }
    };
    eprintln!("Counted {} categories", data.len());

    let chart = pie(&data, &options)?;
    chart.save(output)?;
    eprintln!("Chart written to {:?}", output);

    Ok(())
}

fn parse_values(values: &str) -> Result<Vec<f64>> {
    values
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .enumerate()
        .map(|(i, s)| {
            s.parse::<f64>().map_err(|_| EdaError::InvalidValue {
                value: s.to_string(),
                row: i,
                column: "values".to_string(),
            })
        })
        .collect()
}

/// Read one CSV column as text, skipping empty cells.
fn read_text_column(path: &Path, column: &str) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let idx = reader
        .headers()?
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| EdaError::MissingColumn(column.to_string()))?;

    let mut values = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(cell) = record.get(idx).filter(|c| !c.is_empty()) {
            values.push(cell.to_string());
        }
    }
    Ok(values)
}

/// Run the normality check on one column
fn cmd_normality(
    input: &Path,
    column: &str,
    alpha: Option<f64>,
    max_sample: Option<usize>,
    seed: Option<u64>,
    config_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let mut config = load_config(config_path)?.normality;
    if let Some(alpha) = alpha {
        config.alpha = alpha;
    }
    if let Some(max_sample) = max_sample {
        config.max_sample = max_sample;
    }
    if let Some(seed) = seed {
        config.seed = seed;
    }

    eprintln!("Loading data...");
    let table = FeatureTable::from_csv(input)?;
    let assessment = normality_check(table.column(column)?, &config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
    } else {
        println!("{}", assessment);
        println!("{}", assessment.judgment());
    }

    Ok(())
}

/// Generate example configuration
fn cmd_example(output: &Path) -> Result<()> {
    let mut config = EdaConfig::default();
    config.correlation.significance = true;
    config.correlation.decimals = 2;
    config.pie.title = "Category share".to_string();
    config.pie.slices = Some(6);

    config.to_file(output)?;
    eprintln!("Wrote example configuration to {:?}", output);
    eprintln!();
    eprintln!("Contents:");
    if output.extension().and_then(|e| e.to_str()) == Some("json") {
        println!("{}", config.to_json()?);
    } else {
        println!("{}", config.to_yaml()?);
    }

    Ok(())
}
