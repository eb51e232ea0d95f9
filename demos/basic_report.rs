//! Basic example of the exploratory helpers.
//!
//! This example shows how to:
//! 1. Create synthetic data with missing values
//! 2. Build a correlation report
//! 3. Check a column for normality
//! 4. Draw a pie chart of category counts

use composable_eda::prelude::*;
use composable_eda::stats::Rng;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== Composable EDA Example ===\n");

    let table = create_example_data()?;

    println!("Data dimensions:");
    println!("  Features: {}", table.n_features());
    println!("  Rows:     {}", table.n_rows());
    for (name, count) in table.names().iter().zip(table.non_missing_counts()) {
        println!("  {:<8} {} non-missing", name, count);
    }
    println!();

    println!("=== Correlation Report ===\n");

    let options = CorrelationOptions::new()
        .with_significance(true)
        .with_decimals(3);
    let report = correlation_report(&table, &options)?;
    println!("{}", report);

    println!("=== Normality ===\n");

    for name in ["height", "income"] {
        let assessment = normality_check(table.column(name)?, &NormalityConfig::default())?;
        println!("{}: {}", name, assessment.judgment());
    }
    println!();

    println!("=== Pie Chart ===\n");

    let species = ["cat", "dog", "dog", "bird", "cat", "dog", "fish", "dog", "cat", "hamster"];
    let chart = pie(
        &PieData::value_counts(&species),
        &PieOptions::new().with_title("Pets").with_slices(3),
    )?;
    for wedge in &chart.wedges {
        println!(
            "  {:<8} {:>5.1}%  ({:.1} to {:.1} degrees)",
            wedge.label, wedge.percent, wedge.theta1, wedge.theta2
        );
    }

    let path = std::env::temp_dir().join("composable_eda_pets.svg");
    chart.save(&path)?;
    println!("\nChart written to {:?}", path);

    println!("\n=== Configuration (YAML) ===\n");
    let config = EdaConfig {
        correlation: options,
        ..EdaConfig::default()
    };
    println!("{}", config.to_yaml()?);

    Ok(())
}

/// Create example data with known relationships.
fn create_example_data() -> Result<FeatureTable> {
    let n = 200;
    let mut rng = Rng::new(12345);

    let mut height = Vec::with_capacity(n);
    let mut weight = Vec::with_capacity(n);
    let mut income = Vec::with_capacity(n);
    let mut noise = Vec::with_capacity(n);

    for i in 0..n {
        let h = rng.next_normal(170.0, 10.0);
        height.push(h);
        // Weight follows height
        weight.push(0.9 * h - 85.0 + rng.next_normal(0.0, 6.0));
        // Log-normal, clearly skewed
        income.push(rng.next_normal(10.0, 0.8).exp());
        // Every seventh value missing
        noise.push(if i % 7 == 0 { f64::NAN } else { rng.next_f64() });
    }

    FeatureTable::from_columns([
        ("height", height),
        ("weight", weight),
        ("income", income),
        ("noise", noise),
    ])
}
