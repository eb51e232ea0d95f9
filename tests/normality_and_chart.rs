//! Integration tests for the normality check, pie charts and configuration.

use composable_eda::prelude::*;
use composable_eda::stats::Rng;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

fn normal_sample(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = Rng::new(seed);
    (0..n).map(|_| rng.next_normal(0.0, 1.0)).collect()
}

fn log_normal_sample(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = Rng::new(seed);
    (0..n).map(|_| rng.next_normal(0.0, 1.0).exp()).collect()
}

#[test]
fn test_seeded_normal_sample_is_normal() {
    let sample = normal_sample(300, 42);
    let config = NormalityConfig::default();

    let assessment = normality_check(&sample, &config).unwrap();
    assert!(assessment.is_normal, "{}", assessment);
    assert!(assessment.skewness.abs() < 0.5);
    assert!(assessment.kurtosis.abs() < 1.0);
    assert!(is_normal_with(&sample, &config).unwrap());
}

#[test]
fn test_log_normal_sample_is_not_normal() {
    let sample = log_normal_sample(300, 42);
    let assessment = normality_check(&sample, &NormalityConfig::default()).unwrap();
    assert!(!assessment.is_normal);
    assert!(assessment.shapiro.p_value < 0.001);
    assert!(assessment.dagostino.p_value < 0.001);
    assert!(assessment.skewness > 1.0);
}

#[test]
fn test_sub_sampling_is_seeded() {
    let sample = normal_sample(6000, 3);
    let config = NormalityConfig::default();

    let a = normality_check(&sample, &config).unwrap();
    let b = normality_check(&sample, &config).unwrap();
    assert_eq!(a.n_total, 6000);
    assert_eq!(a.n_used, 4000);
    assert_eq!(a, b);

    let other = normality_check(&sample, &config.clone().with_seed(99)).unwrap();
    assert_eq!(other.n_used, 4000);
    assert_ne!(a.shapiro.w, other.shapiro.w);
}

#[test]
fn test_normality_from_csv_column() {
    let mut csv = NamedTempFile::new().unwrap();
    writeln!(csv, "id,value").unwrap();
    for (i, v) in log_normal_sample(200, 11).iter().enumerate() {
        writeln!(csv, "{},{}", i, v).unwrap();
    }
    writeln!(csv, "200,NA").unwrap();
    csv.flush().unwrap();

    let table = FeatureTable::from_csv(csv.path()).unwrap();
    let assessment =
        normality_check(table.column("value").unwrap(), &NormalityConfig::default()).unwrap();
    assert_eq!(assessment.n_total, 200);
    assert!(!assessment.is_normal);

    assert!(matches!(
        table.column("missing"),
        Err(EdaError::MissingColumn(_))
    ));
}

#[test]
fn test_pie_from_categories() {
    let animals = [
        "dog", "cat", "dog", "bird", "dog", "cat", "fish", "dog", "cat", "snake",
    ];
    let data = PieData::value_counts(&animals);
    let chart = pie(&data, &PieOptions::new().with_title("Animals").with_slices(2)).unwrap();

    let labels: Vec<&str> = chart.wedges.iter().map(|w| w.label.as_str()).collect();
    assert_eq!(labels, vec!["Dog", "Cat", "Other"]);
    assert_eq!(chart.wedges[0].annotation, "40.0%\n(4)");
    assert_eq!(chart.wedges[2].annotation, "30.0%\n(3)");
    assert!(chart.wedges[0].offset > 0.0);
    assert!(chart.wedges[1..].iter().all(|w| w.offset == 0.0));

    let total: f64 = chart.wedges.iter().map(|w| w.percent).sum();
    assert!((total - 100.0).abs() < 1e-9);
}

#[test]
fn test_pie_saved_as_svg() {
    let data = PieData::from_values(&[10.0, 30.0, 60.0]);
    let options = PieOptions::new()
        .with_title("Budget")
        .with_labels(vec!["Rent".into(), "Food".into(), "Other costs".into()])
        .with_percent_only(true);
    let chart = pie(&data, &options).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("budget.svg");
    chart.save(&path).unwrap();

    let svg = std::fs::read_to_string(&path).unwrap().replace('\n', "");
    assert!(svg.contains("<svg"));
    assert!(svg.contains(">Budget</text>"));
    assert!(svg.contains(">Other costs</text>"));
    assert!(svg.contains(">60%</tspan>"));
    assert_eq!(svg.matches("<path").count(), 6);
}

#[test]
fn test_config_drives_all_helpers() {
    let yaml = r#"
correlation:
  significance: true
  decimals: 2
pie:
  title: Shares
  slices: 1
  explode: false
normality:
  alpha: 0.001
"#;
    let dir = tempdir().unwrap();
    let path = dir.path().join("eda.yaml");
    std::fs::write(&path, yaml).unwrap();

    let config = EdaConfig::from_file(&path).unwrap();
    config.validate().unwrap();

    let table = FeatureTable::from_columns([
        ("a", vec![1.0, 2.0, 3.0, 4.0, 5.0]),
        ("b", vec![2.0, 4.0, 6.0, 8.0, 10.0]),
    ])
    .unwrap();
    let report = correlation_report(&table, &config.correlation).unwrap();
    assert_eq!(report.cell("a", Statistic::PearsonR, "b").as_deref(), Some("1.0***"));

    let chart = pie(&PieData::from_counts([("x", 3.0), ("y", 1.0)]), &config.pie).unwrap();
    assert_eq!(chart.title, "Shares");
    assert_eq!(chart.wedges.len(), 2);
    assert_eq!(chart.wedges[1].label, "Other");
    assert!(chart.wedges.iter().all(|w| w.offset == 0.0));

    assert!(is_normal_with(&normal_sample(300, 42), &config.normality).unwrap());

    let json_path = dir.path().join("eda.json");
    config.to_file(&json_path).unwrap();
    assert_eq!(EdaConfig::from_file(&json_path).unwrap(), config);
}
