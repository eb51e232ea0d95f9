//! Pie chart data preparation and layout.

use super::render;
use crate::error::{EdaError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Label of the bucket collecting slices beyond the cap.
pub const OTHER_LABEL: &str = "Other";

/// Radial offset, as a fraction of the radius, of the exploded slice.
pub const EXPLODE_OFFSET: f64 = 0.1;

/// Angle (degrees, counter-clockwise from the positive x axis) of the first slice edge.
pub const START_ANGLE: f64 = 90.0;

/// One category and its count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    /// Category key.
    pub label: String,
    /// Non-negative count or weight.
    pub value: f64,
}

/// Ordered category counts for a pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieData {
    slices: Vec<Slice>,
    /// Whether labels come from text keys (and are capitalized) or positions.
    text_keys: bool,
}

impl PieData {
    /// Slices keyed by their position (`"0"`, `"1"`, ...).
    pub fn from_values(values: &[f64]) -> Self {
        let slices = values
            .iter()
            .enumerate()
            .map(|(i, &value)| Slice {
                label: i.to_string(),
                value,
            })
            .collect();
        Self {
            slices,
            text_keys: false,
        }
    }

    /// Slices keyed by category name, in the order given.
    pub fn from_counts<S, I>(counts: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, f64)>,
    {
        let slices = counts
            .into_iter()
            .map(|(label, value)| Slice {
                label: label.into(),
                value,
            })
            .collect();
        Self {
            slices,
            text_keys: true,
        }
    }

    /// Count occurrences of each distinct item, most frequent first.
    ///
    /// Ties keep the order in which items first appeared.
    pub fn value_counts<S: AsRef<str>>(items: &[S]) -> Self {
        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for item in items {
            let key = item.as_ref();
            let count = counts.entry(key).or_insert(0);
            if *count == 0 {
                order.push(key);
            }
            *count += 1;
        }

        let mut pairs: Vec<(&str, usize)> = order.into_iter().map(|k| (k, counts[k])).collect();
        // Stable sort keeps first-seen order among ties.
        pairs.sort_by(|a, b| b.1.cmp(&a.1));

        Self::from_counts(pairs.into_iter().map(|(k, c)| (k.to_string(), c as f64)))
    }

    /// Slices in order.
    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    /// Number of slices.
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Sum of all slice values.
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Keep the first `keep` slices and merge the rest into an "Other" slice.
    pub fn capped(&self, keep: usize) -> Self {
        if keep >= self.slices.len() {
            return self.clone();
        }
        let other: f64 = self.slices[keep..].iter().map(|s| s.value).sum();
        let mut slices = self.slices[..keep].to_vec();
        slices.push(Slice {
            label: OTHER_LABEL.to_string(),
            value: other,
        });
        Self {
            slices,
            text_keys: true,
        }
    }
}

/// Display options for a pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieOptions {
    /// Explicit labels; derived from the category keys when absent.
    pub labels: Option<Vec<String>>,
    /// Chart title.
    pub title: String,
    /// Maximum number of slices before bucketing the rest into "Other".
    /// `None` or zero keeps every slice.
    pub slices: Option<usize>,
    /// Annotate with the percentage only instead of percentage and count.
    pub percent_only: bool,
    /// Pull the largest slice out from the centre.
    pub explode: bool,
    /// Annotation text color (any SVG color).
    pub text_color: String,
}

impl Default for PieOptions {
    fn default() -> Self {
        Self {
            labels: None,
            title: String::new(),
            slices: None,
            percent_only: false,
            explode: true,
            text_color: "white".to_string(),
        }
    }
}

impl PieOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set explicit labels.
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Cap the number of slices.
    pub fn with_slices(mut self, slices: usize) -> Self {
        self.slices = Some(slices);
        self
    }

    /// Toggle percentage-only annotations.
    pub fn with_percent_only(mut self, percent_only: bool) -> Self {
        self.percent_only = percent_only;
        self
    }

    /// Toggle offsetting the largest slice.
    pub fn with_explode(mut self, explode: bool) -> Self {
        self.explode = explode;
        self
    }

    /// Set annotation text color.
    pub fn with_text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = color.into();
        self
    }
}

/// A laid-out slice of the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wedge {
    /// Label drawn outside the slice.
    pub label: String,
    /// Slice value.
    pub value: f64,
    /// Share of the total, in percent.
    pub percent: f64,
    /// Start angle in degrees.
    pub theta1: f64,
    /// End angle in degrees.
    pub theta2: f64,
    /// Radial offset as a fraction of the radius.
    pub offset: f64,
    /// Text drawn inside the slice; lines separated by `\n`.
    pub annotation: String,
}

impl Wedge {
    /// Angle halfway through the slice, in degrees.
    pub fn mid_angle(&self) -> f64 {
        (self.theta1 + self.theta2) / 2.0
    }
}

/// A pie chart ready to be rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChart {
    /// Chart title.
    pub title: String,
    /// Slices in drawing order.
    pub wedges: Vec<Wedge>,
    /// Annotation text color.
    pub text_color: String,
}

impl PieChart {
    /// Lay out a pie chart.
    ///
    /// # Errors
    /// * `EmptyData` if there are no slices
    /// * `InvalidParameter` for negative or non-finite values, an all-zero
    ///   total, or a label count that does not match
    pub fn new(data: &PieData, options: &PieOptions) -> Result<Self> {
        if data.is_empty() {
            return Err(EdaError::EmptyData("pie chart needs at least one slice".to_string()));
        }
        if let Some(bad) = data.slices().iter().find(|s| !s.value.is_finite() || s.value < 0.0) {
            return Err(EdaError::InvalidParameter(format!(
                "slice '{}' has invalid value {}",
                bad.label, bad.value
            )));
        }

        // A zero cap means no cap.
        let data = match options.slices {
            Some(keep) if keep > 0 => data.capped(keep),
            _ => data.clone(),
        };

        let total = data.total();
        if total <= 0.0 {
            return Err(EdaError::InvalidParameter(
                "pie chart total must be positive".to_string(),
            ));
        }

        let labels = resolve_labels(&data, options.labels.as_deref())?;
        let exploded = if options.explode {
            largest_index(&data)
        } else {
            None
        };

        let mut theta = START_ANGLE;
        let wedges: Vec<Wedge> = data
            .slices()
            .iter()
            .zip(labels)
            .enumerate()
            .map(|(i, (slice, label))| {
                let percent = 100.0 * slice.value / total;
                let theta1 = theta;
                theta += 360.0 * slice.value / total;
                Wedge {
                    label,
                    value: slice.value,
                    percent,
                    theta1,
                    theta2: theta,
                    offset: if exploded == Some(i) { EXPLODE_OFFSET } else { 0.0 },
                    annotation: annotation(percent, total, options.percent_only),
                }
            })
            .collect();

        debug!("Laid out pie chart with {} wedges, total {}", wedges.len(), total);

        Ok(Self {
            title: options.title.clone(),
            wedges,
            text_color: options.text_color.clone(),
        })
    }

    /// Render the chart as an SVG document.
    pub fn to_svg(&self) -> String {
        render::render_pie(self)
    }

    /// Write the chart as SVG to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_svg())?;
        Ok(())
    }
}

/// Lay out a pie chart; shorthand for [`PieChart::new`].
pub fn pie(data: &PieData, options: &PieOptions) -> Result<PieChart> {
    PieChart::new(data, options)
}

fn resolve_labels(data: &PieData, explicit: Option<&[String]>) -> Result<Vec<String>> {
    match explicit {
        Some(labels) if !labels.is_empty() => {
            if labels.len() != data.len() {
                return Err(EdaError::InvalidParameter(format!(
                    "expected {} labels, got {}",
                    data.len(),
                    labels.len()
                )));
            }
            Ok(labels.to_vec())
        }
        _ => Ok(data
            .slices()
            .iter()
            .map(|s| {
                if data.text_keys {
                    capitalize(&s.label)
                } else {
                    s.label.clone()
                }
            })
            .collect()),
    }
}

/// Index of the first slice holding the largest value.
fn largest_index(data: &PieData) -> Option<usize> {
    data.slices()
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, s)| match best {
            Some((_, v)) if v >= s.value => best,
            _ => Some((i, s.value)),
        })
        .map(|(i, _)| i)
}

fn annotation(percent: f64, total: f64, percent_only: bool) -> String {
    if percent_only {
        format!("{:.0}%", percent)
    } else {
        format!("{:.1}%\n({:.0})", percent, total * percent / 100.0)
    }
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
