//! Test result reporting types.
//!
//! A [`TestResult`] carries only the fields its test actually produced.
//! Grade tests fill the grade fields, index tests the index fields, and
//! so on; everything else stays `None` and is omitted from JSON output.

use serde::{Deserialize, Serialize};

/// The outcome of one readability test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct TestResult {
    /// Stable test id (e.g. "flesch-kincaid").
    pub test: String,
    /// Display name of the test.
    pub name: String,
    /// Grade-level value, when the test produces one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<f64>,
    /// Display label for the grade ("7", "11-12", "college").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_label: Option<String>,
    /// Grade range for range-producing tests (Dale-Chall style).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_range: Option<(u32, u32)>,
    /// Reader age range implied by the grade ("12-13").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_range: Option<String>,
    /// Index value, when the test produces one (0-100 scales, Lix, EFLAW).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<f64>,
    /// Difficulty band label for the index ("standard", "very difficult").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_label: Option<String>,
    /// Predicted cloze percentage, when the test produces one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloze: Option<f64>,
    /// Human-readable explanation of the score.
    pub explanation: String,
}

impl TestResult {
    /// A result with no score fields filled in yet.
    pub fn new(test: &str, name: &str) -> Self {
        Self {
            test: test.to_string(),
            name: name.to_string(),
            grade: None,
            grade_label: None,
            grade_range: None,
            age_range: None,
            index: None,
            index_label: None,
            cloze: None,
            explanation: String::new(),
        }
    }

    /// Fill in a single grade value with its label and age range.
    pub fn with_grade(mut self, grade: f64) -> Self {
        self.grade = Some(grade);
        self.grade_label = Some(grade_label(grade));
        self.age_range = Some(age_range(grade));
        self.explanation = format!("{}: grade level {}", self.name, grade_label(grade));
        self
    }

    /// Fill in a grade range (lower, upper) with its midpoint as the value.
    pub fn with_grade_range(mut self, lower: u32, upper: u32) -> Self {
        let midpoint = f64::from(lower + upper) / 2.0;
        self.grade = Some(midpoint);
        self.grade_label = Some(if lower == upper {
            grade_label(f64::from(lower))
        } else {
            format!("{lower}-{upper}")
        });
        self.grade_range = Some((lower, upper));
        self.age_range = Some(format!("{}-{}", lower + 5, upper + 6));
        self.explanation = format!(
            "{}: grade range {}",
            self.name,
            self.grade_label.as_deref().unwrap_or_default()
        );
        self
    }

    /// Fill in an index value and its difficulty band label.
    pub fn with_index(mut self, index: f64, label: &str) -> Self {
        self.index = Some(index);
        self.index_label = Some(label.to_string());
        self.explanation = format!("{}: {index} ({label})", self.name);
        self
    }

    /// Fill in a predicted cloze percentage.
    pub fn with_cloze(mut self, cloze: f64) -> Self {
        self.cloze = Some(cloze);
        if self.explanation.is_empty() {
            self.explanation = format!("{}: predicted cloze score {cloze}%", self.name);
        }
        self
    }

    /// Replace the generated explanation.
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }
}

/// Display label for a grade value.
///
/// Whole grades within the K-12 range print as plain numbers; 13-16 is
/// college, 17+ is graduate level. Fractional grades keep one decimal.
pub fn grade_label(grade: f64) -> String {
    if grade.fract() != 0.0 {
        return format!("{grade:.1}");
    }
    let g = grade as u32;
    match g {
        0 => "K".to_string(),
        1..=12 => g.to_string(),
        13..=16 => format!("{g} (college)"),
        _ => format!("{g} (graduate)"),
    }
}

/// Reader age range implied by a grade: grade g covers ages g+5 to g+6.
pub fn age_range(grade: f64) -> String {
    let g = grade.floor().max(0.0) as u32;
    format!("{}-{}", g + 5, g + 6)
}
