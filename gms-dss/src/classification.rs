//! Sustainability categories for a stage of extraction.
//!
//! Two boundary conventions are in use. The assessment categories close each
//! band on its upper edge, so exactly 70% is Safe. The project status treats
//! exactly 70% as Semi-critical. They are kept as separate functions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Assessment category of a groundwater unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Safe,
    #[serde(rename = "Semi-critical")]
    SemiCritical,
    Critical,
    #[serde(rename = "Over-Exploited")]
    OverExploited,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Safe => "Safe",
            Category::SemiCritical => "Semi-critical",
            Category::Critical => "Critical",
            Category::OverExploited => "Over-Exploited",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Category::Safe => "SAFE: Groundwater extraction is within sustainable limits.",
            Category::SemiCritical => "SEMI-CRITICAL: Caution is advised.",
            Category::Critical => "CRITICAL: High stress on resources.",
            Category::OverExploited => "OVER-EXPLOITED: Extraction exceeds recharge.",
        }
    }

    /// Severity colour name.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Safe => "green",
            Category::SemiCritical => "orange",
            Category::Critical => "red",
            Category::OverExploited => "darkred",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Message, colour and category for one stage of extraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Recommendation {
    pub message: &'static str,
    pub color: &'static str,
    pub category: Category,
}

impl From<Category> for Recommendation {
    fn from(category: Category) -> Self {
        Recommendation {
            message: category.message(),
            color: category.color(),
            category,
        }
    }
}

/// Assessment category: ≤70 Safe, (70, 90] Semi-critical, (90, 100] Critical,
/// otherwise Over-Exploited (including NaN).
pub fn classify(stage_percent: f64) -> Category {
    if stage_percent <= 70.0 {
        Category::Safe
    } else if stage_percent <= 90.0 {
        Category::SemiCritical
    } else if stage_percent <= 100.0 {
        Category::Critical
    } else {
        Category::OverExploited
    }
}

/// Category with its message and colour.
pub fn classify_primary(stage_percent: f64) -> Recommendation {
    classify(stage_percent).into()
}

/// Status of a unit after adding a project's water demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    Sustainable,
    #[serde(rename = "Semi-critical")]
    SemiCritical,
    Critical,
    #[serde(rename = "Non-sustainable")]
    NonSustainable,
}

impl ProjectStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Sustainable => "Sustainable",
            ProjectStatus::SemiCritical => "Semi-critical",
            ProjectStatus::Critical => "Critical",
            ProjectStatus::NonSustainable => "Non-sustainable",
        }
    }

    /// Indicator colour as a hex code.
    pub fn color(&self) -> &'static str {
        match self {
            ProjectStatus::Sustainable => "#32CD32",
            ProjectStatus::SemiCritical => "#FFD700",
            ProjectStatus::Critical => "#FFA500",
            ProjectStatus::NonSustainable => "#FF0000",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Project status: <70 Sustainable, [70, 90] Semi-critical, (90, 100] Critical,
/// otherwise Non-sustainable (including NaN).
pub fn classify_project(stage_percent: f64) -> ProjectStatus {
    if stage_percent < 70.0 {
        ProjectStatus::Sustainable
    } else if (70.0..=90.0).contains(&stage_percent) {
        ProjectStatus::SemiCritical
    } else if stage_percent > 90.0 && stage_percent <= 100.0 {
        ProjectStatus::Critical
    } else {
        ProjectStatus::NonSustainable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_primary_bands() {
        assert_eq!(classify_primary(0.0).category, Category::Safe);
        assert_eq!(classify_primary(70.0).category, Category::Safe);
        assert_eq!(classify_primary(70.01).category, Category::SemiCritical);
        assert_eq!(classify_primary(90.0).category, Category::SemiCritical);
        assert_eq!(classify_primary(90.5).category, Category::Critical);
        assert_eq!(classify_primary(100.0).category, Category::Critical);
        assert_eq!(classify_primary(100.01).category, Category::OverExploited);
        assert_eq!(classify_primary(200.0).category, Category::OverExploited);
    }

    #[test]
    fn test_classify_is_monotonic() {
        let mut previous = classify(0.0) as u8;
        for i in 0..=2500 {
            let current = classify(i as f64 * 0.1) as u8;
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn test_recommendation_text() {
        let rec = classify_primary(95.0);
        assert_eq!(rec.color, "red");
        assert_eq!(rec.message, "CRITICAL: High stress on resources.");
        assert_eq!(rec.category.to_string(), "Critical");
    }

    #[test]
    fn test_classify_project_bands() {
        assert_eq!(classify_project(69.99), ProjectStatus::Sustainable);
        assert_eq!(classify_project(70.0), ProjectStatus::SemiCritical);
        assert_eq!(classify_project(90.0), ProjectStatus::SemiCritical);
        assert_eq!(classify_project(90.01), ProjectStatus::Critical);
        assert_eq!(classify_project(100.0), ProjectStatus::Critical);
        assert_eq!(classify_project(100.5), ProjectStatus::NonSustainable);
        assert_eq!(classify_project(f64::NAN), ProjectStatus::NonSustainable);
    }

    #[test]
    fn test_boundary_conventions_differ_at_seventy() {
        assert_eq!(classify_primary(70.0).category, Category::Safe);
        assert_eq!(classify_project(70.0), ProjectStatus::SemiCritical);
    }

    #[test]
    fn test_category_serializes_with_labels() {
        let json = serde_json::to_string(&Category::OverExploited).unwrap();
        assert_eq!(json, "\"Over-Exploited\"");
    }
}
