//! Industry classification — buckets a posting into one of eight categories
//! by keyword, so outreach messages can be personalized per industry.
//!
//! Matching is plain substring search over `"{title} {organization}"`,
//! lowercased. It is NOT word-boundary aware: `"hr"` matches inside
//! "shrimp", `"ui"` inside "guitar". Keep it that way unless the matching
//! rules are deliberately redefined, since downstream templates are keyed
//! on the current behavior.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    Technology,
    SalesMarketing,
    Finance,
    Healthcare,
    Design,
    OperationsHr,
    CustomerService,
    General,
}

impl Industry {
    /// Classification priority. The first category with any keyword hit wins.
    pub const PRIORITY: [Industry; 8] = [
        Industry::Technology,
        Industry::SalesMarketing,
        Industry::Finance,
        Industry::Healthcare,
        Industry::Design,
        Industry::OperationsHr,
        Industry::CustomerService,
        Industry::General,
    ];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Industry::Technology => &[
                "developer",
                "engineer",
                "software",
                "programmer",
                "tech",
                "data",
                "cloud",
                "devops",
                "frontend",
                "backend",
            ],
            Industry::SalesMarketing => &[
                "sales",
                "marketing",
                "account",
                "business development",
                "growth",
            ],
            Industry::Finance => &["finance", "accountant", "financial", "controller", "cfo"],
            Industry::Healthcare => &["health", "medical", "doctor", "nurse", "clinical"],
            Industry::Design => &["design", "ux", "ui", "graphic", "creative"],
            Industry::OperationsHr => &["human resources", "hr", "operations", "admin"],
            Industry::CustomerService => &["customer", "support", "service", "success"],
            Industry::General => &[],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Industry::Technology => "technology",
            Industry::SalesMarketing => "sales_marketing",
            Industry::Finance => "finance",
            Industry::Healthcare => "healthcare",
            Industry::Design => "design",
            Industry::OperationsHr => "operations_hr",
            Industry::CustomerService => "customer_service",
            Industry::General => "general",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Industry::Technology => "Technology",
            Industry::SalesMarketing => "Sales & Marketing",
            Industry::Finance => "Finance",
            Industry::Healthcare => "Healthcare",
            Industry::Design => "Design",
            Industry::OperationsHr => "Operations & HR",
            Industry::CustomerService => "Customer Service",
            Industry::General => "General",
        }
    }
}

/// Classifies a posting from its title and organization name.
/// Total and deterministic: anything unmatched, including empty input, is `General`.
pub fn classify(title: &str, organization: &str) -> Industry {
    let text = format!("{title} {organization}").to_lowercase();

    Industry::PRIORITY
        .into_iter()
        .find(|industry| industry.keywords().iter().any(|kw| text.contains(kw)))
        .unwrap_or(Industry::General)
}
