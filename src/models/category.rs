use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Category selector used by listings, summaries and exports.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Sentinel: keep every category.
    #[default]
    All,
    /// Exact, case-sensitive match.
    Only(String),
}

impl CategoryFilter {
    pub fn from_option(value: Option<&str>) -> Self {
        value
            .map(|v| v.parse().unwrap_or_default())
            .unwrap_or_default()
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(s.to_string()))
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all categories"),
            CategoryFilter::Only(c) => write!(f, "{c}"),
        }
    }
}
