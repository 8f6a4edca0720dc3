use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use gatelogue_types::{Category, GatelogueData, Mode};

/// Node counts of a snapshot, for the `--summary` report.
#[derive(Debug, Default)]
pub struct Summary {
    pub version: u64,
    pub timestamp: String,
    pub total: usize,
    pub located: usize,
    pub per_category: BTreeMap<Category, usize>,
    /// Distinct source names attesting node existence
    pub sources: BTreeSet<String>,
}

impl Summary {
    pub fn of(data: &GatelogueData) -> Self {
        Self {
            version: data.version,
            timestamp: data.timestamp.clone(),
            total: data.len(),
            located: data.located().count(),
            per_category: data.category_counts(),
            sources: data
                .nodes()
                .flat_map(|n| n.sources().iter().cloned())
                .collect(),
        }
    }

    pub fn mode_total(&self, mode: Mode) -> usize {
        self.per_category
            .iter()
            .filter(|(c, _)| c.mode() == mode)
            .map(|(_, n)| n)
            .sum()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "version {} generated {}", self.version, self.timestamp)?;
        writeln!(f, "{} nodes ({} located)", self.total, self.located)?;
        writeln!(
            f,
            "by mode: air {}, rail {}, sea {}, bus {}, other {}",
            self.mode_total(Mode::Air),
            self.mode_total(Mode::Rail),
            self.mode_total(Mode::Sea),
            self.mode_total(Mode::Bus),
            self.mode_total(Mode::Other),
        )?;
        for (category, count) in &self.per_category {
            writeln!(f, "  {:<12} {count:>7}", category.short_name())?;
        }
        write!(f, "{} distinct sources", self.sources.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GatelogueData {
        include_str!("../../../crates/types/testdata/sample.json")
            .parse()
            .unwrap()
    }

    #[test]
    fn test_summary_counts() {
        let summary = Summary::of(&sample());
        assert_eq!(summary.total, 19);
        assert_eq!(summary.located, 8);
        assert_eq!(summary.per_category[&Category::AirGate], 3);
        assert_eq!(summary.mode_total(Mode::Air), 7);
        assert_eq!(summary.mode_total(Mode::Rail), 4);
        assert_eq!(summary.mode_total(Mode::Other), 2);
        assert_eq!(
            summary.sources.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["IntraBus", "IntraRail", "MRT Wiki", "Town List"]
        );
    }

    #[test]
    fn test_summary_display() {
        let text = Summary::of(&sample()).to_string();
        assert!(text.starts_with("version 2 generated 2026-10-01T12:30:00.123456\n19 nodes (8 located)\n\
             by mode: air 7, rail 4, sea 3, bus 3, other 2\n"));
        assert!(text.contains("  gate               3\n"));
        assert!(text.ends_with("4 distinct sources"));
    }
}
