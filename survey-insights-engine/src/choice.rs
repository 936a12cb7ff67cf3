use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceCount {
    pub option: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceDistribution {
    pub total: usize,
    pub counts: Vec<ChoiceCount>,
    pub mode: Option<String>,
}

impl ChoiceDistribution {
    /// Declared options come first in declared order (zero counts included),
    /// then any undeclared selections sorted alphabetically.
    pub fn from_selections(options: &[String], selections: &[String]) -> Self {
        let mut tally: HashMap<&str, usize> = HashMap::new();
        for selection in selections {
            *tally.entry(selection.as_str()).or_insert(0) += 1;
        }

        let mut ordered: Vec<&str> = Vec::with_capacity(tally.len().max(options.len()));
        for option in options {
            if !ordered.contains(&option.as_str()) {
                ordered.push(option.as_str());
            }
        }
        let undeclared: BTreeSet<&str> = tally
            .keys()
            .copied()
            .filter(|value| !ordered.contains(value))
            .collect();
        ordered.extend(undeclared);

        let total = selections.len();
        let counts: Vec<ChoiceCount> = ordered
            .into_iter()
            .map(|option| {
                let count = tally.get(option).copied().unwrap_or(0);
                ChoiceCount {
                    option: option.to_string(),
                    count,
                    percentage: if total == 0 {
                        0.0
                    } else {
                        count as f64 / total as f64 * 100.0
                    },
                }
            })
            .collect();

        // First listed option wins a tie.
        let mode = counts
            .iter()
            .filter(|c| c.count > 0)
            .fold(None::<&ChoiceCount>, |best, c| match best {
                Some(b) if b.count >= c.count => Some(b),
                _ => Some(c),
            })
            .map(|c| c.option.clone());

        Self { total, counts, mode }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_declared_options_keep_order() {
        let distribution = ChoiceDistribution::from_selections(
            &strings(&["Yes", "No", "Maybe"]),
            &strings(&["No", "Yes", "No", "Other", "Another"]),
        );

        let options: Vec<&str> = distribution.counts.iter().map(|c| c.option.as_str()).collect();
        assert_eq!(options, vec!["Yes", "No", "Maybe", "Another", "Other"]);
        assert_eq!(distribution.counts[1].count, 2);
        assert_eq!(distribution.counts[1].percentage, 40.0);
        assert_eq!(distribution.counts[2].count, 0);
        assert_eq!(distribution.mode.as_deref(), Some("No"));
    }

    #[test]
    fn test_tie_goes_to_first_listed() {
        let distribution =
            ChoiceDistribution::from_selections(&strings(&["B", "A"]), &strings(&["A", "B"]));
        assert_eq!(distribution.mode.as_deref(), Some("B"));
    }

    #[test]
    fn test_no_selections() {
        let distribution = ChoiceDistribution::from_selections(&strings(&["A"]), &[]);
        assert_eq!(distribution.total, 0);
        assert_eq!(distribution.counts[0].percentage, 0.0);
        assert_eq!(distribution.mode, None);
    }
}
