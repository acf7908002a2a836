//! Per-user statistics over stored dream structures.

use std::collections::{BTreeMap, HashMap};

use crate::structure::DreamStructure;

/// How many themes / archetypes are listed.
pub const TOP_N: usize = 5;

/// Aggregated view of a user's dreams.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DreamStats {
    pub total_dreams: i64,
    pub total_analyses: i64,
    /// Most frequent themes with counts: count descending, then name ascending.
    pub top_themes: Vec<(String, usize)>,
    pub top_archetypes: Vec<(String, usize)>,
    /// Average score per emotion label, rounded to 3 decimals, sorted by label.
    pub avg_emotions: Vec<(String, f64)>,
}

fn top(counts: HashMap<String, usize>) -> Vec<(String, usize)> {
    let mut items: Vec<(String, usize)> = counts.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    items.truncate(TOP_N);
    items
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

impl DreamStats {
    /// Builds stats from `json_struct` strings (as returned by `recent_structures`).
    /// Unparsable entries count as empty structures.
    pub fn from_structures<S: AsRef<str>>(
        total_dreams: i64,
        total_analyses: i64,
        structures: &[S],
    ) -> Self {
        let mut themes: HashMap<String, usize> = HashMap::new();
        let mut archetypes: HashMap<String, usize> = HashMap::new();
        let mut emotions: BTreeMap<String, (f64, usize)> = BTreeMap::new();

        for raw in structures {
            let s = DreamStructure::from_json_str(raw.as_ref());
            for t in s.themes {
                *themes.entry(t).or_default() += 1;
            }
            for a in s.archetypes {
                *archetypes.entry(a).or_default() += 1;
            }
            for e in s.emotions {
                let slot = emotions.entry(e.label).or_insert((0.0, 0));
                slot.0 += e.score;
                slot.1 += 1;
            }
        }

        Self {
            total_dreams,
            total_analyses,
            top_themes: top(themes),
            top_archetypes: top(archetypes),
            avg_emotions: emotions
                .into_iter()
                .map(|(label, (sum, n))| (label, round3(sum / n as f64)))
                .collect(),
        }
    }
}
