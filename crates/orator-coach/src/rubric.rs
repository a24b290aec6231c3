//! Evaluation dimensions and the metric keys derived from them

use std::collections::HashSet;

/// Storytelling dimensions used when the learner's level supplies none
pub const DEFAULT_STORY_CRITERIA: [&str; 5] = [
    "Coherence and structure",
    "Creativity and originality",
    "Use of descriptive language",
    "Character development",
    "Narrative flow",
];

/// One scored dimension: the label shown to the model and the metric key
/// its score is reported under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
    pub key: String,
    pub label: String,
}

/// Ordered set of criteria with unique metric keys
///
/// Keys are the lower-cased label with whitespace runs replaced by `_`.
/// When two labels normalize to the same key, later ones get a numeric
/// suffix (`_2`, `_3`, ...) so no criterion silently replaces another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rubric {
    criteria: Vec<Criterion>,
}

impl Rubric {
    /// Build a rubric from caller-supplied labels
    ///
    /// Blank labels are skipped. Returns `None` if nothing usable remains so
    /// the caller can fall back to a default rubric.
    pub fn from_labels<I, S>(labels: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut used = HashSet::new();
        let mut criteria = Vec::new();

        for label in labels {
            let label = label.as_ref().trim();
            if label.is_empty() {
                continue;
            }

            let base = metric_key(label);
            let mut key = base.clone();
            let mut n = 2;
            while used.contains(&key) {
                key = format!("{base}_{n}");
                n += 1;
            }

            used.insert(key.clone());
            criteria.push(Criterion {
                key,
                label: label.to_owned(),
            });
        }

        (!criteria.is_empty()).then_some(Self { criteria })
    }

    /// The default storytelling rubric
    pub fn default_story() -> Self {
        Self::from_labels(DEFAULT_STORY_CRITERIA).unwrap_or_else(|| Self { criteria: Vec::new() })
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Metric keys in rubric order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.criteria.iter().map(|c| c.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

/// Normalize a criterion label into a metric key
fn metric_key(label: &str) -> String {
    label
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}
