//! Age range bucket sets offered on the second step

use serde::{Deserialize, Serialize};

/// A selectable age bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeBucket {
    /// Value stored in the draft and sent to the endpoint
    pub value: &'static str,
    /// Label shown to the visitor
    pub label: &'static str,
}

const STANDARD_BUCKETS: &[AgeBucket] = &[
    AgeBucket {
        value: "35-40",
        label: "35 - 40 años",
    },
    AgeBucket {
        value: "41-45",
        label: "41 - 45 años",
    },
    AgeBucket {
        value: "46-50",
        label: "46 - 50 años",
    },
    AgeBucket {
        value: "51-55",
        label: "51 - 55 años",
    },
    AgeBucket {
        value: "56+",
        label: "56 años o más",
    },
];

const COMPACT_BUCKETS: &[AgeBucket] = &[
    AgeBucket {
        value: "25-35",
        label: "25 - 35 años",
    },
    AgeBucket {
        value: "36-45",
        label: "36 - 45 años",
    },
    AgeBucket {
        value: "46-55",
        label: "46 - 55 años",
    },
    AgeBucket {
        value: "56+",
        label: "56 años o más",
    },
];

/// Which bucket set the form offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeRangeSet {
    /// Five buckets starting at 35 (full-page flow)
    #[default]
    Standard,
    /// Four wider buckets starting at 25 (dialog flow)
    Compact,
}

impl AgeRangeSet {
    pub fn buckets(&self) -> &'static [AgeBucket] {
        match self {
            Self::Standard => STANDARD_BUCKETS,
            Self::Compact => COMPACT_BUCKETS,
        }
    }

    /// Position of `value` in this set, if it is one of its buckets
    pub fn position(&self, value: &str) -> Option<usize> {
        self.buckets().iter().position(|b| b.value == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_standard() {
        assert_eq!(AgeRangeSet::default(), AgeRangeSet::Standard);
    }

    #[test]
    fn test_bucket_counts() {
        assert_eq!(AgeRangeSet::Standard.buckets().len(), 5);
        assert_eq!(AgeRangeSet::Compact.buckets().len(), 4);
    }

    #[test]
    fn test_position() {
        assert_eq!(AgeRangeSet::Standard.position("46-50"), Some(2));
        assert_eq!(AgeRangeSet::Standard.position("46-55"), None);
        assert_eq!(AgeRangeSet::Compact.position("46-55"), Some(2));
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&AgeRangeSet::Compact).unwrap();
        assert_eq!(json, "\"compact\"");
        let parsed: AgeRangeSet = serde_json::from_str("\"standard\"").unwrap();
        assert_eq!(parsed, AgeRangeSet::Standard);
    }
}
