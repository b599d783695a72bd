use serde::{Deserialize, Serialize};

use crate::features::domain::metric::{MetricDefinition, MetricKind};
use crate::shared::landmark_id::LandmarkId as L;

pub const METRIC_COUNT: usize = 17;

/// Which arithmetic the HeadWidth metric uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadWidthFormula {
    /// Historical formula, kept so values match previously stored records.
    #[default]
    Legacy,
    /// Plain Euclidean distance, like every other length metric.
    Euclidean,
}

impl std::fmt::Display for HeadWidthFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeadWidthFormula::Legacy => write!(f, "legacy"),
            HeadWidthFormula::Euclidean => write!(f, "euclidean"),
        }
    }
}

impl std::str::FromStr for HeadWidthFormula {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "legacy" => Ok(HeadWidthFormula::Legacy),
            "euclidean" => Ok(HeadWidthFormula::Euclidean),
            other => Err(format!(
                "head width formula must be 'legacy' or 'euclidean', got '{other}'"
            )),
        }
    }
}

/// Fixed, ordered list of the measurements taken per session.
///
/// The order is the column order of persisted records.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricTable {
    metrics: [MetricDefinition; METRIC_COUNT],
}

impl MetricTable {
    pub fn standard(head_width: HeadWidthFormula) -> Self {
        use MetricKind::{Distance, SkewedDistance};

        let head_width_kind = match head_width {
            HeadWidthFormula::Legacy => SkewedDistance(L::RIGHT_TEMPLE, L::LEFT_TEMPLE),
            HeadWidthFormula::Euclidean => Distance(L::RIGHT_TEMPLE, L::LEFT_TEMPLE),
        };

        Self {
            metrics: [
                MetricDefinition::new("HeadHeight", Distance(L::TOP_SKULL, L::CHIN_TIP)),
                MetricDefinition::new("NoseHeight", Distance(L::NOSE_TIP, L::NOSE_BRIDGE)),
                MetricDefinition::new(
                    "LeftEyeWidth",
                    Distance(L::LEFT_EYE_OUTER, L::LEFT_EYE_INNER),
                ),
                MetricDefinition::new(
                    "RightEyeHeight",
                    Distance(L::RIGHT_EYE_TOP, L::RIGHT_EYE_BOTTOM),
                ),
                MetricDefinition::new(
                    "RightEyeWidth",
                    Distance(L::RIGHT_EYE_OUTER, L::RIGHT_EYE_INNER),
                ),
                MetricDefinition::new(
                    "LeftEyeHeight",
                    Distance(L::LEFT_EYE_TOP, L::LEFT_EYE_BOTTOM),
                ),
                MetricDefinition::new(
                    "MouthWidth",
                    Distance(L::MOUTH_LEFT_CORNER, L::MOUTH_RIGHT_CORNER),
                ),
                MetricDefinition::new("HeadWidth", head_width_kind),
                MetricDefinition::new("ChinWidth", Distance(L::RIGHT_JAW, L::LEFT_JAW)),
                MetricDefinition::new(
                    "OutEyeWidth",
                    Distance(L::RIGHT_EYE_OUTER, L::LEFT_EYE_OUTER),
                ),
                MetricDefinition::new(
                    "LeftCheekMouthLength",
                    Distance(L::MOUTH_LEFT_CORNER, L::LEFT_CHEEK),
                ),
                MetricDefinition::new(
                    "RightCheekMouthLength",
                    Distance(L::MOUTH_RIGHT_CORNER, L::RIGHT_CHEEK),
                ),
                MetricDefinition::new("ChinHeight", Distance(L::CHIN_UPPER, L::CHIN_TIP)),
                MetricDefinition::new(
                    "InEyeWidth",
                    Distance(L::RIGHT_EYE_INNER, L::LEFT_EYE_INNER),
                ),
                MetricDefinition::new(
                    "GoldenTriangleDegree",
                    MetricKind::AngleSimilarity {
                        a: L::RIGHT_BROW_INNER,
                        b: L::NOSE_BRIDGE,
                        c: L::LEFT_BROW_INNER,
                        d: L::NOSE_BRIDGE,
                    },
                ),
                MetricDefinition::new(
                    "SilverTriangleDegree",
                    MetricKind::AngleSimilarity {
                        a: L::RIGHT_EYE_OUTER,
                        b: L::RIGHT_EYE_INNER,
                        c: L::LEFT_EYE_OUTER,
                        d: L::LEFT_EYE_INNER,
                    },
                ),
                MetricDefinition::new(
                    "BronzeTriangleDegree",
                    MetricKind::AngleSimilarity {
                        a: L::CHIN_TIP,
                        b: L::RIGHT_JAW_LOWER,
                        c: L::LEFT_JAW_LOWER,
                        d: L::CHIN_TIP,
                    },
                ),
            ],
        }
    }

    pub fn metrics(&self) -> &[MetricDefinition] {
        &self.metrics
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.metrics.iter().map(|m| m.name)
    }

    pub fn get(&self, name: &str) -> Option<&MetricDefinition> {
        self.metrics.iter().find(|m| m.name == name)
    }
}

impl Default for MetricTable {
    fn default() -> Self {
        Self::standard(HeadWidthFormula::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[test]
    fn test_table_order() {
        let names: Vec<_> = MetricTable::default().names().collect();
        assert_eq!(
            names,
            vec![
                "HeadHeight",
                "NoseHeight",
                "LeftEyeWidth",
                "RightEyeHeight",
                "RightEyeWidth",
                "LeftEyeHeight",
                "MouthWidth",
                "HeadWidth",
                "ChinWidth",
                "OutEyeWidth",
                "LeftCheekMouthLength",
                "RightCheekMouthLength",
                "ChinHeight",
                "InEyeWidth",
                "GoldenTriangleDegree",
                "SilverTriangleDegree",
                "BronzeTriangleDegree",
            ]
        );
    }

    #[test]
    fn test_names_are_unique() {
        let table = MetricTable::default();
        let unique: HashSet<_> = table.names().collect();
        assert_eq!(unique.len(), METRIC_COUNT);
    }

    #[test]
    fn test_only_triangles_are_angle_similarities() {
        let table = MetricTable::default();
        let angles: Vec<_> = table
            .metrics()
            .iter()
            .filter(|m| matches!(m.kind, MetricKind::AngleSimilarity { .. }))
            .map(|m| m.name)
            .collect();
        assert_eq!(
            angles,
            vec![
                "GoldenTriangleDegree",
                "SilverTriangleDegree",
                "BronzeTriangleDegree"
            ]
        );
    }

    #[rstest]
    #[case::head_height("HeadHeight", &[0, 10])]
    #[case::nose_height("NoseHeight", &[94, 39])]
    #[case::right_eye_width("RightEyeWidth", &[20, 23])]
    #[case::head_width("HeadWidth", &[117, 113])]
    #[case::chin_width("ChinWidth", &[30, 63])]
    #[case::left_cheek("LeftCheekMouthLength", &[88, 91])]
    #[case::right_cheek("RightCheekMouthLength", &[89, 90])]
    #[case::in_eye("InEyeWidth", &[23, 56])]
    #[case::golden("GoldenTriangleDegree", &[26, 39, 59, 39])]
    #[case::silver("SilverTriangleDegree", &[20, 23, 53, 56])]
    #[case::bronze("BronzeTriangleDegree", &[10, 32, 65, 10])]
    fn test_landmark_ids(#[case] name: &str, #[case] expected: &[usize]) {
        let table = MetricTable::default();
        let ids: Vec<usize> = table
            .get(name)
            .unwrap()
            .landmarks()
            .iter()
            .map(|l| l.index())
            .collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_head_width_formula_selects_kind() {
        let legacy = MetricTable::standard(HeadWidthFormula::Legacy);
        let euclidean = MetricTable::standard(HeadWidthFormula::Euclidean);
        assert!(matches!(
            legacy.get("HeadWidth").unwrap().kind,
            MetricKind::SkewedDistance(..)
        ));
        assert!(matches!(
            euclidean.get("HeadWidth").unwrap().kind,
            MetricKind::Distance(..)
        ));
    }

    #[rstest]
    #[case("legacy", Ok(HeadWidthFormula::Legacy))]
    #[case("euclidean", Ok(HeadWidthFormula::Euclidean))]
    fn test_head_width_formula_parse(
        #[case] input: &str,
        #[case] expected: Result<HeadWidthFormula, String>,
    ) {
        assert_eq!(input.parse::<HeadWidthFormula>(), expected);
    }

    #[test]
    fn test_head_width_formula_parse_rejects_unknown() {
        assert!("metric".parse::<HeadWidthFormula>().is_err());
    }
}
