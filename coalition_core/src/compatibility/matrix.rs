//! Pairwise compatibility matrix.

use electoral_rules::{PartyId, PartyProfile};
use serde::Serialize;

use super::{AggregationPolicy, CompatibilityConfig, MAX_SCORE};

/// Scores for every pair of parties, computed once per analysis.
///
/// The matrix is symmetric with [`MAX_SCORE`] on the diagonal. Rows follow
/// the order of the profiles it was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompatibilityMatrix {
    parties: Vec<PartyId>,
    scores: Vec<Vec<f64>>,
}

impl CompatibilityMatrix {
    /// Build the matrix. Profiles are expected to be validated already.
    pub fn build(profiles: &[PartyProfile], config: &CompatibilityConfig) -> Self {
        let n = profiles.len();
        let mut scores = vec![vec![MAX_SCORE; n]; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let score = config.pair_score(
                    profiles[i].ideology.scores(),
                    profiles[j].ideology.scores(),
                );
                scores[i][j] = score;
                scores[j][i] = score;
            }
        }

        Self {
            parties: profiles.iter().map(|p| p.party.clone()).collect(),
            scores,
        }
    }

    pub fn parties(&self) -> &[PartyId] {
        &self.parties
    }

    pub fn len(&self) -> usize {
        self.parties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }

    pub fn index_of(&self, party: &PartyId) -> Option<usize> {
        self.parties.iter().position(|p| p == party)
    }

    /// Compatibility between two parties.
    pub fn score(&self, a: &PartyId, b: &PartyId) -> Option<f64> {
        Some(self.scores[self.index_of(a)?][self.index_of(b)?])
    }

    /// Scores of every member pair, for members given as row indices.
    pub fn pair_scores(&self, members: &[usize]) -> Vec<f64> {
        let mut pairs = Vec::with_capacity(members.len() * members.len().saturating_sub(1) / 2);
        for (pos, &i) in members.iter().enumerate() {
            for &j in &members[pos + 1..] {
                pairs.push(self.scores[i][j]);
            }
        }
        pairs
    }

    /// Aggregate score of a set of members given as row indices.
    pub fn coalition_score(&self, members: &[usize], policy: AggregationPolicy) -> Option<f64> {
        policy.aggregate(&self.pair_scores(members))
    }

    /// Every other party ranked by compatibility with `party`, best first.
    /// Equal scores are ordered by party ID.
    pub fn most_compatible_partners(&self, party: &PartyId) -> Vec<(PartyId, f64)> {
        let Some(row) = self.index_of(party) else {
            return Vec::new();
        };

        let mut partners: Vec<_> = self
            .parties
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != row)
            .map(|(idx, id)| (id.clone(), self.scores[row][idx]))
            .collect();

        partners.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        partners
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use electoral_rules::IdeologyVector;

    fn profiles() -> Vec<PartyProfile> {
        vec![
            PartyProfile::new("A", 50, IdeologyVector::new(vec![0.0, 0.0])),
            PartyProfile::new("B", 40, IdeologyVector::new(vec![4.0, 0.0])),
            PartyProfile::new("C", 35, IdeologyVector::new(vec![2.0, 0.0])),
        ]
    }

    #[test]
    fn test_matrix_is_symmetric() {
        let matrix = CompatibilityMatrix::build(&profiles(), &CompatibilityConfig::default());
        let a = PartyId::new("A");
        let b = PartyId::new("B");
        assert_eq!(matrix.score(&a, &b), matrix.score(&b, &a));
        assert_eq!(matrix.score(&a, &a), Some(MAX_SCORE));
        assert_eq!(matrix.len(), 3);
    }

    #[test]
    fn test_unknown_party() {
        let matrix = CompatibilityMatrix::build(&profiles(), &CompatibilityConfig::default());
        assert_eq!(matrix.score(&"A".into(), &"Z".into()), None);
        assert!(matrix.most_compatible_partners(&"Z".into()).is_empty());
    }

    #[test]
    fn test_pair_scores_cover_every_pair() {
        let matrix = CompatibilityMatrix::build(&profiles(), &CompatibilityConfig::default());
        assert_eq!(matrix.pair_scores(&[0, 1, 2]).len(), 3);
        assert_eq!(matrix.pair_scores(&[0, 1]).len(), 1);
        assert!(matrix.pair_scores(&[0]).is_empty());
    }

    #[test]
    fn test_most_compatible_partners() {
        let matrix = CompatibilityMatrix::build(&profiles(), &CompatibilityConfig::default());
        let partners = matrix.most_compatible_partners(&"A".into());
        let ids: Vec<_> = partners.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["C", "B"]);
        assert!(partners[0].1 > partners[1].1);
    }

    #[test]
    fn test_coalition_score_policies() {
        let matrix = CompatibilityMatrix::build(&profiles(), &CompatibilityConfig::default());
        let mean = matrix.coalition_score(&[0, 1, 2], AggregationPolicy::Mean).unwrap();
        let weakest = matrix
            .coalition_score(&[0, 1, 2], AggregationPolicy::WeakestLink)
            .unwrap();
        assert!(weakest < mean);
        assert_eq!(Some(weakest), matrix.score(&"A".into(), &"B".into()));
    }
}
