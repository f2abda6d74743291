//! Partitions of a single variable at several resolutions.
//!
//! Every variable is clustered once per number of clusters `k`. A partition
//! that collapses into one cluster carries no information about the variable
//! and is stored as [`Partition::Degenerate`] so it can never be compared with
//! a real partition by accident.

use super::quantile::run_quantile_clustering;
use crate::errors::Result;
use tracing::warn;

/// Upper bound of the default range of `k` values.
pub const MAX_DEFAULT_CLUSTERS: usize = 10;

/// Label written in place of every object of a degenerate partition when a
/// family is exported as a plain integer array.
pub const DEGENERATE_LABEL: i16 = -1;

/// Assignment of objects to clusters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Partition {
    /// Labels `0..k'` with `k' >= 2`, one per object.
    Valid(Vec<i16>),
    /// Every object fell into the same cluster.
    Degenerate,
}

impl Partition {
    /// Wraps raw labels, collapsing single-cluster assignments.
    pub fn from_labels(labels: Vec<i16>) -> Self {
        match labels.iter().max() {
            Some(&max) if max > 0 => Self::Valid(labels),
            _ => Self::Degenerate,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Degenerate)
    }

    pub fn labels(&self) -> Option<&[i16]> {
        match self {
            Self::Valid(labels) => Some(labels),
            Self::Degenerate => None,
        }
    }

    /// Number of clusters; zero for a degenerate partition.
    pub fn n_clusters(&self) -> usize {
        self.labels()
            .and_then(|labels| labels.iter().max())
            .map_or(0, |&max| max as usize + 1)
    }

    /// Labels of `n_objects` objects, with [`DEGENERATE_LABEL`] marking a
    /// degenerate partition.
    pub fn to_raw(&self, n_objects: usize) -> Vec<i16> {
        match self {
            Self::Valid(labels) => labels.clone(),
            Self::Degenerate => vec![DEGENERATE_LABEL; n_objects],
        }
    }
}

/// Returns the numbers of clusters used to partition each variable.
///
/// By default this is `2..=min(round(sqrt(n_features)), 10)`; for 25 features
/// it gives `[2, 3, 4, 5]`. Explicit values are filtered to `1 < k < n_features`,
/// deduplicated and sorted.
pub fn range_n_clusters(n_features: usize, internal_n_clusters: Option<&[usize]>) -> Vec<usize> {
    match internal_n_clusters {
        Some(requested) => {
            let mut ks: Vec<usize> = requested
                .iter()
                .copied()
                .filter(|&k| 1 < k && k < n_features)
                .collect();
            ks.sort_unstable();
            ks.dedup();

            if ks.is_empty() {
                warn!(
                    requested = ?requested,
                    n_features,
                    "no usable numbers of clusters; every coefficient will be undefined"
                );
            } else if ks.len() < requested.len() {
                warn!(
                    requested = ?requested,
                    kept = ?ks,
                    n_features,
                    "dropped invalid or repeated numbers of clusters"
                );
            }
            ks
        }
        None => {
            let n_sqrt = ((n_features as f64).sqrt().round() as usize).min(MAX_DEFAULT_CLUSTERS);
            (2..=n_sqrt).collect()
        }
    }
}

/// Partitions of one variable, one slot per number of clusters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionFamily {
    ks: Vec<usize>,
    partitions: Vec<Partition>,
    n_objects: usize,
}

impl PartitionFamily {
    /// Clusters `data` once for each value in `ks`.
    pub fn build(data: &[f64], ks: &[usize]) -> Result<Self> {
        let partitions = ks
            .iter()
            .map(|&k| run_quantile_clustering(data, k).map(Partition::from_labels))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            ks: ks.to_vec(),
            partitions,
            n_objects: data.len(),
        })
    }

    /// Numbers of clusters requested for each slot.
    pub fn ks(&self) -> &[usize] {
        &self.ks
    }

    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    pub fn get(&self, slot: usize) -> Option<&Partition> {
        self.partitions.get(slot)
    }

    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    pub fn n_objects(&self) -> usize {
        self.n_objects
    }

    /// Whether the family can take part in a comparison.
    ///
    /// Only constant data produces single-cluster partitions, and it does so
    /// for every `k`, so inspecting the first slot is enough.
    pub fn is_informative(&self) -> bool {
        self.partitions
            .first()
            .is_some_and(|partition| !partition.is_degenerate())
    }

    /// Family as a `slots x objects` label matrix.
    pub fn to_raw(&self) -> Vec<Vec<i16>> {
        self.partitions
            .iter()
            .map(|partition| partition.to_raw(self.n_objects))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_range() {
        assert_eq!(range_n_clusters(25, None), vec![2, 3, 4, 5]);
        assert_eq!(range_n_clusters(4, None), vec![2]);
        assert_eq!(range_n_clusters(1000, None), (2..=10).collect::<Vec<_>>());
        assert!(range_n_clusters(2, None).is_empty());
    }

    #[test]
    fn test_default_range_rounds_sqrt() {
        // sqrt(30) = 5.48 rounds to 5, sqrt(31) = 5.57 rounds to 6
        assert_eq!(range_n_clusters(30, None), vec![2, 3, 4, 5]);
        assert_eq!(range_n_clusters(31, None), vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_explicit_range_is_filtered_and_deduplicated() {
        let ks = range_n_clusters(10, Some(&[5, 1, 2, 2, 10, 0, 3, 12, 9]));
        assert_eq!(ks, vec![2, 3, 5, 9]);
    }

    #[test]
    fn test_explicit_range_without_usable_values() {
        assert!(range_n_clusters(5, Some(&[0, 1, 5, 9])).is_empty());
        assert!(range_n_clusters(5, Some(&[])).is_empty());
    }

    #[test]
    fn test_from_labels_collapses_singletons() {
        assert_eq!(Partition::from_labels(vec![0, 0, 0]), Partition::Degenerate);
        assert_eq!(
            Partition::from_labels(vec![0, 1, 0]),
            Partition::Valid(vec![0, 1, 0])
        );
    }

    #[test]
    fn test_n_clusters() {
        assert_eq!(Partition::Valid(vec![0, 2, 1, 1]).n_clusters(), 3);
        assert_eq!(Partition::Degenerate.n_clusters(), 0);
    }

    #[test]
    fn test_family_for_constant_data_is_degenerate() {
        let family = PartitionFamily::build(&[3.0; 8], &[2, 3, 4]).unwrap();
        assert_eq!(family.len(), 3);
        assert!(family.partitions().iter().all(Partition::is_degenerate));
        assert!(!family.is_informative());
        assert_eq!(family.to_raw(), vec![vec![-1i16; 8]; 3]);
    }

    #[test]
    fn test_family_slots_follow_ks() {
        let data = [0.5, 3.0, 1.0, 2.0, 4.0, 6.0, 5.0, 7.0];
        let family = PartitionFamily::build(&data, &[2, 4]).unwrap();

        assert_eq!(family.ks(), &[2, 4]);
        assert_eq!(family.n_objects(), 8);
        assert!(family.is_informative());
        assert_eq!(family.get(0).map(Partition::n_clusters), Some(2));
        assert_eq!(family.get(1).map(Partition::n_clusters), Some(4));
        assert_eq!(
            family.get(0).and_then(Partition::labels),
            Some(&[0, 0, 0, 0, 1, 1, 1, 1][..])
        );
    }

    #[test]
    fn test_empty_family_is_not_informative() {
        let family = PartitionFamily::build(&[1.0, 2.0], &[]).unwrap();
        assert!(family.is_empty());
        assert!(!family.is_informative());
    }
}
