use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::{DegenerateReason, EnrichmentError};

/// Named gene sets in insertion order. Names are unique; members are plain
/// identifiers whose order and multiplicity do not matter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneSetCollection {
    names: Vec<String>,
    members: Vec<Vec<String>>,
}

impl GeneSetCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, N, G, S>(pairs: I) -> Result<Self, EnrichmentError>
    where
        I: IntoIterator<Item = (N, G)>,
        N: Into<String>,
        G: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut collection = Self::new();
        for (name, genes) in pairs {
            collection.insert(name, genes)?;
        }
        Ok(collection)
    }

    pub fn insert<N, G, S>(&mut self, name: N, genes: G) -> Result<(), EnrichmentError>
    where
        N: Into<String>,
        G: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        if self.names.contains(&name) {
            return Err(EnrichmentError::invalid(format!(
                "duplicate gene set name '{}'",
                name
            )));
        }
        self.names.push(name);
        self.members.push(genes.into_iter().map(Into::into).collect());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| self.members[idx].as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.names
            .iter()
            .zip(self.members.iter())
            .map(|(name, genes)| (name.as_str(), genes.as_slice()))
    }

    /// Map every set onto row indices of a matrix with the given row labels.
    ///
    /// Identifiers missing from `gene_ids` are dropped silently. An identifier
    /// found on several rows selects all of them.
    pub fn resolve(&self, gene_ids: &[String]) -> GeneSetIndex {
        let mut lookup: HashMap<&str, Vec<usize>> = HashMap::with_capacity(gene_ids.len());
        for (row, id) in gene_ids.iter().enumerate() {
            lookup.entry(id.as_str()).or_default().push(row);
        }

        let mut connectivity = Vec::new();
        let mut starts = Vec::with_capacity(self.len());
        let mut offsets = Vec::with_capacity(self.len());

        for (name, genes) in self.iter() {
            let unique: HashSet<&str> = genes.iter().map(String::as_str).collect();
            let mut rows: Vec<usize> = unique
                .iter()
                .filter_map(|id| lookup.get(id))
                .flatten()
                .copied()
                .collect();
            rows.sort_unstable();
            rows.dedup();

            let matched = unique.iter().filter(|id| lookup.contains_key(*id)).count();
            if matched < unique.len() {
                debug!(
                    "Gene set {}: dropped {} of {} identifiers not present in the matrix",
                    name,
                    unique.len() - matched,
                    unique.len()
                );
            }

            starts.push(connectivity.len());
            offsets.push(rows.len());
            connectivity.extend(rows);
        }

        GeneSetIndex {
            names: self.names.clone(),
            connectivity,
            starts,
            offsets,
        }
    }
}

/// Gene sets resolved against one matrix: the row indices of set `j` are
/// `connectivity[starts[j]..starts[j] + offsets[j]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneSetIndex {
    names: Vec<String>,
    connectivity: Vec<usize>,
    starts: Vec<usize>,
    offsets: Vec<usize>,
}

impl GeneSetIndex {
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Sorted, de-duplicated row indices of set `j`.
    pub fn get(&self, j: usize) -> Option<&[usize]> {
        let srt = *self.starts.get(j)?;
        self.connectivity.get(srt..srt + self.offsets[j])
    }

    pub(crate) fn membership_mask(&self, j: usize, n_genes: usize) -> Vec<bool> {
        let mut mask = vec![false; n_genes];
        for &row in self.get(j).unwrap_or_default() {
            if row < n_genes {
                mask[row] = true;
            }
        }
        mask
    }

    /// Why set `j` has no defined score on a matrix with `n_genes` rows, if it hasn't.
    pub(crate) fn degeneracy(&self, j: usize, n_genes: usize) -> Option<DegenerateReason> {
        match self.offsets.get(j).copied().unwrap_or_default() {
            0 => Some(DegenerateReason::NoMembers),
            n if n >= n_genes => Some(DegenerateReason::AllMembers),
            _ => None,
        }
    }
}
