// Latent Dirichlet Allocation via collapsed Gibbs sampling.
//
// Counts: ndk[d][t] tokens of doc d assigned to topic t, nkw[t][w]
// occurrences of word w in topic t, nk[t] total tokens in topic t.
// Conditional for resampling one token:
//   p(t) ∝ (ndk[d][t] + alpha) * (nkw[t][w] + beta) / (nk[t] + V*beta)
// The seed is fixed so topic assignments reproduce across runs.

use anyhow::Result;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::TopicFitter;
use crate::vectorize::{DocumentTermMatrix, SparseRow};

/// Gibbs passes over a single held-out document during inference.
const FOLD_IN_ITERATIONS: usize = 20;

/// A fitted topic model: per-topic word distributions over the frozen
/// vocabulary. The topic count is fixed at training time.
#[derive(Debug, Serialize, Deserialize)]
pub struct TopicModel {
    /// phi[t][w]: probability of word w under topic t; each row sums to 1.
    phi: Vec<Vec<f64>>,
    alpha: f64,
    seed: u64,
}

impl TopicModel {
    pub fn num_topics(&self) -> usize {
        self.phi.len()
    }

    pub fn vocab_size(&self) -> usize {
        self.phi.first().map_or(0, Vec::len)
    }

    /// Top `n` terms per topic, descending by weight. Precomputed once
    /// after training and persisted; inference never calls this.
    pub fn top_words(&self, feature_names: &[String], n: usize) -> Vec<Vec<String>> {
        self.phi
            .iter()
            .map(|topic| {
                let mut ranked: Vec<(usize, f64)> =
                    topic.iter().copied().enumerate().collect();
                ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
                ranked
                    .into_iter()
                    .take(n)
                    .filter_map(|(w, _)| feature_names.get(w).cloned())
                    .collect()
            })
            .collect()
    }

    /// Topic-strength distribution for one vectorized document.
    ///
    /// Fold-in Gibbs sampling against the frozen phi; the RNG is re-seeded
    /// from the model seed so the same document always scores the same.
    /// The result sums to 1; an empty row yields the uniform distribution.
    pub fn infer(&self, row: &SparseRow) -> Vec<f64> {
        let k = self.num_topics();
        let tokens: Vec<usize> = row
            .entries
            .iter()
            .flat_map(|&(word, count)| std::iter::repeat(word).take(count as usize))
            .filter(|&word| word < self.vocab_size())
            .collect();

        if tokens.is_empty() || k == 0 {
            return vec![1.0 / k.max(1) as f64; k.max(1)];
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut ndk = vec![0usize; k];
        let mut assignments = Vec::with_capacity(tokens.len());

        for &word in &tokens {
            let weights: Vec<f64> = (0..k).map(|t| self.phi[t][word]).collect();
            let topic = sample_topic(&weights, &mut rng, k);
            ndk[topic] += 1;
            assignments.push(topic);
        }

        for _ in 0..FOLD_IN_ITERATIONS {
            for (pos, &word) in tokens.iter().enumerate() {
                let old = assignments[pos];
                ndk[old] -= 1;

                let weights: Vec<f64> = (0..k)
                    .map(|t| (ndk[t] as f64 + self.alpha) * self.phi[t][word])
                    .collect();
                let new = sample_topic(&weights, &mut rng, k);

                ndk[new] += 1;
                assignments[pos] = new;
            }
        }

        let denom = tokens.len() as f64 + k as f64 * self.alpha;
        ndk.iter()
            .map(|&count| (count as f64 + self.alpha) / denom)
            .collect()
    }
}

/// Collapsed Gibbs LDA trainer with a fixed topic count, seed and
/// iteration cap.
pub struct GibbsLdaFitter {
    pub topics: usize,
    pub alpha: f64,
    pub beta: f64,
    pub iterations: usize,
    pub seed: u64,
}

impl Default for GibbsLdaFitter {
    fn default() -> Self {
        Self {
            topics: 25,
            alpha: 0.1,
            beta: 0.01,
            iterations: 10,
            seed: 42,
        }
    }
}

impl GibbsLdaFitter {
    pub fn with_topics(topics: usize) -> Self {
        Self {
            topics,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl TopicFitter for GibbsLdaFitter {
    fn fit(&self, matrix: &DocumentTermMatrix) -> Result<TopicModel> {
        if self.topics == 0 {
            anyhow::bail!("cannot fit a topic model with zero topics");
        }
        if matrix.n_features == 0 {
            anyhow::bail!("cannot fit a topic model over an empty vocabulary");
        }

        let k = self.topics;
        let v = matrix.n_features;
        let vb = v as f64 * self.beta;

        // Expand sparse rows into per-document token-occurrence lists.
        let docs: Vec<Vec<usize>> = matrix
            .rows
            .iter()
            .map(|row| {
                row.entries
                    .iter()
                    .flat_map(|&(word, count)| std::iter::repeat(word).take(count as usize))
                    .collect()
            })
            .collect();

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut ndk = vec![vec![0usize; k]; docs.len()];
        let mut nkw = vec![vec![0usize; v]; k];
        let mut nk = vec![0usize; k];
        let mut z: Vec<Vec<usize>> = Vec::with_capacity(docs.len());

        for (d, doc) in docs.iter().enumerate() {
            let mut doc_z = Vec::with_capacity(doc.len());
            for &word in doc {
                let topic = rng.gen_range(0..k);
                ndk[d][topic] += 1;
                nkw[topic][word] += 1;
                nk[topic] += 1;
                doc_z.push(topic);
            }
            z.push(doc_z);
        }

        for iteration in 0..self.iterations {
            for (d, doc) in docs.iter().enumerate() {
                for (pos, &word) in doc.iter().enumerate() {
                    let old = z[d][pos];
                    ndk[d][old] -= 1;
                    nkw[old][word] -= 1;
                    nk[old] -= 1;

                    let weights: Vec<f64> = (0..k)
                        .map(|t| {
                            (ndk[d][t] as f64 + self.alpha)
                                * ((nkw[t][word] as f64 + self.beta) / (nk[t] as f64 + vb))
                        })
                        .collect();
                    let new = sample_topic(&weights, &mut rng, k);

                    z[d][pos] = new;
                    ndk[d][new] += 1;
                    nkw[new][word] += 1;
                    nk[new] += 1;
                }
            }
            debug!(iteration = iteration + 1, total = self.iterations, "gibbs pass");
        }

        // phi[t][w] = (nkw[t][w] + beta) / (nk[t] + V*beta)
        let phi = (0..k)
            .map(|t| {
                let denom = nk[t] as f64 + vb;
                (0..v)
                    .map(|w| (nkw[t][w] as f64 + self.beta) / denom)
                    .collect()
            })
            .collect();

        Ok(TopicModel {
            phi,
            alpha: self.alpha,
            seed: self.seed,
        })
    }
}

/// Sample a topic index proportionally to `weights`, falling back to a
/// uniform draw when every weight is zero.
fn sample_topic(weights: &[f64], rng: &mut StdRng, k: usize) -> usize {
    if weights.iter().sum::<f64>() <= f64::EPSILON {
        return rng.gen_range(0..k);
    }
    match WeightedIndex::new(weights) {
        Ok(dist) => dist.sample(rng),
        Err(_) => rng.gen_range(0..k),
    }
}
