// Topic fitter trait — swap-ready abstraction.
//
// Like the EntityTagger and Lemmatizer traits, this isolates the one step
// a different algorithm could replace (variational LDA, NMF) without
// changing the training pipeline around it.

use anyhow::Result;

use super::lda::TopicModel;
use crate::vectorize::DocumentTermMatrix;

/// Trait for fitting a topic model over a document-term matrix.
pub trait TopicFitter {
    /// Fit and return the model. The topic count and any seeds are
    /// configuration of the implementation, frozen per instance.
    fn fit(&self, matrix: &DocumentTermMatrix) -> Result<TopicModel>;
}
