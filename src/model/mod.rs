// Topic modeling — trainer trait and the Gibbs-sampling LDA default.

pub mod lda;
pub mod traits;

pub use self::lda::{GibbsLdaFitter, TopicModel};
pub use self::traits::TopicFitter;
