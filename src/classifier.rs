//! Labeled training and classification over a pluggable index

use std::time::Instant;

use tracing::info;

use crate::distance::SampleMetric;
use crate::error::{Result, SearchError};
use crate::flat_index::FlatIndex;
use crate::index::Index;
use crate::metrics::MetricsCollector;
use crate::sample::Sample;
use crate::sequence::Sequence;

/// Outcome of classifying a batch of labeled queries.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Strategy that produced the predictions.
    pub strategy: &'static str,
    /// Number of queries classified.
    pub total: usize,
    pub metrics: MetricsCollector,
}

impl Evaluation {
    pub fn accuracy(&self) -> f64 {
        self.metrics.accuracy()
    }
}

/// Classifies samples by the label of the training sample its index picks.
#[derive(Debug)]
pub struct Classifier<I: Index<Sample>> {
    index: I,
    /// (ncols, nrows) shared by every training sample
    shape: Option<(usize, usize)>,
}

impl Classifier<FlatIndex<Sample, SampleMetric>> {
    /// Create a classifier backed by a serial exhaustive index.
    pub fn new(metric: SampleMetric) -> Self {
        Self::with_index(FlatIndex::new(metric))
    }
}

impl<I: Index<Sample>> Classifier<I> {
    /// Create a classifier with the given index.
    pub fn with_index(index: I) -> Self {
        Self { index, shape: None }
    }

    /// Replace the training set. Every sample must be labeled and all must
    /// share one grid shape.
    pub fn train(&mut self, samples: Vec<Sample>) -> Result<()> {
        self.train_sequence(Sequence::from_vec(samples))
    }

    /// [`Classifier::train`] for a prepared container; a set sortedness flag
    /// is passed through to the index.
    pub fn train_sequence(&mut self, samples: Sequence<Sample>) -> Result<()> {
        let mut shape = None;
        for (i, sample) in samples.iter().enumerate() {
            if sample.label().is_none() {
                return Err(SearchError::InvalidArgument(format!(
                    "training sample {} has no label",
                    i
                )));
            }
            let this = (sample.ncols(), sample.nrows());
            match shape {
                None => shape = Some(this),
                Some(expected) if expected != this => {
                    return Err(SearchError::DimensionMismatch {
                        expected: expected.0 * expected.1,
                        actual: this.0 * this.1,
                    });
                }
                Some(_) => {}
            }
        }

        self.index.train(samples)?;
        self.shape = shape;
        Ok(())
    }

    /// The training sample picked for `query` (a copy).
    pub fn classify(&self, query: &Sample) -> Result<Sample> {
        if let Some((ncols, nrows)) = self.shape {
            if (query.ncols(), query.nrows()) != (ncols, nrows) {
                return Err(SearchError::DimensionMismatch {
                    expected: ncols * nrows,
                    actual: query.ncols() * query.nrows(),
                });
            }
        }
        self.index.classify(query)
    }

    /// Label of the training sample picked for `query`.
    pub fn predict_label(&self, query: &Sample) -> Result<char> {
        let found = self.classify(query)?;
        found.label().ok_or_else(|| {
            SearchError::InvalidArgument("matched training sample has no label".to_string())
        })
    }

    /// Classify every query, timing each one. Only labeled queries count
    /// towards accuracy.
    pub fn evaluate(&self, queries: &[Sample]) -> Result<Evaluation> {
        let mut metrics = MetricsCollector::new();
        for query in queries {
            let start = Instant::now();
            let predicted = self.predict_label(query)?;
            metrics.record_query(start.elapsed());
            if let Some(expected) = query.label() {
                metrics.record_prediction(expected, predicted);
            }
        }

        let evaluation = Evaluation {
            strategy: self.index.name(),
            total: queries.len(),
            metrics,
        };
        info!(
            strategy = evaluation.strategy,
            total = evaluation.total,
            accuracy = evaluation.accuracy(),
            avg_us = evaluation.metrics.avg_query_latency_us(),
            "evaluation finished"
        );
        Ok(evaluation)
    }

    /// Get the number of training samples
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Grid shape `(ncols, nrows)` of the training set, if trained.
    pub fn shape(&self) -> Option<(usize, usize)> {
        self.shape
    }

    /// Get a reference to the underlying index.
    pub fn index(&self) -> &I {
        &self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy_index::ProxyIndex;
    use approx::assert_relative_eq;

    fn labeled(pixels: Vec<u8>, label: char) -> Sample {
        Sample::new(pixels, 2, 2).unwrap().with_label(label)
    }

    fn training() -> Vec<Sample> {
        vec![
            labeled(vec![0, 0, 0, 0], '0'),
            labeled(vec![200, 0, 0, 200], '1'),
            labeled(vec![0, 200, 200, 0], '2'),
            labeled(vec![250, 250, 250, 250], '3'),
        ]
    }

    #[test]
    fn test_train_and_classify() {
        let mut classifier = Classifier::new(SampleMetric::SquaredEuclidean);
        classifier.train(training()).unwrap();
        assert_eq!(classifier.len(), 4);
        assert_eq!(classifier.shape(), Some((2, 2)));

        let query = Sample::new(vec![190, 10, 5, 210], 2, 2).unwrap();
        assert_eq!(classifier.predict_label(&query).unwrap(), '1');
    }

    #[test]
    fn test_unlabeled_training_rejected() {
        let mut classifier = Classifier::new(SampleMetric::SquaredEuclidean);
        let mut samples = training();
        samples.push(Sample::new(vec![1, 1, 1, 1], 2, 2).unwrap());
        let err = classifier.train(samples).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(classifier.is_empty());
    }

    #[test]
    fn test_mixed_shapes_rejected() {
        let mut classifier = Classifier::new(SampleMetric::SquaredEuclidean);
        let mut samples = training();
        samples.push(Sample::new(vec![1; 6], 3, 2).unwrap().with_label('9'));
        assert!(matches!(
            classifier.train(samples),
            Err(SearchError::DimensionMismatch { expected: 4, actual: 6 })
        ));
    }

    #[test]
    fn test_query_shape_checked() {
        let mut classifier = Classifier::new(SampleMetric::SquaredEuclidean);
        classifier.train(training()).unwrap();
        let query = Sample::new(vec![0; 9], 3, 3).unwrap();
        assert!(matches!(
            classifier.classify(&query),
            Err(SearchError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_classify_empty() {
        let classifier = Classifier::new(SampleMetric::SquaredEuclidean);
        let query = Sample::new(vec![0; 4], 2, 2).unwrap();
        assert!(classifier.classify(&query).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_evaluate() {
        let mut classifier =
            Classifier::with_index(ProxyIndex::with_window(SampleMetric::SquaredEuclidean, 8));
        classifier.train(training()).unwrap();

        let queries = vec![
            labeled(vec![1, 0, 0, 1], '0'),
            labeled(vec![240, 250, 250, 240], '3'),
            labeled(vec![5, 5, 5, 5], '1'),
            Sample::new(vec![200, 0, 0, 200], 2, 2).unwrap(),
        ];
        let evaluation = classifier.evaluate(&queries).unwrap();
        assert_eq!(evaluation.strategy, "proxy");
        assert_eq!(evaluation.total, 4);
        assert_eq!(evaluation.metrics.total_queries(), 4);
        assert_eq!(evaluation.metrics.correct(), 2);
        assert_eq!(evaluation.metrics.incorrect(), 1);
        assert_relative_eq!(evaluation.accuracy(), 2.0 / 3.0, epsilon = 1e-9);
    }
}
