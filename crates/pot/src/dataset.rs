//! Per-class bucketing of decoded samples.

use indexmap::IndexMap;

use crate::sample::{Sample, Stroke};

/// Strokes of one sample, without its label.
pub type StrokeSet = Vec<Stroke>;

/// Samples grouped by label code.
///
/// Classes keep the order in which they were first seen; samples within a
/// class keep arrival order.
///
/// ```
/// use casia_pot::{Dataset, Sample};
///
/// let sample = |code| Sample {
///     label_code: code,
///     label_text: 'x',
///     declared_stroke_count: 0,
///     strokes: vec![],
/// };
/// let dataset = Dataset::from_samples([sample(0x42), sample(0x41), sample(0x42)]);
/// assert_eq!(dataset.labels().collect::<Vec<_>>(), vec![0x42, 0x41]);
/// assert_eq!(dataset.get(0x42).map(|s| s.len()), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    classes: IndexMap<u16, Vec<StrokeSet>>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buckets samples by `label_code`.
    pub fn from_samples(samples: impl IntoIterator<Item = Sample>) -> Self {
        let mut dataset = Self::new();
        for sample in samples {
            dataset.insert(sample.label_code, sample.strokes);
        }
        dataset
    }

    /// Adds one sample's strokes to its class.
    pub fn insert(&mut self, label_code: u16, strokes: StrokeSet) {
        self.classes.entry(label_code).or_default().push(strokes);
    }

    /// Replaces a whole class, returning the previous samples.
    pub fn insert_class(&mut self, label_code: u16, samples: Vec<StrokeSet>) -> Option<Vec<StrokeSet>> {
        self.classes.insert(label_code, samples)
    }

    /// Appends every class of `other`, class by class.
    pub fn merge(&mut self, other: Dataset) {
        for (code, samples) in other.classes {
            self.classes.entry(code).or_default().extend(samples);
        }
    }

    pub fn get(&self, label_code: u16) -> Option<&[StrokeSet]> {
        self.classes.get(&label_code).map(Vec::as_slice)
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Number of samples across all classes.
    pub fn sample_count(&self) -> usize {
        self.classes.values().map(Vec::len).sum()
    }

    pub fn labels(&self) -> impl Iterator<Item = u16> + '_ {
        self.classes.keys().copied()
    }

    /// Classes in first-seen order.
    pub fn classes(&self) -> impl Iterator<Item = (u16, &[StrokeSet])> + '_ {
        self.classes.iter().map(|(code, samples)| (*code, samples.as_slice()))
    }

    /// Sorts classes by label code.
    pub fn sort_labels(&mut self) {
        self.classes.sort_keys();
    }
}

impl FromIterator<Sample> for Dataset {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self::from_samples(iter)
    }
}

impl Extend<Sample> for Dataset {
    fn extend<I: IntoIterator<Item = Sample>>(&mut self, iter: I) {
        for sample in iter {
            self.insert(sample.label_code, sample.strokes);
        }
    }
}
