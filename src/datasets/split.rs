use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetSplit {
    Train,
    Val,
}

impl DatasetSplit {
    pub const ALL: [DatasetSplit; 2] = [DatasetSplit::Train, DatasetSplit::Val];

    /// Name of the top-level folder holding this partition.
    pub fn dir_name(self) -> &'static str {
        match self {
            DatasetSplit::Train => "train",
            DatasetSplit::Val => "val",
        }
    }
}

/// Ratio and seed driving a train/val split.
///
/// `ratio` is the fraction of each class sent to train and is expected in
/// `(0, 1]`; values are checked where parameters are parsed, not here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitConfig {
    pub ratio: f64,
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            ratio: 0.8,
            seed: 42,
        }
    }
}

/// Number of items out of `len` that land in train.
pub fn cut_index(len: usize, ratio: f64) -> usize {
    let cut = (len as f64 * ratio).floor();
    if cut <= 0.0 {
        0
    } else {
        (cut as usize).min(len)
    }
}

/// Shuffles `items` with a generator freshly seeded from `config.seed` and
/// cuts the result into `(train, val)`.
///
/// Every call restarts the generator, so two lists of the same length are
/// permuted identically.
pub fn shuffle_split<T>(mut items: Vec<T>, config: &SplitConfig) -> (Vec<T>, Vec<T>) {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    items.shuffle(&mut rng);
    let val = items.split_off(cut_index(items.len(), config.ratio));
    (items, val)
}

/// Train and val files of one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSplit {
    pub label: String,
    pub train: Vec<PathBuf>,
    pub val: Vec<PathBuf>,
}

impl ClassSplit {
    pub fn files(&self, split: DatasetSplit) -> &[PathBuf] {
        match split {
            DatasetSplit::Train => &self.train,
            DatasetSplit::Val => &self.val,
        }
    }

    pub fn len(&self) -> usize {
        self.train.len() + self.val.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The per-class partition of a dataset, computed without touching disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitPlan {
    pub classes: Vec<ClassSplit>,
}

impl SplitPlan {
    pub fn num_files(&self, split: DatasetSplit) -> usize {
        self.classes.iter().map(|c| c.files(split).len()).sum()
    }

    pub fn class(&self, label: &str) -> Option<&ClassSplit> {
        self.classes.iter().find(|c| c.label == label)
    }
}

/// Splits every class of `classes` into train and val.
///
/// Files are ordered by name before shuffling so the outcome depends only on
/// the file names, the ratio and the seed.
pub fn plan_split(classes: &BTreeMap<String, Vec<PathBuf>>, config: &SplitConfig) -> SplitPlan {
    let classes = classes
        .iter()
        .map(|(label, files)| {
            let mut files = files.clone();
            files.sort_by(|a, b| file_name(a).cmp(file_name(b)).then_with(|| a.cmp(b)));
            let (train, val) = shuffle_split(files, config);
            ClassSplit {
                label: label.clone(),
                train,
                val,
            }
        })
        .collect();
    SplitPlan { classes }
}

fn file_name(path: &Path) -> &std::ffi::OsStr {
    path.file_name().unwrap_or(path.as_os_str())
}
