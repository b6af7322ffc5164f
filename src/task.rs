//! The dataset classification task and its registration metadata.

use std::path::{Path, PathBuf};

use time::{format_description::FormatItem, macros::format_description, OffsetDateTime};

use crate::{
    datasets::{materialize, plan_split, DatasetError, DatasetSplit, ImageFolder, SplitPlan},
    params::DatasetClassificationParam,
};

/// Prefix of output folders generated next to the dataset folder.
pub const OUTPUT_PREFIX: &str = "dataset_classification";

/// Descriptive metadata a host uses to list and build the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskInfo {
    pub name: &'static str,
    pub short_description: &'static str,
    pub description: &'static str,
    /// Location in the host's task tree.
    pub path: &'static str,
    pub version: &'static str,
    pub authors: &'static str,
    pub year: u16,
    pub license: &'static str,
    pub keywords: &'static str,
}

pub const INFO: TaskInfo = TaskInfo {
    name: "dataset_classification",
    short_description: "Load classification dataset",
    description: "Load a classification dataset from a given folder, optionally \
                  splitting it into train and validation folders so that any \
                  classification training algorithm can consume it.",
    path: "Plugins/Rust/Dataset",
    version: env!("CARGO_PKG_VERSION"),
    authors: "Ikomia team",
    year: 2023,
    license: "MIT License",
    keywords: "dataset, classification, train",
};

impl TaskInfo {
    pub fn create(&self, param: Option<DatasetClassificationParam>) -> DatasetClassification {
        DatasetClassification::new(self.name, param)
    }
}

/// Loads a dataset folder and, when asked to, splits it into `train/` and `val/`.
#[derive(Debug, Clone)]
pub struct DatasetClassification {
    name: String,
    param: DatasetClassificationParam,
    show_progress: bool,
}

impl DatasetClassification {
    pub fn new<S: Into<String>>(name: S, param: Option<DatasetClassificationParam>) -> Self {
        Self {
            name: name.into(),
            param: param.unwrap_or_default(),
            show_progress: true,
        }
    }

    /// Toggle the copy progress bar.
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn param(&self) -> &DatasetClassificationParam {
        &self.param
    }

    /// Number of progress steps reported to a host while running.
    pub fn progress_steps(&self) -> usize {
        1
    }

    /// Runs the task and returns the folder downstream tasks should read.
    ///
    /// With splitting disabled this is the dataset folder itself and nothing
    /// is touched on disk.
    pub fn run(&mut self) -> Result<PathBuf, DatasetError> {
        let output = if self.param.split_dataset {
            self.split()?
        } else {
            self.param.dataset_folder.clone()
        };
        self.param.update = false;
        Ok(output)
    }

    fn split(&self) -> Result<PathBuf, DatasetError> {
        let input = &self.param.dataset_folder;
        let output = match &self.param.output_folder {
            Some(folder) => folder.clone(),
            None => generated_output_folder(input, now_local_or_utc())?,
        };
        tracing::info!(
            "Splitting dataset {} into {} (ratio {}, seed {})",
            input.display(),
            output.display(),
            self.param.dataset_split_ratio,
            self.param.seed
        );

        let folder = ImageFolder::new(input)?;
        if folder.is_empty() {
            tracing::warn!("No images found under {}", input.display());
        }
        let plan = plan_split(folder.classes(), &self.param.split_config());
        materialize(&plan, &output, self.show_progress)?;

        log_summary(&plan);
        tracing::info!("Classification dataset created in {}", output.display());
        Ok(output)
    }
}

/// `<parent of input>/dataset_classification_<YYYYmmdd_HHMMSS>`.
pub fn generated_output_folder(input: &Path, now: OffsetDateTime) -> Result<PathBuf, DatasetError> {
    const NAME_FORMAT: &[FormatItem<'_>] =
        format_description!("[year][month][day]_[hour][minute][second]");
    let parent = input
        .parent()
        .ok_or_else(|| DatasetError::NoParent(input.to_path_buf()))?;
    let stamp = now.format(NAME_FORMAT)?;
    Ok(parent.join(format!("{OUTPUT_PREFIX}_{stamp}")))
}

fn now_local_or_utc() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn log_summary(plan: &SplitPlan) {
    tracing::info!(
        "{} classes, {} train images, {} val images",
        plan.classes.len(),
        plan.num_files(DatasetSplit::Train),
        plan.num_files(DatasetSplit::Val)
    );
}
