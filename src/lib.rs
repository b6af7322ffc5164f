//! Load an image classification dataset from a `root/<class>/<image>` folder
//! and optionally split it into `train/` and `val/` copies.

pub mod datasets;
pub mod logging;
pub mod params;
pub mod task;

pub use params::{DatasetClassificationParam, ParamError};
pub use task::{DatasetClassification, TaskInfo};
