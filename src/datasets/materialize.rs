use std::{
    fs,
    path::{Path, PathBuf},
};

use indicatif::{ProgressBar, ProgressDrawTarget};

use super::{
    errors::DatasetError,
    split::{DatasetSplit, SplitPlan},
};

/// Writes `plan` under `output_root` as `train/<class>/` and `val/<class>/`.
///
/// Both top-level folders and every class folder are created even when they
/// end up empty. Files are copied, never moved, and keep their file names.
/// Nothing is rolled back if a copy fails.
pub fn materialize<P: AsRef<Path>>(
    plan: &SplitPlan,
    output_root: P,
    show_progress: bool,
) -> Result<(), DatasetError> {
    let output_root = output_root.as_ref();
    for split in DatasetSplit::ALL {
        create_dir(&output_root.join(split.dir_name()))?;
    }

    let total = (plan.num_files(DatasetSplit::Train) + plan.num_files(DatasetSplit::Val)) as u64;
    let pb = ProgressBar::new(total);
    if !show_progress {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }

    for class in &plan.classes {
        if class.is_empty() {
            tracing::warn!("Class folder {} has no images", class.label);
        }
        for split in DatasetSplit::ALL {
            let class_dir = output_root.join(split.dir_name()).join(&class.label);
            create_dir(&class_dir)?;
            for src in class.files(split) {
                copy_into(src, &class_dir)?;
                pb.inc(1);
            }
        }
        tracing::debug!(
            "Class {}: {} train, {} val",
            class.label,
            class.train.len(),
            class.val.len()
        );
    }
    pb.finish_and_clear();
    Ok(())
}

fn create_dir(path: &Path) -> Result<(), DatasetError> {
    fs::create_dir_all(path).map_err(|source| DatasetError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

fn copy_into(src: &Path, dir: &Path) -> Result<PathBuf, DatasetError> {
    let dst = match src.file_name() {
        Some(name) => dir.join(name),
        None => dir.to_path_buf(),
    };
    fs::copy(src, &dst).map_err(|source| DatasetError::Copy {
        from: src.to_path_buf(),
        to: dst.clone(),
        source,
    })?;
    Ok(dst)
}
