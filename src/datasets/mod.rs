pub mod errors;
pub mod folder;
pub mod materialize;
pub mod split;

pub use errors::DatasetError;
pub use folder::{is_image, ImageFolder, IMAGE_EXTENSIONS};
pub use materialize::materialize;
pub use split::{plan_split, ClassSplit, DatasetSplit, SplitConfig, SplitPlan};
