use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use dataset_classification::{logging, params, task, DatasetClassificationParam};

/// Load a classification dataset folder and optionally split it into train/val.
#[derive(Parser, Debug)]
#[command(name = "dataset-classification", version, long_about = None)]
struct Args {
    /// Dataset root holding one subfolder per class
    dataset_folder: Option<PathBuf>,

    /// TOML file with task parameters; command-line flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Split the dataset into train and val folders
    #[arg(long, conflicts_with = "no_split")]
    split: bool,

    /// Pass the dataset folder through unsplit, even if the config file enables splitting
    #[arg(long)]
    no_split: bool,

    /// Fraction of each class copied to train
    #[arg(long, value_parser = validate_ratio)]
    ratio: Option<f64>,

    /// Seed for the per-class shuffle
    #[arg(long)]
    seed: Option<u64>,

    /// Output folder (default: timestamped folder next to the dataset)
    #[arg(long)]
    output_folder: Option<PathBuf>,

    /// Hide the copy progress bar
    #[arg(long)]
    no_progress: bool,

    /// Fallback log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print task metadata and exit
    #[arg(long)]
    info: bool,
}

fn validate_ratio(s: &str) -> Result<f64, String> {
    let ratio = f64::from_str(s).map_err(|e| e.to_string())?;
    params::check_ratio(ratio).map_err(|e| e.to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Err(err) = logging::init(&args.log_level) {
        eprintln!("Logging disabled: {err}");
    }

    if args.info {
        print_info(&task::INFO);
        return Ok(());
    }

    let param = build_param(&args)?;
    if param.dataset_folder.as_os_str().is_empty() {
        return Err("no dataset folder given".into());
    }

    let mut task = task::INFO
        .create(Some(param))
        .with_progress(!args.no_progress);
    let output = task.run()?;
    println!("{}", output.display());
    Ok(())
}

fn build_param(args: &Args) -> Result<DatasetClassificationParam, params::ParamError> {
    let mut param = match &args.config {
        Some(path) => DatasetClassificationParam::from_toml_file(path)?,
        None => DatasetClassificationParam::default(),
    };
    if let Some(folder) = &args.dataset_folder {
        param.dataset_folder = folder.clone();
    }
    if args.split {
        param.split_dataset = true;
    } else if args.no_split {
        param.split_dataset = false;
    }
    if let Some(ratio) = args.ratio {
        param.dataset_split_ratio = ratio;
    }
    if let Some(seed) = args.seed {
        param.seed = seed;
    }
    if let Some(folder) = &args.output_folder {
        param.output_folder = Some(folder.clone());
    }
    param.update = true;
    Ok(param)
}

fn print_info(info: &task::TaskInfo) {
    println!("{} {}", info.name, info.version);
    println!("{}", info.short_description);
    println!("{}", info.description);
    println!("path: {}", info.path);
    println!("authors: {} ({})", info.authors, info.year);
    println!("license: {}", info.license);
    println!("keywords: {}", info.keywords);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("dataset-classification").chain(args.iter().copied()))
            .unwrap()
    }

    fn config_file(text: &str) -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        std::fs::write(file.path(), text).unwrap();
        file
    }

    #[test]
    fn flags_override_config_file() {
        let file = config_file(
            "dataset_folder = \"/data/pets\"\nsplit_dataset = true\ndataset_split_ratio = 0.5\nseed = 3\n",
        );
        let path = file.path().to_str().unwrap();

        let param = build_param(&parse(&["--config", path, "--no-split", "--ratio", "0.9"])).unwrap();
        assert!(!param.split_dataset);
        assert_eq!(param.dataset_split_ratio, 0.9);
        assert_eq!(param.seed, 3);
        assert_eq!(param.dataset_folder, PathBuf::from("/data/pets"));

        let param = build_param(&parse(&["--config", path, "/data/birds"])).unwrap();
        assert!(param.split_dataset);
        assert_eq!(param.dataset_folder, PathBuf::from("/data/birds"));
    }

    #[test]
    fn split_flag_enables_splitting() {
        let param = build_param(&parse(&["/data/pets", "--split", "--seed", "7"])).unwrap();
        assert!(param.split_dataset);
        assert_eq!(param.seed, 7);
        assert!(param.output_folder.is_none());
    }

    #[test]
    fn split_and_no_split_conflict() {
        let res = Args::try_parse_from(["dataset-classification", "--split", "--no-split"]);
        assert!(res.is_err());
    }

    #[test]
    fn ratio_outside_range_is_rejected() {
        let res = Args::try_parse_from(["dataset-classification", "--ratio", "1.2"]);
        assert!(res.is_err());
    }
}
