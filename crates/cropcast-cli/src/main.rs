use anyhow::Result;
use clap::{Arg, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use cropcast_cli::predict::run_prediction;
use cropcast_cli::train::{load_train_config, run_training, TrainConfig};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("CROPCAST_LOG", "error,cropcast=info"))
        .init();

    let matches = Command::new("cropcast")
        .version(clap::crate_version!())
        .about("\u{1F33E} cropcast - Crop recommendation trainer and predictor")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("train")
                .about("Fit a random-forest model from a labeled crop CSV")
                .arg(
                    Arg::new("data")
                        .help("Path to the labeled crop CSV dataset")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help(
                            "Path to a training configuration JSON file. \
                             Defaults are used when omitted.",
                        )
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output_file")
                        .short('o')
                        .long("output")
                        .help(
                            "File path the model artifact is written to. \
                             Overrides the configuration file.",
                        )
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("num_trees")
                        .long("num-trees")
                        .help(
                            "Number of trees in the ensemble. \
                             Overrides the configuration file.",
                        )
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .help("Seed for the split and the tree fits. Overrides the configuration file.")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("predict")
                .about("Predict the optimal crop for a JSON feature object")
                .arg(
                    Arg::new("model")
                        .short('m')
                        .long("model")
                        .help("Path to the trained model artifact")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("input")
                        .help(
                            "JSON object with keys nitrogen, phosphorus, potassium, \
                             temperature, humidity, ph, rainfall",
                        )
                        .required(true),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("train", sub_m)) => handle_train(sub_m),
        Some(("predict", sub_m)) => handle_predict(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_train(matches: &ArgMatches) -> Result<()> {
    let data_path: &PathBuf = matches.get_one("data").unwrap();

    let mut config = if let Some(config_path) = matches.get_one::<PathBuf>("config") {
        log::info!("[cropcast::train] Using config: {:?}", config_path);
        load_train_config(config_path)?
    } else {
        TrainConfig::default()
    };
    if let Some(output) = matches.get_one::<PathBuf>("output_file") {
        config.output_file = output.clone();
    }
    if let Some(&num_trees) = matches.get_one::<usize>("num_trees") {
        config.forest.num_trees = num_trees;
    }
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        config.forest.seed = seed;
    }

    match run_training(data_path, &config) {
        Ok(acc) => {
            eprintln!("[cropcast::train] Held-out accuracy: {:.2}%", acc * 100.0);
            Ok(())
        }
        Err(e) => {
            log::error!("Training failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_predict(matches: &ArgMatches) -> Result<()> {
    let model_path: &PathBuf = matches.get_one("model").unwrap();
    let input: &String = matches.get_one("input").unwrap();

    match run_prediction(model_path, input) {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Err(e) => {
            log::error!("Prediction failed: {:#}", e);
            std::process::exit(1)
        }
    }
}
