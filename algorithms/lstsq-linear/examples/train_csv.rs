use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use lstsq::metrics::Regression;
use lstsq::traits::{Fit, Predict};
use lstsq_datasets::{load_regression, SeparatedReader};
use lstsq_linear::LinearRegression;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Fit an ordinary least squares model to a delimited file and report the training error
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Numeric table, the last `targets` columns are the targets
    path: PathBuf,

    /// Column delimiter
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,

    /// Number of trailing target columns
    #[arg(short, long, default_value_t = 1)]
    targets: usize,

    /// Skip the first line
    #[arg(long)]
    headers: bool,

    /// Fit without intercept
    #[arg(long)]
    no_intercept: bool,

    /// Number of predictions to print
    #[arg(long, default_value_t = 5)]
    show: usize,
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::fmt()
        .without_time()
        .with_env_filter(filter)
        .init();

    let args = Args::parse();

    let format = SeparatedReader::new()
        .delimiter(args.delimiter)
        .has_headers(args.headers);
    let dataset = load_regression(&args.path, &format, args.targets)?;
    info!(
        path = %args.path.display(),
        samples = dataset.nsamples(),
        features = dataset.nfeatures(),
        targets = dataset.ntargets(),
        "loaded dataset"
    );

    let start = Instant::now();
    let model = LinearRegression::new()
        .with_intercept(!args.no_intercept)
        .fit(&dataset)?;
    info!(elapsed = %humantime::format_duration(start.elapsed()), "fitted model");

    println!("intercept:  {}", model.bias());
    println!("parameters: {}", model.weights().t());

    let start = Instant::now();
    let predicted = model.predict(&dataset)?;
    info!(elapsed = %humantime::format_duration(start.elapsed()), "predicted training rows");

    let mse = predicted.mean_squared_error(dataset.targets())?;
    println!("training MSE: {}", mse);

    for (i, (y_hat, y)) in predicted
        .rows()
        .into_iter()
        .zip(dataset.targets().rows())
        .take(args.show)
        .enumerate()
    {
        println!("{:>4}: predicted {} actual {}", i, y_hat, y);
    }

    Ok(())
}
