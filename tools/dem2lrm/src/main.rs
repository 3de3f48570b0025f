use clap::Parser;
use comfy_table::Table;
use env_logger::{Env, TimestampPrecision};
use indicatif::{MultiProgress, ProgressBar};
use indicatif_log_bridge::LogWrapper;
use lrm::{GrassSession, LayerNames, grass::GrassToolkit, pipeline};

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser, Debug)]
#[clap(name = "dem2lrm", about = "Create a Local Relief Model from an elevation raster")]
pub struct Opt {
    #[arg(long = "input", short = 'i', help = "Name of the input elevation raster")]
    pub input: String,

    #[arg(long = "prefix", short = 'o', help = "Prefix for the output layers")]
    pub prefix: String,

    #[arg(
        long = "kernel",
        short = 'k',
        default_value = "25",
        help = "Window size of the low pass filter"
    )]
    pub kernel: u32,
}

fn print_layer_summary(names: &LayerNames) {
    let mut table = Table::new();
    table
        .set_header(vec!["Layer", "Name"])
        .add_row(vec!["Low pass surface", &names.low_pass])
        .add_row(vec!["Relief difference", &names.difference])
        .add_row(vec!["Zero contours", &names.contours])
        .add_row(vec!["Sampled points", &names.points])
        .add_row(vec!["Purged surface", &names.purged])
        .add_row(vec!["Local Relief Model", &names.lrm]);

    println!("{table}");
}

fn main() -> Result<()> {
    let opt = Opt::parse();

    let logger = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(Some(TimestampPrecision::Millis))
        .build();

    let multi = MultiProgress::new();
    let level = logger.filter();
    LogWrapper::new(multi.clone(), logger).try_init().unwrap();
    log::set_max_level(level);

    // Refuse to run outside a GRASS session before touching any layer.
    let session = GrassSession::from_env()?;
    let toolkit = GrassToolkit::new(session);
    log::debug!("Using GRASS installation at {}", toolkit.session().gisbase().display());

    let options = pipeline::LrmOptions::new(opt.input, opt.prefix).with_kernel(opt.kernel);

    let progress = multi.add(ProgressBar::new_spinner());
    let p = progress.clone();

    let names = pipeline::run(&toolkit, &options)?;
    p.finish_with_message("LRM creation done");

    print_layer_summary(&names);

    Ok(())
}
