use clap::Parser;
use mcast_music::{cast, common::box_error::BoxError};

/// Tell the speaker group to quit playing
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Mac address of a speaker that should stop (repeatable)
    #[arg(short, long)]
    mac: Vec<String>,
}

fn main() -> Result<(), BoxError> {
    env_logger::init();
    let args = Args::parse();

    let config = cast::CastConfig::build()?;
    cast::stop(&config, &args.mac)
}
