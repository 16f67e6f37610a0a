use clap::Parser;
use mcast_music::{cast, common::box_error::BoxError, media::info::AudioFormat};

/// Push a wav file to the speaker group over UDP multicast
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Filename of the wav to cast
    #[arg(short, long)]
    file: String,

    /// Mac address of a speaker that should play it (repeatable)
    #[arg(short, long)]
    mac: Vec<String>,
}

fn main() -> Result<(), BoxError> {
    env_logger::init();
    let args = Args::parse();

    let config = cast::CastConfig::build()?;
    cast::run(&config, &args.file, AudioFormat::Pcm, &args.mac)
}
