use clap::Parser;

mod platform;

fn main() -> anyhow::Result<()> {
    let options = platform::Options::parse();
    platform::run_app(options)
}
