use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "emoji-i18n-gen",
    version,
    about = "Generate Fluent translation files from CLDR emoji annotations"
)]
struct Cli {
    /// Glob pattern for the annotation JSON tree
    #[arg(value_name = "ANNOTATIONS_GLOB")]
    primary_pattern: String,

    /// Output directory, or the derived-annotations glob pattern when a
    /// third argument follows
    #[arg(value_name = "DERIVED_GLOB_OR_OUT_DIR")]
    second: String,

    /// Output directory (dual-source mode)
    #[arg(value_name = "OUT_DIR")]
    out_dir: Option<String>,

    /// Enable verbose logging
    #[arg(long = "verbose")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    emoji_i18n_gen::logging::init(cli.verbose)?;

    let config = match cli.out_dir {
        Some(out_dir) => emoji_i18n_gen::Config {
            primary_pattern: cli.primary_pattern,
            derived_pattern: Some(cli.second),
            out_dir: PathBuf::from(out_dir),
        },
        None => emoji_i18n_gen::Config {
            primary_pattern: cli.primary_pattern,
            derived_pattern: None,
            out_dir: PathBuf::from(cli.second),
        },
    };

    let summary = emoji_i18n_gen::run(config).await?;
    println!(
        "wrote {} locale file(s), {} line(s), skipped {} locale(s)",
        summary.locales_written, summary.lines_emitted, summary.locales_skipped
    );
    Ok(())
}
