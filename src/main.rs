use clap::{Parser, Subcommand};
use simple_photo::{config, manifest, output, render};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Shared flag for commands that read a manifest.
#[derive(clap::Args, Clone)]
struct ManifestArgs {
    /// Image manifest (JSON object of name → {source, link})
    manifest: PathBuf,
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // version_string runs once per process, so the leak is bounded
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "simple-photo")]
#[command(about = "Normalize image pipeline output into responsive image descriptors")]
#[command(long_about = "\
Normalize image pipeline output into responsive image descriptors

Each manifest entry names one image and what the image pipeline produced
for it: either a single URL, or a list of renditions ordered by width.

  {
    \"placeholder\": { \"source\": \"/assets/placeholder.svg\" },
    \"hero\": {
      \"source\": [
        { \"src\": \"/assets/hero-400.webp\", \"w\": 400, \"h\": 300 },
        { \"src\": \"/assets/hero-800.webp\", \"w\": 800, \"h\": 600 }
      ],
      \"link\": \"/gallery/hero\"
    }
  }

Entries that cannot be resolved are kept, with no image.
Run 'simple-photo gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print normalized images as JSON
    Normalize {
        #[command(flatten)]
        args: ManifestArgs,
        /// Print a readable summary instead of JSON
        #[arg(long)]
        summary: bool,
    },
    /// Print gallery HTML for all resolvable images
    Render(ManifestArgs),
    /// Fail if any image has no usable source
    Check(ManifestArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Normalize { args, summary } => {
            let site_config = config::load_config(&cli.config)?;
            let entries = manifest::load_manifest(&args.manifest)?;
            let images = manifest::normalize_manifest(&entries, &site_config.images);
            if summary {
                output::print_normalize_output(&images);
            } else {
                println!("{}", serde_json::to_string_pretty(&images)?);
            }
        }
        Command::Render(args) => {
            let site_config = config::load_config(&cli.config)?;
            let entries = manifest::load_manifest(&args.manifest)?;
            let images = manifest::normalize_manifest(&entries, &site_config.images);
            println!(
                "{}",
                render::render_gallery(&images, &site_config.render).into_string()
            );
        }
        Command::Check(args) => {
            let site_config = config::load_config(&cli.config)?;
            println!("==> Checking {}", args.manifest.display());
            let entries = manifest::load_manifest(&args.manifest)?;
            let images = manifest::normalize_manifest(&entries, &site_config.images);
            output::print_normalize_output(&images);
            let missing = manifest::missing_images(&images);
            output::print_check_output(&missing);
            if !missing.is_empty() {
                return Err(format!("{} image(s) without a usable source", missing.len()).into());
            }
            println!("==> Manifest is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
