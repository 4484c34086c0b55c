use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mdsite")]
#[command(about = "Build a static HTML site from a directory of Markdown files")]
struct Cli {
    /// Prefix for root-relative links (overrides `site.basepath`)
    basepath: Option<String>,

    /// Site config file
    #[arg(short, long, default_value = "site.toml")]
    config: PathBuf,

    /// Log progress at info level
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = mdsite::Config::load(&cli.config);
    if let Some(basepath) = cli.basepath {
        config.site.basepath = basepath;
    }

    let pages = match mdsite::build_site(&config) {
        Ok(pages) => pages,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "Generated {} pages in {}",
        pages,
        config.paths.public.display()
    );
}
