use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use sine_create::{
    config::Config,
    discovery::{platform_registry, resolve_browser, Discovery},
    manifest,
    model::Browser,
    prompt::TerminalPrompter,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "sine-create")]
#[command(
    author,
    version,
    about = "Scaffold Sine browser-mod projects with automatic profile discovery"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover a browser profile to develop against
    Discover {
        /// Browser to look for (zen, firefox)
        #[arg(short, long)]
        browser: Option<String>,

        /// Where the browser is installed when running under WSL
        /// (windows, linux)
        #[arg(long)]
        install_location: Option<String>,

        /// Answer every prompt with its default
        #[arg(short, long)]
        yes: bool,

        /// Print the result as JSON instead of human-readable text
        #[arg(long)]
        json: bool,

        /// Write the discovered profile path into this project manifest
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// List known browsers and their support status
    ListBrowsers,

    /// Show or create config file
    Config {
        /// Generate default config file
        #[arg(long)]
        init: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_default();

    match cli.command {
        Commands::Discover {
            browser,
            install_location,
            yes,
            json,
            manifest,
        } => {
            run_discover(
                &config,
                browser.as_deref(),
                install_location.as_deref(),
                yes || config.assume_defaults,
                json,
                manifest,
            )
            .await
        }
        Commands::ListBrowsers => {
            list_browsers();
            Ok(())
        }
        Commands::Config { init, path } => handle_config(init, path),
    }
}

async fn run_discover(
    config: &Config,
    browser: Option<&str>,
    install_location: Option<&str>,
    assume_defaults: bool,
    json: bool,
    manifest_path: Option<PathBuf>,
) -> Result<()> {
    let browser = resolve_browser(browser, config.default_browser);
    let interactive = !json && !assume_defaults;

    let prompter = TerminalPrompter::new(assume_defaults || json);
    let registry = platform_registry();
    let discovery = Discovery::new(&prompter, registry.as_ref())
        .with_command_timeout(config.command_timeout());

    let install_location = install_location.map(parse_install_location).transpose()?;
    let platform = discovery.resolve_platform(install_location).await?;

    let spinner = if interactive {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Searching for {} installation...", browser));
        Some(pb)
    } else {
        None
    };

    let root = discovery.find_installation(browser, &platform).await?;

    let root = match root {
        Some(root) => {
            if let Some(pb) = spinner {
                pb.finish_with_message(format!(
                    "Found {} installation at {}",
                    browser,
                    root.path().display()
                ));
            }
            root
        }
        None => {
            if let Some(pb) = spinner {
                pb.finish_with_message(format!("No {} installation found", browser));
            }
            // Discovery failure never aborts the flow; the user can fill in
            // the manifest field by hand later.
            report_not_found(json)?;
            return Ok(());
        }
    };

    let discovered = discovery.pick_profile(&root).await?;

    let Some(discovered) = discovered else {
        if interactive {
            println!("No profiles found. Create a profile in your browser first.");
        }
        report_not_found(json)?;
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&discovered.profile)?);
    } else {
        println!("Selected profile: {}", discovered.profile.display_name);
        println!("Profile path: {}", discovered.profile.path.display());
    }

    if let Some(path) = manifest_path {
        manifest::write_profile_path(&path, &discovered.profile.path)?;
        if !json {
            println!("Updated {}", path.display());
        }
    }

    Ok(())
}

fn report_not_found(json: bool) -> Result<()> {
    if json {
        println!("null");
    }
    Ok(())
}

fn parse_install_location(s: &str) -> Result<sine_create::InstallLocation> {
    match s.to_lowercase().as_str() {
        "windows" => Ok(sine_create::InstallLocation::Windows),
        "linux" => Ok(sine_create::InstallLocation::Linux),
        _ => Err(anyhow::anyhow!(
            "Unknown install location: {}. Use: windows, linux",
            s
        )),
    }
}

fn list_browsers() {
    println!("Known browsers:");
    println!();

    for browser in [Browser::Zen, Browser::Firefox] {
        let supported = if browser.is_supported() {
            "yes"
        } else {
            "not yet"
        };
        println!(
            "  {:<10} {:<20} [supported: {}]",
            browser.as_str(),
            browser.display_name(),
            supported
        );
    }
}

fn handle_config(init: bool, show_path: bool) -> Result<()> {
    let config_path = Config::config_path();

    if show_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if config_path.exists() {
            println!("Config file already exists at: {}", config_path.display());
            return Ok(());
        }

        let config = Config::default();
        config.save()?;
        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Default configuration:");
        println!("{}", Config::generate_default_config());
        return Ok(());
    }

    // Show current config
    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        println!("Config file: {}", config_path.display());
        println!();
        println!("{}", content);
    } else {
        println!("No config file found.");
        println!("Run 'sine-create config --init' to create one.");
        println!();
        println!("Config path: {}", config_path.display());
    }

    Ok(())
}
