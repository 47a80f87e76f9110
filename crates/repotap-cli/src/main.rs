//! repotap CLI - provision hosts against hosted package repositories

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use repotap_core::HostIdentity;

mod commands;
mod error;
mod exit_codes;

#[derive(Parser)]
#[command(name = "repotap")]
#[command(version)]
#[command(about = "Provision hosts to pull from hosted deb/rpm/gem repositories", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

/// Host identity facts, passed through to the service as opaque strings
#[derive(Args)]
struct HostArgs {
    /// Platform name (e.g. ubuntu, el)
    #[arg(long)]
    platform: String,

    /// Distribution codename (deb repositories, e.g. focal)
    #[arg(long, default_value = "")]
    codename: String,

    /// Platform version (rpm repositories, e.g. 9)
    #[arg(long, default_value = "")]
    platform_version: String,

    /// Fully-qualified hostname the read token is scoped to
    #[arg(long)]
    fqdn: String,
}

impl From<HostArgs> for HostIdentity {
    fn from(args: HostArgs) -> Self {
        HostIdentity::new(args.platform, args.codename, args.platform_version, args.fqdn)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the authenticated URL for a single repository
    Provision {
        /// Repository identifier (user/repo)
        name: String,

        /// Repository type: deb, rpm, or gem
        #[arg(short = 't', long = "type")]
        repo_type: String,

        /// Master token used to negotiate a scoped read token
        #[arg(long, env = "REPOTAP_MASTER_TOKEN")]
        master_token: Option<String>,

        #[command(flatten)]
        host: HostArgs,

        /// Service root URL
        #[arg(long, default_value = repotap_core::DEFAULT_SERVICE_ROOT)]
        endpoint: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Print the ecosystem-native configuration snippet instead of the URL
        #[arg(long)]
        render: bool,
    },

    /// Provision every repository in a YAML manifest
    Apply {
        /// Manifest path
        manifest: PathBuf,

        #[command(flatten)]
        host: HostArgs,

        /// Service root URL
        #[arg(long, default_value = repotap_core::DEFAULT_SERVICE_ROOT)]
        endpoint: String,
    },
}

#[tokio::main]
async fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();

    if cli.debug {
        // SAFETY: We're the only thread using the environment at this point
        unsafe { std::env::set_var("RUST_BACKTRACE", "1") };

        tracing_subscriber::fmt()
            .with_env_filter("repotap=debug,repotap_core=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let result = match cli.command {
        Commands::Provision {
            name,
            repo_type,
            master_token,
            host,
            endpoint,
            json,
            render,
        } => {
            commands::provision::run(
                &name,
                &repo_type,
                master_token,
                host.into(),
                &endpoint,
                json,
                render,
            )
            .await
        }

        Commands::Apply {
            manifest,
            host,
            endpoint,
        } => commands::apply::run(&manifest, host.into(), &endpoint).await,
    };

    if let Err(err) = result {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}
