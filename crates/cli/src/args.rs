use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};
use tokenforge_core::{Platform, SourceConfig};

#[derive(Parser, Debug)]
#[command(
    name = "tokenforge",
    version,
    about = "Resolve Token Studio design tokens and export them for iOS, Android and the web"
)]
#[command(group(ArgGroup::new("source").args(["dir", "url", "bundle"])))]
pub struct Cli {
    /// Pipeline config (YAML). Every section is optional.
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Read token sets from a multi-file export directory
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    /// Read token sets over HTTP from this base URL
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Read token sets from a single-file export
    #[arg(long, global = true)]
    pub bundle: Option<PathBuf>,

    /// More logging (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Source named on the command line, overriding the config file.
    pub fn source_override(&self) -> Option<SourceConfig> {
        if let Some(path) = &self.dir {
            return Some(SourceConfig::Dir { path: path.clone() });
        }
        if let Some(path) = &self.bundle {
            return Some(SourceConfig::Bundle { path: path.clone() });
        }
        self.url.as_ref().map(|url| SourceConfig::Http {
            base_url: url.clone(),
            timeout_secs: tokenforge_core::HttpSource::DEFAULT_TIMEOUT.as_secs(),
        })
    }

    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "tokenforge=info",
            1 => "tokenforge=debug",
            _ => "tokenforge=trace",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the resolved token list
    List {
        /// Emit the summary list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate platform files
    Export {
        /// Target platform; repeat for several. Defaults to the config's list.
        #[arg(long = "platform", short)]
        platforms: Vec<Platform>,
        /// Output directory; each platform writes to its own subdirectory
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Load and report problems; exits non-zero on unresolved references or
    /// when the built-in defaults had to be used
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_with_repeated_platforms() {
        let cli = Cli::try_parse_from([
            "tokenforge",
            "--dir",
            "tokens",
            "export",
            "-p",
            "ios",
            "--platform",
            "web",
            "--out",
            "build",
        ])
        .unwrap();
        match cli.command {
            Command::Export { platforms, out } => {
                assert_eq!(platforms, [Platform::Ios, Platform::Web]);
                assert_eq!(out, Some(PathBuf::from("build")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn sources_are_mutually_exclusive() {
        let result =
            Cli::try_parse_from(["tokenforge", "--dir", "a", "--bundle", "b.json", "check"]);
        assert!(result.is_err());
    }

    #[test]
    fn url_override() {
        let cli = Cli::try_parse_from(["tokenforge", "check", "--url", "https://t.example/x/"])
            .unwrap();
        assert!(matches!(
            cli.source_override(),
            Some(SourceConfig::Http { timeout_secs: 10, .. })
        ));
    }

    #[test]
    fn verbosity() {
        let cli = Cli::try_parse_from(["tokenforge", "-vv", "list", "--json"]).unwrap();
        assert_eq!(cli.log_filter(), "tokenforge=trace");
        assert!(matches!(cli.command, Command::List { json: true }));
    }
}
