use clap::{Args, Parser};
use hardfile::SlotOptions;
use hardfile::constants::{envs, logging};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "hardfile",
    author,
    version,
    about = "Mount and unmount a hard file image in an emulated storage slot",
    after_help = "Commands are read from stdin, one per line. Type 'help' for the list."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalFlags {
    /// Hard file image to mount when the session starts
    #[arg(long, value_name = "PATH", env = envs::HARDFILE_IMAGE)]
    pub mount: Option<String>,

    /// Open images without write access
    #[arg(long)]
    pub read_only: bool,

    /// Print status, snapshots and stats as JSON
    #[arg(long)]
    pub json: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, value_name = "FILTER", env = envs::HARDFILE_LOG, default_value = logging::DEFAULT_LEVEL)]
    pub log_level: String,
}

impl GlobalFlags {
    pub fn slot_options(&self) -> SlotOptions {
        SlotOptions {
            read_only: self.read_only,
        }
    }

    /// Install the stderr subscriber. RUST_LOG wins over `--log-level`.
    pub fn init_logging(&self) {
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.log_level))
            .unwrap_or_else(|_| EnvFilter::new(logging::DEFAULT_LEVEL));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_ansi(false)
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["hardfile"]).unwrap();
        assert_eq!(cli.global.log_level, logging::DEFAULT_LEVEL);
        assert!(!cli.global.read_only);
        assert!(!cli.global.slot_options().read_only);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "hardfile",
            "--mount",
            "/images/disk1.hdf",
            "--read-only",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.global.mount.as_deref(), Some("/images/disk1.hdf"));
        assert!(cli.global.slot_options().read_only);
        assert!(cli.global.json);
    }
}
