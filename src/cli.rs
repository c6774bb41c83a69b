use clap::Parser;
use std::path::PathBuf;

/// Pick files from a Myrient directory listing and build the rsync command for them.
#[derive(Debug, Parser)]
#[command(name = "myrient-picker", version, about)]
pub struct Cli {
    /// Saved listing page (HTML), or `-` to read it from stdin
    pub page: String,

    /// Initial rsync options
    #[arg(short, long)]
    pub options: Option<String>,

    /// Initial rsync destination
    #[arg(short, long = "dest")]
    pub destination: Option<String>,

    /// Remote scheme and host the listing lives on
    #[arg(long)]
    pub remote: Option<String>,

    /// Print the command instead of opening the interactive picker
    #[arg(long)]
    pub print: bool,

    /// Only select entries with this title (repeatable, needs --print)
    #[arg(long = "select", value_name = "TITLE", requires = "print")]
    pub select: Vec<String>,

    /// Print a JSON report (needs --print)
    #[arg(long, requires = "print")]
    pub json: bool,

    /// Config file to use instead of the default one
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn reads_stdin(&self) -> bool {
        self.page == "-"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_print_mode() {
        let cli = Cli::try_parse_from([
            "myrient-picker",
            "page.html",
            "--print",
            "--select",
            "a.zip",
            "--select",
            "b.zip",
            "-d",
            "/mnt/roms",
        ])
        .unwrap();
        assert!(cli.print);
        assert_eq!(cli.select, vec!["a.zip", "b.zip"]);
        assert_eq!(cli.destination.as_deref(), Some("/mnt/roms"));
        assert!(!cli.reads_stdin());
    }

    #[test]
    fn select_requires_print() {
        assert!(Cli::try_parse_from(["myrient-picker", "-", "--select", "a"]).is_err());
    }

    #[test]
    fn dash_reads_stdin() {
        let cli = Cli::try_parse_from(["myrient-picker", "-"]).unwrap();
        assert!(cli.reads_stdin());
    }
}
