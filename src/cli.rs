use color_eyre::eyre::{Result, bail, eyre};
use std::path::PathBuf;

pub const USAGE: &str = "Usage: filedeck [--config FILE] [--json] [PATH]

Lists the storage root, or the folder at PATH relative to it.
PATH is percent-decoded first, so a folder literally named `a%20b` must be
given as `a%2520b` (the `path` field of the JSON output is always safe).

Options:
  -c, --config FILE   Read settings from FILE instead of the user config directory
  -j, --json          Print the listing as JSON
  -h, --help          Show this help";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Cli {
    pub config: Option<PathBuf>,
    pub json: bool,
    pub path: Option<String>,
    pub help: bool,
}

impl Cli {
    /// Parses arguments, excluding the program name.
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut cli = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => cli.help = true,
                "-j" | "--json" => cli.json = true,
                "-c" | "--config" => {
                    let value = args.next().ok_or_else(|| eyre!("{arg} requires a file argument"))?;
                    cli.config = Some(PathBuf::from(value));
                }
                flag if flag.starts_with('-') && flag.len() > 1 => bail!("Unknown option: {flag}"),
                _ => {
                    if cli.path.is_some() {
                        bail!("Only one PATH may be given");
                    }
                    cli.path = Some(arg);
                }
            }
        }

        Ok(cli)
    }
}
