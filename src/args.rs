use std::path::PathBuf;

use festokes::DEFAULT_CONFIG_FILE;
use thiserror::Error;

/// Command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Configuration file location.
    pub config: PathBuf,
    /// Mesh card name.
    pub mesh: Option<String>,
    /// Pressure card name.
    pub pressure: Option<String>,
    /// Velocity card name.
    pub velocity: Option<String>,
    /// Extra card names, one extra card each.
    pub extras: Vec<String>,
    /// Print JSON instead of text.
    pub json: bool,
    /// Print the catalogs and exit.
    pub list: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            config: PathBuf::from(DEFAULT_CONFIG_FILE),
            mesh: None,
            pressure: None,
            velocity: None,
            extras: Vec::new(),
            json: false,
            list: false,
        }
    }
}

/// Error returned for malformed command lines.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    /// A flag that takes a value was last on the line.
    #[error("{0} expects a value")]
    MissingValue(String),
    /// The flag is not recognised.
    #[error("unknown argument {0:?}")]
    Unknown(String),
}

impl Options {
    /// Parse the arguments following the program name.
    pub fn parse<I>(args: I) -> Result<Self, ArgsError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut options = Self::default();
        let mut args = args.into_iter();
        while let Some(flag) = args.next() {
            let mut value = || {
                args.next()
                    .ok_or_else(|| ArgsError::MissingValue(flag.clone()))
            };
            match flag.as_str() {
                "--config" => options.config = PathBuf::from(value()?),
                "--mesh" => options.mesh = Some(value()?),
                "--pressure" => options.pressure = Some(value()?),
                "--velocity" => options.velocity = Some(value()?),
                "--extra" => options.extras.push(value()?),
                "--json" => options.json = true,
                "--list" => options.list = true,
                _ => return Err(ArgsError::Unknown(flag.clone())),
            }
        }
        Ok(options)
    }
}

/// One-line synopsis printed after an argument error.
pub fn usage() -> &'static str {
    "usage: festokes [--config PATH] [--mesh NAME] [--pressure NAME] [--velocity NAME] \
     [--extra NAME]... [--json] [--list]"
}
