//! Command-line parsing.
//!
//! ```text
//! gst-billing sale <draft.json> [--date YYYY-MM-DD]
//! gst-billing purchase <draft.json>
//! gst-billing slabs
//! ```

use std::path::PathBuf;

use chrono::NaiveDate;

pub const USAGE: &str = "\
Usage:
  gst-billing sale <draft.json> [--date YYYY-MM-DD]
  gst-billing purchase <draft.json>
  gst-billing slabs
  gst-billing help";

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Price a sale draft and print the `POST /sales` body.
    Sale {
        draft: PathBuf,
        /// Invoice date; today when absent.
        date: Option<NaiveDate>,
    },
    /// Price a purchase draft and print the `POST /purchases` body.
    Purchase { draft: PathBuf },
    /// Print the GST slabs, discount presets and units.
    Slabs,
    Help,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    #[error("Missing draft file for '{0}'")]
    MissingDraft(&'static str),

    #[error("Unexpected argument '{0}'")]
    UnexpectedArgument(String),

    #[error("Invalid --date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

impl Command {
    /// Parses the arguments after the program name.
    pub fn parse<I>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();

        let Some(command) = args.next() else {
            return Ok(Command::Help);
        };

        match command.as_str() {
            "sale" => {
                let draft = args.next().ok_or(UsageError::MissingDraft("sale"))?;
                let mut date = None;

                while let Some(arg) = args.next() {
                    match arg.as_str() {
                        "--date" => {
                            let value = args.next().unwrap_or_default();
                            let parsed = NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                                .map_err(|_| UsageError::InvalidDate(value))?;
                            date = Some(parsed);
                        }
                        _ => return Err(UsageError::UnexpectedArgument(arg)),
                    }
                }

                Ok(Command::Sale {
                    draft: PathBuf::from(draft),
                    date,
                })
            }
            "purchase" => {
                let draft = args.next().ok_or(UsageError::MissingDraft("purchase"))?;
                if let Some(extra) = args.next() {
                    return Err(UsageError::UnexpectedArgument(extra));
                }
                Ok(Command::Purchase {
                    draft: PathBuf::from(draft),
                })
            }
            "slabs" => Ok(Command::Slabs),
            "help" | "--help" | "-h" => Ok(Command::Help),
            other => Err(UsageError::UnknownCommand(other.to_string())),
        }
    }
}
