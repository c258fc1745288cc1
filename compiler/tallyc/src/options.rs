//! Flags shared by `run` and `repl`.

use std::str::FromStr;

use tally_diagnostic::emitter::ColorMode;
use tally_eval::{InterpreterBuilder, DEFAULT_SEED};
use tally_ir::StringInterner;
use tally_stack::DEFAULT_MAX_DEPTH;

/// Environment variable read for the default color mode.
pub const COLOR_ENV: &str = "TALLY_COLOR";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("missing value for '{0}'")]
    MissingValue(&'static str),
    #[error("invalid value '{value}' for '{flag}'")]
    InvalidValue { flag: &'static str, value: String },
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
}

/// Parsed command-line configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliOptions {
    pub seed: u64,
    pub max_depth: usize,
    pub color: ColorMode,
    /// Source file, when the command takes one.
    pub path: Option<String>,
}

impl Default for CliOptions {
    fn default() -> Self {
        CliOptions {
            seed: DEFAULT_SEED,
            max_depth: DEFAULT_MAX_DEPTH,
            color: ColorMode::Auto,
            path: None,
        }
    }
}

impl CliOptions {
    /// Parse the arguments after the subcommand.
    ///
    /// `env_color` is the value of `TALLY_COLOR`, if set; an unrecognized
    /// value falls back to `auto`. `--no-color` wins over the environment.
    pub fn parse(args: &[String], env_color: Option<&str>) -> Result<Self, OptionsError> {
        let mut options = CliOptions {
            color: env_color.and_then(ColorMode::parse).unwrap_or_default(),
            ..CliOptions::default()
        };

        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_str();
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) if flag.starts_with("--") => (flag, Some(value)),
                _ => (arg, None),
            };

            match flag {
                "--no-color" => options.color = ColorMode::Never,
                "--seed" => options.seed = flag_value("--seed", inline, args, &mut i)?,
                "--max-depth" => {
                    options.max_depth = flag_value("--max-depth", inline, args, &mut i)?;
                    if options.max_depth == 0 {
                        return Err(OptionsError::InvalidValue {
                            flag: "--max-depth",
                            value: "0".to_string(),
                        });
                    }
                }
                _ if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(OptionsError::UnknownOption(arg.to_string()));
                }
                _ if options.path.is_none() => options.path = Some(arg.to_string()),
                _ => return Err(OptionsError::UnexpectedArgument(arg.to_string())),
            }
            i += 1;
        }
        Ok(options)
    }

    /// An interpreter builder carrying the seed and depth limit.
    pub fn builder<'a>(&self, interner: &'a StringInterner) -> InterpreterBuilder<'a> {
        InterpreterBuilder::new(interner)
            .seed(self.seed)
            .max_depth(self.max_depth)
    }
}

/// Value of `flag`, either inline (`--seed=7`) or the next argument.
fn flag_value<T: FromStr>(
    flag: &'static str,
    inline: Option<&str>,
    args: &[String],
    i: &mut usize,
) -> Result<T, OptionsError> {
    let value = match inline {
        Some(value) => value,
        None => {
            *i += 1;
            args.get(*i)
                .map(String::as_str)
                .ok_or(OptionsError::MissingValue(flag))?
        }
    };
    value.parse().map_err(|_| OptionsError::InvalidValue {
        flag,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests;
