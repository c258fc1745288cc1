#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use tally_diagnostic::emitter::ColorMode;

use super::{CliOptions, OptionsError};

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn defaults() {
    let options = CliOptions::parse(&[], None).unwrap();
    assert_eq!(options, CliOptions::default());
    assert_eq!(options.seed, tally_eval::DEFAULT_SEED);
    assert_eq!(options.max_depth, 1000);
}

#[test]
fn path_and_flags_in_any_order() {
    let options =
        CliOptions::parse(&args(&["--seed", "7", "model.tally", "--max-depth=50"]), None).unwrap();
    assert_eq!(options.seed, 7);
    assert_eq!(options.max_depth, 50);
    assert_eq!(options.path.as_deref(), Some("model.tally"));
}

#[test]
fn inline_seed() {
    let options = CliOptions::parse(&args(&["--seed=99"]), None).unwrap();
    assert_eq!(options.seed, 99);
    assert_eq!(options.path, None);
}

#[test]
fn color_from_environment() {
    let options = CliOptions::parse(&[], Some("always")).unwrap();
    assert_eq!(options.color, ColorMode::Always);

    let options = CliOptions::parse(&[], Some("NEVER")).unwrap();
    assert_eq!(options.color, ColorMode::Never);

    let options = CliOptions::parse(&[], Some("sometimes")).unwrap();
    assert_eq!(options.color, ColorMode::Auto);
}

#[test]
fn no_color_overrides_environment() {
    let options = CliOptions::parse(&args(&["--no-color"]), Some("always")).unwrap();
    assert_eq!(options.color, ColorMode::Never);
}

#[test]
fn errors() {
    assert_eq!(
        CliOptions::parse(&args(&["--seed"]), None),
        Err(OptionsError::MissingValue("--seed"))
    );
    assert_eq!(
        CliOptions::parse(&args(&["--seed", "abc"]), None),
        Err(OptionsError::InvalidValue {
            flag: "--seed",
            value: "abc".to_string()
        })
    );
    assert_eq!(
        CliOptions::parse(&args(&["--max-depth=0"]), None),
        Err(OptionsError::InvalidValue {
            flag: "--max-depth",
            value: "0".to_string()
        })
    );
    assert_eq!(
        CliOptions::parse(&args(&["--verbose"]), None),
        Err(OptionsError::UnknownOption("--verbose".to_string()))
    );
    assert_eq!(
        CliOptions::parse(&args(&["a.tally", "b.tally"]), None),
        Err(OptionsError::UnexpectedArgument("b.tally".to_string()))
    );
}

#[test]
fn error_messages() {
    assert_eq!(
        OptionsError::MissingValue("--seed").to_string(),
        "missing value for '--seed'"
    );
    assert_eq!(
        OptionsError::UnknownOption("-x".to_string()).to_string(),
        "unknown option '-x'"
    );
}
