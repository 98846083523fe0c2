// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command-line argument parsing
//!
//! Turns raw arguments (program name already stripped) into an
//! [`ExportConfig`] plus input path. Kept separate from `main` so the
//! argument contract is testable.

use std::path::PathBuf;

use thiserror::Error;

use rad_lite_geometry::Vector3;

use crate::config::ExportConfig;

/// What the invocation asks for
#[derive(Debug, Clone)]
pub enum Command {
    /// Run the pipeline on `input` with `config`
    Run {
        input: PathBuf,
        config: ExportConfig,
    },
    /// Print usage and exit successfully
    Help,
}

/// Argument errors; `main` prints these with the usage text
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CliError {
    #[error(".rad file not specified")]
    MissingInput,
    #[error("input '{0}' is not a .rad file")]
    NotRadInput(String),
    #[error("{0} requires a value")]
    MissingValue(String),
    #[error("invalid value '{value}' for {option}")]
    InvalidValue { option: String, value: String },
    #[error("unknown option: {0}")]
    UnknownOption(String),
}

/// Parse the arguments after the program name
pub fn parse_args(args: &[String]) -> Result<Command, CliError> {
    let input = args.first().ok_or(CliError::MissingInput)?;
    if input == "--help" || input == "-h" {
        return Ok(Command::Help);
    }
    if !input.ends_with(".rad") {
        return Err(CliError::NotRadInput(input.clone()));
    }

    let mut config = ExportConfig::default();
    let mut i = 1;
    while i < args.len() {
        let option = args[i].as_str();
        match option {
            "--output" => config.base_name = value(args, &mut i)?.to_string(),
            "--prefix" => config.picture_prefix = value(args, &mut i)?.to_string(),
            "--offset" => config.view.view_offset = number(option, value(args, &mut i)?)?,
            "--epsilon" => config.view.epsilon = number(option, value(args, &mut i)?)?,
            "--up" => config.view.scene_up = up_axis(value(args, &mut i)?)?,
            other => return Err(CliError::UnknownOption(other.to_string())),
        }
        i += 1;
    }

    Ok(Command::Run {
        input: PathBuf::from(input),
        config,
    })
}

/// Advance past the option and fetch its value
fn value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str, CliError> {
    let option = args[*i].clone();
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or(CliError::MissingValue(option))
}

fn number(option: &str, value: &str) -> Result<f64, CliError> {
    value.parse().map_err(|_| CliError::InvalidValue {
        option: option.to_string(),
        value: value.to_string(),
    })
}

/// `--up` takes an axis name (x, y, z, optionally signed) or an
/// `x,y,z` component triple
fn up_axis(value: &str) -> Result<Vector3<f64>, CliError> {
    match value {
        "x" | "+x" => return Ok(Vector3::x()),
        "y" | "+y" => return Ok(Vector3::y()),
        "z" | "+z" => return Ok(Vector3::z()),
        "-x" => return Ok(-Vector3::x()),
        "-y" => return Ok(-Vector3::y()),
        "-z" => return Ok(-Vector3::z()),
        _ => {}
    }

    let invalid = || CliError::InvalidValue {
        option: "--up".to_string(),
        value: value.to_string(),
    };
    let components: Vec<f64> = value
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|_| invalid())?;
    if components.len() != 3 {
        return Err(invalid());
    }
    let up = Vector3::new(components[0], components[1], components[2]);
    if up.norm() == 0.0 {
        return Err(invalid());
    }
    Ok(up)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn run_config(list: &[&str]) -> (PathBuf, ExportConfig) {
        match parse_args(&args(list)).unwrap() {
            Command::Run { input, config } => (input, config),
            Command::Help => panic!("expected a run command"),
        }
    }

    #[test]
    fn test_no_arguments_is_an_error() {
        assert_eq!(parse_args(&[]).unwrap_err(), CliError::MissingInput);
    }

    #[test]
    fn test_help_flag() {
        assert!(matches!(
            parse_args(&args(&["--help"])).unwrap(),
            Command::Help
        ));
        assert!(matches!(parse_args(&args(&["-h"])).unwrap(), Command::Help));
    }

    #[test]
    fn test_input_must_end_in_rad() {
        assert_eq!(
            parse_args(&args(&["scene.obj"])).unwrap_err(),
            CliError::NotRadInput("scene.obj".to_string())
        );
    }

    #[test]
    fn test_defaults_without_options() {
        let (input, config) = run_config(&["scene.rad"]);
        assert_eq!(input, PathBuf::from("scene.rad"));
        assert_eq!(config.base_name, "scene");
        assert_eq!(config.picture_prefix, "scene");
        assert_eq!(config.view.view_offset, 0.1);
    }

    #[test]
    fn test_output_prefix_and_offset_options() {
        let (_, config) = run_config(&[
            "scene.rad",
            "--output",
            "baked",
            "--prefix",
            "render",
            "--offset",
            "0.25",
        ]);
        assert_eq!(config.base_name, "baked");
        assert_eq!(config.picture_prefix, "render");
        assert_eq!(config.view.view_offset, 0.25);
    }

    #[test]
    fn test_epsilon_option() {
        let (_, config) = run_config(&["scene.rad", "--epsilon", "1e-6"]);
        assert_eq!(config.view.epsilon, 1e-6);
    }

    #[test]
    fn test_up_axis_names() {
        let (_, config) = run_config(&["scene.rad", "--up", "y"]);
        assert_eq!(config.view.scene_up, Vector3::y());
        let (_, config) = run_config(&["scene.rad", "--up", "-z"]);
        assert_eq!(config.view.scene_up, -Vector3::z());
    }

    #[test]
    fn test_up_component_triple() {
        let (_, config) = run_config(&["scene.rad", "--up", "0, 1, 0"]);
        assert_eq!(config.view.scene_up, Vector3::y());
    }

    #[test]
    fn test_up_rejects_garbage_and_zero() {
        for bad in ["sideways", "1,2", "0,0,0"] {
            assert_eq!(
                parse_args(&args(&["scene.rad", "--up", bad])).unwrap_err(),
                CliError::InvalidValue {
                    option: "--up".to_string(),
                    value: bad.to_string(),
                }
            );
        }
    }

    #[test]
    fn test_option_without_value() {
        assert_eq!(
            parse_args(&args(&["scene.rad", "--output"])).unwrap_err(),
            CliError::MissingValue("--output".to_string())
        );
    }

    #[test]
    fn test_invalid_offset_value() {
        assert_eq!(
            parse_args(&args(&["scene.rad", "--offset", "thin"])).unwrap_err(),
            CliError::InvalidValue {
                option: "--offset".to_string(),
                value: "thin".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_option() {
        assert_eq!(
            parse_args(&args(&["scene.rad", "--frobnicate"])).unwrap_err(),
            CliError::UnknownOption("--frobnicate".to_string())
        );
    }
}
