// GlTutor
// copyright gl_tutor developers 2024～2025

//! Process entry shared by all tutorial binaries:
//! read args and config, start logging, ask about fullscreen, create the window,
//! run the scene and turn the outcome into an exit code.

use crate::{
    config::{AppConfig, CliArgs},
    log::{init_log, parse_level},
    scene::Scene,
    window::{OpenGlWindow, Platform, WindowSettings},
};
use clap::Parser;
use log::{error, info};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

pub const FULLSCREEN_QUESTION: &str = "Would you like to run in fullscreen mode? (y/n)";

/// y/yes/n/no in any case, surrounding blanks ignored
pub fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Repeats the question until it gets a usable answer; end of input means no
pub fn ask_yes_no<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> bool {
    let mut line = String::new();
    loop {
        let _ = writeln!(output, "{}", question);
        let _ = output.flush();
        line.clear();
        match input.read_line(&mut line) {
            Ok(0) | Err(_) => return false,
            Ok(_) => {
                if let Some(answer) = parse_yes_no(&line) {
                    return answer;
                }
            }
        }
    }
}

pub fn wait_for_enter<R: BufRead, W: Write>(input: &mut R, output: &mut W) {
    let _ = writeln!(output, "Program ended with an error, press Enter to exit...");
    let _ = output.flush();
    let mut line = String::new();
    let _ = input.read_line(&mut line);
}

pub fn exit_status(has_error: bool) -> u8 {
    if has_error {
        1
    } else {
        0
    }
}

/// End of a run: an error is acknowledged with Enter before the exit status is returned
pub fn finish<R: BufRead, W: Write>(has_error: bool, input: &mut R, output: &mut W) -> u8 {
    if has_error {
        wait_for_enter(input, output);
    }
    exit_status(has_error)
}

/// Runs one tutorial scene in a window titled `title`
pub fn run_tutorial<S: Scene>(title: &str, mut scene: S) -> ExitCode {
    let args = CliArgs::parse();
    let mut config = match AppConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(exit_status(true));
        }
    };
    config.apply_args(&args);

    if let Err(e) = init_log(parse_level(&config.log.level), &config.log.file, config.log.console) {
        eprintln!("logging disabled: {}", e);
    }
    info!("starting '{}'", title);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let fullscreen = match config.window.fullscreen {
        Some(fullscreen) => fullscreen,
        None => ask_yes_no(&mut stdin.lock(), &mut stdout, FULLSCREEN_QUESTION),
    };

    let mut platform = match Platform::new() {
        Ok(platform) => platform,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            return ExitCode::from(exit_status(true));
        }
    };

    let settings = WindowSettings::from_config(title, &config, fullscreen);
    let mut window = match OpenGlWindow::create(
        &mut platform,
        settings,
        config.projection.clone(),
        config.assets.clone(),
    ) {
        Ok(window) => window,
        Err(e) => {
            error!("failed to create window: {}", e);
            eprintln!("Failed to create window: {}", e);
            return ExitCode::from(exit_status(true));
        }
    };

    let mut has_error = false;
    if let Err(e) = window.run(&mut platform, &mut scene) {
        error!("{}", e);
        has_error = true;
    }
    has_error |= window.has_error();

    info!("'{}' finished, error: {}", title, has_error);
    ExitCode::from(finish(has_error, &mut stdin.lock(), &mut stdout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_yes_no() {
        assert_eq!(parse_yes_no("y\n"), Some(true));
        assert_eq!(parse_yes_no("  YES "), Some(true));
        assert_eq!(parse_yes_no("n"), Some(false));
        assert_eq!(parse_yes_no("No\r\n"), Some(false));
        assert_eq!(parse_yes_no("maybe"), None);
        assert_eq!(parse_yes_no(""), None);
    }

    #[test]
    fn test_ask_repeats_until_valid() {
        let mut input = Cursor::new("what\n\ny\n");
        let mut output = Vec::new();
        assert!(ask_yes_no(&mut input, &mut output, "fullscreen?"));
        let shown = String::from_utf8(output).unwrap();
        assert_eq!(shown.matches("fullscreen?").count(), 3);
    }

    #[test]
    fn test_ask_eof_means_no() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        assert!(!ask_yes_no(&mut input, &mut output, "q"));
        let mut input = Cursor::new("x\n");
        assert!(!ask_yes_no(&mut input, &mut output, "q"));
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(false), 0);
        assert_ne!(exit_status(true), 0);
    }

    #[test]
    fn test_finish_with_error_waits_for_enter() {
        let mut input = Cursor::new("\nleft over\n");
        let mut output = Vec::new();
        assert_ne!(finish(true, &mut input, &mut output), 0);
        assert!(String::from_utf8(output).unwrap().contains("press Enter"));
        // exactly one line was consumed
        let mut rest = String::new();
        input.read_line(&mut rest).unwrap();
        assert_eq!(rest, "left over\n");
    }

    #[test]
    fn test_finish_clean_exits_zero_silently() {
        let mut input = Cursor::new("untouched\n");
        let mut output = Vec::new();
        assert_eq!(finish(false, &mut input, &mut output), 0);
        assert!(output.is_empty());
        assert_eq!(input.position(), 0);
    }

    #[test]
    fn test_wait_for_enter_prompts() {
        let mut input = Cursor::new("\n");
        let mut output = Vec::new();
        wait_for_enter(&mut input, &mut output);
        assert!(String::from_utf8(output).unwrap().contains("press Enter"));
    }
}
