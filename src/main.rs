//! Command line front end for dispctl.

use clap::{ArgAction, CommandFactory, Parser};
use dispctl::{ApplyMode, ChangeReport, DisplayManager, NativeApi};
use serde::Serialize;
use std::io::{self, Write};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "dispctl",
    version,
    about = "List display devices and change their resolution or position",
    disable_help_flag = true
)]
struct Cli {
    /// List all available display devices.
    #[arg(short = 'l', long = "devices")]
    list_devices: bool,

    /// Query the current settings of a specific device.
    #[arg(short, long, value_name = "DEVICE")]
    query: Option<String>,

    /// Query the current settings of all devices.
    #[arg(short = 'a', long = "qall")]
    query_all: bool,

    /// List the resolutions a device supports.
    #[arg(short = 'M', long, value_name = "DEVICE")]
    modes: Option<String>,

    /// Name of the device to adjust.
    #[arg(short, long = "device", value_name = "DEVICE")]
    device: Option<String>,

    /// Width of the resolution.
    #[arg(short, long, requires = "height", requires = "device")]
    width: Option<u32>,

    /// Height of the resolution.
    #[arg(short, long, requires = "width")]
    height: Option<u32>,

    /// Set X position of the display.
    #[arg(
        short = 'x',
        long = "set-x",
        allow_negative_numbers = true,
        requires = "set_y",
        requires = "device"
    )]
    set_x: Option<i32>,

    /// Set Y position of the display.
    #[arg(
        short = 'y',
        long = "set-y",
        allow_negative_numbers = true,
        requires = "set_x"
    )]
    set_y: Option<i32>,

    /// Store the change so it survives a restart.
    #[arg(long, conflicts_with = "test")]
    persist: bool,

    /// Only check whether the change would succeed.
    #[arg(long)]
    test: bool,

    /// Print machine-readable JSON.
    #[arg(long)]
    json: bool,

    /// Set output to verbose messages.
    #[arg(short, long)]
    verbose: bool,

    /// Print help.
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

impl Cli {
    fn apply_mode(&self) -> ApplyMode {
        if self.persist {
            ApplyMode::Persistent
        } else if self.test {
            ApplyMode::Test
        } else {
            ApplyMode::Dynamic
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
    log::debug!("Verbose mode activated");

    match run(&cli, &DisplayManager::native()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, manager: &DisplayManager<NativeApi>) -> dispctl::Result<ExitCode> {
    if cli.list_devices {
        list_devices(cli, manager)?;
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(device) = &cli.query {
        let settings = manager.query(device)?;
        if cli.json {
            print_json(&settings);
        } else {
            print_settings(&settings);
        }
        return Ok(ExitCode::SUCCESS);
    }

    if cli.query_all {
        let settings = manager.query_all()?;
        if cli.json {
            print_json(&settings);
        } else {
            settings.iter().for_each(print_settings);
        }
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(device) = &cli.modes {
        let resolutions = manager.negotiator().supported_resolutions(device);
        if cli.json {
            print_json(&resolutions);
        } else {
            println!("Supported resolutions for {device}:");
            for (width, height) in resolutions {
                println!("{width}x{height}");
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mut reports = Vec::new();
    if let (Some(device), Some(width), Some(height)) = (&cli.device, cli.width, cli.height) {
        reports.push(manager.set_resolution(device, width, height, cli.apply_mode())?);
    }
    if let (Some(device), Some(x), Some(y)) = (&cli.device, cli.set_x, cli.set_y) {
        reports.push(manager.set_position(device, x, y, cli.apply_mode())?);
    }

    if reports.is_empty() {
        if let Err(err) = print_usage(&mut io::stdout()) {
            log::warn!("Failed to print usage: {err}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    Ok(report(cli, &reports))
}

fn list_devices(cli: &Cli, manager: &DisplayManager<NativeApi>) -> dispctl::Result<()> {
    if cli.json {
        let devices = manager.devices().collect::<dispctl::Result<Vec<_>>>()?;
        print_json(&devices);
        return Ok(());
    }

    if cli.verbose {
        for device in manager.devices() {
            let device = device?;
            let count = manager.modes(&device.name).count();
            println!(
                "{} - {} [{:?}] ({} modes)",
                device.name, device.description, device.state_flags, count
            );
        }
        println!();
    }

    println!("Available Devices:");
    for name in manager.list_devices()? {
        println!("{name}");
    }
    Ok(())
}

fn print_settings(settings: &dispctl::DeviceSettings) {
    let mode = &settings.mode;
    println!("Device: {}", settings.device);
    println!("Resolution: {}x{}", mode.width, mode.height);
    println!("Position: X = {}, Y = {}", mode.position_x, mode.position_y);
    log::debug!(
        "{}bpp, {}Hz, {} degrees",
        mode.bits_per_pixel(),
        mode.refresh_hz(),
        mode.orientation().degrees()
    );
    println!("-------------");
}

fn report(cli: &Cli, reports: &[ChangeReport]) -> ExitCode {
    if cli.json {
        print_json(&reports);
    } else {
        for report in reports {
            println!("{report}");
        }
    }

    if reports.iter().all(|report| report.outcome.is_success()) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_usage(out: &mut impl Write) -> io::Result<()> {
    Cli::command().write_help(out)?;
    out.flush()
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("Error: failed to serialize output: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_h_is_height() {
        let cli = Cli::try_parse_from(["dispctl", "-d", "DISPLAY1", "-w", "1280", "-h", "720"])
            .unwrap();
        assert_eq!(cli.device.as_deref(), Some("DISPLAY1"));
        assert_eq!((cli.width, cli.height), (Some(1280), Some(720)));
        assert_eq!(cli.apply_mode(), ApplyMode::Dynamic);
    }

    #[test]
    fn test_negative_position() {
        let cli = Cli::try_parse_from(["dispctl", "-d", "DISPLAY2", "-x", "-1920", "-y", "0"])
            .unwrap();
        assert_eq!((cli.set_x, cli.set_y), (Some(-1920), Some(0)));
    }

    #[test]
    fn test_resolution_needs_device_and_height() {
        assert!(Cli::try_parse_from(["dispctl", "-w", "1280", "-h", "720"]).is_err());
        assert!(Cli::try_parse_from(["dispctl", "-d", "DISPLAY1", "-w", "1280"]).is_err());
    }

    #[test]
    fn test_apply_mode_flags() {
        let cli = Cli::try_parse_from(["dispctl", "-d", "D", "-x", "0", "-y", "0", "--persist"])
            .unwrap();
        assert_eq!(cli.apply_mode(), ApplyMode::Persistent);
        assert!(Cli::try_parse_from(["dispctl", "--persist", "--test"]).is_err());
    }

    #[test]
    fn test_usage_lists_options() {
        let mut out = Vec::new();
        print_usage(&mut out).unwrap();
        let usage = String::from_utf8(out).unwrap();
        assert!(usage.contains("--devices"));
        assert!(usage.contains("--qall"));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn test_usage_write_failure_is_reported() {
        let err = print_usage(&mut BrokenPipe).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
