//! `host-name` entry point.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use host_name_conf::{
    CliShellApi, HostConfig, HostNameError, ReadMode, Result, SystemFiles, Systemd, commit,
};

/// Regenerate /etc/hosts and /etc/resolv.conf and apply the system host name
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Started from dhclient-script: read the effective configuration
    #[arg(long)]
    dhclient: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mode = if cli.dhclient {
        ReadMode::Effective
    } else {
        ReadMode::Pending
    };

    let result = commit(&CliShellApi::new(), mode, &SystemFiles::new(), &Systemd);
    ExitCode::from(report(&result, &mut io::stdout(), &mut io::stderr()))
}

/// Prints the outcome of a run and returns the process exit status.
///
/// Rejected configuration is shown to the operator on `out` as the bare
/// message; anything else goes to `err`.
fn report(result: &Result<HostConfig>, out: &mut impl Write, err: &mut impl Write) -> u8 {
    match result {
        Ok(_) => 0,
        Err(HostNameError::Config(msg)) => {
            let _ = writeln!(out, "{msg}");
            1
        }
        Err(e) if e.is_permission_denied() => {
            let _ = writeln!(err, "Error: {e} (must be run as root)");
            1
        }
        Err(e) => {
            let _ = writeln!(err, "Error: {e}");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_report(result: &Result<HostConfig>) -> (u8, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = report(result, &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn success_exits_zero_silently() {
        let (code, out, err) = run_report(&Ok(HostConfig::default()));
        assert_eq!(code, 0);
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn config_error_prints_message_to_stdout() {
        let result = Err(HostNameError::Config("Invalid host name -r1".into()));
        let (code, out, err) = run_report(&result);
        assert_eq!(code, 1);
        assert_eq!(out, "Invalid host name -r1\n");
        assert!(err.is_empty());
    }

    #[test]
    fn other_error_prints_to_stderr() {
        let result = Err(HostNameError::Command {
            program: "systemctl".into(),
            detail: "exit status: 1".into(),
        });
        let (code, out, err) = run_report(&result);
        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert_eq!(err, "Error: command 'systemctl' failed: exit status: 1\n");
    }

    #[test]
    fn permission_denied_hints_at_root() {
        let result = Err(HostNameError::from(io::Error::from(
            io::ErrorKind::PermissionDenied,
        )));
        let (code, out, err) = run_report(&result);
        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert!(err.starts_with("Error: I/O error:"));
        assert!(err.trim_end().ends_with("(must be run as root)"));
    }
}
