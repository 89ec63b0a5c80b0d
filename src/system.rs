//! Applying the host name to the running system.

use crate::config::HostConfig;
use crate::error::{HostNameError, Result};
use std::process::{Command, Stdio};

/// Logging service restarted so log lines carry the new host name.
pub const SYSLOG_SERVICE: &str = "rsyslog.service";

/// SNMP daemon process looked up before restarting.
pub const SNMP_PROCESS: &str = "snmpd";

/// SNMP unit, restarted only when [`SNMP_PROCESS`] is running.
pub const SNMP_SERVICE: &str = "snmpd.service";

/// Side effects on the running system.
pub trait SystemEffector {
    /// Sets the static host name.
    ///
    /// # Errors
    ///
    /// Returns [`HostNameError::Command`] if the host name cannot be set.
    fn set_hostname(&self, fqdn: &str) -> Result<()>;

    /// Restarts a service unit.
    ///
    /// # Errors
    ///
    /// Returns [`HostNameError::Command`] if the restart fails.
    fn restart_service(&self, name: &str) -> Result<()>;

    /// Returns `true` if a process called `name` is running.
    ///
    /// # Errors
    ///
    /// Returns [`HostNameError::Command`] if the process table cannot be
    /// queried.
    fn is_process_running(&self, name: &str) -> Result<bool>;
}

/// Effector driving `hostnamectl`, `systemctl` and `pgrep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Systemd;

impl SystemEffector for Systemd {
    fn set_hostname(&self, fqdn: &str) -> Result<()> {
        run("hostnamectl", &["set-hostname", "--static", fqdn])
    }

    fn restart_service(&self, name: &str) -> Result<()> {
        run("systemctl", &["restart", name])
    }

    fn is_process_running(&self, name: &str) -> Result<bool> {
        let status = Command::new("pgrep")
            .arg(name)
            .stdout(Stdio::null())
            .status()
            .map_err(|e| command_error("pgrep", &e))?;
        Ok(status.success())
    }
}

fn run(program: &str, args: &[&str]) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|e| command_error(program, &e))?;
    if !status.success() {
        return Err(HostNameError::Command {
            program: program.to_string(),
            detail: status.to_string(),
        });
    }
    Ok(())
}

fn command_error(program: &str, err: &std::io::Error) -> HostNameError {
    HostNameError::Command {
        program: program.to_string(),
        detail: err.to_string(),
    }
}

/// Sets the host name to the config's FQDN and restarts the services that
/// cache it.
///
/// # Errors
///
/// Propagates the first effector failure.
pub fn apply<E: SystemEffector + ?Sized>(config: &HostConfig, effector: &E) -> Result<()> {
    let fqdn = config.fqdn();
    effector.set_hostname(&fqdn)?;
    tracing::info!(fqdn = %fqdn, "Set static host name");

    effector.restart_service(SYSLOG_SERVICE)?;
    tracing::info!(service = SYSLOG_SERVICE, "Restarted service");

    if effector.is_process_running(SNMP_PROCESS)? {
        effector.restart_service(SNMP_SERVICE)?;
        tracing::info!(service = SNMP_SERVICE, "Restarted service");
    } else {
        tracing::debug!(process = SNMP_PROCESS, "Not running, skipping restart");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        snmp_running: bool,
        calls: RefCell<Vec<String>>,
    }

    impl SystemEffector for Recorder {
        fn set_hostname(&self, fqdn: &str) -> Result<()> {
            self.calls.borrow_mut().push(format!("hostname {fqdn}"));
            Ok(())
        }

        fn restart_service(&self, name: &str) -> Result<()> {
            self.calls.borrow_mut().push(format!("restart {name}"));
            Ok(())
        }

        fn is_process_running(&self, _name: &str) -> Result<bool> {
            Ok(self.snmp_running)
        }
    }

    #[test]
    fn apply_without_snmp() {
        let r = Recorder::default();
        apply(&HostConfig::new("r1").with_domain_name("example.com"), &r).unwrap();
        assert_eq!(
            *r.calls.borrow(),
            vec!["hostname r1.example.com", "restart rsyslog.service"]
        );
    }

    #[test]
    fn apply_restarts_running_snmpd() {
        let r = Recorder {
            snmp_running: true,
            ..Recorder::default()
        };
        apply(&HostConfig::new("r1"), &r).unwrap();
        assert_eq!(
            *r.calls.borrow(),
            vec![
                "hostname r1",
                "restart rsyslog.service",
                "restart snmpd.service"
            ]
        );
    }

    #[test]
    fn run_reports_failed_status() {
        let err = run("false", &[]).unwrap_err();
        assert!(matches!(err, HostNameError::Command { ref program, .. } if program == "false"));
    }

    #[test]
    fn run_reports_missing_program() {
        assert!(run("/nonexistent/hostnamectl", &[]).is_err());
    }
}
