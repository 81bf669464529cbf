use std::cmp::Ordering;
use std::collections::HashSet;
use std::process::Stdio;

use sysinfo::{System, MINIMUM_CPU_UPDATE_INTERVAL};
use tokio::process::Command;

/// One process observed in a snapshot. `cpu_percent` is `None` for a process
/// first seen on the final refresh, before any CPU delta exists for it.
#[derive(Debug, Clone)]
pub struct ProcessSample {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: Option<f32>,
}

/// Captured result of one shell command.
#[derive(Debug)]
pub struct ShellOutcome {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl ShellOutcome {
    /// Collapses the outcome to the single string handed back to the caller.
    pub fn into_text(self) -> String {
        if self.success {
            self.stdout
        } else {
            format!("Error: {}", self.stderr)
        }
    }
}

/// Runs a command line through the system shell, capturing both streams.
///
/// The command text is executed verbatim; there is no sandboxing and no
/// allow-list. A spawn failure is reported as an unsuccessful outcome with
/// the OS error in `stderr`, never as a panic or a propagated error.
pub async fn run_shell_command(command: &str) -> ShellOutcome {
    #[cfg(unix)]
    let output = Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await;
    #[cfg(windows)]
    let output = Command::new("cmd")
        .arg("/C")
        .arg(command)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await;

    match output {
        Ok(output) => ShellOutcome {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        },
        Err(e) => {
            tracing::error!("Failed to spawn shell command: {}", e);
            ShellOutcome {
                success: false,
                stdout: String::new(),
                stderr: e.to_string(),
            }
        }
    }
}

/// Formats the top `limit` processes by CPU usage, one line per process.
///
/// Blocks for one CPU sampling interval; call from a blocking task when on an
/// async runtime.
pub fn top_processes(limit: usize) -> Vec<String> {
    rank_processes(collect_samples(), limit)
}

/// Takes a point-in-time process snapshot with measured CPU usage.
///
/// CPU usage is a delta between two refreshes, so processes that appear only
/// on the second refresh have no measurement yet and are sampled with
/// `cpu_percent = None`.
fn collect_samples() -> Vec<ProcessSample> {
    let mut sys = System::new_all();
    let measured: HashSet<u32> = sys.processes().keys().map(|pid| pid.as_u32()).collect();

    std::thread::sleep(MINIMUM_CPU_UPDATE_INTERVAL);
    sys.refresh_all();

    sys.processes()
        .iter()
        .map(|(pid, process)| {
            let pid = pid.as_u32();
            ProcessSample {
                pid,
                name: process.name().to_string_lossy().into_owned(),
                cpu_percent: measured.contains(&pid).then(|| process.cpu_usage()),
            }
        })
        .collect()
}

/// Drops unmeasured samples, ranks the rest by CPU usage descending, and
/// formats the top `limit` of them. Ties keep their enumeration order.
pub fn rank_processes(samples: Vec<ProcessSample>, limit: usize) -> Vec<String> {
    let mut measured: Vec<(u32, String, f32)> = samples
        .into_iter()
        .filter_map(|sample| {
            sample
                .cpu_percent
                .map(|cpu| (sample.pid, sample.name, cpu))
        })
        .collect();

    measured.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(Ordering::Equal));
    measured.truncate(limit);

    measured
        .into_iter()
        .map(|(pid, name, cpu)| format!("PID: {}, Name: {}, CPU: {:.1}%", pid, name, cpu))
        .collect()
}
