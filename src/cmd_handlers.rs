use std::io;
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;

/// stderr,stdout are lossy utf-8 strings
/// status is the exit status of the process
pub struct CmdInfo {
    pub stdout: String,
    pub stderr: String,
    pub status: ExitStatus,
}

impl CmdInfo {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// "status 3", or "signal 9" when killed
    pub fn describe_status(&self) -> String {
        if let Some(code) = self.status.code() {
            return format!("status {code}");
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = self.status.signal() {
                return format!("signal {signal}");
            }
        }
        self.status.to_string()
    }
}

/// runs `program args..` to completion and captures its output.
/// the child is killed if the returned future is dropped
/// eg run_cmd("waybackurls", &["example.com".to_string()]).await
pub async fn run_cmd(program: &str, args: &[String]) -> io::Result<CmdInfo> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await?;

    Ok(CmdInfo {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        status: output.status,
    })
}

/// whether `cmd` resolves on PATH
pub fn which(cmd: &str) -> bool {
    std::process::Command::new("which")
        .arg(cmd)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_or(false, |s| s.success())
}
