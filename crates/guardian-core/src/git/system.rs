use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::GuardianConfig;
use crate::error::GitError;
use crate::git::GitRunner;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Runs the real git binary with a hard timeout.
///
/// Holds no process state between calls, so one instance can serve any
/// number of concurrent inspections.
#[derive(Debug, Clone)]
pub struct SystemGit {
    program: String,
    timeout: Duration,
}

impl SystemGit {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn from_config(config: &GuardianConfig) -> Self {
        Self::new(config.git_program.clone(), config.git_timeout())
    }
}

impl GitRunner for SystemGit {
    fn run(&self, args: &[&str], cwd: &Path) -> Result<String, GitError> {
        tracing::debug!(program = %self.program, ?args, cwd = %cwd.display(), "running git");

        let mut child = Command::new(&self.program)
            .args(args)
            .current_dir(cwd)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| GitError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let started = Instant::now();

        // Pipes are drained on scoped threads so a chatty child cannot block
        // on a full pipe while we poll for exit.
        thread::scope(|scope| -> Result<String, GitError> {
            let out_reader = scope.spawn(move || drain(stdout));
            let err_reader = scope.spawn(move || drain(stderr));

            let waited = loop {
                match child.try_wait() {
                    Ok(Some(status)) => break Ok(status),
                    Ok(None) if started.elapsed() < self.timeout => thread::sleep(POLL_INTERVAL),
                    Ok(None) => {
                        let _ = child.kill();
                        let _ = child.wait();
                        break Err(GitError::Timeout {
                            elapsed: started.elapsed(),
                        });
                    }
                    Err(err) => {
                        let _ = child.kill();
                        let _ = child.wait();
                        break Err(GitError::Io(err));
                    }
                }
            };

            let stdout = out_reader.join().unwrap_or_default();
            let stderr = err_reader.join().unwrap_or_default();
            let status = waited?;

            if status.success() {
                Ok(stdout)
            } else {
                Err(GitError::Exit {
                    code: status.code(),
                    stderr: stderr.trim().to_string(),
                })
            }
        })
    }
}

fn drain<R: Read>(pipe: Option<R>) -> String {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf);
    }
    String::from_utf8_lossy(&buf).into_owned()
}
