//! Change detection against the base branch.
//!
//! [`ChangeSource`] is the seam the release-note validator uses to ask
//! "what changed in this unit" and "what did this file look like on the base
//! branch". [`GitCli`] answers through the `git` binary; tests substitute an
//! in-memory source.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::error::GitError;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Read access to the version history of a content unit.
pub trait ChangeSource: Send + Sync {
    /// Files under `unit` that differ between `base` and `head`, as paths
    /// relative to `unit`.
    fn changed_files(&self, unit: &Path, base: &str, head: &str) -> Result<Vec<PathBuf>, GitError>;

    /// Content of `file` (relative to `unit`) at `reference`, or `None` if
    /// the file does not exist there.
    fn file_at(&self, unit: &Path, reference: &str, file: &Path)
        -> Result<Option<String>, GitError>;
}

/// [`ChangeSource`] backed by the `git` command line.
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    timeout: Option<Duration>,
}

struct GitOutput {
    status: ExitStatus,
    stdout: Vec<u8>,
    stderr: String,
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<io::Result<Vec<u8>>> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf)?;
        }
        Ok(buf)
    })
}

fn collect(reader: JoinHandle<io::Result<Vec<u8>>>, args: &str) -> Result<Vec<u8>, GitError> {
    let read = reader
        .join()
        .unwrap_or_else(|_| Err(io::Error::other("output reader panicked")));
    read.map_err(|source| GitError::Read {
        args: args.to_string(),
        source,
    })
}

impl GitCli {
    /// `timeout` bounds every git invocation; `None` waits indefinitely.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    fn run(&self, dir: &Path, args: &[&str]) -> Result<GitOutput, GitError> {
        let joined = args.join(" ");
        tracing::debug!(dir = %dir.display(), args = %joined, "running git");

        let mut child = Command::new("git")
            .arg("-C")
            .arg(dir)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| GitError::Spawn {
                dir: dir.to_path_buf(),
                source,
            })?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match self.timeout {
            None => child.wait().map_err(|source| GitError::Spawn {
                dir: dir.to_path_buf(),
                source,
            })?,
            Some(timeout) => {
                let deadline = Instant::now() + timeout;
                loop {
                    match child.try_wait() {
                        Ok(Some(status)) => break status,
                        Ok(None) if Instant::now() >= deadline => {
                            let _ = child.kill();
                            let _ = child.wait();
                            tracing::warn!(args = %joined, ?timeout, "git timed out");
                            return Err(GitError::TimedOut {
                                args: joined,
                                timeout,
                            });
                        }
                        Ok(None) => std::thread::sleep(POLL_INTERVAL),
                        Err(source) => {
                            return Err(GitError::Spawn {
                                dir: dir.to_path_buf(),
                                source,
                            })
                        }
                    }
                }
            }
        };

        let stdout = collect(stdout, &joined)?;
        let stderr = collect(stderr, &joined)?;
        Ok(GitOutput {
            status,
            stdout,
            stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
        })
    }
}

fn failed(args: &[&str], output: GitOutput) -> GitError {
    GitError::Failed {
        args: args.join(" "),
        status: output.status.to_string(),
        stderr: output.stderr,
    }
}

/// `git show` reports a path missing at a revision in one of two ways.
fn is_missing_at_revision(stderr: &str) -> bool {
    stderr.contains("does not exist") || stderr.contains("but not in")
}

impl ChangeSource for GitCli {
    fn changed_files(&self, unit: &Path, base: &str, head: &str) -> Result<Vec<PathBuf>, GitError> {
        let range = format!("{base}...{head}");
        let args = [
            "diff",
            "--name-only",
            "--relative",
            "--diff-filter=ACMRTUXB",
            range.as_str(),
            "--",
            ".",
        ];
        let output = self.run(unit, &args)?;
        if !output.status.success() {
            return Err(failed(&args, output));
        }
        let stdout = String::from_utf8(output.stdout)?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(PathBuf::from)
            .collect())
    }

    fn file_at(
        &self,
        unit: &Path,
        reference: &str,
        file: &Path,
    ) -> Result<Option<String>, GitError> {
        let spec = format!("{reference}:./{}", file.display());
        let args = ["show", spec.as_str()];
        let output = self.run(unit, &args)?;
        if output.status.success() {
            return Ok(Some(String::from_utf8(output.stdout)?));
        }
        if is_missing_at_revision(&output.stderr) {
            return Ok(None);
        }
        Err(failed(&args, output))
    }
}
