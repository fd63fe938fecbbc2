use super::error::Error;
use super::invocation::ToolInvocation;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

/// Default executable name searched on PATH when no path is configured.
pub const DEFAULT_TOOL_NAME: &str = "IChem";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3600);
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Result of one batch execution.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Concatenated tool stdout; for stdout-mode tools this is the
    /// fingerprint stream itself.
    pub combined_output: String,
    /// Concatenated tool stderr across all invocations.
    pub stderr: String,
    /// Predicted per-pair output files (empty for stdout-mode tools).
    pub outputs: Vec<PathBuf>,
    /// Whether the batch crashed and was re-run line by line.
    pub retried_line_by_line: bool,
}

/// Executes the external detection binary.
///
/// Every invocation runs under an explicit timeout; an expired batch or a
/// crashed batch process falls back to one invocation per input line, and
/// a line that still fails is recorded as a `|WARNING` marker in the
/// combined output rather than failing the whole batch.
#[derive(Debug, Clone)]
pub struct ToolRunner {
    executable: PathBuf,
    timeout: Duration,
}

impl ToolRunner {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolves the tool executable: a configured path must exist, and
    /// without one the default name is searched on PATH.
    pub fn locate(configured: Option<&Path>) -> Result<Self, Error> {
        if let Some(path) = configured {
            if path.is_file() {
                return Ok(Self::new(path));
            }
            return Err(Error::ToolNotFound {
                path: path.to_path_buf(),
            });
        }

        match search_path(DEFAULT_TOOL_NAME) {
            Some(path) => Ok(Self::new(path)),
            None => Err(Error::ToolNotFound {
                path: PathBuf::from(DEFAULT_TOOL_NAME),
            }),
        }
    }

    /// Runs one batch: writes the input file, launches `<tool> -F <input>`,
    /// and falls back to per-line execution when the batch run fails.
    pub fn execute(
        &self,
        invocation: &ToolInvocation,
        input_path: &Path,
        output_dir: &Path,
    ) -> Result<BatchOutcome, Error> {
        std::fs::create_dir_all(output_dir)?;
        let outputs = invocation.write_batch_input(input_path, output_dir, 0)?;

        log::info!(
            "running {} batch with {} structure pairs",
            invocation.tool,
            invocation.pair_count()
        );

        match self.run_once(&["-F".to_string(), input_path.display().to_string()]) {
            Ok(captured) if captured.success && !self.missing_expected_stdout(invocation, &captured) => {
                return Ok(BatchOutcome {
                    combined_output: captured.stdout,
                    stderr: captured.stderr,
                    outputs,
                    retried_line_by_line: false,
                });
            }
            Ok(captured) => {
                log::warn!(
                    "batch invocation failed (exit ok: {}), retrying line by line",
                    captured.success
                );
            }
            Err(Error::Timeout(elapsed)) => {
                log::warn!("batch invocation timed out after {:?}, retrying line by line", elapsed);
            }
            Err(other) => return Err(other),
        }

        let (lines, _) = invocation.command_lines(output_dir, 0)?;
        let mut combined = String::new();
        let mut stderr = String::new();

        for line in &lines {
            let args: Vec<String> = line.split_whitespace().map(str::to_string).collect();
            match self.run_once(&args) {
                Ok(captured) if captured.success && !captured.stdout.trim().is_empty() => {
                    combined.push_str(&captured.stdout);
                    stderr.push_str(&captured.stderr);
                }
                Ok(captured) if captured.success && invocation.output_prefix.is_some() => {
                    // File-writing tools legitimately keep stdout quiet.
                    stderr.push_str(&captured.stderr);
                }
                Ok(captured) => {
                    log::warn!("pair failed in line-by-line mode: {}", line);
                    combined.push_str(&warning_line(line));
                    stderr.push_str(&captured.stderr);
                }
                Err(Error::Timeout(_)) => {
                    log::warn!("pair timed out in line-by-line mode: {}", line);
                    combined.push_str(&warning_line(line));
                }
                Err(other) => return Err(other),
            }
        }

        Ok(BatchOutcome {
            combined_output: combined,
            stderr,
            outputs,
            retried_line_by_line: true,
        })
    }

    /// A stdout-mode tool that printed nothing produced no fingerprints;
    /// treat that as a failed batch.
    fn missing_expected_stdout(&self, invocation: &ToolInvocation, captured: &Captured) -> bool {
        invocation.output_prefix.is_none() && captured.stdout.trim().is_empty()
    }

    fn run_once(&self, args: &[String]) -> Result<Captured, Error> {
        let mut child = Command::new(&self.executable)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::ToolNotFound {
                        path: self.executable.clone(),
                    }
                } else {
                    Error::Io { source: e }
                }
            })?;

        let stdout = spawn_pipe_reader(child.stdout.take());
        let stderr = spawn_pipe_reader(child.stderr.take());

        let status = self.wait_with_timeout(&mut child)?;

        Ok(Captured {
            success: status,
            stdout: join_pipe_reader(stdout)?,
            stderr: join_pipe_reader(stderr)?,
        })
    }

    fn wait_with_timeout(&self, child: &mut Child) -> Result<bool, Error> {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status.success());
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(Error::Timeout(self.timeout));
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }
}

#[derive(Debug)]
struct Captured {
    success: bool,
    stdout: String,
    stderr: String,
}

fn warning_line(command: &str) -> String {
    format!(
        "|WARNING the tool was not able to calculate the fingerprint for: {}\n",
        command
    )
}

type PipeReader = Option<std::thread::JoinHandle<std::io::Result<String>>>;

fn spawn_pipe_reader<R: Read + Send + 'static>(pipe: Option<R>) -> PipeReader {
    pipe.map(|mut pipe| {
        std::thread::spawn(move || {
            let mut buf = String::new();
            pipe.read_to_string(&mut buf)?;
            Ok(buf)
        })
    })
}

fn join_pipe_reader(reader: PipeReader) -> Result<String, Error> {
    match reader {
        Some(handle) => {
            let text = handle
                .join()
                .map_err(|_| Error::Io {
                    source: std::io::Error::other("output capture thread panicked"),
                })??;
            Ok(text)
        }
        None => Ok(String::new()),
    }
}

fn search_path(name: &str) -> Option<PathBuf> {
    let output = Command::new("which").arg(name).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let path = String::from_utf8_lossy(&output.stdout);
    let path = path.trim();
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::IfpVariant;

    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    fn sample_invocation() -> ToolInvocation {
        ToolInvocation::ifp(
            IfpVariant::Regular,
            vec![PathBuf::from("receptor_0.mol2")],
            vec![PathBuf::from("ligand_0.mol2")],
        )
    }

    #[test]
    fn locate_rejects_a_missing_configured_path() {
        let err = ToolRunner::locate(Some(Path::new("/no/such/tool"))).unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { .. }));
        assert!(err.to_string().contains("configured tool path"));
    }

    #[test]
    fn successful_batch_is_not_retried() {
        let dir = tempfile::tempdir().unwrap();
        let tool = write_script(dir.path(), "tool", "echo '|GLU117'; echo 0100110");
        let runner = ToolRunner::new(tool);

        let outcome = runner
            .execute(
                &sample_invocation(),
                &dir.path().join("batch.in"),
                dir.path(),
            )
            .unwrap();
        assert!(!outcome.retried_line_by_line);
        assert!(outcome.combined_output.contains("|GLU117"));
    }

    #[test]
    fn crashed_batch_falls_back_to_line_mode() {
        let dir = tempfile::tempdir().unwrap();
        // Fails in -F (batch) mode, succeeds per line.
        let tool = write_script(
            dir.path(),
            "tool",
            "if [ \"$1\" = \"-F\" ]; then exit 139; fi\necho '|GLU117'; echo 0100110",
        );
        let runner = ToolRunner::new(tool);

        let outcome = runner
            .execute(
                &sample_invocation(),
                &dir.path().join("batch.in"),
                dir.path(),
            )
            .unwrap();
        assert!(outcome.retried_line_by_line);
        assert!(outcome.combined_output.contains("|GLU117"));
    }

    #[test]
    fn pair_that_keeps_failing_becomes_a_warning_marker() {
        let dir = tempfile::tempdir().unwrap();
        let tool = write_script(dir.path(), "tool", "exit 1");
        let runner = ToolRunner::new(tool);

        let outcome = runner
            .execute(
                &sample_invocation(),
                &dir.path().join("batch.in"),
                dir.path(),
            )
            .unwrap();
        assert!(outcome.retried_line_by_line);
        assert!(outcome.combined_output.starts_with("|WARNING"));
    }

    #[test]
    fn hung_batch_times_out_and_retries() {
        let dir = tempfile::tempdir().unwrap();
        let tool = write_script(
            dir.path(),
            "tool",
            "if [ \"$1\" = \"-F\" ]; then sleep 30; fi\necho '|GLU117'; echo 0100110",
        );
        let runner = ToolRunner::new(tool).with_timeout(Duration::from_millis(200));

        let outcome = runner
            .execute(
                &sample_invocation(),
                &dir.path().join("batch.in"),
                dir.path(),
            )
            .unwrap();
        assert!(outcome.retried_line_by_line);
    }

    #[test]
    fn missing_executable_is_a_tool_not_found_error() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ToolRunner::new("/no/such/binary");
        let err = runner
            .execute(
                &sample_invocation(),
                &dir.path().join("batch.in"),
                dir.path(),
            )
            .unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { .. }));
    }
}
