//! Labeler backed by an external program
//!
//! The program gets the request on stdin and answers on stdout. Pipes are
//! drained on their own threads so a chatty program can't block on a full
//! pipe while we wait for it.

use super::{EnergyLabeler, LabelerError, LabelerResult, LabelingRequest};
use crate::models::LabelingOutcome;
use std::io::{BufRead, BufReader, Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub const DEFAULT_LABELER_COMMAND: &str = "aws-energy-labeler-lib";

/// Labeling a large organization can take a long while
pub const DEFAULT_LABELER_TIMEOUT_SECS: u64 = 1800;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLabeler {
    command: Vec<String>,
    /// 0 = no timeout
    timeout_secs: u64,
}

impl CommandLabeler {
    pub fn new(command: Vec<String>, timeout_secs: u64) -> LabelerResult<Self> {
        if command.is_empty() {
            return Err(LabelerError::EmptyCommand);
        }
        Ok(Self {
            command,
            timeout_secs,
        })
    }

    /// Build from a command line such as `python -m labeler --quiet`
    pub fn from_command_line(line: &str, timeout_secs: u64) -> LabelerResult<Self> {
        Self::new(split_command_line(line), timeout_secs)
    }

    pub fn program(&self) -> &str {
        &self.command[0]
    }

    pub fn args(&self) -> &[String] {
        &self.command[1..]
    }
}

impl EnergyLabeler for CommandLabeler {
    fn label(&self, request: &LabelingRequest) -> LabelerResult<LabelingOutcome> {
        let payload = serde_json::to_vec(request).map_err(LabelerError::Request)?;
        let program = self.program().to_string();

        debug!("Running labeler: {} {:?}", program, self.args());

        let mut child = Command::new(&program)
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    LabelerError::NotFound {
                        program: program.clone(),
                    }
                } else {
                    LabelerError::Spawn {
                        program: program.clone(),
                        source: e,
                    }
                }
            })?;

        let stdin = child.stdin.take();
        let writer = thread::spawn(move || -> std::io::Result<()> {
            if let Some(mut stdin) = stdin {
                match stdin.write_all(&payload) {
                    // The program may answer without reading its input
                    Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                    other => other?,
                }
            }
            Ok(())
        });

        let stdout = child.stdout.take();
        let reader = thread::spawn(move || -> std::io::Result<Vec<u8>> {
            let mut buf = Vec::new();
            if let Some(mut stdout) = stdout {
                stdout.read_to_end(&mut buf)?;
            }
            Ok(buf)
        });

        let stderr = child.stderr.take();
        let stderr_reader = thread::spawn(move || {
            let mut lines = Vec::new();
            if let Some(stderr) = stderr {
                for line in BufReader::new(stderr).lines().map_while(Result::ok) {
                    debug!(target: "labeler", "{}", line);
                    lines.push(line);
                }
            }
            lines.join("\n")
        });

        let status = wait_with_timeout(&mut child, &program, self.timeout_secs)?;

        let stdout = reader.join().map_err(|_| thread_panicked("stdout"))??;
        let stderr = stderr_reader.join().map_err(|_| thread_panicked("stderr"))?;
        writer.join().map_err(|_| thread_panicked("stdin"))??;

        if !status.success() {
            return Err(LabelerError::Failed {
                program,
                code: status.code(),
                stderr,
            });
        }

        let outcome: LabelingOutcome =
            serde_json::from_slice(&stdout).map_err(LabelerError::InvalidOutput)?;
        outcome
            .subject(&request.target)
            .map_err(LabelerError::IncompleteOutcome)?;

        info!(
            "Labeler returned {} labeled accounts and {} findings",
            outcome.labeled_accounts.len(),
            outcome.findings.len()
        );
        Ok(outcome)
    }
}

fn thread_panicked(pipe: &str) -> std::io::Error {
    std::io::Error::other(format!("labeler {} thread panicked", pipe))
}

/// Poll the child until it exits, killing it once `timeout_secs` passes
fn wait_with_timeout(child: &mut Child, program: &str, timeout_secs: u64) -> LabelerResult<ExitStatus> {
    if timeout_secs == 0 {
        return Ok(child.wait()?);
    }

    let start = Instant::now();
    let timeout = Duration::from_secs(timeout_secs);

    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if start.elapsed() > timeout {
            let _ = child.kill();
            let _ = child.wait();
            warn!("{} timed out after {}s", program, timeout_secs);
            return Err(LabelerError::TimedOut {
                program: program.to_string(),
                secs: timeout_secs,
            });
        }
        thread::sleep(Duration::from_millis(100));
    }
}

/// Split on whitespace, honouring single quotes, double quotes and backslash escapes
fn split_command_line(line: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None => match c {
                '\'' | '"' => {
                    quote = Some(c);
                    in_word = true;
                }
                '\\' => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                    in_word = true;
                }
                c if c.is_whitespace() => {
                    if in_word {
                        parts.push(std::mem::take(&mut current));
                        in_word = false;
                    }
                }
                c => {
                    current.push(c);
                    in_word = true;
                }
            },
        }
    }
    if in_word {
        parts.push(current);
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_command_line() {
        assert_eq!(
            split_command_line("python -m labeler  --quiet"),
            vec!["python", "-m", "labeler", "--quiet"]
        );
        assert_eq!(
            split_command_line(r#"sh -c 'echo "hi there"; exit 3'"#),
            vec!["sh", "-c", r#"echo "hi there"; exit 3"#]
        );
        assert_eq!(split_command_line(r"my\ labeler ''"), vec!["my labeler", ""]);
        assert!(split_command_line("   ").is_empty());
    }

    #[test]
    fn test_empty_command_rejected() {
        assert!(matches!(
            CommandLabeler::from_command_line("", 10),
            Err(LabelerError::EmptyCommand)
        ));
    }

    #[cfg(unix)]
    mod process {
        use super::super::*;
        use crate::config::settings::tests::{account_settings, zone_settings};
        use crate::models::EnergyLabel;

        fn write_script(dir: &std::path::Path, body: &str) -> String {
            let path = dir.join("labeler.sh");
            std::fs::write(&path, body).unwrap();
            format!("sh {}", path.display())
        }

        #[test]
        fn test_round_trip_through_program() {
            let dir = tempfile::tempdir().unwrap();
            let request_path = dir.path().join("request.json");
            let script = format!(
                "cat > '{}'\ncat <<'EOF'\n{}\nEOF\n",
                request_path.display(),
                r#"{"zone": {"name": "ORGZONE", "energy_label": "B"}, "labeled_accounts": [{"account_id": "111111111111", "energy_label": "A"}]}"#
            );
            let labeler = CommandLabeler::from_command_line(&write_script(dir.path(), &script), 30).unwrap();

            let request = LabelingRequest::from(&zone_settings());
            let outcome = labeler.label(&request).unwrap();
            assert_eq!(outcome.zone.unwrap().energy_label, EnergyLabel::B);
            assert_eq!(outcome.labeled_accounts.len(), 1);

            let received: serde_json::Value =
                serde_json::from_str(&std::fs::read_to_string(&request_path).unwrap()).unwrap();
            assert_eq!(received["target"]["name"], "ORGZONE");
        }

        #[test]
        fn test_non_zero_exit_is_failure() {
            let labeler =
                CommandLabeler::from_command_line("sh -c 'echo oops >&2; exit 3'", 30).unwrap();
            let err = labeler.label(&LabelingRequest::from(&zone_settings())).unwrap_err();
            match err {
                LabelerError::Failed { code, stderr, .. } => {
                    assert_eq!(code, Some(3));
                    assert_eq!(stderr, "oops");
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[test]
        fn test_missing_program() {
            let labeler =
                CommandLabeler::from_command_line("definitely-not-an-energy-labeler-xyz", 30).unwrap();
            assert!(matches!(
                labeler.label(&LabelingRequest::from(&zone_settings())),
                Err(LabelerError::NotFound { .. })
            ));
        }

        #[test]
        fn test_timeout_kills_program() {
            let labeler = CommandLabeler::from_command_line("sh -c 'sleep 5'", 1).unwrap();
            assert!(matches!(
                labeler.label(&LabelingRequest::from(&zone_settings())),
                Err(LabelerError::TimedOut { secs: 1, .. })
            ));
        }

        #[test]
        fn test_garbage_output() {
            let labeler =
                CommandLabeler::from_command_line("sh -c 'cat >/dev/null; echo not-json'", 30).unwrap();
            assert!(matches!(
                labeler.label(&LabelingRequest::from(&zone_settings())),
                Err(LabelerError::InvalidOutput(_))
            ));
        }

        #[test]
        fn test_outcome_must_cover_the_account() {
            let labeler = CommandLabeler::from_command_line(
                r#"sh -c 'cat >/dev/null; echo "{\"labeled_accounts\": []}"'"#,
                30,
            )
            .unwrap();
            assert!(matches!(
                labeler.label(&LabelingRequest::from(&account_settings())),
                Err(LabelerError::IncompleteOutcome(_))
            ));
        }
    }
}
