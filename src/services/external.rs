use crate::config::ProcessSettings;
use crate::core::{DelayPredictor, PredictionError};
use crate::models::PredictionResult;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Predictor that delegates to an external scoring program
///
/// The program receives the day of week and airport id as its last two
/// arguments and must print a JSON `{"delayChance", "confidence"}` object
/// on stdout. Both output streams are buffered in full before anything is
/// parsed, and the child is killed if it outlives the timeout.
#[derive(Debug, Clone)]
pub struct ExternalPredictor {
    program: String,
    args: Vec<String>,
    timeout: Duration,
    fail_on_stderr: bool,
}

impl ExternalPredictor {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
            fail_on_stderr: true,
        }
    }

    pub fn from_settings(settings: &ProcessSettings) -> Self {
        Self::new(
            settings.program.clone(),
            settings.args.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
        .fail_on_stderr(settings.fail_on_stderr)
    }

    /// Treat any stderr output as a failure, even on a zero exit code
    pub fn fail_on_stderr(mut self, fail: bool) -> Self {
        self.fail_on_stderr = fail;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn run(
        &self,
        day_of_week_id: i64,
        airport_id: i64,
    ) -> Result<PredictionResult, PredictionError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(day_of_week_id.to_string())
            .arg(airport_id.to_string())
            .stdin(Stdio::null())
            .kill_on_drop(true);

        tracing::debug!(
            "Running external predictor: {} {:?} {} {}",
            self.program,
            self.args,
            day_of_week_id,
            airport_id
        );

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(result) => result.map_err(PredictionError::Spawn)?,
            Err(_) => return Err(PredictionError::Timeout(self.timeout)),
        };

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            return Err(PredictionError::Exit {
                status: output.status,
                stderr,
            });
        }

        // Any bytes on stderr count, whitespace included
        if !output.stderr.is_empty() {
            if self.fail_on_stderr {
                return Err(PredictionError::Stderr(stderr));
            }
            tracing::warn!("External predictor wrote to stderr: {}", stderr);
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

impl DelayPredictor for ExternalPredictor {
    async fn predict(
        &self,
        day_of_week_id: i64,
        airport_id: i64,
    ) -> Result<PredictionResult, PredictionError> {
        self.run(day_of_week_id, airport_id).await
    }

    fn name(&self) -> &'static str {
        "external"
    }
}
