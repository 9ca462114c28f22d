//! Concurrent processing of several input files
//!
//! Each file is processed on the blocking thread pool; pipeline runs share
//! nothing, so no coordination is needed between them. Jobs come back in
//! input order whatever order they finish in.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tapkit_core::{InputError, ScaleRequest};
use tapkit_processor::{measure_path_length, ProcessedResult, TapProcessor};
use uuid::Uuid;

/// Raw input file as handed over by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub name: String,
    pub data: Vec<u8>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Read a file from disk, naming it after its final path component
    pub async fn read(path: &Path) -> Result<Self, InputError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let data = tokio::fs::read(path)
            .await
            .map_err(|source| InputError::Read {
                name: name.clone(),
                source,
            })?;

        Ok(Self { name, data })
    }

    /// The content as text
    pub fn text(&self) -> Result<&str, InputError> {
        std::str::from_utf8(&self.data).map_err(|_| InputError::NotText {
            name: self.name.clone(),
        })
    }
}

/// Lifecycle of a file job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Error,
}

/// One file's processing outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileJob {
    pub id: Uuid,
    pub name: String,
    /// Input size in bytes
    pub size: usize,
    pub status: JobStatus,
    pub result: Option<ProcessedResult>,
    pub error: Option<String>,
}

impl FileJob {
    pub fn new(input: &InputFile) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name.clone(),
            size: input.data.len(),
            status: JobStatus::Pending,
            result: None,
            error: None,
        }
    }

    fn complete(&mut self, result: ProcessedResult) {
        self.status = JobStatus::Completed;
        self.result = Some(result);
    }

    fn fail(&mut self, error: impl Into<String>) {
        self.status = JobStatus::Error;
        self.error = Some(error.into());
    }

    pub fn is_completed(&self) -> bool {
        self.status == JobStatus::Completed
    }
}

/// Processes batches of files with one material and template
///
/// The material is validated per file, so an invalid profile fails every job.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    processor: Arc<TapProcessor>,
    desired_length: Option<f64>,
}

impl BatchRunner {
    pub fn new(processor: TapProcessor) -> Self {
        Self {
            processor: Arc::new(processor),
            desired_length: None,
        }
    }

    /// Rescale every file so its path length becomes `desired_length` mm
    ///
    /// The current length is measured per file.
    pub fn with_desired_length(mut self, desired_length: f64) -> Self {
        self.desired_length = Some(desired_length);
        self
    }

    pub fn processor(&self) -> &TapProcessor {
        &self.processor
    }

    /// Process all inputs concurrently
    pub async fn run(&self, inputs: Vec<InputFile>) -> Vec<FileJob> {
        let mut pending = Vec::with_capacity(inputs.len());

        for input in inputs {
            let mut job = FileJob::new(&input);
            job.status = JobStatus::Processing;

            let processor = Arc::clone(&self.processor);
            let desired_length = self.desired_length;
            let handle = tokio::task::spawn_blocking(move || {
                process_input(&processor, &input, desired_length)
            });
            pending.push((job, handle));
        }

        let mut jobs = Vec::with_capacity(pending.len());
        for (mut job, handle) in pending {
            match handle.await {
                Ok(Ok(result)) => job.complete(result),
                Ok(Err(e)) => {
                    tracing::warn!(file = %job.name, error = %e, "file could not be processed");
                    job.fail(e.to_string());
                }
                Err(e) => {
                    tracing::error!(file = %job.name, error = %e, "processing task failed");
                    job.fail(format!("Processing task failed: {e}"));
                }
            }
            jobs.push(job);
        }

        tracing::info!(
            files = jobs.len(),
            completed = jobs.iter().filter(|j| j.is_completed()).count(),
            "batch finished"
        );
        jobs
    }
}

fn process_input(
    processor: &TapProcessor,
    input: &InputFile,
    desired_length: Option<f64>,
) -> tapkit_core::Result<ProcessedResult> {
    let content = input.text()?;
    processor.material().validate()?;

    let result = match desired_length {
        Some(desired) => {
            let scale = ScaleRequest::new(measure_path_length(content), desired);
            if !scale.apply {
                tracing::warn!(file = %input.name, desired, "path length is zero, scaling skipped");
            }
            tapkit_processor::process(
                content,
                processor.template(),
                &input.name,
                processor.material(),
                Some(&scale),
            )
        }
        None => processor.process(content, &input.name),
    };

    Ok(result)
}

/// Where a processed file is written
///
/// Into `output_dir` when given, otherwise next to the input file.
pub fn output_path(input: &Path, output_dir: Option<&Path>, filename: &str) -> PathBuf {
    match output_dir {
        Some(dir) => dir.join(filename),
        None => input
            .parent()
            .map(|p| p.join(filename))
            .unwrap_or_else(|| PathBuf::from(filename)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_starts_pending() {
        let input = InputFile::new("a.tap", "G01 X1");
        let job = FileJob::new(&input);
        assert_eq!(job.status, JobStatus::Pending);
        assert_eq!(job.size, 6);
        assert!(job.result.is_none());
    }

    #[test]
    fn test_text_rejects_binary() {
        let input = InputFile::new("bin.tap", vec![0xff, 0xfe, 0x00]);
        let err = input.text().unwrap_err();
        assert_eq!(err.to_string(), "File 'bin.tap' is not valid UTF-8 text");
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("/in/a.tap"), None, "a_01_05_24.tap"),
            PathBuf::from("/in/a_01_05_24.tap")
        );
        assert_eq!(
            output_path(Path::new("/in/a.tap"), Some(Path::new("/out")), "a_01_05_24.tap"),
            PathBuf::from("/out/a_01_05_24.tap")
        );
        assert_eq!(
            output_path(Path::new("a.tap"), None, "x.tap"),
            PathBuf::from("x.tap")
        );
    }

    #[test]
    fn test_job_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&JobStatus::Completed).unwrap(),
            "\"completed\""
        );
    }
}
