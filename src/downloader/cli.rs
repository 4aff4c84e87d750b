//! Subprocess adapter for the `pym3u8dl` command-line downloader.
//!
//! Invocation shape:
//!
//! ```text
//! pym3u8dl <url> <output> [--skip-space-check] [--debug] [--no-verify-ssl]
//!          [--master [--name N --bandwidth B --resolution R]]
//! ```
//!
//! Progress lines arrive on stdout and are forwarded to the progress sink.
//! A master probe answers with a single `VARIANTS <json>` stdout line, where
//! the JSON is an array of `{"Name", "bandwidth", "resolution"}` objects.
//! Failures are reported through the exit code (2 = bad arguments,
//! 3 = network/filesystem) with the detail on the last stderr line.

use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};

use crate::domain::{DownloadError, Variant};

use super::{DownloadJob, PlaylistDownloader, ProgressSink};

const VARIANTS_PREFIX: &str = "VARIANTS ";
const PROGRAM_ENV_VAR: &str = "M3U8_DOWNLOADER_BIN";
const DEFAULT_PROGRAM: &str = "pym3u8dl";

const EXIT_VALIDATION: i32 = 2;
const EXIT_IO: i32 = 3;

pub struct CliDownloader {
    program: String,
}

impl CliDownloader {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Resolve the downloader binary from `M3U8_DOWNLOADER_BIN`, falling back
    /// to `pym3u8dl` on the PATH.
    pub fn from_env() -> Self {
        let program =
            std::env::var(PROGRAM_ENV_VAR).unwrap_or_else(|_| DEFAULT_PROGRAM.to_string());
        Self::new(program)
    }

    fn run(&self, args: Vec<String>, progress: &dyn ProgressSink) -> Result<(), DownloadError> {
        log::debug!("spawning {} {:?}", self.program, args);

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| DownloadError::Io(format!("failed to launch {}: {e}", self.program)))?;

        // Drain stderr on a side thread so a chatty downloader can't deadlock
        // against the stdout pipe.
        let stderr = child.stderr.take();
        let stderr_reader = std::thread::spawn(move || {
            let mut text = String::new();
            if let Some(mut stderr) = stderr {
                let _ = stderr.read_to_string(&mut text);
            }
            text
        });

        let mut variants: Option<Vec<Variant>> = None;
        let mut stream_error: Option<DownloadError> = None;
        if let Some(stdout) = child.stdout.take() {
            for line in BufReader::new(stdout).lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        stream_error =
                            Some(DownloadError::Io(format!("reading downloader output: {e}")));
                        break;
                    }
                };
                if let Some(payload) = line.strip_prefix(VARIANTS_PREFIX) {
                    match serde_json::from_str::<Vec<Variant>>(payload) {
                        Ok(parsed) => variants = Some(parsed),
                        Err(e) => {
                            stream_error = Some(DownloadError::Downloader(format!(
                                "malformed variant listing from downloader: {e}"
                            )));
                            break;
                        }
                    }
                } else {
                    progress.write(&line);
                }
            }
        }

        // A stream error leaves the child mid-download; put it down so the
        // wait below always reaps it. Dropping a `Child` does neither.
        if stream_error.is_some() {
            let _ = child.kill();
        }

        let status = child.wait();
        let stderr_text = stderr_reader.join().unwrap_or_default();

        if let Some(err) = stream_error {
            return Err(err);
        }
        let status = status
            .map_err(|e| DownloadError::Io(format!("waiting for {}: {e}", self.program)))?;

        // The variant listing outranks the exit status: a probe run is
        // allowed to exit non-zero after printing it.
        if let Some(variants) = variants {
            return Err(DownloadError::MasterVariants(variants));
        }

        if status.success() {
            return Ok(());
        }

        let detail = stderr_text
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .unwrap_or("downloader exited with an error")
            .trim()
            .to_string();

        match status.code() {
            Some(EXIT_VALIDATION) => Err(DownloadError::Validation(detail)),
            Some(EXIT_IO) => Err(DownloadError::Io(detail)),
            _ => Err(DownloadError::Downloader(detail)),
        }
    }
}

fn push_flag_args(args: &mut Vec<String>, job: &DownloadJob) {
    if job.skip_space_check {
        args.push("--skip-space-check".to_string());
    }
    if job.debug {
        args.push("--debug".to_string());
    }
    if !job.verify_ssl {
        args.push("--no-verify-ssl".to_string());
    }
}

fn build_playlist_args(job: &DownloadJob) -> Vec<String> {
    let mut args = vec![job.input_url.clone(), job.output_path.clone()];
    push_flag_args(&mut args, job);
    args
}

fn build_master_args(job: &DownloadJob, selection: Option<&Variant>) -> Vec<String> {
    let mut args = build_playlist_args(job);
    args.push("--master".to_string());
    if let Some(variant) = selection {
        args.push("--name".to_string());
        args.push(variant.name.clone());
        args.push("--bandwidth".to_string());
        args.push(variant.bandwidth.clone());
        args.push("--resolution".to_string());
        args.push(variant.resolution.clone());
    }
    args
}

impl PlaylistDownloader for CliDownloader {
    fn download_playlist(
        &self,
        job: &DownloadJob,
        progress: &dyn ProgressSink,
    ) -> Result<(), DownloadError> {
        self.run(build_playlist_args(job), progress)
    }

    fn download_master_playlist(
        &self,
        job: &DownloadJob,
        selection: Option<&Variant>,
        progress: &dyn ProgressSink,
    ) -> Result<(), DownloadError> {
        self.run(build_master_args(job, selection), progress)
    }
}
