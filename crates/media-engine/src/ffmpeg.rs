//! ffmpeg/ffprobe command-line backend.

use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use motionscope_common::config::AnalysisDefaults;
use motionscope_common::error::{MotionError, MotionResult};

use crate::backend::{frame_file_pattern, FrameFormat, MediaBackend, ProbeData};

/// Backend that shells out to `ffprobe` and `ffmpeg`.
#[derive(Debug, Clone)]
pub struct FfmpegBackend {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
}

impl Default for FfmpegBackend {
    fn default() -> Self {
        Self::new("ffmpeg", "ffprobe")
    }
}

impl FfmpegBackend {
    pub fn new(ffmpeg: impl Into<PathBuf>, ffprobe: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }

    pub fn from_config(config: &AnalysisDefaults) -> Self {
        Self::new(config.ffmpeg_path.clone(), config.ffprobe_path.clone())
    }

    pub fn ffmpeg_path(&self) -> &Path {
        &self.ffmpeg
    }

    pub fn ffprobe_path(&self) -> &Path {
        &self.ffprobe
    }

    fn extraction_args(
        video: &Path,
        sample_fps: f64,
        output_dir: &Path,
        format: FrameFormat,
    ) -> Vec<std::ffi::OsString> {
        let mut args: Vec<std::ffi::OsString> = [
            "-nostdin",
            "-hide_banner",
            "-v",
            "error",
            "-progress",
            "pipe:1",
            "-i",
        ]
        .into_iter()
        .map(std::ffi::OsString::from)
        .collect();
        args.push(video.as_os_str().to_owned());
        args.push("-vf".into());
        args.push(format!("fps={sample_fps}").into());
        if format == FrameFormat::Jpeg {
            args.push("-q:v".into());
            args.push("2".into());
        }
        args.push(output_dir.join(frame_file_pattern(format)).into_os_string());
        args
    }
}

impl MediaBackend for FfmpegBackend {
    fn probe(&self, video: &Path) -> MotionResult<ProbeData> {
        let output = Command::new(&self.ffprobe)
            .args([
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_streams",
                "-show_format",
            ])
            .arg(video)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                MotionError::probe(
                    video,
                    format!("Failed to start {}: {e}", self.ffprobe.display()),
                )
            })?;

        if !output.status.success() {
            return Err(MotionError::probe(
                video,
                format!(
                    "ffprobe failed (status {}): {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            ));
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| MotionError::probe(video, format!("Unreadable ffprobe output: {e}")))
    }

    fn extract_frames(
        &self,
        video: &Path,
        sample_fps: f64,
        output_dir: &Path,
        format: FrameFormat,
    ) -> MotionResult<()> {
        let args = Self::extraction_args(video, sample_fps, output_dir, format);
        tracing::debug!(args = ?args, "Running ffmpeg");

        let mut child = Command::new(&self.ffmpeg)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                MotionError::extraction(format!("Failed to start {}: {e}", self.ffmpeg.display()))
            })?;

        tracing::debug!(pid = child.id(), sample_fps, "ffmpeg process started");

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| MotionError::extraction("Failed to capture ffmpeg stdout"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| MotionError::extraction("Failed to capture ffmpeg stderr"))?;

        // Drain stderr concurrently to avoid ffmpeg blocking on a full stderr pipe.
        let stderr_task = std::thread::spawn(move || -> String {
            let mut reader = BufReader::new(stderr);
            let mut output = String::new();
            match reader.read_to_string(&mut output) {
                Ok(_) => output,
                Err(err) => format!("<failed to read ffmpeg stderr: {err}>"),
            }
        });

        let mut progress = ProgressState::default();
        let mut reader = BufReader::new(stdout);
        let mut line = Vec::new();
        loop {
            line.clear();
            let bytes = match reader.read_until(b'\n', &mut line) {
                Ok(bytes) => bytes,
                Err(e) => {
                    // Nobody drains stdout past this point; stop ffmpeg before waiting on it.
                    if let Err(kill_err) = child.kill() {
                        tracing::warn!(error = %kill_err, "Failed to kill ffmpeg");
                    }
                    let _ = child.wait();
                    let _ = stderr_task.join();
                    return Err(MotionError::extraction(format!(
                        "Failed reading ffmpeg progress: {e}"
                    )));
                }
            };
            if bytes == 0 {
                break;
            }
            let text = String::from_utf8_lossy(&line);
            if let Some((key, value)) = text.trim().split_once('=') {
                progress.update(key, value);
                if key == "progress" {
                    tracing::trace!(
                        frames = progress.frames,
                        out_time_secs = progress.out_time_secs,
                        "ffmpeg progress"
                    );
                }
            }
        }

        let status = child
            .wait()
            .map_err(|e| MotionError::extraction(format!("Failed to wait on ffmpeg: {e}")))?;

        let stderr_output = stderr_task
            .join()
            .unwrap_or_else(|_| "<failed to join stderr reader>".to_string());

        if !status.success() {
            return Err(MotionError::extraction(format!(
                "ffmpeg frame extraction failed (status {}): {}",
                status,
                stderr_output.trim()
            )));
        }

        tracing::debug!(
            frames = progress.frames,
            complete = progress.complete,
            "ffmpeg finished"
        );
        Ok(())
    }

    fn is_available(&self) -> bool {
        tool_runs(&self.ffmpeg) && tool_runs(&self.ffprobe)
    }

    fn name(&self) -> &str {
        "ffmpeg"
    }
}

/// Whether `binary -version` runs and exits successfully.
pub fn tool_runs(binary: &Path) -> bool {
    Command::new(binary)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Latest values reported on ffmpeg's `-progress` stream.
#[derive(Debug, Default)]
struct ProgressState {
    frames: u64,
    out_time_secs: f64,
    complete: bool,
}

impl ProgressState {
    fn update(&mut self, key: &str, value: &str) {
        match key {
            "frame" => {
                if let Ok(frames) = value.trim().parse::<u64>() {
                    self.frames = frames;
                }
            }
            "out_time_us" | "out_time_ms" => {
                // Both keys carry microseconds.
                if let Ok(us) = value.trim().parse::<f64>() {
                    self.out_time_secs = us / 1_000_000.0;
                }
            }
            "progress" => {
                self.complete = value.trim() == "end";
            }
            _ => {}
        }
    }
}
