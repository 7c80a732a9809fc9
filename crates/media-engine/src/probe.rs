//! Video probing: raw backend metadata → [`VideoMetadata`].

use std::path::Path;

use motionscope_common::error::{MotionError, MotionResult};
use motionscope_report_model::metadata::{FrameRate, VideoMetadata};

use crate::backend::{MediaBackend, ProbeData};

/// Probe `video` with `backend` and interpret the result.
pub fn probe_video(backend: &dyn MediaBackend, video: &Path) -> MotionResult<VideoMetadata> {
    if !video.is_file() {
        return Err(MotionError::probe(video, "file not found or not readable"));
    }

    let data = backend.probe(video)?;
    let metadata = metadata_from_probe(video, &data)?;

    tracing::debug!(
        video = %video.display(),
        frame_rate = %metadata.frame_rate(),
        duration_secs = metadata.duration_secs(),
        estimated_frames = metadata.estimated_total_frames(),
        "Probed video"
    );
    Ok(metadata)
}

/// Interpret probe output leniently.
///
/// Only a missing video stream is an error. The frame rate falls back to
/// 30 fps; the duration prefers the stream, then the container, then 0.
pub fn metadata_from_probe(video: &Path, data: &ProbeData) -> MotionResult<VideoMetadata> {
    let stream = data
        .video_stream()
        .ok_or_else(|| MotionError::probe(video, "no video stream"))?;

    let frame_rate = FrameRate::parse_lenient(stream.r_frame_rate.as_deref());
    if stream.r_frame_rate.as_deref().and_then(FrameRate::parse).is_none() {
        tracing::debug!(
            raw = ?stream.r_frame_rate,
            "Unusable frame rate, defaulting to {}",
            FrameRate::DEFAULT
        );
    }

    let duration_secs = parse_duration(stream.duration.as_deref())
        .or_else(|| {
            data.format
                .as_ref()
                .and_then(|f| parse_duration(f.duration.as_deref()))
        })
        .unwrap_or(0.0);

    Ok(VideoMetadata::new(frame_rate, duration_secs))
}

/// Seconds from an ffprobe duration string; `None` for `"N/A"` and other
/// unusable values.
fn parse_duration(raw: Option<&str>) -> Option<f64> {
    let secs = raw?.trim().parse::<f64>().ok()?;
    (secs.is_finite() && secs >= 0.0).then_some(secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{ProbeFormat, ProbeStream};

    fn video_stream(rate: Option<&str>, duration: Option<&str>) -> ProbeStream {
        ProbeStream {
            codec_type: Some("video".to_string()),
            r_frame_rate: rate.map(str::to_string),
            duration: duration.map(str::to_string),
            ..Default::default()
        }
    }

    fn probe_data(stream: ProbeStream, format_duration: Option<&str>) -> ProbeData {
        ProbeData {
            streams: vec![stream],
            format: Some(ProbeFormat {
                format_name: Some("matroska,webm".to_string()),
                duration: format_duration.map(str::to_string),
            }),
        }
    }

    #[test]
    fn test_stream_duration_preferred() {
        let data = probe_data(video_stream(Some("25/1"), Some("8.0")), Some("9.5"));
        let metadata = metadata_from_probe(Path::new("a.mkv"), &data).unwrap();
        assert!((metadata.duration_secs() - 8.0).abs() < 1e-9);
        assert_eq!(metadata.estimated_total_frames(), 200);
    }

    #[test]
    fn test_format_duration_fallback() {
        let data = probe_data(video_stream(Some("25/1"), Some("N/A")), Some("9.5"));
        let metadata = metadata_from_probe(Path::new("a.mkv"), &data).unwrap();
        assert!((metadata.duration_secs() - 9.5).abs() < 1e-9);

        let data = probe_data(video_stream(Some("25/1"), None), Some("9.5"));
        let metadata = metadata_from_probe(Path::new("a.mkv"), &data).unwrap();
        assert!((metadata.duration_secs() - 9.5).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_duration_is_zero() {
        let data = probe_data(video_stream(Some("25/1"), None), None);
        let metadata = metadata_from_probe(Path::new("a.mkv"), &data).unwrap();
        assert_eq!(metadata.duration_secs(), 0.0);
        assert_eq!(metadata.estimated_total_frames(), 0);
    }

    #[test]
    fn test_malformed_rate_defaults_to_thirty() {
        for rate in [None, Some(""), Some("x/0"), Some("0/0")] {
            let data = probe_data(video_stream(rate, Some("10")), None);
            let metadata = metadata_from_probe(Path::new("a.mkv"), &data).unwrap();
            assert!((metadata.fps() - 30.0).abs() < 1e-9, "rate {rate:?}");
            assert_eq!(metadata.estimated_total_frames(), 300);
        }
    }

    #[test]
    fn test_missing_video_stream_is_probe_error() {
        let data = ProbeData {
            streams: vec![ProbeStream {
                codec_type: Some("audio".to_string()),
                ..Default::default()
            }],
            format: None,
        };
        let err = metadata_from_probe(Path::new("song.m4a"), &data).unwrap_err();
        assert!(matches!(err, MotionError::Probe { .. }));
    }
}
