//! FFmpeg argument construction
//!
//! Every clip is re-encoded. Seeking happens before the input for speed; with
//! re-encoding FFmpeg still decodes from the previous keyframe and drops frames up
//! to the requested offset, so cut points are frame-accurate.

use std::path::Path;

use crate::engine::EngineConfig;

/// Seconds formatted the way FFmpeg accepts them, millisecond precision
pub fn format_seconds(seconds: f64) -> String {
    format!("{:.3}", seconds.max(0.0))
}

/// Arguments for cutting one clip
#[derive(Debug, Clone)]
pub struct CutCommand<'a> {
    input: &'a Path,
    output: &'a Path,
    start: f64,
    duration: f64,
    config: &'a EngineConfig,
}

impl<'a> CutCommand<'a> {
    pub fn new(
        input: &'a Path,
        output: &'a Path,
        start: f64,
        duration: f64,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            input,
            output,
            start,
            duration,
            config,
        }
    }

    pub fn build(&self) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "-hide_banner".into(),
            "-nostdin".into(),
            "-loglevel".into(),
            "error".into(),
            "-y".into(),
            "-ss".into(),
            format_seconds(self.start),
            "-i".into(),
            self.input.to_string_lossy().into_owned(),
            "-t".into(),
            format_seconds(self.duration),
            // Trailing `?` keeps inputs without audio (or video) working
            "-map".into(),
            "0:v:0?".into(),
            "-map".into(),
            "0:a:0?".into(),
            "-c:v".into(),
            self.config.video_codec.clone(),
            "-preset".into(),
            self.config.preset.clone(),
            "-crf".into(),
            self.config.crf.to_string(),
            "-pix_fmt".into(),
            "yuv420p".into(),
            "-c:a".into(),
            self.config.audio_codec.clone(),
            "-b:a".into(),
            self.config.audio_bitrate.clone(),
        ];

        if let Some(threads) = self.config.threads {
            args.push("-threads".into());
            args.push(threads.to_string());
        }

        args.extend([
            "-movflags".into(),
            "+faststart".into(),
            self.output.to_string_lossy().into_owned(),
        ]);
        args
    }
}

/// Arguments for extracting a single frame as an image
#[derive(Debug, Clone)]
pub struct FrameCommand<'a> {
    input: &'a Path,
    output: &'a Path,
    timestamp: f64,
}

impl<'a> FrameCommand<'a> {
    pub fn new(input: &'a Path, output: &'a Path, timestamp: f64) -> Self {
        Self {
            input,
            output,
            timestamp,
        }
    }

    pub fn build(&self) -> Vec<String> {
        vec![
            "-hide_banner".into(),
            "-nostdin".into(),
            "-loglevel".into(),
            "error".into(),
            "-y".into(),
            "-ss".into(),
            format_seconds(self.timestamp),
            "-i".into(),
            self.input.to_string_lossy().into_owned(),
            "-map".into(),
            "0:v:0".into(),
            "-frames:v".into(),
            "1".into(),
            self.output.to_string_lossy().into_owned(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_after<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .map(String::as_str)
    }

    #[test]
    fn test_cut_command_seeks_before_input() {
        let config = EngineConfig::default();
        let args = CutCommand::new(
            Path::new("in.mp4"),
            Path::new("out/clip_004.mp4"),
            4.0,
            3.0,
            &config,
        )
        .build();

        let ss = args.iter().position(|a| a == "-ss").unwrap();
        let input = args.iter().position(|a| a == "-i").unwrap();
        assert!(ss < input);
        assert_eq!(value_after(&args, "-ss"), Some("4.000"));
        assert_eq!(value_after(&args, "-i"), Some("in.mp4"));
        assert_eq!(value_after(&args, "-t"), Some("3.000"));
        assert_eq!(args.last().map(String::as_str), Some("out/clip_004.mp4"));
    }

    #[test]
    fn test_cut_command_reencodes_and_maps_optional_streams() {
        let config = EngineConfig::default();
        let args = CutCommand::new(Path::new("a.mp4"), Path::new("b.mp4"), 0.0, 1.5, &config)
            .build();

        assert_eq!(value_after(&args, "-c:v"), Some("libx264"));
        assert_eq!(value_after(&args, "-c:a"), Some("aac"));
        assert!(args.contains(&"0:v:0?".to_string()));
        assert!(args.contains(&"0:a:0?".to_string()));
        assert!(args.contains(&"-y".to_string()));
        assert!(!args.iter().any(|a| a == "copy"));
    }

    #[test]
    fn test_cut_command_threads_are_optional() {
        let mut config = EngineConfig::default();
        config.threads = None;
        let args = CutCommand::new(Path::new("a.mp4"), Path::new("b.mp4"), 0.0, 1.0, &config)
            .build();
        assert!(!args.contains(&"-threads".to_string()));

        config.threads = Some(6);
        let args = CutCommand::new(Path::new("a.mp4"), Path::new("b.mp4"), 0.0, 1.0, &config)
            .build();
        assert_eq!(value_after(&args, "-threads"), Some("6"));
    }

    #[test]
    fn test_frame_command() {
        let args = FrameCommand::new(Path::new("in.mp4"), Path::new("frame.png"), 1.25).build();
        assert_eq!(value_after(&args, "-ss"), Some("1.250"));
        assert_eq!(value_after(&args, "-frames:v"), Some("1"));
        assert_eq!(args.last().map(String::as_str), Some("frame.png"));
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0.0), "0.000");
        assert_eq!(format_seconds(12.3456), "12.346");
        assert_eq!(format_seconds(-1.0), "0.000");
        assert_eq!(format_seconds(0.001), "0.001");
    }
}
