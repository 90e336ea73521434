//! ffmpeg command options builder.
//!
//! Renders an `OperationDescriptor` into argv tokens for ffmpeg:
//! a `join` filter graph for merges, `channelsplit` for splits and
//! conforms, plain re-encode flags for converts. Rendering is pure;
//! executing the tokens is the caller's responsibility.

use std::path::Path;

use crate::descriptor::{
    ConformDescriptor, ConvertDescriptor, MergeDescriptor, OperationDescriptor, SplitDescriptor,
};

/// Builder for ffmpeg command-line tokens.
///
/// Output files are placed under `out_dir` using the descriptor's
/// output names. Existing files are overwritten (`-y`), matching the
/// engine contract.
pub struct FfmpegArgsBuilder<'a> {
    out_dir: &'a Path,
}

impl<'a> FfmpegArgsBuilder<'a> {
    /// Create a builder targeting an output directory.
    pub fn new(out_dir: &'a Path) -> Self {
        Self { out_dir }
    }

    /// Build the argv tokens for one descriptor (without the ffmpeg
    /// program name itself).
    pub fn build(&self, descriptor: &OperationDescriptor) -> Vec<String> {
        match descriptor {
            OperationDescriptor::Merge(d) => self.build_merge(d),
            OperationDescriptor::Split(d) => self.build_split(d),
            OperationDescriptor::Conform(d) => self.build_conform(d),
            OperationDescriptor::Convert(d) => self.build_convert(d),
        }
    }

    fn out_path(&self, file_name: &str) -> String {
        path_token(&self.out_dir.join(file_name))
    }

    fn build_merge(&self, d: &MergeDescriptor) -> Vec<String> {
        let mut tokens = Vec::new();

        for input in &d.inputs {
            tokens.push("-i".to_string());
            tokens.push(path_token(input));
        }
        tokens.push("-y".to_string());

        // "[0:a][1:a]...join=inputs=N:channel_layout=L:map=0.0-FL|..."
        let input_labels: String = (0..d.inputs.len()).map(|i| format!("[{}:a]", i)).collect();
        let map: Vec<String> = d
            .channel_map
            .iter()
            .map(|entry| format!("{}.0-{}", entry.index, entry.role))
            .collect();

        tokens.push("-filter_complex".to_string());
        tokens.push(format!(
            "{}join=inputs={}:channel_layout={}:map={}[a]",
            input_labels,
            d.inputs.len(),
            d.layout,
            map.join("|")
        ));

        tokens.push("-map".to_string());
        tokens.push("[a]".to_string());
        tokens.push(self.out_path(&d.output_name));

        tokens
    }

    fn build_split(&self, d: &SplitDescriptor) -> Vec<String> {
        let mut tokens = vec!["-i".to_string(), path_token(&d.input), "-y".to_string()];

        let output_labels: String = (0..d.outputs.len()).map(|i| format!("[{}]", i)).collect();
        tokens.push("-filter_complex".to_string());
        tokens.push(format!(
            "channelsplit=channel_layout={}{}",
            d.layout, output_labels
        ));

        for output in &d.outputs {
            tokens.push("-map".to_string());
            tokens.push(format!("[{}]", output.channel));
            tokens.push(self.out_path(&output.file_name));
        }

        tokens
    }

    fn build_conform(&self, d: &ConformDescriptor) -> Vec<String> {
        let mut tokens = vec!["-i".to_string(), path_token(&d.input), "-y".to_string()];

        let output_labels: String =
            (0..d.channel_map.len()).map(|i| format!("[{}]", i)).collect();
        tokens.push("-filter_complex".to_string());
        tokens.push(format!(
            "[0:a]channelsplit=channel_layout={}{}",
            d.layout, output_labels
        ));

        for entry in &d.channel_map {
            tokens.push("-map".to_string());
            tokens.push(format!("[{}]", entry.index));
        }

        tokens.push("-c:a".to_string());
        tokens.push(d.codec.clone());
        tokens.push("-ar".to_string());
        tokens.push(d.sample_rate.to_string());
        tokens.push("-disposition:a".to_string());
        tokens.push("+default".to_string());

        tokens.push("-metadata".to_string());
        tokens.push(format!("title={}", d.title));
        for (i, stream_title) in d.stream_titles.iter().enumerate() {
            tokens.push(format!("-metadata:s:a:{}", i));
            tokens.push(format!("title={}", stream_title));
        }

        tokens.push(self.out_path(&d.output_name));
        tokens
    }

    fn build_convert(&self, d: &ConvertDescriptor) -> Vec<String> {
        vec![
            "-i".to_string(),
            path_token(&d.input),
            "-y".to_string(),
            "-ar".to_string(),
            d.sample_rate.to_string(),
            "-c:a".to_string(),
            d.codec.clone(),
            self.out_path(&d.output_name),
        ]
    }
}

fn path_token(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ChannelMapEntry, SplitOutput};
    use std::path::PathBuf;

    fn stereo_map() -> Vec<ChannelMapEntry> {
        vec![
            ChannelMapEntry {
                index: 0,
                role: "FL".to_string(),
                smpte: "L".to_string(),
            },
            ChannelMapEntry {
                index: 1,
                role: "FR".to_string(),
                smpte: "R".to_string(),
            },
        ]
    }

    #[test]
    fn merge_renders_join_filter() {
        let descriptor = OperationDescriptor::Merge(MergeDescriptor {
            inputs: vec![PathBuf::from("/in/track.L.wav"), PathBuf::from("/in/track.R.wav")],
            layout: "stereo".to_string(),
            channel_map: stereo_map(),
            output_name: "track.wav".to_string(),
        });

        let tokens = FfmpegArgsBuilder::new(Path::new("/out")).build(&descriptor);

        assert_eq!(tokens[0], "-i");
        assert_eq!(tokens[1], "/in/track.L.wav");
        assert_eq!(tokens[2], "-i");
        assert_eq!(tokens[3], "/in/track.R.wav");
        assert!(tokens.contains(&"-y".to_string()));

        let filter_pos = tokens.iter().position(|t| t == "-filter_complex").unwrap();
        assert_eq!(
            tokens[filter_pos + 1],
            "[0:a][1:a]join=inputs=2:channel_layout=stereo:map=0.0-FL|1.0-FR[a]"
        );
        assert_eq!(tokens.last().unwrap(), "/out/track.wav");
    }

    #[test]
    fn split_maps_each_channel_to_a_file() {
        let descriptor = OperationDescriptor::Split(SplitDescriptor {
            input: PathBuf::from("/in/mix.wav"),
            layout: "stereo".to_string(),
            outputs: vec![
                SplitOutput {
                    channel: 0,
                    token: "L".to_string(),
                    file_name: "mix.L.wav".to_string(),
                },
                SplitOutput {
                    channel: 1,
                    token: "R".to_string(),
                    file_name: "mix.R.wav".to_string(),
                },
            ],
        });

        let tokens = FfmpegArgsBuilder::new(Path::new("/out")).build(&descriptor);

        let filter_pos = tokens.iter().position(|t| t == "-filter_complex").unwrap();
        assert_eq!(
            tokens[filter_pos + 1],
            "channelsplit=channel_layout=stereo[0][1]"
        );
        assert!(tokens.contains(&"/out/mix.L.wav".to_string()));
        assert!(tokens.contains(&"/out/mix.R.wav".to_string()));
    }

    #[test]
    fn conform_sets_targets_and_titles() {
        let descriptor = OperationDescriptor::Conform(ConformDescriptor {
            input: PathBuf::from("/in/stem.wav"),
            layout: "stereo".to_string(),
            channel_map: stereo_map(),
            sample_rate: 48_000,
            codec: "pcm_s24le".to_string(),
            container: "mov".to_string(),
            title: "stem".to_string(),
            stream_titles: vec!["stem.L".to_string(), "stem.R".to_string()],
            output_name: "stem.mov".to_string(),
        });

        let tokens = FfmpegArgsBuilder::new(Path::new("/out")).build(&descriptor);
        let joined = tokens.join(" ");

        assert!(joined.contains("-c:a pcm_s24le"));
        assert!(joined.contains("-ar 48000"));
        assert!(joined.contains("-disposition:a +default"));
        assert!(joined.contains("-metadata title=stem"));
        assert!(joined.contains("-metadata:s:a:0 title=stem.L"));
        assert!(joined.contains("-metadata:s:a:1 title=stem.R"));
        assert_eq!(tokens.last().unwrap(), "/out/stem.mov");
    }

    #[test]
    fn convert_is_a_plain_reencode() {
        let descriptor = OperationDescriptor::Convert(ConvertDescriptor {
            input: PathBuf::from("/in/voice.mp3"),
            container: "wav".to_string(),
            sample_rate: 48_000,
            codec: "pcm_s24le".to_string(),
            output_name: "voice.wav".to_string(),
        });

        let tokens = FfmpegArgsBuilder::new(Path::new("/out")).build(&descriptor);
        assert_eq!(
            tokens,
            vec![
                "-i",
                "/in/voice.mp3",
                "-y",
                "-ar",
                "48000",
                "-c:a",
                "pcm_s24le",
                "/out/voice.wav",
            ]
        );
    }

    #[test]
    fn rendering_is_idempotent() {
        let descriptor = OperationDescriptor::Convert(ConvertDescriptor {
            input: PathBuf::from("/in/a.wav"),
            container: "wav".to_string(),
            sample_rate: 48_000,
            codec: "pcm_s24le".to_string(),
            output_name: "a.wav".to_string(),
        });

        let builder = FfmpegArgsBuilder::new(Path::new("/out"));
        assert_eq!(builder.build(&descriptor), builder.build(&descriptor));
    }
}
