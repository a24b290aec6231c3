use bytes::Bytes;

const DEFAULT_CONTENT_TYPE: &str = "audio/webm";
const DEFAULT_STEM: &str = "audio";

/// A recorded utterance uploaded for evaluation
///
/// Owned by a single request and dropped once transcription has consumed it.
#[derive(Debug, Clone)]
pub struct AudioPayload {
    /// Raw encoded audio
    pub data: Bytes,
    /// Declared MIME type, e.g. `audio/webm`
    pub content_type: String,
    /// Filename forwarded to the transcription provider
    pub filename: String,
}

impl AudioPayload {
    /// Wrap uploaded bytes, falling back to browser-recorder defaults for
    /// missing metadata
    ///
    /// The transcription API picks the decoder from the file extension, so a
    /// filename without one is replaced by `audio.<ext>` for the content type.
    pub fn new(data: impl Into<Bytes>, content_type: Option<&str>, filename: Option<&str>) -> Self {
        let content_type = content_type
            .map(str::trim)
            .filter(|ct| !ct.is_empty() && *ct != "application/octet-stream")
            .unwrap_or(DEFAULT_CONTENT_TYPE);

        let filename = filename
            .map(str::trim)
            .filter(|name| has_extension(name))
            .map_or_else(|| format!("{DEFAULT_STEM}.{}", extension_for(content_type)), str::to_owned);

        Self {
            data: data.into(),
            content_type: content_type.to_owned(),
            filename,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

fn has_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && !ext.is_empty())
}

/// File extension the transcription API expects for a MIME type
fn extension_for(content_type: &str) -> &'static str {
    let essence = content_type.split(';').next().unwrap_or_default().trim();

    match essence {
        "audio/ogg" | "audio/opus" => "ogg",
        "audio/mpeg" | "audio/mp3" => "mp3",
        "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
        "audio/mp4" | "audio/m4a" | "audio/x-m4a" => "m4a",
        "audio/flac" | "audio/x-flac" => "flac",
        _ => "webm",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_declared_metadata() {
        let audio = AudioPayload::new(vec![1, 2, 3], Some("audio/ogg"), Some("take-2.ogg"));

        assert_eq!(audio.content_type, "audio/ogg");
        assert_eq!(audio.filename, "take-2.ogg");
        assert_eq!(audio.len(), 3);
    }

    #[test]
    fn browser_blob_gets_recorder_defaults() {
        let audio = AudioPayload::new(Bytes::from_static(b"\x1a\x45"), Some("application/octet-stream"), Some("blob"));

        assert_eq!(audio.content_type, "audio/webm");
        assert_eq!(audio.filename, "audio.webm");
    }

    #[test]
    fn filename_without_extension_is_named_from_content_type() {
        let audio = AudioPayload::new(vec![1], Some("audio/mpeg"), Some("recording"));
        assert_eq!(audio.filename, "audio.mp3");

        let audio = AudioPayload::new(vec![1], Some("audio/webm;codecs=opus"), Some(".webm"));
        assert_eq!(audio.filename, "audio.webm");

        let audio = AudioPayload::new(vec![1], None, None);
        assert_eq!(audio.filename, "audio.webm");
    }

    #[test]
    fn empty_upload_is_reported() {
        assert!(AudioPayload::new(Vec::new(), None, None).is_empty());
    }
}
