use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;

/// An image sent by a client, encoded as a `data:` URL, for example
/// `data:image/png;base64,iVBORw0KGgo...`.
///
/// The raw URL is kept, since the vision API accepts it as is, next to
/// the decoded bytes, which are fed to the local OCR engine.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageDataUrl {
    raw: String,
    media_type: String,
    bytes: Vec<u8>,
}

#[derive(Debug)]
pub enum ImageError {
    Scheme { context: String },
    MediaType { context: String },
    Encoding { context: String },
    Decoding {
        context: String,
        source: base64::DecodeError,
    },
    Empty { context: String },
}

impl fmt::Display for ImageError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Scheme { context } => write!(fmt, "Invalid scheme: {context}"),
            ImageError::MediaType { context } => write!(fmt, "Invalid media type: {context}"),
            ImageError::Encoding { context } => write!(fmt, "Invalid encoding: {context}"),
            ImageError::Decoding { context, source } => {
                write!(fmt, "Invalid payload: {context} | {source}")
            }
            ImageError::Empty { context } => write!(fmt, "Empty image: {context}"),
        }
    }
}

impl std::error::Error for ImageError {}

impl ImageDataUrl {
    /// Returns an `ImageDataUrl` if the input is a base64 `data:` URL with an
    /// `image/*` media type and a non empty payload.
    pub fn parse(s: String) -> Result<ImageDataUrl, ImageError> {
        let raw = s.trim();
        // Schemes are case insensitive.
        let rest = raw
            .get(..5)
            .filter(|scheme| scheme.eq_ignore_ascii_case("data:"))
            .map(|_| &raw[5..])
            .ok_or_else(|| ImageError::Scheme {
                context: "expected a 'data:' URL".to_string(),
            })?;

        let (header, payload) = rest.split_once(',').ok_or_else(|| ImageError::Encoding {
            context: "missing ',' between header and payload".to_string(),
        })?;

        let media_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| ImageError::Encoding {
                context: format!("expected base64 encoding, got '{header}'"),
            })?
            // Parameters such as charset are irrelevant for images.
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if !media_type.starts_with("image/") || media_type.len() == "image/".len() {
            return Err(ImageError::MediaType {
                context: format!("expected an image, got '{media_type}'"),
            });
        }

        // Browsers never wrap, but a pasted URL might have been.
        let payload: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = STANDARD
            .decode(payload.as_bytes())
            .map_err(|err| ImageError::Decoding {
                context: "payload is not valid base64".to_string(),
                source: err,
            })?;

        if bytes.is_empty() {
            return Err(ImageError::Empty {
                context: "the image payload has no data".to_string(),
            });
        }

        Ok(ImageDataUrl {
            raw: raw.to_string(),
            media_type,
            bytes,
        })
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl TryFrom<String> for ImageDataUrl {
    type Error = ImageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ImageDataUrl::parse(value)
    }
}

impl AsRef<str> for ImageDataUrl {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

// The payload can weigh megabytes, keep logs readable.
impl fmt::Debug for ImageDataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageDataUrl")
            .field("media_type", &self.media_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}
