//! Attachments

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{de::Error as _, Deserialize, Deserializer};

/// A file to attach to a message.
///
/// Deserializes from descriptors such as
/// `{"type": "url", "data": "/tmp/invoice.pdf"}` or
/// `{"type": "data", "data": "raw contents", "filename": "notes.txt"}`.
/// Binary `data` is given as `{"base64": "..."}` or as an array of bytes.
/// A missing `filename` or `mime_type` is left as `None` and defaulted by the
/// transport.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Attachment {
    /// A local path, `file://` URL or `http(s)://` URL
    Url {
        /// Where to load the file from
        #[serde(rename = "data")]
        path: String,

        /// Name to give the attachment
        #[serde(default)]
        filename: Option<String>,

        /// MIME type, guessed from the path when unset
        #[serde(default)]
        mime_type: Option<String>,
    },

    /// Raw file contents
    Data {
        /// The file contents
        #[serde(deserialize_with = "bytes_from_data")]
        data: Vec<u8>,

        /// Name to give the attachment
        #[serde(default)]
        filename: Option<String>,

        /// MIME type
        #[serde(default)]
        mime_type: Option<String>,
    },
}

impl Attachment {
    /// Attach a file from a path or URL
    pub fn url(path: impl Into<String>) -> Self {
        Self::Url {
            path: path.into(),
            filename: None,
            mime_type: None,
        }
    }

    /// Attach raw bytes
    pub fn data(data: impl Into<Vec<u8>>) -> Self {
        Self::Data {
            data: data.into(),
            filename: None,
            mime_type: None,
        }
    }

    /// Sets the attachment's filename
    pub fn with_filename(mut self, name: impl Into<String>) -> Self {
        match &mut self {
            Self::Url { filename, .. } | Self::Data { filename, .. } => {
                *filename = Some(name.into())
            }
        }
        self
    }

    /// Sets the attachment's MIME type
    pub fn with_mime_type(mut self, mime: impl Into<String>) -> Self {
        match &mut self {
            Self::Url { mime_type, .. } | Self::Data { mime_type, .. } => {
                *mime_type = Some(mime.into())
            }
        }
        self
    }

    /// The filename, if one was given
    pub fn filename(&self) -> Option<&str> {
        match self {
            Self::Url { filename, .. } | Self::Data { filename, .. } => filename.as_deref(),
        }
    }

    /// The MIME type, if one was given
    pub fn mime_type(&self) -> Option<&str> {
        match self {
            Self::Url { mime_type, .. } | Self::Data { mime_type, .. } => mime_type.as_deref(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DataField {
    Text(String),
    Bytes(Vec<u8>),
    Base64 { base64: String },
}

fn bytes_from_data<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    match DataField::deserialize(deserializer)? {
        DataField::Text(text) => Ok(text.into_bytes()),
        DataField::Bytes(bytes) => Ok(bytes),
        DataField::Base64 { base64 } => STANDARD
            .decode(base64)
            .map_err(|err| D::Error::custom(format!("invalid base64 attachment data: {}", err))),
    }
}
