//! Attachment loading

use lettre::message::{header::ContentType, Attachment as AttachmentPart, SinglePart};

use crate::domain::communication::mailer::{Attachment, MailerError};

const DEFAULT_FILENAME: &str = "attachment";
const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Loads an attachment's contents and fills in its filename and MIME type
pub async fn resolve(attachment: &Attachment) -> Result<SinglePart, MailerError> {
    let (filename, mime_type, content) = match attachment {
        Attachment::Url {
            path,
            filename,
            mime_type,
        } => {
            let content = load(path).await?;
            let filename = filename.clone().unwrap_or_else(|| file_name(path));
            let mime_type = mime_type
                .clone()
                .unwrap_or_else(|| guess_mime_type(path, &filename));

            (filename, mime_type, content)
        }
        Attachment::Data {
            data,
            filename,
            mime_type,
        } => (
            filename.clone().unwrap_or_else(|| DEFAULT_FILENAME.to_string()),
            mime_type
                .clone()
                .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string()),
            data.clone(),
        ),
    };

    let content_type = ContentType::parse(&mime_type)
        .map_err(|_| MailerError::InvalidAttachment(format!("invalid MIME type {}", mime_type)))?;

    Ok(AttachmentPart::new(filename).body(content, content_type))
}

async fn load(path: &str) -> Result<Vec<u8>, MailerError> {
    if path.starts_with("http://") || path.starts_with("https://") {
        let response = reqwest::get(path)
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| MailerError::InvalidAttachment(format!("{}: {}", path, err)))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|err| MailerError::InvalidAttachment(format!("{}: {}", path, err)))?;

        return Ok(bytes.to_vec());
    }

    let local = path.strip_prefix("file://").unwrap_or(path);

    tokio::fs::read(local)
        .await
        .map_err(|err| MailerError::InvalidAttachment(format!("{}: {}", local, err)))
}

/// Guesses from the path, then from the attachment's filename
fn guess_mime_type(path: &str, filename: &str) -> String {
    mime_guess::from_path(without_query(path))
        .first()
        .or_else(|| mime_guess::from_path(filename).first())
        .map_or_else(|| DEFAULT_MIME_TYPE.to_string(), |mime| mime.to_string())
}

fn without_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

/// The last segment of a path or URL, ignoring any query string
fn file_name(path: &str) -> String {
    without_query(path)
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(DEFAULT_FILENAME)
        .to_string()
}
