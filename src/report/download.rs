use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;

/// Rendered documents are offered as opaque binary downloads.
pub const MIME_TYPE: &str = "application/octet-stream";

/// A rendered document ready to be offered to the user.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Download {
    filename: String,
    link_text: String,
    #[serde(skip)]
    bytes: Vec<u8>,
}

impl Download {
    pub fn new(filename: impl Into<String>, link_text: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            link_text: link_text.into(),
            bytes,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn mime_type(&self) -> &'static str {
        MIME_TYPE
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// The document encoded with standard, padded base64.
    pub fn base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// A `data:` URI that carries the whole document.
    pub fn href(&self) -> String {
        format!("data:{MIME_TYPE};base64,{}", self.base64())
    }

    /// An HTML anchor that downloads the document under its filename when clicked.
    pub fn anchor(&self) -> String {
        format!(
            "<a href=\"{}\" download=\"{}\">{}</a>",
            self.href(),
            self.filename,
            self.link_text
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_href_and_anchor() {
        let download = Download::new(
            "Self_Investment_Summary.pdf",
            "📥 Download PDF",
            b"%PDF".to_vec(),
        );
        assert_eq!(download.base64(), "JVBERg==");
        assert_eq!(download.href(), "data:application/octet-stream;base64,JVBERg==");
        assert_eq!(
            download.anchor(),
            "<a href=\"data:application/octet-stream;base64,JVBERg==\" \
            download=\"Self_Investment_Summary.pdf\">📥 Download PDF</a>"
        );
    }

    #[test]
    fn test_base64_decodes_to_bytes() {
        let bytes: Vec<u8> = (0..=255).collect();
        let download = Download::new("x.pdf", "x", bytes.clone());
        assert_eq!(STANDARD.decode(download.base64()).unwrap(), bytes);
    }
}
