//! MIME category and status group classification.

use strum_macros::EnumIter as EnumIterMacro;

/// Coarse, closed set of content-type categories.
///
/// Declaration order is the row order of the MIME grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
#[allow(missing_docs)] // Variant names match their labels
pub enum MimeCategory {
    Html,
    Image,
    Css,
    JavaScript,
    Json,
    Xml,
    Text,
    Pdf,
    Font,
    Audio,
    Video,
    Revisit,
    Other,
}

impl MimeCategory {
    /// Display label, also the grid row key.
    pub fn as_str(&self) -> &'static str {
        match self {
            MimeCategory::Html => "HTML",
            MimeCategory::Image => "Image",
            MimeCategory::Css => "CSS",
            MimeCategory::JavaScript => "JavaScript",
            MimeCategory::Json => "JSON",
            MimeCategory::Xml => "XML",
            MimeCategory::Text => "Text",
            MimeCategory::Pdf => "PDF",
            MimeCategory::Font => "Font",
            MimeCategory::Audio => "Audio",
            MimeCategory::Video => "Video",
            MimeCategory::Revisit => "Revisit",
            MimeCategory::Other => "Other",
        }
    }

    fn from_part(part: &str) -> Option<Self> {
        let category = match part {
            "html" => MimeCategory::Html,
            "image" => MimeCategory::Image,
            "css" => MimeCategory::Css,
            "javascript" => MimeCategory::JavaScript,
            "json" => MimeCategory::Json,
            "xml" => MimeCategory::Xml,
            "plain" => MimeCategory::Text,
            "pdf" => MimeCategory::Pdf,
            "font" => MimeCategory::Font,
            "audio" => MimeCategory::Audio,
            "video" => MimeCategory::Video,
            "revisit" => MimeCategory::Revisit,
            "other" => MimeCategory::Other,
            _ => return None,
        };
        Some(category)
    }

    /// Classifies a raw MIME string.
    ///
    /// The subtype is looked up before the type; unmatched `xhtml*` subtypes
    /// are HTML and `*+xml` / `xml-*` subtypes are XML.
    pub fn classify(mime: &str) -> Self {
        let mime = mime.to_lowercase();
        let (group, subtype) = mime.split_once('/').unwrap_or((mime.as_str(), ""));
        if let Some(category) = Self::from_part(subtype).or_else(|| Self::from_part(group)) {
            return category;
        }
        if subtype.starts_with("xhtml") {
            return MimeCategory::Html;
        }
        if subtype.ends_with("+xml") || subtype.starts_with("xml-") {
            return MimeCategory::Xml;
        }
        MimeCategory::Other
    }
}

impl std::fmt::Display for MimeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP status hundreds-group.
///
/// Declaration order is the column order of the MIME grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum StatusGroup {
    /// 2XX
    Success,
    /// 3XX
    Redirection,
    /// 4XX
    ClientError,
    /// 5XX
    ServerError,
    /// `-`, anything outside 200-599, or not three digits
    Other,
}

impl StatusGroup {
    /// Display label, also the grid column key.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusGroup::Success => "2XX",
            StatusGroup::Redirection => "3XX",
            StatusGroup::ClientError => "4XX",
            StatusGroup::ServerError => "5XX",
            StatusGroup::Other => "Other",
        }
    }

    /// Classifies a raw status code.
    pub fn classify(code: &str) -> Self {
        let three_digits = code.len() == 3 && code.bytes().all(|b| b.is_ascii_digit());
        if !three_digits || code < "200" || code >= "600" {
            return StatusGroup::Other;
        }
        match code.as_bytes()[0] {
            b'2' => StatusGroup::Success,
            b'3' => StatusGroup::Redirection,
            b'4' => StatusGroup::ClientError,
            _ => StatusGroup::ServerError,
        }
    }
}

impl std::fmt::Display for StatusGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
