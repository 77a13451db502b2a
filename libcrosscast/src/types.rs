//! Core types for Crosscast

use serde::{Deserialize, Serialize};

/// The structural-validation error message returned for a malformed or
/// incomplete publish request. The gateway returns it verbatim with HTTP 400.
pub const MISSING_REQUIRED_FIELDS: &str =
    "Missing required fields: content, platforms, user_id";

/// One incoming publish request, as posted to the gateway.
///
/// All fields default on deserialization so an incomplete body still parses;
/// required-field validation happens in the dispatcher, which rejects the
/// whole request before any adapter is invoked.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublishRequest {
    #[serde(default)]
    pub content: String,

    /// Requested platform identifiers, case-insensitive, in caller order.
    #[serde(default)]
    pub platforms: Vec<String>,

    /// Opaque caller identity. Trusted from the payload; see DESIGN.md.
    #[serde(default)]
    pub user_id: String,

    /// Publicly fetchable image URL to attach, where the platform supports it.
    #[serde(default, rename = "mediaUrl")]
    pub media_url: Option<String>,

    /// URL to attach to the post.
    #[serde(default)]
    pub link: Option<String>,

    /// Hashtags to append to the content, in input order. A leading `#` is
    /// added to any tag that lacks one.
    #[serde(default)]
    pub hashtags: Vec<String>,
}

impl PublishRequest {
    /// Content with hashtags appended, space-separated, in input order.
    ///
    /// Pure function of the request; with no hashtags the content is
    /// returned unchanged, so normalizing twice is a no-op.
    pub fn normalized_content(&self) -> String {
        if self.hashtags.is_empty() {
            return self.content.clone();
        }

        let mut out = self.content.clone();
        for tag in &self.hashtags {
            out.push(' ');
            if tag.starts_with('#') {
                out.push_str(tag);
            } else {
                out.push('#');
                out.push_str(tag);
            }
        }
        out
    }

    /// True when all structurally required fields are present and non-empty.
    pub fn has_required_fields(&self) -> bool {
        !self.content.is_empty() && !self.platforms.is_empty() && !self.user_id.is_empty()
    }
}

/// The set of platforms the gateway can publish to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformId {
    Twitter,
    Facebook,
    Instagram,
    LinkedIn,
    Pinterest,
}

impl PlatformId {
    pub const ALL: [PlatformId; 5] = [
        PlatformId::Twitter,
        PlatformId::Facebook,
        PlatformId::Instagram,
        PlatformId::LinkedIn,
        PlatformId::Pinterest,
    ];

    /// Parse a caller-supplied identifier, case-insensitively.
    ///
    /// `"x"` routes to Twitter. Returns `None` for anything outside the
    /// known set; the dispatcher turns that into a synthesized failure
    /// without attempting any network call.
    pub fn parse(identifier: &str) -> Option<Self> {
        match identifier.to_ascii_lowercase().as_str() {
            "twitter" | "x" => Some(PlatformId::Twitter),
            "facebook" => Some(PlatformId::Facebook),
            "instagram" => Some(PlatformId::Instagram),
            "linkedin" => Some(PlatformId::LinkedIn),
            "pinterest" => Some(PlatformId::Pinterest),
            _ => None,
        }
    }

    /// Display identifier used in results, regardless of the alias or case
    /// the caller used in the request.
    pub fn canonical_name(&self) -> &'static str {
        match self {
            PlatformId::Twitter => "Twitter",
            PlatformId::Facebook => "Facebook",
            PlatformId::Instagram => "Instagram",
            PlatformId::LinkedIn => "LinkedIn",
            PlatformId::Pinterest => "Pinterest",
        }
    }
}

impl std::fmt::Display for PlatformId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical_name())
    }
}

/// The outcome record for one platform within one dispatch.
///
/// Exactly one of `data` and `error` is populated, matching `success`.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformResult {
    pub platform: String,
    pub success: bool,

    /// Opaque success payload from the platform API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlatformResult {
    pub fn ok(platform: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            platform: platform.into(),
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(platform: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Aggregated report for one dispatch.
///
/// `success` means the request was well-formed and the dispatch ran; the
/// real per-platform outcomes are only inside `results`.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchReport {
    pub success: bool,
    pub results: Vec<PlatformResult>,
    pub message: String,
}
