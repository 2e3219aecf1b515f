use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::form_urlencoded;

pub const QV_PARAM: &str = "qv";
pub const SSID_PARAM: &str = "ssid";

/// Canonical sharing route.
pub const SHARE_PATH: &str = "/share";
/// Route that turns an `ssid` back into the full parameter set.
pub const SESSION_PATH: &str = "/session";

const BASE_TITLE: &str = "Beautiful Mountain Landscape";
const BASE_DESCRIPTION: &str =
    "A stunning view of mountains at sunrise - share this beautiful image!";
const PATH_BASED_LABEL: &str = "Path-based";
const MISSING: &str = "none";

/// The parts of an incoming request needed to rebuild its literal URL.
#[derive(Debug, Clone, Copy)]
pub struct RequestTarget<'a> {
    /// `scheme://host[:port]` without a trailing slash.
    pub origin: &'a str,
    pub path: &'a str,
    pub raw_query: Option<&'a str>,
}

impl RequestTarget<'_> {
    pub fn raw_query(&self) -> &str {
        self.raw_query.unwrap_or_default()
    }

    /// The URL exactly as requested; the query string is not re-encoded.
    pub fn page_url(&self) -> String {
        match self.raw_query {
            Some(query) if !query.is_empty() => format!("{}{}?{query}", self.origin, self.path),
            _ => format!("{}{}", self.origin, self.path),
        }
    }
}

/// `qv` and `ssid` as extracted from a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareParams {
    pub qv: Option<String>,
    pub ssid: Option<String>,
}

impl ShareParams {
    /// Parse both parameters from a raw query string. Repeated parameters keep
    /// the last value; empty values count as absent.
    pub fn from_raw_query(raw_query: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(raw_query.as_bytes()) {
            match key.as_ref() {
                QV_PARAM => params.qv = Some(value.into_owned()),
                SSID_PARAM => params.ssid = Some(value.into_owned()),
                _ => {}
            }
        }
        params.qv = params.qv.filter(|value| !value.is_empty());
        params.ssid = params.ssid.filter(|value| !value.is_empty());
        params
    }

    fn annotation(&self) -> String {
        format!(
            "(qv={}, ssid={})",
            self.qv.as_deref().unwrap_or(MISSING),
            self.ssid.as_deref().unwrap_or(MISSING)
        )
    }
}

/// Which of the two parameters appears first in the literal query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamOrder {
    QvFirst,
    SsidFirst,
}

impl ParamOrder {
    /// Compare the first occurrences of the substrings `qv=` and `ssid=`.
    ///
    /// This is a plain substring search over the undecoded query, so `xqv=1`
    /// counts as a `qv` occurrence and percent-encoded keys do not. A
    /// parameter that never appears textually is ignored; `None` when neither
    /// appears.
    pub fn in_raw_query(raw_query: &str) -> Option<Self> {
        match (raw_query.find("qv="), raw_query.find("ssid=")) {
            (Some(qv), Some(ssid)) if qv < ssid => Some(Self::QvFirst),
            (Some(_), Some(_)) | (None, Some(_)) => Some(Self::SsidFirst),
            (Some(_), None) => Some(Self::QvFirst),
            (None, None) => None,
        }
    }
}

/// True only when both substrings are present and `qv=` comes first.
pub fn qv_precedes_ssid(raw_query: &str) -> bool {
    matches!(
        (raw_query.find("qv="), raw_query.find("ssid=")),
        (Some(qv), Some(ssid)) if qv < ssid
    )
}

#[derive(Debug, Error)]
#[error("unknown {kind} `{value}` (expected one of: {expected})")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

/// How the advertised `og:url` diverges from the page URL when both
/// parameters are present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MetadataPolicy {
    /// Advertise the share route with `qv` dropped.
    #[default]
    DropQv,
    /// Advertise the session-resolution route carrying only `ssid`.
    SessionEndpoint,
}

impl MetadataPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DropQv => "drop-qv",
            Self::SessionEndpoint => "session-endpoint",
        }
    }

    pub fn metadata_url(self, origin: &str, ssid: &str) -> String {
        let path = match self {
            Self::DropQv => SHARE_PATH,
            Self::SessionEndpoint => SESSION_PATH,
        };
        build_url(origin, path, [(SSID_PARAM, ssid)])
    }
}

impl fmt::Display for MetadataPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetadataPolicy {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "drop-qv" => Ok(Self::DropQv),
            "session-endpoint" => Ok(Self::SessionEndpoint),
            other => Err(UnknownVariant {
                kind: "metadata policy",
                value: other.to_string(),
                expected: "drop-qv, session-endpoint",
            }),
        }
    }
}

/// Whether the service keeps `ssid -> qv` mappings at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionResolution {
    #[default]
    Enabled,
    Disabled,
}

impl fmt::Display for SessionResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
        })
    }
}

impl FromStr for SessionResolution {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "enabled" => Ok(Self::Enabled),
            "disabled" => Ok(Self::Disabled),
            other => Err(UnknownVariant {
                kind: "session resolution mode",
                value: other.to_string(),
                expected: "enabled, disabled",
            }),
        }
    }
}

/// What the rendering layer should do with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingDecision {
    pub display_title: String,
    pub display_description: String,
    pub route_label: String,
    pub page_url: String,
    /// Advertised as `og:url`; may differ from `page_url` on purpose.
    pub metadata_url: String,
    /// When set, a meta-refresh document replaces the page.
    pub redirect_target: Option<String>,
}

/// Decision for requests that carry neither parameter, including `/`.
pub fn path_based(target: &RequestTarget<'_>) -> RoutingDecision {
    let page_url = target.page_url();
    RoutingDecision {
        display_title: BASE_TITLE.to_string(),
        display_description: BASE_DESCRIPTION.to_string(),
        route_label: PATH_BASED_LABEL.to_string(),
        metadata_url: page_url.clone(),
        page_url,
        redirect_target: None,
    }
}

/// Decide how to render a share request. Pure; persisting the mapping is the
/// caller's job.
pub fn decide_share(
    target: &RequestTarget<'_>,
    params: &ShareParams,
    policy: MetadataPolicy,
) -> RoutingDecision {
    let (metadata_url, redirect_target) = match (params.qv.as_deref(), params.ssid.as_deref()) {
        (None, None) => return path_based(target),
        (Some(qv), None) => (build_url(target.origin, SHARE_PATH, [(QV_PARAM, qv)]), None),
        (None, Some(ssid)) => (
            build_url(target.origin, SHARE_PATH, [(SSID_PARAM, ssid)]),
            None,
        ),
        (Some(qv), Some(ssid)) => {
            let redirect_target = qv_precedes_ssid(target.raw_query()).then(|| {
                build_url(target.origin, target.path, [(SSID_PARAM, ssid), (QV_PARAM, qv)])
            });
            (policy.metadata_url(target.origin, ssid), redirect_target)
        }
    };

    let annotation = params.annotation();
    RoutingDecision {
        display_title: format!("{BASE_TITLE} {annotation}"),
        display_description: format!("{BASE_DESCRIPTION} {annotation}"),
        route_label: format!("Query Parameters {annotation}"),
        page_url: target.page_url(),
        metadata_url,
        redirect_target,
    }
}

/// Build the redirect issued by the session-resolution route.
///
/// Parameters are emitted in the opposite textual order to the one they
/// arrived in on `raw_query`; absent values are left out.
pub fn session_redirect(
    origin: &str,
    raw_query: &str,
    qv: Option<&str>,
    ssid: Option<&str>,
) -> String {
    let ordered = match ParamOrder::in_raw_query(raw_query) {
        Some(ParamOrder::QvFirst) => [(SSID_PARAM, ssid), (QV_PARAM, qv)],
        Some(ParamOrder::SsidFirst) | None => [(QV_PARAM, qv), (SSID_PARAM, ssid)],
    };
    build_url(
        origin,
        SHARE_PATH,
        ordered
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| (key, value))),
    )
}

/// Join origin, path, and form-encoded pairs in the given order.
pub fn build_url<'a>(
    origin: &str,
    path: &str,
    pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.extend_pairs(pairs);
    let query = serializer.finish();
    if query.is_empty() {
        format!("{origin}{path}")
    } else {
        format!("{origin}{path}?{query}")
    }
}
