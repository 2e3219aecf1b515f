use std::fmt::Write;

/// User agents of the link-preview crawlers the service is meant to be
/// fetched by, paired with the label used in `robots.txt`.
pub const SOCIAL_CRAWLERS: &[(&str, &str)] = &[
    ("Facebook", "facebookexternalhit/1.1"),
    ("Twitter", "Twitterbot"),
    ("LinkedIn", "LinkedInBot"),
    ("Pinterest", "Pinterestbot"),
    ("WhatsApp", "WhatsApp"),
    ("Telegram", "TelegramBot"),
    ("Slack", "Slackbot"),
];

/// User agent the probe client sends unless told otherwise.
pub const DEFAULT_PROBE_USER_AGENT: &str = "facebookexternalhit/1.1";

/// Render `robots.txt`: everything is disallowed except the social crawlers.
pub fn robots_txt() -> String {
    let mut body = String::from("User-agent: *\nDisallow: /\n");
    for (label, agent) in SOCIAL_CRAWLERS {
        // Writing into a String cannot fail.
        let _ = write!(
            body,
            "\n# Allow {label} crawler\nUser-agent: {agent}\nAllow: /\n"
        );
    }
    body
}
