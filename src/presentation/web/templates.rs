use askama::Template;

use super::views::SharePageView;
use crate::VersionInfo;

#[derive(Template)]
#[template(path = "pages/share.html")]
pub struct SharePageTemplate {
    pub version_info: &'static VersionInfo,
    pub page: SharePageView,
}

/// Client-side redirect document. Replaces the share page entirely, so it
/// carries no Open Graph tags of its own.
#[derive(Template)]
#[template(path = "pages/redirect.html")]
pub struct RedirectTemplate {
    pub version_info: &'static VersionInfo,
    pub target: String,
}

pub fn render_template<T: Template>(template: T) -> Result<String, askama::Error> {
    template.render()
}
