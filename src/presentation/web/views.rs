use crate::domain::routing::RoutingDecision;

/// Everything the share page template displays.
#[derive(Debug, Clone)]
pub struct SharePageView {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub page_url: String,
    pub og_url: String,
    pub route_label: String,
    pub og_url_diverges: bool,
}

impl SharePageView {
    pub fn from_decision(decision: RoutingDecision, image_url: String) -> Self {
        Self {
            og_url_diverges: decision.metadata_url != decision.page_url,
            title: decision.display_title,
            description: decision.display_description,
            image_url,
            page_url: decision.page_url,
            og_url: decision.metadata_url,
            route_label: decision.route_label,
        }
    }
}
