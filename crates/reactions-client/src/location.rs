//! Page URL parsing

use reactions_common::{ReactionsError, ReactionsResult};
use reactions_core::{TopicId, UserInfo};
use reqwest::Url;

/// The address of the page hosting the widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    url: Url,
}

impl PageLocation {
    pub fn parse(href: &str) -> ReactionsResult<Self> {
        let url = Url::parse(href)
            .map_err(|e| ReactionsError::validation(format!("invalid page url '{href}': {e}")))?;
        Ok(Self { url })
    }

    /// Scheme, host and port, sent as `forumUrl` on every read
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    /// Topic shown on the page: `showtopic=<id>`, or `t=<id>` under `act=ST`
    pub fn topic_id(&self) -> Option<TopicId> {
        if let Some(id) = self.query_param("showtopic").filter(|v| !v.is_empty()) {
            return Some(TopicId::new(id));
        }
        if self.query_param("act").as_deref() == Some("ST") {
            return self
                .query_param("t")
                .filter(|v| !v.is_empty())
                .map(TopicId::new);
        }
        None
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

/// Resolves the viewer from the href of their profile link
/// (`...?showuser=<id>`). Guests have no such link, or a non-numeric id.
pub fn user_from_profile_link(href: &str) -> Option<UserInfo> {
    let url = Url::parse(href).ok()?;
    let id = url
        .query_pairs()
        .find(|(key, _)| key == "showuser")
        .map(|(_, value)| value.into_owned())?;
    id.parse::<u64>().ok().map(UserInfo::new)
}
