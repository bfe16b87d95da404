use lazy_static::lazy_static;
use regex::{Captures, Regex};
use url::Url;

use super::LinePass;

lazy_static! {
    static ref LINK: Regex = Regex::new(r"https?://\S+").unwrap();
}

pub const LINK_STYLE: &str = "color: #3B82F6; text-decoration: underline;";

/// Replaces bare `http(s)://` links with an anchor labelled by the host name.
/// Links that do not parse, or have no host, are left as written.
#[derive(Debug, Default, Clone, Copy)]
pub struct UrlPass;

impl LinePass for UrlPass {
    fn name(&self) -> &str {
        "url"
    }

    fn process(&self, line: &str) -> String {
        LINK.replace_all(line, |caps: &Captures| {
            let link = &caps[0];
            match Url::parse(link).ok().and_then(|u| u.host_str().map(str::to_string)) {
                Some(host) => format!(
                    "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" style=\"{}\">{}</a>",
                    link, LINK_STYLE, host
                ),
                None => link.to_string(),
            }
        })
        .into_owned()
    }
}
