use serde::Deserialize;

use crate::localization::Localization;

use super::model::{Comment, Paper};

const DOI_RESOLVER: &str = "https://doi.org/";

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    #[default]
    Url,
    Doi,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextLink {
    pub address: String,
    pub is_doi: bool,
}

/// PDF preview address; only open-access papers have one.
pub fn get_paper_preview_link(paper: &Paper) -> Option<String> {
    if !paper.oa {
        return None;
    }

    paper
        .link
        .as_deref()
        .map(str::trim)
        .filter(|link| !link.is_empty())
        .map(str::to_owned)
}

pub fn get_paper_keywords(paper: &Paper, localization: &Localization) -> String {
    if paper.keywords.is_empty() {
        return localization.no_keywords.clone();
    }

    paper.keywords.join("; ")
}

pub fn get_paper_text_link(paper: &Paper, link_type: LinkType) -> Option<TextLink> {
    let doi_link = || {
        paper
            .doi
            .as_deref()
            .map(str::trim)
            .filter(|doi| !doi.is_empty())
            .map(|doi| TextLink {
                address: if doi.starts_with("http") {
                    doi.to_owned()
                } else {
                    format!("{DOI_RESOLVER}{doi}")
                },
                is_doi: true,
            })
    };
    let url_link = || {
        paper
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| TextLink {
                address: url.to_owned(),
                is_doi: false,
            })
    };

    match link_type {
        LinkType::Doi => doi_link().or_else(url_link),
        LinkType::Url => url_link().or_else(doi_link),
    }
}

pub fn get_paper_comments(paper: &Paper) -> Option<&[Comment]> {
    (!paper.comments.is_empty()).then_some(paper.comments.as_slice())
}

pub fn get_paper_tags(paper: &Paper) -> Option<&[String]> {
    (!paper.tags.is_empty()).then_some(paper.tags.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::paper;

    #[test]
    fn preview_requires_open_access() {
        let mut entry = paper("a", "area");
        entry.link = Some("https://example.org/a.pdf".to_owned());
        assert_eq!(get_paper_preview_link(&entry), None);

        entry.oa = true;
        assert_eq!(
            get_paper_preview_link(&entry).as_deref(),
            Some("https://example.org/a.pdf")
        );

        entry.link = Some("  ".to_owned());
        assert_eq!(get_paper_preview_link(&entry), None);
    }

    #[test]
    fn keywords_fall_back_to_localized_placeholder() {
        let localization = Localization::default();
        let mut entry = paper("a", "area");
        assert_eq!(get_paper_keywords(&entry, &localization), "n/a");

        entry.keywords = vec!["Orient".to_owned(), "Poetry".to_owned()];
        assert_eq!(get_paper_keywords(&entry, &localization), "Orient; Poetry");
    }

    #[test]
    fn text_link_prefers_requested_kind() {
        let mut entry = paper("a", "area");
        assert_eq!(get_paper_text_link(&entry, LinkType::Url), None);

        entry.doi = Some("10.1000/182".to_owned());
        let link = get_paper_text_link(&entry, LinkType::Url).expect("doi fallback");
        assert_eq!(link.address, "https://doi.org/10.1000/182");
        assert!(link.is_doi);

        entry.url = Some("https://example.org/a".to_owned());
        let link = get_paper_text_link(&entry, LinkType::Url).expect("url link");
        assert_eq!(link.address, "https://example.org/a");

        let link = get_paper_text_link(&entry, LinkType::Doi).expect("doi link");
        assert!(link.is_doi);
    }

    #[test]
    fn empty_comments_and_tags_are_none() {
        let entry = paper("a", "area");
        assert!(get_paper_comments(&entry).is_none());
        assert!(get_paper_tags(&entry).is_none());
    }
}
