//! URL path → page mapping and the navigation model.

use crate::i18n::Translations;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Page {
    Home,
    Philosophy,
    Projects,
    Blog,
    BlogPost { slug: String },
    Resources,
    GetInvolved,
    Products,
    NotFound,
}

static SLUG_REGEX: OnceLock<Regex> = OnceLock::new();

fn is_valid_slug(slug: &str) -> bool {
    SLUG_REGEX
        .get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9-]*$").expect("valid regex"))
        .is_match(slug)
}

impl Page {
    /// Map a URL path to a page. Trailing slashes are ignored; anything
    /// unrecognised is `NotFound`.
    pub fn from_path(path: &str) -> Page {
        let trimmed = path.trim_end_matches('/');
        let trimmed = if trimmed.is_empty() { "/" } else { trimmed };

        match trimmed {
            "/" => Page::Home,
            "/philosophy" => Page::Philosophy,
            "/projects" => Page::Projects,
            "/blog" => Page::Blog,
            "/resources" => Page::Resources,
            "/get-involved" => Page::GetInvolved,
            "/products" => Page::Products,
            other => match other.strip_prefix("/blog/post/") {
                Some(slug) if is_valid_slug(slug) => Page::BlogPost {
                    slug: slug.to_string(),
                },
                _ => Page::NotFound,
            },
        }
    }

    /// Canonical path; `None` for `NotFound`.
    pub fn path(&self) -> Option<String> {
        let path = match self {
            Page::Home => "/",
            Page::Philosophy => "/philosophy",
            Page::Projects => "/projects",
            Page::Blog => "/blog",
            Page::BlogPost { slug } => return Some(format!("/blog/post/{}", slug)),
            Page::Resources => "/resources",
            Page::GetInvolved => "/get-involved",
            Page::Products => "/products",
            Page::NotFound => return None,
        };
        Some(path.to_string())
    }

    /// Content collection holding this page's documents.
    pub fn collection(&self) -> Option<&'static str> {
        match self {
            Page::Home => Some("home"),
            Page::Philosophy => Some("philosophy"),
            Page::Projects => Some("projects"),
            Page::Blog | Page::BlogPost { .. } => Some("blog"),
            Page::Resources => Some("resources"),
            Page::GetInvolved => Some("getInvolved"),
            Page::Products => Some("products"),
            Page::NotFound => None,
        }
    }

    /// Document path inside the collection for `language_code`.
    ///
    /// Pages keep one document per language (`en.json`); blog posts keep one
    /// directory per language (`en/<slug>.json`).
    pub fn document_path(&self, language_code: &str) -> Option<String> {
        match self {
            Page::NotFound => None,
            Page::BlogPost { slug } => Some(format!("{}/{}.json", language_code, slug)),
            _ => Some(format!("{}.json", language_code)),
        }
    }

    /// Translation key naming this page in the navigation.
    pub fn title_key(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Philosophy => "philosophy",
            Page::Projects => "projects",
            Page::Blog | Page::BlogPost { .. } => "blog",
            Page::Resources => "resources",
            Page::GetInvolved => "getInvolved",
            Page::Products => "products",
            Page::NotFound => "pageNotFound",
        }
    }
}

/// Pages shown in the navigation bar, in display order.
pub const NAV_PAGES: [Page; 7] = [
    Page::Home,
    Page::Philosophy,
    Page::Projects,
    Page::Blog,
    Page::Resources,
    Page::GetInvolved,
    Page::Products,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub key: &'static str,
    pub label: String,
    pub path: String,
    pub active: bool,
}

/// Build the navigation bar for `current_path`, labelled in the snapshot's
/// language.
pub fn navigation(translations: &Translations, current_path: &str) -> Vec<NavItem> {
    let current = Page::from_path(current_path).path();

    NAV_PAGES
        .iter()
        .filter_map(|page| {
            let path = page.path()?;
            Some(NavItem {
                key: page.title_key(),
                label: translations.t(page.title_key()).to_string(),
                active: current.as_deref() == Some(path.as_str()),
                path,
            })
        })
        .collect()
}
