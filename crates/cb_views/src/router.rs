use std::borrow::Cow;

const ARTICLE_PREFIX: &str = "article/";
pub const LIST_FRAGMENT: &str = "#list";

/// View selected by the article browser's location fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Article(String),
}

impl Route {
    /// `article/<id>` selects the detail view, with the id percent-decoded.
    /// Everything else, including an empty fragment, falls back to the list.
    pub fn parse(fragment: &str) -> Self {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        match fragment.strip_prefix(ARTICLE_PREFIX) {
            Some(tail) => {
                let id = urlencoding::decode(tail).unwrap_or(Cow::Borrowed(tail));
                Route::Article(id.into_owned())
            }
            None => Route::List,
        }
    }

    pub fn fragment(&self) -> String {
        match self {
            Route::List => LIST_FRAGMENT.to_string(),
            Route::Article(id) => article_fragment(id),
        }
    }
}

pub fn article_fragment(id: &str) -> String {
    format!("#{}{}", ARTICLE_PREFIX, urlencoding::encode(id))
}

/// The article browser's location. Only the fragment is modeled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    fragment: String,
}

impl Location {
    pub fn new(fragment: &str) -> Self {
        Self {
            fragment: normalize(fragment),
        }
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn route(&self) -> Route {
        Route::parse(&self.fragment)
    }

    /// Assign a new fragment. Returns false when it is unchanged, in which
    /// case no navigation happens.
    pub fn assign(&mut self, fragment: &str) -> bool {
        let fragment = normalize(fragment);
        if fragment == self.fragment {
            return false;
        }
        self.fragment = fragment;
        true
    }
}

fn normalize(fragment: &str) -> String {
    fragment.strip_prefix('#').unwrap_or(fragment).to_string()
}
