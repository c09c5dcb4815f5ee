use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

macro_rules! selector {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// Readability-mode single-post markup. The session handshake performed at
// startup is what guarantees pages are served with these classes.
selector!(DATE_SELECTOR, "time.b-singlepost-author-date");
selector!(TITLE_SELECTOR, "h1.b-singlepost-title");
selector!(BODY_SELECTOR, "article.b-singlepost-body");
regex!(DATE_REGEX, r"(\d{4})-(\d{2})-(\d{2}) (\d{2}):(\d{2}):(\d{2})");
