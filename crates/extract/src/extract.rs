//! Post extraction from a fetched permalink page.

use exn::{OptionExt, ResultExt};
use scraper::Html;
use time::{Date, Month, PrimitiveDateTime, Time};
use tracing::instrument;

use crate::consts;
use crate::error::{ErrorKind, Result};
use crate::models::Post;

/// Extracts one [`Post`] from a single-post page.
///
/// The page must be served in readability mode; the extractor locates the
/// date element (required), the title element (optional) and the body
/// element (required) by their single-post classes.
#[derive(Debug)]
pub struct Extractor {
    document: Html,
    source_url: String,
}

impl Extractor {
    pub fn new(html: &str, source_url: impl Into<String>) -> Self {
        Self {
            document: Html::parse_document(html),
            source_url: source_url.into(),
        }
    }

    /// Extracts the full post record.
    ///
    /// # Errors
    ///
    /// Returns an error if the date or body element is missing, or if the
    /// date element's text does not contain a `YYYY-MM-DD HH:MM:SS`
    /// timestamp. Every error is a skip reason for this one post.
    #[instrument(skip(self), fields(url = %self.source_url))]
    pub fn post(&self) -> Result<Post> {
        Ok(Post {
            title: self.title(),
            published: self.published()?,
            body_html: self.body_html()?,
            source_url: self.source_url.clone(),
        })
    }

    fn title(&self) -> Option<String> {
        self.document
            .select(&consts::TITLE_SELECTOR)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn published(&self) -> Result<PrimitiveDateTime> {
        let text = self
            .document
            .select(&consts::DATE_SELECTOR)
            .next()
            .map(|el| el.text().collect::<String>())
            .ok_or_raise(|| ErrorKind::MissingElement("date"))?;
        let captures = consts::DATE_REGEX.captures(&text).ok_or_raise(|| ErrorKind::MissingField("published"))?;
        let year: i32 = captures.get(1).unwrap().as_str().parse::<i32>().or_raise(|| ErrorKind::ParseError {
            field: "date-year",
            value: "invalid year number".to_string(),
        })?;
        let month: u8 = captures.get(2).unwrap().as_str().parse::<u8>().or_raise(|| ErrorKind::ParseError {
            field: "date-month",
            value: "invalid month number".to_string(),
        })?;
        let month = Month::try_from(month).or_raise(|| ErrorKind::ParseError {
            field: "date-month",
            value: "invalid month".to_string(),
        })?;
        let day: u8 = captures.get(3).unwrap().as_str().parse::<u8>().or_raise(|| ErrorKind::ParseError {
            field: "date-day",
            value: "invalid day number".to_string(),
        })?;
        let date = Date::from_calendar_date(year, month, day).or_raise(|| ErrorKind::ParseError {
            field: "date",
            value: "invalid calendar date".to_string(),
        })?;
        let hour: u8 = captures.get(4).unwrap().as_str().parse::<u8>().or_raise(|| ErrorKind::ParseError {
            field: "time-hour",
            value: "invalid hour number".to_string(),
        })?;
        let minute: u8 = captures.get(5).unwrap().as_str().parse::<u8>().or_raise(|| ErrorKind::ParseError {
            field: "time-minute",
            value: "invalid minute number".to_string(),
        })?;
        let second: u8 = captures.get(6).unwrap().as_str().parse::<u8>().or_raise(|| ErrorKind::ParseError {
            field: "time-second",
            value: "invalid second number".to_string(),
        })?;
        let time = Time::from_hms(hour, minute, second).or_raise(|| ErrorKind::ParseError {
            field: "time",
            value: "invalid time of day".to_string(),
        })?;
        Ok(PrimitiveDateTime::new(date, time))
    }

    fn body_html(&self) -> Result<String> {
        self.document
            .select(&consts::BODY_SELECTOR)
            .next()
            .map(|el| el.html())
            .ok_or_raise(|| ErrorKind::MissingElement("body"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn page(date: &str, title: Option<&str>, body: Option<&str>) -> String {
        let title = title.map(|t| format!("<h1 class=\"b-singlepost-title\">{t}</h1>")).unwrap_or_default();
        let body =
            body.map(|b| format!("<article class=\"b-singlepost-body\">{b}</article>")).unwrap_or_default();
        format!(
            "<html><body>\
             <time class=\"b-singlepost-author-date\">{date}</time>\
             {title}{body}\
             </body></html>"
        )
    }

    #[test]
    fn extracts_a_complete_post() {
        let html = page("2021-07-04 10:00:00", Some(" Hello "), Some("<p>text</p>"));
        let post = Extractor::new(&html, "https://alice.livejournal.com/1.html").post().unwrap();
        assert_eq!(post.title.as_deref(), Some("Hello"));
        assert_eq!(post.published, datetime!(2021-07-04 10:00:00));
        assert_eq!(post.body_html, "<article class=\"b-singlepost-body\"><p>text</p></article>");
        assert_eq!(post.source_url, "https://alice.livejournal.com/1.html");
    }

    #[test]
    fn title_is_optional() {
        let html = page("2021-07-04 10:00:00", None, Some("body"));
        let post = Extractor::new(&html, "u").post().unwrap();
        assert_eq!(post.title, None);
    }

    #[test]
    fn missing_body_is_a_skip_reason() {
        let html = page("2021-07-04 10:00:00", Some("t"), None);
        let error = Extractor::new(&html, "u").post().unwrap_err();
        assert_eq!(*error, ErrorKind::MissingElement("body"));
    }

    #[test]
    fn missing_date_element_is_a_skip_reason() {
        let html = "<html><body><article class=\"b-singlepost-body\">x</article></body></html>";
        let error = Extractor::new(html, "u").post().unwrap_err();
        assert_eq!(*error, ErrorKind::MissingElement("date"));
    }

    #[test]
    fn date_without_timestamp_is_a_skip_reason() {
        let html = page("posted yesterday", Some("t"), Some("x"));
        let error = Extractor::new(&html, "u").post().unwrap_err();
        assert_eq!(*error, ErrorKind::MissingField("published"));
    }

    #[test]
    fn timestamp_is_found_inside_surrounding_text() {
        let html = page("written on 2019-12-31 23:59:59 local time", Some("t"), Some("x"));
        let post = Extractor::new(&html, "u").post().unwrap();
        assert_eq!(post.published, datetime!(2019-12-31 23:59:59));
    }

    #[test]
    fn impossible_calendar_date_is_a_parse_error() {
        let html = page("2021-02-31 10:00:00", Some("t"), Some("x"));
        let error = Extractor::new(&html, "u").post().unwrap_err();
        assert!(matches!(*error, ErrorKind::ParseError { field: "date", .. }));
    }
}
