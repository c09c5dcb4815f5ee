use time::PrimitiveDateTime;

/// One post, extracted from its permalink page.
///
/// Posts are processed independently and discarded once their archive file
/// has been written; nothing here outlives a single iteration of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Explicit post title, when the page carries one. Absent titles are
    /// derived from the converted body by the archiver.
    pub title: Option<String>,
    /// Original publish timestamp (site-local, no offset published).
    pub published: PrimitiveDateTime,
    /// Raw body fragment, outer HTML of the body element.
    pub body_html: String,
    /// Permalink the post was fetched from.
    pub source_url: String,
}
