//! Page navigation allow-list.
//!
//! Page identity arrives as a single string value. Anything not on the
//! allow-list, including a missing value, resolves to the landing page.

use std::fmt;

/// The fixed set of pages the application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Course overview — the landing page.
    Overview,
    /// Syllabus by unit.
    Syllabus,
    /// Assessment and progress.
    Assessment,
    /// About the programme owner.
    About,
    /// A single lesson with its content blocks.
    Lesson,
    /// Admin review of submitted answers.
    Review,
    /// Admin content-block editor.
    Content,
}

impl Page {
    /// All pages, in navigation order.
    pub const ALL: [Page; 7] = [
        Page::Overview,
        Page::Syllabus,
        Page::Assessment,
        Page::About,
        Page::Lesson,
        Page::Review,
        Page::Content,
    ];

    /// Resolve a query value against the allow-list. Unknown or missing
    /// values fall back to the overview landing page.
    pub fn from_query(value: Option<&str>) -> Page {
        match value {
            Some("overview") => Page::Overview,
            Some("syllabus") => Page::Syllabus,
            Some("assessment") => Page::Assessment,
            Some("about") => Page::About,
            Some("lesson") => Page::Lesson,
            Some("review") => Page::Review,
            Some("content") => Page::Content,
            _ => Page::Overview,
        }
    }

    /// The query value this page is addressed by.
    pub fn query_value(&self) -> &'static str {
        match self {
            Page::Overview => "overview",
            Page::Syllabus => "syllabus",
            Page::Assessment => "assessment",
            Page::About => "about",
            Page::Lesson => "lesson",
            Page::Review => "review",
            Page::Content => "content",
        }
    }

    /// Whether this page requires an admin session.
    pub fn admin_only(&self) -> bool {
        matches!(self, Page::Review | Page::Content)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_value())
    }
}
