//! What the parsers read: extracted text per page, plus optional table cells.

/// One table row as extracted: cells in column order, `None` for empty cells.
pub type TableRow = Vec<Option<String>>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub text: String,
    /// Cell layout of the page, when a table extractor produced one.
    pub table: Option<Vec<TableRow>>,
}

impl Page {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            table: None,
        }
    }

    pub fn has_table(&self) -> bool {
        self.table.as_ref().is_some_and(|rows| !rows.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementDocument {
    pages: Vec<Page>,
}

impl StatementDocument {
    /// A single-page document.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            pages: vec![Page::from_text(text)],
        }
    }

    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: pages.into_iter().map(Page::from_text).collect(),
        }
    }

    /// Attach table rows page by page. Tables beyond the last text page become
    /// pages of their own with no text.
    pub fn with_tables(mut self, tables: Vec<Vec<TableRow>>) -> Self {
        for (idx, rows) in tables.into_iter().enumerate() {
            match self.pages.get_mut(idx) {
                Some(page) => page.table = Some(rows),
                None => self.pages.push(Page {
                    text: String::new(),
                    table: Some(rows),
                }),
            }
        }
        self
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// All page text, one page after the other.
    pub fn text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// True when there is neither text nor table content to parse.
    pub fn is_blank(&self) -> bool {
        self.pages
            .iter()
            .all(|p| p.text.trim().is_empty() && !p.has_table())
    }
}
