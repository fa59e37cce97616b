//! Page containers sized from the page rectangle.

use crate::error::Result;
use crate::markup::PageContainer;
use crate::source::PdfSource;

/// Empty page container of `page`, sized to its display rectangle.
pub fn page_container(source: &dyn PdfSource, page: u32) -> Result<PageContainer> {
    let rect = source.page_rect(page)?;
    Ok(PageContainer::new(page, rect.width, rect.height))
}
