/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Offset pagination over `GetDataOfTaskByOffset`
//!
//! The server's `restTotal` field is the only stop signal: the pager keeps
//! requesting while it is non-zero and stops the first time it is zero,
//! whatever the page contains.

use crate::constants::MAX_PAGE_SIZE;
use crate::error::AppError;
use crate::model::responses::{DataPage, DataRow};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Position of a pagination run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    /// Task whose data is fetched
    pub task_id: String,
    /// Offset of the next request
    pub offset: u64,
    /// Rows requested per page, 1 to 1000
    pub page_size: u32,
}

impl PageCursor {
    /// Creates a cursor, validating the page size
    ///
    /// # Errors
    /// `AppError::InvalidInput` if `page_size` is outside `1..=1000` or the task id is empty
    pub fn new(task_id: impl Into<String>, offset: u64, page_size: u32) -> Result<Self, AppError> {
        let task_id = task_id.into();
        if task_id.trim().is_empty() {
            return Err(AppError::InvalidInput("task id must not be empty".to_string()));
        }
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(AppError::InvalidInput(format!(
                "page size must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
            )));
        }
        Ok(Self {
            task_id,
            offset,
            page_size,
        })
    }
}

/// Anything able to serve one page of task data
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches the page starting at `cursor.offset`
    async fn fetch_page_at(&self, cursor: &PageCursor) -> Result<DataPage, AppError>;
}

/// Lazy, restartable pager over a [`PageSource`]
///
/// Each call to [`DataPager::next_page`] issues at most one request.
pub struct DataPager<'a, S: PageSource + ?Sized> {
    source: &'a S,
    start: PageCursor,
    cursor: PageCursor,
    finished: bool,
    pages_fetched: usize,
}

impl<'a, S: PageSource + ?Sized> DataPager<'a, S> {
    /// Creates a pager starting at `cursor`
    pub fn new(source: &'a S, cursor: PageCursor) -> Self {
        Self {
            source,
            start: cursor.clone(),
            cursor,
            finished: false,
            pages_fetched: 0,
        }
    }

    /// Fetches the next page, `None` once `restTotal` reached zero
    ///
    /// # Errors
    /// Whatever the source reports, plus `AppError::Protocol` when the server
    /// claims more rows but the page neither carries rows nor moves the offset.
    pub async fn next_page(&mut self) -> Result<Option<DataPage>, AppError> {
        if self.finished {
            return Ok(None);
        }

        debug!(
            "Fetching task {} data at offset {} (size {})",
            self.cursor.task_id, self.cursor.offset, self.cursor.page_size
        );
        let page = self.source.fetch_page_at(&self.cursor).await?;
        self.pages_fetched += 1;

        if page.rest_total == 0 {
            self.finished = true;
        } else {
            self.cursor.offset = next_offset(&self.cursor, &page)?;
        }
        Ok(Some(page))
    }

    /// Drains the remaining pages into one vector, in server order
    ///
    /// A failing page discards everything gathered so far.
    pub async fn collect_rows(&mut self) -> Result<Vec<DataRow>, AppError> {
        let mut rows = Vec::new();
        loop {
            match self.next_page().await {
                Ok(Some(page)) => rows.extend(page.data_list),
                Ok(None) => return Ok(rows),
                Err(e) => {
                    if !rows.is_empty() {
                        warn!(
                            "Discarding {} rows of task {} after failed page at offset {}",
                            rows.len(),
                            self.cursor.task_id,
                            self.cursor.offset
                        );
                    }
                    return Err(e);
                }
            }
        }
    }

    /// Rewinds to the starting cursor
    pub fn restart(&mut self) {
        self.cursor = self.start.clone();
        self.finished = false;
        self.pages_fetched = 0;
    }

    /// Whether the server reported `restTotal == 0`
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Cursor of the next request
    #[must_use]
    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    /// Number of pages fetched since creation or the last restart
    #[must_use]
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }
}

/// The server reports the next offset in `offset`; when it does not move
/// forward, the rows of the page are skipped instead.
fn next_offset(cursor: &PageCursor, page: &DataPage) -> Result<u64, AppError> {
    if page.offset > cursor.offset {
        return Ok(page.offset);
    }
    if page.data_list.is_empty() {
        return Err(AppError::Protocol(format!(
            "pagination stalled for task {} at offset {} with {} rows remaining",
            cursor.task_id, cursor.offset, page.rest_total
        )));
    }
    Ok(cursor.offset + page.data_list.len() as u64)
}
