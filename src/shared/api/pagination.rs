use std::collections::HashMap;
use std::num::IntErrorKind;

use async_trait::async_trait;

use crate::core::config::ApiConfig;
use crate::core::error::{AppError, Result};
use crate::shared::api::negotiation::{FormatNegotiator, OutputFormat};
use crate::shared::constants::PAGE_PARAM;

/// Ordered collection that can be counted and read window by window
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Send;

    async fn count(&self) -> Result<i64>;

    /// Read `limit` items starting at `offset`, in the source's order
    async fn fetch(&self, offset: i64, limit: i64) -> Result<Vec<Self::Item>>;
}

/// A validated, 1-indexed page at a fixed limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Start of the `[(page-1)*limit, page*limit)` window
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// One page of a source. `items` is empty when `page` is past the last page.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub total: i64,
    pub num_pages: i64,
}

impl<T> ResultPage<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    limit: i64,
}

impl Paginator {
    pub fn new(limit: i64) -> Self {
        Self {
            limit: limit.max(1),
        }
    }

    /// Read `page` from the query, defaulting to 1
    pub fn validate_page(&self, params: &HashMap<String, String>) -> Result<PageRequest> {
        let page = match params.get(PAGE_PARAM) {
            None => 1,
            Some(raw) => parse_page(raw)?,
        };

        if page <= 0 {
            return Err(AppError::Validation("page less than 1".to_string()));
        }

        Ok(PageRequest {
            page,
            limit: self.limit,
        })
    }

    pub fn num_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            // an empty source still has an (empty) first page
            return 1;
        }
        (total + self.limit - 1) / self.limit
    }

    pub async fn slice<S>(&self, source: &S, request: PageRequest) -> Result<ResultPage<S::Item>>
    where
        S: PageSource + ?Sized,
    {
        let total = source.count().await?;
        let num_pages = self.num_pages(total);

        if request.page > num_pages {
            tracing::debug!(
                "Page {} is past the last page ({}), returning empty page",
                request.page,
                num_pages
            );
            return Ok(ResultPage {
                items: Vec::new(),
                page: request.page,
                total,
                num_pages,
            });
        }

        let items = source.fetch(request.offset(), request.limit).await?;

        Ok(ResultPage {
            items,
            page: request.page,
            total,
            num_pages,
        })
    }
}

fn parse_page(raw: &str) -> Result<i64> {
    match raw.trim().parse::<i64>() {
        Ok(page) => Ok(page),
        // Too large for i64 is still a number, just past any real page
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(i64::MAX),
        Err(e) if *e.kind() == IntErrorKind::NegOverflow => Ok(i64::MIN),
        Err(_) => Err(AppError::Validation("page is not a number".to_string())),
    }
}

/// What a validated list request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    pub format: OutputFormat,
    pub page: PageRequest,
}

/// Format negotiation followed by page validation, for paginated endpoints
#[derive(Debug, Clone)]
pub struct PaginationApi {
    negotiator: FormatNegotiator,
    paginator: Paginator,
}

impl PaginationApi {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            negotiator: FormatNegotiator::new(config),
            paginator: Paginator::new(config.page_limit),
        }
    }

    pub fn negotiator(&self) -> &FormatNegotiator {
        &self.negotiator
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    /// An invalid `output` is reported before `page` is looked at.
    pub fn validate(&self, params: &HashMap<String, String>) -> Result<ListQuery> {
        let format = self.negotiator.negotiate(params)?;
        let page = self.paginator.validate_page(params)?;
        Ok(ListQuery { format, page })
    }
}
