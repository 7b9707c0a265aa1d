//! Listing state machine without IO.
//!
//! Every mutation returns a `RequestTicket` that the caller executes; the
//! outcome comes back through `resolve`. Only the most recently issued
//! ticket may change the listing (last-request-wins).

use chrono::{DateTime, Utc};
use gemlist_engine::{FamilyContext, compile, envelope_failure, normalize_listing};
use gemlist_types::{
    CatalogKind, Facet, FilterModel, MAX_PAGE_SIZE, NormalizedItem, PageRequest, Pagination,
    QueryParams,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::Result;
use crate::fetch::FetchError;
use crate::searches::SearchRecorder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    Idle,
    Loading,
    Success,
    Error,
}

/// A request issued by the controller, identified by its sequence number
#[derive(Debug, Clone, PartialEq)]
pub struct RequestTicket {
    pub seq: u64,
    pub kind: CatalogKind,
    pub page: PageRequest,
    pub params: QueryParams,
}

/// What `resolve` did with an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Items and pagination replaced
    Applied,
    /// Error recorded, previous items kept
    Failed,
    /// Outcome belonged to a superseded request
    Discarded,
}

/// Read-only listing state for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingView {
    pub kind: CatalogKind,
    pub state: LoadState,
    pub filters: FilterModel,
    pub page: PageRequest,
    pub sort: Option<String>,
    pub items: Vec<NormalizedItem>,
    pub pagination: Pagination,
    pub error: Option<String>,
}

pub struct ListingController {
    context: FamilyContext,
    filters: FilterModel,
    page: u64,
    page_size: u64,
    sort: Option<String>,
    state: LoadState,
    items: Vec<NormalizedItem>,
    pagination: Pagination,
    last_error: Option<String>,
    issued: u64,
    last_request: Option<RequestTicket>,
    recorder: Option<Box<dyn SearchRecorder>>,
}

impl ListingController {
    pub fn new(context: FamilyContext, page_size: u64) -> Self {
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        Self {
            filters: FilterModel::defaults(context.kind),
            context,
            page: 1,
            page_size,
            sort: None,
            state: LoadState::Idle,
            items: Vec::new(),
            pagination: Pagination::empty(PageRequest::first(page_size)),
            last_error: None,
            issued: 0,
            last_request: None,
            recorder: None,
        }
    }

    pub fn with_recorder(mut self, recorder: Box<dyn SearchRecorder>) -> Self {
        self.set_recorder(recorder);
        self
    }

    pub fn set_recorder(&mut self, recorder: Box<dyn SearchRecorder>) {
        self.recorder = Some(recorder);
    }

    pub fn kind(&self) -> CatalogKind {
        self.context.kind
    }

    pub fn context(&self) -> &FamilyContext {
        &self.context
    }

    pub fn filters(&self) -> &FilterModel {
        &self.filters
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn items(&self) -> &[NormalizedItem] {
        &self.items
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Sequence number of the newest ticket, 0 before the first one
    pub fn issued(&self) -> u64 {
        self.issued
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::first(self.page_size).with_page(self.page)
    }

    /// Replace the filter model wholesale; resets to page 1.
    pub fn set_filters(&mut self, filters: FilterModel) -> Result<RequestTicket> {
        if filters.kind() != self.context.kind {
            return Err(gemlist_engine::Error::KindMismatch {
                filters: filters.kind(),
                context: self.context.kind,
            }
            .into());
        }
        self.record_new_terms(&filters);
        self.filters = filters;
        self.page = 1;
        self.issue()
    }

    /// Edit a copy of the current filters and apply it as a whole
    pub fn update_filters<F>(&mut self, edit: F) -> Result<RequestTicket>
    where
        F: FnOnce(&mut FilterModel) -> gemlist_types::Result<()>,
    {
        let mut next = self.filters.clone();
        edit(&mut next)?;
        self.set_filters(next)
    }

    pub fn set_page(&mut self, page: u64) -> Result<RequestTicket> {
        self.page = page.max(1);
        self.issue()
    }

    pub fn set_page_size(&mut self, page_size: u64) -> Result<RequestTicket> {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self.page = 1;
        self.issue()
    }

    pub fn set_sort(&mut self, sort: Option<String>) -> Result<RequestTicket> {
        self.sort = sort.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        self.page = 1;
        self.issue()
    }

    /// Switch catalog: results are cleared immediately and filters reset
    pub fn set_kind(&mut self, context: FamilyContext) -> Result<RequestTicket> {
        self.filters = FilterModel::defaults(context.kind);
        self.context = context;
        self.page = 1;
        self.items.clear();
        self.pagination = Pagination::empty(self.page_request());
        self.last_error = None;
        self.issue()
    }

    /// Re-issue the last request with identical parameters
    pub fn retry(&mut self) -> Result<RequestTicket> {
        let Some(last) = self.last_request.clone() else {
            return self.refresh();
        };
        self.issued += 1;
        let ticket = RequestTicket {
            seq: self.issued,
            ..last
        };
        debug!(seq = ticket.seq, kind = %ticket.kind, "retrying listing request");
        self.state = LoadState::Loading;
        self.last_request = Some(ticket.clone());
        Ok(ticket)
    }

    /// Issue a request for the current state
    pub fn refresh(&mut self) -> Result<RequestTicket> {
        self.issue()
    }

    pub fn resolve(&mut self, seq: u64, outcome: std::result::Result<Value, FetchError>) -> Resolution {
        self.resolve_at(seq, outcome, Utc::now())
    }

    /// `resolve` with an explicit clock for items without dates
    pub fn resolve_at(
        &mut self,
        seq: u64,
        outcome: std::result::Result<Value, FetchError>,
        now: DateTime<Utc>,
    ) -> Resolution {
        if seq != self.issued {
            debug!(seq, current = self.issued, "discarding superseded listing response");
            return Resolution::Discarded;
        }
        let Some(ticket) = self.last_request.as_ref() else {
            return Resolution::Discarded;
        };

        let outcome = outcome.and_then(|raw| match envelope_failure(&raw) {
            Some(message) => Err(FetchError::Rejected { message }),
            None => Ok(raw),
        });

        match outcome {
            Ok(raw) => {
                let page = normalize_listing(&raw, ticket.kind, ticket.page, now);
                let pagination = page.pagination.clamped();
                self.items = page.items;
                self.pagination = pagination;
                self.page = pagination.page;
                self.last_error = None;
                self.state = LoadState::Success;
                Resolution::Applied
            }
            Err(err) => {
                warn!(seq, error = %err, "listing request failed");
                self.last_error = Some(err.to_string());
                self.state = LoadState::Error;
                Resolution::Failed
            }
        }
    }

    pub fn snapshot(&self) -> ListingView {
        ListingView {
            kind: self.context.kind,
            state: self.state,
            filters: self.filters.clone(),
            page: self.page_request(),
            sort: self.sort.clone(),
            items: self.items.clone(),
            pagination: self.pagination,
            error: self.last_error.clone(),
        }
    }

    fn issue(&mut self) -> Result<RequestTicket> {
        let page = self.page_request();
        let params = compile(&self.filters, page, self.sort.as_deref(), &self.context)?;
        self.issued += 1;
        let ticket = RequestTicket {
            seq: self.issued,
            kind: self.context.kind,
            page,
            params,
        };
        debug!(seq = ticket.seq, kind = %ticket.kind, page = page.page(), "issuing listing request");
        self.state = LoadState::Loading;
        self.last_request = Some(ticket.clone());
        Ok(ticket)
    }

    fn record_new_terms(&mut self, next: &FilterModel) {
        let Some(recorder) = self.recorder.as_mut() else {
            return;
        };
        let previous: Vec<(Facet, &str)> = self.filters.text_terms();
        for (facet, term) in next.text_terms() {
            if !previous.contains(&(facet, term)) {
                recorder.record(term);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::searches::RecentSearches;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    fn controller() -> ListingController {
        ListingController::new(FamilyContext::for_kind(CatalogKind::SINGLE_DIAMONDS), 20)
    }

    fn listing(ids: &[u64], total: u64, page: u64) -> Value {
        let rows: Vec<Value> = ids.iter().map(|id| json!({"id": id, "price": 100})).collect();
        json!({"data": {"data": rows, "meta": {"total": total, "currentPage": page, "perPage": 20}}})
    }

    #[test]
    fn test_last_request_wins() {
        let mut c = controller();
        let first = c.refresh().unwrap();
        let second = c
            .update_filters(|f| f.select(Facet::Shape, ["Round"]))
            .unwrap();

        // newer response lands first, the stale one after
        assert_eq!(c.resolve(second.seq, Ok(listing(&[2], 1, 1))), Resolution::Applied);
        assert_eq!(c.resolve(first.seq, Ok(listing(&[1], 1, 1))), Resolution::Discarded);
        assert_eq!(c.items()[0].id(), "2");
        assert_eq!(c.state(), LoadState::Success);
    }

    #[test]
    fn test_stale_error_is_discarded() {
        let mut c = controller();
        let first = c.refresh().unwrap();
        let _second = c.set_page(2).unwrap();
        assert_eq!(
            c.resolve(first.seq, Err(FetchError::Timeout)),
            Resolution::Discarded
        );
        assert_eq!(c.state(), LoadState::Loading);
        assert_eq!(c.last_error(), None);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut c = controller();
        let ticket = c.set_page(4).unwrap();
        assert_eq!(ticket.params.get("page"), Some(&gemlist_types::ParamValue::Integer(4)));

        let ticket = c
            .update_filters(|f| f.set_text(Facet::Search, "halo"))
            .unwrap();
        assert_eq!(ticket.page.page(), 1);
        assert_eq!(ticket.params.get("page"), Some(&gemlist_types::ParamValue::Integer(1)));

        c.set_page(3).unwrap();
        assert_eq!(c.set_sort(Some("price_asc".to_string())).unwrap().page.page(), 1);
        c.set_page(3).unwrap();
        assert_eq!(c.set_page_size(50).unwrap().page, PageRequest::new(1, 50).unwrap());
    }

    #[test]
    fn test_error_keeps_items_and_retry_repeats_params() {
        let mut c = controller();
        let ok = c.refresh().unwrap();
        c.resolve(ok.seq, Ok(listing(&[1, 2], 2, 1)));

        let failing = c.set_page(2).unwrap();
        assert_eq!(
            c.resolve(failing.seq, Err(FetchError::Transport("reset".to_string()))),
            Resolution::Failed
        );
        assert_eq!(c.items().len(), 2);
        assert_eq!(c.state(), LoadState::Error);
        assert_eq!(c.last_error(), Some("network error: reset"));

        let retry = c.retry().unwrap();
        assert!(retry.seq > failing.seq);
        assert_eq!(retry.params, failing.params);
        assert_eq!(c.state(), LoadState::Loading);
    }

    #[test]
    fn test_success_false_envelope_is_an_error() {
        let mut c = controller();
        let ticket = c.refresh().unwrap();
        let resolution = c.resolve(ticket.seq, Ok(json!({"success": false, "message": "maintenance"})));
        assert_eq!(resolution, Resolution::Failed);
        assert_eq!(c.last_error(), Some("request rejected: maintenance"));
    }

    #[test]
    fn test_kind_change_clears_items_immediately() {
        let mut c = controller();
        let ticket = c.refresh().unwrap();
        c.resolve(ticket.seq, Ok(listing(&[1, 2, 3], 3, 1)));
        c.update_filters(|f| f.select(Facet::Color, ["D"])).unwrap();
        assert_eq!(c.items().len(), 3);

        let ticket = c
            .set_kind(FamilyContext::for_kind(CatalogKind::MELEE_DIAMONDS))
            .unwrap();
        assert!(c.items().is_empty());
        assert_eq!(c.state(), LoadState::Loading);
        assert!(c.filters().is_default());
        assert_eq!(ticket.kind, CatalogKind::MELEE_DIAMONDS);
        assert_eq!(c.snapshot().pagination.total, 0);
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let mut c = controller();
        let ticket = c.set_page(9).unwrap();
        c.resolve(ticket.seq, Ok(listing(&[], 45, 9)));
        assert_eq!(c.pagination().page, 3);
        assert_eq!(c.page_request().page(), 3);
    }

    #[test]
    fn test_set_filters_rejects_other_kind() {
        let mut c = controller();
        let result = c.set_filters(FilterModel::defaults(CatalogKind::WATCHES));
        assert!(result.is_err());
        assert_eq!(c.issued(), 0);
    }

    #[test]
    fn test_new_search_terms_are_recorded() {
        let recent = Arc::new(Mutex::new(RecentSearches::new(5)));
        let mut c = controller().with_recorder(Box::new(recent.clone()));

        c.update_filters(|f| f.set_text(Facet::Search, "cushion")).unwrap();
        c.update_filters(|f| f.select(Facet::Lab, ["GIA"])).unwrap();
        c.update_filters(|f| f.set_text(Facet::ReportNumber, "2141438171"))
            .unwrap();

        assert_eq!(
            recent.lock().unwrap().terms(),
            &["2141438171", "cushion"]
        );
    }
}
