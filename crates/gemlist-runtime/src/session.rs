use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::stream::Stream;
use gemlist_types::{CatalogKind, FilterModel};
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, warn};

use crate::config::Config;
use crate::controller::{ListingController, ListingView, RequestTicket, Resolution};
use crate::fetch::{FetchError, FetchRequest, Fetcher};
use crate::searches::SearchRecorder;
use crate::{Error, Result};

/// User interaction that changes what the listing shows
#[derive(Debug, Clone, PartialEq)]
pub enum ListingEvent {
    Filters(FilterModel),
    Page(u64),
    PageSize(u64),
    Sort(Option<String>),
    Kind(CatalogKind),
    Retry,
    Refresh,
}

/// A resolved request that changed the listing
#[derive(Debug, Clone, PartialEq)]
pub struct ListingUpdate {
    pub seq: u64,
    pub resolution: Resolution,
    pub view: ListingView,
}

type Outcome = (u64, std::result::Result<Value, FetchError>);

enum Wake {
    Received(Option<Outcome>),
    Finished(Option<JoinError>),
}

/// Async driver around a `ListingController`.
///
/// Each ticket runs on its own tokio task; issuing a new ticket aborts the
/// one in flight. Results come back tagged with their sequence number so
/// a response that slipped through before the abort is still discarded.
pub struct ListingSession<F> {
    controller: ListingController,
    fetcher: Arc<F>,
    config: Config,
    token: Option<String>,
    tx: mpsc::UnboundedSender<Outcome>,
    rx: mpsc::UnboundedReceiver<Outcome>,
    in_flight: Option<(u64, JoinHandle<()>)>,
}

impl<F: Fetcher + 'static> ListingSession<F> {
    pub fn new(config: Config, kind: CatalogKind, fetcher: F) -> Self {
        Self::with_shared_fetcher(config, kind, Arc::new(fetcher))
    }

    pub fn with_shared_fetcher(config: Config, kind: CatalogKind, fetcher: Arc<F>) -> Self {
        let controller =
            ListingController::new(config.family_context(kind), config.listing.default_page_size);
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            controller,
            fetcher,
            token: config.resolve_token(),
            config,
            tx,
            rx,
            in_flight: None,
        }
    }

    pub fn with_recorder(mut self, recorder: Box<dyn SearchRecorder>) -> Self {
        self.controller.set_recorder(recorder);
        self
    }

    pub fn controller(&self) -> &ListingController {
        &self.controller
    }

    pub fn view(&self) -> ListingView {
        self.controller.snapshot()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Apply an event and start fetching; returns the issued sequence number
    pub fn apply(&mut self, event: ListingEvent) -> Result<u64> {
        let ticket = match event {
            ListingEvent::Filters(filters) => self.controller.set_filters(filters)?,
            ListingEvent::Page(page) => self.controller.set_page(page)?,
            ListingEvent::PageSize(size) => self.controller.set_page_size(size)?,
            ListingEvent::Sort(sort) => self.controller.set_sort(sort)?,
            ListingEvent::Kind(kind) => self
                .controller
                .set_kind(self.config.family_context(kind))?,
            ListingEvent::Retry => self.controller.retry()?,
            ListingEvent::Refresh => self.controller.refresh()?,
        };
        let seq = ticket.seq;
        self.dispatch(ticket);
        Ok(seq)
    }

    /// Wait for the in-flight request; `None` when nothing is loading
    pub async fn next_update(&mut self) -> Option<ListingUpdate> {
        loop {
            let (current, handle) = self.in_flight.as_mut()?;
            let current = *current;
            let wake = tokio::select! {
                biased;
                received = self.rx.recv() => Wake::Received(received),
                joined = handle => Wake::Finished(joined.err()),
            };

            match wake {
                Wake::Received(received) => {
                    let (seq, outcome) = received?;
                    if let Some(update) = self.absorb(seq, outcome) {
                        return Some(update);
                    }
                }
                Wake::Finished(failure) => {
                    self.in_flight = None;
                    return self.drain_finished(current, failure);
                }
            }
        }
    }

    /// Fetch the current state and wait for its result
    pub async fn load(&mut self) -> Result<ListingUpdate> {
        let seq = self.apply(ListingEvent::Refresh)?;
        while let Some(update) = self.next_update().await {
            if update.seq == seq {
                return Ok(update);
            }
        }
        Err(Error::InvalidOperation(format!(
            "listing request {} finished without a result",
            seq
        )))
    }

    fn dispatch(&mut self, ticket: RequestTicket) {
        if let Some((stale, handle)) = self.in_flight.take() {
            debug!(seq = stale, "aborting superseded listing request");
            handle.abort();
        }

        let endpoint = self.config.endpoint(ticket.kind);
        let request = FetchRequest {
            kind: ticket.kind,
            path: endpoint.path,
            method: endpoint.method,
            params: ticket.params,
            token: self.token.clone(),
        };
        let seq = ticket.seq;
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let outcome = fetcher.fetch(request).await;
            // Receiver gone means the session was dropped
            let _ = tx.send((seq, outcome));
        });
        self.in_flight = Some((seq, handle));
    }

    /// Settle `current` once its task has ended, sent or not
    fn drain_finished(
        &mut self,
        current: u64,
        failure: Option<JoinError>,
    ) -> Option<ListingUpdate> {
        while let Ok((seq, outcome)) = self.rx.try_recv() {
            let landed = seq == current;
            if let Some(update) = self.absorb(seq, outcome) {
                return Some(update);
            }
            if landed {
                return None;
            }
        }

        match &failure {
            Some(err) => warn!(seq = current, error = %err, "listing fetch task failed"),
            None => warn!(seq = current, "listing fetch task ended without a result"),
        }
        self.absorb(
            current,
            Err(FetchError::Transport("fetch task failed".to_string())),
        )
    }

    fn absorb(
        &mut self,
        seq: u64,
        outcome: std::result::Result<Value, FetchError>,
    ) -> Option<ListingUpdate> {
        let resolution = self.controller.resolve(seq, outcome);
        if matches!(&self.in_flight, Some((current, _)) if *current == seq) {
            self.in_flight = None;
        }
        match resolution {
            Resolution::Discarded => None,
            _ => Some(ListingUpdate {
                seq,
                resolution,
                view: self.controller.snapshot(),
            }),
        }
    }
}

impl<F> Drop for ListingSession<F> {
    fn drop(&mut self) {
        if let Some((_, handle)) = self.in_flight.take() {
            handle.abort();
        }
    }
}

/// Live feed of listing updates; never ends on its own
impl<F: Fetcher + 'static> Stream for ListingSession<F> {
    type Item = ListingUpdate;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match this.rx.poll_recv(cx) {
                Poll::Ready(Some((seq, outcome))) => {
                    if let Some(update) = this.absorb(seq, outcome) {
                        return Poll::Ready(Some(update));
                    }
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
