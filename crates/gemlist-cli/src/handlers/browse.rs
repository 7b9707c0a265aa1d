use crate::args::{FilterArgs, PageArgs};
use crate::context::ExecutionContext;
use crate::output;
use anyhow::{Context, Result, anyhow, bail};
use gemlist_runtime::{HttpFetcher, ListingEvent, ListingSession, RecentSearches, Resolution};
use gemlist_types::{CatalogKind, ListingPage};
use std::sync::{Arc, Mutex};
use tracing::info;

const RECENT_SEARCHES_FILE: &str = "recent_searches.json";

pub fn handle(
    ctx: &ExecutionContext,
    kind: CatalogKind,
    filters: &FilterArgs,
    page: &PageArgs,
) -> Result<()> {
    let config = ctx.config()?;
    let model = filters.build(kind)?;
    let has_terms = !model.text_terms().is_empty();
    let limit = page.request(&config)?.page_size();

    let searches_path = ctx.data_dir().join(RECENT_SEARCHES_FILE);
    let recent = Arc::new(Mutex::new(RecentSearches::load_from(
        &searches_path,
        config.listing.recent_searches,
    )?));

    let fetcher = HttpFetcher::from_config(&config.api)?;
    info!(kind = %kind, base_url = %config.api.base_url, "browsing listing");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let update = runtime.block_on(async {
        let mut session = ListingSession::new(config, kind, fetcher)
            .with_recorder(Box::new(Arc::clone(&recent)));

        session.apply(ListingEvent::PageSize(limit))?;
        if page.sort.is_some() {
            session.apply(ListingEvent::Sort(page.sort.clone()))?;
        }
        if !model.is_default() {
            session.apply(ListingEvent::Filters(model))?;
        }
        if page.page > 1 {
            session.apply(ListingEvent::Page(page.page))?;
        }

        let update = session
            .next_update()
            .await
            .context("Listing request finished without a result")?;
        Ok::<_, anyhow::Error>(update)
    })?;

    if has_terms {
        recent
            .lock()
            .map_err(|_| anyhow!("Recent searches lock poisoned"))?
            .save_to(&searches_path)?;
    }

    if update.resolution == Resolution::Failed {
        bail!(
            "{}",
            update
                .view
                .error
                .unwrap_or_else(|| "listing request failed".to_string())
        );
    }

    let listing = ListingPage {
        items: update.view.items,
        pagination: update.view.pagination,
    };
    output::write_listing(
        &mut std::io::stdout().lock(),
        &listing,
        ctx.format,
        output::use_color(),
    )
}
