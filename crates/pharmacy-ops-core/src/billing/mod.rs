//! Point-of-sale billing.
//!
//! Cart transitions are synchronous and never touch the network. The async
//! functions here drive a [`BillingSession`] against a [`BillingBackend`]:
//! each one validates first, then makes exactly one submission, then
//! refreshes the available batches.

mod backend;
mod cart;
mod lookup;
mod session;
mod stock;
mod totals;

pub use backend::*;
pub use cart::*;
pub use lookup::*;
pub use session::*;
pub use stock::*;
pub use totals::*;

use tracing::{debug, warn};

use crate::models::{NewStockEntry, TransactionReceipt};

/// Check out the session's cart.
///
/// An empty cart or a checkout already in flight is rejected before any
/// request is made. A failed submission leaves the cart untouched. After a
/// successful sale the available batches are reloaded; a failed reload is
/// logged and does not fail the checkout.
pub async fn checkout<B>(session: &mut BillingSession, backend: &B) -> CheckoutResult<TransactionReceipt>
where
    B: BillingBackend + ?Sized,
{
    let pending = session.begin_checkout()?;
    debug!(lines = pending.payload.items.len(), "submitting checkout");

    let outcome = backend.submit_checkout(&pending.payload).await;
    let receipt = session.finish_checkout(pending, outcome)?;

    if let Err(err) = refresh_available(session, backend).await {
        warn!(error = %err, "inventory refresh after checkout failed");
    }
    Ok(receipt)
}

/// Reload the available batches. Returns whether the response was applied.
pub async fn refresh_available<B>(session: &mut BillingSession, backend: &B) -> BackendResult<bool>
where
    B: BillingBackend + ?Sized,
{
    let ticket = session.issue_refresh();
    let batches = backend.fetch_available_batches().await?;
    debug!(count = batches.len(), "fetched available batches");
    Ok(session.apply_refresh(ticket, batches))
}

/// Validate and submit received stock, then reload the available batches.
pub async fn add_stock<B>(session: &mut BillingSession, backend: &B, entry: &NewStockEntry) -> StockEntryResult<()>
where
    B: BillingBackend + ?Sized,
{
    validate_stock_entry(entry)?;
    backend.add_stock(entry).await?;

    if let Err(err) = refresh_available(session, backend).await {
        warn!(error = %err, "inventory refresh after stock entry failed");
    }
    Ok(())
}
