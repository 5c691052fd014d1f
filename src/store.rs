use board_orders::{
    Completion, Order, OrderId, SortKey, StatusFilter, complete_order, filter_orders, sort_orders,
};
use tokio::sync::watch;
use tracing::{debug, error, info, trace, warn};

use crate::feed::FetchError;

/// Outcome of the one-shot order fetch, as seen by the presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    Pending,
    Loaded,
    Failed { reason: String },
}

#[derive(Debug)]
struct FilterMemo {
    orders_version: u64,
    filter: StatusFilter,
    generation: u64,
    orders: Vec<Order>,
}

#[derive(Debug)]
struct SortMemo {
    filter_generation: u64,
    sort: SortKey,
    orders: Vec<Order>,
}

/// View state for one board: the order sequence, the two selections and the
/// fetch state.
///
/// Every change bumps a revision published on a watch channel. The displayed
/// view is derived on demand; each pipeline step is skipped when its inputs
/// are unchanged since the last derivation.
#[derive(Debug)]
pub struct BoardStore {
    orders: Vec<Order>,
    orders_version: u64,
    filter: StatusFilter,
    sort: SortKey,
    fetch_state: FetchState,
    changes: watch::Sender<u64>,
    filter_memo: Option<FilterMemo>,
    sort_memo: Option<SortMemo>,
    filter_generation: u64,
    #[cfg(test)]
    derivation_runs: (usize, usize),
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new(StatusFilter::default(), SortKey::default())
    }
}

impl BoardStore {
    pub fn new(filter: StatusFilter, sort: SortKey) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            orders: Vec::new(),
            orders_version: 0,
            filter,
            sort,
            fetch_state: FetchState::Pending,
            changes,
            filter_memo: None,
            sort_memo: None,
            filter_generation: 0,
            #[cfg(test)]
            derivation_runs: (0, 0),
        }
    }

    /// Receives the store revision after every change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.changes.borrow()
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub const fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub const fn sort(&self) -> SortKey {
        self.sort
    }

    pub const fn fetch_state(&self) -> &FetchState {
        &self.fetch_state
    }

    /// Returns whether the selection changed.
    pub fn set_filter(&mut self, filter: StatusFilter) -> bool {
        if self.filter == filter {
            return false;
        }
        debug!("Filter changed: {} -> {filter}", self.filter);
        self.filter = filter;
        self.notify();
        true
    }

    /// Returns whether the selection changed.
    pub fn set_sort(&mut self, sort: SortKey) -> bool {
        if self.sort == sort {
            return false;
        }
        debug!("Sort changed: {} -> {sort}", self.sort);
        self.sort = sort;
        self.notify();
        true
    }

    /// Publishes a freshly fetched sequence, replacing any prior contents.
    pub fn replace_orders(&mut self, orders: Vec<Order>) {
        info!("Loaded {} orders", orders.len());
        self.fetch_state = FetchState::Loaded;
        self.set_orders(orders);
    }

    pub fn fail_fetch(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        error!("Failed to load orders: {reason}");
        self.fetch_state = FetchState::Failed { reason };
        self.notify();
    }

    pub fn apply_fetch(&mut self, result: Result<Vec<Order>, FetchError>) {
        match result {
            Ok(orders) => self.replace_orders(orders),
            Err(e) => self.fail_fetch(e.to_string()),
        }
    }

    /// Marks the order with `id` as completed.
    ///
    /// Unknown ids and already completed orders leave the sequence as is.
    pub fn complete(&mut self, id: &OrderId) -> Completion {
        let outcome = Completion::classify(&self.orders, id);
        match outcome {
            Completion::Completed => {
                info!(order_id = %id, "Order completed");
                let updated = complete_order(&self.orders, id);
                self.set_orders(updated);
            }
            Completion::AlreadyCompleted => {
                debug!(order_id = %id, "Order already completed");
            }
            Completion::NotFound => {
                warn!(order_id = %id, "Cannot complete unknown order");
            }
        }
        outcome
    }

    /// Completes `id` only when it is one of the displayed rows.
    ///
    /// `NotFound` here means no row of the current view carries `id`, even if
    /// the filter hides a matching order.
    pub fn complete_displayed(&mut self, id: &OrderId) -> Completion {
        let shown = Completion::classify(self.view(), id);
        match shown {
            Completion::Completed => self.complete(id),
            Completion::AlreadyCompleted => {
                debug!(order_id = %id, "Order already completed");
                Completion::AlreadyCompleted
            }
            Completion::NotFound => {
                warn!(order_id = %id, filter = %self.filter, "Order is not on the board");
                Completion::NotFound
            }
        }
    }

    /// Filter-then-sort projection of the current orders.
    pub fn view(&mut self) -> &[Order] {
        let filter_fresh = self.filter_memo.as_ref().is_some_and(|memo| {
            memo.orders_version == self.orders_version && memo.filter == self.filter
        });
        if filter_fresh {
            trace!("Filter memo hit");
        } else {
            self.filter_generation += 1;
            self.filter_memo = Some(FilterMemo {
                orders_version: self.orders_version,
                filter: self.filter,
                generation: self.filter_generation,
                orders: filter_orders(&self.orders, self.filter),
            });
            #[cfg(test)]
            {
                self.derivation_runs.0 += 1;
            }
        }

        let filter_generation = self
            .filter_memo
            .as_ref()
            .map_or(0, |memo| memo.generation);
        let sort_fresh = self.sort_memo.as_ref().is_some_and(|memo| {
            memo.filter_generation == filter_generation && memo.sort == self.sort
        });
        if sort_fresh {
            trace!("Sort memo hit");
        } else {
            let filtered = self
                .filter_memo
                .as_ref()
                .map_or(&[][..], |memo| memo.orders.as_slice());
            self.sort_memo = Some(SortMemo {
                filter_generation,
                sort: self.sort,
                orders: sort_orders(filtered, self.sort),
            });
            #[cfg(test)]
            {
                self.derivation_runs.1 += 1;
            }
        }

        self.sort_memo
            .as_ref()
            .map_or(&[][..], |memo| memo.orders.as_slice())
    }

    fn set_orders(&mut self, orders: Vec<Order>) {
        self.orders = orders;
        self.orders_version += 1;
        self.notify();
    }

    fn notify(&self) {
        self.changes.send_modify(|revision| *revision += 1);
    }

    #[cfg(test)]
    pub(crate) const fn derivation_runs(&self) -> (usize, usize) {
        self.derivation_runs
    }
}
