//! Fetch bookkeeping shared by the list pages.
//!
//! A page keeps one [`FetchState`] per list. Every fetch takes a
//! [`FetchTicket`]; tickets are issued in increasing order and a response is
//! applied only when its ticket is newer than the last one applied, so a slow
//! response can never overwrite a result that arrived after it.

/// How a fetch presents itself to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FetchOptions {
    /// Keep the current rows mounted; do not raise the loading flag.
    pub silent: bool,
    /// Capture the viewport offset before the request and restore it once the
    /// new rows are in place.
    pub preserve_scroll: bool,
}

impl FetchOptions {
    /// A normal load that shows the loading placeholder.
    pub const fn full() -> Self {
        Self {
            silent: false,
            preserve_scroll: false,
        }
    }

    /// The refresh issued after a mutation: no placeholder, no scroll jump.
    pub const fn optimistic() -> Self {
        Self {
            silent: true,
            preserve_scroll: true,
        }
    }
}

/// Identifies one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket {
    seq: u64,
    counts_loading: bool,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Data shown by a list page plus the bookkeeping of its fetches.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: T,
    pub loading: bool,
    issued: u64,
    last_applied: u64,
    in_flight: usize,
}

impl<T: Default> Default for FetchState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> FetchState<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            loading: false,
            issued: 0,
            last_applied: 0,
            in_flight: 0,
        }
    }

    /// Issues the next ticket. A non-silent fetch raises `loading` until its
    /// ticket is passed to [`FetchState::finish`].
    pub fn begin(&mut self, options: FetchOptions) -> FetchTicket {
        self.issued += 1;
        let counts_loading = !options.silent;
        if counts_loading {
            self.in_flight += 1;
            self.loading = true;
        }
        FetchTicket {
            seq: self.issued,
            counts_loading,
        }
    }

    /// Stores `data` if `ticket` is newer than the last applied response.
    /// Returns whether the data was applied.
    pub fn apply(&mut self, ticket: FetchTicket, data: T) -> bool {
        if ticket.seq <= self.last_applied {
            return false;
        }
        self.last_applied = ticket.seq;
        self.data = data;
        true
    }

    /// Ends the fetch for `ticket`, success or not. `loading` drops once no
    /// non-silent fetch is outstanding.
    pub fn finish(&mut self, ticket: FetchTicket) {
        if ticket.counts_loading {
            self.in_flight = self.in_flight.saturating_sub(1);
            self.loading = self.in_flight > 0;
        }
    }

    pub fn last_applied(&self) -> u64 {
        self.last_applied
    }
}
