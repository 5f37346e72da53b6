use bevy::prelude::*;

/// Identifies one plot request. Tokens increase monotonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub u64);

/// Hands out request tokens and remembers the newest one.
///
/// Fetches are not cancellable, so responses may arrive out of order. Only
/// the response to the most recently issued request is applied; anything
/// older is stale.
#[derive(Resource, Debug, Default)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    pub fn is_latest(&self, token: RequestToken) -> bool {
        self.latest != 0 && token.0 == self.latest
    }

    pub fn latest(&self) -> Option<RequestToken> {
        (self.latest != 0).then_some(RequestToken(self.latest))
    }
}
