use shardcast_api::{IntRandomizer, PeerCategory, PeerId};

/// Histogram key of attempts made to the preferred peer.
pub(super) const PREFERRED_LABEL: &str = "preferred";

/// One slot of the order in which a category's peers are contacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SelectionToken {
    /// The preferred peer. Does not consume a rated slot.
    Preferred,

    /// An index into the top rated peer list.
    Rated(usize),
}

impl SelectionToken {
    pub fn resolve<'a>(
        self,
        rated: &'a [PeerId],
        preferred: Option<&'a PeerId>,
    ) -> Option<&'a PeerId> {
        match self {
            SelectionToken::Preferred => preferred,
            SelectionToken::Rated(index) => rated.get(index),
        }
    }

    pub fn label(self, category: PeerCategory) -> &'static str {
        match self {
            SelectionToken::Preferred => PREFERRED_LABEL,
            SelectionToken::Rated(_) => category.label(),
        }
    }
}

/// Shuffle the rated indexes and, if asked to, put the preferred peer in
/// front of them.
pub(super) fn selection_order(
    num_rated: usize,
    with_preferred: bool,
    randomizer: &dyn IntRandomizer,
) -> Vec<SelectionToken> {
    let shuffled = randomizer.fisher_yates_shuffle((0..num_rated).collect());

    with_preferred
        .then_some(SelectionToken::Preferred)
        .into_iter()
        .chain(shuffled.into_iter().map(SelectionToken::Rated))
        .collect()
}
