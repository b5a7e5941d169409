/// Identifies one `loadLatest` run. Tickets increase monotonically, so the
/// ticket of the displayed model shows which run won a race.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(pub u64);

/// Observable state of asset synchronisation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncState {
    #[default]
    Idle,
    Loading,
    Displayed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncEvent {
    LoadStarted,
    /// The server has no export; `model_displayed` tells whether an earlier
    /// model is still on screen.
    NothingToLoad { model_displayed: bool },
    DecodeSucceeded,
    DecodeFailed,
    FetchFailed,
}

impl SyncState {
    pub fn transition(self, event: SyncEvent) -> SyncState {
        use SyncEvent::*;
        use SyncState::*;

        match (self, event) {
            (_, LoadStarted) => Loading,
            (Loading, DecodeSucceeded) => Displayed,
            (Loading, DecodeFailed | FetchFailed) => Failed,
            (Loading, NothingToLoad { model_displayed: true }) => Displayed,
            (Loading, NothingToLoad { model_displayed: false }) => Idle,
            (state, _) => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SyncEvent::*;
    use super::SyncState::*;
    use super::*;

    #[test]
    fn happy_path() {
        let state = Idle.transition(LoadStarted);
        assert_eq!(state, Loading);
        assert_eq!(state.transition(DecodeSucceeded), Displayed);
    }

    #[test]
    fn failures_end_in_failed() {
        assert_eq!(Loading.transition(DecodeFailed), Failed);
        assert_eq!(Loading.transition(FetchFailed), Failed);
    }

    #[test]
    fn reload_restarts_from_any_state() {
        for state in [Idle, Loading, Displayed, Failed] {
            assert_eq!(state.transition(LoadStarted), Loading);
        }
    }

    #[test]
    fn nothing_to_load_keeps_what_is_on_screen() {
        assert_eq!(
            Loading.transition(NothingToLoad {
                model_displayed: true
            }),
            Displayed
        );
        assert_eq!(
            Loading.transition(NothingToLoad {
                model_displayed: false
            }),
            Idle
        );
    }

    #[test]
    fn completions_outside_loading_are_ignored() {
        assert_eq!(Idle.transition(DecodeSucceeded), Idle);
        assert_eq!(Displayed.transition(DecodeFailed), Displayed);
        assert_eq!(Failed.transition(DecodeSucceeded), Failed);
    }
}
