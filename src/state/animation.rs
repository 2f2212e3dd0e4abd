/// Identifies one zoom transition. Only the most recently issued token may
/// end the running animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionToken(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    ZoomIn { already_zoomed: bool },
    ZoomOut,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub token: TransitionToken,
    pub kind: TransitionKind,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnimationState {
    issued: u64,
    pending: Option<Transition>,
}

impl AnimationState {
    pub fn start(&mut self, kind: TransitionKind) -> TransitionToken {
        self.issued += 1;
        let token = TransitionToken(self.issued);
        self.pending = Some(Transition { token, kind });
        token
    }

    /// Ends the running transition if `token` is the latest one. Returns
    /// `false` for stale or unknown tokens, which leave the state untouched.
    pub fn complete(&mut self, token: TransitionToken) -> bool {
        match self.pending {
            Some(pending) if pending.token == token => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn in_progress(&self) -> bool {
        self.pending.is_some()
    }

    pub fn current(&self) -> Option<Transition> {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_token_ends_animation() {
        let mut animation = AnimationState::default();
        let token = animation.start(TransitionKind::ZoomOut);
        assert!(animation.in_progress());
        assert!(animation.complete(token));
        assert!(!animation.in_progress());
    }

    #[test]
    fn stale_token_is_ignored() {
        let mut animation = AnimationState::default();
        let first = animation.start(TransitionKind::ZoomIn {
            already_zoomed: false,
        });
        let second = animation.start(TransitionKind::ZoomIn {
            already_zoomed: true,
        });
        assert_ne!(first, second);

        assert!(!animation.complete(first));
        assert!(animation.in_progress());
        assert_eq!(animation.current().map(|t| t.token), Some(second));

        assert!(animation.complete(second));
        assert!(!animation.complete(second));
    }
}
