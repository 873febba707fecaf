//! Reducer-driven state holders.

use std::marker::PhantomData;
use tokio::sync::watch;

/// Pure transition function of a screen.
pub trait Reducer: Send + Sync + 'static {
    type State: Clone + PartialEq + Send + Sync + 'static;
    type Event: Send;

    fn reduce(state: &Self::State, event: Self::Event) -> Self::State;
}

/// Single current-state slot of a screen.
///
/// Events are applied under the channel lock, so subscribers only ever see
/// whole states, and only when something actually changed.
pub struct StateHolder<R: Reducer> {
    state: watch::Sender<R::State>,
    _reducer: PhantomData<fn() -> R>,
}

impl<R: Reducer> StateHolder<R> {
    pub fn new(initial: R::State) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            state,
            _reducer: PhantomData,
        }
    }

    pub fn dispatch(&self, event: R::Event) {
        self.state.send_if_modified(|state| {
            let next = R::reduce(state, event);
            if next == *state {
                false
            } else {
                *state = next;
                true
            }
        });
    }

    pub fn snapshot(&self) -> R::State {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<R::State> {
        self.state.subscribe()
    }
}

impl<R: Reducer> Default for StateHolder<R>
where
    R::State: Default,
{
    fn default() -> Self {
        Self::new(R::State::default())
    }
}
