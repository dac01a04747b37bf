use crate::ui::counter::intent::CounterIntent;
use crate::ui::counter::state::{Action, CounterState, StatusMessage};
use crate::ui::mvi::Reducer;

pub struct CounterReducer;

impl Reducer for CounterReducer {
    type State = CounterState;
    type Intent = CounterIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            CounterIntent::Started(_) => CounterState {
                busy: true,
                message: None,
                ..state
            },
            CounterIntent::Succeeded { action, value } => {
                let mut history = state.history;
                history.record(value);
                CounterState {
                    value: Some(value),
                    busy: false,
                    message: action.success_message().map(StatusMessage::success),
                    history,
                }
            }
            CounterIntent::Failed { action } => CounterState {
                // Only a failed refresh forgets the last known value.
                value: if action == Action::Refresh {
                    None
                } else {
                    state.value
                },
                busy: false,
                message: Some(StatusMessage::failure(action.failure_message())),
                history: state.history,
            },
        }
    }
}
