use crate::app::{App, Message, Model};
use crate::dispatch::Dispatcher;

impl App {
    /// Perform the I/O a message asked for after `update` has run.
    pub(super) fn handle_message_side_effects(
        model: &mut Model,
        dispatcher: &Dispatcher,
        msg: &Message,
    ) {
        match msg {
            Message::RequestAction(_) => {
                if let Some((token, request)) = model.take_outgoing() {
                    dispatcher.dispatch(token, request);
                }
            }
            Message::LoginSubmit if model.user.is_some() => {
                tracing::info!(user = model.user.as_deref(), "signed in");
            }
            _ => {}
        }
    }
}
