use crate::{Effect, Msg, RequestCoordinator};

/// Pure update function: applies a message to the coordinator and returns any effects.
///
/// Rejections never escape; they are kept on the coordinator as data.
pub fn update(mut coordinator: RequestCoordinator, msg: Msg) -> (RequestCoordinator, Vec<Effect>) {
    let result = match msg {
        Msg::Submit(params) => coordinator.submit(params),
        Msg::Tick { request_id } => {
            coordinator.tick(request_id);
            Ok(Vec::new())
        }
        Msg::LookupDone {
            request_id,
            outcome,
        } => coordinator.settle(request_id, outcome),
        Msg::TearDown => Ok(coordinator.tear_down()),
    };

    let effects = match result {
        Ok(effects) => effects,
        Err(error) => {
            coordinator.record_rejection(error);
            Vec::new()
        }
    };

    (coordinator, effects)
}
