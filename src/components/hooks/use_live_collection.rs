use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::models::Entity;
use crate::repo::Repository;
use crate::state::AppContext;
use crate::sync::{LiveEvent, LiveState};

/// Subscribes the calling component to `repo` for as long as it is mounted.
///
/// The returned signal starts as `Loading` and is replaced wholesale by every
/// snapshot. Unmounting detaches the subscription synchronously.
pub fn use_live_collection<T: Entity>(repo: Repository<T>) -> RwSignal<LiveState<T>> {
    let app_state = expect_context::<AppContext>().0;
    let state: RwSignal<LiveState<T>> = RwSignal::new(LiveState::Loading);

    let subscription = repo.subscribe(move |event| {
        if let LiveEvent::Failed(e) = &event {
            if e.is_unauthorized() {
                app_state.sign_out();
            }
        }
        // Stale after unmount; nothing to update then.
        let _ = state.try_update(|s| s.apply(event));
    });
    on_cleanup(move || subscription.unsubscribe());

    spawn_local(async move { repo.refresh().await });

    state
}
