//! Session page: the wall, editable or read-only depending on sharing

use altar_core::{IdentityContext, PageView, RenderMode};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;
use leptos_router::hooks::use_params_map;
use crate::api::load_page;
use crate::components::{ErrorBanner, Header, LoadingOverlay, Wall};
use crate::state::AppState;

/// Loads the session named by the `:id` route parameter.
///
/// Reloads when the id or the signed-in identity changes. `None` while a
/// load is in flight.
pub fn use_page_view() -> (Memo<String>, RwSignal<Option<PageView>>) {
    let state = expect_context::<AppState>();
    let params = use_params_map();
    let session_id = Memo::new(move |_| params.read().get("id").unwrap_or_default());
    let page = RwSignal::new(Option::<PageView>::None);

    Effect::new(move |_| {
        let id = session_id.get();
        let identity = state.identity.get();
        let state = state.clone();
        page.set(None);

        spawn_local(async move {
            let base_url = state.api_base.get_untracked();
            let view = load_page(&base_url, &id, &identity, &state.resolver).await;
            let current = state.identity.with_untracked(|now| {
                is_current(&id, &identity, &session_id.get_untracked(), now)
            });
            if current {
                page.set(Some(view));
            }
        });
    });

    (session_id, page)
}

/// A finished load still applies only if neither the id nor the signed-in
/// identity changed while it was in flight.
fn is_current(
    loaded_id: &str,
    loaded_as: &IdentityContext,
    id_now: &str,
    identity_now: &IdentityContext,
) -> bool {
    loaded_id == id_now && loaded_as == identity_now
}

/// Session page
#[component]
pub fn SessionPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let renderer = state.renderer();
    let (session_id, page) = use_page_view();

    view! {
        <div class="min-h-screen flex flex-col">
            <Header />

            <main class="flex-1 px-4 py-8 max-w-6xl mx-auto w-full">
                {move || match page.get() {
                    None => view! { <LoadingOverlay message="Loading altar..." /> }.into_any(),
                    Some(view) => {
                        let editable = view.editable();
                        let errors = view.errors.clone();
                        let body = view.session.map(|session| {
                            let tree = renderer
                                .render(session.wall(), RenderMode::from_editable(editable));
                            let name = session.display_name().to_string();
                            let share_link = format!("/view/{}", session_id.get_untracked());
                            view! {
                                <Title text=name.clone() />
                                <div class="flex items-center justify-between mb-6">
                                    <h1 class="text-3xl font-bold">{name}</h1>
                                    <div class="flex items-center gap-3">
                                        <span class={if editable { "badge badge-editable" } else { "badge badge-readonly" }}>
                                            {if editable { "Editing enabled" } else { "Read-only" }}
                                        </span>
                                        <a href=share_link class="btn btn-ghost">"Public view"</a>
                                    </div>
                                </div>
                                <Wall tree=tree />
                            }
                        });
                        view! {
                            <ErrorBanner errors=errors />
                            {body}
                        }
                        .into_any()
                    }
                }}
            </main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_loads_are_dropped() {
        let ana = IdentityContext::new("tok-a", "ana@x.com");
        let anon = IdentityContext::anonymous();

        assert!(is_current("7", &ana, "7", &ana));
        assert!(!is_current("7", &ana, "8", &ana));
        // Signing out mid-load must not show the signed-in result
        assert!(!is_current("7", &ana, "7", &anon));
        assert!(!is_current("7", &anon, "7", &ana));
    }
}
