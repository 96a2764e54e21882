//! Read-only view of a shared session

use altar_core::RenderMode;
use leptos::prelude::*;
use leptos_meta::Title;
use crate::components::{ErrorBanner, LoadingSpinner, Wall};
use crate::pages::session::use_page_view;
use crate::state::AppState;

/// Shared view page; never editable
#[component]
pub fn SharedViewPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let renderer = state.renderer();
    let (_, page) = use_page_view();

    view! {
        <div class="min-h-screen flex flex-col items-center py-8 px-4">
            {move || match page.get() {
                None => view! { <LoadingSpinner size="w-10 h-10" /> }.into_any(),
                Some(view) => {
                    let errors = view.errors.clone();
                    let body = view.session.map(|session| {
                        let tree = renderer.render(session.wall(), RenderMode::ReadOnly);
                        let name = session.display_name().to_string();
                        view! {
                            <Title text=name.clone() />
                            <h1 class="text-2xl font-semibold mb-6 text-amber-300">{name}</h1>
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
            <a href="/" class="mt-8 text-sm text-stone-500 hover:text-stone-300">"Made with Altar"</a>
        </div>
    }
}
