//! Header component

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use crate::state::AppState;

/// Main application header
#[component]
pub fn Header() -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();

    let identity = state.identity;
    let is_auth = Signal::derive(move || identity.with(|i| i.is_authenticated()));

    view! {
        <header class="header h-16 sticky top-0 z-40">
            <div class="h-full max-w-7xl mx-auto px-4 flex items-center justify-between">
                // Logo
                <a href="/" class="logo hover:opacity-80 transition-opacity">
                    <h1 class="text-xl font-bold text-amber-400">"Altar"</h1>
                </a>

                // Navigation
                <nav class="flex items-center gap-2">
                    <Show when=move || is_auth.get()>
                        <span class="text-sm text-stone-400">
                            {move || identity.with(|i| i.email().unwrap_or_default().to_string())}
                        </span>
                    </Show>

                    {move || {
                        if is_auth.get() {
                            let state = state.clone();
                            let navigate = navigate.clone();
                            view! {
                                <button
                                    on:click=move |_| {
                                        state.clear_identity();
                                        navigate("/", Default::default());
                                    }
                                    class="btn btn-ghost"
                                >
                                    "Sign Out"
                                </button>
                            }.into_any()
                        } else {
                            view! {
                                <a
                                    href="/login"
                                    class="btn btn-primary"
                                >
                                    "Sign In"
                                </a>
                            }.into_any()
                        }
                    }}
                </nav>
            </div>
        </header>
    }
}
