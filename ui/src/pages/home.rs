//! Home/landing page

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use crate::components::Header;
use crate::state::AppState;

/// Home page: open a session by id
#[component]
pub fn HomePage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();
    let is_auth = move || state.is_authenticated();

    let session_id = RwSignal::new(String::new());
    let on_open = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let id = session_id.get();
        let id = id.trim();
        if !id.is_empty() {
            navigate(&format!("/session/{}", id), Default::default());
        }
    };

    view! {
        <div class="min-h-screen flex flex-col">
            <Header />

            <section class="flex-1 flex items-center justify-center px-4 py-16">
                <div class="max-w-2xl mx-auto text-center">
                    <h1 class="text-5xl md:text-6xl font-bold mb-6 text-amber-400">"Altar"</h1>

                    <p class="text-xl text-stone-400 mb-12">
                        "Arrange photographs and keepsakes on a wall, then share it with family."
                    </p>

                    <form on:submit=on_open class="flex gap-3 justify-center mb-8">
                        <input
                            type="text"
                            prop:value=move || session_id.get()
                            on:input=move |ev| session_id.set(event_target_value(&ev))
                            placeholder="Session id"
                            class="input max-w-xs"
                        />
                        <button type="submit" class="btn btn-primary">"Open"</button>
                    </form>

                    <Show when=move || !is_auth()>
                        <a
                            href="/login"
                            class="px-8 py-4 bg-amber-700 hover:bg-amber-800 rounded-xl text-lg font-semibold transition-all"
                        >
                            "Sign in to edit your altars"
                        </a>
                    </Show>
                </div>
            </section>
        </div>
    }
}
