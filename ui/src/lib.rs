//! Altar web client - Leptos frontend
//!
//! Sign in, open altar sessions (editable or read-only depending on sharing)
//! and view shared altars.

pub mod api;
pub mod components;
pub mod pages;
pub mod state;
pub mod types;

use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

use pages::{home::HomePage, login::LoginPage, session::SessionPage, view::SharedViewPage};
use state::AppState;

/// Main application component
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Identity is read from local storage once, here
    let app_state = AppState::new();
    provide_context(app_state);

    view! {
        <Title text="Altar" />
        <Router>
            <main class="min-h-screen bg-stone-950 text-stone-100">
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/login") view=LoginPage />
                    <Route path=path!("/session/:id") view=SessionPage />
                    <Route path=path!("/view/:id") view=SharedViewPage />
                </Routes>
            </main>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-stone-500 mb-4">"404"</h1>
                <p class="text-xl text-stone-400 mb-8">"Page not found"</p>
                <a
                    href="/"
                    class="px-6 py-3 bg-amber-700 hover:bg-amber-800 rounded-lg font-medium transition-colors"
                >
                    "Go Home"
                </a>
            </div>
        </div>
    }
}
