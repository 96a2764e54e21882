//! Login/Register/Verify page

use altar_core::IdentityContext;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use crate::api::{login, register, verify};
use crate::components::{Header, LoadingSpinner};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Login,
    Register,
    Verify,
}

/// Login/Register page
#[component]
pub fn LoginPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();

    // Form state
    let mode = RwSignal::new(Mode::Login);
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let name = RwSignal::new(String::new());
    let code = RwSignal::new(String::new());
    let is_loading = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);
    let notice = RwSignal::new(Option::<String>::None);

    // Redirect if already logged in
    let navigate_for_redirect = navigate.clone();
    let identity = state.identity;
    Effect::new(move |_| {
        if identity.with(|i| i.is_authenticated()) {
            navigate_for_redirect("/", Default::default());
        }
    });

    // Handle form submission
    let state_for_submit = state.clone();
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let email_val = email.get();
        let password_val = password.get();
        let name_val = name.get();
        let code_val = code.get();
        let current = mode.get();
        let state = state_for_submit.clone();

        spawn_local(async move {
            is_loading.set(true);
            error.set(None);

            let base_url = state.api_base.get_untracked();

            let result = match current {
                Mode::Login => login(&base_url, &email_val, &password_val)
                    .await
                    .map(|auth| Some((auth.token, auth.email))),
                Mode::Verify => verify(&base_url, &email_val, &code_val)
                    .await
                    .map(|auth| Some((auth.token, auth.email))),
                Mode::Register => register(&base_url, &email_val, &password_val, &name_val)
                    .await
                    .map(|resp| match resp.token {
                        Some(token) => Some((token, None)),
                        None => {
                            notice.set(Some(resp.message.unwrap_or_else(|| {
                                "Check your email for a verification code.".to_string()
                            })));
                            mode.set(Mode::Verify);
                            None
                        }
                    }),
            };

            is_loading.set(false);

            match result {
                Ok(Some((token, returned_email))) => {
                    let email = returned_email
                        .filter(|e| !e.trim().is_empty())
                        .unwrap_or(email_val);
                    tracing::info!("Signed in as {}", email);
                    // The redirect effect fires once identity is set
                    state.save_identity(IdentityContext::new(token, email));
                }
                Ok(None) => {}
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    let title = move || match mode.get() {
        Mode::Login => "Welcome Back",
        Mode::Register => "Create Account",
        Mode::Verify => "Verify Your Email",
    };
    let submit_label = move || match mode.get() {
        Mode::Login => "Sign In",
        Mode::Register => "Create Account",
        Mode::Verify => "Verify",
    };

    view! {
        <div class="min-h-screen flex flex-col">
            <Header />

            <main class="auth-container flex-1">
                <div class="w-full max-w-md px-4">
                    <div class="auth-card">
                        <div class="auth-header">
                            <h1 class="auth-title">{title}</h1>
                        </div>

                        <Show when=move || notice.get().is_some()>
                            <div class="mb-6 p-4 bg-amber-500/10 border border-amber-500/50 rounded-md text-amber-300 text-sm">
                                {move || notice.get().unwrap_or_default()}
                            </div>
                        </Show>

                        // Error message
                        <Show when=move || error.get().is_some()>
                            <div class="mb-6 p-4 bg-red-500/10 border border-red-500/50 rounded-md text-red-400 text-sm">
                                {move || error.get().unwrap_or_default()}
                            </div>
                        </Show>

                        <form on:submit=on_submit class="auth-form">
                            // Name field (register only)
                            <Show when=move || mode.get() == Mode::Register>
                                <div class="auth-input-group">
                                    <label class="auth-label">"Name"</label>
                                    <input
                                        type="text"
                                        prop:value=move || name.get()
                                        on:input=move |ev| name.set(event_target_value(&ev))
                                        placeholder="Your name"
                                        required=true
                                        class="input"
                                    />
                                </div>
                            </Show>

                            <div class="auth-input-group">
                                <label class="auth-label">"Email"</label>
                                <input
                                    type="email"
                                    prop:value=move || email.get()
                                    on:input=move |ev| email.set(event_target_value(&ev))
                                    placeholder="you@example.com"
                                    required=true
                                    class="input"
                                />
                            </div>

                            <Show
                                when=move || mode.get() == Mode::Verify
                                fallback=move || view! {
                                    <div class="auth-input-group">
                                        <label class="auth-label">"Password"</label>
                                        <input
                                            type="password"
                                            prop:value=move || password.get()
                                            on:input=move |ev| password.set(event_target_value(&ev))
                                            placeholder="••••••••"
                                            required=true
                                            minlength="8"
                                            class="input"
                                        />
                                    </div>
                                }
                            >
                                <div class="auth-input-group">
                                    <label class="auth-label">"Verification code"</label>
                                    <input
                                        type="text"
                                        prop:value=move || code.get()
                                        on:input=move |ev| code.set(event_target_value(&ev))
                                        placeholder="123456"
                                        required=true
                                        class="input"
                                    />
                                </div>
                            </Show>

                            <button
                                type="submit"
                                disabled=move || is_loading.get()
                                class="btn btn-primary w-full py-3"
                            >
                                <Show when=move || is_loading.get()>
                                    <LoadingSpinner />
                                </Show>
                                {submit_label}
                            </button>
                        </form>

                        <div class="auth-footer">
                            {move || if mode.get() == Mode::Login {
                                "Don't have an account? "
                            } else {
                                "Already have an account? "
                            }}
                            <button
                                on:click=move |_| {
                                    mode.update(|m| *m = if *m == Mode::Login { Mode::Register } else { Mode::Login });
                                    error.set(None);
                                    notice.set(None);
                                }
                                class="auth-link"
                            >
                                {move || if mode.get() == Mode::Login { "Sign up" } else { "Sign in" }}
                            </button>
                        </div>
                    </div>
                </div>
            </main>
        </div>
    }
}
