//! Wall display

use altar_core::{PageError, RenderMode, VisualTree};
use leptos::prelude::*;

/// Draws a rendered wall. Blocks arrive already in paint order.
#[component]
pub fn Wall(tree: VisualTree) -> impl IntoView {
    let mode = match tree.mode {
        RenderMode::Editable => "editable",
        RenderMode::ReadOnly => "readonly",
    };
    let editable = tree.mode.is_editable();

    let blocks = tree
        .blocks
        .into_iter()
        .map(|block| {
            view! {
                <img
                    class="altar-block"
                    data-block=block.key.clone()
                    src=block.src.clone()
                    alt=""
                    draggable={if editable { "true" } else { "false" }}
                    style=block.style()
                />
            }
        })
        .collect_view();

    view! {
        <div class="altar-wall mx-auto shadow-2xl" data-mode=mode style=tree.container.style()>
            {blocks}
        </div>
    }
}

/// Page-level error messages
#[component]
pub fn ErrorBanner(errors: Vec<PageError>) -> impl IntoView {
    errors
        .into_iter()
        .map(|error| {
            view! {
                <div class="mb-4 p-4 bg-red-500/10 border border-red-500/50 rounded-md text-red-400 text-sm">
                    {error.user_message()}
                </div>
            }
        })
        .collect_view()
}
