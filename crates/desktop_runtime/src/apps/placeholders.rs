//! Built-in placeholder apps for the demo desktop.

use leptos::*;

use super::{AppContent, AppEntry, StaticAppRegistry};

/// Registry with the placeholder apps shipped with the shell.
pub fn demo_registry() -> StaticAppRegistry {
    StaticAppRegistry::new(vec![
        AppEntry {
            app_id: "notepad",
            title: "Notepad",
            render: render_notepad,
        },
        AppEntry {
            app_id: "calculator",
            title: "Calculator",
            render: render_calculator,
        },
        AppEntry {
            app_id: "about",
            title: "About",
            render: render_about,
        },
    ])
}

fn render_notepad(content: &AppContent) -> View {
    let initial = content
        .params
        .get("text")
        .and_then(|value| value.as_str())
        .unwrap_or_default()
        .to_string();
    view! {
        <div class="app-shell app-notepad-shell">
            <textarea class="app-notepad-buffer" aria-label="Notepad buffer" spellcheck="false">
                {initial}
            </textarea>
        </div>
    }
    .into_view()
}

fn render_calculator(_: &AppContent) -> View {
    view! {
        <div class="app-shell app-calculator-shell">
            <output class="app-calculator-display">"0"</output>
            <p class="app-statusbar">"Calculator placeholder"</p>
        </div>
    }
    .into_view()
}

fn render_about(content: &AppContent) -> View {
    let details = if content.params.is_null() {
        "No launch parameters.".to_string()
    } else {
        content.params.to_string()
    };
    view! {
        <div class="app-shell app-about-shell">
            <p><strong>"Browser desktop"</strong></p>
            <p>"Windows can be dragged by their title bar and resized from any edge."</p>
            <pre class="app-about-params">{details}</pre>
        </div>
    }
    .into_view()
}
