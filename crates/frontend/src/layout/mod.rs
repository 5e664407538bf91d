pub mod global_context;
pub mod sidebar;
pub mod tabs;

use leptos::prelude::*;
use sidebar::Sidebar;
use tabs::Tabs;

/// Application shell.
///
/// ```text
/// +-----------+------------------------------+
/// |  Sidebar  |  Tab bar                     |
/// |           |  Tab pages (kept mounted)    |
/// +-----------+------------------------------+
/// ```
#[component]
pub fn Shell() -> impl IntoView {
    view! {
        <div class="app-layout">
            <div class="app-body">
                <aside class="app-sidebar">
                    <Sidebar />
                </aside>
                <main class="app-main">
                    <Tabs />
                </main>
            </div>
        </div>
    }
}
