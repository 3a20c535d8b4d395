use leptos::*;

use super::icons::{Glyph, Icon};

const LINKS: [&str; 5] = ["Tools", "Practice", "Events", "Job Board", "Points"];

#[component]
pub fn Navbar() -> impl IntoView {
    view! {
        <nav class="border-b bg-white py-4 px-6 flex items-center justify-between sticky top-0 z-50">
            <Brand/>
            <div class="hidden md:flex items-center gap-8 text-sm font-medium text-gray-500">
                {LINKS
                    .iter()
                    .map(|link| {
                        view! {
                            <a href="#" class="hover:text-black transition-colors">
                                {*link}
                            </a>
                        }
                    })
                    .collect_view()}
            </div>
            <button class="bg-indigo-600 hover:bg-indigo-700 active:scale-95 text-white rounded-md px-6 py-2 font-medium">
                "Profile"
            </button>
        </nav>
    }
}

/// Logo plus wordmark, shared with the footer.
#[component]
pub fn Brand(#[prop(optional, into)] class: String) -> impl IntoView {
    view! {
        <div class="flex items-center gap-2">
            <div class="bg-indigo-600 p-1.5 rounded-lg text-white">
                <Icon glyph=Glyph::GraduationCap class="h-5 w-5"/>
            </div>
            <span class=format!("font-bold text-xl tracking-tight {class}")>"CA MONK"</span>
        </div>
    }
}
