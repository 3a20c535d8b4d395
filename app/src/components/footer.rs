use leptos::*;

use super::navbar::Brand;

const COLUMNS: [(&str, [&str; 3]); 3] = [
    ("Resources", ["Blog", "About", "Contact"]),
    ("Policies", ["Privacy Policy", "Terms of Use", "Disclaimer"]),
    ("Community", ["Twitter", "GitHub", "LinkedIn"]),
];

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="bg-gray-900 text-gray-300 pt-12 pb-6">
            <div class="max-w-screen-2xl mx-auto px-6">
                <div class="grid grid-cols-1 gap-8 md:grid-cols-4 pb-8 border-b border-gray-800">
                    <div class="space-y-4">
                        <Brand class="text-white"/>
                        <p class="text-sm text-gray-400 leading-relaxed">
                            "Empowering the next generation of Chartered Accountants with knowledge, resources, and community."
                        </p>
                    </div>
                    {COLUMNS
                        .iter()
                        .map(|(heading, links)| view! { <LinkColumn heading=*heading links=*links/> })
                        .collect_view()}
                </div>
                <div class="pt-6 text-center">
                    <p class="text-sm text-gray-500">"© 2025 CA Monk. All rights reserved."</p>
                </div>
            </div>
        </footer>
    }
}

#[component]
fn LinkColumn(heading: &'static str, links: [&'static str; 3]) -> impl IntoView {
    view! {
        <div>
            <h3 class="mb-4 font-semibold text-white uppercase text-sm tracking-wider">{heading}</h3>
            <ul class="space-y-2 text-sm">
                {links
                    .into_iter()
                    .map(|link| {
                        view! {
                            <li>
                                <a href="#" class="hover:text-white transition-colors">
                                    {link}
                                </a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </div>
    }
}
