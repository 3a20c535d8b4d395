use leptos::*;

use super::icons::{category_glyph, Glyph, Icon};
use crate::model::{format_short_date, Blog, BlogId};
use crate::queries::{use_blog_queries, BlogListState};
use crate::reactive::use_observer_state;

const DELETE_PROMPT: &str = "Are you sure you want to delete this article?";
const SKELETON_CARDS: usize = 3;

/// What the list renders for a given query state.
#[derive(Debug, Clone, PartialEq)]
pub enum ListView {
    Loading,
    Failed(String),
    Loaded(Vec<Blog>),
}

impl ListView {
    pub fn from_state(state: &BlogListState) -> Self {
        if let Some(error) = state.error() {
            return ListView::Failed(error.to_string());
        }
        match state.data() {
            Some(blogs) => ListView::Loaded(blogs.clone()),
            None => ListView::Loading,
        }
    }
}

#[component]
pub fn BlogList(
    #[prop(into)] selected_id: Signal<Option<BlogId>>,
    #[prop(into)] on_select: Callback<BlogId>,
    #[prop(into)] on_deleted: Callback<BlogId>,
) -> impl IntoView {
    let queries = use_blog_queries();
    let observer = queries.list_observer();
    let state = use_observer_state(&observer);
    let delete_error = create_rw_signal(None::<String>);

    let on_delete = Callback::new(move |id: BlogId| {
        if !confirm_delete() {
            return;
        }
        let queries = queries.clone();
        spawn_local(async move {
            match queries.delete(id).await {
                Ok(()) => {
                    delete_error.set(None);
                    on_deleted.call(id);
                }
                Err(error) => {
                    log::warn!("Delete of blog {id} failed: {error}");
                    delete_error.set(Some(error.to_string()));
                }
            }
        });
    });

    view! {
        {move || {
            delete_error
                .get()
                .map(|message| {
                    view! {
                        <div class="mb-4 rounded-lg bg-red-50 p-3 text-sm text-red-600">{message}</div>
                    }
                })
        }}

        {move || {
            let observer = observer.clone();
            match ListView::from_state(&state.get()) {
                ListView::Loading => {
                    view! {
                        <div class="grid grid-cols-1 gap-4">
                            {(0..SKELETON_CARDS)
                                .map(|_| view! { <div class="h-32 rounded-xl bg-gray-100 animate-pulse"></div> })
                                .collect_view()}
                        </div>
                    }
                        .into_view()
                }
                ListView::Failed(message) => {
                    view! {
                        <div class="rounded-xl border border-red-200 bg-red-50 p-4 text-red-600">
                            <p>"Error: " {message}</p>
                            <button
                                class="mt-2 text-sm font-medium underline hover:text-red-700"
                                on:click=move |_| observer.refetch()
                            >
                                "Try again"
                            </button>
                        </div>
                    }
                        .into_view()
                }
                ListView::Loaded(blogs) if blogs.is_empty() => {
                    view! {
                        <div class="rounded-xl border border-gray-100 bg-white p-6 text-center text-sm text-gray-500">
                            "No articles yet. Create the first one below."
                        </div>
                    }
                        .into_view()
                }
                ListView::Loaded(blogs) => {
                    view! {
                        <div class="grid grid-cols-1 gap-4">
                            {blogs
                                .into_iter()
                                .map(|blog| view! { <BlogCard blog selected_id on_select on_delete/> })
                                .collect_view()}
                        </div>
                    }
                        .into_view()
                }
            }
        }}
    }
}

#[component]
fn BlogCard(
    blog: Blog,
    selected_id: Signal<Option<BlogId>>,
    on_select: Callback<BlogId>,
    on_delete: Callback<BlogId>,
) -> impl IntoView {
    let id = blog.id;
    let is_selected = move || selected_id.get() == Some(id);
    let glyph = category_glyph(&blog.category);

    let card_class = move || {
        if is_selected() {
            "group cursor-pointer rounded-xl bg-white transition-all duration-200 ease-in-out hover:shadow-md border shadow-sm border-l-4 border-l-blue-600 border-y-gray-100 border-r-gray-100 bg-blue-50/50"
        } else {
            "group cursor-pointer rounded-xl bg-white transition-all duration-200 ease-in-out hover:shadow-md border shadow-sm border-gray-100 hover:-translate-y-1"
        }
    };
    let chip_class = move || {
        if is_selected() {
            "rounded-full px-2.5 py-0.5 text-xs font-medium bg-blue-50 text-blue-700"
        } else {
            "rounded-full px-2.5 py-0.5 text-xs font-medium bg-gray-100 text-gray-600 group-hover:bg-blue-50 group-hover:text-blue-600"
        }
    };
    let icon_class = move || {
        if is_selected() {
            "mt-1 flex h-8 w-8 shrink-0 items-center justify-center rounded-lg bg-blue-100 text-blue-700"
        } else {
            "mt-1 flex h-8 w-8 shrink-0 items-center justify-center rounded-lg bg-gray-100 text-gray-500 group-hover:bg-blue-50 group-hover:text-blue-600"
        }
    };
    let title_class = move || {
        if is_selected() {
            "text-lg font-bold line-clamp-2 text-blue-700"
        } else {
            "text-lg font-bold line-clamp-2 text-gray-900 group-hover:text-blue-600"
        }
    };

    let read_time = format!("{} min read", blog.read_time_minutes());
    let date = format_short_date(&blog.date);
    let preview = blog.preview();

    view! {
        <div class=card_class on:click=move |_| on_select.call(id)>
            <div class="p-4 pb-2">
                <div class="mb-2 flex flex-wrap items-center gap-2">
                    {blog
                        .category
                        .into_iter()
                        .map(|category| view! { <span class=chip_class>{category}</span> })
                        .collect_view()}
                </div>
                <div class="flex items-start gap-3">
                    <div class=icon_class>
                        <Icon glyph class="h-4 w-4"/>
                    </div>
                    <h3 class=title_class>{blog.title}</h3>
                </div>
            </div>
            <div class="p-4 py-0 pl-[4.25rem]">
                <p class="line-clamp-2 text-sm text-gray-600">{preview}</p>
            </div>
            <div class="p-4 pt-3 pl-[4.25rem] text-xs text-gray-400 flex items-center justify-between">
                <div class="flex items-center gap-2">
                    <time datetime=blog.date>{date}</time>
                    <span>"•"</span>
                    <span>{read_time}</span>
                </div>
                <button
                    class="h-8 w-8 inline-flex items-center justify-center rounded-md text-gray-400 hover:text-red-600 hover:bg-red-50"
                    title="Delete article"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_delete.call(id);
                    }
                >
                    <Icon glyph=Glyph::Trash class="h-4 w-4"/>
                </button>
            </div>
        </div>
    }
}

fn confirm_delete() -> bool {
    window()
        .confirm_with_message(DELETE_PROMPT)
        .unwrap_or(false)
}
