use leptos::*;

use super::icons::{Glyph, Icon};
use crate::model::{format_long_date, Blog, BlogId};
use crate::queries::{use_blog_queries, BlogState};
use crate::reactive::use_observer_state;

const AUTHOR: &str = "CA Monk Team";
const INITIAL_LIKES: u32 = 42;
const SEEDED_COMMENT: &str = "This is a great article! Really helpful insights on this topic. Thanks for sharing your knowledge with the community.";

/// What the detail pane renders.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Placeholder,
    Loading,
    Loaded(Blog),
    Failed(String),
}

impl DetailView {
    pub fn resolve(id: Option<BlogId>, state: &BlogState) -> Self {
        let Some(id) = id else {
            return DetailView::Placeholder;
        };
        if let Some(error) = state.error() {
            return DetailView::Failed(error.to_string());
        }
        match state.data() {
            Some(blog) if blog.id == id => DetailView::Loaded(blog.clone()),
            _ => DetailView::Loading,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: u32,
    pub user: String,
    pub text: String,
    pub timestamp: String,
    pub likes: u32,
}

/// Likes and comments for the article on screen. Kept in the browser only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Engagement {
    pub is_liked: bool,
    pub like_count: u32,
    pub comments: Vec<Comment>,
    pub comment_text: String,
    next_comment_id: u32,
}

impl Default for Engagement {
    fn default() -> Self {
        let comments = (1..=2)
            .map(|id| Comment {
                id,
                user: format!("User {id}"),
                text: SEEDED_COMMENT.to_string(),
                timestamp: "2 hours ago".to_string(),
                likes: 5,
            })
            .collect::<Vec<_>>();

        Self {
            is_liked: false,
            like_count: INITIAL_LIKES,
            next_comment_id: comments.len() as u32 + 1,
            comments,
            comment_text: String::new(),
        }
    }
}

impl Engagement {
    pub fn toggle_like(&mut self) {
        if self.is_liked {
            self.like_count = self.like_count.saturating_sub(1);
        } else {
            self.like_count += 1;
        }
        self.is_liked = !self.is_liked;
    }

    /// Posts the typed comment at the top of the list. Blank text is ignored.
    ///
    /// Returns true if a comment was added.
    pub fn submit_comment(&mut self) -> bool {
        if self.comment_text.trim().is_empty() {
            return false;
        }

        let id = self.next_comment_id;
        self.next_comment_id += 1;
        self.comments.insert(
            0,
            Comment {
                id,
                user: format!("User {id}"),
                text: std::mem::take(&mut self.comment_text),
                timestamp: "Just now".to_string(),
                likes: 0,
            },
        );
        true
    }
}

#[component]
pub fn BlogDetail(#[prop(into)] blog_id: Signal<Option<BlogId>>) -> impl IntoView {
    let observer = use_blog_queries().detail_observer();
    let state = use_observer_state(&observer);
    let engagement = create_rw_signal(Engagement::default());

    create_effect(move |previous: Option<Option<BlogId>>| {
        let id = blog_id.get();
        observer.set_key(id);
        if previous.is_some_and(|previous| previous != id) {
            engagement.set(Engagement::default());
        }
        id
    });

    move || match state.with(|state| DetailView::resolve(blog_id.get(), state)) {
        DetailView::Placeholder => view! {
            <div class="flex h-96 items-center justify-center rounded-xl border border-dashed border-gray-200 bg-white text-sm text-gray-400">
                "Select an article to start reading."
            </div>
        }
        .into_view(),
        DetailView::Loading => {
            view! { <div class="h-96 animate-pulse rounded-xl bg-gray-100"></div> }.into_view()
        }
        DetailView::Failed(message) => view! {
            <div class="rounded-xl border border-red-200 bg-red-50 p-6 text-red-600">
                "Error loading article: " {message}
            </div>
        }
        .into_view(),
        DetailView::Loaded(blog) => view! { <Article blog engagement/> }.into_view(),
    }
}

#[component]
fn Article(blog: Blog, engagement: RwSignal<Engagement>) -> impl IntoView {
    let cover = blog.cover_image().map(str::to_string);
    let paragraphs = blog
        .paragraphs()
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<_>>();
    let date = format_long_date(&blog.date);
    let read_time = format!("{} min read", blog.read_time_minutes());
    let title = blog.title.clone();

    view! {
        <article class="rounded-2xl bg-white shadow-sm border border-gray-100 h-full overflow-hidden">
            {cover
                .map(|src| {
                    view! {
                        <div class="w-full h-80 overflow-hidden bg-gray-100">
                            <img
                                src=src
                                alt=title
                                class="h-full w-full object-cover transition-transform duration-700 hover:scale-105"
                            />
                        </div>
                    }
                })}
            <div class="p-8">
                <header class="mb-8 space-y-4">
                    <div class="flex flex-wrap gap-2">
                        {blog
                            .category
                            .into_iter()
                            .map(|category| {
                                view! {
                                    <span class="rounded-full bg-blue-50 px-3 py-1 text-xs font-semibold text-blue-700">
                                        {category}
                                    </span>
                                }
                            })
                            .collect_view()}
                    </div>
                    <h1 class="text-3xl font-extrabold tracking-tight text-gray-900 sm:text-4xl">
                        {blog.title}
                    </h1>
                    <div class="flex items-center gap-2">
                        <button class="inline-flex items-center gap-2 rounded-full px-3 py-1.5 text-sm active:scale-95 bg-blue-600 hover:bg-blue-700 text-white">
                            <Icon glyph=Glyph::Share class="h-4 w-4"/>
                            "Share this article"
                        </button>
                    </div>
                    <div class="flex items-center gap-3 border-b border-gray-100 pb-8 text-sm text-gray-500">
                        <div class="flex items-center gap-2">
                            <div class="h-8 w-8 rounded-full bg-gray-200 flex items-center justify-center text-xs font-bold text-gray-500">
                                "CA"
                            </div>
                            <span class="font-medium text-gray-900">{AUTHOR}</span>
                        </div>
                        <span>"•"</span>
                        <time datetime=blog.date>{date}</time>
                        <span>"•"</span>
                        <span>{read_time}</span>
                    </div>
                </header>
                <div class="prose prose-blue max-w-none text-gray-600 space-y-4 leading-loose">
                    {paragraphs
                        .into_iter()
                        .map(|paragraph| view! { <p class="text-lg text-justify">{paragraph}</p> })
                        .collect_view()}
                </div>
                <EngagementBar engagement/>
                <Comments engagement/>
            </div>
        </article>
    }
}

#[component]
fn EngagementBar(engagement: RwSignal<Engagement>) -> impl IntoView {
    let is_liked = move || engagement.with(|e| e.is_liked);

    view! {
        <div class="mt-8 pt-8 border-t border-gray-100">
            <div class="flex items-center gap-4">
                <button
                    class=move || {
                        if is_liked() {
                            "inline-flex items-center gap-2 text-red-600 hover:text-red-700"
                        } else {
                            "inline-flex items-center gap-2 text-gray-600 hover:text-red-600"
                        }
                    }
                    on:click=move |_| engagement.update(Engagement::toggle_like)
                >
                    <Icon glyph=Glyph::Heart class="h-5 w-5"/>
                    <span class="font-medium">{move || engagement.with(|e| e.like_count)}</span>
                </button>
                <span class="inline-flex items-center gap-2 text-gray-600">
                    <Icon glyph=Glyph::MessageCircle class="h-5 w-5"/>
                    <span class="font-medium">
                        {move || engagement.with(|e| e.comments.len())} " Comments"
                    </span>
                </span>
            </div>
        </div>
    }
}

#[component]
fn Comments(engagement: RwSignal<Engagement>) -> impl IntoView {
    view! {
        <div class="mt-8 space-y-6">
            <h3 class="text-xl font-bold text-gray-900">"Comments"</h3>
            <div class="space-y-3">
                <textarea
                    placeholder="Share your thoughts..."
                    rows=3
                    prop:value=move || engagement.with(|e| e.comment_text.clone())
                    on:input=move |ev| {
                        let text = event_target_value(&ev);
                        engagement.update(|e| e.comment_text = text);
                    }
                    class="w-full rounded-lg border border-gray-200 bg-gray-50 px-4 py-3 text-sm focus:border-blue-500 focus:bg-white focus:outline-none resize-none"
                ></textarea>
                <div class="flex justify-end">
                    <button
                        class="inline-flex items-center gap-2 rounded-md px-3 py-1.5 text-sm text-white bg-blue-600 hover:bg-blue-700 active:scale-95"
                        on:click=move |_| {
                            engagement.update(|e| {
                                e.submit_comment();
                            })
                        }
                    >
                        <Icon glyph=Glyph::Send class="h-4 w-4"/>
                        "Post Comment"
                    </button>
                </div>
            </div>
            <div class="space-y-6">
                <For
                    each=move || engagement.with(|e| e.comments.clone())
                    key=|comment| comment.id
                    children=|comment| view! { <CommentItem comment/> }
                />
            </div>
        </div>
    }
}

#[component]
fn CommentItem(comment: Comment) -> impl IntoView {
    view! {
        <div class="flex gap-4">
            <div class="h-10 w-10 rounded-full bg-gray-200 flex items-center justify-center text-sm font-bold text-gray-500 shrink-0">
                {format!("U{}", comment.id)}
            </div>
            <div class="flex-1 space-y-2">
                <div class="flex items-center gap-2">
                    <span class="font-semibold text-gray-900 text-sm">{comment.user}</span>
                    <span class="text-xs text-gray-400">{comment.timestamp}</span>
                </div>
                <p class="text-sm text-gray-600 leading-relaxed">{comment.text}</p>
                <div class="flex items-center gap-4 text-xs text-gray-500">
                    <button class="hover:text-blue-600 font-medium">"Reply"</button>
                    <button class="hover:text-red-600 font-medium flex items-center gap-1">
                        <Icon glyph=Glyph::Heart class="h-3 w-3"/>
                        <span>{comment.likes}</span>
                    </button>
                </div>
            </div>
        </div>
    }
}
