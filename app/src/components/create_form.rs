use leptos::*;
use thiserror::Error;

use crate::error::BlogError;
use crate::model::{now_iso, parse_categories, BlogDraft};
use crate::queries::use_blog_queries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("A blog is already being created")]
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
    Content,
    Categories,
    CoverImage,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Pending,
    Failed(String),
}

/// Contents and progress of the "Create New Blog" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogForm {
    pub title: String,
    pub description: String,
    pub content: String,
    /// Comma-separated.
    pub categories: String,
    pub cover_image: String,
    pub date: String,
    pub error: Option<FormError>,
    pub status: SubmitStatus,
}

impl Default for BlogForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            content: String::new(),
            categories: String::new(),
            cover_image: String::new(),
            date: now_iso(),
            error: None,
            status: SubmitStatus::Idle,
        }
    }
}

impl BlogForm {
    /// Replaces one field. Any validation message goes away.
    pub fn set_field(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
            Field::Content => &mut self.content,
            Field::Categories => &mut self.categories,
            Field::CoverImage => &mut self.cover_image,
        };
        *slot = value;
        self.error = None;
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Description => &self.description,
            Field::Content => &self.content,
            Field::Categories => &self.categories,
            Field::CoverImage => &self.cover_image,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == SubmitStatus::Pending
    }

    /// Validates the form and, if it passes, marks it pending and returns the draft to send.
    pub fn begin_submit(&mut self) -> Result<BlogDraft, FormError> {
        if self.is_pending() {
            return Err(FormError::Busy);
        }

        let cover_image = self.cover_image.trim();
        let draft = BlogDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            content: self.content.clone(),
            category: parse_categories(&self.categories),
            cover_image: (!cover_image.is_empty()).then(|| cover_image.to_string()),
            date: now_iso(),
        };

        if !draft.is_complete() {
            self.error = Some(FormError::MissingFields);
            return Err(FormError::MissingFields);
        }

        self.date = draft.date.clone();
        self.error = None;
        self.status = SubmitStatus::Pending;
        Ok(draft)
    }

    /// Resets the form after a successful create, or keeps its contents and records the failure.
    pub fn finish_submit(&mut self, result: Result<(), BlogError>) {
        match result {
            Ok(()) => *self = BlogForm::default(),
            Err(error) => self.status = SubmitStatus::Failed(error.to_string()),
        }
    }
}

/// Enter in a single-line input would submit the form; only textareas take it.
fn swallows_enter(key: &str, tag_name: &str) -> bool {
    key == "Enter" && tag_name.eq_ignore_ascii_case("input")
}

#[component]
pub fn CreateBlogForm() -> impl IntoView {
    let queries = use_blog_queries();
    let form = create_rw_signal(BlogForm::default());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let draft = match form.try_update(BlogForm::begin_submit) {
            Some(Ok(draft)) => draft,
            Some(Err(error)) => {
                log::debug!("Create blog rejected: {error}");
                return;
            }
            None => return,
        };

        let queries = queries.clone();
        spawn_local(async move {
            let result = queries.create(draft).await.map(|blog| {
                log::debug!("Blog {} created", blog.id);
            });
            if let Err(error) = &result {
                log::warn!("{error}");
            }
            form.update(|form| form.finish_submit(result));
        });
    };

    let on_keydown = move |ev: ev::KeyboardEvent| {
        let tag_name = event_target::<web_sys::Element>(&ev).tag_name();
        if swallows_enter(&ev.key(), &tag_name) {
            ev.prevent_default();
        }
    };

    let input_class = "w-full rounded-lg border border-gray-200 bg-gray-50 px-4 py-2 text-sm focus:border-blue-500 focus:bg-white focus:outline-none";
    let bind = move |field: Field| {
        (
            move || form.with(|form| form.value(field).to_string()),
            move |ev: ev::Event| {
                let value = event_target_value(&ev);
                form.update(|form| form.set_field(field, value));
            },
        )
    };
    let (title, set_title) = bind(Field::Title);
    let (description, set_description) = bind(Field::Description);
    let (content, set_content) = bind(Field::Content);
    let (categories, set_categories) = bind(Field::Categories);
    let (cover_image, set_cover_image) = bind(Field::CoverImage);

    view! {
        <form
            on:submit=on_submit
            on:keydown=on_keydown
            class="mt-12 space-y-4 rounded-xl bg-white p-6 shadow-sm border border-gray-100"
        >
            <h2 class="text-lg font-bold text-gray-900">"Create New Blog"</h2>

            {move || {
                form.with(|form| form.error)
                    .map(|error| {
                        view! {
                            <div class="rounded-lg bg-red-50 p-3 text-sm text-red-600">
                                {error.to_string()}
                            </div>
                        }
                    })
            }}

            {move || match form.with(|form| form.status.clone()) {
                SubmitStatus::Idle => ().into_view(),
                SubmitStatus::Pending => {
                    view! { <div class="text-sm text-blue-600">"Creating blog..."</div> }.into_view()
                }
                SubmitStatus::Failed(_) => {
                    view! { <div class="text-sm text-red-600">"Failed to create blog."</div> }
                        .into_view()
                }
            }}

            <div class="space-y-4">
                <input name="title" placeholder="Title" class=input_class prop:value=title on:input=set_title/>
                <textarea
                    name="description"
                    placeholder="Short description"
                    rows=2
                    class=input_class
                    prop:value=description
                    on:input=set_description
                ></textarea>
                <textarea
                    name="content"
                    placeholder="Content"
                    rows=4
                    class=input_class
                    prop:value=content
                    on:input=set_content
                ></textarea>
                <input
                    name="category"
                    placeholder="Categories, comma separated"
                    class=input_class
                    prop:value=categories
                    on:input=set_categories
                />
                <input
                    name="coverImage"
                    placeholder="Cover image URL (optional)"
                    class=input_class
                    prop:value=cover_image
                    on:input=set_cover_image
                />
                <div class="flex justify-end">
                    <button
                        type="submit"
                        disabled=move || form.with(BlogForm::is_pending)
                        class="rounded-md px-4 py-2 text-sm font-medium text-white bg-blue-600 hover:bg-blue-700 active:scale-95 disabled:opacity-50"
                    >
                        "Create Blog"
                    </button>
                </div>
            </div>
        </form>
    }
}
