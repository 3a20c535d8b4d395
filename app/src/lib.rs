use leptos::*;
use leptos_meta::*;

use blog_query::QueryClient;

pub mod api;
pub mod components;
pub mod config;
pub mod error;
pub mod model;
pub mod queries;
pub mod reactive;

#[cfg(test)]
mod testing;

use crate::api::HttpBlogApi;
use crate::components::{
    blog_detail::BlogDetail, blog_list::BlogList, create_form::CreateBlogForm, footer::Footer,
    header::BlogHeader, navbar::Navbar,
};
use crate::config::AppConfig;
use crate::model::BlogId;
use crate::queries::{provide_blog_queries, BlogQueries};
use crate::reactive::LeptosExecutor;

/// The blog page: list and create form on the left, the selected article on the right.
#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    let config = AppConfig::default();
    let client = QueryClient::new(LeptosExecutor, config.query_options);
    provide_blog_queries(BlogQueries::new(client, HttpBlogApi::new(config)));

    let selected = create_rw_signal(None::<BlogId>);

    view! {
        <Html lang="en" dir="ltr"/>
        <Title text=components::header::TITLE/>
        <Meta charset="UTF-8"/>
        <Meta name="viewport" content="width=device-width, initial-scale=1.0"/>

        <div class="min-h-screen flex flex-col bg-gray-50">
            <Navbar/>
            <BlogHeader/>
            <main class="flex-1 max-w-screen-2xl w-full mx-auto px-6 pb-16">
                <div class="grid grid-cols-1 gap-8 lg:grid-cols-[minmax(0,2fr)_minmax(0,3fr)]">
                    <aside>
                        <BlogList
                            selected_id=selected
                            on_select=move |id: BlogId| selected.set(Some(id))
                            on_deleted=move |id: BlogId| selected.update(|current| *current = selection_after_delete(*current, id))
                        />
                        <CreateBlogForm/>
                    </aside>
                    <section>
                        <BlogDetail blog_id=selected/>
                    </section>
                </div>
            </main>
            <Footer/>
        </div>
    }
}

/// A deleted article can no longer be shown, so its selection is dropped. Anything else stays.
pub fn selection_after_delete(selected: Option<BlogId>, deleted: BlogId) -> Option<BlogId> {
    selected.filter(|id| *id != deleted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deleting_the_selected_blog_clears_the_selection() {
        assert_eq!(selection_after_delete(Some(BlogId(1)), BlogId(1)), None);
    }

    #[test]
    fn deleting_another_blog_keeps_the_selection() {
        assert_eq!(
            selection_after_delete(Some(BlogId(2)), BlogId(1)),
            Some(BlogId(2))
        );
        assert_eq!(selection_after_delete(None, BlogId(1)), None);
    }
}
