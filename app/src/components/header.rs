use std::{cell::Cell, rc::Rc, time::Duration};

use leptos::leptos_dom::helpers::IntervalHandle;
use leptos::*;

pub const TITLE: &str = "CA Monk Blog";
pub const TAGLINE: &str =
    "Stay updated with the latest trends in finance, accounting, and career growth";

const TYPING_INTERVAL: Duration = Duration::from_millis(50);

/// Reveals a fixed text one character per tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typewriter {
    text: &'static str,
    shown: usize,
}

impl Typewriter {
    pub fn new(text: &'static str) -> Self {
        Self { text, shown: 0 }
    }

    /// Shows one more character. Returns false once the whole text is visible.
    pub fn tick(&mut self) -> bool {
        if self.is_done() {
            return false;
        }
        self.shown += 1;
        true
    }

    pub fn visible(&self) -> &'static str {
        match self.text.char_indices().nth(self.shown) {
            Some((end, _)) => &self.text[..end],
            None => self.text,
        }
    }

    pub fn is_done(&self) -> bool {
        self.shown >= self.text.chars().count()
    }
}

#[component]
pub fn BlogHeader() -> impl IntoView {
    let typed = create_rw_signal(Typewriter::new(TAGLINE));

    // Saves the running interval so it can be cleared once done or on cleanup.
    let interval: Rc<Cell<Option<IntervalHandle>>> = Rc::new(Cell::new(None));
    on_cleanup({
        let interval = interval.clone();
        move || {
            if let Some(handle) = interval.take() {
                handle.clear();
            }
        }
    });

    create_effect(move |_| {
        let done = interval.clone();
        let started = set_interval_with_handle(
            move || {
                typed.update(|typewriter| {
                    typewriter.tick();
                });
                if typed.with_untracked(Typewriter::is_done) {
                    if let Some(handle) = done.take() {
                        handle.clear();
                    }
                }
            },
            TYPING_INTERVAL,
        );

        match started {
            Ok(handle) => interval.set(Some(handle)),
            Err(error) => log::error!("Failed to start typewriter: {error:?}"),
        }
    });

    view! {
        <div class="bg-white py-12 text-center">
            <h1 class="text-3xl font-extrabold tracking-tight text-gray-900 sm:text-4xl mb-4">
                {TITLE}
            </h1>
            <p class="max-w-2xl mx-auto text-lg text-gray-500 min-h-7">
                {move || typed.with(Typewriter::visible)}
                <span class="animate-pulse">"|"</span>
            </p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveals_one_character_per_tick() {
        let mut typewriter = Typewriter::new("abc");
        assert_eq!(typewriter.visible(), "");

        assert!(typewriter.tick());
        assert_eq!(typewriter.visible(), "a");

        assert!(typewriter.tick());
        assert!(typewriter.tick());
        assert_eq!(typewriter.visible(), "abc");
        assert!(typewriter.is_done());
        assert!(!typewriter.tick());
        assert_eq!(typewriter.visible(), "abc");
    }

    #[test]
    fn counts_characters_not_bytes() {
        let mut typewriter = Typewriter::new("é½x");
        typewriter.tick();
        assert_eq!(typewriter.visible(), "é");
        typewriter.tick();
        assert_eq!(typewriter.visible(), "é½");
    }

    #[test]
    fn tagline_finishes_after_its_length_in_ticks() {
        let mut typewriter = Typewriter::new(TAGLINE);
        let mut ticks = 0;
        while typewriter.tick() {
            ticks += 1;
        }
        assert_eq!(ticks, TAGLINE.chars().count());
        assert_eq!(typewriter.visible(), TAGLINE);
    }
}
