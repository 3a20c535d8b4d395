use leptos::*;

/// Line icons drawn on a 24x24 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    DollarSign,
    Monitor,
    Briefcase,
    GraduationCap,
    Scale,
    Heart,
    FileText,
    Trash,
    Share,
    MessageCircle,
    Send,
}

impl Glyph {
    fn paths(self) -> &'static [&'static str] {
        match self {
            Glyph::DollarSign => &["M12 2v20", "M17 5H9.5a3.5 3.5 0 0 0 0 7h5a3.5 3.5 0 0 1 0 7H6"],
            Glyph::Monitor => &[
                "M4 3h16a2 2 0 0 1 2 2v10a2 2 0 0 1-2 2H4a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2z",
                "M8 21h8",
                "M12 17v4",
            ],
            Glyph::Briefcase => &[
                "M16 20V4a2 2 0 0 0-2-2h-4a2 2 0 0 0-2 2v16",
                "M4 6h16a2 2 0 0 1 2 2v10a2 2 0 0 1-2 2H4a2 2 0 0 1-2-2V8a2 2 0 0 1 2-2z",
            ],
            Glyph::GraduationCap => &["M22 10v6M2 10l10-5 10 5-10 5z", "M6 12v5c3 3 9 3 12 0v-5"],
            Glyph::Scale => &[
                "m16 16 3-8 3 8c-.87.65-1.92 1-3 1s-2.13-.35-3-1Z",
                "m2 16 3-8 3 8c-.87.65-1.92 1-3 1s-2.13-.35-3-1Z",
                "M7 21h10",
                "M12 3v18",
                "M3 7h2c2 0 5-1 7-2 2 1 5 2 7 2h2",
            ],
            Glyph::Heart => &[
                "M19 14c1.49-1.46 3-3.21 3-5.5A5.5 5.5 0 0 0 16.5 3c-1.76 0-3 .5-4.5 2-1.5-1.5-2.74-2-4.5-2A5.5 5.5 0 0 0 2 8.5c0 2.3 1.5 4.05 3 5.5l7 7Z",
            ],
            Glyph::FileText => &[
                "M15 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V7Z",
                "M14 2v4a2 2 0 0 0 2 2h4",
                "M10 9H8",
                "M16 13H8",
                "M16 17H8",
            ],
            Glyph::Trash => &[
                "M3 6h18",
                "M19 6v14c0 1-1 2-2 2H7c-1 0-2-1-2-2V6",
                "M8 6V4c0-1 1-2 2-2h4c1 0 2 1 2 2v2",
                "M10 11v6",
                "M14 11v6",
            ],
            Glyph::Share => &[
                "M15 5a3 3 0 1 0 6 0a3 3 0 1 0-6 0",
                "M3 12a3 3 0 1 0 6 0a3 3 0 1 0-6 0",
                "M15 19a3 3 0 1 0 6 0a3 3 0 1 0-6 0",
                "m8.59 13.51 6.83 3.98",
                "m15.41 6.51-6.82 3.98",
            ],
            Glyph::MessageCircle => &["M7.9 20A9 9 0 1 0 4 16.1L2 22Z"],
            Glyph::Send => &["m22 2-7 20-4-9-9-4Z", "M22 2 11 13"],
        }
    }
}

/// Picks the icon for a blog from its first category, ignoring case.
pub fn category_glyph(categories: &[String]) -> Glyph {
    let main = categories.first().map(|category| category.to_uppercase());
    match main.as_deref() {
        Some("FINANCE") => Glyph::DollarSign,
        Some("TECH") => Glyph::Monitor,
        Some("CAREER") => Glyph::Briefcase,
        Some("EDUCATION") => Glyph::GraduationCap,
        Some("REGULATIONS") => Glyph::Scale,
        Some("LIFESTYLE") => Glyph::Heart,
        _ => Glyph::FileText,
    }
}

#[component]
pub fn Icon(glyph: Glyph, #[prop(optional, into)] class: String) -> impl IntoView {
    view! {
        <svg
            xmlns="http://www.w3.org/2000/svg"
            width="24"
            height="24"
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            class=class
        >
            {glyph.paths().iter().map(|d| view! { <path d=*d></path> }).collect_view()}
        </svg>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|tag| tag.to_string()).collect()
    }

    #[test]
    fn first_category_picks_the_icon() {
        assert_eq!(category_glyph(&tags(&["finance", "TECH"])), Glyph::DollarSign);
        assert_eq!(category_glyph(&tags(&["Tech"])), Glyph::Monitor);
        assert_eq!(category_glyph(&tags(&["CAREER"])), Glyph::Briefcase);
        assert_eq!(category_glyph(&tags(&["education"])), Glyph::GraduationCap);
        assert_eq!(category_glyph(&tags(&["Regulations"])), Glyph::Scale);
        assert_eq!(category_glyph(&tags(&["LIFESTYLE"])), Glyph::Heart);
    }

    #[test]
    fn unknown_or_missing_category_falls_back() {
        assert_eq!(category_glyph(&tags(&["cooking", "FINANCE"])), Glyph::FileText);
        assert_eq!(category_glyph(&[]), Glyph::FileText);
    }
}
