//! Site footer component.

/// A single footer link.
#[derive(Debug, Clone)]
pub struct FooterLink {
    pub label: &'static str,
    pub href: &'static str,
}

/// A titled column of footer links.
#[derive(Debug, Clone)]
pub struct FooterColumn {
    pub title: &'static str,
    pub links: Vec<FooterLink>,
}

/// Footer content. The copyright year is filled in at render time.
#[derive(Debug, Clone)]
pub struct FooterView {
    pub tagline: &'static str,
    pub columns: Vec<FooterColumn>,
}

const fn link(label: &'static str, href: &'static str) -> FooterLink {
    FooterLink { label, href }
}

impl Default for FooterView {
    fn default() -> Self {
        Self {
            tagline: "Learning games that keep students coming back.",
            columns: vec![
                FooterColumn {
                    title: "Play",
                    links: vec![
                        link("All games", "/games"),
                        link("Pricing", "/pricing"),
                    ],
                },
                FooterColumn {
                    title: "Account",
                    links: vec![link("Sign in", "/auth/login")],
                },
                FooterColumn {
                    title: "Schools",
                    links: vec![
                        link("Scale plan", "/pricing?plan=scale"),
                        link("Enterprise", "/pricing?plan=enterprise"),
                    ],
                },
            ],
        }
    }
}
